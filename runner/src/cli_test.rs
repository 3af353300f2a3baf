use crate::{
    config::SweepConfig,
    generator::GeneratorError,
    render_slice,
    slices::{save_slice, slice_path},
    sweep::{generate_parameters_list, generate_workforce_list},
    Cli, Command,
};
use clap::Parser;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn parse(args: &[&str]) -> Command {
    Cli::try_parse_from(args).unwrap().command
}

#[test]
pub fn jobs_override_replaces_config_value() {
    let Command::Plan { sweep } = parse(&["slicer", "plan", "--jobs", "7"]) else {
        panic!("expected the plan command");
    };

    let plan = sweep.generator().unwrap().plan("2024-03-01_14-05").unwrap();

    assert_eq!(plan.partition.job_count(), 7);
    assert_eq!(plan.total_tasks, 168);
}

#[test]
pub fn zero_jobs_override_fails_preflight() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "jobs: 12").unwrap();
    let config = file.path().to_str().unwrap();

    let Command::Generate { sweep, yes } =
        parse(&["slicer", "generate", "--config", config, "--jobs", "0", "--yes"])
    else {
        panic!("expected the generate command");
    };

    assert!(yes);
    assert!(matches!(
        sweep.generator(),
        Err(GeneratorError::Config(_))
    ));
}

#[test]
pub fn inspect_prints_slice_as_yaml() {
    let dir = tempdir().unwrap();
    let config = SweepConfig::default();
    let workforce = generate_workforce_list(&config);
    let parameters = generate_parameters_list(&config, &workforce[..1], "2024-03-01_14-05");
    let path = slice_path(dir.path(), 0);
    save_slice(&path, &parameters).unwrap();

    let Command::Inspect { slice } = parse(&["slicer", "inspect", path.to_str().unwrap()]) else {
        panic!("expected the inspect command");
    };
    let yaml = render_slice(&slice).unwrap();

    assert_eq!(yaml.matches("workforce:").count(), 2);
    assert!(yaml.contains("2024-03-01_14-05"));
    assert!(yaml.contains("hebbian: 1"));
}
