mod config;
mod generator;
mod partition;
mod prompt;
mod scripts;
mod slices;
mod sweep;
mod workspace;

#[cfg(test)]
mod cli_test;
#[cfg(test)]
mod partition_test;

use clap::{Args, Parser, Subcommand};
use config::SweepConfig;
use generator::{Generator, GeneratorError, Outcome};
use prompt::{AssumeYes, Prompt};
use std::{
    error::Error,
    path::{Path, PathBuf},
    process::ExitCode,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Slice parameter sweeps into cluster jobs")]
struct Cli {
    /// Increase log verbosity, overridden by RUST_LOG
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate the sweep, then write one slice and one script per job
    Generate {
        #[command(flatten)]
        sweep: SweepArgs,
        /// Proceed without asking, the data folder is always kept
        #[arg(short, long)]
        yes: bool,
    },
    /// Print how the sweep would be sliced without touching the disk
    Plan {
        #[command(flatten)]
        sweep: SweepArgs,
    },
    /// Print the parameter sets stored in a slice file
    Inspect {
        /// Slice written by `generate`, e.g. slice_0.bin
        slice: PathBuf,
    },
}

#[derive(Args, Debug)]
struct SweepArgs {
    /// YAML sweep config, built-in defaults are used when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Override the number of jobs from the config
    #[arg(short, long)]
    jobs: Option<usize>,
}

impl SweepArgs {
    fn generator(&self) -> Result<Generator, GeneratorError> {
        let mut config = SweepConfig::load(self.config.as_deref())?;

        if let Some(jobs) = self.jobs {
            info!("Overriding job count {} with {jobs}", config.jobs);
            config.jobs = jobs;
        }

        Generator::new(config)
    }
}

/// parameter sets of a slice file as yaml
fn render_slice(path: &Path) -> Result<String, Box<dyn Error>> {
    let tasks = slices::load_slice(path)?;
    info!(path = ?path, "Slice holds {} parameter sets", tasks.len());

    Ok(serde_yaml::to_string(&tasks)?)
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_target(false)
        .init();
}

fn run(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate { sweep, yes } => {
            let generator = sweep.generator()?;
            let plan = generator.plan_now()?;

            let outcome = if yes {
                generator.run(&plan, &mut AssumeYes)?
            } else {
                generator.run(&plan, &mut Prompt::stdio())?
            };

            if let Outcome::Written { slices, scripts } = outcome {
                info!(
                    "Wrote {} slices and {} scripts",
                    slices.len(),
                    scripts.len()
                );
            }
        }
        Command::Plan { sweep } => {
            let plan = sweep.generator()?.plan_now()?;

            println!("{plan}");
        }
        Command::Inspect { slice } => {
            print!("{}", render_slice(&slice)?);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            let mut message = error.to_string();
            let mut source = error.source();

            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }

            error!("{message}");

            ExitCode::FAILURE
        }
    }
}
