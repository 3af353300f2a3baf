use crate::{
    config::{ConfigErrors, SweepConfig},
    partition::{partition_sweep, Partition, PartitionError},
    prompt::Confirm,
    scripts::{create_scripts, ScriptError, ScriptTemplate},
    slices::{save_input_parameters, SliceError},
    sweep::{date_tag, generate_parameters_list, generate_workforce_list, ParameterSet},
    workspace::{create_folders, empty_scripts_folder, WorkspaceError},
};
use std::{fmt, path::PathBuf};
use thiserror::Error;
use tracing::{error, info, instrument};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error("Invalid configuration")]
    Config(#[from] ConfigErrors),
    #[error("Failed to partition the sweep")]
    Partition(#[from] PartitionError),
    #[error("Failed to prepare the output folders")]
    Workspace(#[from] WorkspaceError),
    #[error("Failed to save input parameters")]
    Slice(#[from] SliceError),
    #[error("Failed to create job scripts")]
    Script(#[from] ScriptError),
    #[error("Failed to ask for confirmation")]
    Prompt(#[from] std::io::Error),
}

/// a generated sweep sliced into jobs, nothing has been written yet
#[derive(Debug, Clone)]
pub struct SweepPlan {
    pub partition: Partition<ParameterSet>,
    pub total_tasks: usize,
}

impl fmt::Display for SweepPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Number of jobs: {}; number of tasks per job: {}; total number of tasks: {}.",
            self.partition.job_count(),
            self.partition.tasks_per_job,
            self.total_tasks
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written {
        slices: Vec<PathBuf>,
        scripts: Vec<PathBuf>,
    },
    Aborted,
}

#[derive(Debug, Clone)]
pub struct Generator {
    config: SweepConfig,
}

impl Generator {
    /// wrap a config after it passed its preflight checks
    pub fn new(config: SweepConfig) -> Result<Self, GeneratorError> {
        if config.preflight_checks() {
            error!("Aborting since the configuration contains errors");

            return Err(ConfigErrors::PreflightFailed.into());
        }

        Ok(Self { config })
    }

    /// enumerate the sweep and slice it, tagging every set with `date`
    #[instrument(skip(self), level = "info")]
    pub fn plan(&self, date: &str) -> Result<SweepPlan, GeneratorError> {
        let workforce_list = generate_workforce_list(&self.config);
        let parameters_list = generate_parameters_list(&self.config, &workforce_list, date);
        let total_tasks = parameters_list.len();
        let partition = partition_sweep(parameters_list, self.config.jobs)?;
        debug_assert_eq!(partition.task_count(), total_tasks);

        Ok(SweepPlan {
            partition,
            total_tasks,
        })
    }

    /// plan the sweep with the current time as tag
    pub fn plan_now(&self) -> Result<SweepPlan, GeneratorError> {
        self.plan(&date_tag())
    }

    /// ask for confirmation, then clean the workspace and write slices and scripts
    ///
    /// The template is read before anything is asked or removed, so a missing
    /// template leaves the previous outputs untouched.
    pub fn run<C: Confirm>(
        &self,
        plan: &SweepPlan,
        confirm: &mut C,
    ) -> Result<Outcome, GeneratorError> {
        let folders = &self.config.folders;
        let template =
            ScriptTemplate::load(&folders.template_path(&self.config.script), &self.config.script)?;

        let question = format!("{plan}\nShould I proceed?");

        if !confirm.confirm(&question)? {
            info!("Process aborted by user.");

            return Ok(Outcome::Aborted);
        }

        empty_scripts_folder(folders, confirm)?;
        create_folders(folders)?;

        let slices = save_input_parameters(&folders.parameters, &plan.partition.jobs)?;
        let scripts = create_scripts(&folders.scripts, &template, plan.partition.job_count())?;

        info!("Done!");

        Ok(Outcome::Written { slices, scripts })
    }
}
