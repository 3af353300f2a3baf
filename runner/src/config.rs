use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::Error,
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
pub enum ConfigErrors {
    #[error("Config file could not be read")]
    ReadConfig(#[from] Error),
    #[error("Config file is not valid YAML for a sweep")]
    ParseConfig(#[from] serde_yaml::Error),
    #[error("Config failed its preflight checks")]
    PreflightFailed,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    // number of time units every simulation runs
    #[serde(default = "default_t_max")]
    pub t_max: u64,
    // model identifier handed to the simulation
    #[serde(default = "default_model")]
    pub model: String,
    // file name of the model parameters, resolved by the simulation itself
    #[serde(default = "default_model_parameters")]
    pub model_parameters: String,
    #[serde(default = "default_reward_amount")]
    pub reward_amount: u32,
    // cpu hint written into every parameter set
    #[serde(default = "default_cpu_count")]
    pub cpu_count: u32,
    // number of cluster jobs the sweep is sliced into
    #[serde(default = "default_jobs", alias = "nb_sub_list")]
    pub jobs: usize,
    #[serde(default = "default_hebbian")]
    pub hebbian: Vec<u8>,
    #[serde(default)]
    pub workforce: WorkforceRange,
    #[serde(default)]
    pub folders: FolderConfig,
    #[serde(default)]
    pub script: ScriptConfig,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct WorkforceRange {
    pub min: u32,
    pub max: u32,
    pub step: u32,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct FolderConfig {
    // holds the submission script template
    #[serde(rename = "macro", default = "default_macro_folder")]
    pub macro_dir: PathBuf,
    #[serde(default = "default_scripts_folder")]
    pub scripts: PathBuf,
    #[serde(default = "default_parameters_folder")]
    pub parameters: PathBuf,
    #[serde(default = "default_logs_folder")]
    pub logs: PathBuf,
    #[serde(default = "default_data_folder")]
    pub data: PathBuf,
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScriptConfig {
    // file name of the template inside the macro folder
    #[serde(default = "default_template")]
    pub template: String,
    // job name used by the template, `<prefix>_0` gets replaced per job
    #[serde(default = "default_job_prefix")]
    pub job_prefix: String,
    #[serde(default = "default_slice_placeholder")]
    pub slice_placeholder: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            t_max: default_t_max(),
            model: default_model(),
            model_parameters: default_model_parameters(),
            reward_amount: default_reward_amount(),
            cpu_count: default_cpu_count(),
            jobs: default_jobs(),
            hebbian: default_hebbian(),
            workforce: WorkforceRange::default(),
            folders: FolderConfig::default(),
            script: ScriptConfig::default(),
        }
    }
}

impl Default for WorkforceRange {
    fn default() -> Self {
        Self {
            min: 50,
            max: 200,
            step: 25,
        }
    }
}

impl Default for FolderConfig {
    fn default() -> Self {
        Self {
            macro_dir: default_macro_folder(),
            scripts: default_scripts_folder(),
            parameters: default_parameters_folder(),
            logs: default_logs_folder(),
            data: default_data_folder(),
        }
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            template: default_template(),
            job_prefix: default_job_prefix(),
            slice_placeholder: default_slice_placeholder(),
        }
    }
}

impl FolderConfig {
    /// all folders in creation order
    pub fn all(&self) -> [&Path; 5] {
        [
            self.macro_dir.as_path(),
            self.scripts.as_path(),
            self.parameters.as_path(),
            self.logs.as_path(),
            self.data.as_path(),
        ]
    }

    pub fn template_path(&self, script: &ScriptConfig) -> PathBuf {
        self.macro_dir.join(&script.template)
    }
}

impl WorkforceRange {
    /// every value of the stepped range, `max` included when it is hit exactly
    pub fn values(&self) -> Vec<u32> {
        if self.step == 0 || self.min > self.max {
            return Vec::new();
        }

        (self.min..=self.max).step_by(self.step as usize).collect()
    }
}

impl SweepConfig {
    /// load a config from a yaml file, falling back to the defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigErrors> {
        match path {
            Some(path) => {
                debug!(path = ?path, "Reading sweep config");
                let config = serde_yaml::from_reader(File::open(path)?)?;
                info!(path = ?path, "Loaded sweep config");

                Ok(config)
            }
            None => {
                info!("No config given, using the built-in sweep defaults");

                Ok(Self::default())
            }
        }
    }

    pub fn preflight_checks(&self) -> bool {
        // attempt to catch all errors instead of piece-by-piece to make debugging easier for users
        let mut contains_error = false;

        if self.jobs == 0 {
            error!("jobs must be at least 1, a sweep can't be sliced into zero jobs");
            contains_error = true;
        }

        if self.workforce.step == 0 {
            error!("workforce.step cannot be 0, the range would never advance");
            contains_error = true;
        }

        if self.workforce.min > self.workforce.max {
            error!(
                "workforce.min ({}) is larger than workforce.max ({})",
                self.workforce.min, self.workforce.max
            );
            contains_error = true;
        } else if self.workforce.step != 0
            && (self.workforce.max - self.workforce.min) % self.workforce.step != 0
        {
            warn!(
                "workforce.max ({}) is not reachable from workforce.min ({}) with step {}, it will be skipped",
                self.workforce.max, self.workforce.min, self.workforce.step
            );
        }

        if self.hebbian.is_empty() {
            error!("hebbian must list at least one variant, otherwise the sweep is empty");
            contains_error = true;
        } else if let Some(value) = self.hebbian.iter().find(|value| **value > 1) {
            error!("hebbian variants are flags, {value} is neither 0 nor 1");
            contains_error = true;
        }

        if self.t_max == 0 {
            warn!("t_max is 0, every simulation will stop right away");
        }

        if self.script.slice_placeholder.is_empty() {
            error!("script.slice_placeholder cannot be empty");
            contains_error = true;
        }

        if self.script.job_prefix.is_empty() {
            error!("script.job_prefix cannot be empty");
            contains_error = true;
        }

        contains_error
    }
}

fn default_t_max() -> u64 {
    5000
}

fn default_model() -> String {
    String::from("BG")
}

fn default_model_parameters() -> String {
    String::from("economics-model-parameters.json")
}

fn default_reward_amount() -> u32 {
    1
}

fn default_cpu_count() -> u32 {
    12
}

fn default_jobs() -> usize {
    168
}

fn default_hebbian() -> Vec<u8> {
    vec![0, 1]
}

fn default_macro_folder() -> PathBuf {
    PathBuf::from("server")
}

fn default_scripts_folder() -> PathBuf {
    PathBuf::from("../avakas_scripts")
}

fn default_parameters_folder() -> PathBuf {
    PathBuf::from("../avakas_input_parameters")
}

fn default_logs_folder() -> PathBuf {
    PathBuf::from("../avakas_logs")
}

fn default_data_folder() -> PathBuf {
    PathBuf::from("../data")
}

fn default_template() -> String {
    String::from("simulation.sh")
}

fn default_job_prefix() -> String {
    String::from("ecoBGModel-simulation")
}

fn default_slice_placeholder() -> String {
    String::from("slice_0")
}
