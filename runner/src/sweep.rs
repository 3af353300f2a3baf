use crate::config::SweepConfig;
use chrono::Local;
use itertools::{iproduct, Itertools};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// worker counts of the three populations, always non-decreasing
pub type Workforce = [u32; 3];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// configuration of a single simulation run
/// created once during sweep generation and never mutated afterwards
pub struct ParameterSet {
    pub workforce: Workforce,
    pub t_max: u64,
    pub model: String,
    pub model_parameters: String,
    pub hebbian: u8,
    pub reward_amount: u32,
    pub cpu_count: u32,
    // position in the sweep, used for saving results
    pub idx: usize,
    // generation tag shared by every set of a sweep
    pub date: String,
}

/// timestamp tag used to group all outputs of one sweep, e.g. `2024-03-01_14-05`
pub fn date_tag() -> String {
    Local::now().format("%Y-%m-%d_%H-%M").to_string()
}

/// enumerate all non-decreasing workforce triples over the configured range
#[instrument(skip(config), level = "debug")]
pub fn generate_workforce_list(config: &SweepConfig) -> Vec<Workforce> {
    let possible = config.workforce.values();
    debug!("Possible workforce values: {possible:?}");

    let workforce_list = iproduct!(possible.iter(), possible.iter(), possible.iter())
        .filter(|(i, j, k)| i <= j && j <= k)
        .map(|(i, j, k)| [*i, *j, *k])
        .collect_vec();

    info!("Length of workforce list: {}", workforce_list.len());

    workforce_list
}

/// expand every workforce triple into one parameter set per hebbian variant
pub fn generate_parameters_list(
    config: &SweepConfig,
    workforce_list: &[Workforce],
    date: &str,
) -> Vec<ParameterSet> {
    let parameters_list = iproduct!(workforce_list.iter(), config.hebbian.iter())
        .enumerate()
        .map(|(idx, (workforce, hebbian))| ParameterSet {
            workforce: *workforce,
            t_max: config.t_max,
            model: config.model.clone(),
            model_parameters: config.model_parameters.clone(),
            hebbian: *hebbian,
            reward_amount: config.reward_amount,
            cpu_count: config.cpu_count,
            idx,
            date: date.to_owned(),
        })
        .collect_vec();

    debug!("Generated {} parameter sets", parameters_list.len());

    parameters_list
}
