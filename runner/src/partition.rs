use crate::sweep::ParameterSet;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, instrument};

/// map of job index -> tasks of that job, in sweep order
pub type JobAssignment<T> = BTreeMap<usize, Vec<T>>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PartitionError {
    #[error("Job count must be at least 1, got {0}")]
    InvalidJobCount(usize),
    #[error("Task at position {position} has index {found} but must follow index {previous}")]
    OutOfOrder {
        position: usize,
        previous: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition<T> {
    pub jobs: JobAssignment<T>,
    /// tasks every job received in the bulk pass
    /// NOTE: jobs that also took a leftover task hold one more than this
    pub tasks_per_job: usize,
}

impl<T> Partition<T> {
    /// effective number of jobs, may be lower than requested
    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    pub fn task_count(&self) -> usize {
        self.jobs.values().map(Vec::len).sum()
    }
}

/// split `tasks` over `target_job_count` jobs so that job sizes differ by at most one
///
/// With more tasks than jobs every job first takes a contiguous chunk of
/// `len / target_job_count` tasks, the leftovers are then handed out one by one
/// starting again at job 0. Otherwise the job count is clamped to the number of
/// tasks and every job receives exactly one.
#[instrument(skip(tasks), fields(task_count = tasks.len()), level = "debug")]
pub fn partition<T>(
    tasks: Vec<T>,
    target_job_count: usize,
) -> Result<Partition<T>, PartitionError> {
    if target_job_count == 0 {
        return Err(PartitionError::InvalidJobCount(target_job_count));
    }

    let total = tasks.len();
    let base = total / target_job_count;
    let mut jobs = JobAssignment::new();

    // more tasks than jobs
    if total > target_job_count {
        let mut tasks = tasks.into_iter();

        for job in 0..target_job_count {
            jobs.insert(job, tasks.by_ref().take(base).collect());
        }

        let leftover = total - target_job_count * base;
        debug!("Bulk pass assigned {base} tasks per job, {leftover} left over");

        for (index, task) in tasks.enumerate() {
            if let Some(job) = jobs.get_mut(&(index % target_job_count)) {
                job.push(task);
            }
        }

        Ok(Partition {
            jobs,
            tasks_per_job: base,
        })
    } else {
        if total < target_job_count {
            debug!("Only {total} tasks for {target_job_count} jobs, clamping job count");
        }

        jobs.extend(tasks.into_iter().enumerate().map(|(job, task)| (job, vec![task])));

        Ok(Partition {
            jobs,
            tasks_per_job: 1,
        })
    }
}

/// partition a generated sweep, rejecting sets that are not in sweep order
pub fn partition_sweep(
    parameters: Vec<ParameterSet>,
    target_job_count: usize,
) -> Result<Partition<ParameterSet>, PartitionError> {
    if let Some((position, pair)) = parameters
        .windows(2)
        .enumerate()
        .find(|(_, pair)| pair[0].idx >= pair[1].idx)
    {
        return Err(PartitionError::OutOfOrder {
            position: position + 1,
            previous: pair[0].idx,
            found: pair[1].idx,
        });
    }

    partition(parameters, target_job_count)
}
