use crate::{
    config::SweepConfig,
    partition::{partition, partition_sweep, PartitionError},
    sweep::{generate_parameters_list, generate_workforce_list},
};
use proptest::prelude::*;

fn jobs_of(partition: &crate::partition::Partition<usize>) -> Vec<Vec<usize>> {
    partition.jobs.values().cloned().collect()
}

#[test]
pub fn leftover_goes_to_first_job() {
    let result = partition((0..10).collect(), 3).unwrap();

    assert_eq!(result.tasks_per_job, 3);
    assert_eq!(
        jobs_of(&result),
        vec![vec![0, 1, 2, 9], vec![3, 4, 5], vec![6, 7, 8]]
    );
}

#[test]
pub fn leftovers_are_spread_round_robin() {
    let result = partition((0..11).collect(), 4).unwrap();

    assert_eq!(result.tasks_per_job, 2);
    assert_eq!(
        jobs_of(&result),
        vec![vec![0, 1, 8], vec![2, 3, 9], vec![4, 5, 10], vec![6, 7]]
    );
}

#[test]
pub fn fewer_tasks_than_jobs_clamps_job_count() {
    let result = partition(vec!["t0", "t1"], 5).unwrap();

    assert_eq!(result.job_count(), 2);
    assert_eq!(result.tasks_per_job, 1);
    assert_eq!(
        result.jobs.into_values().collect::<Vec<_>>(),
        vec![vec!["t0"], vec!["t1"]]
    );
}

#[test]
pub fn equal_tasks_and_jobs_gives_one_each() {
    let result = partition((0..4).collect(), 4).unwrap();

    assert_eq!(result.tasks_per_job, 1);
    assert_eq!(jobs_of(&result), vec![vec![0], vec![1], vec![2], vec![3]]);
}

#[test]
pub fn single_chunk_with_leftovers() {
    // 15 tasks over 10 jobs: one task each, five leftovers for the first jobs
    let result = partition((0..15).collect(), 10).unwrap();

    let jobs = jobs_of(&result);

    assert_eq!(result.job_count(), 10);
    assert_eq!(result.tasks_per_job, 1);
    assert_eq!(jobs[0], vec![0, 10]);
    assert_eq!(jobs[4], vec![4, 14]);
    assert_eq!(jobs[5], vec![5]);
}

#[test]
pub fn empty_input_gives_empty_mapping() {
    let result = partition(Vec::<usize>::new(), 7).unwrap();

    assert!(result.jobs.is_empty());
    assert_eq!(result.job_count(), 0);
}

#[test]
pub fn zero_jobs_is_rejected() {
    assert_eq!(
        partition(vec![1, 2, 3], 0),
        Err(PartitionError::InvalidJobCount(0))
    );
}

#[test]
pub fn default_sweep_fills_every_job_once() {
    let config = SweepConfig::default();
    let workforce = generate_workforce_list(&config);
    let parameters = generate_parameters_list(&config, &workforce, "2024-01-01_00-00");

    let result = partition_sweep(parameters, config.jobs).unwrap();

    assert_eq!(result.job_count(), 168);
    assert!(result.jobs.values().all(|tasks| tasks.len() == 1));
}

#[test]
pub fn unordered_sweep_is_rejected() {
    let config = SweepConfig::default();
    let workforce = generate_workforce_list(&config);
    let mut parameters = generate_parameters_list(&config, &workforce, "2024-01-01_00-00");
    parameters.swap(3, 4);

    assert_eq!(
        partition_sweep(parameters, 10),
        Err(PartitionError::OutOfOrder {
            position: 4,
            previous: 4,
            found: 3,
        })
    );
}

proptest! {
    #[test]
    fn every_task_is_assigned_exactly_once(total in 0usize..400, jobs in 1usize..120) {
        let result = partition((0..total).collect(), jobs).unwrap();
        let mut assigned: Vec<usize> = result.jobs.values().flatten().copied().collect();
        assigned.sort_unstable();

        prop_assert_eq!(assigned, (0..total).collect::<Vec<_>>());
    }

    #[test]
    fn job_sizes_differ_by_at_most_one(total in 1usize..400, jobs in 1usize..120) {
        let result = partition((0..total).collect(), jobs).unwrap();
        let sizes: Vec<usize> = result.jobs.values().map(Vec::len).collect();
        let min = sizes.iter().min().copied().unwrap_or_default();
        let max = sizes.iter().max().copied().unwrap_or_default();

        prop_assert!(min >= 1);
        prop_assert!(max - min <= 1);
        prop_assert_eq!(result.job_count(), jobs.min(total));
        prop_assert_eq!(min, result.tasks_per_job);
    }

    #[test]
    fn jobs_keep_input_order(total in 0usize..400, jobs in 1usize..120) {
        let result = partition((0..total).collect(), jobs).unwrap();

        for tasks in result.jobs.values() {
            prop_assert!(tasks.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }

    #[test]
    fn partitioning_is_idempotent(total in 0usize..200, jobs in 1usize..60) {
        let first = partition((0..total).collect::<Vec<_>>(), jobs).unwrap();
        let second = partition((0..total).collect::<Vec<_>>(), jobs).unwrap();

        prop_assert_eq!(first, second);
    }
}
