//! Restart execution.

use super::config::RestartConfig;
use crate::ls::{wall_clock_seed, LsProblem, LsRunner, RunResult, Solution, StopReason};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::debug;

/// Result of a restart sweep.
#[derive(Debug, Clone)]
pub struct RestartResult<S: Clone> {
    /// The best solution across all runs.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Index of the run that produced the best solution.
    pub best_restart: usize,

    /// Best cost of each run, in run order. Shorter than the configured
    /// number of restarts if the sweep was cancelled part-way.
    pub restart_costs: Vec<f64>,
}

/// Runs several independent local searches and keeps the best result.
///
/// Each run gets its own seed derived from the base seed, so a sweep is
/// reproducible and the parallel and sequential paths produce identical
/// results.
pub struct RestartRunner;

impl RestartRunner {
    /// Runs the configured number of restarts.
    pub fn run<P>(
        problem: &P,
        config: &RestartConfig,
    ) -> Result<RestartResult<P::Solution>, P::Error>
    where
        P: LsProblem,
        P::Error: Send,
    {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs restarts with an optional cancellation token shared by all runs.
    ///
    /// The first hook error aborts the sweep and is returned unchanged.
    pub fn run_with_cancel<P>(
        problem: &P,
        config: &RestartConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RestartResult<P::Solution>, P::Error>
    where
        P: LsProblem,
        P::Error: Send,
    {
        config.validate().expect("invalid RestartConfig");

        let base_seed = config.run.seed.unwrap_or_else(wall_clock_seed);

        #[cfg(feature = "parallel")]
        if config.parallel {
            return run_parallel(problem, config, base_seed, cancel);
        }

        run_sequential(problem, config, base_seed, cancel)
    }
}

fn run_sequential<P: LsProblem>(
    problem: &P,
    config: &RestartConfig,
    base_seed: u64,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<RestartResult<P::Solution>, P::Error> {
    let mut runs = Vec::with_capacity(config.restarts);
    for index in 0..config.restarts {
        let run_config = config
            .run
            .clone()
            .with_seed(base_seed.wrapping_add(index as u64));
        let result = LsRunner::run_with_cancel(problem, &run_config, cancel.clone())?;
        let cancelled = result.stop == StopReason::Cancelled;
        runs.push(result);
        if cancelled {
            break;
        }
    }
    Ok(reduce(runs))
}

#[cfg(feature = "parallel")]
fn run_parallel<P>(
    problem: &P,
    config: &RestartConfig,
    base_seed: u64,
    cancel: Option<Arc<AtomicBool>>,
) -> Result<RestartResult<P::Solution>, P::Error>
where
    P: LsProblem,
    P::Error: Send,
{
    let runs: Result<Vec<RunResult<P::Solution>>, P::Error> = (0..config.restarts)
        .into_par_iter()
        .map(|index| {
            let run_config = config
                .run
                .clone()
                .with_seed(base_seed.wrapping_add(index as u64));
            LsRunner::run_with_cancel(problem, &run_config, cancel.clone())
        })
        .collect();
    Ok(reduce(runs?))
}

/// Picks the best run; ties keep the earliest run.
fn reduce<S: Solution>(mut runs: Vec<RunResult<S>>) -> RestartResult<S> {
    let restart_costs: Vec<f64> = runs.iter().map(|r| r.best_cost).collect();

    let mut best_restart = 0;
    for index in 1..runs.len() {
        if runs[index].best.is_better_than(&runs[best_restart].best) {
            best_restart = index;
        }
    }

    let chosen = runs.swap_remove(best_restart);
    debug!(
        best_restart,
        best_cost = chosen.best_cost,
        runs = restart_costs.len(),
        "restart sweep finished"
    );

    RestartResult {
        best: chosen.best,
        best_cost: chosen.best_cost,
        best_restart,
        restart_costs,
    }
}
