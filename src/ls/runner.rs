//! Local-search execution loop.

use super::acceptance::{Acceptance, StrictImprovement};
use super::config::RunConfig;
use super::solver::{wall_clock_seed, LocalSearch};
use super::types::{Cost, LsProblem, Solution, StepOutcome};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::debug;

/// Best cost is sampled into the history every this many steps.
const HISTORY_INTERVAL: usize = 100;

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StopReason {
    /// The step limit was reached.
    StepLimit,
    /// The stagnation limit was reached.
    Stagnated,
    /// The wall-clock budget ran out.
    TimeLimit,
    /// The cancellation flag was set externally.
    Cancelled,
}

/// Result of a local-search run.
#[derive(Debug, Clone)]
pub struct RunResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of steps (neighbor evaluations).
    pub steps: usize,

    /// Number of improving steps.
    pub improvements: usize,

    /// Number of accepted steps (including improvements).
    pub accepted_moves: usize,

    /// Stagnation counter when the run ended.
    pub final_stagnation: usize,

    /// Why the run ended.
    pub stop: StopReason,

    /// Best cost sampled at regular intervals for history tracking.
    pub cost_history: Vec<f64>,
}

/// Drives a [`LocalSearch`] until a stop criterion fires.
pub struct LsRunner;

impl LsRunner {
    /// Runs hill climbing to completion.
    pub fn run<P: LsProblem>(
        problem: &P,
        config: &RunConfig,
    ) -> Result<RunResult<P::Solution>, P::Error> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs hill climbing with an optional cancellation token.
    pub fn run_with_cancel<P: LsProblem>(
        problem: &P,
        config: &RunConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult<P::Solution>, P::Error> {
        Self::run_with_acceptance(problem, config, StrictImprovement, cancel)
    }

    /// Runs with a caller-chosen acceptance strategy.
    ///
    /// Stop criteria are checked before every step, in order: cancellation,
    /// time limit, step limit, stagnation limit. Hook errors abort the run
    /// and are returned unchanged.
    pub fn run_with_acceptance<P, A>(
        problem: &P,
        config: &RunConfig,
        acceptance: A,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<RunResult<P::Solution>, P::Error>
    where
        P: LsProblem,
        A: Acceptance<P::Solution>,
    {
        config.validate().expect("invalid RunConfig");

        let seed = config.seed.unwrap_or_else(wall_clock_seed);
        let mut solver = LocalSearch::with_seed(problem, seed).with_acceptance(acceptance);

        let start = Instant::now();
        solver.initialize()?;
        let mut best = solver
            .current_solution()
            .cloned()
            .expect("initialize() sets the current solution");
        let mut best_cost = best.cost().to_f64();

        let mut steps = 0usize;
        let mut improvements = 0usize;
        let mut accepted_moves = 0usize;
        let mut cost_history = Vec::new();
        cost_history.push(best_cost);

        let stop = loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    break StopReason::Cancelled;
                }
            }
            if let Some(limit) = config.time_limit {
                if start.elapsed() >= limit {
                    break StopReason::TimeLimit;
                }
            }
            if config.max_steps > 0 && steps >= config.max_steps {
                break StopReason::StepLimit;
            }
            if config.stagnation_limit > 0 && solver.stagnation() >= config.stagnation_limit {
                break StopReason::Stagnated;
            }

            let outcome = solver.step()?;
            steps += 1;
            match outcome {
                StepOutcome::Improved => {
                    improvements += 1;
                    accepted_moves += 1;
                }
                StepOutcome::Accepted => accepted_moves += 1,
                StepOutcome::Rejected => {}
            }

            // The current solution may drift under non-greedy acceptance;
            // the best is tracked separately.
            if outcome.replaced_current() {
                if let Some(current) = solver.current_solution() {
                    if current.is_better_than(&best) {
                        best = current.clone();
                        best_cost = best.cost().to_f64();
                    }
                }
            }

            // Record history
            if steps.is_multiple_of(HISTORY_INTERVAL) {
                cost_history.push(best_cost);
            }
        };

        // Final history entry
        if cost_history
            .last()
            .is_none_or(|&last| (last - best_cost).abs() > 1e-15)
        {
            cost_history.push(best_cost);
        }

        debug!(?stop, best_cost, steps, "local search finished");

        Ok(RunResult {
            best,
            best_cost,
            steps,
            improvements,
            accepted_moves,
            final_stagnation: solver.stagnation(),
            stop,
            cost_history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ls::Metropolis;
    use rand::seq::SliceRandom;
    use rand::Rng;
    use std::time::Duration;

    // ---- Quadratic minimization: f(x) = x^2, minimum at 0 ----

    #[derive(Clone, Debug)]
    struct Point(f64);

    impl Solution for Point {
        type Cost = f64;
        fn cost(&self) -> f64 {
            self.0 * self.0
        }
    }

    struct Quadratic;

    impl LsProblem for Quadratic {
        type Solution = Point;
        type Error = String;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Point, String> {
            Ok(Point(rng.random_range(-10.0..10.0)))
        }

        fn neighbor<R: Rng>(&self, current: &Point, rng: &mut R) -> Result<Point, String> {
            Ok(Point(current.0 + rng.random_range(-1.0..1.0)))
        }
    }

    // ---- Integer ramp with a fixed improvement direction ----

    #[derive(Clone, Debug)]
    struct Level(i64);

    impl Solution for Level {
        type Cost = i64;
        fn cost(&self) -> i64 {
            self.0
        }
    }

    struct Ramp {
        down: bool,
    }

    impl LsProblem for Ramp {
        type Solution = Level;
        type Error = String;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<Level, String> {
            Ok(Level(1000))
        }

        fn neighbor<R: Rng>(&self, current: &Level, _rng: &mut R) -> Result<Level, String> {
            let delta = if self.down { -1 } else { 1 };
            Ok(Level(current.0 + delta))
        }
    }

    struct NoNeighborhood;

    impl LsProblem for NoNeighborhood {
        type Solution = Level;
        type Error = String;

        fn initial_solution<R: Rng>(&self, _rng: &mut R) -> Result<Level, String> {
            Ok(Level(5))
        }

        fn neighbor<R: Rng>(&self, _current: &Level, _rng: &mut R) -> Result<Level, String> {
            Err("neighborhood empty".to_string())
        }
    }

    #[test]
    fn test_run_quadratic_converges() {
        let config = RunConfig::default().with_max_steps(5_000).with_seed(42);

        let result = LsRunner::run(&Quadratic, &config).unwrap();

        assert!(
            result.best_cost < 1.0,
            "expected near-zero cost, got {}",
            result.best_cost
        );
        assert!(result.improvements > 0);
        assert!(result.steps <= 5_000);
    }

    #[test]
    fn test_run_stops_on_stagnation() {
        let config = RunConfig::default()
            .with_max_steps(0)
            .with_stagnation_limit(10)
            .with_seed(42);

        let result = LsRunner::run(&Ramp { down: false }, &config).unwrap();

        assert_eq!(result.stop, StopReason::Stagnated);
        assert_eq!(result.steps, 10);
        assert_eq!(result.final_stagnation, 10);
        assert_eq!(result.improvements, 0);
        assert_eq!(result.best.cost(), 1000);
    }

    #[test]
    fn test_run_stops_on_step_limit() {
        let config = RunConfig::default()
            .with_max_steps(25)
            .with_stagnation_limit(0)
            .with_seed(42);

        let result = LsRunner::run(&Ramp { down: true }, &config).unwrap();

        assert_eq!(result.stop, StopReason::StepLimit);
        assert_eq!(result.steps, 25);
        assert_eq!(result.improvements, 25);
        assert_eq!(result.accepted_moves, 25);
        assert_eq!(result.best.cost(), 975);
    }

    #[test]
    fn test_run_stops_on_time_limit() {
        // A zero budget fires before the first step.
        let config = RunConfig::default()
            .with_max_steps(0)
            .with_stagnation_limit(0)
            .with_time_limit(Duration::ZERO)
            .with_seed(42);

        let result = LsRunner::run(&Ramp { down: true }, &config).unwrap();

        assert_eq!(result.stop, StopReason::TimeLimit);
        assert_eq!(result.steps, 0);
        assert_eq!(result.best.cost(), 1000);
        assert_eq!(result.cost_history, vec![1000.0]);
    }

    #[test]
    fn test_run_cancellation() {
        let config = RunConfig::default().with_seed(42);

        // Pre-set the flag so cancellation is deterministic regardless of
        // how fast the run completes.
        let cancel = Arc::new(AtomicBool::new(true));

        let result = LsRunner::run_with_cancel(&Quadratic, &config, Some(cancel)).unwrap();
        assert_eq!(result.stop, StopReason::Cancelled);
        assert_eq!(result.steps, 0);
    }

    #[test]
    fn test_run_propagates_hook_error() {
        let config = RunConfig::default().with_max_steps(10).with_seed(42);

        let err = LsRunner::run(&NoNeighborhood, &config).unwrap_err();
        assert_eq!(err, "neighborhood empty");
    }

    #[test]
    fn test_run_cost_history_non_increasing() {
        let config = RunConfig::default().with_max_steps(2_000).with_seed(42);

        let result = LsRunner::run(&Quadratic, &config).unwrap();

        assert!(result.cost_history.len() > 1);
        for window in result.cost_history.windows(2) {
            assert!(
                window[1] <= window[0] + 1e-10,
                "best cost history should be non-increasing: {} > {}",
                window[1],
                window[0]
            );
        }
    }

    #[test]
    fn test_run_same_seed_reproduces_result() {
        let config = RunConfig::default().with_max_steps(1_000).with_seed(7);

        let a = LsRunner::run(&Quadratic, &config).unwrap();
        let b = LsRunner::run(&Quadratic, &config).unwrap();

        assert_eq!(a.best_cost, b.best_cost);
        assert_eq!(a.steps, b.steps);
        assert_eq!(a.improvements, b.improvements);
        assert_eq!(a.cost_history, b.cost_history);
    }

    #[test]
    #[should_panic(expected = "invalid RunConfig")]
    fn test_run_rejects_invalid_config() {
        let config = RunConfig::default()
            .with_max_steps(0)
            .with_stagnation_limit(0);
        let _ = LsRunner::run(&Quadratic, &config);
    }

    #[test]
    fn test_run_with_metropolis_accepts_uphill() {
        let config = RunConfig::default()
            .with_max_steps(5_000)
            .with_stagnation_limit(0)
            .with_seed(42);

        let result = LsRunner::run_with_acceptance(
            &Quadratic,
            &config,
            Metropolis::new(10.0, 0.999),
            None,
        )
        .unwrap();

        assert_eq!(result.steps, 5_000);
        // The hot phase accepts plenty of non-improving moves.
        assert!(
            result.accepted_moves > result.improvements,
            "expected uphill acceptances, got {} accepted vs {} improving",
            result.accepted_moves,
            result.improvements
        );
        assert!(
            result.best_cost < 5.0,
            "expected convergence after cooling, got {}",
            result.best_cost
        );
    }

    // ---- Discrete: permutation sorting ----

    #[derive(Clone, Debug)]
    struct Perm(Vec<usize>);

    impl Solution for Perm {
        type Cost = u64;
        fn cost(&self) -> u64 {
            // Number of elements not in their correct position
            self.0.iter().enumerate().filter(|&(i, &v)| i != v).count() as u64
        }
    }

    struct PermSort {
        n: usize,
    }

    impl LsProblem for PermSort {
        type Solution = Perm;
        type Error = String;

        fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Perm, String> {
            let mut perm: Vec<usize> = (0..self.n).collect();
            perm.shuffle(rng);
            Ok(Perm(perm))
        }

        fn neighbor<R: Rng>(&self, current: &Perm, rng: &mut R) -> Result<Perm, String> {
            let mut next = current.0.clone();
            let i = rng.random_range(0..self.n);
            let j = rng.random_range(0..self.n);
            next.swap(i, j);
            Ok(Perm(next))
        }
    }

    #[test]
    fn test_run_permutation_sort() {
        // From any non-sorted permutation a strictly improving swap exists,
        // so hill climbing sorts completely.
        let config = RunConfig::default()
            .with_max_steps(50_000)
            .with_stagnation_limit(2_000)
            .with_seed(42);

        let result = LsRunner::run(&PermSort { n: 10 }, &config).unwrap();

        assert_eq!(
            result.best_cost, 0.0,
            "expected sorted permutation, got cost {}",
            result.best_cost
        );
        assert_eq!(result.best.0, (0..10).collect::<Vec<usize>>());
    }
}
