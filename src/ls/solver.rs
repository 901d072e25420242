//! Step-wise local search.
//!
//! [`LocalSearch`] owns the current solution, the stagnation counter and the
//! random number generator, and advances one neighbor evaluation per
//! [`step`](LocalSearch::step) call. Callers drive the loop themselves (or
//! use [`LsRunner`](super::LsRunner)), so termination, monitoring and restart
//! policy stay outside the solver.

use super::acceptance::{Acceptance, StrictImprovement};
use super::types::{LsProblem, SearchObserver, Solution, StepOutcome};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::cmp::Ordering;
use std::time::{SystemTime, UNIX_EPOCH};
use tracing::debug;

/// Seed derived from the wall clock, used when the caller does not pin one.
pub(crate) fn wall_clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Iterative local-search solver over an [`LsProblem`].
///
/// The solver holds exactly one solution at a time. Each step asks the
/// problem for a random neighbor, compares it against the current solution
/// exactly once and lets the [`Acceptance`] strategy decide the replacement.
/// The stagnation counter tracks consecutive steps without improvement of
/// the current solution and resets to zero only on improving steps.
///
/// [`initialize`](LocalSearch::initialize) must be called before
/// [`step`](LocalSearch::step); calling `initialize` again discards the
/// current solution and restarts the search.
pub struct LocalSearch<P: LsProblem, A = StrictImprovement, R = StdRng> {
    problem: P,
    acceptance: A,
    rng: R,
    current: Option<P::Solution>,
    stagnation: usize,
    observer: Option<Box<dyn SearchObserver<P::Solution>>>,
    seed: Option<u64>,
}

impl<P: LsProblem> LocalSearch<P> {
    /// Creates a hill-climbing solver seeded from the wall clock.
    ///
    /// The generated seed is kept and exposed via [`seed`](LocalSearch::seed)
    /// so a run can still be reproduced after the fact.
    pub fn new(problem: P) -> Self {
        Self::with_seed(problem, wall_clock_seed())
    }

    /// Creates a hill-climbing solver with a fixed seed. Two solvers built
    /// from the same problem and seed produce identical trajectories.
    pub fn with_seed(problem: P, seed: u64) -> Self {
        Self {
            problem,
            acceptance: StrictImprovement,
            rng: StdRng::seed_from_u64(seed),
            current: None,
            stagnation: 0,
            observer: None,
            seed: Some(seed),
        }
    }
}

impl<P: LsProblem, R: Rng> LocalSearch<P, StrictImprovement, R> {
    /// Creates a hill-climbing solver with a caller-supplied generator.
    /// No seed is recorded; reproducibility is the caller's concern.
    pub fn with_rng(problem: P, rng: R) -> Self {
        Self {
            problem,
            acceptance: StrictImprovement,
            rng,
            current: None,
            stagnation: 0,
            observer: None,
            seed: None,
        }
    }
}

impl<P, A, R> LocalSearch<P, A, R>
where
    P: LsProblem,
    A: Acceptance<P::Solution>,
    R: Rng,
{
    /// Replaces the acceptance strategy, e.g. with [`Metropolis`](super::Metropolis).
    pub fn with_acceptance<A2: Acceptance<P::Solution>>(
        self,
        acceptance: A2,
    ) -> LocalSearch<P, A2, R> {
        LocalSearch {
            problem: self.problem,
            acceptance,
            rng: self.rng,
            current: self.current,
            stagnation: self.stagnation,
            observer: self.observer,
            seed: self.seed,
        }
    }

    /// Attaches an observer that is notified on initialization and after
    /// every step.
    pub fn with_observer<O: SearchObserver<P::Solution> + 'static>(mut self, observer: O) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Resets the stagnation counter and creates a fresh initial solution.
    ///
    /// Calling this on an already-initialized solver restarts the search.
    /// If the problem fails to produce an initial solution the error is
    /// returned unchanged; the counter is already reset at that point but
    /// the previous current solution, if any, is kept.
    pub fn initialize(&mut self) -> Result<(), P::Error> {
        self.stagnation = 0;
        let initial = self.problem.initial_solution(&mut self.rng)?;
        debug!(cost = ?initial.cost(), "initial solution created");
        if let Some(observer) = &mut self.observer {
            observer.on_initialized(&initial);
        }
        self.current = Some(initial);
        Ok(())
    }

    /// Evaluates one random neighbor and applies the acceptance rule.
    ///
    /// On an improving step the neighbor replaces the current solution and
    /// the stagnation counter resets to zero. Any other step increments the
    /// counter; a non-improving neighbor may still replace the current
    /// solution if the acceptance strategy says so. If the problem fails to
    /// produce a neighbor the error is returned unchanged and the solver
    /// state is untouched.
    ///
    /// # Panics
    /// Panics if called before [`initialize`](LocalSearch::initialize).
    pub fn step(&mut self) -> Result<StepOutcome, P::Error> {
        let current = self
            .current
            .as_ref()
            .expect("step() called before initialize()");
        let neighbor = self.problem.neighbor(current, &mut self.rng)?;

        let comparison = neighbor.compare(current);
        let accepted = self
            .acceptance
            .accept(comparison, &neighbor, current, &mut self.rng);

        let outcome = match (accepted, comparison == Ordering::Less) {
            (true, true) => StepOutcome::Improved,
            (true, false) => StepOutcome::Accepted,
            (false, _) => StepOutcome::Rejected,
        };

        match outcome {
            StepOutcome::Improved => {
                self.stagnation = 0;
                debug!(cost = ?neighbor.cost(), "improving neighbor accepted");
                self.current = Some(neighbor);
            }
            StepOutcome::Accepted => {
                self.stagnation += 1;
                debug!(
                    cost = ?neighbor.cost(),
                    stagnation = self.stagnation,
                    "non-improving neighbor accepted"
                );
                self.current = Some(neighbor);
            }
            StepOutcome::Rejected => {
                self.stagnation += 1;
                debug!(stagnation = self.stagnation, "neighbor rejected");
            }
        }

        if let (Some(observer), Some(current)) = (&mut self.observer, &self.current) {
            observer.on_step(outcome, current, self.stagnation);
        }
        Ok(outcome)
    }

    /// The solution the search currently sits on, or `None` before
    /// initialization.
    pub fn current_solution(&self) -> Option<&P::Solution> {
        self.current.as_ref()
    }

    /// Consecutive steps since the current solution last improved.
    pub fn stagnation(&self) -> usize {
        self.stagnation
    }

    /// The seed this solver was built with, if one is known.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl<P: LsProblem, A, R> std::fmt::Debug for LocalSearch<P, A, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocalSearch")
            .field("current_cost", &self.current.as_ref().map(|s| s.cost()))
            .field("stagnation", &self.stagnation)
            .field("seed", &self.seed)
            .finish_non_exhaustive()
    }
}
