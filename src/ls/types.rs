//! Core trait definitions for the local-search framework.
//!
//! The two central traits — [`Solution`] and [`LsProblem`] — define the
//! contract between the generic search loop and domain-specific problem
//! implementations.

use rand::Rng;
use std::cmp::Ordering;

/// Marker trait for cost values.
///
/// Costs must support comparison and be cheaply copyable.
/// Lower cost is considered better (minimization).
///
/// Built-in implementations exist for `f64`, `f32`, `i64` and `u64`.
/// For maximization problems, negate the cost or use a wrapper type.
pub trait Cost: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the cost to `f64` for logging and statistics.
    fn to_f64(self) -> f64;
}

impl Cost for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Cost for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Cost for i64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Cost for u64 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// A candidate solution in the search space.
///
/// Solutions carry their own cost. The search loop never mutates a solution
/// in place: the current solution is replaced wholesale when a step accepts a
/// neighbor, so a solution handed out by the solver can be treated as an
/// immutable value.
///
/// # Ordering
///
/// Acceptance is driven by [`compare`](Solution::compare), a strict ordering
/// between two candidates where `Ordering::Less` means "better". The default
/// implementation orders by [`cost`](Solution::cost) and maps incomparable
/// costs (e.g. NaN) to `Ordering::Equal`. [`is_better_than`](Solution::is_better_than)
/// is derived from `compare`, which makes it irreflexive as long as
/// `compare(x, x)` returns `Ordering::Equal` — the stagnation counter relies
/// on that.
///
/// `cost()` is called on the hot path and should be cheap; typically the
/// value is computed when the solution is constructed and stored.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct Tour {
///     order: Vec<usize>,
///     length: f64,
/// }
///
/// impl Solution for Tour {
///     type Cost = f64;
///     fn cost(&self) -> f64 { self.length }
/// }
/// ```
pub trait Solution: Clone {
    /// The cost type. Must implement [`Cost`].
    type Cost: Cost;

    /// Returns the cost of this solution. Lower is better.
    fn cost(&self) -> Self::Cost;

    /// Strict ordering between two candidates; `Ordering::Less` means
    /// `self` is better than `other`.
    ///
    /// Override to delegate the comparison to something other than the raw
    /// cost (lexicographic multi-level scores, tolerances, ...). The
    /// contract is that of a strict order: `compare(x, x)` must be
    /// `Ordering::Equal`.
    fn compare(&self, other: &Self) -> Ordering {
        self.cost()
            .partial_cmp(&other.cost())
            .unwrap_or(Ordering::Equal)
    }

    /// Whether `self` is strictly better than `other`.
    ///
    /// This is the sole acceptance criterion of pure hill climbing. Derived
    /// from [`compare`](Solution::compare); do not override.
    fn is_better_than(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Less
    }
}

/// Defines a local-search problem.
///
/// The user implements initial-solution and neighbor construction. The
/// framework handles seeding, acceptance, stagnation accounting and
/// termination.
///
/// Both hooks are fallible; a hook failure is surfaced to the caller
/// unchanged, before any solver state is touched. The framework performs no
/// recovery or retry and does not interpret the error. Problems that cannot
/// fail use `std::convert::Infallible`.
///
/// # Examples
///
/// ```ignore
/// struct TspProblem { distances: Vec<Vec<f64>> }
///
/// impl LsProblem for TspProblem {
///     type Solution = Tour;
///     type Error = std::convert::Infallible;
///
///     fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Tour, Self::Error> {
///         let mut order: Vec<usize> = (0..self.distances.len()).collect();
///         // shuffle with `rng`, then price the tour
///         Ok(self.evaluate(order))
///     }
///
///     fn neighbor<R: Rng>(&self, tour: &Tour, rng: &mut R) -> Result<Tour, Self::Error> {
///         let mut order = tour.order.clone();
///         let i = rng.random_range(0..order.len());
///         let j = rng.random_range(0..order.len());
///         order.swap(i, j);
///         Ok(self.evaluate(order))
///     }
/// }
/// ```
pub trait LsProblem: Send + Sync {
    /// The solution representation type.
    type Solution: Solution + Send;

    /// Error type surfaced unchanged by the framework when a hook fails.
    type Error;

    /// Creates a valid, fully formed starting solution.
    ///
    /// Called exactly once per `initialize()`. Must not depend on prior
    /// solver state.
    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution, Self::Error>;

    /// Generates a neighbor of the current solution.
    ///
    /// Called exactly once per `step()`. The neighbor should be reachable
    /// from `current` by one local move; the neighborhood must be connected
    /// for the search to be able to reach an optimum. By convention the hook
    /// draws randomness only from the passed-in `rng` so that runs are
    /// reproducible from the seed alone.
    fn neighbor<R: Rng>(
        &self,
        current: &Self::Solution,
        rng: &mut R,
    ) -> Result<Self::Solution, Self::Error>;
}

impl<P: LsProblem> LsProblem for &P {
    type Solution = P::Solution;
    type Error = P::Error;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Self::Solution, Self::Error> {
        (**self).initial_solution(rng)
    }

    fn neighbor<R: Rng>(
        &self,
        current: &Self::Solution,
        rng: &mut R,
    ) -> Result<Self::Solution, Self::Error> {
        (**self).neighbor(current, rng)
    }
}

/// What a single `step()` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The neighbor was strictly better and replaced the current solution.
    /// The stagnation counter was reset to 0.
    Improved,
    /// The neighbor was not strictly better but the acceptance strategy
    /// replaced the current solution anyway (annealing-style move). The
    /// stagnation counter was incremented.
    Accepted,
    /// The neighbor was rejected; the current solution is unchanged and the
    /// stagnation counter was incremented.
    Rejected,
}

impl StepOutcome {
    /// Whether the step replaced the current solution.
    pub fn replaced_current(self) -> bool {
        matches!(self, StepOutcome::Improved | StepOutcome::Accepted)
    }
}

/// Observer for step-by-step diagnostics.
///
/// All methods default to no-ops, so implementations only override what they
/// report on. The observer is an observability side effect, not a
/// correctness concern: the search behaves identically with or without one,
/// and the core stays testable without any logging subsystem.
pub trait SearchObserver<S: Solution> {
    /// Called once per `initialize()` with the freshly built solution.
    fn on_initialized(&mut self, _initial: &S) {}

    /// Called after every `step()` with the outcome, the solution the search
    /// now stands on, and the current stagnation count.
    fn on_step(&mut self, _outcome: StepOutcome, _current: &S, _stagnation: usize) {}
}
