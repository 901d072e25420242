//! Acceptance strategies.
//!
//! The search loop separates "produce a neighbor" from "decide acceptance" so
//! that the acceptance rule is a single localized change. [`StrictImprovement`]
//! yields pure hill climbing; [`Metropolis`] yields annealing-style search.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast
//!   Computing Machines"

use super::types::{Cost, Solution};
use rand::Rng;
use std::cmp::Ordering;

/// Decides whether a candidate neighbor replaces the current solution.
///
/// The loop evaluates the candidate-vs-current comparison exactly once per
/// step and hands the outcome in, so strategies never re-compare. `accept`
/// is called exactly once per step; stateful strategies (temperature
/// schedules, move memories) may advance their state per call.
pub trait Acceptance<S: Solution> {
    /// Returns `true` if `candidate` should replace `current`.
    ///
    /// `comparison` is `candidate.compare(current)`: `Ordering::Less` means
    /// the candidate is strictly better.
    fn accept<R: Rng>(
        &mut self,
        comparison: Ordering,
        candidate: &S,
        current: &S,
        rng: &mut R,
    ) -> bool;
}

/// Accepts only strictly improving candidates — pure hill climbing.
///
/// Equal-cost candidates are rejected in both directions: sideways moves
/// would turn the search into a random walk on plateaus and break the
/// meaning of the stagnation counter. This strategy is stateless and
/// deterministic given the comparison outcome; it can get stuck in local
/// optima, which restarts or [`Metropolis`] address.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StrictImprovement;

impl StrictImprovement {
    /// Creates a new strict-improvement acceptance.
    pub fn new() -> Self {
        Self
    }
}

impl<S: Solution> Acceptance<S> for StrictImprovement {
    fn accept<R: Rng>(
        &mut self,
        comparison: Ordering,
        _candidate: &S,
        _current: &S,
        _rng: &mut R,
    ) -> bool {
        comparison == Ordering::Less
    }
}

/// Metropolis acceptance with geometric cooling.
///
/// Improving candidates are always accepted. A non-improving candidate is
/// accepted with probability `exp(-delta / T)`, where `delta` is the cost
/// difference (via [`Cost::to_f64`]) and `T` the current temperature. After
/// every decision the temperature is multiplied by `alpha` and floored at
/// the minimum temperature, so cooling advances once per step; an `alpha`
/// close to 1 (e.g. 0.999) corresponds to the slow cooling usually run with
/// plateaus of iterations per temperature level.
///
/// Note that accepted non-improving moves still count as stagnation for the
/// search loop: the counter tracks improvement of the current solution, not
/// movement.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Metropolis {
    temperature: f64,
    alpha: f64,
    min_temperature: f64,
}

impl Metropolis {
    /// Creates a Metropolis acceptance starting at `initial_temperature`,
    /// cooling by `alpha` per step, with the default floor of `1e-6`.
    ///
    /// # Panics
    /// Panics if `initial_temperature` is not positive or `alpha` is not in
    /// `(0, 1)`.
    pub fn new(initial_temperature: f64, alpha: f64) -> Self {
        assert!(
            initial_temperature > 0.0,
            "initial temperature must be positive, got {initial_temperature}"
        );
        assert!(
            alpha > 0.0 && alpha < 1.0,
            "alpha must be in (0, 1), got {alpha}"
        );
        Self {
            temperature: initial_temperature,
            alpha,
            min_temperature: 1e-6,
        }
    }

    /// Sets the temperature floor.
    ///
    /// # Panics
    /// Panics if `min_temperature` is not positive.
    pub fn with_min_temperature(mut self, min_temperature: f64) -> Self {
        assert!(
            min_temperature > 0.0,
            "min temperature must be positive, got {min_temperature}"
        );
        self.min_temperature = min_temperature;
        self
    }

    /// The current temperature.
    pub fn temperature(&self) -> f64 {
        self.temperature
    }
}

impl<S: Solution> Acceptance<S> for Metropolis {
    fn accept<R: Rng>(
        &mut self,
        comparison: Ordering,
        candidate: &S,
        current: &S,
        rng: &mut R,
    ) -> bool {
        let accept = match comparison {
            Ordering::Less => true,
            _ => {
                let delta = candidate.cost().to_f64() - current.cost().to_f64();
                let probability = (-delta / self.temperature).exp();
                rng.random_range(0.0..1.0) < probability
            }
        };
        self.temperature = (self.temperature * self.alpha).max(self.min_temperature);
        accept
    }
}
