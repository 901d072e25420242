//! Local Search (LS).
//!
//! A single-solution trajectory method: keep one current solution, draw a
//! random neighbor each step and decide whether it replaces the current
//! one. With [`StrictImprovement`] acceptance this is stochastic hill
//! climbing; with [`Metropolis`] acceptance it behaves like simulated
//! annealing. A stagnation counter tracks how long the current solution
//! has gone without improving, which drivers use as a restart or stop
//! signal.
//!
//! # References
//!
//! - Hoos & Stützle (2004), "Stochastic Local Search: Foundations and
//!   Applications"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod acceptance;
mod config;
mod runner;
mod solver;
mod types;

pub use acceptance::{Acceptance, Metropolis, StrictImprovement};
pub use config::RunConfig;
pub use runner::{LsRunner, RunResult, StopReason};
pub use solver::LocalSearch;
pub use types::{Cost, LsProblem, SearchObserver, Solution, StepOutcome};

pub(crate) use solver::wall_clock_seed;
