//! Random restarts.
//!
//! Hill climbing commits to the basin of attraction it starts in. Running
//! the search several times from independent initial solutions and keeping
//! the best result is the standard cure, and the runs are embarrassingly
//! parallel. Seeds are derived per run from a base seed, so a sweep stays
//! reproducible whether it executes sequentially or in parallel.

mod config;
mod runner;

pub use config::RestartConfig;
pub use runner::{RestartResult, RestartRunner};
