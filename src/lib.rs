//! Domain-agnostic local-search optimization core.
//!
//! Provides the step-wise control skeleton shared by trajectory
//! metaheuristics:
//!
//! - **Local Search (LS)**: A stateful improve-or-stagnate loop over an
//!   abstract solution space. The user implements initial-solution and
//!   neighbor construction; the framework owns the seeded randomizer, the
//!   current solution, and the stagnation counter that external termination
//!   policies consult.
//! - **Acceptance strategies**: The replace-or-retain decision is a pluggable
//!   capability. `StrictImprovement` yields pure hill climbing; `Metropolis`
//!   yields annealing-style search with geometric cooling. Custom strategies
//!   change the acceptance rule without touching the loop skeleton.
//! - **Driver**: A one-shot runner layering the canonical termination
//!   policies (step budget, stagnation limit, wall-clock limit, external
//!   cancellation) on top of the step-wise core.
//! - **Restarts**: Repeated local search from different initial conditions,
//!   the standard cure for local optima, with optional parallel execution.
//!
//! # Architecture
//!
//! This crate contains no domain-specific concepts — scheduling, routing,
//! layout, etc. are all defined by consumers. A problem plugs in through two
//! construction hooks and a cost ordering; everything else (seeding,
//! acceptance, stagnation accounting, termination, restarts) is handled
//! generically.

pub mod ls;
pub mod restart;
