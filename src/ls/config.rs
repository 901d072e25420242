//! Runner configuration.

use std::time::Duration;

/// Stop criteria and seeding for [`LsRunner`](super::LsRunner).
///
/// All criteria are checked before every step; the first one that fires ends
/// the run. At least one criterion must be active.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use u_localsearch::ls::RunConfig;
///
/// let config = RunConfig::default()
///     .with_max_steps(50_000)
///     .with_stagnation_limit(5_000)
///     .with_time_limit(Duration::from_secs(10))
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunConfig {
    /// Maximum number of steps; 0 disables the limit.
    pub max_steps: usize,

    /// Stop once this many consecutive steps fail to improve; 0 disables
    /// the criterion.
    pub stagnation_limit: usize,

    /// Wall-clock budget for the run.
    pub time_limit: Option<Duration>,

    /// Seed for the solver RNG; derived from the wall clock when `None`.
    pub seed: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            stagnation_limit: 1_000,
            time_limit: None,
            seed: None,
        }
    }
}

impl RunConfig {
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    pub fn with_stagnation_limit(mut self, stagnation_limit: usize) -> Self {
        self.stagnation_limit = stagnation_limit;
        self
    }

    pub fn with_time_limit(mut self, time_limit: Duration) -> Self {
        self.time_limit = Some(time_limit);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_steps == 0 && self.stagnation_limit == 0 && self.time_limit.is_none() {
            return Err(
                "at least one of max_steps, stagnation_limit or time_limit must be set"
                    .to_string(),
            );
        }
        Ok(())
    }
}
