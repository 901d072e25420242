//! Restart configuration.

use crate::ls::RunConfig;

/// Configuration for [`RestartRunner`](super::RestartRunner).
///
/// # Examples
///
/// ```
/// use u_localsearch::ls::RunConfig;
/// use u_localsearch::restart::RestartConfig;
///
/// let config = RestartConfig::default()
///     .with_restarts(8)
///     .with_run(RunConfig::default().with_stagnation_limit(2_000).with_seed(42));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestartConfig {
    /// Number of independent runs.
    pub restarts: usize,

    /// Configuration applied to every run. Its seed acts as the base seed;
    /// run `i` uses `base + i` so restarts explore different trajectories
    /// while the sweep stays reproducible.
    pub run: RunConfig,

    /// Whether to execute the runs in parallel using rayon.
    /// Takes effect only with the `parallel` feature; ignored otherwise.
    pub parallel: bool,
}

impl Default for RestartConfig {
    fn default() -> Self {
        Self {
            restarts: 10,
            run: RunConfig::default(),
            parallel: true,
        }
    }
}

impl RestartConfig {
    pub fn with_restarts(mut self, restarts: usize) -> Self {
        self.restarts = restarts;
        self
    }

    pub fn with_run(mut self, run: RunConfig) -> Self {
        self.run = run;
        self
    }

    /// Enables or disables parallel execution.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration, including the nested run configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.restarts == 0 {
            return Err("restarts must be > 0".to_string());
        }
        self.run.validate()
    }
}
