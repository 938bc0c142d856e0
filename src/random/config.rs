//! Random-search configuration.

use crate::error::{Error, Result};

/// Configuration for [`RandomSearchPlanner`](super::RandomSearchPlanner).
///
/// ```
/// use u_tourplan::random::RandomSearchConfig;
///
/// let config = RandomSearchConfig::default().with_iterations(500);
/// assert_eq!(config.iterations, 500);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RandomSearchConfig {
    /// Number of random routes drawn and evaluated.
    pub iterations: usize,

    /// Random seed; `None` draws a fresh one per run.
    pub seed: Option<u64>,
}

impl Default for RandomSearchConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            seed: Some(42),
        }
    }
}

impl RandomSearchConfig {
    pub fn with_iterations(mut self, n: usize) -> Self {
        self.iterations = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_random_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    /// Preset for side-by-side comparison runs: 2000 iterations.
    pub fn comparison() -> Self {
        Self {
            iterations: 2000,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfig("iterations must be at least 1".into()));
        }
        Ok(())
    }
}
