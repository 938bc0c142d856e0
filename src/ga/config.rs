//! GA configuration.
//!
//! [`GaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::{Error, Result};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_tourplan::ga::GaConfig;
///
/// let config = GaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 150);
/// assert_eq!(config.stagnation_limit, 30);
/// assert_eq!(config.seed, Some(42));
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tourplan::ga::GaConfig;
///
/// let config = GaConfig::default()
///     .with_population_size(80)
///     .with_max_generations(120)
///     .with_crossover_rate(0.9)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GaConfig {
    /// Number of individuals in the population.
    pub population_size: usize,

    /// Maximum number of generations, counting the initial population.
    pub max_generations: usize,

    /// Number of best individuals copied unchanged into the next generation.
    pub elite_count: usize,

    /// Individuals sampled (without replacement) per tournament.
    pub tournament_size: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, both parents are cloned.
    pub crossover_rate: f64,

    /// Probability of mutating each offspring (0.0–1.0).
    pub mutation_rate: f64,

    /// The run stops once the best fitness has not improved for more than
    /// this many consecutive generations.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a fresh seed, making the run non-reproducible.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the actual runtime may
    /// exceed the limit by one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for GaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 150,
            elite_count: 2,
            tournament_size: 3,
            crossover_rate: 0.85,
            mutation_rate: 0.15,
            stagnation_limit: 30,
            seed: Some(42),
            time_limit_ms: None,
        }
    }
}

impl GaConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_elite_count(mut self, n: usize) -> Self {
        self.elite_count = n;
        self
    }

    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draws a fresh seed on every run.
    pub fn with_random_seed(mut self) -> Self {
        self.seed = None;
        self
    }

    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Preset for single-city experiments: population 80, 120 generations.
    pub fn experiment() -> Self {
        Self {
            population_size: 80,
            max_generations: 120,
            ..Self::default()
        }
    }

    /// Preset for side-by-side comparison runs: population 60,
    /// 100 generations.
    pub fn comparison() -> Self {
        Self {
            population_size: 60,
            max_generations: 100,
            ..Self::default()
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(Error::InvalidConfig(msg.into()));

        if self.population_size < 2 {
            return invalid("population_size must be at least 2");
        }
        if self.max_generations == 0 {
            return invalid("max_generations must be at least 1");
        }
        if self.elite_count >= self.population_size {
            return invalid("elite_count too high: elites fill entire population");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.tournament_size > self.population_size {
            return invalid("tournament_size cannot exceed population_size");
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return invalid("crossover_rate must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return invalid("mutation_rate must be within [0, 1]");
        }
        if self.time_limit_ms == Some(0) {
            return invalid("time_limit_ms must be positive or None");
        }
        Ok(())
    }
}
