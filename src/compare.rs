//! Side-by-side runs of all three planners.

use crate::error::Result;
use crate::eval::PenaltyModel;
use crate::ga::{GaConfig, GeneticPlanner};
use crate::greedy::GreedyPlanner;
use crate::instance::Instance;
use crate::plan::PlanResult;
use crate::random::{RandomSearchConfig, RandomSearchPlanner};
use tracing::{info, instrument};

/// Parameters for [`compare`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompareConfig {
    pub ga: GaConfig,
    pub random: RandomSearchConfig,
    /// Penalty model shared by all three planners.
    pub model: PenaltyModel,
}

impl Default for CompareConfig {
    /// The comparison presets of both configurable planners.
    fn default() -> Self {
        Self {
            ga: GaConfig::comparison(),
            random: RandomSearchConfig::comparison(),
            model: PenaltyModel::default(),
        }
    }
}

impl CompareConfig {
    pub fn with_ga(mut self, ga: GaConfig) -> Self {
        self.ga = ga;
        self
    }

    pub fn with_random(mut self, random: RandomSearchConfig) -> Self {
        self.random = random;
        self
    }

    pub fn with_penalty_model(mut self, model: PenaltyModel) -> Self {
        self.model = model;
        self
    }

    pub fn validate(&self) -> Result<()> {
        self.ga.validate()?;
        self.random.validate()?;
        self.model.validate()
    }
}

/// Plans from all three strategies on the same instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Comparison {
    pub genetic: PlanResult,
    pub greedy: PlanResult,
    pub random: PlanResult,
}

impl Comparison {
    /// Plans in genetic, greedy, random order.
    pub fn plans(&self) -> [&PlanResult; 3] {
        [&self.genetic, &self.greedy, &self.random]
    }

    /// The plan with the lowest fitness; earlier in [`plans`](Self::plans)
    /// order on ties.
    pub fn winner(&self) -> &PlanResult {
        self.plans()
            .into_iter()
            .reduce(|best, p| if p.fitness() < best.fitness() { p } else { best })
            .unwrap_or(&self.genetic)
    }
}

/// Runs the genetic, greedy and random planners on `instance`.
///
/// Each planner gets its own copy of the instance and its own generator,
/// so the result is the same whether or not the `parallel` feature runs
/// them concurrently.
#[instrument(level = "info", skip_all, fields(attractions = instance.len()))]
pub fn compare(instance: &Instance, config: &CompareConfig) -> Result<Comparison> {
    config.validate()?;

    let genetic = GeneticPlanner::new(instance.clone(), config.ga.clone())?
        .with_penalty_model(config.model)?;
    let greedy = GreedyPlanner::new(instance.clone()).with_penalty_model(config.model)?;
    let random = RandomSearchPlanner::new(instance.clone(), config.random.clone())?
        .with_penalty_model(config.model)?;

    #[cfg(feature = "parallel")]
    let (genetic, (greedy, random)) = rayon::join(
        || genetic.run(),
        || rayon::join(|| greedy.run(), || random.run()),
    );
    #[cfg(not(feature = "parallel"))]
    let (genetic, greedy, random) = (genetic.run(), greedy.run(), random.run());

    let comparison = Comparison {
        genetic: genetic?,
        greedy,
        random: random?,
    };

    let winner = comparison.winner();
    info!(
        winner = %winner.strategy,
        fitness = winner.fitness(),
        "comparison finished"
    );
    Ok(comparison)
}
