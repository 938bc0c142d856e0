//! Genetic route planner.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::config::GaConfig;
use super::runner::GaRunner;
use super::tour::TourProblem;
use crate::error::Result;
use crate::eval::{PenaltyModel, RouteEvaluator};
use crate::instance::Instance;
use crate::plan::{Convergence, PlanResult, StrategyKind};
use tracing::instrument;

/// Plans a route with the genetic algorithm.
///
/// Owns its copy of the instance and its configuration; the random
/// generator is seeded from [`GaConfig::seed`] at the start of every run,
/// so repeated runs with the same seed return identical plans.
///
/// # Examples
///
/// ```
/// use u_tourplan::ga::{GaConfig, GeneticPlanner};
/// use u_tourplan::geometry::Point;
/// use u_tourplan::instance::{Attraction, Instance};
///
/// let instance = Instance::new(
///     Point::ORIGIN,
///     vec![
///         Attraction::new(1, (0.4, 0.1), -60, 480, 45, 10_000),
///         Attraction::new(2, (-0.3, 0.5), 0, 540, 60, 20_000),
///         Attraction::new(3, (0.2, -0.6), -120, 600, 30, 0),
///     ],
///     50_000,
/// )
/// .unwrap();
///
/// let config = GaConfig::default().with_population_size(20);
/// let planner = GeneticPlanner::new(instance, config).unwrap();
/// let plan = planner.run().unwrap();
/// assert_eq!(plan.stops().len(), 3);
/// assert!(plan.is_feasible());
/// ```
#[derive(Debug, Clone)]
pub struct GeneticPlanner {
    instance: Instance,
    config: GaConfig,
    model: PenaltyModel,
}

impl GeneticPlanner {
    /// Fails if `config` is invalid.
    pub fn new(instance: Instance, config: GaConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            instance,
            config,
            model: PenaltyModel::default(),
        })
    }

    /// Replaces the default penalty model.
    pub fn with_penalty_model(mut self, model: PenaltyModel) -> Result<Self> {
        model.validate()?;
        self.model = model;
        Ok(self)
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    pub fn config(&self) -> &GaConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PlanResult> {
        self.run_with_cancel(None)
    }

    /// Runs with a cancellation flag checked between generations.
    #[instrument(level = "info", skip_all, fields(attractions = self.instance.len()))]
    pub fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Result<PlanResult> {
        let evaluator = RouteEvaluator::with_model(&self.instance, self.model);
        let problem = TourProblem::new(evaluator);

        let result = GaRunner::run_with_cancel(&problem, &self.config, cancel)?;

        Ok(PlanResult {
            strategy: StrategyKind::Genetic,
            route: Some(self.instance.ids_of(&result.best.genes)),
            evaluation: evaluator.evaluate_positions(&result.best.genes),
            elapsed: result.elapsed,
            convergence: Some(Convergence {
                history: result.history,
                convergence_generation: result.convergence_generation,
                termination: result.termination,
            }),
        })
    }
}
