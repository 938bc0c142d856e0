//! Random-search loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use super::config::RandomSearchConfig;
use crate::error::Result;
use crate::eval::{PenaltyModel, RouteEvaluator};
use crate::instance::Instance;
use crate::plan::{PlanResult, StrategyKind};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{debug, info, instrument};

/// Samples random visiting orders and keeps the best.
///
/// # Examples
///
/// ```
/// use u_tourplan::geometry::Point;
/// use u_tourplan::instance::{Attraction, Instance};
/// use u_tourplan::random::{RandomSearchConfig, RandomSearchPlanner};
///
/// let instance = Instance::new(
///     Point::ORIGIN,
///     vec![
///         Attraction::new(1, (1.0, 0.0), 0, 600, 30, 100),
///         Attraction::new(2, (0.0, 1.0), 0, 600, 30, 100),
///     ],
///     1_000,
/// )
/// .unwrap();
///
/// let config = RandomSearchConfig::default().with_iterations(50);
/// let plan = RandomSearchPlanner::new(instance, config).unwrap().run().unwrap();
/// assert_eq!(plan.stops().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct RandomSearchPlanner {
    instance: Instance,
    config: RandomSearchConfig,
    model: PenaltyModel,
}

impl RandomSearchPlanner {
    /// Fails if `config` is invalid.
    pub fn new(instance: Instance, config: RandomSearchConfig) -> Result<Self> {
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

    pub fn config(&self) -> &RandomSearchConfig {
        &self.config
    }

    pub fn run(&self) -> Result<PlanResult> {
        self.run_with_cancel(None)
    }

    /// Runs with a cancellation flag checked between draws.
    ///
    /// At least one route is always drawn, so a cancelled run still
    /// returns a scored permutation.
    #[instrument(
        level = "info",
        skip_all,
        fields(attractions = self.instance.len(), iterations = self.config.iterations)
    )]
    pub fn run_with_cancel(&self, cancel: Option<Arc<AtomicBool>>) -> Result<PlanResult> {
        self.config.validate()?;

        let started = Instant::now();
        let evaluator = RouteEvaluator::with_model(&self.instance, self.model);
        let mut rng = StdRng::seed_from_u64(self.config.seed.unwrap_or_else(rand::random));

        let mut candidate: Vec<usize> = (0..self.instance.len()).collect();
        candidate.shuffle(&mut rng);
        let mut best = candidate.clone();
        let mut best_fitness = evaluator.fitness(&best);
        let mut drawn = 1usize;

        for iteration in 1..self.config.iterations {
            if cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                break;
            }

            candidate.shuffle(&mut rng);
            drawn += 1;
            let fitness = evaluator.fitness(&candidate);
            if fitness < best_fitness {
                debug!(iteration, fitness, "random search improved");
                best_fitness = fitness;
                best.clone_from(&candidate);
            }
        }

        self.instance.check_permutation(&best)?;
        let evaluation = evaluator.evaluate_positions(&best);
        let elapsed = started.elapsed();
        info!(
            drawn,
            best_fitness,
            feasible = evaluation.feasible,
            elapsed_ms = elapsed.as_millis() as u64,
            "random search finished"
        );

        Ok(PlanResult {
            strategy: StrategyKind::RandomSearch,
            route: Some(self.instance.ids_of(&best)),
            evaluation,
            elapsed,
            convergence: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::eval::evaluate;
    use crate::geometry::Point;
    use crate::instance::Attraction;

    fn scattered(n: u32, budget: i64) -> Instance {
        let attractions = (1..=n)
            .map(|id| {
                let f = f64::from(id);
                Attraction::new(id, ((f * 2.1).sin(), (f * 1.3).cos()), -30, 420, 40, 250)
            })
            .collect();
        Instance::new(Point::ORIGIN, attractions, budget).unwrap()
    }

    #[test]
    fn test_rejects_zero_iterations() {
        let config = RandomSearchConfig::default().with_iterations(0);
        let err = RandomSearchPlanner::new(scattered(3, 0), config).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_result_is_full_permutation() {
        let planner =
            RandomSearchPlanner::new(scattered(8, 10_000), RandomSearchConfig::default()).unwrap();
        let plan = planner.run().unwrap();
        let mut ids = plan.stops().to_vec();
        ids.sort_unstable();
        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
        assert_eq!(plan.strategy, StrategyKind::RandomSearch);
    }

    #[test]
    fn test_same_seed_same_route() {
        let config = RandomSearchConfig::default().with_iterations(200).with_seed(5);
        let a = RandomSearchPlanner::new(scattered(7, 10_000), config.clone())
            .unwrap()
            .run()
            .unwrap();
        let b = RandomSearchPlanner::new(scattered(7, 10_000), config)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(a.route, b.route);
        assert_eq!(a.fitness(), b.fitness());
    }

    #[test]
    fn test_more_iterations_never_worse() {
        // Same seed: the longer run sees every draw of the shorter one.
        let inst = scattered(9, 10_000);
        let short = RandomSearchConfig::default().with_iterations(10).with_seed(3);
        let long = short.clone().with_iterations(500);
        let a = RandomSearchPlanner::new(inst.clone(), short).unwrap().run().unwrap();
        let b = RandomSearchPlanner::new(inst, long).unwrap().run().unwrap();
        assert!(b.fitness() <= a.fitness());
    }

    #[test]
    fn test_evaluation_matches_evaluator() {
        let inst = scattered(6, 500);
        let config = RandomSearchConfig::default().with_iterations(50);
        let plan = RandomSearchPlanner::new(inst.clone(), config)
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(plan.evaluation, evaluate(&inst, plan.stops()).unwrap());
    }

    #[test]
    fn test_cancelled_still_returns_route() {
        let planner =
            RandomSearchPlanner::new(scattered(5, 10_000), RandomSearchConfig::default()).unwrap();
        let plan = planner
            .run_with_cancel(Some(Arc::new(AtomicBool::new(true))))
            .unwrap();
        assert_eq!(plan.stops().len(), 5);
    }

    #[test]
    fn test_empty_instance() {
        let inst = Instance::new(Point::ORIGIN, Vec::new(), 0).unwrap();
        let plan = RandomSearchPlanner::new(inst, RandomSearchConfig::default().with_iterations(10))
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(plan.route, Some(Vec::new()));
        assert_eq!(plan.fitness(), 0.0);
        assert!(plan.is_feasible());
    }
}
