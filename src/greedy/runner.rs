//! Greedy construction loop.

use std::time::Instant;

use crate::error::Result;
use crate::eval::{EvaluationResult, PenaltyModel, RouteEvaluator};
use crate::geometry::{euclidean, Point};
use crate::instance::Instance;
use crate::plan::{PlanResult, StrategyKind};
use tracing::{info, instrument};

/// Builds the greedy route as table positions.
///
/// From the current point, picks the nearest unvisited attraction whose
/// cost keeps the running total within budget. Ties go to the attraction
/// earlier in the table. Stops when nothing affordable remains.
pub fn greedy_route(instance: &Instance) -> Vec<usize> {
    let attractions = instance.attractions();
    let budget = instance.budget();

    let mut visited = vec![false; attractions.len()];
    let mut route = Vec::new();
    let mut here: Point = instance.hotel();
    let mut spent = 0u64;

    loop {
        let mut nearest: Option<(usize, f64)> = None;
        for (pos, a) in attractions.iter().enumerate() {
            if visited[pos] {
                continue;
            }
            let affordable = spent.checked_add(a.cost).is_some_and(|total| total <= budget);
            if !affordable {
                continue;
            }
            let d = euclidean(here, a.location);
            match nearest {
                Some((_, best)) if d >= best => {}
                _ => nearest = Some((pos, d)),
            }
        }

        let Some((pos, _)) = nearest else {
            break;
        };
        visited[pos] = true;
        route.push(pos);
        here = attractions[pos].location;
        spent += attractions[pos].cost;
    }

    route
}

/// Deterministic greedy planner.
///
/// Takes no tuning parameters and uses no randomness.
#[derive(Debug, Clone)]
pub struct GreedyPlanner {
    instance: Instance,
    model: PenaltyModel,
}

impl GreedyPlanner {
    pub fn new(instance: Instance) -> Self {
        Self {
            instance,
            model: PenaltyModel::default(),
        }
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

    /// Builds and scores the greedy route.
    ///
    /// When the instance has attractions but none is affordable, the
    /// result carries `route: None` and an unroutable evaluation.
    #[instrument(level = "info", skip_all, fields(attractions = self.instance.len()))]
    pub fn run(&self) -> PlanResult {
        let started = Instant::now();
        let positions = greedy_route(&self.instance);

        let (route, evaluation) = if positions.is_empty() && !self.instance.is_empty() {
            (None, EvaluationResult::unroutable())
        } else {
            let evaluator = RouteEvaluator::with_model(&self.instance, self.model);
            (
                Some(self.instance.ids_of(&positions)),
                evaluator.evaluate_positions(&positions),
            )
        };

        let elapsed = started.elapsed();
        info!(
            visited = positions.len(),
            fitness = evaluation.fitness,
            feasible = evaluation.feasible,
            "greedy route built"
        );

        PlanResult {
            strategy: StrategyKind::Greedy,
            route,
            evaluation,
            elapsed,
            convergence: None,
        }
    }
}
