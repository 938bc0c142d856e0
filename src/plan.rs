//! The result record shared by every planner.
//!
//! Genetic, greedy and random-search planners all return a [`PlanResult`]
//! scored by the same evaluator, so reporting code can compare them field
//! by field.

use std::fmt;
use std::time::Duration;

use crate::eval::EvaluationResult;
use crate::ga::{GenerationStats, Termination};
use crate::instance::AttractionId;

/// Which planner produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StrategyKind {
    Genetic,
    Greedy,
    RandomSearch,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StrategyKind::Genetic => "GA",
            StrategyKind::Greedy => "Greedy",
            StrategyKind::RandomSearch => "Random",
        })
    }
}

/// Search trace of a genetic run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Convergence {
    pub history: Vec<GenerationStats>,
    /// Generation at which the returned route was first found.
    pub convergence_generation: usize,
    pub termination: Termination,
}

impl Convergence {
    pub fn generations(&self) -> usize {
        self.history.len()
    }
}

/// Best route found by a planner.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanResult {
    pub strategy: StrategyKind,

    /// Visiting order, or `None` when no route could be built at all.
    ///
    /// `Some(vec![])` is a genuine empty route (an instance without
    /// attractions) and scores `0`.
    pub route: Option<Vec<AttractionId>>,

    /// Evaluation of `route`; [`EvaluationResult::unroutable`] when
    /// `route` is `None`.
    pub evaluation: EvaluationResult,

    /// Wall-clock time spent searching.
    pub elapsed: Duration,

    /// Generation history, for the genetic planner only.
    pub convergence: Option<Convergence>,
}

impl PlanResult {
    pub fn fitness(&self) -> f64 {
        self.evaluation.fitness
    }

    pub fn is_feasible(&self) -> bool {
        self.evaluation.feasible
    }

    /// Route as a slice; empty when no route exists.
    pub fn stops(&self) -> &[AttractionId] {
        self.route.as_deref().unwrap_or(&[])
    }

    pub fn summary(&self) -> PlanSummary {
        PlanSummary::of(self)
    }
}

/// Per-stop efficiency figures of a plan.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlanSummary {
    pub attractions_visited: usize,
    /// Travel distance divided by stops (by 1 for an empty route).
    pub distance_per_stop: f64,
    /// Admission spend divided by stops (by 1 for an empty route).
    pub cost_per_stop: f64,
    pub total_hours: f64,
}

impl PlanSummary {
    fn of(plan: &PlanResult) -> Self {
        let visited = plan.stops().len();
        let per = visited.max(1) as f64;
        let eval = &plan.evaluation;

        Self {
            attractions_visited: visited,
            distance_per_stop: eval.total_distance / per,
            cost_per_stop: eval.total_cost as f64 / per,
            total_hours: eval.total_time / 60.0,
        }
    }
}
