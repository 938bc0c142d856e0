//! Evaluation output types.

use crate::instance::AttractionId;

/// Constraint breaches found on a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Violations {
    /// Number of stops reached after closing time.
    pub time: u32,
    /// Amount spent over budget, `0` when within budget.
    pub budget: u64,
}

impl Violations {
    pub fn is_empty(&self) -> bool {
        self.time == 0 && self.budget == 0
    }
}

/// One visit on the timeline. Times are minutes from the day start.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stop {
    pub id: AttractionId,
    /// Clock on arrival, before any waiting.
    pub arrival: f64,
    /// Start of the visit, after waiting for opening or a late delay.
    pub start: f64,
    pub departure: f64,
    /// Reached after closing time.
    pub late: bool,
}

/// Score and metrics of one route.
///
/// Lower `fitness` is better. Infeasible routes are not rejected; they
/// carry additive penalties instead, so any two results stay comparable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvaluationResult {
    pub fitness: f64,
    pub total_distance: f64,
    pub total_cost: u64,
    /// Minutes from leaving the hotel until returning to it.
    pub total_time: f64,
    pub feasible: bool,
    pub violations: Violations,
    pub timeline: Vec<Stop>,
}

impl EvaluationResult {
    /// Result for a planner that could not build any route.
    ///
    /// Distinct from an evaluated empty route, which is feasible with
    /// fitness `0`.
    pub fn unroutable() -> Self {
        Self {
            fitness: f64::INFINITY,
            total_distance: 0.0,
            total_cost: 0,
            total_time: 0.0,
            feasible: false,
            violations: Violations::default(),
            timeline: Vec::new(),
        }
    }

    /// Whether this result came from [`unroutable`](Self::unroutable).
    pub fn is_unroutable(&self) -> bool {
        self.fitness.is_infinite()
    }

    /// Attraction ids in visiting order.
    pub fn route(&self) -> Vec<AttractionId> {
        self.timeline.iter().map(|s| s.id).collect()
    }

    /// Total minutes spent waiting for attractions to open.
    pub fn waiting_time(&self) -> f64 {
        self.timeline
            .iter()
            .filter(|s| !s.late)
            .map(|s| s.start - s.arrival)
            .sum()
    }
}
