//! Route evaluation.
//!
//! The evaluator is the single objective function shared by the genetic,
//! greedy and random planners. It is a pure function of the route, the
//! instance and the [`PenaltyModel`].
//!
//! Time windows and the budget are soft constraints: breaking them adds
//! penalties but never rejects the route. Every permutation is therefore
//! a valid search point, and the optimizer is steered toward feasibility
//! by fitness pressure alone.

mod config;
mod evaluator;
mod types;

pub use config::PenaltyModel;
pub use evaluator::{evaluate, RouteEvaluator};
pub use types::{EvaluationResult, Stop, Violations};
