//! Random multi-restart search.
//!
//! Draws independent uniformly random visiting orders and keeps the best
//! one. It is the statistical floor the genetic and greedy planners are
//! measured against.

mod config;
mod runner;

pub use config::RandomSearchConfig;
pub use runner::RandomSearchPlanner;
