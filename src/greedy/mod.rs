//! Greedy nearest-affordable construction.
//!
//! A deterministic baseline: starting at the hotel, repeatedly walk to the
//! closest unvisited attraction that still fits in the remaining budget.
//! Time windows are ignored while building; the finished route is scored
//! by the same evaluator as every other planner.
//!
//! # References
//!
//! - Rosenkrantz, Stearns & Lewis (1977), "An Analysis of Several
//!   Heuristics for the Traveling Salesman Problem"

mod runner;

pub use runner::{greedy_route, GreedyPlanner};
