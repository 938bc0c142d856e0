//! Genetic route planning.
//!
//! A small trait-based GA engine plus the tourist-route problem built on it.
//! The engine knows nothing about routes: a problem implements
//! [`GaProblem`] to say how individuals are created, scored, recombined
//! and mutated, and [`GaRunner`] drives the evolutionary loop.
//!
//! # Core Traits
//!
//! - [`Individual`]: A candidate solution with associated fitness type
//! - [`GaProblem`]: Problem definition: initialization, evaluation, operators
//!
//! # Key Types
//!
//! - [`GaConfig`]: Algorithm parameters (population size, rates, presets)
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Final optimization result with per-generation history
//! - [`TourProblem`]: Route planning as a [`GaProblem`]
//! - [`GeneticPlanner`]: Instance in, [`PlanResult`](crate::plan::PlanResult) out
//!
//! # Submodules
//!
//! - [`operators`]: PMX crossover and swap mutation on permutations
//! - [`seeding`]: Construction heuristics for the initial population
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"

mod config;
pub mod operators;
mod planner;
mod runner;
pub mod seeding;
mod selection;
mod tour;
mod types;

pub use config::GaConfig;
pub use planner::GeneticPlanner;
pub use runner::{GaResult, GaRunner, GenerationStats, Termination};
pub use selection::tournament;
pub use tour::{Tour, TourProblem};
pub use types::{Fitness, GaProblem, Individual};
