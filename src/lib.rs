//! Tourist route planning with time windows and a budget.
//!
//! Given a hotel, a table of attractions (location, opening window,
//! visit duration, admission cost) and a spending budget, find a visiting
//! order that minimizes travel distance plus elapsed time, penalizing
//! late arrivals and overspending.
//!
//! Three planners share one objective function:
//!
//! - **Genetic** ([`ga::GeneticPlanner`]): mixed-seeded population, tournament
//!   selection, PMX crossover, swap mutation, elitism and early stopping.
//! - **Greedy** ([`greedy::GreedyPlanner`]): nearest affordable attraction,
//!   repeatedly.
//! - **Random search** ([`random::RandomSearchPlanner`]): best of many
//!   uniformly random orders.
//!
//! [`compare::compare`] runs all three on one instance.
//!
//! # Example
//!
//! ```
//! use u_tourplan::compare::{compare, CompareConfig};
//! use u_tourplan::geometry::{clock_to_offset, Point};
//! use u_tourplan::instance::{Attraction, Instance};
//!
//! let museum = Attraction::new(
//!     1,
//!     (0.5, 0.2),
//!     clock_to_offset("10:00").unwrap(),
//!     clock_to_offset("17:00").unwrap(),
//!     90,
//!     15_000,
//! )
//! .with_name("Museum");
//! let park = Attraction::new(2, (-0.3, 0.4), 0, 600, 60, 0);
//!
//! let instance = Instance::new(Point::ORIGIN, vec![museum, park], 20_000).unwrap();
//! let comparison = compare(&instance, &CompareConfig::default()).unwrap();
//! assert!(comparison.winner().is_feasible());
//! ```
//!
//! Planners emit `tracing` events; install a subscriber to see them.

pub mod compare;
pub mod error;
pub mod eval;
pub mod ga;
pub mod geometry;
pub mod greedy;
pub mod instance;
pub mod plan;
pub mod random;

pub use error::{Error, Result};
pub use instance::{Attraction, AttractionId, Instance};
pub use plan::{PlanResult, StrategyKind};
