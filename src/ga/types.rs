//! Core trait definitions for the GA engine.
//!
//! The two central traits, [`Individual`] and [`GaProblem`], define the
//! contract between the evolutionary loop and the route-planning problem
//! plugged into it.

use crate::error::Result;
use rand::Rng;

/// Marker trait for fitness values.
///
/// Lower fitness is considered better (minimization).
pub trait Fitness: PartialOrd + Copy + std::fmt::Debug + 'static {
    /// Returns a value representing the worst possible fitness.
    ///
    /// Used for individuals that have not been evaluated yet.
    fn worst() -> Self;

    /// Converts the fitness to `f64` for history and logging.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn worst() -> Self {
        f64::INFINITY
    }

    fn to_f64(self) -> f64 {
        self
    }
}

/// A candidate solution in the GA population.
///
/// Individuals carry their own fitness value. The runner calls
/// [`GaProblem::evaluate`] and stores the result via
/// [`set_fitness`](Individual::set_fitness).
pub trait Individual: Clone {
    type Fitness: Fitness;

    fn fitness(&self) -> Self::Fitness;

    fn set_fitness(&mut self, fitness: Self::Fitness);
}

/// Defines a GA optimization problem.
///
/// 1. **Initialization**: how to seed the population
/// 2. **Evaluation**: how to compute fitness
/// 3. **Crossover**: how to recombine two parents
/// 4. **Mutation**: how to perturb an individual
/// 5. **Verification**: which structural invariant every child must keep
pub trait GaProblem {
    type Individual: Individual;

    /// Creates a random individual.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Builds the initial population.
    ///
    /// The default fills it with [`create_individual`](Self::create_individual).
    /// Problems with useful construction heuristics override this to mix
    /// heuristic and random individuals. The runner tops up or truncates
    /// the result to exactly `size`.
    fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Self::Individual> {
        (0..size).map(|_| self.create_individual(rng)).collect()
    }

    /// Evaluates an individual. Lower is better.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces one or two offspring by recombining two parents.
    ///
    /// The default clones both parents (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone(), parent2.clone()]
    }

    /// Mutates an individual in place. The default is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Checks the structural invariant of an individual.
    ///
    /// Called on every individual the runner creates. An error aborts the
    /// run: a malformed individual is an operator bug, not a bad solution.
    fn verify(&self, _individual: &Self::Individual) -> Result<()> {
        Ok(())
    }
}
