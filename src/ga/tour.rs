//! Route planning as a [`GaProblem`].
//!
//! A [`Tour`] is a permutation of the instance's table positions. The
//! problem seeds a mixed population, recombines with PMX, mutates with
//! swaps, and scores with the shared [`RouteEvaluator`].

use super::operators::{pmx_crossover, swap_mutation};
use super::seeding::{cheapest_first_route, nearest_neighbor_route, random_route};
use super::types::{GaProblem, Individual};
use crate::error::Result;
use crate::eval::RouteEvaluator;
use rand::Rng;

/// A full visiting order over every attraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    /// Table positions in visiting order.
    pub genes: Vec<usize>,
    pub fitness: f64,
}

impl Tour {
    pub fn new(genes: Vec<usize>) -> Self {
        Self {
            genes,
            fitness: f64::INFINITY,
        }
    }
}

impl Individual for Tour {
    type Fitness = f64;

    fn fitness(&self) -> f64 {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = fitness;
    }
}

/// The tourist route problem for the GA runner.
#[derive(Debug, Clone, Copy)]
pub struct TourProblem<'a> {
    evaluator: RouteEvaluator<'a>,
}

impl<'a> TourProblem<'a> {
    pub fn new(evaluator: RouteEvaluator<'a>) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &RouteEvaluator<'a> {
        &self.evaluator
    }
}

impl GaProblem for TourProblem<'_> {
    type Individual = Tour;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> Tour {
        Tour::new(random_route(self.evaluator.instance().len(), rng))
    }

    /// Half random tours, a quarter randomized nearest-neighbor tours, a
    /// quarter randomized cheapest-first tours. Any remainder from the
    /// integer split is filled with random tours.
    fn initial_population<R: Rng>(&self, size: usize, rng: &mut R) -> Vec<Tour> {
        let instance = self.evaluator.instance();
        let quarter = size / 4;

        let mut population = Vec::with_capacity(size);
        for _ in 0..size / 2 {
            population.push(self.create_individual(rng));
        }
        for _ in 0..quarter {
            population.push(Tour::new(nearest_neighbor_route(instance, rng)));
        }
        for _ in 0..quarter {
            population.push(Tour::new(cheapest_first_route(instance, rng)));
        }
        while population.len() < size {
            population.push(self.create_individual(rng));
        }
        population
    }

    fn evaluate(&self, tour: &Tour) -> f64 {
        self.evaluator.fitness(&tour.genes)
    }

    /// Two PMX children, one per parent order, each with its own cuts.
    fn crossover<R: Rng>(&self, p1: &Tour, p2: &Tour, rng: &mut R) -> Vec<Tour> {
        vec![
            Tour::new(pmx_crossover(&p1.genes, &p2.genes, rng)),
            Tour::new(pmx_crossover(&p2.genes, &p1.genes, rng)),
        ]
    }

    fn mutate<R: Rng>(&self, tour: &mut Tour, rng: &mut R) {
        swap_mutation(&mut tour.genes, rng);
    }

    fn verify(&self, tour: &Tour) -> Result<()> {
        self.evaluator.instance().check_permutation(&tour.genes)
    }
}
