//! Construction heuristics for the initial population.
//!
//! Every function returns a permutation of the instance's table positions.
//! The heuristics inject structure (short hops, cheap attractions first)
//! while their randomized choices keep the seeded individuals distinct.

use crate::geometry::euclidean;
use crate::instance::Instance;
use rand::seq::SliceRandom;
use rand::Rng;

/// How many nearest candidates the randomized nearest-neighbor picks from.
pub const NEAREST_CANDIDATES: usize = 3;

/// Uniformly random permutation of `0..n`.
pub fn random_route<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut route: Vec<usize> = (0..n).collect();
    route.shuffle(rng);
    route
}

/// Randomized nearest-neighbor tour.
///
/// Starts at a uniformly random attraction; each following stop is drawn
/// uniformly from the [`NEAREST_CANDIDATES`] unvisited attractions closest
/// to the current one.
pub fn nearest_neighbor_route<R: Rng>(instance: &Instance, rng: &mut R) -> Vec<usize> {
    let attractions = instance.attractions();
    let mut unvisited: Vec<usize> = (0..attractions.len()).collect();
    let mut route = Vec::with_capacity(unvisited.len());

    if unvisited.is_empty() {
        return route;
    }

    let mut current = unvisited.swap_remove(rng.random_range(0..unvisited.len()));
    route.push(current);

    while !unvisited.is_empty() {
        let here = attractions[current].location;
        // Stable order keeps ties deterministic for a given seed.
        unvisited.sort_by(|&a, &b| {
            euclidean(here, attractions[a].location)
                .total_cmp(&euclidean(here, attractions[b].location))
                .then(a.cmp(&b))
        });

        let pick = rng.random_range(0..NEAREST_CANDIDATES.min(unvisited.len()));
        current = unvisited.remove(pick);
        route.push(current);
    }

    route
}

/// Randomized cheapest-first tour.
///
/// Repeatedly draws uniformly from the cheapest third (at least one) of
/// the attractions not yet placed.
pub fn cheapest_first_route<R: Rng>(instance: &Instance, rng: &mut R) -> Vec<usize> {
    let attractions = instance.attractions();
    let mut remaining: Vec<usize> = (0..attractions.len()).collect();
    remaining.sort_by_key(|&i| attractions[i].cost);

    let mut route = Vec::with_capacity(remaining.len());
    while !remaining.is_empty() {
        let window = (remaining.len() / 3).max(1);
        let pick = rng.random_range(0..window);
        route.push(remaining.remove(pick));
    }
    route
}
