//! Parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::Individual;
use rand::seq::index;
use rand::Rng;

/// Tournament selection: sample `k` distinct individuals, return the index
/// of the one with the lowest fitness.
///
/// `k` is clamped to `1..=population.len()`. Ties go to the individual
/// drawn first.
///
/// # Complexity
/// O(k) per selection
///
/// # Panics
/// Panics if `population` is empty.
pub fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );

    let n = population.len();
    let k = k.clamp(1, n);

    let mut contestants = index::sample(rng, n, k).into_iter();
    let mut best_idx = contestants.next().unwrap_or(0);
    for idx in contestants {
        if population[idx].fitness() < population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}
