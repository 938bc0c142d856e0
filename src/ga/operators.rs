//! Permutation operators.
//!
//! Crossover and mutation for permutation-encoded routes. Genes are table
//! positions `0..n`, so every operator can index lookup tables by value.
//! All operators map a permutation of `0..n` to a permutation of `0..n`.
//!
//! - [`pmx_crossover`] (PMX): Goldberg & Lingle (1985)
//! - [`swap_mutation`]: exchange two distinct positions
//! - [`swap_at`]: exchange two given positions
//!
//! # References
//!
//! - Goldberg & Lingle (1985), "Alleles, Loci, and the Traveling Salesman Problem"
//! - Cicirello (2023), "Genetic Operators for Permutation Representation"

use rand::seq::index;
use rand::Rng;

/// Marks an unfilled child slot.
const EMPTY: usize = usize::MAX;

// ============================================================================
// Crossover
// ============================================================================

/// Partially Mapped Crossover (PMX) producing one child.
///
/// Cut points are drawn as `start ∈ [0, n-2]`, `end ∈ [start+1, n-1]`, so
/// the copied segment always holds at least two genes. Parents shorter
/// than two genes are returned unchanged.
///
/// # Panics
/// Panics if parents have different lengths.
pub fn pmx_crossover<R: Rng>(parent1: &[usize], parent2: &[usize], rng: &mut R) -> Vec<usize> {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");

    if n < 2 {
        return parent1.to_vec();
    }

    let start = rng.random_range(0..n - 1);
    let end = rng.random_range(start + 1..n);
    pmx_child(parent1, parent2, start, end)
}

/// Builds one PMX child from explicit cut points `[start, end]`.
///
/// 1. Copy `template[start..=end]` into the child at the same positions.
/// 2. For every other position `i`, take `donor[i]`. While that value is
///    already in the child, replace it with the template's value at the
///    position the conflicting value holds in the donor.
///
/// # Complexity
/// O(n) amortized, O(n) space
///
/// # Panics
/// Panics if parents differ in length or `start > end` or `end >= n`.
pub fn pmx_child(template: &[usize], donor: &[usize], start: usize, end: usize) -> Vec<usize> {
    let n = template.len();
    assert_eq!(n, donor.len(), "parents must have equal length");
    assert!(start <= end && end < n, "invalid cut points [{start}, {end}] for length {n}");

    let mut donor_pos = vec![EMPTY; n];
    for (i, &v) in donor.iter().enumerate() {
        if v < n {
            donor_pos[v] = i;
        }
    }

    let mut child = vec![EMPTY; n];
    let mut placed = vec![false; n];
    for i in start..=end {
        child[i] = template[i];
        placed[template[i]] = true;
    }

    for i in (0..start).chain(end + 1..n) {
        let mut v = donor[i];
        // A mapping chain visits each value at most once; a longer chain
        // means the parents were not permutations. The slot is then left
        // empty and caught by the caller's permutation check.
        for _ in 0..=n {
            if v >= n {
                break;
            }
            if !placed[v] {
                child[i] = v;
                placed[v] = true;
                break;
            }
            let at = donor_pos[v];
            if at == EMPTY {
                break;
            }
            v = template[at];
        }
    }

    child
}

// ============================================================================
// Mutation
// ============================================================================

/// Swap mutation: exchange the genes at two distinct random positions.
///
/// A no-op for permutations shorter than two genes.
///
/// # Complexity
/// O(1)
pub fn swap_mutation<R: Rng>(perm: &mut [usize], rng: &mut R) {
    let n = perm.len();
    if n < 2 {
        return;
    }
    let picks = index::sample(rng, n, 2);
    swap_at(perm, picks.index(0), picks.index(1));
}

/// Exchanges the genes at positions `a` and `b`; a no-op when `a == b`.
///
/// # Panics
/// Panics if either position is out of range.
pub fn swap_at(perm: &mut [usize], a: usize, b: usize) {
    perm.swap(a, b);
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Check that a slice is a valid permutation of 0..n.
    fn is_valid_permutation(perm: &[usize], n: usize) -> bool {
        let mut seen = vec![false; n];
        perm.len() == n && perm.iter().all(|&v| v < n && !std::mem::replace(&mut seen[v], true))
    }

    // ---- PMX ----

    #[test]
    fn test_pmx_worked_example() {
        let p1 = vec![0, 1, 2, 3];
        let p2 = vec![2, 3, 0, 1];
        // Segment [1, 2] from p1 = [_, 1, 2, _]
        // pos 0: donor 2 taken -> p1[pos of 2 in p2 = 0] = 0
        // pos 3: donor 1 taken -> p1[pos of 1 in p2 = 3] = 3
        assert_eq!(pmx_child(&p1, &p2, 1, 2), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_pmx_keeps_segment() {
        let p1 = vec![0, 1, 2, 3, 4, 5, 6, 7];
        let p2 = vec![3, 7, 5, 1, 6, 0, 2, 4];
        let child = pmx_child(&p1, &p2, 2, 5);
        assert_eq!(&child[2..=5], &p1[2..=5]);
        assert!(is_valid_permutation(&child, 8));
    }

    #[test]
    fn test_pmx_boundary_cuts() {
        let p1 = vec![4, 0, 3, 1, 2];
        let p2 = vec![1, 2, 0, 4, 3];
        for (start, end) in [(0, 1), (0, 4), (3, 4), (2, 2)] {
            let child = pmx_child(&p1, &p2, start, end);
            assert!(
                is_valid_permutation(&child, 5),
                "cut ({start}, {end}) gave {child:?}"
            );
        }
        assert_eq!(pmx_child(&p1, &p2, 0, 4), p1);
    }

    #[test]
    fn test_pmx_identical_parents() {
        let mut rng = StdRng::seed_from_u64(42);
        let p = vec![3, 1, 4, 0, 2];
        assert_eq!(pmx_crossover(&p, &p, &mut rng), p);
    }

    #[test]
    fn test_pmx_short_parents() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(pmx_crossover(&[], &[], &mut rng), Vec::<usize>::new());
        assert_eq!(pmx_crossover(&[0], &[0], &mut rng), vec![0]);
    }

    #[test]
    fn test_pmx_two_genes() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let c = pmx_crossover(&[0, 1], &[1, 0], &mut rng);
            assert_eq!(c, vec![0, 1], "the only cut copies all of parent1");
        }
    }

    #[test]
    fn test_pmx_malformed_donor_leaves_gap() {
        // Donor repeats a value; the child cannot be completed.
        let child = pmx_child(&[0, 1, 2], &[1, 1, 0], 1, 2);
        assert!(!is_valid_permutation(&child, 3));
    }

    // ---- Swap ----

    #[test]
    fn test_swap_changes_exactly_two_positions() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let original: Vec<usize> = (0..10).collect();
            let mut perm = original.clone();
            swap_mutation(&mut perm, &mut rng);
            let diffs = perm.iter().zip(&original).filter(|(a, b)| a != b).count();
            assert_eq!(diffs, 2);
            assert!(is_valid_permutation(&perm, 10));
        }
    }

    #[test]
    fn test_swap_at_same_position_is_noop() {
        let mut perm = vec![3, 1, 4, 0, 2];
        swap_at(&mut perm, 2, 2);
        assert_eq!(perm, vec![3, 1, 4, 0, 2]);
        swap_at(&mut perm, 0, 4);
        assert_eq!(perm, vec![2, 1, 4, 0, 3]);
    }

    #[test]
    fn test_swap_short_permutations() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut empty: Vec<usize> = Vec::new();
        swap_mutation(&mut empty, &mut rng);
        let mut single = vec![0];
        swap_mutation(&mut single, &mut rng);
        assert_eq!(single, vec![0]);
    }

    fn permutation(n: usize) -> impl Strategy<Value = Vec<usize>> {
        Just((0..n).collect::<Vec<_>>()).prop_shuffle()
    }

    fn parents_and_cuts() -> impl Strategy<Value = (Vec<usize>, Vec<usize>, usize, usize)> {
        (1usize..30)
            .prop_flat_map(|n| (permutation(n), permutation(n), 0..n, 0..n))
            .prop_map(|(p1, p2, a, b)| (p1, p2, a.min(b), a.max(b)))
    }

    proptest! {
        #[test]
        fn prop_pmx_child_is_permutation((p1, p2, start, end) in parents_and_cuts()) {
            let n = p1.len();
            let child = pmx_child(&p1, &p2, start, end);
            prop_assert!(is_valid_permutation(&child, n), "{:?}", child);
            prop_assert_eq!(&child[start..=end], &p1[start..=end]);
        }

        #[test]
        fn prop_pmx_crossover_is_permutation(
            (p1, p2) in (2usize..40).prop_flat_map(|n| (permutation(n), permutation(n))),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let child = pmx_crossover(&p1, &p2, &mut rng);
            let mut sorted = child.clone();
            sorted.sort_unstable();
            let mut expected = p1.clone();
            expected.sort_unstable();
            prop_assert_eq!(sorted, expected);
        }

        #[test]
        fn prop_swap_any_pair_preserves_permutation(
            perm in (1usize..30).prop_flat_map(permutation),
            a in any::<prop::sample::Index>(),
            b in any::<prop::sample::Index>(),
        ) {
            let n = perm.len();
            let (a, b) = (a.index(n), b.index(n));
            let mut swapped = perm.clone();
            swap_at(&mut swapped, a, b);
            prop_assert!(is_valid_permutation(&swapped, n));
            if a == b {
                prop_assert_eq!(swapped, perm);
            }
        }

        #[test]
        fn prop_swap_mutation_preserves_permutation(
            perm in (0usize..30).prop_flat_map(permutation),
            seed in any::<u64>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut mutated = perm.clone();
            swap_mutation(&mut mutated, &mut rng);
            prop_assert!(is_valid_permutation(&mutated, perm.len()));
        }
    }
}
