//! Binary crossover and mutation operators.
//!
//! These operate on `&[bool]` chromosomes and always allocate new vectors;
//! the parent slices are never modified.
//!
//! # Crossover Operators
//!
//! - [`one_point_crossover`]: swap tails after a single interior cut point
//! - [`two_point_crossover`]: swap the segment between two interior cut points
//!
//! # Mutation Operators
//!
//! - [`bit_flip_mutation`]: flip every gene independently with a fixed probability
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - De Jong (1975), "An Analysis of the Behavior of a Class of Genetic
//!   Adaptive Systems"

use super::types::Chromosome;
use rand::Rng;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// Crossover operators
// ============================================================================

/// One-point crossover.
///
/// With `L = min(len(parent1), len(parent2))`, picks a cut point uniformly in
/// `[1, L-1]` and returns
/// `(parent1[..cut] + parent2[cut..L], parent2[..cut] + parent1[cut..L])`.
///
/// When `L < 2` there is no interior cut point and copies of the parents
/// are returned unchanged.
///
/// # Complexity
/// O(L) time, O(L) space
pub fn one_point_crossover<R: Rng + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = parent1.len().min(parent2.len());
    if len < 2 {
        return (parent1.to_vec(), parent2.to_vec());
    }

    let cut = rng.random_range(1..len);

    let child1 = splice(parent1, parent2, cut, len, len);
    let child2 = splice(parent2, parent1, cut, len, len);

    (child1, child2)
}

/// Two-point crossover.
///
/// Picks `k1` uniformly in `[1, L-2]` and `k2` uniformly in `[k1+1, L-1]`,
/// then exchanges the middle segment `[k1, k2)` between the parents.
/// Falls back to [`one_point_crossover`] when `L < 3`.
///
/// # Complexity
/// O(L) time, O(L) space
pub fn two_point_crossover<R: Rng + ?Sized>(
    parent1: &[bool],
    parent2: &[bool],
    rng: &mut R,
) -> (Chromosome, Chromosome) {
    let len = parent1.len().min(parent2.len());
    if len < 3 {
        return one_point_crossover(parent1, parent2, rng);
    }

    let k1 = rng.random_range(1..len - 1);
    let k2 = rng.random_range(k1 + 1..len);

    let child1 = splice(parent1, parent2, k1, k2, len);
    let child2 = splice(parent2, parent1, k1, k2, len);

    (child1, child2)
}

/// Builds `outer[..start] + inner[start..end] + outer[end..len]`.
fn splice(outer: &[bool], inner: &[bool], start: usize, end: usize, len: usize) -> Chromosome {
    let mut child = Vec::with_capacity(len);
    child.extend_from_slice(&outer[..start]);
    child.extend_from_slice(&inner[start..end]);
    child.extend_from_slice(&outer[end..len]);
    child
}

// ============================================================================
// Mutation operators
// ============================================================================

/// Bit-flip mutation.
///
/// Returns a copy of `chromosome` in which every gene has been flipped
/// independently with probability `mutation_rate`.
///
/// # Complexity
/// O(n), one random draw per gene
pub fn bit_flip_mutation<R: Rng + ?Sized>(
    chromosome: &[bool],
    mutation_rate: f64,
    rng: &mut R,
) -> Chromosome {
    chromosome
        .iter()
        .map(|&gene| {
            if rng.random_range(0.0..1.0) < mutation_rate {
                !gene
            } else {
                gene
            }
        })
        .collect()
}

/// Independent uniform 0/1 draw per gene.
pub fn random_chromosome<R: Rng + ?Sized>(length: usize, rng: &mut R) -> Chromosome {
    (0..length).map(|_| rng.random_bool(0.5)).collect()
}

/// Named crossover strategy, for callers that pick operators by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Crossover {
    /// See [`one_point_crossover`].
    #[default]
    OnePoint,

    /// See [`two_point_crossover`].
    TwoPoint,
}

impl Crossover {
    /// Recombines two parents with this strategy.
    pub fn apply<R: Rng + ?Sized>(
        &self,
        parent1: &[bool],
        parent2: &[bool],
        rng: &mut R,
    ) -> (Chromosome, Chromosome) {
        match self {
            Crossover::OnePoint => one_point_crossover(parent1, parent2, rng),
            Crossover::TwoPoint => two_point_crossover(parent1, parent2, rng),
        }
    }
}

impl fmt::Display for Crossover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Crossover::OnePoint => write!(f, "one_point"),
            Crossover::TwoPoint => write!(f, "two_point"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn ones(n: usize) -> Vec<bool> {
        vec![true; n]
    }

    fn zeros(n: usize) -> Vec<bool> {
        vec![false; n]
    }

    /// Indices where the child takes its gene from the all-ones parent.
    fn from_ones(child: &[bool]) -> Vec<usize> {
        child
            .iter()
            .enumerate()
            .filter(|(_, &g)| g)
            .map(|(i, _)| i)
            .collect()
    }

    // ---- One-point ----

    #[test]
    fn test_one_point_shape() {
        let mut rng = create_rng(42);
        let p1 = ones(10);
        let p2 = zeros(10);

        for _ in 0..200 {
            let (c1, c2) = one_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 10);
            assert_eq!(c2.len(), 10);

            // c1 is a run of ones followed by zeros, with the cut strictly inside
            let cut = c1.iter().take_while(|&&g| g).count();
            assert!((1..10).contains(&cut), "cut {cut} out of range");
            assert!(c1[cut..].iter().all(|&g| !g));
            // c2 is the complement
            for i in 0..10 {
                assert_eq!(c2[i], !c1[i]);
            }
        }
    }

    #[test]
    fn test_one_point_single_gene_returns_copies() {
        let mut rng = create_rng(42);
        let (c1, c2) = one_point_crossover(&[true], &[false], &mut rng);
        assert_eq!(c1, vec![true]);
        assert_eq!(c2, vec![false]);
    }

    #[test]
    fn test_one_point_truncates_to_shorter_parent() {
        let mut rng = create_rng(9);
        let (c1, c2) = one_point_crossover(&ones(8), &zeros(5), &mut rng);
        assert_eq!(c1.len(), 5);
        assert_eq!(c2.len(), 5);
    }

    #[test]
    fn test_one_point_covers_all_cuts() {
        let mut rng = create_rng(3);
        let mut seen = [false; 6];
        for _ in 0..500 {
            let (c1, _) = one_point_crossover(&ones(6), &zeros(6), &mut rng);
            seen[c1.iter().take_while(|&&g| g).count()] = true;
        }
        assert_eq!(seen, [false, true, true, true, true, true]);
    }

    // ---- Two-point ----

    #[test]
    fn test_two_point_shape() {
        let mut rng = create_rng(42);
        let p1 = zeros(12);
        let p2 = ones(12);

        for _ in 0..200 {
            let (c1, c2) = two_point_crossover(&p1, &p2, &mut rng);
            assert_eq!(c1.len(), 12);
            assert_eq!(c2.len(), 12);

            // c1 carries a single contiguous block of ones strictly inside
            let segment = from_ones(&c1);
            assert!(!segment.is_empty());
            let (k1, last) = (segment[0], *segment.last().unwrap());
            assert!(k1 >= 1, "k1 must be interior");
            assert!(last <= 10, "k2 must be interior");
            assert_eq!(segment.len(), last - k1 + 1, "segment must be contiguous");
            for i in 0..12 {
                assert_eq!(c2[i], !c1[i]);
            }
        }
    }

    #[test]
    fn test_two_point_short_parents_match_one_point() {
        let p1 = [true, false];
        let p2 = [false, true];
        let mut rng_a = create_rng(17);
        let mut rng_b = create_rng(17);
        for _ in 0..50 {
            assert_eq!(
                two_point_crossover(&p1, &p2, &mut rng_a),
                one_point_crossover(&p1, &p2, &mut rng_b)
            );
        }
    }

    #[test]
    fn test_two_point_minimal_length() {
        // L = 3 forces k1 = 1, k2 = 2
        let mut rng = create_rng(5);
        let (c1, c2) = two_point_crossover(&zeros(3), &ones(3), &mut rng);
        assert_eq!(c1, vec![false, true, false]);
        assert_eq!(c2, vec![true, false, true]);
    }

    #[test]
    fn test_crossover_leaves_parents_untouched() {
        let mut rng = create_rng(1);
        let p1 = vec![true, false, true, true, false];
        let p2 = vec![false, false, true, false, true];
        let (a, b) = (p1.clone(), p2.clone());
        for op in [Crossover::OnePoint, Crossover::TwoPoint] {
            let _ = op.apply(&p1, &p2, &mut rng);
        }
        assert_eq!(p1, a);
        assert_eq!(p2, b);
    }

    // ---- Bit-flip ----

    #[test]
    fn test_mutation_rate_zero_is_identity() {
        let mut rng = create_rng(42);
        let c = vec![true, false, true, false];
        assert_eq!(bit_flip_mutation(&c, 0.0, &mut rng), c);
    }

    #[test]
    fn test_mutation_rate_one_flips_everything() {
        let mut rng = create_rng(42);
        let c = vec![true, false, true, false];
        assert_eq!(
            bit_flip_mutation(&c, 1.0, &mut rng),
            vec![false, true, false, true]
        );
    }

    #[test]
    fn test_mutation_rate_is_per_gene() {
        let mut rng = create_rng(42);
        let c = zeros(10000);
        let mutated = bit_flip_mutation(&c, 0.1, &mut rng);
        let flipped = mutated.iter().filter(|&&g| g).count();
        assert!(
            (800..1200).contains(&flipped),
            "expected ~1000 flips, got {flipped}"
        );
        assert!(c.iter().all(|&g| !g), "input must stay untouched");
    }

    #[test]
    fn test_random_chromosome() {
        let mut rng = create_rng(42);
        let c = random_chromosome(1000, &mut rng);
        assert_eq!(c.len(), 1000);
        let ones = c.iter().filter(|&&g| g).count();
        assert!((400..600).contains(&ones), "got {ones} ones");
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Crossover::OnePoint.to_string(), "one_point");
        assert_eq!(Crossover::TwoPoint.to_string(), "two_point");
    }
}
