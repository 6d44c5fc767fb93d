//! Core data model for the GA engine.
//!
//! A [`Chromosome`] is a fixed-length bit vector; an [`Individual`] pairs a
//! chromosome with the fitness computed for it.

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Binary chromosome: one gene per candidate item, `true` meaning "included".
///
/// Operators always return freshly allocated chromosomes and never modify
/// the slices they are given.
pub type Chromosome = Vec<bool>;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Higher fitness is considered better (maximization).
pub trait Fitness: PartialOrd + Copy + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for fitness-proportionate selection
    /// and logging.
    fn to_f64(self) -> f64;

    /// Total order used wherever individuals are ranked or compared.
    ///
    /// Values that are not comparable with themselves (NaN) rank below
    /// every other value and equal to each other.
    fn cmp_fitness(&self, other: &Self) -> Ordering {
        let self_valid = self.partial_cmp(self).is_some();
        let other_valid = other.partial_cmp(other).is_some();
        match (self_valid, other_valid) {
            (true, true) => self.partial_cmp(other).unwrap_or(Ordering::Equal),
            (false, false) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
        }
    }
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

macro_rules! impl_integer_fitness {
    ($($t:ty),*) => {
        $(
            impl Fitness for $t {
                fn to_f64(self) -> f64 {
                    self as f64
                }
            }
        )*
    };
}

impl_integer_fitness!(u64, u32, i64, i32, usize);

/// A candidate solution in the population.
///
/// The fitness is only ever set together with the chromosome it was
/// computed from; the engine builds a new `Individual` whenever a
/// chromosome changes instead of patching one in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Individual<F> {
    /// The genes of this individual.
    pub chromosome: Chromosome,

    /// Fitness of `chromosome`.
    pub fitness: F,
}

impl<F: Fitness> Individual<F> {
    /// Pairs a chromosome with its already computed fitness.
    pub fn new(chromosome: Chromosome, fitness: F) -> Self {
        Self {
            chromosome,
            fitness,
        }
    }

    /// Evaluates `chromosome` with `fitness_fn` and wraps the result.
    pub fn evaluated(chromosome: Chromosome, fitness_fn: impl Fn(&[bool]) -> F) -> Self {
        let fitness = fitness_fn(&chromosome);
        Self {
            chromosome,
            fitness,
        }
    }

    /// Number of genes in the chromosome.
    pub fn len(&self) -> usize {
        self.chromosome.len()
    }

    /// Whether the chromosome has no genes.
    pub fn is_empty(&self) -> bool {
        self.chromosome.is_empty()
    }
}

/// Returns the index of the fittest individual.
///
/// Ties keep the first encountered (lowest index).
pub(crate) fn best_index<F: Fitness>(population: &[Individual<F>]) -> Option<usize> {
    let mut iter = population.iter().enumerate();
    let (mut best_idx, mut best) = iter.next()?;
    for (i, ind) in iter {
        if ind.fitness.cmp_fitness(&best.fitness) == Ordering::Greater {
            best_idx = i;
            best = ind;
        }
    }
    Some(best_idx)
}
