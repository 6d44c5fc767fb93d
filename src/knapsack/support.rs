//! Feasibility-preserving knapsack operators.
//!
//! # Chromosome factory
//!
//! [`create_feasible_chromosome`] visits the items in a random order and
//! packs each one with probability 1/2 if it still fits, so every
//! generated chromosome respects the capacity.
//!
//! # Repair
//!
//! [`repair`] removes packed items in ascending value/weight order (least
//! efficient first) until the knapsack fits. Feasible chromosomes are
//! returned unchanged.

use super::instance::KnapsackInstance;
use crate::error::GaError;
use crate::ga::{bit_flip_mutation, Chromosome, Crossover, GaOperators, Individual, Selection};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Builds a random chromosome of `length` genes whose packed weight never
/// exceeds the capacity.
///
/// Only the first `min(length, item_count)` genes can be set; the rest stay
/// `false`.
pub fn create_feasible_chromosome<R: Rng + ?Sized>(
    instance: &KnapsackInstance,
    length: usize,
    rng: &mut R,
) -> Chromosome {
    let n = length.min(instance.item_count());
    let mut chromosome = vec![false; length];

    let mut order: Vec<usize> = (0..n).collect();
    order.shuffle(rng);

    let mut remaining = instance.capacity;
    for i in order {
        let weight = instance.items[i].weight;
        if weight <= remaining && rng.random_bool(0.5) {
            chromosome[i] = true;
            remaining -= weight;
        }
    }

    chromosome
}

/// Returns a feasible copy of `chromosome`.
///
/// Packed items are dropped in ascending value/weight order until the
/// total weight fits; ties keep gene order and zero-weight items are
/// dropped last. The input is never modified and its
/// length is preserved.
pub fn repair<R: Rng + ?Sized>(
    instance: &KnapsackInstance,
    chromosome: &[bool],
    rng: &mut R,
) -> Chromosome {
    let mut repaired = chromosome.to_vec();
    let mut weight = instance.total_weight(&repaired);
    if weight <= instance.capacity {
        return repaired;
    }

    let mut packed: Vec<(usize, f64)> = instance
        .chosen_items(&repaired)
        .into_iter()
        .map(|i| (i, instance.items[i].ratio()))
        .collect();
    // Zero-weight items sort after every weighted item, in gene order.
    packed.sort_by(|a, b| {
        let a_free = instance.items[a.0].weight == 0;
        let b_free = instance.items[b.0].weight == 0;
        a_free.cmp(&b_free).then(a.1.total_cmp(&b.1))
    });

    for &(i, _) in &packed {
        if weight <= instance.capacity {
            break;
        }
        repaired[i] = false;
        weight -= instance.items[i].weight;
    }

    // Random removal if the ratio pass left the knapsack overweight.
    let mut still_packed = instance.chosen_items(&repaired);
    while weight > instance.capacity && !still_packed.is_empty() {
        let i = still_packed.swap_remove(rng.random_range(0..still_packed.len()));
        repaired[i] = false;
        weight -= instance.items[i].weight;
    }

    repaired
}

impl KnapsackInstance {
    /// Operators for solving this instance with the GA engine.
    ///
    /// Wires the knapsack fitness, the chosen selection and crossover,
    /// bit-flip mutation, [`create_feasible_chromosome`] and [`repair`].
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] for a tournament size of zero.
    pub fn operators(
        &self,
        selection: Selection,
        crossover: Crossover,
    ) -> Result<GaOperators<'_, u64>, GaError> {
        Ok(self
            .unrepaired_operators(selection, crossover)?
            .with_chromosome_factory(move |length, rng: &mut StdRng| {
                create_feasible_chromosome(self, length, rng)
            })
            .with_repair(move |chromosome: &[bool], rng: &mut StdRng| repair(self, chromosome, rng)))
    }

    /// Like [`operators`](Self::operators) but with uniform random
    /// initialisation and no repair; overweight chromosomes simply score 0.
    pub fn unrepaired_operators(
        &self,
        selection: Selection,
        crossover: Crossover,
    ) -> Result<GaOperators<'_, u64>, GaError> {
        selection.validate()?;
        Ok(GaOperators::new(
            move |chromosome: &[bool]| self.fitness(chromosome),
            move |population: &[Individual<u64>], rng: &mut StdRng| selection.select(population, rng),
            move |p1: &[bool], p2: &[bool], rng: &mut StdRng| crossover.apply(p1, p2, rng),
            bit_flip_mutation,
        ))
    }
}
