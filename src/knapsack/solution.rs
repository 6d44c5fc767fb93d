//! Evaluating and decoding knapsack chromosomes.
//!
//! Only the overlap `min(chromosome.len(), item_count)` is considered;
//! extra genes are ignored and missing genes count as "not packed".

use super::instance::{Item, KnapsackInstance};
use crate::ga::Chromosome;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Human-readable view of a chromosome against an instance.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Solution {
    pub chromosome: Chromosome,
    pub total_value: u64,
    pub total_weight: u64,
    pub capacity: u64,

    /// Zero-based indices of the packed items, ascending.
    pub chosen_items: Vec<usize>,
}

impl Solution {
    /// Whether the packed items fit in the knapsack.
    pub fn is_feasible(&self) -> bool {
        self.total_weight <= self.capacity
    }
}

impl KnapsackInstance {
    /// Indices of the packed items within the overlapping range.
    pub fn chosen_items(&self, chromosome: &[bool]) -> Vec<usize> {
        chromosome
            .iter()
            .take(self.items.len())
            .enumerate()
            .filter(|(_, &gene)| gene)
            .map(|(i, _)| i)
            .collect()
    }

    /// Sum of the weights of the packed items.
    pub fn total_weight(&self, chromosome: &[bool]) -> u64 {
        self.packed(chromosome).map(|item| item.weight).sum()
    }

    /// Sum of the values of the packed items.
    pub fn total_value(&self, chromosome: &[bool]) -> u64 {
        self.packed(chromosome).map(|item| item.value).sum()
    }

    pub fn is_feasible(&self, chromosome: &[bool]) -> bool {
        self.total_weight(chromosome) <= self.capacity
    }

    /// Total value when the packed items fit, otherwise 0.
    ///
    /// Infeasible chromosomes are not penalised beyond scoring zero.
    pub fn fitness(&self, chromosome: &[bool]) -> u64 {
        let (value, weight) = self
            .packed(chromosome)
            .fold((0u64, 0u64), |(v, w), item| (v + item.value, w + item.weight));
        if weight > self.capacity {
            0
        } else {
            value
        }
    }

    /// Decodes a chromosome into a [`Solution`].
    pub fn decode(&self, chromosome: &[bool]) -> Solution {
        Solution {
            chromosome: chromosome.to_vec(),
            total_value: self.total_value(chromosome),
            total_weight: self.total_weight(chromosome),
            capacity: self.capacity,
            chosen_items: self.chosen_items(chromosome),
        }
    }

    fn packed<'s>(&'s self, chromosome: &'s [bool]) -> impl Iterator<Item = &'s Item> + 's {
        self.items
            .iter()
            .zip(chromosome)
            .filter(|(_, &gene)| gene)
            .map(|(item, _)| item)
    }
}
