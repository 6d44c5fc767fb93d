//! 0/1 knapsack adapter for the GA engine.
//!
//! - [`KnapsackInstance`]: capacity plus `(value, weight)` items, one per gene
//! - Fitness: total value of the selected items, or 0 when overweight
//! - [`create_feasible_chromosome`]: random chromosomes that fit by construction
//! - [`repair`]: drops the least value-efficient items until the knapsack fits
//!
//! [`KnapsackInstance::operators`] wires all of the above into a ready
//! [`GaOperators`](crate::ga::GaOperators) bundle.

mod instance;
mod solution;
mod support;

pub use instance::{InstanceError, Item, KnapsackInstance};
pub use solution::Solution;
pub use support::{create_feasible_chromosome, repair};
