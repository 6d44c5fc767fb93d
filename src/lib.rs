//! Operator-pluggable genetic algorithm for the 0/1 knapsack problem.
//!
//! - **Genetic Algorithm (GA)**: a generational evolutionary loop over
//!   binary chromosomes with elitism, stall-based early stopping, and
//!   injected selection, crossover, mutation and repair operators.
//! - **Knapsack adapter**: instance loading, fitness with a hard capacity
//!   constraint, feasible-by-construction chromosome factory and greedy
//!   ratio-based repair.
//! - **Experiments**: the comparison grid of operator and rate settings
//!   run against one instance, with a serializable report.
//!
//! # Architecture
//!
//! The GA engine in [`ga`] knows nothing about knapsacks; [`knapsack`]
//! supplies the problem-specific operators and [`experiment`] composes the
//! two. All randomness flows through an explicit, seedable
//! [`rand::rngs::StdRng`] so that runs are reproducible.
//!
//! # Example
//!
//! ```
//! use u_knapsack::ga::{Crossover, GaConfig, GaRunner, Selection};
//! use u_knapsack::knapsack::KnapsackInstance;
//!
//! let instance: KnapsackInstance = "3 10\n10 5\n7 4\n6 3\n".parse().unwrap();
//! let operators = instance.operators(Selection::Tournament(3), Crossover::OnePoint).unwrap();
//! let config = GaConfig::new(instance.item_count())
//!     .with_population_size(20)
//!     .with_num_generations(30)
//!     .with_seed(42);
//! let result = GaRunner::run(&config, &operators).unwrap();
//! assert!(instance.total_weight(&result.best.chromosome) <= instance.capacity);
//! ```

pub mod error;
pub mod experiment;
pub mod ga;
pub mod knapsack;
pub mod random;

pub use error::GaError;
