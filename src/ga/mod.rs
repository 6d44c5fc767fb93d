//! Genetic Algorithm framework.
//!
//! A generational GA over binary chromosomes whose operators are injected
//! as plain function values. Users bundle a fitness function with
//! selection, crossover and mutation operators in [`GaOperators`], pick the
//! numeric parameters in [`GaConfig`], and call [`GaRunner::run`].
//!
//! # Key Types
//!
//! - [`Individual`]: A chromosome together with its fitness
//! - [`GaConfig`]: Algorithm parameters (population size, rates, elitism, stall limit)
//! - [`GaOperators`]: The injected fitness/selection/crossover/mutation/repair functions
//! - [`GaRunner`]: Executes the evolutionary loop
//! - [`GaResult`]: Global best, fitness history and final population
//!
//! # Operators
//!
//! - Selection: [`roulette`], [`ranking`], [`tournament`] (factory), [`Selection`]
//! - Crossover: [`one_point_crossover`], [`two_point_crossover`], [`Crossover`]
//! - Mutation: [`bit_flip_mutation`]
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - De Jong (2006), *Evolutionary Computation: A Unified Approach*

mod config;
mod operators;
mod runner;
mod selection;
mod types;

pub use config::GaConfig;
pub use operators::{
    bit_flip_mutation, one_point_crossover, random_chromosome, two_point_crossover, Crossover,
};
pub use runner::{GaOperators, GaResult, GaRunner};
pub use selection::{ranking, roulette, tournament, Selection};
pub use types::{Chromosome, Fitness, Individual};
