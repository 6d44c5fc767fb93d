//! GA configuration.
//!
//! [`GaConfig`] holds the numeric parameters that control the evolutionary
//! loop. The operators themselves are injected separately through
//! [`GaOperators`](super::GaOperators).

use crate::error::GaError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Configuration for the Genetic Algorithm.
///
/// # Defaults
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::new(20);
/// assert_eq!(config.chromosome_length, 20);
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.num_generations, 500);
/// assert_eq!(config.elitism_count, 1);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_knapsack::ga::GaConfig;
///
/// let config = GaConfig::new(50)
///     .with_population_size(200)
///     .with_crossover_rate(0.9)
///     .with_mutation_rate(0.02)
///     .with_max_stall_generations(100)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,

    /// Maximum number of generations to run.
    pub num_generations: usize,

    /// Number of genes per chromosome.
    pub chromosome_length: usize,

    /// Probability of recombining a pair of parents (0.0–1.0).
    ///
    /// When crossover is not applied, the children are copies of the parents.
    pub crossover_rate: f64,

    /// Per-gene mutation probability handed to the mutation operator (0.0–1.0).
    pub mutation_rate: f64,

    /// Number of best individuals copied unchanged into the next generation.
    ///
    /// Values above `population_size` carry the whole population forward.
    pub elitism_count: usize,

    /// Stop after this many consecutive generations without strict
    /// improvement of the global best. `None` never stops early.
    pub max_stall_generations: Option<usize>,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,
}

impl GaConfig {
    /// Creates a configuration for chromosomes of the given length.
    pub fn new(chromosome_length: usize) -> Self {
        Self {
            population_size: 100,
            num_generations: 500,
            chromosome_length,
            crossover_rate: 0.8,
            mutation_rate: 0.01,
            elitism_count: 1,
            max_stall_generations: None,
            seed: None,
        }
    }

    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the number of elites carried forward each generation.
    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    /// Enables stall-based early stopping.
    pub fn with_max_stall_generations(mut self, n: usize) -> Self {
        self.max_stall_generations = Some(n);
        self
    }

    /// Disables stall-based early stopping.
    pub fn without_stall_limit(mut self) -> Self {
        self.max_stall_generations = None;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Preset for fast optimization: small population, few generations.
    ///
    /// - Population: 50, Generations: 100, Stall limit: 20
    pub fn fast(chromosome_length: usize) -> Self {
        Self {
            population_size: 50,
            num_generations: 100,
            max_stall_generations: Some(20),
            ..Self::new(chromosome_length)
        }
    }

    /// Preset for balanced optimization.
    ///
    /// - Population: 100, Generations: 300, Stall limit: 50
    pub fn balanced(chromosome_length: usize) -> Self {
        Self {
            population_size: 100,
            num_generations: 300,
            max_stall_generations: Some(50),
            ..Self::new(chromosome_length)
        }
    }

    /// Preset for quality optimization: large population, many generations.
    ///
    /// - Population: 150, Generations: 500, Stall limit: 80
    pub fn quality(chromosome_length: usize) -> Self {
        Self {
            population_size: 150,
            num_generations: 500,
            max_stall_generations: Some(80),
            ..Self::new(chromosome_length)
        }
    }

    /// Picks a preset from the number of genes.
    ///
    /// - `chromosome_length < 50` → [`fast()`](Self::fast)
    /// - `50 ≤ chromosome_length < 200` → [`balanced()`](Self::balanced)
    /// - `chromosome_length ≥ 200` → [`quality()`](Self::quality)
    pub fn auto_select(chromosome_length: usize) -> Self {
        if chromosome_length < 50 {
            Self::fast(chromosome_length)
        } else if chromosome_length < 200 {
            Self::balanced(chromosome_length)
        } else {
            Self::quality(chromosome_length)
        }
    }

    /// Validates the configuration.
    ///
    /// Returns [`GaError::InvalidConfiguration`] describing the first
    /// offending parameter.
    pub fn validate(&self) -> Result<(), GaError> {
        if self.population_size == 0 {
            return Err(GaError::invalid("population_size must be at least 1"));
        }
        if self.num_generations == 0 {
            return Err(GaError::invalid("num_generations must be at least 1"));
        }
        if self.chromosome_length == 0 {
            return Err(GaError::invalid("chromosome_length must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err(GaError::invalid("crossover_rate must be within [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(GaError::invalid("mutation_rate must be within [0, 1]"));
        }
        if self.max_stall_generations == Some(0) {
            return Err(GaError::invalid(
                "max_stall_generations must be at least 1 or None",
            ));
        }
        Ok(())
    }
}
