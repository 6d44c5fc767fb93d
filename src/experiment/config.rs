//! Experiment grid configuration.

use crate::error::GaError;
use crate::ga::GaConfig;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shared parameters and rate grids for an experiment sweep.
///
/// Every run uses `population_size`, `num_generations` and
/// `elitism_count`. The comparison groups use the base `mutation_rate` and
/// `crossover_rate`; the grid group sweeps `mutation_rates × crossover_rates`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentConfig {
    pub population_size: usize,
    pub num_generations: usize,
    pub elitism_count: usize,

    /// Base mutation rate for the comparison groups.
    pub mutation_rate: f64,

    /// Base crossover rate for the comparison groups.
    pub crossover_rate: f64,

    /// Mutation rates swept by the grid group.
    pub mutation_rates: Vec<f64>,

    /// Crossover rates swept by the grid group.
    pub crossover_rates: Vec<f64>,

    pub max_stall_generations: Option<usize>,

    /// Base seed; run `i` is seeded with `seed + i`. `None` seeds every
    /// run randomly.
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            population_size: 300,
            num_generations: 2000,
            elitism_count: 2,
            mutation_rate: 0.001,
            crossover_rate: 0.8,
            mutation_rates: vec![0.005, 0.02, 0.05],
            crossover_rates: vec![0.6, 0.8, 0.95],
            max_stall_generations: None,
            seed: None,
        }
    }
}

impl ExperimentConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_num_generations(mut self, n: usize) -> Self {
        self.num_generations = n;
        self
    }

    pub fn with_elitism_count(mut self, n: usize) -> Self {
        self.elitism_count = n;
        self
    }

    pub fn with_rates(mut self, mutation_rate: f64, crossover_rate: f64) -> Self {
        self.mutation_rate = mutation_rate;
        self.crossover_rate = crossover_rate;
        self
    }

    pub fn with_grid(mut self, mutation_rates: Vec<f64>, crossover_rates: Vec<f64>) -> Self {
        self.mutation_rates = mutation_rates;
        self.crossover_rates = crossover_rates;
        self
    }

    pub fn with_max_stall_generations(mut self, n: usize) -> Self {
        self.max_stall_generations = Some(n);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// GA configuration for one run of the sweep.
    ///
    /// Rates are passed through unclamped so that [`validate`](Self::validate)
    /// can reject them.
    pub fn ga_config(
        &self,
        chromosome_length: usize,
        mutation_rate: f64,
        crossover_rate: f64,
        seed: Option<u64>,
    ) -> GaConfig {
        GaConfig {
            population_size: self.population_size,
            num_generations: self.num_generations,
            chromosome_length,
            crossover_rate,
            mutation_rate,
            elitism_count: self.elitism_count,
            max_stall_generations: self.max_stall_generations,
            seed,
        }
    }

    /// Checks every run configuration the sweep would produce.
    pub fn validate(&self, chromosome_length: usize) -> Result<(), GaError> {
        if self.mutation_rates.is_empty() || self.crossover_rates.is_empty() {
            return Err(GaError::invalid("experiment rate grids must not be empty"));
        }
        self.ga_config(chromosome_length, self.mutation_rate, self.crossover_rate, None)
            .validate()?;
        for &m in &self.mutation_rates {
            for &c in &self.crossover_rates {
                self.ga_config(chromosome_length, m, c, None).validate()?;
            }
        }
        Ok(())
    }
}
