//! GA evolutionary loop execution.
//!
//! [`GaRunner`] orchestrates the complete evolutionary process:
//! initialization → evaluation → elitism → selection → crossover →
//! mutation → repair → evaluation → repeat.
//!
//! The problem-specific behaviour is injected through [`GaOperators`]: a
//! fitness function plus selection, crossover and mutation operators, and
//! optionally a chromosome factory and a repair function.

use super::config::GaConfig;
use super::operators::random_chromosome;
use super::types::{best_index, Chromosome, Fitness, Individual};
use crate::error::GaError;
use crate::random::create_rng;
use rand::rngs::StdRng;
use rand::Rng;
use std::cmp::Ordering;
use tracing::instrument;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

type FitnessFn<'a, F> = Box<dyn Fn(&[bool]) -> F + 'a>;
type SelectionFn<'a, F> = Box<dyn Fn(&[Individual<F>], &mut StdRng) -> Result<usize, GaError> + 'a>;
type CrossoverFn<'a> = Box<dyn Fn(&[bool], &[bool], &mut StdRng) -> (Chromosome, Chromosome) + 'a>;
type MutationFn<'a> = Box<dyn Fn(&[bool], f64, &mut StdRng) -> Chromosome + 'a>;
type FactoryFn<'a> = Box<dyn Fn(usize, &mut StdRng) -> Chromosome + 'a>;
type RepairFn<'a> = Box<dyn Fn(&[bool], &mut StdRng) -> Chromosome + 'a>;

/// Operators injected into the evolutionary loop.
///
/// Every operator is a plain function value; parameterised operators such
/// as tournament selection are built by factories that capture their
/// parameters in a closure. All randomness comes from the `StdRng` the
/// engine passes in.
///
/// # Usage
///
/// ```
/// use u_knapsack::ga::{bit_flip_mutation, one_point_crossover, roulette, GaOperators};
///
/// let ops = GaOperators::new(
///     |c: &[bool]| c.iter().filter(|&&g| g).count() as u64,
///     roulette,
///     one_point_crossover,
///     bit_flip_mutation,
/// );
/// # let _ = ops;
/// ```
pub struct GaOperators<'a, F> {
    fitness: FitnessFn<'a, F>,
    selection: SelectionFn<'a, F>,
    crossover: CrossoverFn<'a>,
    mutation: MutationFn<'a>,
    create_chromosome: Option<FactoryFn<'a>>,
    repair: Option<RepairFn<'a>>,
}

impl<'a, F: Fitness> GaOperators<'a, F> {
    /// Bundles the four required operators.
    pub fn new<Fit, Sel, Cx, Mu>(fitness: Fit, selection: Sel, crossover: Cx, mutation: Mu) -> Self
    where
        Fit: Fn(&[bool]) -> F + 'a,
        Sel: Fn(&[Individual<F>], &mut StdRng) -> Result<usize, GaError> + 'a,
        Cx: Fn(&[bool], &[bool], &mut StdRng) -> (Chromosome, Chromosome) + 'a,
        Mu: Fn(&[bool], f64, &mut StdRng) -> Chromosome + 'a,
    {
        Self {
            fitness: Box::new(fitness),
            selection: Box::new(selection),
            crossover: Box::new(crossover),
            mutation: Box::new(mutation),
            create_chromosome: None,
            repair: None,
        }
    }

    /// Replaces the uniform-random initial chromosome generator.
    pub fn with_chromosome_factory<Fac>(mut self, factory: Fac) -> Self
    where
        Fac: Fn(usize, &mut StdRng) -> Chromosome + 'a,
    {
        self.create_chromosome = Some(Box::new(factory));
        self
    }

    /// Applies `repair` to every chromosome before it is evaluated.
    pub fn with_repair<Rep>(mut self, repair: Rep) -> Self
    where
        Rep: Fn(&[bool], &mut StdRng) -> Chromosome + 'a,
    {
        self.repair = Some(Box::new(repair));
        self
    }

    /// Whether a repair function is configured.
    pub fn has_repair(&self) -> bool {
        self.repair.is_some()
    }

    fn evaluate(&self, chromosome: Chromosome) -> Individual<F> {
        Individual::evaluated(chromosome, |c| (self.fitness)(c))
    }

    fn repaired(&self, chromosome: Chromosome, rng: &mut StdRng) -> Chromosome {
        match &self.repair {
            Some(repair) => repair(&chromosome, rng),
            None => chromosome,
        }
    }
}

/// Result of a GA optimization run.
///
/// Contains the best solution found, along with statistics about the
/// evolutionary process.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GaResult<F> {
    /// The best individual found during the entire run.
    ///
    /// This is an independent copy; it survives even if its lineage is lost
    /// from the population.
    pub best: Individual<F>,

    /// Best fitness value (same as `best.fitness`).
    pub best_fitness: F,

    /// Global-best fitness after each generation; entry 0 is the initial
    /// population.
    pub fitness_history: Vec<F>,

    /// Population of the last executed generation.
    pub final_population: Vec<Individual<F>>,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,
}

/// Executes the GA evolutionary loop.
///
/// # Usage
///
/// ```
/// use u_knapsack::ga::{bit_flip_mutation, tournament, two_point_crossover, GaConfig, GaOperators, GaRunner};
///
/// let ops = GaOperators::new(
///     |c: &[bool]| c.iter().filter(|&&g| g).count() as u64,
///     tournament::<u64>(3).unwrap(),
///     two_point_crossover,
///     bit_flip_mutation,
/// );
/// let config = GaConfig::new(16).with_population_size(30).with_num_generations(40).with_seed(42);
/// let result = GaRunner::run(&config, &ops).unwrap();
/// assert_eq!(result.fitness_history.len(), result.generations + 1);
/// ```
pub struct GaRunner;

impl GaRunner {
    /// Runs the GA optimization with a generator seeded from `config.seed`
    /// (a random seed when `None`).
    ///
    /// # Errors
    /// [`GaError::InvalidConfiguration`] before any work starts if the
    /// configuration is invalid; operator errors propagate unchanged.
    pub fn run<F: Fitness>(
        config: &GaConfig,
        operators: &GaOperators<'_, F>,
    ) -> Result<GaResult<F>, GaError> {
        config.validate()?;
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(config, operators, &mut rng)
    }

    /// Runs the GA optimization drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            population_size = config.population_size,
            num_generations = config.num_generations,
            chromosome_length = config.chromosome_length
        )
    )]
    pub fn run_with_rng<F: Fitness>(
        config: &GaConfig,
        operators: &GaOperators<'_, F>,
        rng: &mut StdRng,
    ) -> Result<GaResult<F>, GaError> {
        config.validate()?;

        // 1. Initialize and evaluate population
        let mut population = initial_population(config, operators, rng);

        // 2. Track best
        let mut best = population[find_best(&population)?].clone();
        let mut fitness_history = Vec::with_capacity(config.num_generations + 1);
        fitness_history.push(best.fitness);

        let mut stall_counter = 0usize;
        let mut generations = 0usize;
        let mut stagnated = false;

        // 3. Evolutionary loop
        for generation in 1..=config.num_generations {
            let mut next_gen = elites(&population, config.elitism_count);
            next_gen.reserve(config.population_size.saturating_sub(next_gen.len()));

            let offspring = breed(
                &population,
                config,
                operators,
                config.population_size.saturating_sub(next_gen.len()),
                rng,
            )?;
            next_gen.extend(offspring.into_iter().map(|c| operators.evaluate(c)));

            population = next_gen;

            // Update best
            let gen_best = &population[find_best(&population)?];
            if gen_best.fitness.cmp_fitness(&best.fitness) == Ordering::Greater {
                best = gen_best.clone();
                stall_counter = 0;
            } else {
                stall_counter += 1;
            }

            fitness_history.push(best.fitness);
            generations = generation;

            tracing::debug!(
                generation,
                best_fitness = ?best.fitness,
                stall_counter,
                "generation complete"
            );

            // Stagnation check
            if let Some(limit) = config.max_stall_generations {
                if stall_counter >= limit {
                    stagnated = true;
                    break;
                }
            }
        }

        tracing::info!(
            generations,
            best_fitness = ?best.fitness,
            stagnated,
            "GA run finished"
        );

        Ok(GaResult {
            best_fitness: best.fitness,
            best,
            fitness_history,
            final_population: population,
            generations,
            stagnated,
        })
    }
}

/// Builds and evaluates the initial population.
fn initial_population<F: Fitness>(
    config: &GaConfig,
    operators: &GaOperators<'_, F>,
    rng: &mut StdRng,
) -> Vec<Individual<F>> {
    (0..config.population_size)
        .map(|_| {
            let chromosome = match &operators.create_chromosome {
                Some(create) => create(config.chromosome_length, rng),
                None => random_chromosome(config.chromosome_length, rng),
            };
            let chromosome = operators.repaired(chromosome, rng);
            operators.evaluate(chromosome)
        })
        .collect()
}

/// Copies the `count` fittest individuals, chromosome and fitness both.
///
/// Ties keep their population order; NaN fitness ranks last.
fn elites<F: Fitness>(population: &[Individual<F>], count: usize) -> Vec<Individual<F>> {
    if count == 0 {
        return Vec::new();
    }
    let mut ranked: Vec<&Individual<F>> = population.iter().collect();
    ranked.sort_by(|a, b| b.fitness.cmp_fitness(&a.fitness));
    ranked.into_iter().take(count).cloned().collect()
}

/// Produces `count` offspring chromosomes from `population`.
///
/// Offspring are returned unevaluated; the caller evaluates them in one
/// batch once breeding is complete.
fn breed<F: Fitness>(
    population: &[Individual<F>],
    config: &GaConfig,
    operators: &GaOperators<'_, F>,
    count: usize,
    rng: &mut StdRng,
) -> Result<Vec<Chromosome>, GaError> {
    let mut offspring: Vec<Chromosome> = Vec::with_capacity(count + 1);

    while offspring.len() < count {
        // Selection
        let p1 = select_parent(population, operators, rng)?;
        let p2 = select_parent(population, operators, rng)?;

        // Crossover
        let (child1, child2) = if rng.random_range(0.0..1.0) < config.crossover_rate {
            (operators.crossover)(&p1.chromosome, &p2.chromosome, rng)
        } else {
            (p1.chromosome.clone(), p2.chromosome.clone())
        };

        // Mutation
        let child1 = (operators.mutation)(&child1, config.mutation_rate, rng);
        let child2 = (operators.mutation)(&child2, config.mutation_rate, rng);

        // Repair
        let child1 = operators.repaired(child1, rng);
        let child2 = operators.repaired(child2, rng);

        debug_assert_eq!(child1.len(), config.chromosome_length);
        debug_assert_eq!(child2.len(), config.chromosome_length);

        offspring.push(child1);
        if offspring.len() < count {
            offspring.push(child2);
        }
    }

    Ok(offspring)
}

fn select_parent<'p, F: Fitness>(
    population: &'p [Individual<F>],
    operators: &GaOperators<'_, F>,
    rng: &mut StdRng,
) -> Result<&'p Individual<F>, GaError> {
    let index = (operators.selection)(population, rng)?;
    population.get(index).ok_or(GaError::SelectionOutOfRange {
        index,
        population_size: population.len(),
    })
}

/// Find the index of the individual with the best (highest) fitness.
fn find_best<F: Fitness>(population: &[Individual<F>]) -> Result<usize, GaError> {
    best_index(population).ok_or(GaError::EmptyPopulation)
}

// ============================================================================
// Tests
// ============================================================================
