//! Selection strategies for the GA.
//!
//! A selection operator picks one parent from the current population and
//! returns its **index**. Operators never modify the population, so the
//! engine may call them any number of times against the same slice.
//!
//! All strategies assume **maximization** (higher fitness = better).
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use super::types::{Fitness, Individual};
use crate::error::GaError;
use rand::rngs::StdRng;
use rand::Rng;
use std::cmp::Ordering;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Fitness-proportionate (roulette wheel) selection.
///
/// Negative fitness contributes zero weight. When the clamped weights sum to
/// zero there is no selection signal and a uniformly random individual is
/// returned instead.
///
/// # Errors
/// [`GaError::EmptyPopulation`] if `population` is empty.
///
/// # Complexity
/// O(n) per selection
pub fn roulette<F: Fitness, R: Rng + ?Sized>(
    population: &[Individual<F>],
    rng: &mut R,
) -> Result<usize, GaError> {
    if population.is_empty() {
        return Err(GaError::EmptyPopulation);
    }

    let weights: Vec<f64> = population
        .iter()
        .map(|ind| ind.fitness.to_f64().max(0.0))
        .collect();
    let total: f64 = weights.iter().sum();

    if !(total > 0.0 && total.is_finite()) {
        return Ok(rng.random_range(0..population.len()));
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative >= threshold {
            return Ok(i);
        }
    }

    Ok(population.len() - 1) // floating-point fallback
}

/// Rank-based selection using linear ranking.
///
/// Individuals are sorted worst first; the i-th sorted position gets weight
/// `i + 1`, so the best of `n` individuals has weight `n` out of a total of
/// `n(n+1)/2`. Only the order of fitness values matters, not their scale.
///
/// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
/// Algorithms"
///
/// # Errors
/// [`GaError::EmptyPopulation`] if `population` is empty.
///
/// # Complexity
/// O(n log n) per selection (sort)
pub fn ranking<F: Fitness, R: Rng + ?Sized>(
    population: &[Individual<F>],
    rng: &mut R,
) -> Result<usize, GaError> {
    let n = population.len();
    if n == 0 {
        return Err(GaError::EmptyPopulation);
    }

    // Ascending by fitness (worst first); stable on the original order
    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| population[a].fitness.cmp_fitness(&population[b].fitness));

    let total = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (pos, &idx) in order.iter().enumerate() {
        cumulative += (pos + 1) as f64;
        if cumulative >= threshold {
            return Ok(idx);
        }
    }

    Ok(order[n - 1]) // floating-point fallback
}

/// Builds a tournament selection operator of the given size.
///
/// The returned function samples `min(size, n)` individuals uniformly at
/// random *with replacement* and returns the fittest of them (ties keep the
/// first sampled).
///
/// # Errors
/// [`GaError::InvalidConfiguration`] if `size` is zero.
///
/// # Examples
///
/// ```
/// use u_knapsack::ga::{tournament, Individual};
/// use u_knapsack::random::create_rng;
///
/// let select = tournament::<u64>(3).unwrap();
/// let pop = vec![Individual::new(vec![true], 4u64), Individual::new(vec![false], 1)];
/// let idx = select(&pop, &mut create_rng(42)).unwrap();
/// assert!(idx < pop.len());
/// ```
pub fn tournament<F: Fitness>(
    size: usize,
) -> Result<impl Fn(&[Individual<F>], &mut StdRng) -> Result<usize, GaError> + Clone, GaError> {
    if size == 0 {
        return Err(GaError::invalid("tournament size must be at least 1"));
    }
    Ok(move |population: &[Individual<F>], rng: &mut StdRng| {
        tournament_select(population, size, rng)
    })
}

fn tournament_select<F: Fitness, R: Rng + ?Sized>(
    population: &[Individual<F>],
    size: usize,
    rng: &mut R,
) -> Result<usize, GaError> {
    let n = population.len();
    if n == 0 {
        return Err(GaError::EmptyPopulation);
    }

    let k = size.min(n);
    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness.cmp_fitness(&population[best_idx].fitness) == Ordering::Greater {
            best_idx = idx;
        }
    }
    Ok(best_idx)
}

/// Named selection strategy, for callers that pick operators by name
/// (experiment grids, the command line).
///
/// ```
/// use u_knapsack::ga::{Individual, Selection};
/// use u_knapsack::random::create_rng;
///
/// let pop = vec![Individual::new(vec![true], 2u64), Individual::new(vec![false], 8)];
/// let idx = Selection::Tournament(2).select(&pop, &mut create_rng(1)).unwrap();
/// assert!(idx < 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Selection {
    /// Fitness-proportionate selection, see [`roulette`].
    #[default]
    Roulette,

    /// Linear rank selection, see [`ranking`].
    Ranking,

    /// Tournament of the given size, see [`tournament`].
    Tournament(usize),
}

impl Selection {
    /// Select a parent index from the population.
    pub fn select<F: Fitness, R: Rng + ?Sized>(
        &self,
        population: &[Individual<F>],
        rng: &mut R,
    ) -> Result<usize, GaError> {
        match *self {
            Selection::Roulette => roulette(population, rng),
            Selection::Ranking => ranking(population, rng),
            Selection::Tournament(k) => {
                self.validate()?;
                tournament_select(population, k, rng)
            }
        }
    }

    /// Checks the strategy parameters.
    pub fn validate(&self) -> Result<(), GaError> {
        match self {
            Selection::Tournament(0) => Err(GaError::invalid("tournament size must be at least 1")),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Roulette => write!(f, "roulette"),
            Selection::Ranking => write!(f, "ranking"),
            Selection::Tournament(k) => write!(f, "tournament_{k}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    fn make_population(fitnesses: &[f64]) -> Vec<Individual<f64>> {
        fitnesses
            .iter()
            .map(|&f| Individual::new(vec![false], f))
            .collect()
    }

    fn counts<S>(pop: &[Individual<f64>], n: usize, mut select: S) -> Vec<u32>
    where
        S: FnMut(&[Individual<f64>]) -> usize,
    {
        let mut counts = vec![0u32; pop.len()];
        for _ in 0..n {
            counts[select(pop)] += 1;
        }
        counts
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        let select = tournament::<f64>(4).unwrap();

        let counts = counts(&pop, 10000, |p| select(p, &mut rng).unwrap());
        // Index 0 (fitness=10.0) should dominate
        assert!(
            counts[0] > 6000,
            "expected best to be selected >60% of the time, got {counts:?}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_random() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = create_rng(42);
        let select = tournament::<f64>(1).unwrap();

        let counts = counts(&pop, 10000, |p| select(p, &mut rng).unwrap());
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_larger_than_population() {
        let pop = make_population(&[1.0, 2.0]);
        let mut rng = create_rng(42);
        let select = tournament::<f64>(50).unwrap();
        for _ in 0..100 {
            assert!(select(&pop, &mut rng).unwrap() < 2);
        }
    }

    #[test]
    fn test_tournament_zero_size_rejected() {
        assert!(matches!(
            tournament::<f64>(0).map(|_| ()),
            Err(GaError::InvalidConfiguration(_))
        ));
        let pop = make_population(&[1.0]);
        assert!(Selection::Tournament(0)
            .select(&pop, &mut create_rng(1))
            .is_err());
    }

    #[test]
    fn test_roulette_is_proportional() {
        let pop = make_population(&[10.0, 30.0, 60.0]);
        let mut rng = create_rng(42);

        let counts = counts(&pop, 10000, |p| roulette(p, &mut rng).unwrap());
        let share: Vec<f64> = counts.iter().map(|&c| c as f64 / 10000.0).collect();
        assert!((share[0] - 0.1).abs() < 0.03, "shares: {share:?}");
        assert!((share[1] - 0.3).abs() < 0.03, "shares: {share:?}");
        assert!((share[2] - 0.6).abs() < 0.03, "shares: {share:?}");
    }

    #[test]
    fn test_roulette_negative_fitness_gets_no_weight() {
        let pop = make_population(&[-50.0, 10.0, -1.0]);
        let mut rng = create_rng(7);

        let counts = counts(&pop, 2000, |p| roulette(p, &mut rng).unwrap());
        assert_eq!(counts[0], 0, "counts: {counts:?}");
        assert_eq!(counts[2], 0, "counts: {counts:?}");
        assert_eq!(counts[1], 2000);
    }

    #[test]
    fn test_roulette_all_zero_falls_back_to_uniform() {
        let pop = make_population(&[0.0, 0.0, 0.0, 0.0]);
        let mut rng = create_rng(42);

        let counts = counts(&pop, 8000, |p| roulette(p, &mut rng).unwrap());
        for &c in &counts {
            assert!(c > 1500, "every member should be reachable: {counts:?}");
        }
    }

    #[test]
    fn test_ranking_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = create_rng(42);

        let counts = counts(&pop, 10000, |p| ranking(p, &mut rng).unwrap());
        // ranks: 1.0 -> 1, 50.0 -> 2, 80.0 -> 3, 100.0 -> 4 (out of 10)
        assert!(counts[0] > counts[3], "counts: {counts:?}");
        assert!(counts[3] > counts[1], "counts: {counts:?}");
        assert!(counts[1] > counts[2], "counts: {counts:?}");
        let best_share = counts[0] as f64 / 10000.0;
        assert!((best_share - 0.4).abs() < 0.03, "best share {best_share}");
    }

    #[test]
    fn test_ranking_ignores_fitness_scale() {
        let small = make_population(&[1.0, 2.0, 3.0]);
        let huge = make_population(&[1.0, 2.0, 3_000_000.0]);

        let mut rng_a = create_rng(11);
        let mut rng_b = create_rng(11);
        for _ in 0..500 {
            assert_eq!(
                ranking(&small, &mut rng_a).unwrap(),
                ranking(&huge, &mut rng_b).unwrap()
            );
        }
    }

    #[test]
    fn test_ranking_puts_nan_last() {
        let pop = make_population(&[f64::NAN, 10.0, -f64::NAN, 5.0]);
        let mut rng = create_rng(42);

        // ranks: both NaN -> 1 and 2 (population order), 5.0 -> 3, 10.0 -> 4
        let counts = counts(&pop, 10000, |p| ranking(p, &mut rng).unwrap());
        assert!(counts[1] > counts[3], "counts: {counts:?}");
        assert!(counts[3] > counts[2], "counts: {counts:?}");
        assert!(counts[2] > counts[0], "counts: {counts:?}");
        let nan_share = (counts[0] + counts[2]) as f64 / 10000.0;
        assert!((nan_share - 0.3).abs() < 0.03, "NaN share {nan_share}");
    }

    #[test]
    fn test_tournament_never_prefers_nan() {
        let pop = make_population(&[f64::NAN, 1.0, -f64::NAN]);
        let select = tournament::<f64>(64).unwrap();
        let mut rng = create_rng(42);
        for _ in 0..200 {
            assert_eq!(select(&pop, &mut rng).unwrap(), 1);
        }
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = create_rng(42);

        assert_eq!(roulette(&pop, &mut rng).unwrap(), 0);
        assert_eq!(ranking(&pop, &mut rng).unwrap(), 0);
        assert_eq!(tournament::<f64>(3).unwrap()(&pop, &mut rng).unwrap(), 0);
    }

    #[test]
    fn test_empty_population_is_an_error() {
        let pop: Vec<Individual<f64>> = vec![];
        let mut rng = create_rng(42);

        assert_eq!(roulette(&pop, &mut rng), Err(GaError::EmptyPopulation));
        assert_eq!(ranking(&pop, &mut rng), Err(GaError::EmptyPopulation));
        assert_eq!(
            tournament::<f64>(3).unwrap()(&pop, &mut rng),
            Err(GaError::EmptyPopulation)
        );
        assert_eq!(
            Selection::Tournament(2).select(&pop, &mut rng),
            Err(GaError::EmptyPopulation)
        );
    }

    #[test]
    fn test_selection_does_not_modify_population() {
        let pop = make_population(&[3.0, 1.0, 2.0]);
        let before = pop.clone();
        let mut rng = create_rng(5);
        for sel in [Selection::Roulette, Selection::Ranking, Selection::Tournament(2)] {
            for _ in 0..10 {
                sel.select(&pop, &mut rng).unwrap();
            }
        }
        assert_eq!(pop, before);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Selection::Roulette.to_string(), "roulette");
        assert_eq!(Selection::Ranking.to_string(), "ranking");
        assert_eq!(Selection::Tournament(3).to_string(), "tournament_3");
        assert_eq!(Selection::default(), Selection::Roulette);
    }
}
