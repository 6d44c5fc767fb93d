//! Experiment sweep execution.
//!
//! Runs four groups against one instance, always with the feasible
//! chromosome factory and repair:
//!
//! 1. `mutation_crossover_grid`: roulette + one-point over every
//!    `(mutation, crossover)` pair of the grid
//! 2. `selection_comparison`: roulette vs ranking
//! 3. `crossover_comparison`: one-point vs two-point
//! 4. `selection_comparison_with_tournament`: roulette, ranking, tournament-3

use super::config::ExperimentConfig;
use super::types::{DatasetMeta, ExperimentGroup, ExperimentReport, RunRecord};
use crate::error::GaError;
use crate::ga::{Crossover, GaRunner, Selection};
use crate::knapsack::KnapsackInstance;
use tracing::instrument;

/// Errors produced by an experiment sweep.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExperimentError {
    #[error(transparent)]
    Config(#[from] GaError),

    #[error("run {group}/{run_id} failed: {source}")]
    Run {
        group: String,
        run_id: String,
        #[source]
        source: GaError,
    },
}

/// One planned run.
#[derive(Debug, Clone)]
struct RunPlan {
    id: String,
    selection: Selection,
    crossover: Crossover,
    mutation_rate: f64,
    crossover_rate: f64,
}

impl RunPlan {
    fn new(id: String, selection: Selection, crossover: Crossover, mutation_rate: f64, crossover_rate: f64) -> Self {
        Self {
            id,
            selection,
            crossover,
            mutation_rate,
            crossover_rate,
        }
    }
}

struct GroupPlan {
    name: &'static str,
    description: &'static str,
    runs: Vec<RunPlan>,
}

/// Executes the experiment sweep.
pub struct ExperimentRunner;

impl ExperimentRunner {
    /// Runs every group against `instance` and assembles the report.
    ///
    /// `dataset_path` only feeds the report's dataset metadata.
    ///
    /// # Errors
    /// [`ExperimentError::Config`] before any run starts if a planned
    /// configuration is invalid; [`ExperimentError::Run`] if a run fails.
    #[instrument(skip_all, fields(dataset = dataset_path, items = instance.item_count()))]
    pub fn run(
        instance: &KnapsackInstance,
        dataset_path: &str,
        config: &ExperimentConfig,
    ) -> Result<ExperimentReport, ExperimentError> {
        config.validate(instance.item_count())?;

        let plans = plan(config);
        let total: usize = plans.iter().map(|g| g.runs.len()).sum();
        tracing::info!(groups = plans.len(), runs = total, "starting experiment sweep");

        let mut run_index = 0u64;
        let mut groups = Vec::with_capacity(plans.len());
        for group in plans {
            let mut runs = Vec::with_capacity(group.runs.len());
            for run in group.runs {
                let seed = config.seed.map(|s| s.wrapping_add(run_index));
                run_index += 1;

                let record = execute(instance, config, &run, seed).map_err(|source| ExperimentError::Run {
                    group: group.name.to_string(),
                    run_id: run.id.clone(),
                    source,
                })?;

                tracing::info!(
                    group = group.name,
                    run = %record.id,
                    best_fitness = record.final_best_fitness,
                    generations = record.generations,
                    "run finished"
                );
                runs.push(record);
            }
            groups.push(ExperimentGroup {
                name: group.name.to_string(),
                description: group.description.to_string(),
                runs,
            });
        }

        let report = ExperimentReport::new(DatasetMeta::new(dataset_path, instance), config.clone(), groups);
        if let Some(best) = &report.global_best {
            tracing::info!(
                group = %best.group,
                run = %best.run.id,
                best_fitness = best.run.final_best_fitness,
                "experiment sweep finished"
            );
        }
        Ok(report)
    }
}

fn plan(config: &ExperimentConfig) -> Vec<GroupPlan> {
    let (m, c) = (config.mutation_rate, config.crossover_rate);

    let grid = config
        .mutation_rates
        .iter()
        .flat_map(|&mr| {
            config.crossover_rates.iter().map(move |&cr| {
                RunPlan::new(
                    format!("mut_{mr}_cross_{cr}"),
                    Selection::Roulette,
                    Crossover::OnePoint,
                    mr,
                    cr,
                )
            })
        })
        .collect();

    let by_selection = |selections: &[Selection]| -> Vec<RunPlan> {
        selections
            .iter()
            .map(|&s| RunPlan::new(format!("selection_{s}"), s, Crossover::OnePoint, m, c))
            .collect()
    };

    let by_crossover = [Crossover::OnePoint, Crossover::TwoPoint]
        .into_iter()
        .map(|x| RunPlan::new(format!("crossover_{x}"), Selection::Roulette, x, m, c))
        .collect();

    vec![
        GroupPlan {
            name: "mutation_crossover_grid",
            description: "Roulette selection and one-point crossover over the mutation and crossover rate grid",
            runs: grid,
        },
        GroupPlan {
            name: "selection_comparison",
            description: "Roulette vs ranking selection at the base rates, one-point crossover",
            runs: by_selection(&[Selection::Roulette, Selection::Ranking]),
        },
        GroupPlan {
            name: "crossover_comparison",
            description: "One-point vs two-point crossover at the base rates, roulette selection",
            runs: by_crossover,
        },
        GroupPlan {
            name: "selection_comparison_with_tournament",
            description: "Roulette, ranking and tournament (k = 3) selection at the base rates, one-point crossover",
            runs: by_selection(&[Selection::Roulette, Selection::Ranking, Selection::Tournament(3)]),
        },
    ]
}

fn execute(
    instance: &KnapsackInstance,
    config: &ExperimentConfig,
    run: &RunPlan,
    seed: Option<u64>,
) -> Result<RunRecord, GaError> {
    let operators = instance.operators(run.selection, run.crossover)?;
    let ga_config = config.ga_config(instance.item_count(), run.mutation_rate, run.crossover_rate, seed);
    let result = GaRunner::run(&ga_config, &operators)?;

    Ok(RunRecord {
        id: run.id.clone(),
        selection: run.selection.to_string(),
        crossover: run.crossover.to_string(),
        mutation_rate: run.mutation_rate,
        crossover_rate: run.crossover_rate,
        final_best_fitness: result.best_fitness,
        generations: result.generations,
        best_solution: instance.decode(&result.best.chromosome),
        fitness_history: result.fitness_history,
    })
}
