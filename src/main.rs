//! u-knapsack: genetic algorithm solver for 0/1 knapsack instances.
//!
//! - `solve`: a single GA run from a size-based preset, with operators and
//!   rates overridable on the command line
//! - `experiments`: the operator/rate comparison sweep, written as a JSON report

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use u_knapsack::experiment::{ExperimentConfig, ExperimentError, ExperimentRunner};
use u_knapsack::ga::{Crossover, GaConfig, GaRunner, Selection};
use u_knapsack::knapsack::{InstanceError, KnapsackInstance};
use u_knapsack::GaError;

#[derive(Parser)]
#[command(name = "u-knapsack")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Solve one instance with a single GA run
    Solve(SolveArgs),
    /// Run the operator and rate comparison sweep and write a JSON report
    Experiments(ExperimentArgs),
}

#[derive(Args)]
struct SolveArgs {
    /// Instance file: "<item count> <capacity>" then one "<value> <weight>" line per item
    instance: PathBuf,

    /// Base settings; `auto` picks a preset from the item count
    #[arg(long, value_enum, default_value_t = Preset::Auto)]
    preset: Preset,

    #[arg(long)]
    population_size: Option<usize>,

    #[arg(long)]
    generations: Option<usize>,

    #[arg(long)]
    crossover_rate: Option<f64>,

    /// Per-gene flip probability
    #[arg(long)]
    mutation_rate: Option<f64>,

    /// Individuals carried over unchanged each generation
    #[arg(long)]
    elitism: Option<usize>,

    #[arg(long, value_enum, default_value_t = SelectionKind::Roulette)]
    selection: SelectionKind,

    /// Only used with `--selection tournament`
    #[arg(long, default_value_t = 3)]
    tournament_size: usize,

    #[arg(long, value_enum, default_value_t = CrossoverKind::OnePoint)]
    crossover: CrossoverKind,

    /// Stop after this many generations without improvement
    #[arg(long, value_name = "N", conflicts_with = "no_stall_limit")]
    max_stall: Option<usize>,

    /// Run every generation even if the preset sets a stall limit
    #[arg(long)]
    no_stall_limit: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Start from uniform random chromosomes and skip repair
    #[arg(long)]
    no_repair: bool,
}

#[derive(Args)]
struct ExperimentArgs {
    instance: PathBuf,

    /// Directory for the `<instance name>.json` report
    #[arg(short, long, value_name = "DIR", default_value = "results")]
    output: PathBuf,

    #[arg(long)]
    generations: Option<usize>,

    #[arg(long)]
    population_size: Option<usize>,

    /// Base seed; each run uses `seed + run index`
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Clone, Copy, Debug, PartialEq, ValueEnum)]
enum Preset {
    Auto,
    Fast,
    Balanced,
    Quality,
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectionKind {
    Roulette,
    Ranking,
    Tournament,
}

#[derive(Clone, Copy, ValueEnum)]
enum CrossoverKind {
    OnePoint,
    TwoPoint,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(transparent)]
    Experiment(#[from] ExperimentError),

    #[error(transparent)]
    Ga(#[from] GaError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

/// Preset settings for `item_count` genes, overridden by explicit flags.
fn solve_config(args: &SolveArgs, item_count: usize) -> GaConfig {
    let mut config = match args.preset {
        Preset::Auto => GaConfig::auto_select(item_count),
        Preset::Fast => GaConfig::fast(item_count),
        Preset::Balanced => GaConfig::balanced(item_count),
        Preset::Quality => GaConfig::quality(item_count),
    };

    // Unclamped: out-of-range rates must fail validation
    if let Some(n) = args.population_size {
        config.population_size = n;
    }
    if let Some(n) = args.generations {
        config.num_generations = n;
    }
    if let Some(rate) = args.crossover_rate {
        config.crossover_rate = rate;
    }
    if let Some(rate) = args.mutation_rate {
        config.mutation_rate = rate;
    }
    if let Some(n) = args.elitism {
        config.elitism_count = n;
    }
    if args.no_stall_limit {
        config.max_stall_generations = None;
    } else if let Some(n) = args.max_stall {
        config.max_stall_generations = Some(n);
    }
    config.seed = args.seed;
    config
}

fn solve(args: SolveArgs) -> Result<(), CliError> {
    let instance = KnapsackInstance::load(&args.instance)?;

    let selection = match args.selection {
        SelectionKind::Roulette => Selection::Roulette,
        SelectionKind::Ranking => Selection::Ranking,
        SelectionKind::Tournament => Selection::Tournament(args.tournament_size),
    };
    let crossover = match args.crossover {
        CrossoverKind::OnePoint => Crossover::OnePoint,
        CrossoverKind::TwoPoint => Crossover::TwoPoint,
    };
    let operators = if args.no_repair {
        instance.unrepaired_operators(selection, crossover)?
    } else {
        instance.operators(selection, crossover)?
    };

    let config = solve_config(&args, instance.item_count());
    let result = GaRunner::run(&config, &operators)?;
    let solution = instance.decode(&result.best.chromosome);

    println!("instance:    {}", args.instance.display());
    println!("operators:   {selection} / {crossover}");
    println!("generations: {}{}", result.generations, if result.stagnated { " (stalled)" } else { "" });
    println!("best value:  {}", result.best_fitness);
    println!("weight:      {} / {}", solution.total_weight, solution.capacity);
    println!("items:       {:?}", solution.chosen_items);
    Ok(())
}

fn experiments(args: ExperimentArgs) -> Result<(), CliError> {
    let instance = KnapsackInstance::load(&args.instance)?;

    let mut config = ExperimentConfig::default();
    if let Some(n) = args.population_size {
        config = config.with_population_size(n);
    }
    if let Some(n) = args.generations {
        config = config.with_num_generations(n);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let report = ExperimentRunner::run(&instance, &args.instance.to_string_lossy(), &config)?;

    let path = args.output.join(format!("{}.json", report.dataset.base_name));
    let write_error = |source: std::io::Error| CliError::Write {
        path: path.clone(),
        source,
    };
    create_dir_all(&args.output).map_err(write_error)?;
    let file = File::create(&path).map_err(write_error)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writer.flush().map_err(write_error)?;

    println!("report:      {}", path.display());
    if let Some(best) = &report.global_best {
        println!("global best: {} ({} / {})", best.run.final_best_fitness, best.group, best.run.id);
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let outcome = match cli.command {
        Command::Solve(args) => solve(args),
        Command::Experiments(args) => experiments(args),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solve_args(extra: &[&str]) -> SolveArgs {
        let argv = ["u-knapsack", "solve", "instance.txt"].into_iter().chain(extra.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Solve(args) => args,
            Command::Experiments(_) => panic!("expected solve"),
        }
    }

    #[test]
    fn test_default_preset_follows_item_count() {
        let args = solve_args(&[]);
        assert_eq!(args.preset, Preset::Auto);
        assert_eq!(solve_config(&args, 20), GaConfig::fast(20));
        assert_eq!(solve_config(&args, 100), GaConfig::balanced(100));
        assert_eq!(solve_config(&args, 500), GaConfig::quality(500));
    }

    #[test]
    fn test_named_preset() {
        let args = solve_args(&["--preset", "quality"]);
        assert_eq!(solve_config(&args, 10), GaConfig::quality(10));
    }

    #[test]
    fn test_flags_override_preset() {
        let args = solve_args(&[
            "--preset",
            "fast",
            "--population-size",
            "12",
            "--generations",
            "7",
            "--mutation-rate",
            "0.2",
            "--elitism",
            "2",
            "--max-stall",
            "3",
            "--seed",
            "9",
        ]);
        let expected = GaConfig::fast(30)
            .with_population_size(12)
            .with_num_generations(7)
            .with_mutation_rate(0.2)
            .with_elitism_count(2)
            .with_max_stall_generations(3)
            .with_seed(9);
        assert_eq!(solve_config(&args, 30), expected);
    }

    #[test]
    fn test_no_stall_limit_clears_preset_limit() {
        let config = solve_config(&solve_args(&["--no-stall-limit"]), 20);
        assert_eq!(config.max_stall_generations, None);
        assert_eq!(config.population_size, GaConfig::fast(20).population_size);

        let conflicting = ["u-knapsack", "solve", "x.txt", "--no-stall-limit", "--max-stall", "4"];
        assert!(Cli::try_parse_from(conflicting).is_err());
    }

    #[test]
    fn test_out_of_range_rate_is_not_clamped() {
        let config = solve_config(&solve_args(&["--crossover-rate", "1.5"]), 20);
        assert_eq!(config.crossover_rate, 1.5);
        assert!(config.validate().is_err());
    }
}
