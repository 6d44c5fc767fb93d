//! Experiment report types.

use super::config::ExperimentConfig;
use crate::knapsack::{KnapsackInstance, Solution};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Benchmark family an instance file belongs to, inferred from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DatasetCategory {
    #[cfg_attr(feature = "serde", serde(rename = "low-dimensional"))]
    LowDimensional,
    #[cfg_attr(feature = "serde", serde(rename = "large_scale"))]
    LargeScale,
    #[cfg_attr(feature = "serde", serde(rename = "high-dimensional"))]
    HighDimensional,
    #[cfg_attr(feature = "serde", serde(rename = "unknown"))]
    Unknown,
}

impl DatasetCategory {
    /// First of `low-dimensional`, `large_scale`, `high-dimensional` that
    /// occurs anywhere in the path.
    pub fn from_path(path: &str) -> Self {
        if path.contains("low-dimensional") {
            Self::LowDimensional
        } else if path.contains("large_scale") {
            Self::LargeScale
        } else if path.contains("high-dimensional") {
            Self::HighDimensional
        } else {
            Self::Unknown
        }
    }
}

impl fmt::Display for DatasetCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LowDimensional => "low-dimensional",
            Self::LargeScale => "large_scale",
            Self::HighDimensional => "high-dimensional",
            Self::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Where the instance came from and how big it is.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DatasetMeta {
    pub instance_path: String,
    pub file_name: String,

    /// File name without its last extension; names the report file.
    pub base_name: String,
    pub category: DatasetCategory,
    pub item_count: usize,
    pub capacity: u64,
}

impl DatasetMeta {
    /// Describes `instance`, loaded from `path`.
    ///
    /// Both `/` and `\` separate path components.
    pub fn new(path: &str, instance: &KnapsackInstance) -> Self {
        let file_name = path
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or(path);
        let base_name = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !ext.is_empty() => stem,
            _ => file_name,
        };

        Self {
            instance_path: path.to_string(),
            file_name: file_name.to_string(),
            base_name: base_name.to_string(),
            category: DatasetCategory::from_path(path),
            item_count: instance.item_count(),
            capacity: instance.capacity,
        }
    }
}

/// One GA run inside a group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunRecord {
    /// Unique within its group, e.g. `mut_0.02_cross_0.8`.
    pub id: String,
    pub selection: String,
    pub crossover: String,
    pub mutation_rate: f64,
    pub crossover_rate: f64,
    pub fitness_history: Vec<u64>,
    pub final_best_fitness: u64,
    pub generations: usize,
    pub best_solution: Solution,
}

/// A set of runs compared against each other.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentGroup {
    pub name: String,
    pub description: String,
    pub runs: Vec<RunRecord>,
}

/// Best run across every group.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GlobalBest {
    pub group: String,
    pub run: RunRecord,
}

/// Everything produced by one experiment sweep.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExperimentReport {
    pub dataset: DatasetMeta,
    pub config: ExperimentConfig,
    pub groups: Vec<ExperimentGroup>,
    pub global_best: Option<GlobalBest>,
}

impl ExperimentReport {
    /// Assembles a report, picking the global best (earliest run wins ties).
    pub fn new(dataset: DatasetMeta, config: ExperimentConfig, groups: Vec<ExperimentGroup>) -> Self {
        let mut global_best: Option<(&ExperimentGroup, &RunRecord)> = None;
        for group in &groups {
            for run in &group.runs {
                let better = match global_best {
                    Some((_, best)) => run.final_best_fitness > best.final_best_fitness,
                    None => true,
                };
                if better {
                    global_best = Some((group, run));
                }
            }
        }
        let global_best = global_best.map(|(group, run)| GlobalBest {
            group: group.name.clone(),
            run: run.clone(),
        });

        Self {
            dataset,
            config,
            groups,
            global_best,
        }
    }

    /// Total number of runs across all groups.
    pub fn run_count(&self) -> usize {
        self.groups.iter().map(|g| g.runs.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: &str, fitness: u64) -> RunRecord {
        RunRecord {
            id: id.to_string(),
            selection: "roulette".to_string(),
            crossover: "one_point".to_string(),
            mutation_rate: 0.01,
            crossover_rate: 0.8,
            fitness_history: vec![fitness],
            final_best_fitness: fitness,
            generations: 0,
            best_solution: KnapsackInstance::from_pairs(1, &[]).decode(&[]),
        }
    }

    fn group(name: &str, runs: Vec<RunRecord>) -> ExperimentGroup {
        ExperimentGroup {
            name: name.to_string(),
            description: String::new(),
            runs,
        }
    }

    fn meta() -> DatasetMeta {
        DatasetMeta::new("f1.txt", &KnapsackInstance::from_pairs(1, &[]))
    }

    #[test]
    fn test_category_from_path() {
        assert_eq!(
            DatasetCategory::from_path("data/low-dimensional/f1_l-d_kp_10_269"),
            DatasetCategory::LowDimensional
        );
        assert_eq!(
            DatasetCategory::from_path("data\\large_scale\\knapPI_1_100_1000_1"),
            DatasetCategory::LargeScale
        );
        assert_eq!(
            DatasetCategory::from_path("high-dimensional/x.txt"),
            DatasetCategory::HighDimensional
        );
        assert_eq!(DatasetCategory::from_path("mine.txt"), DatasetCategory::Unknown);
        assert_eq!(DatasetCategory::LargeScale.to_string(), "large_scale");
    }

    #[test]
    fn test_dataset_meta_names() {
        let inst = KnapsackInstance::from_pairs(269, &[(55, 95), (10, 4)]);

        let meta = DatasetMeta::new("data/low-dimensional/f1_l-d_kp_10_269", &inst);
        assert_eq!(meta.file_name, "f1_l-d_kp_10_269");
        assert_eq!(meta.base_name, "f1_l-d_kp_10_269");
        assert_eq!(meta.item_count, 2);
        assert_eq!(meta.capacity, 269);

        let meta = DatasetMeta::new("C:\\data\\knap.v2.txt", &inst);
        assert_eq!(meta.file_name, "knap.v2.txt");
        assert_eq!(meta.base_name, "knap.v2");
        assert_eq!(meta.category, DatasetCategory::Unknown);
    }

    #[test]
    fn test_global_best_first_wins_ties() {
        let groups = vec![
            group("a", vec![record("a1", 5), record("a2", 9)]),
            group("b", vec![record("b1", 9), record("b2", 3)]),
        ];
        let report = ExperimentReport::new(meta(), ExperimentConfig::default(), groups);
        let best = report.global_best.unwrap();
        assert_eq!(best.group, "a");
        assert_eq!(best.run.id, "a2");
    }

    #[test]
    fn test_global_best_empty() {
        let report = ExperimentReport::new(meta(), ExperimentConfig::default(), vec![group("a", vec![])]);
        assert!(report.global_best.is_none());
        assert_eq!(report.run_count(), 0);
    }
}
