//! Operator and rate comparison experiments on a single instance.
//!
//! [`ExperimentRunner::run`] executes the full sweep and returns an
//! [`ExperimentReport`] holding per-run fitness histories, decoded best
//! solutions and the global best across every run.

mod config;
mod runner;
mod types;

pub use config::ExperimentConfig;
pub use runner::{ExperimentError, ExperimentRunner};
pub use types::{DatasetCategory, DatasetMeta, ExperimentGroup, ExperimentReport, GlobalBest, RunRecord};
