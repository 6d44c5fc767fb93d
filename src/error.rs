//! Error types for the GA engine and its operators.

/// Errors raised by the GA engine and the selection operators.
///
/// All variants are fatal: the engine validates eagerly and never retries.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GaError {
    /// A run or operator parameter is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Selection or best-individual lookup on an empty population.
    #[error("cannot select from empty population")]
    EmptyPopulation,

    /// An injected selection function returned an index outside the population.
    #[error("selection returned index {index} for a population of {population_size}")]
    SelectionOutOfRange {
        index: usize,
        population_size: usize,
    },
}

impl GaError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        GaError::InvalidConfiguration(message.into())
    }
}
