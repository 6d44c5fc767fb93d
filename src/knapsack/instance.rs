//! Knapsack problem instances and their text format.
//!
//! ```text
//! <item count> <capacity>
//! <value> <weight>
//! <value> <weight>
//! ...
//! ```
//!
//! Blank lines and surrounding whitespace are ignored; tokens after the
//! first two on a line are ignored.
//!
//! Counts, capacities, values and weights must be plain non-negative
//! decimal integers. Fractional (`12.5`), negative (`-3`) or suffixed
//! (`7kg`) tokens are rejected rather than truncated to a leading integer.

use std::path::{Path, PathBuf};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One candidate item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    pub value: u64,
    pub weight: u64,
}

impl Item {
    pub fn new(value: u64, weight: u64) -> Self {
        Self { value, weight }
    }

    /// Value per unit of weight.
    ///
    /// Zero-weight items yield `+inf`, whatever their value.
    pub fn ratio(&self) -> f64 {
        if self.weight == 0 {
            return f64::INFINITY;
        }
        self.value as f64 / self.weight as f64
    }
}

/// An immutable 0/1 knapsack instance.
///
/// Gene `i` of a chromosome decides whether `items[i]` is packed.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KnapsackInstance {
    /// Maximum total weight.
    pub capacity: u64,

    /// Items in gene order.
    pub items: Vec<Item>,
}

/// Errors produced while loading an instance.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("instance is empty")]
    Empty,

    #[error("invalid header {line:?}: expected \"<item count> <capacity>\"")]
    InvalidHeader { line: String },

    #[error("invalid item on line {line_number} ({line:?}): expected \"<value> <weight>\"")]
    InvalidItem { line_number: usize, line: String },

    #[error("header declares {declared} items but {found} were found")]
    ItemCountMismatch { declared: usize, found: usize },
}

impl KnapsackInstance {
    pub fn new(capacity: u64, items: Vec<Item>) -> Self {
        Self { capacity, items }
    }

    /// Builds an instance from `(value, weight)` pairs.
    pub fn from_pairs(capacity: u64, pairs: &[(u64, u64)]) -> Self {
        Self::new(
            capacity,
            pairs.iter().map(|&(v, w)| Item::new(v, w)).collect(),
        )
    }

    /// Number of items (and genes).
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Reads and parses an instance file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, InstanceError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InstanceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

impl FromStr for KnapsackInstance {
    type Err = InstanceError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

        let header = lines.next().ok_or(InstanceError::Empty)?;
        let (declared, capacity) =
            parse_pair::<usize, u64>(header).ok_or_else(|| InstanceError::InvalidHeader {
                line: header.to_string(),
            })?;

        let items = lines
            .enumerate()
            .map(|(i, line)| {
                parse_pair::<u64, u64>(line)
                    .map(|(value, weight)| Item::new(value, weight))
                    .ok_or_else(|| InstanceError::InvalidItem {
                        line_number: i + 2,
                        line: line.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        if items.len() != declared {
            return Err(InstanceError::ItemCountMismatch {
                declared,
                found: items.len(),
            });
        }

        Ok(Self::new(capacity, items))
    }
}

fn parse_pair<A: FromStr, B: FromStr>(line: &str) -> Option<(A, B)> {
    let mut tokens = line.split_whitespace();
    let a = tokens.next()?.parse().ok()?;
    let b = tokens.next()?.parse().ok()?;
    Some((a, b))
}
