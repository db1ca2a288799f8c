use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Counts for one concrete target, summed upward into operation and run
/// totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TargetResult {
    pub success_count: u64,
    pub failed_count: u64,
    pub bytes_freed: u64,
}

impl TargetResult {
    /// One removed item of `bytes` size.
    pub fn success(bytes: u64) -> Self {
        Self {
            success_count: 1,
            failed_count: 0,
            bytes_freed: bytes,
        }
    }

    /// One item that could not be removed.
    pub fn failure() -> Self {
        Self {
            success_count: 0,
            failed_count: 1,
            bytes_freed: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

impl Add for TargetResult {
    type Output = TargetResult;

    fn add(self, rhs: Self) -> Self::Output {
        TargetResult {
            success_count: self.success_count + rhs.success_count,
            failed_count: self.failed_count + rhs.failed_count,
            bytes_freed: self.bytes_freed + rhs.bytes_freed,
        }
    }
}

impl AddAssign for TargetResult {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sum for TargetResult {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TargetResult::default(), Add::add)
    }
}

/// How removed subdirectories are counted in `success_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SubdirAccounting {
    /// A removed subdirectory is one success unit; its subtree bytes are
    /// still added to `bytes_freed`. Matches historical logs.
    #[default]
    Collapsed,
    /// Subdirectories are descended: every file is one unit and each emptied
    /// directory is one more.
    PerEntry,
}

impl fmt::Display for SubdirAccounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubdirAccounting::Collapsed => write!(f, "collapsed"),
            SubdirAccounting::PerEntry => write!(f, "per-entry"),
        }
    }
}

impl FromStr for SubdirAccounting {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "collapsed" => Ok(SubdirAccounting::Collapsed),
            "per-entry" | "per_entry" => Ok(SubdirAccounting::PerEntry),
            _ => Err(ConfigError::InvalidAccounting {
                value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        assert_eq!(
            TargetResult::success(42),
            TargetResult {
                success_count: 1,
                failed_count: 0,
                bytes_freed: 42
            }
        );
        assert_eq!(TargetResult::failure().failed_count, 1);
        assert!(TargetResult::default().is_empty());
    }

    #[test]
    fn test_sum_is_element_wise() {
        let total: TargetResult = [
            TargetResult::success(100),
            TargetResult::failure(),
            TargetResult::success(200),
        ]
        .into_iter()
        .sum();
        assert_eq!(
            total,
            TargetResult {
                success_count: 2,
                failed_count: 1,
                bytes_freed: 300
            }
        );
    }

    #[test]
    fn test_accounting_from_str() {
        assert_eq!(
            "collapsed".parse::<SubdirAccounting>().unwrap(),
            SubdirAccounting::Collapsed
        );
        assert_eq!(
            "Per-Entry".parse::<SubdirAccounting>().unwrap(),
            SubdirAccounting::PerEntry
        );
        let err = "bytes".parse::<SubdirAccounting>().unwrap_err();
        assert!(err.to_string().contains("bytes"));
    }

    #[test]
    fn test_accounting_display_round_trips() {
        for accounting in [SubdirAccounting::Collapsed, SubdirAccounting::PerEntry] {
            assert_eq!(
                accounting.to_string().parse::<SubdirAccounting>().unwrap(),
                accounting
            );
        }
    }
}
