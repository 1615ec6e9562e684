//! records/types.rs
//! State record entity and its containment invariants.
//!
//! Design notes:
//! - Fields are private; every constructor and mutator validates first and
//!   commits second, so a record can never be observed in a violating state.
//! - Counts are `i32` to match the 4-byte signed wire fields.
//! - The poverty percentage is derived on demand and never stored.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::constants::PERCENT_SCALE;

/// Record-level invariant failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// A count (or the state code) is below zero.
    #[error("{field} must be non-negative, got {value}")]
    Negative { field: &'static str, value: i32 },

    /// Adding counts would leave the i32 range of the wire format.
    #[error("{field} overflows a 32-bit count")]
    Overflow { field: &'static str },

    /// Child population exceeds total, or child poverty exceeds child population.
    #[error(
        "resulting child population or child poverty population would exceed its \
         enclosing population (total {total}, child {child}, child poverty {poverty})"
    )]
    Containment { total: i32, child: i32, poverty: i32 },

    /// Merge attempted across two different states.
    #[error("cannot merge state {actual} into state {expected}")]
    StateMismatch { expected: i32, actual: i32 },
}

/// Per-state (or per-district, before aggregation) population counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StateRecord {
    state_code: i32,
    total_population: i32,
    child_population: i32,
    child_poverty_population: i32,
}

impl StateRecord {
    /// Build a record, validating sign and both containment invariants.
    pub fn new(
        state_code: i32,
        total_population: i32,
        child_population: i32,
        child_poverty_population: i32,
    ) -> Result<Self, RecordError> {
        if state_code < 0 {
            return Err(RecordError::Negative { field: "state_code", value: state_code });
        }
        validate_counts(total_population, child_population, child_poverty_population)?;

        Ok(Self {
            state_code,
            total_population,
            child_population,
            child_poverty_population,
        })
    }

    pub fn state_code(&self) -> i32 {
        self.state_code
    }

    pub fn total_population(&self) -> i32 {
        self.total_population
    }

    pub fn child_population(&self) -> i32 {
        self.child_population
    }

    pub fn child_poverty_population(&self) -> i32 {
        self.child_poverty_population
    }

    /// `100 * poverty / child`.
    ///
    /// Returns `NaN` when the child population is zero (IEEE `0 / 0`).
    pub fn child_poverty_percentage(&self) -> f64 {
        poverty_percentage(self.child_population, self.child_poverty_population)
    }

    /// Same as [`child_poverty_percentage`](Self::child_poverty_percentage) but
    /// `None` instead of `NaN` for an empty child population.
    pub fn checked_child_poverty_percentage(&self) -> Option<f64> {
        (self.child_population != 0).then(|| self.child_poverty_percentage())
    }

    /// Add raw counts into this record.
    ///
    /// The sums are validated before anything is written; on error the record
    /// is left exactly as it was.
    pub fn add_populations(
        &mut self,
        total_population: i32,
        child_population: i32,
        child_poverty_population: i32,
    ) -> Result<(), RecordError> {
        let total = checked_sum("total_population", self.total_population, total_population)?;
        let child = checked_sum("child_population", self.child_population, child_population)?;
        let poverty = checked_sum(
            "child_poverty_population",
            self.child_poverty_population,
            child_poverty_population,
        )?;

        validate_counts(total, child, poverty)?;

        self.total_population = total;
        self.child_population = child;
        self.child_poverty_population = poverty;
        Ok(())
    }

    /// Merge another record of the same state into this one.
    pub fn merge(&mut self, other: &StateRecord) -> Result<(), RecordError> {
        if other.state_code != self.state_code {
            return Err(RecordError::StateMismatch {
                expected: self.state_code,
                actual: other.state_code,
            });
        }
        self.add_populations(
            other.total_population,
            other.child_population,
            other.child_poverty_population,
        )
    }
}

impl fmt::Display for StateRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {} {}",
            self.state_code,
            self.total_population,
            self.child_population,
            self.child_poverty_population,
            self.child_poverty_percentage()
        )
    }
}

/// Sign and containment checks shared by construction and merge.
pub fn validate_counts(total: i32, child: i32, poverty: i32) -> Result<(), RecordError> {
    for (field, value) in [
        ("total_population", total),
        ("child_population", child),
        ("child_poverty_population", poverty),
    ] {
        if value < 0 {
            return Err(RecordError::Negative { field, value });
        }
    }

    if child > total || poverty > child {
        return Err(RecordError::Containment { total, child, poverty });
    }
    Ok(())
}

/// Shared percentage formula (also used when inspecting decoded rows).
pub fn poverty_percentage(child: i32, poverty: i32) -> f64 {
    PERCENT_SCALE * f64::from(poverty) / f64::from(child)
}

fn checked_sum(field: &'static str, current: i32, delta: i32) -> Result<i32, RecordError> {
    current.checked_add(delta).ok_or(RecordError::Overflow { field })
}
