//! Configuration errors
//!
//! Combat resolution itself never fails; the only fallible surface of the
//! crate is loading and validating the combat constants.

use thiserror::Error;

/// Errors raised while loading or validating [`super::CombatConstants`]
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read constants file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed constants: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{table} critical levels must have ascending cutoffs (found {prev} then {next})")]
    UnsortedCriticalLevels {
        table: &'static str,
        prev: i32,
        next: i32,
    },

    #[error("{table} critical chance range must be positive, got {value}")]
    InvalidChanceRange { table: &'static str, value: i32 },

    #[error("{name} must lie in {min}..={max}, got {value}")]
    OutOfRange {
        name: &'static str,
        value: i32,
        min: i32,
        max: i32,
    },
}

/// Check that a tunable lies within bounds
pub(crate) fn check_range(name: &'static str, value: i32, min: i32, max: i32) -> Result<(), ConfigError> {
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            name,
            value,
            min,
            max,
        });
    }
    Ok(())
}
