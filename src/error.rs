//! Typed errors for data acquisition and filtering.

use chrono::NaiveDate;
use thiserror::Error;

/// Failure while loading or writing the call record table.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid {field} '{value}'")]
    InvalidValue {
        line: u64,
        field: &'static str,
        value: String,
    },

    #[error("line {line}: {field} {value} is outside [{min}, {max}]")]
    OutOfRange {
        line: u64,
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("agent {agent_id} appears as '{first}' and '{second}'")]
    InconsistentAgent {
        agent_id: String,
        first: String,
        second: String,
    },

    #[error("line {line}: agent name '{name}' is used by both {first_id} and {second_id}")]
    SharedAgentName {
        line: u64,
        name: String,
        first_id: String,
        second_id: String,
    },

    #[error("invalid generator settings: {0}")]
    InvalidSettings(String),

    #[error("data source contains no records")]
    Empty,
}

/// Filter selection that cannot be applied to the loaded table.
#[derive(Error, Debug, PartialEq)]
pub enum FilterError {
    #[error("date range is inverted: {from} is after {to}")]
    InvertedRange { from: NaiveDate, to: NaiveDate },

    #[error("unknown agent '{name}' (available: {available})")]
    UnknownAgent { name: String, available: String },
}
