use thiserror::Error;

use crate::domain::typology::errors::EntryKindError;
use crate::domain::typology::errors::TypologyIdError;

/// Error for ActivityId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for ActivityName validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityNameError {
    #[error("Activity name is empty")]
    Empty,

    #[error("Activity name too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for Amount validation failures
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AmountError {
    #[error("Amount must be a positive number, got {0}")]
    NotPositive(f64),
}

/// Error for activity date parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityDateError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    InvalidFormat(String),
}

/// Top-level error for all activity-related operations
#[derive(Debug, Clone, Error)]
pub enum ActivityError {
    #[error("Invalid activity ID: {0}")]
    InvalidActivityId(#[from] ActivityIdError),

    #[error("Invalid activity name: {0}")]
    InvalidName(#[from] ActivityNameError),

    #[error("Invalid amount: {0}")]
    InvalidAmount(#[from] AmountError),

    #[error("Invalid date: {0}")]
    InvalidDate(#[from] ActivityDateError),

    #[error("Invalid kind: {0}")]
    InvalidKind(#[from] EntryKindError),

    #[error("Invalid typology ID: {0}")]
    InvalidTypologyId(#[from] TypologyIdError),

    #[error("Missing required fields: {0}")]
    MissingFields(String),

    // Domain-level errors
    #[error("Activity not found: {0}")]
    NotFound(String),

    #[error("Activity {activity_id} belongs to another user")]
    NotOwner { activity_id: String },

    #[error("Typology does not exist: {0}")]
    UnknownTypology(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for ActivityError {
    fn from(err: anyhow::Error) -> Self {
        ActivityError::Unknown(err.to_string())
    }
}
