use thiserror::Error;

/// Error for TypologyId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TypologyIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for EntryKind parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EntryKindError {
    #[error("Unknown kind '{0}', expected 'income' or 'expense'")]
    Unknown(String),
}

/// Top-level error for typology operations
#[derive(Debug, Clone, Error)]
pub enum TypologyError {
    #[error("Invalid typology ID: {0}")]
    InvalidTypologyId(#[from] TypologyIdError),

    #[error("Invalid kind: {0}")]
    InvalidKind(#[from] EntryKindError),

    #[error("Typology not found: {0}")]
    NotFound(String),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TypologyError {
    fn from(err: anyhow::Error) -> Self {
        TypologyError::Unknown(err.to_string())
    }
}
