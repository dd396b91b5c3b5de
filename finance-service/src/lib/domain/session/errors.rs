use thiserror::Error;

/// Error for session store operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session storage error: {0}")]
    Storage(String),
}
