use thiserror::Error;

use crate::validation::ValidationErrors;

/// Main error type for the candidate registry
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Database errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Search was called with an absent, empty or whitespace-only query
    #[error("Search query is required")]
    MissingQuery,

    /// One or more fields failed validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    /// No candidate with this id
    #[error("Candidate {0} not found")]
    NotFound(i64),

    /// Invalid runtime configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl RegistryError {
    /// Whether the caller, not the service, is at fault
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RegistryError::MissingQuery | RegistryError::Validation(_) | RegistryError::NotFound(_)
        )
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, RegistryError>;
