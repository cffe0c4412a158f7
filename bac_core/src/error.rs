//! Error types for the bac_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for bac_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Catalog validation error
    #[error("Catalog validation error: {0}")]
    CatalogValidation(String),

    /// A form field was missing, non-numeric or out of range
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A drink count referenced an id that is not in the catalog
    #[error("Unknown drink: {0}")]
    UnknownDrink(String),
}

impl Error {
    /// Shorthand for an [`Error::InvalidInput`] naming the offending field.
    pub fn invalid(field: &str, reason: impl std::fmt::Display) -> Self {
        Error::InvalidInput(format!("{}: {}", field, reason))
    }
}
