//! Error types for the routine_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for routine_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Caller supplied something the engine cannot accept
    /// (unsupported frequency, malformed date, unknown token, bad user id)
    #[error("Validation error: {0}")]
    Validation(String),

    /// A store could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

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
}

impl Error {
    /// True for errors caused by the caller's input
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// True for errors raised while talking to persistence
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            Error::Storage(_) | Error::Io(_) | Error::Json(_) | Error::Csv(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification() {
        assert!(Error::Validation("bad".into()).is_validation());
        assert!(!Error::Validation("bad".into()).is_storage());

        let io = Error::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(io.is_storage());
        assert!(Error::Storage("locked".into()).is_storage());
        assert!(!Error::Config("x".into()).is_storage());
    }
}
