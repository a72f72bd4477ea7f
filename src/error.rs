//! Error types for path-gen.

use thiserror::Error;

/// Main error type for the library.
#[derive(Error, Debug)]
pub enum Error {
    // Precondition violations
    #[error("Root path must not be empty")]
    EmptyRoot,

    #[error("Invalid extension '{extension}': {message}")]
    InvalidExtension { extension: String, message: String },

    #[error("Key extension '{0}' must not appear among the paired extensions")]
    KeyInPairedSet(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    /// Whether this error is a caller contract violation rather than a
    /// filesystem failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::EmptyRoot | Error::InvalidExtension { .. } | Error::KeyInPairedSet(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;
