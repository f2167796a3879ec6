//! Error handling for fixture generation

use std::io;
use thiserror::Error;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, FixtureError>;

/// Main error type for fixture generation
#[derive(Error, Debug)]
pub enum FixtureError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Writing an .npy file failed
    #[error("NPY write error: {0}")]
    Npy(#[from] ndarray_npy::WriteNpyError),

    /// Sample data could not be arranged into the requested shape
    #[error("Shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),

    /// Sample synthesis error
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Generic error with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FixtureError {
    /// Create an error with additional context
    pub fn with_context<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::WithContext {
            context: context.into(),
            source: Box::new(error),
        }
    }

    pub fn synthesis(msg: impl Into<String>) -> Self {
        Self::Synthesis(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
