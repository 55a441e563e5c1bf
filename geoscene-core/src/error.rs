//! Error types for geoscene

use thiserror::Error;

/// Main error type for geoscene operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Property error: {0}")]
    Property(String),

    #[error("Scene error: {0}")]
    Scene(String),
}

/// Result type alias for geoscene operations
pub type Result<T> = std::result::Result<T, Error>;
