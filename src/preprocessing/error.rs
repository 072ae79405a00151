//! Error types for preprocessing operations.

use std::fmt;

/// Error type for preprocessing operations.
#[derive(Debug)]
pub enum PreprocessingError {
    /// Feature dimension mismatch between accumulated state and new input.
    DimensionMismatch { expected: usize, got: usize },
    /// Input contains non-finite values (NaN or infinity).
    NonFiniteInput(String),
    /// Empty data provided where non-empty was required.
    EmptyData(String),
    /// Invalid hyperparameter value.
    InvalidParameter(String),
    /// The transformer does not support inverting the transformation.
    NotInvertible(String),
    /// Serialization or deserialization error.
    SerializationError(String),
    /// I/O error during file operations.
    IoError(String),
}

impl fmt::Display for PreprocessingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PreprocessingError::DimensionMismatch { expected, got } => {
                write!(
                    f,
                    "Dimension mismatch: expected {} features, got {}",
                    expected, got
                )
            }
            PreprocessingError::NonFiniteInput(msg) => {
                write!(f, "Non-finite input: {}", msg)
            }
            PreprocessingError::EmptyData(msg) => {
                write!(f, "Empty data: {}", msg)
            }
            PreprocessingError::InvalidParameter(msg) => {
                write!(f, "Invalid parameter: {}", msg)
            }
            PreprocessingError::NotInvertible(msg) => {
                write!(f, "Not invertible: {}", msg)
            }
            PreprocessingError::SerializationError(msg) => {
                write!(f, "Serialization error: {}", msg)
            }
            PreprocessingError::IoError(msg) => {
                write!(f, "I/O error: {}", msg)
            }
        }
    }
}

impl std::error::Error for PreprocessingError {}

impl From<std::io::Error> for PreprocessingError {
    fn from(err: std::io::Error) -> Self {
        PreprocessingError::IoError(err.to_string())
    }
}

impl From<bincode::Error> for PreprocessingError {
    fn from(err: bincode::Error) -> Self {
        PreprocessingError::SerializationError(err.to_string())
    }
}
