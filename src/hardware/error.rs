//! Track replay error types

use std::fmt;

/// Errors raised while loading a recorded GPS track
#[derive(Debug, Clone, PartialEq)]
pub enum ReplayError {
    /// Track file could not be read
    IoError { path: String, details: String },
    /// Track content is not valid JSON or has the wrong shape
    ParseError { details: String },
    /// A track point lies outside the valid coordinate range
    InvalidPoint { index: usize, field: String, value: f64 },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::IoError { path, details } => {
                write!(f, "Failed to read track '{}': {}", path, details)
            }
            ReplayError::ParseError { details } => {
                write!(f, "Invalid track data: {}", details)
            }
            ReplayError::InvalidPoint { index, field, value } => {
                write!(f, "Track point {} has invalid {}: {}", index, field, value)
            }
        }
    }
}

impl std::error::Error for ReplayError {}

/// Result type for track replay operations
pub type ReplayResult<T> = Result<T, ReplayError>;
