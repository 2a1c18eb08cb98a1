//! Error types and handling infrastructure for swipedeck.
//!
//! This module provides a centralized error handling system using `thiserror` for
//! custom error types. The binary layers `anyhow` on top for context at the edges.
//!
//! ## Design Principles
//!
//! - **Nothing is fatal inside the controller**: navigation errors leave state untouched
//! - **Context preservation**: variants carry the values that caused them
//! - **Consistency**: standardized Result type across all modules

use thiserror::Error;

/// The main error type for swipedeck operations.
///
/// Covers controller misuse, configuration problems and terminal front-end failures.
#[derive(Error, Debug)]
pub enum CarouselError {
    /// `go_to` was asked for an index outside `[0, item_count)`
    #[error("Index {index} is out of range for a carousel of {item_count} items")]
    IndexOutOfRange { index: usize, item_count: usize },

    /// A carousel must hold at least one item
    #[error("Carousel must contain at least one item")]
    EmptyCarousel,

    /// Configuration values that fail validation
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// Configuration file could not be read or parsed
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// File system related errors
    #[error("File operation failed: {message}")]
    FileError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for swipedeck operations.
pub type Result<T> = std::result::Result<T, CarouselError>;

impl CarouselError {
    /// Create an IndexOutOfRange error
    pub fn index_out_of_range(index: usize, item_count: usize) -> Self {
        Self::IndexOutOfRange { index, item_count }
    }

    /// Create an InvalidConfig error with a descriptive message
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a FileError from an io::Error with additional context
    pub fn file_error(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileError {
            message: message.into(),
            source,
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }
}

// Terminal and file failures both surface as io::Error
impl From<std::io::Error> for CarouselError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::FileError {
                message: "File not found".to_string(),
                source: err,
            },
            std::io::ErrorKind::PermissionDenied => Self::FileError {
                message: "Permission denied".to_string(),
                source: err,
            },
            _ => Self::FileError {
                message: "IO operation failed".to_string(),
                source: err,
            },
        }
    }
}
