//! Error types for got
//!
//! Resolution itself never fails recoverably: factories return whatever they
//! return and the container replays it. `GotError` covers configuration
//! loading and carries the message for the fatal downcast invariant.

use std::path::PathBuf;
use thiserror::Error;

use crate::handle::HandleId;

/// Result type alias for got operations
pub type GotResult<T> = Result<T, GotError>;

/// All errors that can occur in got
#[derive(Error, Debug)]
pub enum GotError {
    // Cache invariant
    #[error("Cached value for handle {handle} is not a {expected}")]
    TypeMismatch {
        handle: HandleId,
        expected: &'static str,
    },

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Invalid configuration: {0}")]
    ConfigValue(String),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl GotError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::ConfigInvalid { .. } | Self::ConfigValue(_) => {
                Some("shard_amount must be a power of two greater than 1")
            }
            Self::TypeMismatch { .. } => {
                Some("A custom Constructor returned an id shared with a differently typed handle")
            }
            _ => None,
        }
    }
}
