//! Errors raised at the fallible edges of the pipeline.
//!
//! The numeric core (extraction, synthesis, staging) is total and has no
//! error type; only configuration, counter storage and stroke-file decoding
//! can fail.

use thiserror::Error;

/// A configuration document could not be loaded.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// A field parsed but holds an unusable value.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// The visit counter could not be read or advanced.
#[derive(Debug, Error)]
pub enum CounterError {
    #[error("counter storage failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("counter storage holds a non-numeric value: {0:?}")]
    Corrupt(String),
}

/// A stroke file could not be decoded.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("malformed stroke data: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("stroke data contains no samples")]
    Empty,
    #[error("sample {index} of stroke {stroke} has a non-finite coordinate")]
    NonFinite { stroke: usize, index: usize },
}
