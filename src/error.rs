//! Error types for the simulation core

use thiserror::Error;

/// Failures raised by simulation operations
///
/// These are fatal to the calling operation and signal a data problem
/// upstream. Retrying a PRNG-consuming call is never safe, since every
/// attempt advances the generator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A choice was requested from an empty collection
    #[error("cannot choose from empty {what}")]
    EmptyInput { what: &'static str },
}

/// Failures raised while reading configuration documents
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Document is not valid JSON or does not match the record layout
    #[error("malformed config document: {0}")]
    Json(#[from] serde_json::Error),

    /// Document parsed but breaks a documented constraint
    #[error("invalid {document}: {reason}")]
    Invalid {
        document: &'static str,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(document: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            document,
            reason: reason.into(),
        }
    }
}
