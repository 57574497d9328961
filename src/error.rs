//! # Error Types
//!
//! Errors surfaced by the decor engine. Only programming and configuration
//! mistakes become errors; conflicts in the live world (occupied cells,
//! stale tags, missing entities) resolve to `None` at the call site.

use crate::engine_state::decor::capability::Capability;

/// Errors raised while building definitions, loading configuration or
/// misusing a definition's capabilities.
#[derive(Debug)]
pub enum DecorError {
    /// A definition failed validation while being built.
    Configuration {
        /// Key of the definition, or `"<unnamed>"` when the key itself was missing.
        key: String,
        reason: String,
    },
    /// Hit-box extents or model offset out of range.
    Geometry(String),
    /// A capability-specific query was made on a definition without that capability.
    Unsupported { key: String, capability: Capability },
    /// Two definitions were registered under the same key.
    DuplicateKey(String),
    /// Reading the engine configuration failed.
    IoError(std::io::Error),
    /// The engine configuration was not valid JSON.
    JsonError(serde_json::Error),
}

impl DecorError {
    pub(crate) fn configuration(key: &str, reason: impl Into<String>) -> Self {
        DecorError::Configuration {
            key: key.to_owned(),
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for DecorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecorError::Configuration { key, reason } => {
                write!(f, "invalid decor definition `{key}`: {reason}")
            }
            DecorError::Geometry(reason) => write!(f, "invalid hit box: {reason}"),
            DecorError::Unsupported { key, capability } => {
                write!(f, "decor `{key}` is not {capability}")
            }
            DecorError::DuplicateKey(key) => write!(f, "decor key `{key}` registered twice"),
            DecorError::IoError(e) => write!(f, "IO error: {e}"),
            DecorError::JsonError(e) => write!(f, "JSON error: {e}"),
        }
    }
}

impl std::error::Error for DecorError {}

impl From<std::io::Error> for DecorError {
    fn from(e: std::io::Error) -> Self {
        DecorError::IoError(e)
    }
}

impl From<serde_json::Error> for DecorError {
    fn from(e: serde_json::Error) -> Self {
        DecorError::JsonError(e)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecorError>;
