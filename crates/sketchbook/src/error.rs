//! Error types for sketchbook.
//!
//! Only the host side can fail: loading configuration, parsing shapes and
//! driving asset state. Stepping springs and bodies never returns an error.

use std::io;

use thiserror::Error;

/// Errors produced by sketchbook operations.
///
/// # Recovery Strategies
///
/// | Error Variant | Recovery Strategy |
/// |--------------|-------------------|
/// | [`Io`](Error::Io) | Check the path and permissions |
/// | [`Toml`](Error::Toml) | Fix the configuration syntax |
/// | [`Json`](Error::Json) | Report as a bug; output is always serializable |
/// | [`InvalidConfig`](Error::InvalidConfig) | Fix the offending value |
/// | [`UnknownSpring`](Error::UnknownSpring) | Check the spring name against the config |
/// | [`PathParse`](Error::PathParse) | Fix the path data at the reported offset |
/// | [`Asset`](Error::Asset) | Indicates a loader driving the gate out of order |
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error while reading configuration.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Configuration file is not valid TOML or does not match the schema.
    #[error("config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration value is out of range.
    #[error("invalid config value for `{field}`: {reason}")]
    InvalidConfig {
        /// Dotted path of the offending field.
        field: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A spring name that the configuration does not define.
    #[error("unknown spring: {0:?}")]
    UnknownSpring(String),

    /// Malformed SVG path data.
    #[error("path parse error at byte {position}: {reason}")]
    PathParse {
        /// Byte offset into the path string.
        position: usize,
        /// What the parser expected.
        reason: String,
    },

    /// An asset readiness transition that is not allowed.
    #[error("asset error: {0}")]
    Asset(String),
}

impl Error {
    pub(crate) fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// A specialized [`Result`] type for sketchbook operations.
pub type Result<T> = std::result::Result<T, Error>;
