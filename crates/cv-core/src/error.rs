//! Viewer error type.
//!
//! Sub-crates define their own error enums for their own failure modes; this
//! one covers configuration and input parsing shared by all of them.

use thiserror::Error;

/// The top-level error type for `cv-core`.
#[derive(Debug, Error)]
pub enum CvError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Shorthand result type for `cv-core`.
pub type CvResult<T> = Result<T, CvError>;
