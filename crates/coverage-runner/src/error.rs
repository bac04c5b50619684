//! Error types for the coverage runner.
//!
//! Uses `thiserror` for typed errors that surface through the whole run:
//! configuration, API fetches, local file access, and the coverage engine.

use coverage_core::ConfigurationError;

/// Errors that can occur while preparing or running an analysis.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Configuration or command-line input is invalid or incomplete.
    #[error("config error: {0}")]
    Config(String),

    /// The Blue Alliance API was unreachable or returned an error.
    #[error("TBA API error: {0}")]
    Tba(String),

    /// Reading or writing local event data failed.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The YAML configuration file could not be parsed.
    #[error("config YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    /// The coverage engine rejected its inputs.
    #[error(transparent)]
    Coverage(#[from] ConfigurationError),
}
