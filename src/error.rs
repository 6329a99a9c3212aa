//! Error types for the CI helper tools.
//!
//! This module defines all error types with actionable error messages and recovery suggestions.
//!
//! The taxonomy mirrors how the tools fail in practice: missing or malformed
//! inputs, filesystem and archiver failures while staging a bundle, and
//! GitHub API failures while listing tags. Semantic-version parse failures
//! are deliberately NOT represented here — the versioner treats them as a
//! soft fallback to its INVALID result record, never as a process failure.

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// Result type alias for release_actions operations
pub type Result<T> = std::result::Result<T, ActionError>;

/// Main error type for all release_actions operations
#[derive(Error, Debug)]
pub enum ActionError {
    /// Input validation errors
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Bundle staging and archiver errors
    #[error("Bundle error: {0}")]
    Bundle(#[from] BundleError),

    /// GitHub API errors
    #[error("GitHub error: {0}")]
    GitHub(#[from] GitHubError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors from anyhow
    #[error("{0}")]
    Anyhow(#[from] anyhow::Error),
}

/// Input validation errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required input was not provided
    #[error("Missing required input: {key}")]
    MissingInput {
        /// Environment variable / flag name
        key: String,
    },

    /// An input was provided but does not have the expected shape
    #[error("Invalid input '{key}': {reason}")]
    InvalidInput {
        /// Environment variable / flag name
        key: String,
        /// Reason for the error
        reason: String,
    },

    /// The archiver binary could not be located on PATH
    #[error("Archiver '{name}' not found on PATH")]
    ArchiverNotFound {
        /// Binary name that was looked up
        name: String,
    },
}

/// Bundle staging and archiver errors
#[derive(Error, Debug)]
pub enum BundleError {
    /// Source binary does not exist
    #[error("Binary not found at {path}")]
    BinaryNotFound {
        /// Path that was checked
        path: PathBuf,
    },

    /// Failed to stage the binary into the versioned prefix
    #[error("Failed to stage binary at {path}: {source}")]
    StagingFailed {
        /// Destination path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// The archiver exited with a non-zero status
    #[error("Archiver failed with {status}: {stderr}")]
    ArchiverFailed {
        /// Exit status of the archiver process
        status: ExitStatus,
        /// Captured stderr from the archiver
        stderr: String,
    },
}

/// GitHub API errors
#[derive(Error, Debug)]
pub enum GitHubError {
    /// Transport-level failure (DNS, TLS, connection refused)
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("GitHub API returned {status} for {url}")]
    Api {
        /// HTTP status code
        status: reqwest::StatusCode,
        /// Request URL
        url: String,
    },
}

impl ActionError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        match self {
            ActionError::Config(ConfigError::MissingInput { key }) => vec![
                format!("Set the {key} environment variable in the workflow step"),
                format!("Or pass it explicitly: --{}", key.to_lowercase()),
            ],
            ActionError::Config(ConfigError::ArchiverNotFound { name }) => vec![
                format!("Install '{name}' or ensure it is on PATH in the runner image"),
            ],
            ActionError::GitHub(GitHubError::Api { status, .. })
                if *status == reqwest::StatusCode::UNAUTHORIZED
                    || *status == reqwest::StatusCode::FORBIDDEN =>
            {
                vec![
                    "Check that GITHUB_TOKEN is set and has read access to the repository"
                        .to_string(),
                    "In a workflow, pass secrets.GITHUB_TOKEN through the step environment"
                        .to_string(),
                ]
            }
            ActionError::GitHub(GitHubError::Request(_)) => vec![
                "Check network access to api.github.com from the runner".to_string(),
            ],
            _ => vec![],
        }
    }
}
