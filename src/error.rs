//! Error types for the backup tool.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for backup operations.
#[derive(Error, Debug)]
pub enum BackupError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GitHub API error: {message}")]
    GitHub { message: String },

    #[error("Failed to run `{command}`: {source}")]
    GitSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({status}): {stderr}")]
    GitCommand {
        command: String,
        status: String,
        stderr: String,
    },

    #[error("Cannot enter directory {path}: {source}")]
    EnterDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BackupError {
    /// Whether the error only affects the repository being synced.
    ///
    /// A git command that ran and failed, or a checkout that cannot be
    /// entered, is recorded against that repository. Anything else (git
    /// missing, IO, the API) ends the run.
    pub fn is_repo_local(&self) -> bool {
        matches!(self, Self::GitCommand { .. } | Self::EnterDir { .. })
    }
}

/// A specialized Result type for backup operations.
pub type Result<T> = std::result::Result<T, BackupError>;
