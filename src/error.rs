use thiserror::Error;

/// Unified error type for auto-commit-and-version operations
#[derive(Error, Debug)]
pub enum AutoCommitError {
    #[error("Content is empty: {0}")]
    EmptyContent(String),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("The config file does not contain a version key")]
    MissingVersion,

    #[error("Invalid semantic version: {0}")]
    InvalidVersion(String),

    #[error("Invalid release type: {0}")]
    InvalidReleaseType(String),

    #[error("The command '{command}' failed with exit code {code}: {stderr}")]
    Command {
        command: String,
        code: i32,
        stderr: String,
    },

    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in auto-commit-and-version
pub type Result<T> = std::result::Result<T, AutoCommitError>;

impl AutoCommitError {
    /// Create an empty-content error naming the offending file
    pub fn empty_content(path: impl Into<String>) -> Self {
        AutoCommitError::EmptyContent(path.into())
    }

    /// Create an invalid-version error carrying the rejected value
    pub fn invalid_version(value: impl Into<String>) -> Self {
        AutoCommitError::InvalidVersion(value.into())
    }

    /// Create an invalid-release-type error carrying the rejected value
    pub fn invalid_release_type(value: impl Into<String>) -> Self {
        AutoCommitError::InvalidReleaseType(value.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutoCommitError::Config(msg.into())
    }

    /// Create a failed-command error
    pub fn command(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        AutoCommitError::Command {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }
}
