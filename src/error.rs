use thiserror::Error;

/// Unified error type for changelog release operations
///
/// Each variant identifies the phase that failed. The orchestrator returns
/// these unchanged so callers can match on the failure point.
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("No changes to record in the changelog")]
    NoChanges,

    #[error("Commit failed with exit code {}", display_code(.code))]
    Commit { code: Option<i32> },

    #[error("Push failed with exit code {}", display_code(.code))]
    Push { code: Option<i32> },

    #[error("Remote call failed with status {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in gitlab-changelog
pub type Result<T> = std::result::Result<T, ChangelogError>;

fn display_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "unknown (terminated by signal)".to_string(),
    }
}

impl ChangelogError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ChangelogError::Config(msg.into())
    }

    /// Create an invalid version error with context
    pub fn invalid_version(msg: impl Into<String>) -> Self {
        ChangelogError::InvalidVersion(msg.into())
    }

    /// Name of the release phase this error belongs to, for user-facing reports.
    pub fn phase(&self) -> &'static str {
        match self {
            ChangelogError::InvalidVersion(_) => "version computation",
            ChangelogError::NoChanges => "changelog update",
            ChangelogError::Commit { .. } => "local commit",
            ChangelogError::Push { .. } => "push",
            ChangelogError::Remote { .. } | ChangelogError::Http(_) | ChangelogError::Json(_) => {
                "remote call"
            }
            ChangelogError::Git(_) => "repository access",
            ChangelogError::Config(_) => "configuration",
            ChangelogError::Io(_) => "file access",
        }
    }
}
