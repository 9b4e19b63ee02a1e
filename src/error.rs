use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitHubAssistantError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("GitHub API returned {status} for {url}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Pagination stopped after {pages} pages without reaching the last page")]
    PageLimitExceeded { pages: usize },

    #[error("Fetch deadline exceeded after {elapsed:?}")]
    DeadlineExceeded { elapsed: Duration },

    #[error("Authentication error: {0}")]
    AuthError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl GitHubAssistantError {
    /// HTTP status carried by a protocol error, if any.
    pub fn status(&self) -> Option<reqwest::StatusCode> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, GitHubAssistantError>;
