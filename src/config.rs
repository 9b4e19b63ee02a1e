use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{GitHubAssistantError, Result};

/// Largest page size the search API accepts.
pub const MAX_PER_PAGE: u8 = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssistantConfig {
    pub github: GitHubConfig,
    pub pagination: PaginationConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitHubConfig {
    pub username_env_var: String,
    pub token_env_var: String,
    pub api_base_url: String,
    pub user_agent: String,
    pub timeout_seconds: u64,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            username_env_var: "GITHUB_USERNAME".to_string(),
            token_env_var: "GITHUB_TOKEN".to_string(),
            api_base_url: "https://api.github.com".to_string(),
            user_agent: "github-assistant/0.1.0".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl GitHubConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    pub per_page: u8,
    /// Hard ceiling on pages followed for one logical fetch.
    pub max_pages: usize,
    /// Wall-clock budget for one logical fetch, across all pages.
    pub deadline_seconds: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            per_page: MAX_PER_PAGE,
            max_pages: 100,
            deadline_seconds: 300,
        }
    }
}

impl PaginationConfig {
    pub fn page_size(&self) -> u8 {
        self.per_page.clamp(1, MAX_PER_PAGE)
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.deadline_seconds)
    }
}

/// Username and token sent as basic auth on every request.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
        }
    }

    pub fn from_env(config: &GitHubConfig) -> Result<Self> {
        let read = |var: &str| {
            std::env::var(var).map_err(|_| {
                GitHubAssistantError::AuthError(format!("{} environment variable not set", var))
            })
        };

        Ok(Self::new(
            read(&config.username_env_var)?,
            read(&config.token_env_var)?,
        ))
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AssistantConfig::default();
        assert_eq!(config.github.api_base_url, "https://api.github.com");
        assert_eq!(config.github.username_env_var, "GITHUB_USERNAME");
        assert_eq!(config.github.token_env_var, "GITHUB_TOKEN");
        assert_eq!(config.pagination.page_size(), 100);
        assert_eq!(config.pagination.max_pages, 100);
    }

    #[test]
    fn test_page_size_is_clamped() {
        let mut pagination = PaginationConfig::default();
        pagination.per_page = 0;
        assert_eq!(pagination.page_size(), 1);
        pagination.per_page = 250;
        assert_eq!(pagination.page_size(), MAX_PER_PAGE);
    }

    #[test]
    fn test_credentials_debug_redacts_token() {
        let credentials = Credentials::new("octocat", "ghp_secret");
        let printed = format!("{:?}", credentials);
        assert!(printed.contains("octocat"));
        assert!(!printed.contains("ghp_secret"));
    }

    #[test]
    fn test_missing_env_var_is_auth_error() {
        let config = GitHubConfig {
            username_env_var: "GITHUB_ASSISTANT_TEST_UNSET_USER".to_string(),
            token_env_var: "GITHUB_ASSISTANT_TEST_UNSET_TOKEN".to_string(),
            ..Default::default()
        };
        let err = Credentials::from_env(&config).unwrap_err();
        assert!(matches!(err, GitHubAssistantError::AuthError(_)));
    }

    #[test]
    fn test_config_from_json() {
        let config: AssistantConfig = serde_json::from_str(
            r#"{
                "github": {
                    "username_env_var": "GH_USER",
                    "token_env_var": "GH_TOKEN",
                    "api_base_url": "https://ghe.example.com/api/v3",
                    "user_agent": "dash",
                    "timeout_seconds": 5
                },
                "pagination": { "per_page": 50, "max_pages": 3, "deadline_seconds": 10 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.github.timeout(), Duration::from_secs(5));
        assert_eq!(config.pagination.page_size(), 50);
        assert_eq!(config.pagination.deadline(), Duration::from_secs(10));
    }
}
