pub mod client;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod filters;
pub mod link;
pub mod types;

pub use client::GitHubClient;
pub use config::{AssistantConfig, Credentials, GitHubConfig, PaginationConfig};
pub use dashboard::{render_comments, render_item_details, Dashboard, DashboardSummary, View};
pub use error::{GitHubAssistantError, Result};
pub use filters::{closed_items, open_items, CommentFilter, IssueState, ItemFilters};
pub use link::next_page_url;
pub use types::{
    decompose_resource_url, CommentThread, GitHubComment, GitHubItem, ItemState, ResultSet,
    SearchPredicate, SearchRole,
};

/// Entry point bound to one set of credentials.
pub struct GitHubAssistant {
    client: GitHubClient,
}

impl GitHubAssistant {
    /// Reads the username and token from the default environment variables.
    pub fn from_env() -> Result<Self> {
        Self::with_config(AssistantConfig::default())
    }

    pub fn with_config(config: AssistantConfig) -> Result<Self> {
        let credentials = Credentials::from_env(&config.github)?;
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(config: AssistantConfig, credentials: Credentials) -> Result<Self> {
        let client = GitHubClient::with_config(config, credentials)?;
        Ok(Self { client })
    }

    pub fn client(&self) -> &GitHubClient {
        &self.client
    }

    pub fn username(&self) -> &str {
        &self.client.credentials().username
    }

    pub async fn fetch_issues(&self) -> Result<ResultSet> {
        self.client.fetch_issues(self.username()).await
    }

    pub async fn fetch_review_requests(&self) -> Result<ResultSet> {
        self.client.fetch_review_requests(self.username()).await
    }

    pub async fn fetch_comments(&self, item: &GitHubItem) -> Result<CommentThread> {
        self.client.fetch_comments(&item.comments_url).await
    }

    pub async fn load_dashboard(&self) -> Result<Dashboard> {
        Dashboard::load(&self.client, self.username()).await
    }
}

pub struct GitHubAssistantBuilder {
    config: AssistantConfig,
    credentials: Option<Credentials>,
}

impl GitHubAssistantBuilder {
    pub fn new() -> Self {
        Self {
            config: AssistantConfig::default(),
            credentials: None,
        }
    }

    pub fn credentials(mut self, username: impl Into<String>, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::new(username, token));
        self
    }

    pub fn username_env_var(mut self, var_name: impl Into<String>) -> Self {
        self.config.github.username_env_var = var_name.into();
        self
    }

    pub fn token_env_var(mut self, var_name: impl Into<String>) -> Self {
        self.config.github.token_env_var = var_name.into();
        self
    }

    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.config.github.api_base_url = url.into();
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.github.user_agent = agent.into();
        self
    }

    pub fn timeout(mut self, seconds: u64) -> Self {
        self.config.github.timeout_seconds = seconds;
        self
    }

    pub fn per_page(mut self, per_page: u8) -> Self {
        self.config.pagination.per_page = per_page;
        self
    }

    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.config.pagination.max_pages = max_pages;
        self
    }

    pub fn deadline(mut self, seconds: u64) -> Self {
        self.config.pagination.deadline_seconds = seconds;
        self
    }

    /// Uses explicit credentials when set, the environment otherwise.
    pub fn build(self) -> Result<GitHubAssistant> {
        match self.credentials {
            Some(credentials) => GitHubAssistant::with_credentials(self.config, credentials),
            None => GitHubAssistant::with_config(self.config),
        }
    }
}

impl Default for GitHubAssistantBuilder {
    fn default() -> Self {
        Self::new()
    }
}
