use std::time::Instant;

use log::{debug, info, warn};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::de::DeserializeOwned;
use tokio::time::timeout;

use crate::config::{AssistantConfig, Credentials, PaginationConfig};
use crate::error::{GitHubAssistantError, Result};
use crate::link;
use crate::types::{
    CommentThread, GitHubComment, GitHubItem, RawComment, ResultSet, SearchPage, SearchPredicate,
};

pub struct GitHubClient {
    http: reqwest::Client,
    credentials: Credentials,
    api_base_url: String,
    pagination: PaginationConfig,
}

impl GitHubClient {
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(AssistantConfig::default(), credentials)
    }

    pub fn with_config(config: AssistantConfig, credentials: Credentials) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(config.github.user_agent.as_str())
            .timeout(config.github.timeout())
            .build()?;

        Self::with_http_client(http, config, credentials)
    }

    /// Builds a client around an existing connection pool.
    pub fn with_http_client(
        http: reqwest::Client,
        config: AssistantConfig,
        credentials: Credentials,
    ) -> Result<Self> {
        let api_base_url = config.github.api_base_url.trim_end_matches('/').to_string();
        Url::parse(&api_base_url).map_err(|e| {
            GitHubAssistantError::ConfigError(format!("Invalid base URI {}: {}", api_base_url, e))
        })?;

        Ok(Self {
            http,
            credentials,
            api_base_url,
            pagination: config.pagination,
        })
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Everything assigned to `username`, open and closed.
    pub async fn fetch_issues(&self, username: &str) -> Result<ResultSet> {
        self.search(&SearchPredicate::assigned_to(username)).await
    }

    /// Open pull requests awaiting a review from `username`.
    pub async fn fetch_review_requests(&self, username: &str) -> Result<ResultSet> {
        self.search(&SearchPredicate::review_requested_of(username))
            .await
    }

    /// First page URL of a search: the query plus the page-size hint.
    pub fn search_url(&self, predicate: &SearchPredicate) -> Result<Url> {
        let raw = format!("{}/search/issues", self.api_base_url);
        let mut url = Url::parse(&raw)
            .map_err(|e| GitHubAssistantError::InvalidUrl(format!("{}: {}", raw, e)))?;

        url.query_pairs_mut()
            .append_pair("q", &predicate.query())
            .append_pair("per_page", &self.pagination.page_size().to_string());

        Ok(url)
    }

    /// Follows `rel="next"` links until the last page and merges every page.
    ///
    /// Any failing page aborts the whole search and nothing collected so far
    /// is returned. The walk is bounded by `max_pages` and by the fetch
    /// deadline; crossing either is an error as well.
    pub async fn search(&self, predicate: &SearchPredicate) -> Result<ResultSet> {
        info!(
            "Searching {:?} items for {}",
            predicate.role, predicate.username
        );

        let started = Instant::now();
        let deadline = self.pagination.deadline();
        let mut page_url = self.search_url(predicate)?;
        let mut items = Vec::new();
        let mut total_count = None;
        let mut pages = 0usize;

        loop {
            if pages >= self.pagination.max_pages {
                warn!(
                    "Reached maximum page limit ({}) for {}",
                    self.pagination.max_pages,
                    predicate.query()
                );
                return Err(GitHubAssistantError::PageLimitExceeded { pages });
            }

            let elapsed = started.elapsed();
            let remaining = deadline
                .checked_sub(elapsed)
                .filter(|remaining| !remaining.is_zero())
                .ok_or(GitHubAssistantError::DeadlineExceeded { elapsed })?;

            pages += 1;
            debug!("Fetching page {} from {}", pages, page_url);

            let (page, next) = timeout(remaining, self.get_json::<SearchPage>(page_url.as_str()))
                .await
                .map_err(|_| GitHubAssistantError::DeadlineExceeded {
                    elapsed: started.elapsed(),
                })??;

            debug!(
                "Page {} returned {} items (total_count {})",
                pages,
                page.items.len(),
                page.total_count
            );

            total_count.get_or_insert(page.total_count);
            items.extend(page.items.into_iter().map(GitHubItem::from_raw));

            match next {
                Some(next) => {
                    page_url = Url::parse(&next).map_err(|e| {
                        GitHubAssistantError::InvalidUrl(format!("{}: {}", next, e))
                    })?;
                }
                None => break,
            }
        }

        info!(
            "Collected {} items over {} pages for {}",
            items.len(),
            pages,
            predicate.query()
        );

        Ok(ResultSet::new(
            predicate.clone(),
            total_count.unwrap_or_default(),
            items,
            pages,
        ))
    }

    /// Fetches the comment listing at `comments_url` with a single request.
    pub async fn fetch_comments(&self, comments_url: &str) -> Result<CommentThread> {
        debug!("Fetching comments from {}", comments_url);

        let (raw, next) = self.get_json::<Vec<RawComment>>(comments_url).await?;
        let truncated = next.is_some();
        if truncated {
            warn!(
                "Comment listing at {} has further pages that were not fetched",
                comments_url
            );
        }

        Ok(CommentThread {
            comments: raw.into_iter().map(GitHubComment::from).collect(),
            truncated,
        })
    }

    /// Authenticated GET returning the decoded body and the next-page link.
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<(T, Option<String>)> {
        let response = self
            .http
            .get(url)
            .basic_auth(&self.credentials.username, Some(self.credentials.token()))
            .header(ACCEPT, "application/vnd.github+json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GitHubAssistantError::Status {
                status,
                url: url.to_string(),
            });
        }

        let next = link::next_page_from_headers(response.headers());
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).map_err(|source| {
            GitHubAssistantError::Decode {
                url: url.to_string(),
                source,
            }
        })?;

        Ok((body, next))
    }
}
