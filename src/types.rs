use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use reqwest::Url;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ItemState {
    Open,
    Closed,
    /// Any state string the API adds beyond `open`/`closed`.
    #[serde(other)]
    Unknown,
}

/// An issue or pull request returned by the search endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubItem {
    pub title: String,
    pub body: String,
    pub html_url: String,
    pub state: ItemState,
    /// Timestamps are kept exactly as the API sent them.
    pub created_at: String,
    pub updated_at: String,
    pub comments_url: String,
    pub repository_url: String,
    pub organization: String,
    pub project: String,
    pub is_pull_request: bool,
}

impl GitHubItem {
    pub(crate) fn from_raw(raw: RawItem) -> Self {
        let (organization, project) = decompose_resource_url(&raw.repository_url);

        Self {
            title: raw.title,
            body: raw.body.unwrap_or_default(),
            html_url: raw.html_url,
            state: raw.state,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            comments_url: raw.comments_url,
            repository_url: raw.repository_url,
            organization,
            project,
            is_pull_request: raw.pull_request.is_some(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.state == ItemState::Open
    }

    /// `organization/project`, or an empty string when the owner is unknown.
    pub fn full_name(&self) -> String {
        if self.organization.is_empty() {
            return String::new();
        }
        format!("{}/{}", self.organization, self.project)
    }
}

/// Splits a repository resource URL into `(organization, project)`.
///
/// The path is split on `/`; the leading slash yields an empty first segment,
/// so `https://api.github.com/repos/acme/widgets` gives `("acme", "widgets")`.
/// Unparseable URLs and short paths give empty strings.
pub fn decompose_resource_url(resource_url: &str) -> (String, String) {
    let Ok(url) = Url::parse(resource_url) else {
        return (String::new(), String::new());
    };

    let segments: Vec<&str> = url.path().split('/').collect();
    if segments.len() < 3 {
        return (String::new(), String::new());
    }

    let organization = segments[2].to_string();
    let project = segments.get(3).copied().unwrap_or_default().to_string();
    (organization, project)
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GitHubComment {
    pub author: String,
    pub body: String,
    pub created_at: String,
}

/// Comments for one item, as returned by a single request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThread {
    pub comments: Vec<GitHubComment>,
    /// Set when the response advertised a further page that was not fetched.
    pub truncated: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SearchRole {
    Assignee,
    ReviewRequested,
}

/// The search query sent for one user and role.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchPredicate {
    pub username: String,
    pub role: SearchRole,
}

impl SearchPredicate {
    pub fn assigned_to(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: SearchRole::Assignee,
        }
    }

    pub fn review_requested_of(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            role: SearchRole::ReviewRequested,
        }
    }

    /// Value of the `q` parameter, before form encoding.
    pub fn query(&self) -> String {
        match self.role {
            SearchRole::Assignee => format!("assignee:{}", self.username),
            SearchRole::ReviewRequested => {
                format!("review-requested:{} state:open", self.username)
            }
        }
    }
}

/// All items of one search, merged across pages in the order received.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSet {
    predicate: SearchPredicate,
    total_count: u64,
    items: Vec<GitHubItem>,
    pages_fetched: usize,
    fetched_at: DateTime<Utc>,
}

impl ResultSet {
    pub(crate) fn new(
        predicate: SearchPredicate,
        total_count: u64,
        items: Vec<GitHubItem>,
        pages_fetched: usize,
    ) -> Self {
        Self {
            predicate,
            total_count,
            items,
            pages_fetched,
            fetched_at: Utc::now(),
        }
    }

    pub fn predicate(&self) -> &SearchPredicate {
        &self.predicate
    }

    /// `total_count` declared by the first page.
    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn items(&self) -> &[GitHubItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    pub fn into_items(self) -> Vec<GitHubItem> {
        self.items
    }

    /// Items grouped by organization; each group keeps result order.
    pub fn by_organization(&self) -> BTreeMap<&str, Vec<&GitHubItem>> {
        let mut groups: BTreeMap<&str, Vec<&GitHubItem>> = BTreeMap::new();
        for item in &self.items {
            groups.entry(item.organization.as_str()).or_default().push(item);
        }
        groups
    }
}

/// One search response page.
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage {
    pub total_count: u64,
    pub items: Vec<RawItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawItem {
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    pub state: ItemState,
    pub created_at: String,
    pub updated_at: String,
    pub comments_url: String,
    pub repository_url: String,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawComment {
    #[serde(default)]
    pub body: Option<String>,
    pub user: RawUser,
    pub created_at: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawUser {
    pub login: String,
}

impl From<RawComment> for GitHubComment {
    fn from(raw: RawComment) -> Self {
        Self {
            author: raw.user.login,
            body: raw.body.unwrap_or_default(),
            created_at: raw.created_at,
        }
    }
}
