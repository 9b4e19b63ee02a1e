use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{GitHubAssistantError, Result};
use crate::types::{GitHubComment, GitHubItem, ItemState, ResultSet};

/// Matches logins of GitHub App accounts such as `vercel[bot]`.
pub const BOT_AUTHOR_PATTERN: &str = r"\[bot\]$";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum IssueState {
    Open,
    Closed,
    All,
}

impl IssueState {
    fn accepts(self, state: ItemState) -> bool {
        match self {
            IssueState::Open => state == ItemState::Open,
            IssueState::Closed => state == ItemState::Closed,
            IssueState::All => true,
        }
    }
}

pub fn open_items(items: &[GitHubItem]) -> Vec<&GitHubItem> {
    items_in_state(items, ItemState::Open)
}

pub fn closed_items(items: &[GitHubItem]) -> Vec<&GitHubItem> {
    items_in_state(items, ItemState::Closed)
}

fn items_in_state(items: &[GitHubItem], state: ItemState) -> Vec<&GitHubItem> {
    items.iter().filter(|item| item.state == state).collect()
}

impl ResultSet {
    pub fn open_items(&self) -> Vec<&GitHubItem> {
        open_items(self.items())
    }

    pub fn closed_items(&self) -> Vec<&GitHubItem> {
        closed_items(self.items())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFilters {
    pub state: IssueState,
    pub organization: Option<String>,
    pub project: Option<String>,
    pub include_pull_requests: bool,
}

impl Default for ItemFilters {
    fn default() -> Self {
        Self {
            state: IssueState::All,
            organization: None,
            project: None,
            include_pull_requests: true,
        }
    }
}

impl ItemFilters {
    pub fn matches(&self, item: &GitHubItem) -> bool {
        if !self.state.accepts(item.state) {
            return false;
        }

        if !self.include_pull_requests && item.is_pull_request {
            return false;
        }

        if let Some(organization) = &self.organization {
            if !organization.eq_ignore_ascii_case(&item.organization) {
                return false;
            }
        }

        if let Some(project) = &self.project {
            if !project.eq_ignore_ascii_case(&item.project) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, items: &'a [GitHubItem]) -> Vec<&'a GitHubItem> {
        items.iter().filter(|item| self.matches(item)).collect()
    }
}

/// Hides comments by author after they have been fetched.
#[derive(Debug, Clone, Default)]
pub struct CommentFilter {
    pub excluded_authors: Vec<String>,
    author_patterns: Vec<Regex>,
}

impl CommentFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter that hides every bot account.
    pub fn without_bots() -> Result<Self> {
        Self::new().exclude_author_pattern(BOT_AUTHOR_PATTERN)
    }

    pub fn exclude_author(mut self, login: impl Into<String>) -> Self {
        self.excluded_authors.push(login.into());
        self
    }

    pub fn exclude_author_pattern(mut self, pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            GitHubAssistantError::ConfigError(format!("Invalid author pattern {}: {}", pattern, e))
        })?;
        self.author_patterns.push(regex);
        Ok(self)
    }

    pub fn matches(&self, comment: &GitHubComment) -> bool {
        let author = comment.author.as_str();

        if self
            .excluded_authors
            .iter()
            .any(|excluded| excluded.eq_ignore_ascii_case(author))
        {
            return false;
        }

        !self.author_patterns.iter().any(|re| re.is_match(author))
    }

    pub fn apply<'a>(&self, comments: &'a [GitHubComment]) -> Vec<&'a GitHubComment> {
        comments.iter().filter(|c| self.matches(c)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, state: ItemState, organization: &str, pull: bool) -> GitHubItem {
        GitHubItem {
            title: title.to_string(),
            body: String::new(),
            html_url: format!("https://github.com/{}/repo/issues/1", organization),
            state,
            created_at: "2024-01-01T00:00:00Z".to_string(),
            updated_at: "2024-01-01T00:00:00Z".to_string(),
            comments_url: String::new(),
            repository_url: format!("https://api.github.com/repos/{}/repo", organization),
            organization: organization.to_string(),
            project: "repo".to_string(),
            is_pull_request: pull,
        }
    }

    fn sample() -> Vec<GitHubItem> {
        vec![
            item("a", ItemState::Open, "acme", false),
            item("b", ItemState::Closed, "acme", true),
            item("c", ItemState::Open, "globex", true),
            item("d", ItemState::Closed, "globex", false),
            item("e", ItemState::Open, "acme", false),
        ]
    }

    fn titles(items: &[&GitHubItem]) -> Vec<String> {
        items.iter().map(|i| i.title.clone()).collect()
    }

    #[test]
    fn test_state_partition_preserves_order() {
        let items = sample();
        let open = open_items(&items);
        let closed = closed_items(&items);

        assert_eq!(titles(&open), vec!["a", "c", "e"]);
        assert_eq!(titles(&closed), vec!["b", "d"]);
        assert_eq!(open.len() + closed.len(), items.len());
    }

    #[test]
    fn test_partition_is_repeatable() {
        let items = sample();
        assert_eq!(open_items(&items), open_items(&items));
        assert_eq!(closed_items(&items), closed_items(&items));
    }

    #[test]
    fn test_empty_input() {
        assert!(open_items(&[]).is_empty());
        assert!(closed_items(&[]).is_empty());
    }

    #[test]
    fn test_item_filters() {
        let items = sample();

        let filters = ItemFilters {
            state: IssueState::Open,
            organization: Some("ACME".to_string()),
            ..Default::default()
        };
        assert_eq!(titles(&filters.apply(&items)), vec!["a", "e"]);

        let no_prs = ItemFilters {
            include_pull_requests: false,
            ..Default::default()
        };
        assert_eq!(titles(&no_prs.apply(&items)), vec!["a", "d", "e"]);
    }

    #[test]
    fn test_comment_filter_hides_bots_and_named_authors() {
        let comment = |author: &str| GitHubComment {
            author: author.to_string(),
            body: "text".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        };
        let comments = vec![
            comment("alice"),
            comment("vercel[bot]"),
            comment("bob"),
            comment("dependabot[bot]"),
        ];

        let filter = CommentFilter::without_bots().unwrap().exclude_author("BOB");
        let kept: Vec<&str> = filter
            .apply(&comments)
            .iter()
            .map(|c| c.author.as_str())
            .collect();
        assert_eq!(kept, vec!["alice"]);

        assert_eq!(CommentFilter::new().apply(&comments).len(), 4);
    }

    #[test]
    fn test_invalid_author_pattern() {
        assert!(CommentFilter::new().exclude_author_pattern("(").is_err());
    }
}
