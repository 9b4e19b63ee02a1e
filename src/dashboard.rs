//! Presentation-neutral state for a terminal dashboard.
//!
//! The dashboard owns the two result sets for a user and tracks which list is
//! shown and which row is selected. Rendering helpers return plain text so any
//! frontend can draw them.

use std::fmt;

use log::info;

use crate::client::GitHubClient;
use crate::error::Result;
use crate::filters::CommentFilter;
use crate::types::{CommentThread, GitHubItem, ResultSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    OpenIssues,
    ClosedIssues,
    ReviewRequests,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSummary {
    pub username: String,
    pub open_issues: usize,
    pub closed_issues: usize,
    pub review_requests: u64,
}

impl fmt::Display for DashboardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Open Issues: {}, Closed Issues: {}, User: {}, PRs to review: {}",
            self.open_issues, self.closed_issues, self.username, self.review_requests
        )
    }
}

pub struct Dashboard {
    username: String,
    issues: ResultSet,
    review_requests: ResultSet,
    view: View,
    selected: usize,
}

impl Dashboard {
    pub fn new(username: impl Into<String>, issues: ResultSet, review_requests: ResultSet) -> Self {
        Self {
            username: username.into(),
            issues,
            review_requests,
            view: View::OpenIssues,
            selected: 0,
        }
    }

    /// Fetches both listings. Either failure is returned to the caller.
    pub async fn load(client: &GitHubClient, username: &str) -> Result<Self> {
        let issues = client.fetch_issues(username).await?;
        let review_requests = client.fetch_review_requests(username).await?;

        info!(
            "Dashboard loaded for {}: {} issues, {} review requests",
            username,
            issues.len(),
            review_requests.len()
        );

        Ok(Self::new(username, issues, review_requests))
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            username: self.username.clone(),
            open_issues: self.issues.open_items().len(),
            closed_issues: self.issues.closed_items().len(),
            review_requests: self.review_requests.total_count(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn current_items(&self) -> Vec<&GitHubItem> {
        match self.view {
            View::OpenIssues => self.issues.open_items(),
            View::ClosedIssues => self.issues.closed_items(),
            View::ReviewRequests => self.review_requests.items().iter().collect(),
        }
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected(&self) -> Option<&GitHubItem> {
        self.current_items().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let len = self.current_items().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    pub fn select_previous(&mut self) {
        let len = self.current_items().len();
        if len > 0 {
            self.selected = (self.selected + len - 1) % len;
        }
    }

    /// Switches between open and closed issues.
    pub fn toggle_closed(&mut self) {
        let next = match self.view {
            View::ClosedIssues => View::OpenIssues,
            _ => View::ClosedIssues,
        };
        self.switch_to(next);
    }

    /// Switches between review requests and open issues.
    pub fn toggle_review_requests(&mut self) {
        let next = match self.view {
            View::ReviewRequests => View::OpenIssues,
            _ => View::ReviewRequests,
        };
        self.switch_to(next);
    }

    fn switch_to(&mut self, view: View) {
        self.view = view;
        self.selected = 0;
    }

    /// Comments of the selected row, `None` when the list is empty.
    pub async fn fetch_selected_comments(
        &self,
        client: &GitHubClient,
    ) -> Option<Result<CommentThread>> {
        let item = self.selected()?;
        Some(client.fetch_comments(&item.comments_url).await)
    }

    /// One line per row of the current list.
    pub fn list_rows(&self) -> Vec<String> {
        self.current_items()
            .iter()
            .enumerate()
            .map(|(i, item)| format!("[{}] {}", i + 1, item.title))
            .collect()
    }
}

pub fn render_item_details(item: &GitHubItem) -> String {
    format!(
        "Title: {}\n\nRepository: {}\nOrganization: {}\n\nState: {:?}\n\nURL: {}\nCreated At: {}\n\nDescription:\n\n{}",
        item.title,
        item.project,
        item.organization,
        item.state,
        item.html_url,
        item.created_at,
        item.body
    )
}

pub fn render_comments(thread: &CommentThread, filter: &CommentFilter) -> String {
    let mut text = String::new();
    for comment in filter.apply(&thread.comments) {
        text.push_str(&format!(
            "Comment by {} at {}:\n{}\n\n",
            comment.author, comment.created_at, comment.body
        ));
    }
    if thread.truncated {
        text.push_str("(more comments not shown)\n");
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{GitHubComment, ItemState, SearchPredicate};

    fn item(title: &str, state: ItemState) -> GitHubItem {
        GitHubItem {
            title: title.to_string(),
            body: "details".to_string(),
            html_url: "https://github.com/acme/widgets/issues/1".to_string(),
            state,
            created_at: "2024-03-01T10:00:00Z".to_string(),
            updated_at: "2024-03-02T10:00:00Z".to_string(),
            comments_url: "https://api.github.com/repos/acme/widgets/issues/1/comments".to_string(),
            repository_url: "https://api.github.com/repos/acme/widgets".to_string(),
            organization: "acme".to_string(),
            project: "widgets".to_string(),
            is_pull_request: false,
        }
    }

    fn dashboard() -> Dashboard {
        let issues = ResultSet::new(
            SearchPredicate::assigned_to("octocat"),
            4,
            vec![
                item("one", ItemState::Open),
                item("two", ItemState::Closed),
                item("three", ItemState::Open),
                item("four", ItemState::Open),
            ],
            1,
        );
        let reviews = ResultSet::new(
            SearchPredicate::review_requested_of("octocat"),
            1,
            vec![item("review me", ItemState::Open)],
            1,
        );
        Dashboard::new("octocat", issues, reviews)
    }

    #[test]
    fn test_summary_counts() {
        let summary = dashboard().summary();
        assert_eq!(summary.open_issues, 3);
        assert_eq!(summary.closed_issues, 1);
        assert_eq!(summary.review_requests, 1);
        assert_eq!(
            summary.to_string(),
            "Open Issues: 3, Closed Issues: 1, User: octocat, PRs to review: 1"
        );
    }

    #[test]
    fn test_selection_wraps() {
        let mut dash = dashboard();
        assert_eq!(dash.selected().unwrap().title, "one");

        dash.select_previous();
        assert_eq!(dash.selected().unwrap().title, "four");

        dash.select_next();
        assert_eq!(dash.selected().unwrap().title, "one");
        dash.select_next();
        assert_eq!(dash.selected().unwrap().title, "three");
    }

    #[test]
    fn test_view_toggles_reset_selection() {
        let mut dash = dashboard();
        dash.select_next();

        dash.toggle_closed();
        assert_eq!(dash.view(), View::ClosedIssues);
        assert_eq!(dash.selected_index(), 0);
        assert_eq!(dash.list_rows(), vec!["[1] two"]);

        dash.toggle_review_requests();
        assert_eq!(dash.view(), View::ReviewRequests);
        assert_eq!(dash.selected().unwrap().title, "review me");

        dash.toggle_review_requests();
        assert_eq!(dash.view(), View::OpenIssues);
        dash.toggle_closed();
        dash.toggle_closed();
        assert_eq!(dash.view(), View::OpenIssues);
    }

    #[test]
    fn test_empty_view_has_no_selection() {
        let empty = ResultSet::new(SearchPredicate::assigned_to("octocat"), 0, vec![], 1);
        let reviews = ResultSet::new(SearchPredicate::review_requested_of("octocat"), 0, vec![], 1);
        let mut dash = Dashboard::new("octocat", empty, reviews);
        dash.select_next();
        dash.select_previous();
        assert!(dash.selected().is_none());
        assert!(dash.list_rows().is_empty());
    }

    #[test]
    fn test_render_details_and_comments() {
        let details = render_item_details(&item("one", ItemState::Open));
        assert!(details.starts_with("Title: one"));
        assert!(details.contains("Repository: widgets\nOrganization: acme"));
        assert!(details.contains("Created At: 2024-03-01T10:00:00Z"));

        let thread = CommentThread {
            comments: vec![
                GitHubComment {
                    author: "alice".to_string(),
                    body: "looks good".to_string(),
                    created_at: "2024-03-03T00:00:00Z".to_string(),
                },
                GitHubComment {
                    author: "vercel[bot]".to_string(),
                    body: "preview deployed".to_string(),
                    created_at: "2024-03-03T00:01:00Z".to_string(),
                },
            ],
            truncated: true,
        };
        let text = render_comments(&thread, &CommentFilter::without_bots().unwrap());
        assert_eq!(
            text,
            "Comment by alice at 2024-03-03T00:00:00Z:\nlooks good\n\n(more comments not shown)\n"
        );
    }
}
