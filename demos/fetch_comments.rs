use github_assistant::{CommentFilter, GitHubAssistant, IssueState, ItemFilters};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let assistant = GitHubAssistant::from_env()?;
    let issues = assistant.fetch_issues().await?;

    let filters = ItemFilters {
        state: IssueState::Open,
        include_pull_requests: false,
        ..Default::default()
    };
    let open = filters.apply(issues.items());
    println!("{} open issues assigned to {}", open.len(), assistant.username());

    let filter = CommentFilter::without_bots()?;
    for issue in open.iter().take(3) {
        println!("\n=== {} ({}) ===", issue.title, issue.full_name());

        // A failed comment fetch only affects this issue.
        match assistant.fetch_comments(issue).await {
            Ok(thread) => {
                for comment in filter.apply(&thread.comments) {
                    println!("--- {} at {} ---", comment.author, comment.created_at);
                    println!("{}", comment.body.chars().take(200).collect::<String>());
                }
                if thread.truncated {
                    println!("...(more comments on the next page)");
                }
            }
            Err(e) => println!("Error fetching comments: {}", e),
        }
    }

    Ok(())
}
