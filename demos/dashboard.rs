use github_assistant::{render_comments, render_item_details, CommentFilter, GitHubAssistant};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let assistant = GitHubAssistant::from_env()?;

    println!("Loading dashboard for {}...", assistant.username());
    let mut dashboard = assistant.load_dashboard().await?;

    println!("\n=== Summary ===");
    println!("{}", dashboard.summary());

    println!("\n=== Open Issues ===");
    for row in dashboard.list_rows() {
        println!("  {}", row);
    }

    dashboard.toggle_closed();
    println!("\n=== Closed Issues ===");
    for row in dashboard.list_rows().iter().take(10) {
        println!("  {}", row);
    }
    dashboard.toggle_closed();

    let Some(item) = dashboard.selected() else {
        println!("\nNo open issues to show.");
        return Ok(());
    };

    println!("\n=== Selected ===");
    println!("{}", render_item_details(item));

    println!("\n=== Comments ===");
    let filter = CommentFilter::without_bots()?;
    match dashboard.fetch_selected_comments(assistant.client()).await {
        Some(Ok(thread)) => print!("{}", render_comments(&thread, &filter)),
        Some(Err(e)) => println!("Error fetching comments: {}", e),
        None => {}
    }

    Ok(())
}
