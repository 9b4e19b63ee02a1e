use github_assistant::GitHubAssistantBuilder;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let assistant = GitHubAssistantBuilder::new()
        .user_agent("github-assistant-demo")
        .max_pages(20)
        .deadline(120)
        .build()?;

    let reviews = assistant.fetch_review_requests().await?;

    println!(
        "{} pull requests await a review from {} ({} pages)",
        reviews.total_count(),
        assistant.username(),
        reviews.pages_fetched()
    );

    for (organization, items) in reviews.by_organization() {
        let organization = if organization.is_empty() {
            "(unknown)"
        } else {
            organization
        };
        println!("\n{}", organization);
        for item in items {
            println!("  {} [{}] updated {}", item.title, item.project, item.updated_at);
            println!("    {}", item.html_url);
        }
    }

    Ok(())
}
