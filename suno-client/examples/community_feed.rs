// suno-client/examples/community_feed.rs
// Signs in (optionally) and prints the community feed

use suno_client::shared::{SortKey, util};
use suno_client::{ClientConfig, SunoClient};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = ClientConfig::from_env();
    tracing::info!(base_url = %config.base_url, "Connecting");
    let client = SunoClient::new(config)?;

    let state = client.session().init().await;
    tracing::info!("Session: {:?}", state);

    if args.len() >= 3 && !client.session().is_authenticated() {
        match client.session().login(&args[1], &args[2]).await {
            Ok(user) => tracing::info!("Logged in as: {} <{}>", user.name, user.email),
            Err(e) => tracing::error!("Failed to login: {}", e.user_message()),
        }
    } else if args.len() < 3 {
        println!("Usage: {} [<email> <password>] (browsing anonymously)", args[0]);
    }

    let feed = client.feed();
    if let Err(e) = feed.load_categories().await {
        tracing::warn!("Categories unavailable: {}", e);
    }
    feed.set_sort(SortKey::Popular).await?;

    let now = util::now();
    for issue in feed.issues() {
        let category = issue.category.as_ref().map(|c| c.name.as_str()).unwrap_or("-");
        println!(
            "#{:<4} [{:>3}] {:<40} {:<12} {:<11} {}",
            issue.id,
            issue.net_votes(),
            issue.title,
            category,
            issue.status.label(),
            issue.time_ago(now).unwrap_or_default(),
        );
    }
    if let Some(page) = feed.snapshot().pagination {
        println!("page {}/{} ({} issues)", page.page, page.pages, page.total);
    }

    if client.session().is_admin() {
        let stats = client.admin_dashboard().load().await?;
        println!(
            "{} issues, {} users, {:.1}% resolved",
            stats.total_issues,
            stats.total_users,
            stats.resolution_rate()
        );
    }

    Ok(())
}
