use clap::Parser;
use url::Url;

use harvester::cli::{Cli, Commands};
use harvester::client::{FeedClient, HttpFeedClient};
use harvester::config::Config;
use harvester::errors::{HarvestError, HarvestResult};
use harvester::poller::{Cursor, Poller, Runner};
use harvester::storage::sqlite::{SqliteFeedRepository, SqlitePostRepository, SqliteStorage};
use harvester::storage::traits::{FeedRepository, PostRepository};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> HarvestResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize storage
    let storage = SqliteStorage::new(&config.db_path)?;
    let feed_repo = SqliteFeedRepository::new(storage.clone());
    let post_repo = SqlitePostRepository::new(storage);

    let client = HttpFeedClient::new(config.fetch_timeout);

    match cli.command {
        Commands::Add { url } => cmd_add(&url, feed_repo, client),
        Commands::Remove { id } => cmd_remove(id, feed_repo),
        Commands::List { json } => cmd_list(feed_repo, json),
        Commands::Posts { limit, json } => cmd_posts(post_repo, limit, json),
        Commands::Run => cmd_run(feed_repo, post_repo, client, &config),
        Commands::Watch { cycles } => cmd_watch(feed_repo, post_repo, client, &config, cycles),
    }
}

fn cmd_add(
    url: &str,
    feed_repo: SqliteFeedRepository,
    client: HttpFeedClient,
) -> HarvestResult<()> {
    Url::parse(url).map_err(|e| HarvestError::InvalidUrl(e.to_string()))?;

    if feed_repo.exists(url)? {
        println!("Feed already exists: {}", url);
        return Ok(());
    }

    println!("Validating feed: {}", url);

    // One fetch up front proves the URL serves a parseable document and gives
    // us the channel title
    let document = client.fetch(url)?;
    let title = if document.title.is_empty() {
        None
    } else {
        Some(document.title.clone())
    };

    let feed = harvester::domain::Feed::new(url.to_string(), title);
    let id = feed_repo.add(&feed)?;

    println!("Feed added successfully!");
    println!("  Id: {}", id);
    if let Some(title) = &feed.title {
        println!("  Title: {}", title);
    }

    Ok(())
}

fn cmd_remove(id: i64, feed_repo: SqliteFeedRepository) -> HarvestResult<()> {
    feed_repo.remove(id)?;
    println!("Removed feed {}", id);
    Ok(())
}

fn cmd_list(feed_repo: SqliteFeedRepository, json: bool) -> HarvestResult<()> {
    let feeds = feed_repo.get_all()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&feeds)?);
        return Ok(());
    }

    if feeds.is_empty() {
        println!("No feeds registered.");
        return Ok(());
    }

    println!("Registered feeds:\n");
    for feed in feeds {
        let id = feed.id.map_or_else(|| "-".to_string(), |i| i.to_string());
        println!("  {}. {}", id, feed.title.as_deref().unwrap_or("(untitled)"));
        println!("    URL: {}", feed.url);
        if let Some(fetched) = &feed.last_fetched_at {
            println!("    Last fetched: {}", fetched);
        }
        println!();
    }

    Ok(())
}

fn cmd_posts(post_repo: SqlitePostRepository, limit: u32, json: bool) -> HarvestResult<()> {
    let posts = post_repo.get_recent(limit)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    if posts.is_empty() {
        println!("No posts ingested yet.");
        return Ok(());
    }

    println!("Recent posts:\n");
    for post in posts {
        println!("  {} (feed {})", post.title, post.feed_id);
        println!("    URL: {}", post.url);
        if let Some(published) = post.published_at {
            println!("    Published: {}", published.to_rfc3339());
        }
        println!();
    }

    Ok(())
}

fn cmd_run(
    feed_repo: SqliteFeedRepository,
    post_repo: SqlitePostRepository,
    client: HttpFeedClient,
    config: &Config,
) -> HarvestResult<()> {
    let poller = Poller::new(feed_repo, post_repo, client, config.mark_policy);
    let mut cursor = Cursor::new(config.batch_size);

    let summary = poller.run_cycle(&mut cursor);

    println!(
        "Cycle finished: {} attempted, {} ingested, {} failed",
        summary.attempted, summary.ingested, summary.failed
    );

    Ok(())
}

fn cmd_watch(
    feed_repo: SqliteFeedRepository,
    post_repo: SqlitePostRepository,
    client: HttpFeedClient,
    config: &Config,
    cycles: Option<u64>,
) -> HarvestResult<()> {
    let poller = Poller::new(feed_repo, post_repo, client, config.mark_policy);
    let runner = Runner::new(poller, config.poll_interval);
    let mut cursor = Cursor::new(config.batch_size);

    println!(
        "Polling every {}s (batch size {}). Press Ctrl+C to stop.",
        config.poll_interval.as_secs(),
        config.batch_size
    );

    runner.run(&mut cursor, cycles);

    Ok(())
}
