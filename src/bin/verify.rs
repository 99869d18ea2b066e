use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use paraiso_feed::{FeedPresenter, FeedState, HttpFeedClient};
use reqwest::Client;
use serde_json::Value;

#[derive(Parser, Debug)]
struct Args {
    /// Local URL/Port to use for requests
    /// Ex: http://0.0.0.0:3030
    #[arg(long)]
    local_url: String,

    /// Viewport width used to lay out the grid
    #[arg(long, default_value_t = 1280)]
    width: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let local_url = args.local_url.trim_end_matches('/');

    let client = Client::new();

    // Fetch the raw feed
    let response = client
        .get(format!("{local_url}/api/instagram"))
        .send()
        .await
        .context("/api/instagram request failed")?;

    println!("Status: {}", response.status());
    println!(
        "Cache-Control: {}",
        response
            .headers()
            .get("cache-control")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("<none>")
    );

    let body = response
        .text()
        .await
        .context("Failed to read feed response text")?;
    let feed: Value = serde_json::from_str(&body).context("Failed to parse feed JSON")?;

    println!(
        "Feed Response:\n{}",
        serde_json::to_string_pretty(&feed).context("Failed to pretty print feed JSON")?
    );

    // Lay the same feed out the way the site does
    let feed_client = HttpFeedClient::new(local_url, Duration::from_secs(15))?;
    let mut presenter = FeedPresenter::new(feed_client, args.width);

    match presenter.mount().await.clone() {
        FeedState::Ready | FeedState::Loading => {}
        FeedState::Empty => {
            println!("Presenter: no posts");
            return Ok(());
        }
        FeedState::Error(message) => {
            println!("Presenter error: {message}");
            return Ok(());
        }
    }

    let pages = presenter.pagination().page_count();
    println!(
        "Presenter: {} posts, {:?} layout, {} per page, {} pages",
        presenter.items().len(),
        presenter.layout(),
        presenter.pagination().page_size(),
        pages
    );

    loop {
        println!("Page {}/{}", presenter.pagination().current() + 1, pages);
        for card in presenter.visible_cards() {
            println!(
                "  [{:?}] {} likes={} comments={} {} {}",
                card.kind,
                card.id,
                card.likes,
                card.comments,
                card.hashtags,
                card.permalink.as_deref().unwrap_or("-"),
            );
        }
        if !presenter.next_page() {
            break;
        }
    }

    Ok(())
}
