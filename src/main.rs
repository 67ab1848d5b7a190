//! # udn news feeds
//!
//! Scrapes the 經濟日報 (money.udn.com) and 轉角國際 (global.udn.com)
//! category listings on every request and serves the articles as JSON or as
//! RSS 2.0 feeds over local HTTP.
//!
//! ## Usage
//!
//! ```sh
//! udn_news_feeds --port 3322
//! curl http://127.0.0.1:3322/global/rss
//! ```
//!
//! ## Architecture
//!
//! Each request runs one pipeline:
//! 1. **Listing**: fetch the site's category page
//! 2. **Links**: collect canonical, deduplicated article URLs
//! 3. **Articles**: fetch each article and extract its fields
//! 4. **Filter**: drop records missing a required field
//! 5. **Output**: JSON array or RSS document

use clap::Parser;
use std::error::Error;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod models;
mod outputs;
mod scrapers;
mod server;
mod sites;
mod utils;

use cli::Cli;
use server::AppState;
use sites::Source;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let args = Cli::parse();
    info!(?args, "udn_news_feeds starting up");

    let client = scrapers::build_client(args.user_agent.as_deref())?;
    let state = AppState::new(client, usize::from(args.concurrency), args.allow_remote);

    let addr = args.bind_addr();
    let listener = match TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%addr, error = %e, "Failed to bind listen address");
            return Err(e.into());
        }
    };
    let sources: Vec<_> = Source::ALL.iter().map(|s| s.slug()).collect();
    info!(
        %addr,
        ?sources,
        allow_remote = args.allow_remote,
        concurrency = args.concurrency,
        "Serving scrape and RSS routes"
    );

    server::serve(listener, state).await?;
    Ok(())
}
