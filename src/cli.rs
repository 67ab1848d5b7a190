//! Command-line interface definitions for the feed server.
//!
//! Every option can also be supplied through an environment variable.

use clap::Parser;

/// Command-line arguments for the udn news feed server.
///
/// # Examples
///
/// ```sh
/// # Local-only on the default port
/// udn_news_feeds
///
/// # Fetch up to four article pages at once
/// udn_news_feeds --port 8080 --concurrency 4
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Address to listen on
    #[arg(long, env = "UDN_FEEDS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "UDN_FEEDS_PORT", default_value_t = 3322)]
    pub port: u16,

    /// Article pages fetched at once per request (1 = sequential)
    #[arg(
        short,
        long,
        env = "UDN_FEEDS_CONCURRENCY",
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub concurrency: u16,

    /// Serve requests from non-loopback peers instead of answering 403
    #[arg(long, env = "UDN_FEEDS_ALLOW_REMOTE")]
    pub allow_remote: bool,

    /// Override the User-Agent sent to the news sites
    #[arg(long, env = "UDN_FEEDS_USER_AGENT")]
    pub user_agent: Option<String>,
}

impl Cli {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
