//! Scraping pipeline shared by both news sources.
//!
//! A scrape runs in four stages, each driven by the site's [`SiteConfig`]:
//!
//! 1. **Listing**: download the category page ([`fetch_page`])
//! 2. **Links**: collect canonical article URLs ([`links::extract_article_links`])
//! 3. **Articles**: download each article and extract its fields
//!    ([`fetch_articles`], [`article::extract_article`])
//! 4. **Filter**: drop records missing a required field ([`filter_valid`])
//!
//! Network failures never escape: a failed listing yields no records and a
//! failed article is skipped. Callers always get a (possibly empty) list.

pub mod article;
pub mod links;

use crate::models::{ArticleCandidate, ArticleRecord, filter_valid};
use crate::sites::SiteConfig;
use crate::utils::truncate_for_log;
use article::{CompiledSelectors, extract_article};
use futures::stream::{self, StreamExt};
use links::extract_article_links;
use reqwest::{Client, StatusCode};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Build the HTTP client used for all fetches.
///
/// No timeout is configured; requests rely on the client defaults.
pub fn build_client(user_agent: Option<&str>) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.unwrap_or(DEFAULT_USER_AGENT))
        .build()
}

/// GET a page and decode its body as UTF-8.
///
/// Any status other than `200 OK` is an error. Invalid UTF-8 sequences are
/// replaced rather than rejected.
#[instrument(level = "debug", skip(client))]
pub async fn fetch_page(
    client: &Client,
    url: &str,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if status != StatusCode::OK {
        return Err(format!("unexpected status {status}").into());
    }
    let body = response.bytes().await?;
    debug!(bytes = body.len(), "Fetched page");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Fetch and extract every article URL, keeping input order.
///
/// At most `concurrency` requests are in flight; `1` fetches strictly one
/// after another. Failed fetches are logged and skipped.
#[instrument(level = "info", skip_all, fields(urls = urls.len(), concurrency = concurrency))]
pub async fn fetch_articles(
    client: &Client,
    urls: Vec<String>,
    selectors: &CompiledSelectors,
    concurrency: usize,
) -> Vec<ArticleCandidate> {
    let candidates: Vec<ArticleCandidate> = stream::iter(urls)
        .map(|url| async move {
            match fetch_page(client, &url).await {
                Ok(html) => {
                    debug!(%url, "Fetched article");
                    Some(extract_article(&html, &url, selectors))
                }
                Err(e) => {
                    warn!(%url, error = %e, "Article fetch failed; skipping");
                    None
                }
            }
        })
        .buffered(concurrency.max(1))
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = candidates.len(), "Fetched article contents");
    candidates
}

/// Run the full pipeline for one site and return its valid records.
///
/// Record order follows the order in which article links were discovered,
/// which is unspecified.
#[instrument(level = "info", skip_all, fields(listing = %site.listing_url))]
pub async fn scrape_news(
    client: &Client,
    site: &SiteConfig,
    concurrency: usize,
) -> Vec<ArticleRecord> {
    let selectors = match CompiledSelectors::compile(&site.selectors) {
        Ok(selectors) => selectors,
        Err(e) => {
            warn!(error = %e, "Site selectors do not parse; returning no articles");
            return Vec::new();
        }
    };

    let listing = match fetch_page(client, &site.listing_url).await {
        Ok(html) => html,
        Err(e) => {
            warn!(error = %e, "Listing fetch failed; returning no articles");
            return Vec::new();
        }
    };

    let urls = match extract_article_links(&listing, &site.listing_url, &site.article_prefix) {
        Ok(urls) => urls,
        Err(e) => {
            warn!(error = %e, "Listing URL is not usable as a base; returning no articles");
            return Vec::new();
        }
    };
    info!(count = urls.len(), "Indexed article URLs");

    let candidates = fetch_articles(client, urls.into_iter().collect(), &selectors, concurrency).await;
    let total = candidates.len();

    let records = filter_valid(candidates.into_iter().map(ArticleCandidate::into_record).inspect(
        |record| {
            if !record.is_valid() {
                debug!(
                    url = %record.url,
                    title = %truncate_for_log(&record.title, 60),
                    "Dropping article with missing fields"
                );
            }
        },
    ));

    info!(total, valid = records.len(), dropped = total - records.len(), "Scrape complete");
    records
}
