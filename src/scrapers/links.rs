//! Article link discovery on a category listing page.

use crate::utils::strip_query;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::error::Error;
use tracing::{debug, instrument};
use url::Url;

static LINK_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("a[href]").expect("static selector"));

/// Collect the canonical article URLs linked from a listing page.
///
/// Every `href` is resolved against `base_url`; only absolute URLs starting
/// with `article_prefix` are kept, with their query string stripped. Links
/// differing only by query string collapse into one entry. The set has no
/// meaningful order.
///
/// # Errors
///
/// Fails only when `base_url` itself is not a valid absolute URL.
#[instrument(level = "debug", skip(html))]
pub fn extract_article_links(
    html: &str,
    base_url: &str,
    article_prefix: &str,
) -> Result<HashSet<String>, Box<dyn Error + Send + Sync>> {
    let base = Url::parse(base_url)?;
    let document = Html::parse_document(html);

    let mut article_urls = HashSet::new();
    for element in document.select(&LINK_SELECTOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            continue;
        };
        let full_url = resolved.as_str();
        if full_url.starts_with(article_prefix) {
            article_urls.insert(strip_query(full_url).to_string());
        }
    }

    debug!(count = article_urls.len(), urls = ?article_urls, "Extracted article links");
    Ok(article_urls)
}
