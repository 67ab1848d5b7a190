//! Field extraction from a single article page.

use crate::models::ArticleCandidate;
use crate::sites::FieldSelectors;
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;

static PARAGRAPH_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p").expect("static selector"));

/// [`FieldSelectors`] parsed once per scrape.
#[derive(Debug)]
pub struct CompiledSelectors {
    title: Selector,
    publish_time: Selector,
    reporter: Selector,
    content: Selector,
}

impl CompiledSelectors {
    pub fn compile(selectors: &FieldSelectors) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let parse = |css: &str| {
            Selector::parse(css).map_err(|e| format!("invalid selector `{css}`: {e}"))
        };
        Ok(Self {
            title: parse(&selectors.title)?,
            publish_time: parse(&selectors.publish_time)?,
            reporter: parse(&selectors.reporter)?,
            content: parse(&selectors.content)?,
        })
    }
}

/// Text of an element with each text node trimmed and empty nodes dropped.
fn stripped_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

fn first_text(document: &Html, selector: &Selector) -> Option<String> {
    document.select(selector).next().map(stripped_text)
}

/// Parse one article page into a candidate record.
///
/// Each field is looked up independently; a selector with no match leaves
/// that field `None`. Content is the text of every `<p>` inside the first
/// content container, joined by `\n`, or empty when there is no container.
pub fn extract_article(html: &str, url: &str, selectors: &CompiledSelectors) -> ArticleCandidate {
    let document = Html::parse_document(html);

    let content = document
        .select(&selectors.content)
        .next()
        .map(|container| container.select(&PARAGRAPH_SELECTOR).map(stripped_text).join("\n"))
        .unwrap_or_default();

    ArticleCandidate {
        title: first_text(&document, &selectors.title),
        publish_time: first_text(&document, &selectors.publish_time),
        reporter: first_text(&document, &selectors.reporter),
        content,
        url: url.to_string(),
    }
}
