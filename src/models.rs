//! Data models for scraped news articles.
//!
//! This module defines the two shapes an article passes through:
//! - [`ArticleCandidate`]: the raw extraction result, where every lookup that
//!   found no matching element is `None`
//! - [`ArticleRecord`]: the serializable record handed to JSON and RSS output,
//!   where a missing field is spelled with the [`NOT_FOUND`] sentinel
//!
//! Only records passing [`ArticleRecord::is_valid`] ever leave the pipeline.

use serde::{Deserialize, Serialize};

/// In-band marker for a field whose element was absent from the page.
pub const NOT_FOUND: &str = "N/A";

/// Fields extracted from one article page before validation.
///
/// `content` is never `None`: a missing content container yields an empty
/// string, which the validity check rejects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleCandidate {
    pub title: Option<String>,
    pub publish_time: Option<String>,
    pub reporter: Option<String>,
    pub content: String,
    pub url: String,
}

impl ArticleCandidate {
    /// Lower into the wire record, spelling absent fields as [`NOT_FOUND`].
    pub fn into_record(self) -> ArticleRecord {
        let or_sentinel = |field: Option<String>| field.unwrap_or_else(|| NOT_FOUND.to_string());
        ArticleRecord {
            title: or_sentinel(self.title),
            publish_time: or_sentinel(self.publish_time),
            reporter: or_sentinel(self.reporter),
            content: self.content,
            url: self.url,
        }
    }
}

/// A scraped article as exposed over JSON and rendered into RSS items.
///
/// The `url` is absolute with its query string removed and identifies the
/// article uniquely.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ArticleRecord {
    /// Headline text.
    pub title: String,
    /// Publication time exactly as printed by the site.
    pub publish_time: String,
    /// Byline text.
    pub reporter: String,
    /// Body paragraphs joined by `\n`.
    pub content: String,
    /// Canonical article URL.
    pub url: String,
}

impl ArticleRecord {
    /// A record is valid when title, publish time and reporter are present
    /// and not the sentinel, and the content has non-whitespace text.
    pub fn is_valid(&self) -> bool {
        let present = |field: &str| !field.is_empty() && field != NOT_FOUND;
        present(&self.title)
            && present(&self.publish_time)
            && present(&self.reporter)
            && !self.content.trim().is_empty()
    }
}

/// Keep only valid records, preserving input order.
pub fn filter_valid<I>(records: I) -> Vec<ArticleRecord>
where
    I: IntoIterator<Item = ArticleRecord>,
{
    records.into_iter().filter(ArticleRecord::is_valid).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, publish_time: &str, reporter: &str, content: &str) -> ArticleRecord {
        ArticleRecord {
            title: title.to_string(),
            publish_time: publish_time.to_string(),
            reporter: reporter.to_string(),
            content: content.to_string(),
            url: "https://global.udn.com/global_vision/story/8662/1".to_string(),
        }
    }

    #[test]
    fn test_complete_record_is_valid() {
        assert!(record("T", "2025-11-11", "R", "C").is_valid());
    }

    #[test]
    fn test_sentinel_fields_are_invalid() {
        assert!(!record(NOT_FOUND, "2025-11-11", "R", "C").is_valid());
        assert!(!record("T", NOT_FOUND, "R", "C").is_valid());
        assert!(!record("T", "2025-11-11", NOT_FOUND, "C").is_valid());
    }

    #[test]
    fn test_empty_fields_are_invalid() {
        assert!(!record("", "2025-11-11", "R", "C").is_valid());
        assert!(!record("T", "", "R", "C").is_valid());
        assert!(!record("T", "2025-11-11", "", "C").is_valid());
        assert!(!record("T", "2025-11-11", "R", "").is_valid());
        assert!(!record("T", "2025-11-11", "R", " \n\t ").is_valid());
    }

    #[test]
    fn test_filter_is_idempotent_and_keeps_order() {
        let records = vec![
            record("first", "2025-11-11", "R", "C"),
            record(NOT_FOUND, "2025-11-11", "R", "C"),
            record("second", "2025-11-12", "R", "C"),
            record("third", "2025-11-13", "R", "   "),
        ];
        let once = filter_valid(records);
        let twice = filter_valid(once.clone());

        assert_eq!(once, twice);
        let titles: Vec<_> = once.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[test]
    fn test_candidate_missing_fields_become_sentinel() {
        let candidate = ArticleCandidate {
            title: Some("T".to_string()),
            publish_time: None,
            reporter: None,
            content: "C".to_string(),
            url: "https://x/y".to_string(),
        };
        let rec = candidate.into_record();

        assert_eq!(rec.title, "T");
        assert_eq!(rec.publish_time, NOT_FOUND);
        assert_eq!(rec.reporter, NOT_FOUND);
        assert!(!rec.is_valid());
    }

    #[test]
    fn test_record_json_keys() {
        let json = serde_json::to_value(record("T", "2025-11-11", "R", "C")).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(keys, ["content", "publish_time", "reporter", "title", "url"]);
    }
}
