//! Per-site constants for the two udn.com news sources.
//!
//! Both sources run through the same pipeline; a [`SiteConfig`] carries
//! everything that differs between them.
//!
//! | Source | Site | Listing |
//! |--------|------|---------|
//! | [`Source::Finance`] | 經濟日報 (money.udn.com) | 要聞 category |
//! | [`Source::Global`] | 轉角國際 (global.udn.com) | 全球視野 category |

use std::fmt;
use std::str::FromStr;

/// Which news source a request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    Finance,
    Global,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Finance, Source::Global];

    /// Route segment used by the HTTP layer.
    pub fn slug(self) -> &'static str {
        match self {
            Source::Finance => "finance",
            Source::Global => "global",
        }
    }

    pub fn site(self) -> SiteConfig {
        match self {
            Source::Finance => SiteConfig::finance(),
            Source::Global => SiteConfig::global(),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for Source {
    type Err = String;

    /// Accepts `finance` (or its site name `money`) and `global`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "finance" | "money" => Ok(Source::Finance),
            "global" => Ok(Source::Global),
            other => Err(format!("unknown news source: {other}")),
        }
    }
}

/// CSS selectors locating each article field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSelectors {
    pub title: String,
    pub publish_time: String,
    pub reporter: String,
    /// Container whose `<p>` descendants make up the body.
    pub content: String,
}

/// RSS `<channel>` metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelInfo {
    pub title: String,
    pub link: String,
    pub description: String,
    pub language: String,
}

/// Everything the pipeline needs to know about one site.
///
/// Fields are owned so tests can point a site at a local server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Category page scanned for article links.
    pub listing_url: String,
    /// Absolute URL prefix an article link must start with.
    pub article_prefix: String,
    pub selectors: FieldSelectors,
    pub channel: ChannelInfo,
}

impl SiteConfig {
    /// 經濟日報 要聞.
    pub fn finance() -> Self {
        let listing_url = "https://money.udn.com/money/cate/5591";
        Self {
            listing_url: listing_url.to_string(),
            article_prefix: "https://money.udn.com/money/story".to_string(),
            selectors: FieldSelectors {
                title: "h1.article-head__title".to_string(),
                publish_time: "time.article-body__time".to_string(),
                reporter: "div.article-body__info".to_string(),
                content: "section.article-body__editor".to_string(),
            },
            channel: ChannelInfo {
                title: "經濟日報 - 要聞".to_string(),
                link: listing_url.to_string(),
                description: "經濟日報要聞新聞".to_string(),
                language: "zh-TW".to_string(),
            },
        }
    }

    /// 轉角國際 全球視野.
    pub fn global() -> Self {
        let listing_url = "https://global.udn.com/global_vision/cate/120868";
        Self {
            listing_url: listing_url.to_string(),
            article_prefix: "https://global.udn.com/global_vision/story".to_string(),
            selectors: FieldSelectors {
                title: "h1.article-content__title".to_string(),
                publish_time: "div.article-content__authors-mark".to_string(),
                reporter: "p.article-content__authors-name".to_string(),
                content: "section.article-content__editor".to_string(),
            },
            channel: ChannelInfo {
                title: "轉角國際 - 全球視野".to_string(),
                link: listing_url.to_string(),
                description: "轉角國際全球視野新聞".to_string(),
                language: "zh-TW".to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Selector;

    #[test]
    fn test_source_from_str() {
        assert_eq!("finance".parse::<Source>(), Ok(Source::Finance));
        assert_eq!("money".parse::<Source>(), Ok(Source::Finance));
        assert_eq!("GLOBAL".parse::<Source>(), Ok(Source::Global));
        assert!("sports".parse::<Source>().is_err());
    }

    #[test]
    fn test_builtin_selectors_parse() {
        for source in Source::ALL {
            let site = source.site();
            for css in [
                &site.selectors.title,
                &site.selectors.publish_time,
                &site.selectors.reporter,
                &site.selectors.content,
            ] {
                assert!(Selector::parse(css).is_ok(), "{source}: {css}");
            }
        }
    }

    #[test]
    fn test_article_prefix_is_on_listing_host() {
        for source in Source::ALL {
            let site = source.site();
            let listing = url::Url::parse(&site.listing_url).unwrap();
            let prefix = url::Url::parse(&site.article_prefix).unwrap();
            assert_eq!(listing.host_str(), prefix.host_str());
            assert_eq!(site.channel.link, site.listing_url);
            assert_eq!(site.channel.language, "zh-TW");
        }
    }
}
