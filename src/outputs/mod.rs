//! Output generation for scraped articles.
//!
//! # Submodules
//!
//! - [`rss`]: Renders article records as an RSS 2.0 document
//!
//! JSON output needs no module of its own: [`crate::models::ArticleRecord`]
//! derives `Serialize` and the server returns it directly.

pub mod rss;
