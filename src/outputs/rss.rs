//! RSS 2.0 feed generation.
//!
//! Records are rendered in the order given, one `<item>` each. Invalid
//! records are dropped again here, so the output never depends on the caller
//! having filtered first.
//!
//! # Output Shape
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <rss version="2.0" xmlns:atom="http://www.w3.org/2005/Atom">
//!   <channel>
//!     <title/> <link/> <description/> <language/> <lastBuildDate/>
//!     <item>
//!       <title/> <link/> <description/> <pubDate/> <guid isPermaLink="true"/>
//!     </item>
//!   </channel>
//! </rss>
//! ```

use crate::models::{ArticleRecord, NOT_FOUND};
use crate::sites::ChannelInfo;
use crate::utils::rfc822_gmt;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::escape::escape;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use std::error::Error;
use std::io::Write;
use tracing::{debug, instrument};

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
pub const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

const REPORTER_LABEL: &str = "報導者：";

fn write_text_element<W: Write>(
    w: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    w.write_event(Event::Start(BytesStart::new(name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

/// HTML fragment for an item description.
///
/// Reporter and content are escaped so the two `<p>` wrappers and the
/// `<strong>` label are the only markup a reader will see.
fn item_description(record: &ArticleRecord) -> String {
    format!(
        "<p><strong>{REPORTER_LABEL}</strong>{}</p><p>{}</p>",
        escape(record.reporter.as_str()),
        escape(record.content.as_str())
    )
}

/// The record's own publish time, or `now` when it has none.
///
/// Site text is passed through verbatim, not normalized to RFC 822.
fn item_pub_date(record: &ArticleRecord, now: DateTime<Utc>) -> String {
    if record.publish_time.is_empty() || record.publish_time == NOT_FOUND {
        rfc822_gmt(now)
    } else {
        record.publish_time.clone()
    }
}

fn write_item<W: Write>(
    w: &mut Writer<W>,
    record: &ArticleRecord,
    now: DateTime<Utc>,
) -> Result<(), Box<dyn Error + Send + Sync>> {
    w.write_event(Event::Start(BytesStart::new("item")))?;
    write_text_element(w, "title", &record.title)?;
    write_text_element(w, "link", &record.url)?;
    write_text_element(w, "description", &item_description(record))?;
    write_text_element(w, "pubDate", &item_pub_date(record, now))?;

    let mut guid = BytesStart::new("guid");
    guid.push_attribute(("isPermaLink", "true"));
    w.write_event(Event::Start(guid))?;
    w.write_event(Event::Text(BytesText::new(&record.url)))?;
    w.write_event(Event::End(BytesEnd::new("guid")))?;

    w.write_event(Event::End(BytesEnd::new("item")))?;
    Ok(())
}

/// Render an RSS 2.0 document for `records` under `channel`.
///
/// `now` supplies `lastBuildDate` and any missing `pubDate`; with a fixed
/// `now` the output is byte-for-byte reproducible.
#[instrument(level = "info", skip_all, fields(channel = %channel.title, records = records.len()))]
pub fn render_feed(
    channel: &ChannelInfo,
    records: &[ArticleRecord],
    now: DateTime<Utc>,
) -> Result<String, Box<dyn Error + Send + Sync>> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    let mut rss = BytesStart::new("rss");
    rss.push_attribute(("version", "2.0"));
    rss.push_attribute(("xmlns:atom", ATOM_NAMESPACE));
    writer.write_event(Event::Start(rss))?;
    writer.write_event(Event::Start(BytesStart::new("channel")))?;

    write_text_element(&mut writer, "title", &channel.title)?;
    write_text_element(&mut writer, "link", &channel.link)?;
    write_text_element(&mut writer, "description", &channel.description)?;
    write_text_element(&mut writer, "language", &channel.language)?;
    write_text_element(&mut writer, "lastBuildDate", &rfc822_gmt(now))?;

    let mut items = 0usize;
    for record in records.iter().filter(|r| r.is_valid()) {
        write_item(&mut writer, record, now)?;
        items += 1;
    }

    writer.write_event(Event::End(BytesEnd::new("channel")))?;
    writer.write_event(Event::End(BytesEnd::new("rss")))?;

    debug!(items, skipped = records.len() - items, "Rendered RSS feed");

    let body = writer.into_inner();
    let mut out = String::with_capacity(XML_DECLARATION.len() + body.len());
    out.push_str(XML_DECLARATION);
    out.push_str(&String::from_utf8_lossy(&body));
    Ok(out)
}
