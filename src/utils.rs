//! Small helpers shared by the scrapers and the feed writer.
//!
//! - URL canonicalization for article links
//! - RFC 822 timestamps for RSS date fields
//! - String truncation for log previews

use chrono::{DateTime, Utc};

/// Strip the query string (everything from the first `?`) from a URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_query("https://x/story/1?from=nav"), "https://x/story/1");
/// assert_eq!(strip_query("https://x/story/1"), "https://x/story/1");
/// ```
pub fn strip_query(url: &str) -> &str {
    match url.split_once('?') {
        Some((head, _)) => head,
        None => url,
    }
}

/// Format a UTC instant as an RFC 822 date with the `GMT` zone name,
/// e.g. `Tue, 11 Nov 2025 02:03:04 GMT`.
pub fn rfc822_gmt(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Truncate a string for logging purposes.
///
/// Keeps at most `max` bytes, cut back to a character boundary, and appends
/// `"…(+N bytes)"` when anything was dropped.
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let cut = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .unwrap_or(0);
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_strip_query_removes_everything_after_question_mark() {
        let cases = [
            "https://global.udn.com/global_vision/story/8662/1?from=udn-ch1_menu",
            "https://global.udn.com/global_vision/story/8662/1?a=1?b=2",
            "https://global.udn.com/global_vision/story/8662/1?",
        ];
        for url in cases {
            let clean = strip_query(url);
            assert_eq!(clean, "https://global.udn.com/global_vision/story/8662/1");
            assert!(!clean.contains('?'));
        }
    }

    #[test]
    fn test_strip_query_without_query_is_identity() {
        let url = "https://money.udn.com/money/story/5612/9000";
        assert_eq!(strip_query(url), url);
    }

    #[test]
    fn test_rfc822_gmt() {
        let at = Utc.with_ymd_and_hms(2025, 11, 11, 2, 3, 4).unwrap();
        assert_eq!(rfc822_gmt(at), "Tue, 11 Nov 2025 02:03:04 GMT");
    }

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("Hello, world!", 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // each CJK character is three bytes
        let s = "轉角國際全球視野";
        let result = truncate_for_log(s, 7);
        assert!(result.starts_with("轉角"));
        assert!(result.contains("…(+18 bytes)"));
    }
}
