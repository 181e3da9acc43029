//! Feed data structures.

use serde::Deserialize;

/// Raw feed record as returned by the feed listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFeed {
    /// Display name
    #[serde(default)]
    pub feed_title: Option<String>,

    /// Server-reported unread count
    #[serde(default, rename = "nt")]
    pub unread_count: Option<i64>,
}

/// A feed with unread stories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feed {
    pub id: String,
    pub title: String,

    /// Used only to know when pagination is complete, not authoritative
    /// for filtering.
    pub unread_count: i64,
}

impl Feed {
    /// Build a feed from a raw record, resolving fallbacks.
    pub fn from_raw(id: String, raw: RawFeed) -> Self {
        Self {
            title: raw.feed_title.unwrap_or_else(|| id.clone()),
            unread_count: raw.unread_count.unwrap_or(0),
            id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_resolves_fields() {
        let raw: RawFeed = serde_json::from_str(r#"{"feed_title": "News", "nt": 7}"#).unwrap();
        let feed = Feed::from_raw("12".to_string(), raw);
        assert_eq!(feed.title, "News");
        assert_eq!(feed.unread_count, 7);
    }

    #[test]
    fn missing_title_falls_back_to_id() {
        let raw: RawFeed = serde_json::from_str("{}").unwrap();
        let feed = Feed::from_raw("12".to_string(), raw);
        assert_eq!(feed.title, "12");
        assert_eq!(feed.unread_count, 0);
    }
}
