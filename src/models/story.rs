//! Story data structures.
//!
//! A [`Story`] is an immutable snapshot of one feed item at fetch time.
//! All field fallbacks are resolved eagerly when the snapshot is built
//! from the raw API record.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

/// Raw story record as returned by the API.
#[derive(Debug, Clone, Deserialize)]
pub struct RawStory {
    /// Stable identifier, unique within a feed
    pub id: String,

    /// Identifier of the owning feed
    #[serde(default)]
    pub story_feed_id: Option<i64>,

    /// Display title
    #[serde(default)]
    pub story_title: Option<String>,

    /// Canonical URL of the item
    #[serde(default)]
    pub story_permalink: Option<String>,

    /// Publication time as epoch seconds (number or numeric string)
    #[serde(default)]
    pub story_timestamp: Option<Value>,

    /// Non-zero when the story has been read
    #[serde(default)]
    pub read_status: Option<i64>,

    /// Globally unique token used for the mark-as-read call
    #[serde(default)]
    pub story_hash: Option<String>,
}

/// An immutable story snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Story {
    pub id: String,
    pub feed_id: i64,
    pub title: String,
    pub permalink: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub unread: bool,
    pub hash: String,
}

impl Story {
    /// Build a story from a raw record, resolving fallbacks.
    ///
    /// A missing title falls back to the story id, a missing timestamp
    /// falls back to `now`, and a missing read flag counts as unread.
    pub fn from_raw(raw: RawStory, now: DateTime<Utc>) -> Self {
        let timestamp = raw
            .story_timestamp
            .as_ref()
            .and_then(parse_epoch_seconds)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .unwrap_or(now);

        Self {
            title: raw.story_title.unwrap_or_else(|| raw.id.clone()),
            feed_id: raw.story_feed_id.unwrap_or_default(),
            permalink: raw.story_permalink,
            timestamp,
            unread: raw.read_status.unwrap_or(0) == 0,
            hash: raw.story_hash.unwrap_or_default(),
            id: raw.id,
        }
    }
}

/// Page ordering for story fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryOrder {
    Newest,
    Oldest,
}

impl StoryOrder {
    pub fn as_param(self) -> &'static str {
        match self {
            StoryOrder::Newest => "newest",
            StoryOrder::Oldest => "oldest",
        }
    }
}

/// Read-status filter for story fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadFilter {
    Unread,
    All,
}

impl ReadFilter {
    pub fn as_param(self) -> &'static str {
        match self {
            ReadFilter::Unread => "unread",
            ReadFilter::All => "all",
        }
    }
}

// The API serves story_timestamp either as a number or a numeric string.
fn parse_epoch_seconds(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}
