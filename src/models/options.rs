//! Per-run cleanup policy options.

use std::collections::HashSet;

/// Cleanup policies for a single run, immutable once built.
///
/// The numeric options are validated to be positive at the CLI boundary,
/// so `Some` always means the rule is enabled.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Purge stories whose normalized title or permalink was already kept
    pub deduplicate: bool,

    /// Purge stories older than this many days
    pub max_days_old: Option<u32>,

    /// Keep at most this many stories per feed, purge the rest
    pub max_stories_per_feed: Option<u32>,

    /// Keep only stories whose detected language is in this set
    /// (empty = no language filter)
    pub languages: HashSet<String>,
}
