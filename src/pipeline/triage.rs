// src/pipeline/triage.rs

//! Story triage.
//!
//! Classifies every story of one feed as keep or purge by running an
//! ordered chain of short-circuiting rules: duplicate title, duplicate
//! permalink, age cutoff, per-feed cap, language allow-list. The first
//! matching rule purges the story and skips all later rules.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{RunOptions, Story};
use crate::services::LanguageDetector;

/// Cross-feed duplicate tracking, created once per run.
///
/// A normalized title or permalink enters these sets only when its story
/// was kept, never when it was purged. The permalink set is keyed on
/// `Option<String>`: the first kept story without a permalink seeds `None`,
/// after which every later permalink-less story counts as a duplicate.
/// That matches the upstream behavior and is kept as is.
#[derive(Debug, Default)]
pub struct DedupState {
    pub titles_seen: HashSet<String>,
    pub permalinks_seen: HashSet<Option<String>>,
}

/// Produce the normalized key used for duplicate-title comparison.
///
/// Lowercases the title and strips every ASCII punctuation character.
/// No whitespace collapsing and no Unicode punctuation stripping.
pub fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation())
        .collect()
}

/// Classify one feed's unread stories, returning the purge list in
/// arrival order.
///
/// `stories` must be the feed's full flattened story list in the order it
/// was fetched; the 0-based position within that list feeds the per-feed
/// cap rule. `cutoff` is precomputed once per run by the caller. Kept
/// stories record their normalized title and permalink in `dedup` only
/// after every rule has passed, so a story can never seed dedup state for
/// itself. A detector error aborts the feed.
pub fn triage_feed(
    stories: &[Story],
    options: &RunOptions,
    cutoff: Option<DateTime<Utc>>,
    dedup: &mut DedupState,
    detector: &dyn LanguageDetector,
) -> Result<Vec<Story>> {
    let mut to_mark = Vec::new();

    for (index, story) in stories.iter().enumerate() {
        let mut norm_title = None;

        // Purge if the exact title or permalink has already been seen.
        if options.deduplicate {
            let key = normalize_title(&story.title);
            if dedup.titles_seen.contains(&key) {
                to_mark.push(story.clone());
                continue;
            }
            if dedup.permalinks_seen.contains(&story.permalink) {
                to_mark.push(story.clone());
                continue;
            }
            norm_title = Some(key);
        }

        // Purge if the story is earlier than the timestamp cutoff.
        if let Some(cutoff) = cutoff {
            if story.timestamp < cutoff {
                to_mark.push(story.clone());
                continue;
            }
        }

        // Purge if the per-feed story limit has been exceeded.
        if let Some(cap) = options.max_stories_per_feed {
            if index >= cap as usize {
                to_mark.push(story.clone());
                continue;
            }
        }

        // Purge stories which don't match the configured languages, if any.
        if !options.languages.is_empty() {
            let language = detector.detect(&story.title)?;
            if !options.languages.contains(&language) {
                to_mark.push(story.clone());
                continue;
            }
        }

        // Keeping the story, so note that it's been seen.
        if let Some(key) = norm_title {
            dedup.titles_seen.insert(key);
            dedup.permalinks_seen.insert(story.permalink.clone());
        }
    }

    Ok(to_mark)
}
