// src/pipeline/run.rs

//! End-to-end cleanup run.

use chrono::{Duration, Utc};

use crate::error::Result;
use crate::models::{Feed, ReadFilter, RunOptions, Story, StoryOrder};
use crate::pipeline::triage::{DedupState, triage_feed};
use crate::services::{LanguageDetector, StorySource};
use crate::utils::pluralize;

/// Counters describing one completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Feeds with unread stories
    pub feed_count: usize,
    /// Stories examined across all feeds
    pub story_count: usize,
    /// Stories marked as read
    pub marked_count: usize,
}

/// Drive one end-to-end cleanup run.
///
/// Feeds are processed one at a time in the order the source returns them,
/// stories within a feed in arrival order. Purged stories accumulate
/// across feeds and are marked as read in a single bulk call at the very
/// end; when nothing was purged, no call is made at all.
pub async fn run_cleaner(
    source: &dyn StorySource,
    detector: &dyn LanguageDetector,
    options: &RunOptions,
) -> Result<RunSummary> {
    let feeds: Vec<Feed> = source
        .feeds()
        .await?
        .into_iter()
        .filter(|feed| feed.unread_count > 0)
        .collect();
    log::info!(
        "Retrieved {} {} with unread stories",
        feeds.len(),
        pluralize(feeds.len(), "feed", "feeds")
    );

    // The age cutoff is computed once per run, not per feed.
    let cutoff = options
        .max_days_old
        .map(|days| Utc::now() - Duration::days(i64::from(days)));

    let mut dedup = DedupState::default();
    let mut to_mark: Vec<Story> = Vec::new();
    let mut examined = 0;

    for feed in &feeds {
        log::info!("Processing {}", feed.title);
        let stories = fetch_unread_stories(source, feed).await?;
        examined += stories.len();

        let purged = triage_feed(&stories, options, cutoff, &mut dedup, detector)?;
        if !purged.is_empty() {
            log::info!(
                "  Found {} {} to mark as read",
                purged.len(),
                pluralize(purged.len(), "story", "stories")
            );
            to_mark.extend(purged);
        }
    }

    let summary = RunSummary {
        feed_count: feeds.len(),
        story_count: examined,
        marked_count: to_mark.len(),
    };

    if to_mark.is_empty() {
        log::info!("No stories to be marked as read");
    } else {
        log::info!(
            "Marking {} {} as read",
            to_mark.len(),
            pluralize(to_mark.len(), "story", "stories")
        );
        let hashes: Vec<String> = to_mark.into_iter().map(|story| story.hash).collect();
        source.mark_stories_as_read(&hashes).await?;
    }

    Ok(summary)
}

/// Page through a feed until the reported unread count is met.
///
/// The reported count is not trusted blindly: a page returning zero
/// stories terminates pagination even when the count says more remain.
async fn fetch_unread_stories(source: &dyn StorySource, feed: &Feed) -> Result<Vec<Story>> {
    log::info!(
        "  Examining {} {}",
        feed.unread_count,
        pluralize(feed.unread_count.max(0) as usize, "story", "stories")
    );

    let mut stories: Vec<Story> = Vec::new();
    let mut page = 1;
    while (stories.len() as i64) < feed.unread_count {
        let batch = source
            .stories_page(&feed.id, page, StoryOrder::Newest, ReadFilter::Unread)
            .await?;
        if batch.is_empty() {
            break;
        }
        stories.extend(batch);
        page += 1;
    }
    Ok(stories)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::services::WhatlangDetector;

    /// In-memory story source recording every mark-as-read call.
    struct MockSource {
        feeds: Vec<Feed>,
        pages: HashMap<String, Vec<Vec<Story>>>,
        marked: Mutex<Vec<Vec<String>>>,
    }

    impl MockSource {
        fn new(feeds: Vec<Feed>, pages: HashMap<String, Vec<Vec<Story>>>) -> Self {
            Self {
                feeds,
                pages,
                marked: Mutex::new(Vec::new()),
            }
        }

        fn mark_calls(&self) -> Vec<Vec<String>> {
            self.marked.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl StorySource for MockSource {
        async fn feeds(&self) -> Result<Vec<Feed>> {
            Ok(self.feeds.clone())
        }

        async fn stories_page(
            &self,
            feed_id: &str,
            page: u32,
            _order: StoryOrder,
            _read_filter: ReadFilter,
        ) -> Result<Vec<Story>> {
            Ok(self
                .pages
                .get(feed_id)
                .and_then(|pages| pages.get((page - 1) as usize))
                .cloned()
                .unwrap_or_default())
        }

        async fn mark_stories_as_read(&self, hashes: &[String]) -> Result<()> {
            self.marked.lock().unwrap().push(hashes.to_vec());
            Ok(())
        }
    }

    fn feed(id: &str, title: &str, unread_count: i64) -> Feed {
        Feed {
            id: id.to_string(),
            title: title.to_string(),
            unread_count,
        }
    }

    fn story(feed_id: &str, id: &str, title: &str) -> Story {
        Story {
            id: id.to_string(),
            feed_id: feed_id.parse().unwrap(),
            title: title.to_string(),
            permalink: Some(format!("http://example.com/{}/{}", feed_id, id)),
            timestamp: Utc::now(),
            unread: true,
            hash: format!("{}:{}", feed_id, id),
        }
    }

    #[tokio::test]
    async fn one_bulk_mark_call_across_feeds() {
        let pages = HashMap::from([
            (
                "1".to_string(),
                vec![vec![story("1", "a", "Alpha"), story("1", "b", "Beta")]],
            ),
            (
                "2".to_string(),
                vec![vec![story("2", "c", "Gamma"), story("2", "d", "Delta")]],
            ),
        ]);
        let source = MockSource::new(
            vec![feed("1", "Feed One", 2), feed("2", "Feed Two", 2)],
            pages,
        );
        let options = RunOptions {
            max_stories_per_feed: Some(1),
            ..RunOptions::default()
        };

        let summary = run_cleaner(&source, &WhatlangDetector, &options)
            .await
            .unwrap();
        assert_eq!(summary.feed_count, 2);
        assert_eq!(summary.story_count, 4);
        assert_eq!(summary.marked_count, 2);

        // Exactly one call, hashes in arrival order across both feeds.
        let calls = source.mark_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["1:b".to_string(), "2:d".to_string()]);
    }

    #[tokio::test]
    async fn no_mark_call_when_nothing_purged() {
        let pages = HashMap::from([(
            "1".to_string(),
            vec![vec![story("1", "a", "Alpha")]],
        )]);
        let source = MockSource::new(vec![feed("1", "Feed One", 1)], pages);

        let summary = run_cleaner(&source, &WhatlangDetector, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(summary.marked_count, 0);
        assert!(source.mark_calls().is_empty());
    }

    #[tokio::test]
    async fn pagination_accumulates_until_count_met() {
        let pages = HashMap::from([(
            "1".to_string(),
            vec![
                vec![story("1", "a", "Alpha"), story("1", "b", "Beta")],
                vec![story("1", "c", "Gamma")],
            ],
        )]);
        let source = MockSource::new(vec![feed("1", "Feed One", 3)], pages);

        let summary = run_cleaner(&source, &WhatlangDetector, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(summary.story_count, 3);
    }

    #[tokio::test]
    async fn empty_page_terminates_pagination_despite_higher_count() {
        let pages = HashMap::from([(
            "1".to_string(),
            vec![vec![story("1", "a", "Alpha"), story("1", "b", "Beta")]],
        )]);
        let source = MockSource::new(vec![feed("1", "Feed One", 5)], pages);

        let summary = run_cleaner(&source, &WhatlangDetector, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(summary.story_count, 2);
    }

    #[tokio::test]
    async fn feeds_without_unread_stories_are_skipped() {
        let pages = HashMap::from([(
            "1".to_string(),
            vec![vec![story("1", "a", "Alpha")]],
        )]);
        let source = MockSource::new(vec![feed("1", "Feed One", 0)], pages);

        let summary = run_cleaner(&source, &WhatlangDetector, &RunOptions::default())
            .await
            .unwrap();
        assert_eq!(summary.feed_count, 0);
        assert_eq!(summary.story_count, 0);
    }

    #[tokio::test]
    async fn dedup_spans_feeds_in_processing_order() {
        let pages = HashMap::from([
            ("1".to_string(), vec![vec![story("1", "a", "Cats")]]),
            ("2".to_string(), vec![vec![story("2", "b", "cats!")]]),
        ]);
        let source = MockSource::new(
            vec![feed("1", "Feed One", 1), feed("2", "Feed Two", 1)],
            pages,
        );
        let options = RunOptions {
            deduplicate: true,
            ..RunOptions::default()
        };

        let summary = run_cleaner(&source, &WhatlangDetector, &options)
            .await
            .unwrap();
        assert_eq!(summary.marked_count, 1);

        let calls = source.mark_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], vec!["2:b".to_string()]);
    }
}
