//! Service layer for the cleaner application.
//!
//! This module contains the external collaborators:
//! - NewsBlur API access (`NewsBlurClient`)
//! - Language detection (`WhatlangDetector`)

mod language;
mod newsblur;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Feed, ReadFilter, Story, StoryOrder};

pub use language::{LanguageDetector, UNKNOWN_LANGUAGE, WhatlangDetector};
pub use newsblur::NewsBlurClient;

/// Paginated access to unread stories.
///
/// Implemented by the live API client; test doubles implement it to drive
/// the pipeline without network access.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// List all feeds, sorted by title.
    async fn feeds(&self) -> Result<Vec<Feed>>;

    /// Fetch one page of stories for a feed. An empty page signals
    /// exhausted pagination.
    async fn stories_page(
        &self,
        feed_id: &str,
        page: u32,
        order: StoryOrder,
        read_filter: ReadFilter,
    ) -> Result<Vec<Story>>;

    /// Mark the given story hashes as read. Idempotent on the server side.
    async fn mark_stories_as_read(&self, hashes: &[String]) -> Result<()>;
}
