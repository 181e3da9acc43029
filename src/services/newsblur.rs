// src/services/newsblur.rs

//! NewsBlur API client.
//!
//! Owns the authenticated HTTP session. Every request is checked for an
//! HTTP 200 status and a `result == "ok"` JSON envelope; anything else is
//! a fatal API error naming the request path.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{ClientConfig, Feed, RawFeed, RawStory, ReadFilter, Story, StoryOrder};
use crate::services::StorySource;
use crate::utils::http;

/// Authenticated session against the NewsBlur API.
pub struct NewsBlurClient {
    client: reqwest::Client,
    base: Url,
}

impl NewsBlurClient {
    /// Open a session and authenticate.
    ///
    /// The session cookie from a successful login lives in the client's
    /// cookie store and is sent on every subsequent request.
    pub async fn login(config: &ClientConfig, username: &str, password: &str) -> Result<Self> {
        let session = Self {
            client: http::create_client(config)?,
            base: Url::parse(&config.api_url)?,
        };

        let form = [("username", username), ("password", password)];
        match session.post("/api/login", &form).await {
            Ok(_) => {
                log::info!("Successfully authenticated as {}", username);
                Ok(session)
            }
            Err(AppError::Api { detail, .. }) => Err(AppError::auth(format!(
                "login for {} rejected: {}",
                username, detail
            ))),
            Err(error) => Err(error),
        }
    }

    /// Best-effort session teardown. Failures are logged, never fatal.
    pub async fn logout(&self) {
        let empty: [(&str, &str); 0] = [];
        if let Err(error) = self.post("/api/logout", &empty).await {
            log::warn!("Logout failed: {}", error);
        }
    }

    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let url = self.base.join(path)?;
        let response = self.client.get(url).query(query).send().await?;
        Self::check_response(path, response).await
    }

    async fn post<F: Serialize + ?Sized>(&self, path: &str, form: &F) -> Result<Value> {
        let url = self.base.join(path)?;
        let response = self.client.post(url).form(form).send().await?;
        Self::check_response(path, response).await
    }

    async fn check_response(path: &str, response: reqwest::Response) -> Result<Value> {
        let status = response.status();
        if status != StatusCode::OK {
            return Err(AppError::api(path, format!("HTTP {}", status)));
        }

        let body: Value = response.json().await?;
        ensure_ok(path, &body)?;
        Ok(body)
    }
}

#[async_trait]
impl StorySource for NewsBlurClient {
    async fn feeds(&self) -> Result<Vec<Feed>> {
        // update_counts forces recalculation of unread counts on all feeds.
        let query = [("update_counts", "true".to_string())];
        let body = self.get("/reader/feeds", &query).await?;
        parse_feeds("/reader/feeds", &body)
    }

    async fn stories_page(
        &self,
        feed_id: &str,
        page: u32,
        order: StoryOrder,
        read_filter: ReadFilter,
    ) -> Result<Vec<Story>> {
        let path = format!("/reader/feed/{}", feed_id);
        let query = [
            ("page", page.to_string()),
            ("order", order.as_param().to_string()),
            ("read_filter", read_filter.as_param().to_string()),
            // Metadata is enough for triage; skip story bodies.
            ("include_story_content", "false".to_string()),
        ];

        let body = self.get(&path, &query).await?;
        let mut stories = parse_stories(&path, &body, Utc::now())?;
        if read_filter == ReadFilter::Unread {
            stories.retain(|s| s.unread);
        }
        Ok(stories)
    }

    async fn mark_stories_as_read(&self, hashes: &[String]) -> Result<()> {
        let form: Vec<(&str, &str)> = hashes
            .iter()
            .map(|hash| ("story_hash", hash.as_str()))
            .collect();
        self.post("/reader/mark_story_hashes_as_read", &form)
            .await?;
        Ok(())
    }
}

/// Check the `result` envelope carried by every API response.
fn ensure_ok(path: &str, body: &Value) -> Result<()> {
    match body.get("result").and_then(Value::as_str) {
        Some("ok") => Ok(()),
        Some(other) => Err(AppError::api(path, format!("result {}", other))),
        None => Err(AppError::api(path, "response missing result field")),
    }
}

fn parse_feeds(path: &str, body: &Value) -> Result<Vec<Feed>> {
    let raw = body
        .get("feeds")
        .cloned()
        .ok_or_else(|| AppError::api(path, "response missing feeds"))?;
    let raw: HashMap<String, RawFeed> = serde_json::from_value(raw)?;

    let mut feeds: Vec<Feed> = raw
        .into_iter()
        .map(|(id, raw)| Feed::from_raw(id, raw))
        .collect();
    feeds.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(feeds)
}

fn parse_stories(path: &str, body: &Value, now: DateTime<Utc>) -> Result<Vec<Story>> {
    let raw = body
        .get("stories")
        .cloned()
        .ok_or_else(|| AppError::api(path, "response missing stories"))?;
    let raw: Vec<RawStory> = serde_json::from_value(raw)?;

    Ok(raw
        .into_iter()
        .map(|raw| Story::from_raw(raw, now))
        .collect())
}
