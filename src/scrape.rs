//! Fallback extraction from raw post page markup
//!
//! When the GraphQL lookup comes back empty, the post page itself still
//! embeds the media descriptor inside one of several script-generated JSON
//! blobs, depending on which page variant Instagram served. This module
//! isolates those blobs with ordered regex patterns and digs the descriptor
//! out with a depth-first search over the parsed JSON.

use crate::client::HttpClient;
use crate::config::ExtractorConfig;
use crate::error::Result;
use crate::media::{truthy, MediaDescriptor};
use crate::pipeline::FetchStrategy;
use async_trait::async_trait;
use regex::Regex;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// JSON path embedded by the legacy server-rendered pages.
const PAGE_DATA_POINTER: &str = "/entry_data/PostPage/0/graphql/shortcode_media";

/// Scrapes the raw post page for an embedded media descriptor.
pub struct PageScraper {
    client: Arc<HttpClient>,
    config: ExtractorConfig,
    patterns: Vec<Regex>,
}

impl PageScraper {
    pub fn new(client: Arc<HttpClient>, config: &ExtractorConfig) -> Self {
        let patterns = vec![
            // Legacy shared-data bootstrap blob
            Regex::new(r#"(?s)window\._sharedData\s*=\s*(\{.+?\})\s*;\s*</script>"#).unwrap(),
            // Lazily loaded post data
            Regex::new(r#"(?s)window\.__additionalDataLoaded\s*\(\s*[^,]+,\s*(\{.+?\})\s*\)\s*;"#)
                .unwrap(),
            // Any bare JSON object sitting in a script tag
            Regex::new(r#"(?s)<script[^>]*>\s*(\{.+?\})\s*</script>"#).unwrap(),
        ];
        Self {
            client,
            config: config.clone(),
            patterns,
        }
    }

    /// Search the page HTML for a media descriptor value.
    ///
    /// Patterns form the outer loop, their matches the middle loop, and the
    /// recursive JSON search the inner one; the first hit short-circuits
    /// everything. Candidates that fail to parse as JSON are skipped, not
    /// raised.
    pub fn extract_from_html(&self, html: &str) -> Option<Value> {
        for (index, pattern) in self.patterns.iter().enumerate() {
            for caps in pattern.captures_iter(html) {
                let blob = match caps.get(1) {
                    Some(m) => m.as_str(),
                    None => continue,
                };
                let parsed: Value = match serde_json::from_str(blob) {
                    Ok(value) => value,
                    Err(err) => {
                        debug!("pattern {} candidate is not JSON: {}", index, err);
                        continue;
                    }
                };
                if let Some(found) = find_media_value(&parsed) {
                    debug!("pattern {} yielded a media descriptor", index);
                    return Some(found);
                }
            }
        }
        None
    }
}

/// Depth-first, first-match-wins search for a media descriptor inside a
/// parsed JSON tree.
///
/// An object with a truthy `is_video` flag is itself the descriptor; an
/// object carrying a `shortcode_media` key yields that nested value; the
/// legacy page-data path yields the value at its known depth. Otherwise
/// objects recurse into every member value and arrays into every element,
/// in order.
pub(crate) fn find_media_value(value: &Value) -> Option<Value> {
    match value {
        Value::Object(map) => {
            if map.get("is_video").map(truthy).unwrap_or(false) {
                return Some(value.clone());
            }
            if let Some(nested) = map.get("shortcode_media") {
                return Some(nested.clone());
            }
            if let Some(nested) = value.pointer(PAGE_DATA_POINTER) {
                return Some(nested.clone());
            }
            for child in map.values() {
                if let Some(found) = find_media_value(child) {
                    return Some(found);
                }
            }
            None
        }
        Value::Array(items) => {
            for item in items {
                if let Some(found) = find_media_value(item) {
                    return Some(found);
                }
            }
            None
        }
        _ => None,
    }
}

#[async_trait]
impl FetchStrategy for PageScraper {
    fn name(&self) -> &'static str {
        "page-scrape"
    }

    async fn fetch(&self, shortcode: &str) -> Result<Option<MediaDescriptor>> {
        let page_url = self.config.page_url(shortcode);
        let html = self.client.get_text(&page_url).await?;
        Ok(self
            .extract_from_html(&html)
            .map(|value| MediaDescriptor::from_value(&value)))
    }
}
