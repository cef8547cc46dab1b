//! Primary extraction via Instagram's internal GraphQL query endpoint
//!
//! Best-effort by nature: the query document id is undocumented and rotates
//! upstream without notice. Every failure here is expected and degrades to
//! "no result", which hands the request to the page-scrape fallback.

use crate::client::HttpClient;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::media::MediaDescriptor;
use crate::pipeline::FetchStrategy;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ORIGIN, REFERER};
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Fetches a media descriptor through the internal GraphQL endpoint.
pub struct GraphqlFetcher {
    client: Arc<HttpClient>,
    config: ExtractorConfig,
    headers: HeaderMap,
}

impl GraphqlFetcher {
    pub fn new(client: Arc<HttpClient>, config: &ExtractorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "X-IG-App-ID",
            HeaderValue::from_str(&config.app_id)
                .map_err(|e| ExtractError::Internal(format!("invalid app id: {}", e)))?,
        );
        headers.insert(
            "X-FB-LSD",
            HeaderValue::from_str(&config.lsd_token)
                .map_err(|e| ExtractError::Internal(format!("invalid lsd token: {}", e)))?,
        );
        headers.insert(
            "X-ASBD-ID",
            HeaderValue::from_str(&config.asbd_id)
                .map_err(|e| ExtractError::Internal(format!("invalid asbd id: {}", e)))?,
        );
        headers.insert("X-Requested-With", HeaderValue::from_static("XMLHttpRequest"));
        headers.insert(REFERER, HeaderValue::from_static("https://www.instagram.com/"));
        headers.insert(ORIGIN, HeaderValue::from_static("https://www.instagram.com"));
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert("Sec-Fetch-Site", HeaderValue::from_static("same-origin"));
        headers.insert("Sec-Fetch-Mode", HeaderValue::from_static("cors"));
        headers.insert("Sec-Fetch-Dest", HeaderValue::from_static("empty"));

        Ok(Self {
            client,
            config: config.clone(),
            headers,
        })
    }
}

/// Locate the media descriptor node inside a GraphQL response body.
///
/// Current responses nest it under `data.xdt_shortcode_media`; older query
/// documents used `data.shortcode_media`.
fn media_from_payload(body: &Value) -> Option<&Value> {
    body.pointer("/data/xdt_shortcode_media")
        .or_else(|| body.pointer("/data/shortcode_media"))
}

#[async_trait]
impl FetchStrategy for GraphqlFetcher {
    fn name(&self) -> &'static str {
        "graphql"
    }

    async fn fetch(&self, shortcode: &str) -> Result<Option<MediaDescriptor>> {
        let variables = serde_json::json!({ "shortcode": shortcode }).to_string();
        let form = [
            ("doc_id", self.config.doc_id.as_str()),
            ("variables", variables.as_str()),
            ("lsd", self.config.lsd_token.as_str()),
        ];

        let response = self
            .client
            .post_form(&self.config.graphql_endpoint, self.headers.clone(), &form)
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!("graphql lookup for {} returned HTTP {}", shortcode, status);
            return Ok(None);
        }

        let body: Value = match response.json().await {
            Ok(value) => value,
            Err(err) => {
                debug!("graphql response for {} is not JSON: {}", shortcode, err);
                return Ok(None);
            }
        };

        match media_from_payload(&body) {
            Some(media) => Ok(Some(MediaDescriptor::from_value(media))),
            None => {
                debug!("graphql payload for {} has no shortcode media", shortcode);
                Ok(None)
            }
        }
    }
}
