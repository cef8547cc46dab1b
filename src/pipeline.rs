//! Request pipeline: validate, resolve, select, shape
//!
//! One pipeline instance serves the whole process. It owns the ordered
//! fetch strategies (GraphQL first, page scrape second) and runs each
//! request through them sequentially, stopping at the first descriptor.
//! Nothing here retains state between requests.

use crate::client::HttpClient;
use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use crate::graphql::GraphqlFetcher;
use crate::media::{DownloadData, MediaDescriptor};
use crate::scrape::PageScraper;
use crate::shortcode::ShortcodeExtractor;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// One way of turning a shortcode into a media descriptor.
///
/// Strategies are tried in registration order. `Ok(None)` means "nothing
/// here, try the next one"; an `Err` is logged by the pipeline and treated
/// exactly the same way. Strategies never retry.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Try to produce a media descriptor for a shortcode
    async fn fetch(&self, shortcode: &str) -> Result<Option<MediaDescriptor>>;
}

/// Validator → shortcode extractor → strategy chain → quality selection →
/// response shaping.
pub struct ExtractionPipeline {
    extractor: ShortcodeExtractor,
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl ExtractionPipeline {
    /// Build the production pipeline: one pooled client shared by the
    /// GraphQL fetcher and the page scraper.
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let client = Arc::new(HttpClient::new(config)?);
        let strategies: Vec<Box<dyn FetchStrategy>> = vec![
            Box::new(GraphqlFetcher::new(client.clone(), config)?),
            Box::new(PageScraper::new(client, config)),
        ];
        Ok(Self::with_strategies(strategies))
    }

    /// Build a pipeline over a custom strategy chain.
    pub fn with_strategies(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self {
            extractor: ShortcodeExtractor::new(),
            strategies,
        }
    }

    /// Resolve a post URL to the shaped download payload.
    pub async fn extract(&self, raw_url: &str) -> Result<DownloadData> {
        if !self.extractor.is_supported_url(raw_url) {
            return Err(ExtractError::InvalidInput(
                "Please provide a valid Instagram post, reel, or tv URL".to_string(),
            ));
        }

        let shortcode = self.extractor.extract(raw_url).ok_or_else(|| {
            ExtractError::NotFound("Could not find a post identifier in the URL".to_string())
        })?;
        debug!("resolving shortcode {}", shortcode);

        let mut descriptor: Option<MediaDescriptor> = None;
        for strategy in &self.strategies {
            match strategy.fetch(&shortcode).await {
                Ok(Some(found)) => {
                    info!("strategy {} resolved {}", strategy.name(), shortcode);
                    descriptor = Some(found);
                    break;
                }
                Ok(None) => {
                    debug!("strategy {} had no result for {}", strategy.name(), shortcode);
                }
                Err(err) => {
                    warn!("strategy {} failed for {}: {}", strategy.name(), shortcode, err);
                }
            }
        }

        let descriptor = descriptor
            .ok_or_else(|| ExtractError::NotFound("No media found for this URL".to_string()))?;

        if !descriptor.is_video {
            return Err(ExtractError::NotFound(
                "This post does not contain a video".to_string(),
            ));
        }

        let selected = descriptor.select_download().ok_or_else(|| {
            ExtractError::NotFound("No downloadable video URL in this post".to_string())
        })?;

        Ok(DownloadData::from_descriptor(
            &descriptor,
            &selected,
            &shortcode,
        ))
    }
}
