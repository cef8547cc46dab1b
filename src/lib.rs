//! reelgrab - Instagram reel resolver service
//!
//! Accepts a post/reel/tv URL and resolves it to a direct video URL plus
//! metadata (thumbnail, caption, owner, counts) over a small HTTP API.
//!
//! # How it works
//!
//! - **Validate**: only Instagram post/reel/tv URL shapes are accepted
//! - **Primary fetch**: the internal GraphQL query endpoint, best effort
//! - **Fallback scrape**: JSON blobs embedded in the raw post page
//! - **Quality selection**: widest video variant, stable on ties
//! - **Shape**: a fixed external JSON contract, nothing upstream leaks
//!
//! A request performs at most two sequential outbound calls and retains no
//! state afterwards. Failures degrade stage by stage to "no result" rather
//! than aborting; only genuinely unexpected faults surface as 500s.

pub mod client;
pub mod config;
pub mod error;
pub mod graphql;
pub mod media;
pub mod pipeline;
pub mod scrape;
pub mod server;
pub mod shortcode;

pub use client::HttpClient;
pub use config::ExtractorConfig;
pub use error::{ExtractError, Result};
pub use media::{DownloadData, MediaDescriptor, SelectedMedia, VideoVersion};
pub use pipeline::{ExtractionPipeline, FetchStrategy};
pub use server::{router, AppState};
pub use shortcode::ShortcodeExtractor;
