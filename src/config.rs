//! Configuration for the reel resolver service

use serde::{Deserialize, Serialize};

/// Instagram internal GraphQL query endpoint.
const GRAPHQL_ENDPOINT: &str = "https://www.instagram.com/api/graphql";

/// Base URL used to rebuild a post page from a shortcode.
const PAGE_BASE_URL: &str = "https://www.instagram.com/p";

/// Instagram internal app ID (public, embedded in the web app).
const IG_APP_ID: &str = "936619743392459";

/// Facebook LSD token (anti-CSRF, public static value used by web scrapers).
const FB_LSD_TOKEN: &str = "AVqbxe3J_YA";

/// Facebook ASBD ID (public, embedded in the web app).
const FB_ASBD_ID: &str = "129477";

/// GraphQL query document id for shortcode media lookups. Instagram rotates
/// this every few weeks; override via `INSTAGRAM_DOC_ID` without a rebuild.
const DEFAULT_DOC_ID: &str = "8845758582119845";

/// Process-wide extractor configuration.
///
/// Built once at startup and passed by reference into the client and the
/// fetch strategies; nothing mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractorConfig {
    /// User agent string presented to Instagram
    pub user_agent: String,

    /// Connection establishment timeout in seconds
    pub connect_timeout_secs: u64,

    /// Whole-request timeout in seconds
    pub request_timeout_secs: u64,

    /// GraphQL query endpoint
    pub graphql_endpoint: String,

    /// GraphQL document id for the shortcode media query
    pub doc_id: String,

    /// X-IG-App-ID header value
    pub app_id: String,

    /// X-FB-LSD header value
    pub lsd_token: String,

    /// X-ASBD-ID header value
    pub asbd_id: String,

    /// Base URL for rebuilding post pages from shortcodes
    pub page_base_url: String,

    /// Enable gzip/brotli/deflate on outbound requests
    pub enable_compression: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
                .to_string(),
            connect_timeout_secs: 5,
            request_timeout_secs: 10,
            graphql_endpoint: GRAPHQL_ENDPOINT.to_string(),
            doc_id: DEFAULT_DOC_ID.to_string(),
            app_id: IG_APP_ID.to_string(),
            lsd_token: FB_LSD_TOKEN.to_string(),
            asbd_id: FB_ASBD_ID.to_string(),
            page_base_url: PAGE_BASE_URL.to_string(),
            enable_compression: true,
        }
    }
}

impl ExtractorConfig {
    /// Default configuration with environment overrides applied.
    ///
    /// `INSTAGRAM_DOC_ID` and `REELGRAB_USER_AGENT` are the knobs operators
    /// actually need to turn in production; everything else keeps defaults.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(doc_id) = std::env::var("INSTAGRAM_DOC_ID") {
            if !doc_id.trim().is_empty() {
                config.doc_id = doc_id.trim().to_string();
            }
        }
        if let Ok(ua) = std::env::var("REELGRAB_USER_AGENT") {
            if !ua.trim().is_empty() {
                config.user_agent = ua.trim().to_string();
            }
        }
        config
    }

    /// Canonical post page URL for a shortcode.
    pub fn page_url(&self, shortcode: &str) -> String {
        format!("{}/{}/", self.page_base_url, shortcode)
    }
}
