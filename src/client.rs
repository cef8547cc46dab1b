//! HTTP client shared by the fetch strategies

use crate::config::ExtractorConfig;
use crate::error::{ExtractError, Result};
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT},
    Client, Response,
};
use std::time::Duration;
use tracing::debug;

/// Thin wrapper over a pooled `reqwest::Client`, built once from the
/// process configuration.
///
/// Deliberately has no retry loop: a failed outbound call falls straight
/// through to the caller, which treats it as "no result" for that stage.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: &ExtractorConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .map_err(|e| ExtractError::Internal(format!("invalid user agent: {}", e)))?,
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let builder = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .gzip(config.enable_compression)
            .brotli(config.enable_compression)
            .deflate(config.enable_compression);

        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Perform a GET request. Transport failures surface as errors; the
    /// caller is responsible for interpreting the status code.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("HTTP GET {}", url);
        Ok(self.client.get(url).send().await?)
    }

    /// GET a URL and return the body as text, requiring a success status.
    pub async fn get_text(&self, url: &str) -> Result<String> {
        let response = self.get(url).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ExtractError::Upstream(format!(
                "GET {} returned HTTP {}",
                url, status
            )));
        }
        Ok(response.text().await?)
    }

    /// POST a form body with extra headers layered over the defaults.
    pub async fn post_form(
        &self,
        url: &str,
        headers: HeaderMap,
        form: &[(&str, &str)],
    ) -> Result<Response> {
        debug!("HTTP POST {}", url);
        Ok(self
            .client
            .post(url)
            .headers(headers)
            .form(form)
            .send()
            .await?)
    }

    /// Get the underlying reqwest client
    pub fn inner(&self) -> &Client {
        &self.client
    }
}
