//! HTTP client for directory listing pages.

use std::time::Duration;

use localseo_core::AppConfig;
use reqwest::Client;

use crate::error::CitationError;
use crate::retry::retry_with_backoff;

/// Fetches directory listing pages with a per-request timeout.
///
/// 429 and network failures are retried with a doubling delay; 404 and
/// other non-2xx statuses come back as typed errors straight away.
pub struct CitationClient {
    pub(crate) client: Client,
    /// Additional attempts after the first failure.
    pub(crate) max_retries: u32,
    /// Sleep before the first retry; doubled for each subsequent one.
    pub(crate) retry_base_delay_ms: u64,
}

impl CitationClient {
    /// Creates a `CitationClient` with the given timeout, `User-Agent` and
    /// retry policy. Set `max_retries` to `0` to disable retries.
    ///
    /// # Errors
    ///
    /// Returns [`CitationError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        user_agent: &str,
        max_retries: u32,
        retry_base_delay_ms: u64,
    ) -> Result<Self, CitationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            max_retries,
            retry_base_delay_ms,
        })
    }

    /// Builds a client from the application config.
    ///
    /// # Errors
    ///
    /// See [`CitationClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, CitationError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            config.max_retries,
            config.retry_base_delay_ms,
        )
    }

    /// Fetches the HTML body of a listing page.
    ///
    /// # Errors
    ///
    /// - [`CitationError::InvalidUrl`]: `url` does not parse.
    /// - [`CitationError::RateLimited`]: HTTP 429 after all retries.
    /// - [`CitationError::NotFound`]: HTTP 404 (not retried).
    /// - [`CitationError::UnexpectedStatus`]: any other non-2xx status.
    /// - [`CitationError::Http`]: network or TLS failure after all retries.
    pub async fn fetch_page(&self, url: &str) -> Result<String, CitationError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| CitationError::InvalidUrl {
            url: url.to_owned(),
            reason: e.to_string(),
        })?;
        let domain = parsed.host_str().unwrap_or_default().to_owned();

        retry_with_backoff(self.max_retries, self.retry_base_delay_ms, || {
            let parsed = parsed.clone();
            let domain = domain.clone();
            async move {
                let url = parsed.to_string();
                let response = self
                    .client
                    .get(parsed)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await?;
                let status = response.status();

                if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
                    let retry_after_secs = response
                        .headers()
                        .get(reqwest::header::RETRY_AFTER)
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(60);
                    return Err(CitationError::RateLimited {
                        domain,
                        retry_after_secs,
                    });
                }

                if status == reqwest::StatusCode::NOT_FOUND {
                    return Err(CitationError::NotFound { url });
                }

                if !status.is_success() {
                    return Err(CitationError::UnexpectedStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                Ok(response.text().await?)
            }
        })
        .await
    }
}
