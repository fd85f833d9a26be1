//! HTTP client for the shuttle schedule page.

use std::time::Duration;

use reqwest::Client;

use crate::error::ScraperError;

/// Fetches the raw markup of the schedule page.
///
/// One GET per call. Non-200 responses and network failures (including the
/// configured timeout) are returned as typed errors; nothing is retried.
pub struct ShuttleClient {
    client: Client,
}

impl ShuttleClient {
    /// Creates a `ShuttleClient` with a request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches `url` and returns the response body.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::UnexpectedStatus`]: any status other than 200.
    /// - [`ScraperError::Http`]: network, TLS, or timeout failure, or a body
    ///   that is not valid text.
    pub async fn fetch_page(&self, url: &str) -> Result<String, ScraperError> {
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url, bytes = body.len(), "fetched schedule page");
        Ok(body)
    }
}
