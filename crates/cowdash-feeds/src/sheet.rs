//! Published Google Sheet source: one HTTP GET per fetch.

use crate::{FeedError, TicketSource};
use std::time::Duration;

/// Fetches the sheet's CSV export over HTTP(S).
///
/// Any non-2xx answer counts as a failed fetch. The body is read as text
/// with no encoding negotiation.
#[derive(Debug, Clone)]
pub struct SheetSource {
    client: reqwest::Client,
    url: String,
}

impl SheetSource {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FeedError> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| FeedError::Request { url: url.clone(), source })?;
        Ok(Self { client, url })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl TicketSource for SheetSource {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch_csv(&self) -> Result<String, FeedError> {
        let request_error = |source: reqwest::Error| FeedError::Request { url: self.url.clone(), source };

        tracing::debug!(url = %self.url, "fetching sheet");
        let response = self
            .client
            .get(&self.url)
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status { url: self.url.clone(), status });
        }

        response.text().await.map_err(request_error)
    }
}
