use std::time::Duration;

use anyhow::Result;
use reqwest::blocking::Client;
use url::Url;

use crate::error::InvalidInput;
use crate::fetcher::{self, FetchedPage};
use crate::models::{AvailabilityResult, AvailabilityStatus};
use crate::parser::StockMarkers;

/// Turns a product URL into an `AvailabilityResult`.
///
/// `check` is total over valid URLs: network failures, non-2xx responses and
/// unparseable pages all come back as a result, never as an error. A single
/// attempt is made per call; retry policy belongs to the caller.
pub struct Checker {
    client: Client,
    markers: StockMarkers,
}

impl Checker {
    pub fn new(markers: StockMarkers, timeout: Duration) -> Result<Self> {
        let client = fetcher::build_client(timeout)?;
        Ok(Self { client, markers })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(StockMarkers::default(), fetcher::DEFAULT_TIMEOUT)
    }

    /// The only Err this returns is `InvalidInput`, raised before any I/O.
    pub fn check(&self, url: &str) -> Result<AvailabilityResult, InvalidInput> {
        let url = validate_url(url)?;
        Ok(self.check_validated(&url))
    }

    fn check_validated(&self, url: &Url) -> AvailabilityResult {
        let page = match fetcher::fetch_page(&self.client, url.as_str()) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "request failed");
                return AvailabilityResult::new(
                    AvailabilityStatus::Error,
                    url.as_str(),
                    Some(format!("request failed: {e}")),
                );
            }
        };

        let FetchedPage { status, body } = page;
        if !status.is_success() {
            tracing::warn!(url = %url, %status, "unexpected status code");
            return AvailabilityResult::new(
                AvailabilityStatus::Error,
                url.as_str(),
                Some(format!("unexpected status code: {status}")),
            );
        }

        match self.markers.extract(&body) {
            Some(text) => {
                let status = self.markers.classify(&text);
                AvailabilityResult::new(status, url.as_str(), Some(text))
            }
            None => AvailabilityResult::new(
                AvailabilityStatus::Unknown,
                url.as_str(),
                Some("no stock-status marker found in page".to_string()),
            ),
        }
    }
}

/// Fail-fast URL validation; runs before the client is ever touched.
pub fn validate_url(raw: &str) -> Result<Url, InvalidInput> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(InvalidInput::EmptyUrl);
    }
    let url = Url::parse(trimmed)
        .map_err(|e| InvalidInput::MalformedUrl(format!("{trimmed}: {e}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(InvalidInput::UnsupportedScheme(other.to_string())),
    }
}
