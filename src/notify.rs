use anyhow::Result;
use reqwest::blocking::Client;
use serde_json::json;

use crate::models::{AvailabilityResult, AvailabilityStatus};

/// Where a finished check gets reported. The checker's obligation ends at
/// producing the result; delivery lives behind this seam.
pub trait Notifier {
    fn notify(&self, result: &AvailabilityResult) -> Result<()>;
}

/// Emits the result as a structured log line.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, result: &AvailabilityResult) -> Result<()> {
        tracing::info!(
            status = %result.status,
            url = %result.source_url,
            detail = result.detail.as_deref().unwrap_or(""),
            "availability check finished"
        );
        Ok(())
    }
}

/// Posts the result to a Slack incoming webhook.
pub struct SlackNotifier {
    webhook_url: String,
    client: Client,
}

pub const SLACK_WEBHOOK_ENV: &str = "SLACK_WEB_HOOK_URL";

impl SlackNotifier {
    pub fn new(webhook_url: String) -> Result<Self> {
        Ok(Self {
            webhook_url,
            client: Client::builder().build()?,
        })
    }

    /// None when `SLACK_WEB_HOOK_URL` is unset.
    pub fn from_env() -> Option<Result<Self>> {
        std::env::var(SLACK_WEBHOOK_ENV).ok().map(Self::new)
    }

    fn message_text(result: &AvailabilityResult) -> String {
        let text = result
            .detail
            .clone()
            .unwrap_or_else(|| result.status.to_string());
        if result.status == AvailabilityStatus::Available {
            format!(":tada: {text} :tada:")
        } else {
            text
        }
    }
}

impl Notifier for SlackNotifier {
    fn notify(&self, result: &AvailabilityResult) -> Result<()> {
        tracing::debug!("sending Slack message");
        let resp = self
            .client
            .post(&self.webhook_url)
            .json(&json!({ "text": Self::message_text(result) }))
            .send()?;
        tracing::debug!(status = %resp.status(), url = %resp.url(), "got response");
        resp.error_for_status()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn available_results_get_celebratory_framing() {
        let result = AvailabilityResult::new(
            AvailabilityStatus::Available,
            "https://www.bestbuy.ca/en-ca/product/14575597",
            Some("Available to ship".to_string()),
        );
        assert_eq!(
            SlackNotifier::message_text(&result),
            ":tada: Available to ship :tada:"
        );
    }

    #[test]
    fn other_results_are_sent_verbatim() {
        let result = AvailabilityResult::new(
            AvailabilityStatus::Unavailable,
            "https://www.bestbuy.ca/en-ca/product/14575597",
            Some("Sold out online".to_string()),
        );
        assert_eq!(SlackNotifier::message_text(&result), "Sold out online");
    }

    #[test]
    fn missing_detail_falls_back_to_the_status() {
        let result = AvailabilityResult::new(
            AvailabilityStatus::Unknown,
            "https://www.bestbuy.ca/en-ca/product/14575597",
            None,
        );
        assert_eq!(SlackNotifier::message_text(&result), "UNKNOWN");
    }
}
