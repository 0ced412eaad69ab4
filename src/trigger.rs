//! Scheduled-trigger entrypoint.
//!
//! A cloud scheduler invokes the check with a small JSON payload. The payload
//! carries the product URL; when it is absent the original sample product is
//! checked, matching the hands-off "watch one laptop" deployment.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::checker::Checker;
use crate::error::InvalidInput;
use crate::models::AvailabilityResult;
use crate::notify::Notifier;
use crate::DEFAULT_PRODUCT_URL;

#[derive(Debug, Clone, Deserialize)]
pub struct TriggerPayload {
    #[serde(default)]
    pub url: Option<String>,
}

impl TriggerPayload {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid trigger payload")
    }

    pub fn url(&self) -> &str {
        self.url.as_deref().unwrap_or(DEFAULT_PRODUCT_URL)
    }
}

/// Runs one check for the payload and forwards the result to the sink.
///
/// A failing sink is logged and swallowed; the result is still returned so
/// the trigger layer can record it.
pub fn handle(
    checker: &Checker,
    notifier: &dyn Notifier,
    payload: &TriggerPayload,
) -> Result<AvailabilityResult, InvalidInput> {
    let result = checker.check(payload.url())?;
    if let Err(e) = notifier.notify(&result) {
        tracing::warn!(error = %e, "notification sink failed");
    }
    Ok(result)
}
