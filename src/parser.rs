//! Site-specific stock-marker extraction.
//!
//! The selectors and phrase lists here track Best Buy's product page markup,
//! which changes without notice. They are data, not logic: load a different
//! `MarkerConfig` (JSON, `--markers`) when the site shifts, and keep the rest
//! of the checker untouched.

use anyhow::{Context, Result};
use scraper::{Html, Selector};
use serde::Deserialize;

use crate::models::AvailabilityStatus;

/// Declarative description of where the stock marker lives and how its text
/// maps to a status.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerConfig {
    /// Element that contains the availability widget.
    pub container_selector: String,
    /// Element inside the container whose text is the marker; the last match
    /// wins (the site nests a label span before the status span).
    pub marker_selector: String,
    /// Case-insensitive substrings meaning the product can be bought.
    pub available_phrases: Vec<String>,
    /// Case-insensitive substrings meaning it cannot. Checked first, so that
    /// "Currently unavailable" never matches the "available" phrase.
    pub unavailable_phrases: Vec<String>,
}

impl Default for MarkerConfig {
    fn default() -> Self {
        Self {
            container_selector: "div.x-pdp-availability-online".to_string(),
            marker_selector: "span".to_string(),
            available_phrases: vec!["available".into(), "in stock".into()],
            unavailable_phrases: vec![
                "unavailable".into(),
                "out of stock".into(),
                "sold out".into(),
                "coming soon".into(),
            ],
        }
    }
}

impl MarkerConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid marker config")
    }
}

/// A `MarkerConfig` with its selectors compiled, ready to run against pages.
pub struct StockMarkers {
    container: Selector,
    marker: Selector,
    available_phrases: Vec<String>,
    unavailable_phrases: Vec<String>,
}

impl StockMarkers {
    pub fn compile(config: &MarkerConfig) -> Result<Self> {
        let container = Selector::parse(&config.container_selector)
            .map_err(|e| anyhow::anyhow!("bad container selector {:?}: {e}", config.container_selector))?;
        let marker = Selector::parse(&config.marker_selector)
            .map_err(|e| anyhow::anyhow!("bad marker selector {:?}: {e}", config.marker_selector))?;
        Ok(Self {
            container,
            marker,
            available_phrases: lowercased(&config.available_phrases),
            unavailable_phrases: lowercased(&config.unavailable_phrases),
        })
    }

    /// Pulls the raw marker text out of a product page, if present.
    pub fn extract(&self, html: &str) -> Option<String> {
        let doc = Html::parse_document(html);
        let container = doc.select(&self.container).next()?;
        let span = container.select(&self.marker).last()?;
        let text = span.text().collect::<String>().trim().to_string();
        if text.is_empty() { None } else { Some(text) }
    }

    /// Maps extracted marker text to a status. Unrecognized text is surfaced
    /// as `Unknown`, never guessed either way.
    pub fn classify(&self, text: &str) -> AvailabilityStatus {
        let lowered = text.to_lowercase();
        if self.unavailable_phrases.iter().any(|p| lowered.contains(p)) {
            AvailabilityStatus::Unavailable
        } else if self.available_phrases.iter().any(|p| lowered.contains(p)) {
            AvailabilityStatus::Available
        } else {
            AvailabilityStatus::Unknown
        }
    }
}

impl Default for StockMarkers {
    fn default() -> Self {
        // The built-in config uses known-good selectors.
        Self::compile(&MarkerConfig::default()).unwrap()
    }
}

fn lowercased(phrases: &[String]) -> Vec<String> {
    phrases.iter().map(|p| p.to_lowercase()).collect()
}
