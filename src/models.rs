use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized outcome of one availability check.
///
/// Exactly one variant applies per check. `Unknown` means the page loaded but
/// the stock marker was missing or unrecognized; `Error` means the page could
/// not be loaded at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    Available,
    Unavailable,
    Unknown,
    Error,
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AvailabilityStatus::Available => "AVAILABLE",
            AvailabilityStatus::Unavailable => "UNAVAILABLE",
            AvailabilityStatus::Unknown => "UNKNOWN",
            AvailabilityStatus::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// The sole artifact a check produces. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityResult {
    pub status: AvailabilityStatus,
    pub source_url: String,
    /// Raw matched marker text, or the error message for `Error` results.
    pub detail: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl AvailabilityResult {
    pub fn new(
        status: AvailabilityStatus,
        source_url: impl Into<String>,
        detail: Option<String>,
    ) -> Self {
        Self {
            status,
            source_url: source_url.into(),
            detail,
            checked_at: Utc::now(),
        }
    }
}
