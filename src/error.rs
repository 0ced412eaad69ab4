use thiserror::Error;

/// Rejected input, raised before any network I/O is attempted.
///
/// This is the only error `Checker::check` returns; network and parse
/// failures are folded into the result instead so a scheduled run can never
/// be crashed by one bad product page.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("product URL is empty")]
    EmptyUrl,

    #[error("not a well-formed absolute URL: {0}")]
    MalformedUrl(String),

    #[error("unsupported URL scheme `{0}` (expected http or https)")]
    UnsupportedScheme(String),
}
