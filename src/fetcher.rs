use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::redirect;

// Headers that emulate a browser; some storefronts serve bots a stripped page.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_6) \
     AppleWebKit/605.1.15 (KHTML, like Gecko) Version/11.1.2 Safari/605.1.15";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en,en-US;q=0.5";

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw fetch outcome; the caller decides what a non-2xx status means.
pub struct FetchedPage {
    pub status: reqwest::StatusCode,
    pub body: String,
}

pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    let redirect_policy = redirect::Policy::custom(|attempt| {
        if attempt.previous().len() > 10 {
            attempt.error("too many redirects (>10)")
        } else {
            attempt.follow()
        }
    });

    Client::builder()
        .redirect(redirect_policy)
        .timeout(timeout)
        .build()
}

pub fn fetch_page(client: &Client, url: &str) -> Result<FetchedPage, reqwest::Error> {
    tracing::debug!(url, "retrieving product page");
    let resp = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header("Accept", ACCEPT)
        .header("Accept-Language", ACCEPT_LANGUAGE)
        .send()?;

    let status = resp.status();
    tracing::debug!(%status, url = %resp.url(), "got response");
    let body = resp.text()?;
    Ok(FetchedPage { status, body })
}
