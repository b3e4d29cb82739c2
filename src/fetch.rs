use std::time::Duration;

use once_cell::sync::Lazy;
use sha2::{Digest, Sha256};
use ureq::ResponseExt;

use crate::error::Result;

/// HTTP request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Browser-like User-Agent; plenty of storefronts serve bots an empty shell
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Shared HTTP agent for connection pooling
static HTTP_AGENT: Lazy<ureq::Agent> = Lazy::new(|| {
    ureq::Agent::config_builder()
        .timeout_global(Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)))
        .build()
        .into()
});

/// Content fetched from a page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Final URL after redirects
    pub url: String,
    /// Raw HTML content
    pub html: String,
}

/// Fetch a page with browser-like headers.
///
/// `referer` is the store origin; storefronts commonly gate product markup
/// behind a same-site referer check.
pub fn fetch_page(url: &str, referer: &str) -> Result<PageContent> {
    let response = HTTP_AGENT
        .get(url)
        .header("User-Agent", USER_AGENT)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.5")
        .header("Connection", "keep-alive")
        .header("Referer", referer)
        .call()?;

    let final_url = response.get_uri().to_string();
    let html = response.into_body().read_to_string()?;

    Ok(PageContent {
        url: final_url,
        html,
    })
}

/// Resolve a potentially relative URL against a base URL
pub fn resolve_url(base: &str, relative: &str) -> Option<String> {
    // If already absolute, return as-is
    if relative.starts_with("http://") || relative.starts_with("https://") {
        return Some(relative.to_string());
    }

    let base_url = url::Url::parse(base).ok()?;
    base_url.join(relative).ok().map(|u| u.to_string())
}

/// SHA-256 of page HTML, hex encoded. Two paths serving identical markup
/// hash the same, so aliased pages are extracted once per crawl.
pub fn content_hash(html: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(html.as_bytes());
    hex::encode(hasher.finalize())
}
