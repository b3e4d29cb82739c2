//! Shared helpers for the CLI binary

/// Normalize a store URL argument. Accepts full URLs and bare domains:
/// "shopdydy.com" becomes "https://shopdydy.com".
pub fn normalize_store_url(input: &str) -> Option<String> {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        return url::Url::parse(input).ok().map(|_| input.to_string());
    }
    // Looks like a bare domain: add a scheme and re-check
    if input.contains('.') && !input.contains(' ') && !input.starts_with('-') {
        let with_scheme = format!("https://{}", input);
        if url::Url::parse(&with_scheme).is_ok() {
            return Some(with_scheme);
        }
    }
    None
}
