use anyhow::Result;
use url::Url;

/// Resolves a raw page reference against the URL of the page it was found on.
///
/// References already qualified with an http(s) scheme are returned verbatim,
/// an empty reference resolves to the page's own URL, and everything else
/// goes through standard relative-URL resolution. References carrying another
/// scheme (`javascript:`, `mailto:`…) come back unchanged for the classifier
/// to discard.
pub fn resolve(page_url: &str, raw: &str) -> Result<String> {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        return Ok(raw.to_string());
    }
    if raw.is_empty() {
        return Ok(page_url.to_string());
    }
    let base = Url::parse(page_url)?;
    Ok(base.join(raw)?.to_string())
}
