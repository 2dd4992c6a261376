use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref LINK_RE: Regex = Regex::new(r#"(?i)(href|src)="(.*?)"|url\("?'?(.*?)'?"?\)"#)
        .expect("Invalid link pattern");
}

/// Scans raw page text for hyperlink-like references: `href="…"`, `src="…"`
/// and CSS `url(...)`, case-insensitively.
///
/// This is a deliberate pattern match over text, not a markup parse, so
/// truncated or malformed pages yield fewer matches instead of failing.
/// Empty references are yielded; they resolve to the page's own URL.
pub fn links(page: &str) -> impl Iterator<Item = &str> + '_ {
    LINK_RE
        .captures_iter(page)
        .filter_map(|caps| caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str()))
}
