use anyhow::{Context, Result};
use regex::{Regex, RegexBuilder};

/// Route taken by one absolute URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// Matches the wanted-document pattern.
    Document,
    /// Internal page worth exploring.
    Page,
    /// External, binary, or otherwise non-navigable.
    Ignored,
}

/// Routes absolute URLs using the wanted/binary extension patterns and a
/// site-membership test against the starting URL.
///
/// First match wins: a URL matching both the wanted pattern and the site
/// test is a document, never a page. Extensions listed in both patterns
/// classify as documents for the same reason.
#[derive(Debug)]
pub struct LinkClassifier {
    base_url: String,
    wanted: Regex,
    binary: Regex,
}

impl LinkClassifier {
    pub fn new(base_url: &str, accept: &str, reject: &str) -> Result<Self> {
        let wanted = RegexBuilder::new(accept)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid accept pattern: {accept}"))?;
        let binary = RegexBuilder::new(reject)
            .case_insensitive(true)
            .build()
            .with_context(|| format!("Invalid reject pattern: {reject}"))?;
        Ok(Self {
            base_url: base_url.to_string(),
            wanted,
            binary,
        })
    }

    pub fn classify(&self, url: &str) -> Link {
        if self.wanted.is_match(url) {
            Link::Document
        } else if url.contains(&self.base_url) && !self.binary.is_match(url) {
            Link::Page
        } else {
            Link::Ignored
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Link, LinkClassifier};
    use crate::config::{DEFAULT_ACCEPT, DEFAULT_REJECT};

    fn classifier(base_url: &str) -> LinkClassifier {
        LinkClassifier::new(base_url, DEFAULT_ACCEPT, DEFAULT_REJECT).unwrap()
    }

    #[test]
    fn routes_documents_pages_and_junk() {
        let c = classifier("http://a.fr");
        assert_eq!(c.classify("http://a.fr/c.pdf"), Link::Document);
        assert_eq!(c.classify("http://a.fr/c.htm"), Link::Page);
        assert_eq!(c.classify("http://a.fr/c.css"), Link::Page);
        assert_eq!(c.classify("http://a.fr/c.jpg"), Link::Ignored);
        assert_eq!(c.classify("http://b.fr/c.htm"), Link::Ignored);
        assert_eq!(c.classify("javascript:;"), Link::Ignored);
        assert_eq!(c.classify("mailto:a@a.fr"), Link::Ignored);
    }

    #[test]
    fn extension_matching_is_case_insensitive() {
        let c = classifier("http://a.fr");
        assert_eq!(c.classify("http://a.fr/c.PDF"), Link::Document);
        assert_eq!(c.classify("http://a.fr/c.JPG"), Link::Ignored);
    }

    #[test]
    fn documents_win_over_pages() {
        let c = classifier("http://a.fr");
        // internal URL matching the wanted pattern is a document, never a page
        assert_eq!(c.classify("http://a.fr/b.pdf"), Link::Document);
        // extensions present in both default patterns follow the same rule
        assert_eq!(c.classify("http://a.fr/b.zip"), Link::Document);
        assert_eq!(c.classify("http://a.fr/b.tgz"), Link::Document);
    }

    #[test]
    fn patterns_are_caller_overridable() {
        let c = LinkClassifier::new("http://a.fr", "/raw/", DEFAULT_REJECT).unwrap();
        assert_eq!(c.classify("http://a.fr/raw/test_a.txt"), Link::Document);
        assert_eq!(c.classify("http://a.fr/blob/test_a.txt"), Link::Page);
    }

    #[test]
    fn rejects_invalid_patterns() {
        assert!(LinkClassifier::new("http://a.fr", "(", DEFAULT_REJECT).is_err());
        assert!(LinkClassifier::new("http://a.fr", DEFAULT_ACCEPT, "[").is_err());
    }
}
