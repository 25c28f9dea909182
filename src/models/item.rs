//! Listing candidates and their detail content.

use std::fmt;

use crate::utils::url::canonicalize;

/// Identity of an article: its link without query string or fragment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey(String);

impl CanonicalKey {
    /// Derive the key for a link.
    pub fn from_link(link: &str) -> Self {
        Self(canonicalize(link))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An entry read off a listing page, not yet deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateItem {
    /// Name of the source that listed it
    pub source: String,

    pub title: String,

    /// Absolute article URL
    pub link: String,

    /// Preview image from the listing, if any
    pub image: Option<String>,
}

impl CandidateItem {
    /// Identity used for deduplication.
    pub fn key(&self) -> CanonicalKey {
        CanonicalKey::from_link(&self.link)
    }
}

/// Body text and representative image pulled from a detail page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetailContent {
    /// Paragraphs joined by blank lines
    pub text: String,

    pub image: Option<String>,
}

impl DetailContent {
    /// True when the page yielded no usable text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_ignores_tracking_query() {
        let a = CandidateItem {
            source: "S".into(),
            title: "T".into(),
            link: "https://a.com/nota-1?utm_source=home".into(),
            image: None,
        };
        let b = CandidateItem {
            link: "https://a.com/nota-1#comments".into(),
            ..a.clone()
        };
        assert_eq!(a.key(), b.key());
        assert_eq!(a.key().as_str(), "https://a.com/nota-1");
    }

    #[test]
    fn test_detail_is_empty() {
        assert!(DetailContent::default().is_empty());
        assert!(
            DetailContent {
                text: " \n ".into(),
                image: Some("x".into())
            }
            .is_empty()
        );
    }
}
