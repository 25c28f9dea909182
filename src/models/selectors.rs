// src/models/selectors.rs

//! Declarative source definitions as written in the configuration file.

use serde::{Deserialize, Serialize};

/// One `[[sources]]` entry: where a listing lives and how to read it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceConfig {
    /// Display name, also used as the source label in messages
    pub name: String,

    /// URL of the listing page
    pub url: String,

    /// Base for resolving relative links (defaults to the listing URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Selector for the element wrapping the item list
    pub container: String,

    /// Selector for each item within the container
    pub items: String,

    /// Title rule; a bare selector reads the element text
    pub title: FieldSelector,

    /// Link rule; a bare selector reads `href`
    pub link: FieldSelector,

    /// Preview image rule; a bare selector reads `src`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<FieldSelector>,

    /// Query appended to article links to request an alternate rendering
    /// (e.g. `outputType=amp`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_query: Option<String>,

    /// Detail page selectors
    #[serde(default)]
    pub detail: DetailSelectors,
}

/// A field lookup inside an item node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum FieldSelector {
    /// Bare selector; the field's default attribute applies
    Selector(String),

    /// Selector with an explicit attribute (`attr = "text"` reads the text)
    Attr { selector: String, attr: String },
}

impl FieldSelector {
    /// The CSS selector part.
    pub fn selector(&self) -> &str {
        match self {
            Self::Selector(selector) | Self::Attr { selector, .. } => selector,
        }
    }

    /// The attribute to read, `None` meaning element text.
    pub fn attr<'a>(&'a self, default_attr: Option<&'a str>) -> Option<&'a str> {
        match self {
            Self::Selector(_) => default_attr,
            Self::Attr { attr, .. } if attr == TEXT_ATTR => None,
            Self::Attr { attr, .. } => Some(attr),
        }
    }
}

/// Pseudo attribute selecting element text.
pub const TEXT_ATTR: &str = "text";

/// CSS selectors applied to an article's detail page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailSelectors {
    /// Selector for body paragraphs
    #[serde(default = "default_text_selector")]
    pub text: String,

    /// Selector for candidate images
    #[serde(default = "default_image_selector")]
    pub image: String,

    /// Accepted image URL prefixes (empty accepts any image)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub image_prefixes: Vec<String>,
}

fn default_text_selector() -> String {
    "p".to_string()
}

fn default_image_selector() -> String {
    "img".to_string()
}

impl Default for DetailSelectors {
    fn default() -> Self {
        Self {
            text: default_text_selector(),
            image: default_image_selector(),
            image_prefixes: Vec::new(),
        }
    }
}
