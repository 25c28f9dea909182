// src/models/source.rs

//! Compiled source definitions.
//!
//! A [`SourceDefinition`] is plain data: parsed selectors plus, for built-in
//! sources, small pure extraction functions. The pipeline never special-cases
//! a source; adding one means adding a definition.

use std::fmt;

use scraper::{ElementRef, Selector};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{FieldSelector, SourceConfig};
use crate::utils::text::normalize_whitespace;
use crate::utils::url::with_query;

/// Side-effect-free extraction over one listing item node.
pub type ExtractFn = fn(ElementRef<'_>) -> Option<String>;

/// How one field of a listing item is read.
#[derive(Clone)]
pub enum FieldRule {
    /// First match of `selector` inside the item; `attr` or, when `None`,
    /// the whitespace-normalized text.
    Select {
        selector: Selector,
        attr: Option<String>,
    },

    /// Custom extraction function.
    Extract(ExtractFn),
}

impl FieldRule {
    /// Build a selector rule.
    pub fn select(selector: &str, attr: Option<&str>) -> Result<Self> {
        Ok(Self::Select {
            selector: parse_selector(selector)?,
            attr: attr.map(str::to_string),
        })
    }

    fn from_config(field: &FieldSelector, default_attr: Option<&str>) -> Result<Self> {
        Self::select(field.selector(), field.attr(default_attr))
    }

    /// Apply the rule to an item node. Blank results count as absent.
    pub fn apply(&self, item: ElementRef<'_>) -> Option<String> {
        let value = match self {
            Self::Select { selector, attr } => {
                let element = item.select(selector).next()?;
                match attr {
                    Some(attr) => element.value().attr(attr)?.trim().to_string(),
                    None => element_text(element),
                }
            }
            Self::Extract(extract) => extract(item)?.trim().to_string(),
        };
        (!value.is_empty()).then_some(value)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select { selector, attr } => f
                .debug_struct("Select")
                .field("selector", selector)
                .field("attr", attr)
                .finish(),
            Self::Extract(_) => f.write_str("Extract(..)"),
        }
    }
}

/// Detail page rules.
#[derive(Debug, Clone)]
pub struct DetailRules {
    /// Body paragraph selector
    pub text: Selector,

    /// Candidate image selector
    pub image: Selector,

    /// Accepted image URL prefixes; empty accepts any `src`
    pub image_prefixes: Vec<String>,
}

impl DetailRules {
    /// Whether an image URL comes from the expected media host.
    pub fn accepts_image(&self, src: &str) -> bool {
        self.image_prefixes.is_empty()
            || self
                .image_prefixes
                .iter()
                .any(|prefix| src.starts_with(prefix.as_str()))
    }
}

/// A registered news source.
#[derive(Debug, Clone)]
pub struct SourceDefinition {
    /// Display name and registry key
    pub name: String,

    /// Listing page URL
    pub url: String,

    /// Base for resolving relative links
    pub base_url: Url,

    /// Element wrapping the item list
    pub container: Selector,

    /// Item nodes within the container
    pub items: Selector,

    pub title: FieldRule,
    pub link: FieldRule,
    pub image: Option<FieldRule>,

    /// Query requesting the alternate (full-content) rendering
    pub fallback_query: Option<String>,

    pub detail: DetailRules,
}

impl SourceDefinition {
    /// Compile a configuration entry, parsing every selector.
    pub fn from_config(config: &SourceConfig) -> Result<Self> {
        if config.name.trim().is_empty() {
            return Err(AppError::config(format!(
                "source with listing {} has an empty name",
                config.url
            )));
        }

        let base_url = Url::parse(config.base_url.as_deref().unwrap_or(&config.url))?;

        Ok(Self {
            name: config.name.clone(),
            url: config.url.clone(),
            base_url,
            container: parse_selector(&config.container)?,
            items: parse_selector(&config.items)?,
            title: FieldRule::from_config(&config.title, None)?,
            link: FieldRule::from_config(&config.link, Some("href"))?,
            image: config
                .image
                .as_ref()
                .map(|image| FieldRule::from_config(image, Some("src")))
                .transpose()?,
            fallback_query: config
                .fallback_query
                .as_ref()
                .map(|q| q.trim().to_string())
                .filter(|q| !q.is_empty()),
            detail: DetailRules {
                text: parse_selector(&config.detail.text)?,
                image: parse_selector(&config.detail.image)?,
                image_prefixes: config.detail.image_prefixes.clone(),
            },
        })
    }

    /// The alternate-rendering URL for an article, if this source has one.
    pub fn fallback_url(&self, link: &str) -> Option<String> {
        self.fallback_query
            .as_deref()
            .map(|query| with_query(link, query))
    }
}

/// Parse a CSS selector, mapping failures to [`AppError::Selector`].
pub fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}

/// Whitespace-normalized text content of an element.
pub fn element_text(element: ElementRef<'_>) -> String {
    normalize_whitespace(&element.text().collect::<String>())
}
