// src/services/listing.rs

//! Listing page extraction.
//!
//! Turns a source's listing page into candidate items, oldest first.

use scraper::Html;

use crate::error::{AppError, Result};
use crate::models::{CandidateItem, SourceDefinition};
use crate::utils::http::PageFetcher;

/// Fetch a source's listing page once and extract its candidates.
///
/// No retries here: a failed fetch aborts this source for the current
/// cycle only.
pub async fn fetch_listing(
    fetcher: &dyn PageFetcher,
    source: &SourceDefinition,
) -> Result<Vec<CandidateItem>> {
    log::info!("Fetching listing for {} ({})", source.name, source.url);
    let html = fetcher
        .fetch_listing(&source.url)
        .await
        .map_err(|e| AppError::listing(&source.name, &source.url, e))?;
    parse_listing(source, &html)
}

/// Extract candidates from a listing document.
///
/// Pages list newest first; the result is reversed so that items come out
/// oldest first and get delivered in publication order. A missing container
/// is reported as [`AppError::ListingFetch`].
pub fn parse_listing(source: &SourceDefinition, html: &str) -> Result<Vec<CandidateItem>> {
    let document = Html::parse_document(html);

    let container = document
        .select(&source.container)
        .next()
        .ok_or_else(|| AppError::listing(&source.name, &source.url, "item container not found"))?;

    let mut items: Vec<CandidateItem> = container
        .select(&source.items)
        .filter_map(|node| {
            let title = source.title.apply(node)?;
            let link = source
                .link
                .apply(node)
                .and_then(|href| resolve_http(source, &href))?;
            let image = source
                .image
                .as_ref()
                .and_then(|rule| rule.apply(node))
                .and_then(|src| resolve_http(source, &src));
            Some(CandidateItem {
                source: source.name.clone(),
                title,
                link,
                image,
            })
        })
        .collect();

    items.reverse();
    log::debug!("{}: {} candidate(s) on listing", source.name, items.len());
    Ok(items)
}

/// Resolve against the source base, keeping only http(s) results.
fn resolve_http(source: &SourceDefinition, href: &str) -> Option<String> {
    let url = source.base_url.join(href).ok()?;
    matches!(url.scheme(), "http" | "https").then(|| url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::builtin::larepublica_espectaculos;
    use crate::models::{DetailSelectors, FieldSelector, SourceConfig};

    fn listing_page(items: &[(&str, &str, Option<&str>)]) -> String {
        let body: String = items
            .iter()
            .map(|(title, href, img)| {
                let img = img
                    .map(|src| format!(r#"<img src="{src}">"#))
                    .unwrap_or_default();
                format!(
                    r#"<div class="ListSection_list__section--item__zeP_z">{img}<h2><a href="{href}">{title}</a></h2></div>"#
                )
            })
            .collect();
        format!(
            r#"<html><body><div class="ListSection_list__Ew_UF">{body}</div></body></html>"#
        )
    }

    #[test]
    fn test_newest_first_page_yields_oldest_first() {
        let source = larepublica_espectaculos().unwrap();
        let html = listing_page(&[
            ("C", "/espectaculos/c", None),
            ("B", "/espectaculos/b", None),
            ("A", "/espectaculos/a", None),
        ]);
        let items = parse_listing(&source, &html).unwrap();
        let titles: Vec<_> = items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["A", "B", "C"]);
    }

    #[test]
    fn test_relative_links_resolved_against_base() {
        let source = larepublica_espectaculos().unwrap();
        let html = listing_page(&[(
            "Nota",
            "/espectaculos/2025/01/02/nota-1",
            Some("https://imgmedia.larepublica.pe/x.jpg"),
        )]);
        let items = parse_listing(&source, &html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].link,
            "https://larepublica.pe/espectaculos/2025/01/02/nota-1"
        );
        assert_eq!(
            items[0].image.as_deref(),
            Some("https://imgmedia.larepublica.pe/x.jpg")
        );
        assert_eq!(items[0].source, "La República - Espectáculos");
    }

    #[test]
    fn test_items_without_title_or_link_are_dropped() {
        let source = larepublica_espectaculos().unwrap();
        let html = r#"<div class="ListSection_list__Ew_UF">
            <div class="ListSection_list__section--item__zeP_z"><h2><a href="/x">  </a></h2></div>
            <div class="ListSection_list__section--item__zeP_z"><h2><a>Sin enlace</a></h2></div>
            <div class="ListSection_list__section--item__zeP_z"><p>Sin titular</p></div>
            <div class="ListSection_list__section--item__zeP_z"><h2><a href="javascript:void(0)">JS</a></h2></div>
            <div class="ListSection_list__section--item__zeP_z"><h2><a href="/ok">Bien</a></h2></div>
        </div>"#;
        let items = parse_listing(&source, html).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Bien");
    }

    #[test]
    fn test_missing_container_is_listing_error() {
        let source = larepublica_espectaculos().unwrap();
        let err = parse_listing(&source, "<html><body><p>redesign</p></body></html>").unwrap_err();
        assert!(matches!(err, AppError::ListingFetch { .. }));
    }

    #[test]
    fn test_empty_container_yields_nothing() {
        let source = larepublica_espectaculos().unwrap();
        let items = parse_listing(&source, &listing_page(&[])).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_configured_source_with_attribute_rules() {
        let config = SourceConfig {
            name: "Ejemplo".into(),
            url: "https://www.example.com/entretenimiento/".into(),
            base_url: None,
            container: "div.article-list".into(),
            items: "div.article".into(),
            title: FieldSelector::Selector("h3 a".into()),
            link: FieldSelector::Selector("h3 a".into()),
            image: Some(FieldSelector::Attr {
                selector: "img".into(),
                attr: "data-src".into(),
            }),
            fallback_query: None,
            detail: DetailSelectors::default(),
        };
        let source = SourceDefinition::from_config(&config).unwrap();
        let html = r#"<div class="article-list">
            <div class="article"><img data-src="thumb.jpg"><h3><a href="nota-2">Dos</a></h3></div>
            <div class="article"><h3><a href="https://cdn.example.com/nota-1">Uno</a></h3></div>
        </div>"#;
        let items = parse_listing(&source, html).unwrap();
        assert_eq!(items[0].title, "Uno");
        assert_eq!(items[0].link, "https://cdn.example.com/nota-1");
        assert_eq!(items[0].image, None);
        assert_eq!(
            items[1].link,
            "https://www.example.com/entretenimiento/nota-2"
        );
        assert_eq!(
            items[1].image.as_deref(),
            Some("https://www.example.com/entretenimiento/thumb.jpg")
        );
    }
}
