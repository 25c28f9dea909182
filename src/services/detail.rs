// src/services/detail.rs

//! Article detail extraction.

use scraper::Html;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{DetailContent, SourceDefinition};
use crate::models::source::element_text;
use crate::utils::http::PageFetcher;

/// Fetch an article and extract its body and lead image.
///
/// Sources with a fallback query are read through their alternate
/// rendering first, then through the plain link. A page that fails to load
/// or yields no paragraphs moves on to the next URL. When every attempt
/// comes up empty the result is [`AppError::DetailFetch`]; callers treat it
/// as a soft failure and retry the item next cycle.
pub async fn fetch_detail(
    fetcher: &dyn PageFetcher,
    source: &SourceDefinition,
    link: &str,
    max_paragraphs: usize,
) -> Result<DetailContent> {
    let attempts: Vec<String> = source
        .fallback_url(link)
        .into_iter()
        .chain(std::iter::once(link.to_string()))
        .collect();

    let mut last_failure = String::from("no attempt made");
    for url in &attempts {
        match fetcher.fetch_detail(url).await {
            Ok(html) => {
                let content = parse_detail(source, &html, url, max_paragraphs);
                if !content.is_empty() {
                    return Ok(content);
                }
                log::debug!("No paragraphs extracted from {url}");
                last_failure = format!("no text extracted from {url}");
            }
            Err(e) => {
                log::debug!("Detail fetch failed for {url}: {e}");
                last_failure = format!("{url}: {e}");
            }
        }
    }

    Err(AppError::detail(link, last_failure))
}

/// Extract detail content from a fetched page.
///
/// Keeps at most `max_paragraphs` non-empty paragraphs. The image is the
/// first one matching the detail selector whose resolved URL carries an
/// accepted media prefix.
pub fn parse_detail(
    source: &SourceDefinition,
    html: &str,
    page_url: &str,
    max_paragraphs: usize,
) -> DetailContent {
    let document = Html::parse_document(html);

    let text = document
        .select(&source.detail.text)
        .map(element_text)
        .filter(|p| !p.is_empty())
        .take(max_paragraphs)
        .collect::<Vec<_>>()
        .join("\n\n");

    let base = Url::parse(page_url).unwrap_or_else(|_| source.base_url.clone());
    let image = document
        .select(&source.detail.image)
        .filter_map(|img| img.value().attr("src"))
        .map(str::trim)
        .filter(|src| !src.is_empty())
        .filter_map(|src| base.join(src).ok())
        .map(|url| url.to_string())
        .find(|src| source.detail.accepts_image(src));

    DetailContent { text, image }
}
