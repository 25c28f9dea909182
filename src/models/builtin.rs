//! Built-in source definitions.

use scraper::ElementRef;
use url::Url;

use crate::error::Result;
use crate::models::source::{DetailRules, FieldRule, SourceDefinition, parse_selector};

const LAREPUBLICA_BASE: &str = "https://larepublica.pe";

/// All built-in sources, in registration order.
pub fn default_sources() -> Result<Vec<SourceDefinition>> {
    Ok(vec![larepublica_espectaculos()?])
}

/// La República, entertainment section.
pub fn larepublica_espectaculos() -> Result<SourceDefinition> {
    Ok(SourceDefinition {
        name: "La República - Espectáculos".to_string(),
        url: format!("{LAREPUBLICA_BASE}/espectaculos"),
        base_url: Url::parse(LAREPUBLICA_BASE)?,
        container: parse_selector("div.ListSection_list__Ew_UF")?,
        items: parse_selector("div.ListSection_list__section--item__zeP_z")?,
        title: FieldRule::select("h2 a", None)?,
        link: FieldRule::Extract(headline_href),
        image: Some(FieldRule::Extract(first_img_src)),
        fallback_query: Some("outputType=amp".to_string()),
        detail: DetailRules {
            text: parse_selector("p")?,
            image: parse_selector("img")?,
            image_prefixes: vec![
                "https://imgmedia.larepublica.pe/".to_string(),
                "http://imgmedia.larepublica.pe/".to_string(),
            ],
        },
    })
}

/// `href` of the anchor inside the item's first `h2`.
fn headline_href(item: ElementRef<'_>) -> Option<String> {
    let h2 = item
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "h2")?;
    let anchor = h2
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")?;
    anchor.value().attr("href").map(str::to_string)
}

/// `src` of the item's first `img`.
fn first_img_src(item: ElementRef<'_>) -> Option<String> {
    item.descendants()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "img")?
        .value()
        .attr("src")
        .map(str::to_string)
}
