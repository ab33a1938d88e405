// * Fast Path - Static HTTP Extraction
// * One plain GET plus a script-free parse. Cheap, but blind to client-rendered
// * content; flags the orchestrator when the document looks like an empty shell.

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use tracing::debug;
use url::Url;

use crate::config::constants::{
    BODY_TEXT_CAP_CHARS, MAX_PRODUCT_PHOTOS, SHELL_TEXT_THRESHOLD_CHARS,
};
use crate::engine::errors::ExtractError;
use crate::engine::page::{ScrapedPage, ScraperOptions};
use crate::engine::{Extraction, PageExtractor};
use crate::network::client::FastClient;
use crate::refinery::content_cleaner::ContentCleaner;
use crate::refinery::metadata::MetadataExtractor;
use crate::refinery::photo_filter::{filter_product_photos, PhotoFilterCriteria, ScrapedImage};

static SELECTOR_IMG: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());

// * Markers left behind by client-side frameworks when the server ships an
// * empty shell for scripts to fill in.
const SHELL_MARKERS: &[&str] = &[
    "__NEXT_DATA__",
    "__NUXT__",
    "data-reactroot",
    r#"id="root""#,
    r#"id="app""#,
    "ng-version",
];

// * Tier-1 extractor. Owns nothing between calls; the HTTP client is built
// * fresh per extraction.
pub struct FastPathExtractor;

impl FastPathExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FastPathExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageExtractor for FastPathExtractor {
    async fn extract(
        &self,
        url: &str,
        options: &ScraperOptions,
    ) -> Result<Extraction, ExtractError> {
        let client = FastClient::new().map_err(ExtractError::Network)?;
        let fetched = client.fetch(url, options.timeout_ms).await?;

        debug!(
            url = %fetched.final_url,
            bytes = fetched.body.len(),
            "fast path fetched document"
        );

        Ok(parse_document(&fetched.body, &fetched.final_url))
    }
}

// * The pure parse stage, separated from the fetch so it can be exercised
// * against static markup.
pub fn parse_document(html: &str, final_url: &Url) -> Extraction {
    let document = Html::parse_document(html);
    let criteria = PhotoFilterCriteria::default();

    let meta = MetadataExtractor::extract(&document, final_url);
    let body_text = ContentCleaner::body_text(&document, BODY_TEXT_CAP_CHARS);
    let images = collect_images(&document, final_url);
    let needs_escalation = is_client_rendered_shell(html, &body_text);

    let page = ScrapedPage {
        url: final_url.to_string(),
        title: meta.title.unwrap_or_default(),
        description: meta.description.unwrap_or_default(),
        og_image: meta.og_image,
        images: filter_product_photos(&images, &criteria, MAX_PRODUCT_PHOTOS),
        body_text,
        tier: 1,
        js_rendered: false,
    };

    Extraction {
        page,
        needs_escalation,
    }
}

// * Collects every <img> with a resolvable src/data-src; unresolvable
// * candidates are dropped here, before ScrapedImage is ever constructed.
fn collect_images(document: &Html, base: &Url) -> Vec<ScrapedImage> {
    let mut images = Vec::new();

    for img in document.select(&SELECTOR_IMG) {
        let src = img
            .value()
            .attr("src")
            .or_else(|| img.value().attr("data-src"))
            .map(str::trim)
            .unwrap_or("");
        if src.is_empty() {
            continue;
        }

        let Ok(resolved) = base.join(src) else {
            continue;
        };

        images.push(ScrapedImage {
            url: resolved.to_string(),
            alt: img.value().attr("alt").unwrap_or("").to_string(),
            width: dimension_attr(img.value().attr("width")),
            height: dimension_attr(img.value().attr("height")),
        });
    }

    images
}

// * Markup dimensions count only when they parse as positive integers.
fn dimension_attr(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|value| value.trim().trim_end_matches("px").parse::<u32>().ok())
        .filter(|&value| value > 0)
}

// * A client-rendered shell has negligible extracted text alongside a
// * framework marker in the raw markup.
pub fn is_client_rendered_shell(html: &str, body_text: &str) -> bool {
    body_text.chars().count() < SHELL_TEXT_THRESHOLD_CHARS
        && SHELL_MARKERS.iter().any(|marker| html.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_attr_parsing() {
        assert_eq!(dimension_attr(Some("640")), Some(640));
        assert_eq!(dimension_attr(Some(" 640px ")), Some(640));
        assert_eq!(dimension_attr(Some("0")), None);
        assert_eq!(dimension_attr(Some("100%")), None);
        assert_eq!(dimension_attr(Some("auto")), None);
        assert_eq!(dimension_attr(None), None);
    }

    #[test]
    fn test_shell_detection_needs_both_signals() {
        let shell = r#"<html><body><div id="root"></div><script src="/bundle.js"></script></body></html>"#;
        assert!(is_client_rendered_shell(shell, ""));

        // * Marker present but plenty of text: a server-rendered React page
        let text = "word ".repeat(40);
        assert!(!is_client_rendered_shell(shell, &text));

        // * Thin text but no marker: just a sparse static page
        assert!(!is_client_rendered_shell(
            "<html><body><p>hi</p></body></html>",
            "hi"
        ));
    }
}
