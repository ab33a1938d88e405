// * Page Metadata Extraction
// * Extraction chain: Open Graph tags -> standard meta tags -> document fallbacks.
// * The same precedence is computed in-page by the slow path; this module is the
// * static-markup implementation used by the fast path.

use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

use crate::config::constants::DESCRIPTION_MIN_PARAGRAPH_CHARS;

// * Precompiled selectors for metadata extraction
static SELECTOR_META: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());
static SELECTOR_TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static SELECTOR_PARAGRAPHS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("p").unwrap());

/// Title, description, and social image for a page. Fields stay `None` when
/// no stage of the chain produced a value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub og_image: Option<String>,
}

/// Extracts page metadata using a prioritized chain over parsed markup.
pub struct MetadataExtractor;

impl MetadataExtractor {
    /// Runs the full chain. `base_url` is the final post-redirect URL; the
    /// social image is resolved against it and dropped when unresolvable.
    pub fn extract(document: &Html, base_url: &Url) -> PageMeta {
        let mut meta = PageMeta::default();

        Self::extract_open_graph(document, &mut meta);
        Self::extract_meta_tags(document, &mut meta);
        Self::extract_fallbacks(document, &mut meta);

        if let Some(raw) = meta.og_image.take() {
            meta.og_image = base_url.join(raw.trim()).ok().map(|url| url.to_string());
        }

        meta
    }

    // * Step 1: Open Graph tags fill every field they can.
    fn extract_open_graph(document: &Html, meta: &mut PageMeta) {
        for tag in document.select(&SELECTOR_META) {
            let property = tag.value().attr("property").unwrap_or("");
            let content = tag.value().attr("content").unwrap_or("").trim();

            if content.is_empty() {
                continue;
            }

            match property {
                "og:title" => {
                    if meta.title.is_none() {
                        meta.title = Some(content.to_string());
                    }
                }
                "og:description" => {
                    if meta.description.is_none() {
                        meta.description = Some(content.to_string());
                    }
                }
                "og:image" => {
                    if meta.og_image.is_none() {
                        meta.og_image = Some(content.to_string());
                    }
                }
                _ => {}
            }
        }
    }

    // * Step 2: standard meta tags fill the remaining gaps.
    fn extract_meta_tags(document: &Html, meta: &mut PageMeta) {
        if meta.description.is_some() {
            return;
        }

        for tag in document.select(&SELECTOR_META) {
            let name = tag.value().attr("name").unwrap_or("");
            let content = tag.value().attr("content").unwrap_or("").trim();

            if content.is_empty() {
                continue;
            }

            if name.eq_ignore_ascii_case("description") {
                meta.description = Some(content.to_string());
                return;
            }
        }
    }

    // * Step 3: best-effort fallbacks from document structure.
    fn extract_fallbacks(document: &Html, meta: &mut PageMeta) {
        if meta.title.is_none() {
            if let Some(title) = document.select(&SELECTOR_TITLE).next() {
                let text: String = title.text().collect();
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    meta.title = Some(trimmed.to_string());
                }
            }
        }

        // * First substantial paragraph stands in for a missing description.
        if meta.description.is_none() {
            for paragraph in document.select(&SELECTOR_PARAGRAPHS) {
                let text: String = paragraph.text().collect();
                let trimmed = text.trim();
                if trimmed.chars().count() > DESCRIPTION_MIN_PARAGRAPH_CHARS {
                    meta.description = Some(trimmed.to_string());
                    break;
                }
            }
        }
    }
}
