use serde::{Deserialize, Serialize};

use crate::config::constants::PAGE_TIMEOUT_MS;
use crate::refinery::photo_filter::ScrapedImage;

/// The subsystem's output contract: a fully populated page record. Unknown
/// data is an empty string or an absent optional field, never a missing one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    /// Final, post-redirect URL.
    pub url: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Already filtered to product-photo candidates, in document order.
    pub images: Vec<ScrapedImage>,
    pub body_text: String,
    /// Which extractor produced this record: 1 or 2.
    pub tier: u8,
    /// True iff the record came from the rendering tier.
    pub js_rendered: bool,
}

impl ScrapedPage {
    /// Converts the record to a JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Converts the record to a pretty JSON string.
    pub fn to_json_pretty(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Per-call scrape configuration.
#[derive(Debug, Clone)]
pub struct ScraperOptions {
    /// Navigation/fetch deadline in milliseconds.
    pub timeout_ms: u64,
    /// Disables escalation to the rendering tier.
    pub skip_tier2: bool,
}

impl Default for ScraperOptions {
    fn default() -> Self {
        Self {
            timeout_ms: PAGE_TIMEOUT_MS,
            skip_tier2: false,
        }
    }
}
