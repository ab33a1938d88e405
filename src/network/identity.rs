use reqwest::header::{HeaderMap, HeaderValue};

use crate::config::constants::{VIEWPORT_HEIGHT, VIEWPORT_WIDTH};

// * IdentityProfile defines the browser identity presented to target sites.
// * Shared by both tiers so the fast path and the renderer look like the same visitor.
pub struct IdentityProfile {
    pub user_agent: String,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl IdentityProfile {
    // * Generates a realistic desktop Chrome profile.
    pub fn desktop_chrome() -> Self {
        let full_version = "120.0.6099.109";

        Self {
            user_agent: format!(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/{} Safari/537.36",
                full_version
            ),
            viewport_width: VIEWPORT_WIDTH,
            viewport_height: VIEWPORT_HEIGHT,
        }
    }

    // * Applies the configured profile to a mutable HeaderMap.
    pub fn apply_to_headers(&self, headers: &mut HeaderMap) {
        headers.insert(
            "User-Agent",
            HeaderValue::from_str(&self.user_agent).expect("! CRITICAL: Invalid UA"),
        );
        headers.insert(
            "Accept",
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,*/*;q=0.8",
            ),
        );
        headers.insert("Accept-Language", HeaderValue::from_static("en-US,en;q=0.9"));
        headers.insert("Upgrade-Insecure-Requests", HeaderValue::from_static("1"));
    }
}
