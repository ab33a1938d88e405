// * Slow Path - Headless Browser Rendering
// * Drives Chromium for pages the fast path cannot see into. Each extraction
// * owns its own browser process; the session is released on every exit path.

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::constants::{BODY_TEXT_CAP_CHARS, MAX_PRODUCT_PHOTOS, NETWORK_IDLE_TIMEOUT_MS};
use crate::engine::errors::ExtractError;
use crate::engine::page::{ScrapedPage, ScraperOptions};
use crate::engine::{Extraction, PageExtractor};
use crate::network::identity::IdentityProfile;
use crate::refinery::content_cleaner::truncate_chars;
use crate::refinery::photo_filter::{filter_product_photos, PhotoFilterCriteria, ScrapedImage};

// * In-page extraction payload. Field precedence mirrors the static metadata
// * chain: og tags first, then standard meta, then document structure. Image
// * URLs are resolved in-page against the live base URI; unresolvable
// * candidates are dropped before they leave the browser.
const EXTRACTION_JS: &str = r#"
(() => {
    const metaContent = (selector) => {
        const el = document.querySelector(selector);
        return el ? (el.getAttribute('content') || '').trim() : '';
    };
    const resolve = (raw) => {
        try { return new URL(raw, document.baseURI).href; } catch (e) { return null; }
    };

    const title = metaContent('meta[property="og:title"]') || (document.title || '').trim();

    let description = metaContent('meta[property="og:description"]')
        || metaContent('meta[name="description"]');
    if (!description) {
        for (const p of document.querySelectorAll('p')) {
            const text = (p.textContent || '').trim();
            if (text.length > 40) { description = text; break; }
        }
    }

    const ogImageRaw = metaContent('meta[property="og:image"]');
    const ogImage = ogImageRaw ? resolve(ogImageRaw) : null;

    const images = [];
    for (const img of document.querySelectorAll('img')) {
        const src = img.getAttribute('src') || img.getAttribute('data-src');
        if (!src) continue;
        const resolved = resolve(src.trim());
        if (!resolved) continue;
        const width = img.naturalWidth > 0 ? img.naturalWidth : (img.width > 0 ? img.width : null);
        const height = img.naturalHeight > 0 ? img.naturalHeight : (img.height > 0 ? img.height : null);
        images.push({ url: resolved, alt: img.getAttribute('alt') || '', width, height });
    }

    let bodyText = '';
    if (document.body) {
        const clone = document.body.cloneNode(true);
        clone.querySelectorAll('script, style, noscript, nav, footer, header, aside')
            .forEach(n => n.remove());
        bodyText = (clone.textContent || '').replace(/\s+/g, ' ').trim().slice(0, 5000);
    }

    return {
        finalUrl: document.location.href,
        title,
        description: description || '',
        ogImage,
        images,
        bodyText
    };
})()
"#;

#[derive(Debug, Error)]
pub enum SlowPathError {
    #[error("Browser launch failed: {0}")]
    BrowserLaunch(String),

    #[error("Page navigation failed: {0}")]
    Navigation(String),

    #[error("Page timeout after {0}ms")]
    Timeout(u64),

    #[error("Content extraction failed: {0}")]
    ContentExtraction(String),
}

// * Shape returned by EXTRACTION_JS from inside the page.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DomExtraction {
    final_url: String,
    title: String,
    description: String,
    og_image: Option<String>,
    images: Vec<DomImage>,
    body_text: String,
}

#[derive(Debug, Deserialize)]
struct DomImage {
    url: String,
    alt: String,
    width: Option<u32>,
    height: Option<u32>,
}

// * An isolated rendering session owned by exactly one extraction call.
struct BrowserSession {
    browser: Browser,
    handler: tokio::task::JoinHandle<()>,
}

impl BrowserSession {
    async fn launch(identity: &IdentityProfile) -> Result<Self, SlowPathError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .window_size(identity.viewport_width, identity.viewport_height)
            .arg("--disable-blink-features=AutomationControlled")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-gpu")
            .build()
            .map_err(SlowPathError::BrowserLaunch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SlowPathError::BrowserLaunch(e.to_string()))?;

        // * Drain CDP events for the life of the session
        let handle = tokio::spawn(async move {
            while let Some(_event) = handler.next().await {}
        });

        debug!("slow path browser launched");

        Ok(Self {
            browser,
            handler: handle,
        })
    }

    // * Releases the session; called on success and failure paths alike.
    async fn shutdown(mut self) {
        if let Err(e) = self.browser.close().await {
            debug!(error = %e, "browser close failed");
        }
        self.handler.abort();
    }
}

impl Drop for BrowserSession {
    fn drop(&mut self) {
        // * Best effort - can't await in drop
        self.handler.abort();
    }
}

// * Tier-2 extractor: renders the page and reads the same fields off the
// * live DOM.
pub struct SlowPathExtractor {
    identity: IdentityProfile,
}

impl SlowPathExtractor {
    pub fn new() -> Self {
        Self {
            identity: IdentityProfile::desktop_chrome(),
        }
    }
}

impl Default for SlowPathExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageExtractor for SlowPathExtractor {
    async fn extract(
        &self,
        url: &str,
        options: &ScraperOptions,
    ) -> Result<Extraction, ExtractError> {
        let session = BrowserSession::launch(&self.identity)
            .await
            .map_err(ExtractError::Render)?;

        // * Scoped acquisition: whatever render_page returns, the session is
        // * torn down before the result propagates.
        let outcome = render_page(&session.browser, &self.identity, url, options).await;
        session.shutdown().await;

        let dom = outcome.map_err(ExtractError::Render)?;
        info!(url = %dom.final_url, "slow path render complete");

        Ok(Extraction {
            page: build_page(dom),
            needs_escalation: false,
        })
    }
}

async fn render_page(
    browser: &Browser,
    identity: &IdentityProfile,
    url: &str,
    options: &ScraperOptions,
) -> Result<DomExtraction, SlowPathError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(|e| SlowPathError::Navigation(e.to_string()))?;

    page.set_user_agent(identity.user_agent.as_str())
        .await
        .map_err(|e| SlowPathError::Navigation(e.to_string()))?;

    // * Hard deadline on navigation
    let deadline = Duration::from_millis(options.timeout_ms);
    match tokio::time::timeout(deadline, page.goto(url)).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => return Err(SlowPathError::Navigation(e.to_string())),
        Err(_) => return Err(SlowPathError::Timeout(options.timeout_ms)),
    }

    // * Best-effort wait for the network to settle; both expiry and CDP
    // * errors are soft here - extraction proceeds with the current DOM.
    settle_network(&page).await;

    let dom: DomExtraction = page
        .evaluate(EXTRACTION_JS)
        .await
        .map_err(|e| SlowPathError::ContentExtraction(e.to_string()))?
        .into_value()
        .map_err(|e| SlowPathError::ContentExtraction(e.to_string()))?;

    let _ = page.close().await;

    Ok(dom)
}

async fn settle_network(page: &Page) {
    let idle = Duration::from_millis(NETWORK_IDLE_TIMEOUT_MS);
    match tokio::time::timeout(idle, page.wait_for_navigation()).await {
        Ok(Ok(_)) => {}
        Ok(Err(e)) => debug!(error = %e, "network settle wait failed; proceeding"),
        Err(_) => debug!(
            timeout_ms = NETWORK_IDLE_TIMEOUT_MS,
            "network settle wait elapsed; proceeding"
        ),
    }
}

fn build_page(dom: DomExtraction) -> ScrapedPage {
    let criteria = PhotoFilterCriteria::default();

    let images: Vec<ScrapedImage> = dom
        .images
        .into_iter()
        .map(|img| ScrapedImage {
            url: img.url,
            alt: img.alt,
            width: img.width.filter(|&w| w > 0),
            height: img.height.filter(|&h| h > 0),
        })
        .collect();

    ScrapedPage {
        url: dom.final_url,
        title: dom.title,
        description: dom.description,
        og_image: dom.og_image,
        images: filter_product_photos(&images, &criteria, MAX_PRODUCT_PHOTOS),
        body_text: truncate_chars(&dom.body_text, BODY_TEXT_CAP_CHARS),
        tier: 2,
        js_rendered: true,
    }
}
