pub mod errors;
pub mod fast_path;
pub mod orchestrator;
pub mod page;
pub mod slow_path;

use async_trait::async_trait;

use crate::engine::errors::ExtractError;
use crate::engine::page::{ScrapedPage, ScraperOptions};

// * One tier's attempt: the page record plus the extractor's own escalation verdict.
// * Only the fast path ever sets the flag; the renderer has nothing to escalate to.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub page: ScrapedPage,
    pub needs_escalation: bool,
}

// * The capability both tiers implement: fetch a page and derive the output fields.
// * The orchestrator depends only on this seam, so tests substitute fakes.
#[async_trait]
pub trait PageExtractor: Send + Sync {
    async fn extract(&self, url: &str, options: &ScraperOptions)
        -> Result<Extraction, ExtractError>;
}
