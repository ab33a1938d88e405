// * Scrape Orchestrator
// * The only public entry point. Walks an explicit escalation state machine:
// * each tier is attempted at most once per call, tier-2 data always wins when
// * it arrives, and a thin tier-1 record beats total failure.

use tracing::{debug, info, warn};

use crate::config::constants::THIN_BODY_TEXT_CHARS;
use crate::engine::errors::{FailedTier, ScraperError};
use crate::engine::fast_path::FastPathExtractor;
use crate::engine::page::{ScrapedPage, ScraperOptions};
use crate::engine::slow_path::SlowPathExtractor;
use crate::engine::{Extraction, PageExtractor};

// * Per-call escalation states. No state persists across calls.
#[derive(Debug)]
enum ScrapeState {
    Tier1Attempt,
    Tier2Decision {
        fallback: Option<ScrapedPage>,
        tier1_error: Option<String>,
    },
    Tier2Attempt {
        fallback: Option<ScrapedPage>,
        tier1_error: Option<String>,
    },
}

// * A tier-1 result is usable when the extractor did not flag a client shell
// * and the page carries a title, a description, or a non-trivial amount of
// * body text. The threshold is fixed; callers rely on when escalation fires.
pub fn is_usable(extraction: &Extraction) -> bool {
    if extraction.needs_escalation {
        return false;
    }

    let page = &extraction.page;
    !page.title.is_empty()
        || !page.description.is_empty()
        || page.body_text.chars().count() >= THIN_BODY_TEXT_CHARS
}

// * Orchestrator over the two tiers, generic over the extractor seam so the
// * state machine is unit-testable without network or browser.
pub struct Orchestrator<T1, T2> {
    tier1: T1,
    tier2: T2,
}

impl<T1: PageExtractor, T2: PageExtractor> Orchestrator<T1, T2> {
    pub fn new(tier1: T1, tier2: T2) -> Self {
        Self { tier1, tier2 }
    }

    pub async fn run(
        &self,
        url: &str,
        options: &ScraperOptions,
    ) -> Result<ScrapedPage, ScraperError> {
        let mut state = ScrapeState::Tier1Attempt;

        loop {
            state = match state {
                ScrapeState::Tier1Attempt => match self.tier1.extract(url, options).await {
                    Ok(extraction) if is_usable(&extraction) => {
                        debug!(url, "tier 1 result usable; no escalation");
                        return Ok(extraction.page);
                    }
                    Ok(extraction) => {
                        debug!(
                            url,
                            shell_flagged = extraction.needs_escalation,
                            "tier 1 result thin; escalating"
                        );
                        ScrapeState::Tier2Decision {
                            fallback: Some(extraction.page),
                            tier1_error: None,
                        }
                    }
                    Err(e) => {
                        warn!(url, error = %e, "tier 1 extraction failed");
                        ScrapeState::Tier2Decision {
                            fallback: None,
                            tier1_error: Some(e.to_string()),
                        }
                    }
                },

                ScrapeState::Tier2Decision {
                    fallback,
                    tier1_error,
                } => {
                    if options.skip_tier2 {
                        return match fallback {
                            Some(page) => {
                                debug!(url, "escalation disabled; returning thin tier 1 result");
                                Ok(page)
                            }
                            None => Err(ScraperError {
                                url: url.to_string(),
                                tier: FailedTier::Tier1,
                                message: tier1_error
                                    .unwrap_or_else(|| "tier 1 produced no result".to_string()),
                            }),
                        };
                    }
                    ScrapeState::Tier2Attempt {
                        fallback,
                        tier1_error,
                    }
                }

                ScrapeState::Tier2Attempt {
                    fallback,
                    tier1_error,
                } => match self.tier2.extract(url, options).await {
                    // * Tier-2 data always wins over a retained thin record
                    Ok(extraction) => {
                        info!(url, "tier 2 render succeeded");
                        return Ok(extraction.page);
                    }
                    Err(e) => match fallback {
                        Some(page) => {
                            warn!(url, error = %e, "tier 2 failed; returning thin tier 1 result");
                            return Ok(page);
                        }
                        None => {
                            return Err(ScraperError {
                                url: url.to_string(),
                                tier: FailedTier::Both,
                                message: format!(
                                    "tier 1: {}; tier 2: {}",
                                    tier1_error.unwrap_or_else(|| "no result".to_string()),
                                    e
                                ),
                            })
                        }
                    },
                },
            };
        }
    }
}

// * Public entry point: one call, at most one attempt per tier.
pub async fn scrape(url: &str, options: ScraperOptions) -> Result<ScrapedPage, ScraperError> {
    Orchestrator::new(FastPathExtractor::new(), SlowPathExtractor::new())
        .run(url, &options)
        .await
}
