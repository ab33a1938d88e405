use std::fmt;
use thiserror::Error;

use crate::engine::slow_path::SlowPathError;
use crate::network::errors::NetworkError;

// * Failure from a single extraction tier, rolled up for the orchestrator.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Render(#[from] SlowPathError),
}

// * Which tier(s) a terminal failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedTier {
    Tier1,
    Tier2,
    Both,
}

impl fmt::Display for FailedTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailedTier::Tier1 => write!(f, "1"),
            FailedTier::Tier2 => write!(f, "2"),
            FailedTier::Both => write!(f, "both"),
        }
    }
}

// * Raised only when no tier produced a usable page record.
#[derive(Debug, Error)]
#[error("scrape of {url} failed (tier {tier}): {message}")]
pub struct ScraperError {
    pub url: String,
    pub tier: FailedTier,
    pub message: String,
}
