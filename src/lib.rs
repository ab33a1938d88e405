pub mod config;
pub mod engine;
pub mod network;
pub mod refinery;

pub use engine::errors::{FailedTier, ScraperError};
pub use engine::orchestrator::scrape;
pub use engine::page::{ScrapedPage, ScraperOptions};
pub use refinery::photo_filter::{PhotoFilterCriteria, ScrapedImage};
