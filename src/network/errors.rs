use thiserror::Error;

// * Unified Error type for the fast-path network layer.
#[derive(Error, Debug)]
pub enum NetworkError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
