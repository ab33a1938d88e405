use crate::network::errors::NetworkError;
use crate::network::identity::IdentityProfile;
use reqwest::header::HeaderMap;
use reqwest::Client;
use std::time::Duration;
use url::Url;

// * The Primary HTTP Engine for the Fast Path.
// * One plain GET per call; retry policy lives with the orchestrator (there is none
// * beyond tier escalation).
pub struct FastClient {
    inner: Client,
}

// * A fetched document together with its final post-redirect URL.
pub struct FetchedDocument {
    pub final_url: Url,
    pub body: String,
}

impl FastClient {
    // * Initializes the client with the shared desktop Chrome identity.
    pub fn new() -> Result<Self, NetworkError> {
        let identity = IdentityProfile::desktop_chrome();
        let mut headers = HeaderMap::new();
        identity.apply_to_headers(&mut headers);

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .build()?;

        Ok(Self { inner: client })
    }

    // * Fetches a URL within the deadline and surfaces non-success statuses as errors.
    pub async fn fetch(&self, url: &str, timeout_ms: u64) -> Result<FetchedDocument, NetworkError> {
        let parsed = Url::parse(url).map_err(|_| NetworkError::InvalidUrl(url.to_string()))?;

        let resp = self
            .inner
            .get(parsed)
            .timeout(Duration::from_millis(timeout_ms))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(NetworkError::HttpStatus(status.as_u16()));
        }

        let final_url = resp.url().clone();
        let body = resp.text().await?;

        Ok(FetchedDocument { final_url, body })
    }
}
