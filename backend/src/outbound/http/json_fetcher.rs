//! Reqwest-backed fetch primitive.
//!
//! This adapter owns transport details only: one GET per call, body
//! collection and JSON decoding into a string-keyed object. It applies no
//! timeout and no retries, and it does not interpret the HTTP status; a
//! provider's error body is decoded like any other and left for field
//! extraction to judge.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::domain::ports::{FetchError, JsonFetcher, JsonObject};

const DEFAULT_USER_AGENT: &str = concat!("people-backend/", env!("CARGO_PKG_VERSION"));
const BODY_PREVIEW_CHAR_LIMIT: usize = 160;

/// Fetch adapter issuing plain GET requests.
#[derive(Debug, Clone)]
pub struct ReqwestJsonFetcher {
    client: Client,
}

impl ReqwestJsonFetcher {
    /// Build an adapter with the default user agent.
    /// ```rust,no_run
    /// use people::outbound::http::ReqwestJsonFetcher;
    ///
    /// let fetcher = ReqwestJsonFetcher::new().expect("reqwest client");
    /// # let _ = fetcher;
    /// ```
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder().user_agent(DEFAULT_USER_AGENT).build()?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl JsonFetcher for ReqwestJsonFetcher {
    async fn fetch_json(&self, url: &Url) -> Result<JsonObject, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        log_status(url, status, body.as_ref());
        decode_object(body.as_ref())
    }
}

fn decode_object(body: &[u8]) -> Result<JsonObject, FetchError> {
    serde_json::from_slice::<JsonObject>(body).map_err(|error| FetchError::decode(error.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> FetchError {
    FetchError::transport(error.to_string())
}

fn log_status(url: &Url, status: StatusCode, body: &[u8]) {
    if status.is_success() {
        debug!(%url, status = status.as_u16(), bytes = body.len(), "provider responded");
    } else {
        debug!(
            %url,
            status = status.as_u16(),
            body = %body_preview(body),
            "provider responded with non-success status"
        );
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact
        .chars()
        .take(BODY_PREVIEW_CHAR_LIMIT)
        .collect::<String>();
    if compact.chars().count() > BODY_PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
