//! Driven port for the fetch primitive used by demographic lookups.
//!
//! One call is one GET. The adapter owns transport and JSON decoding; the
//! domain owns what the decoded object means.

use async_trait::async_trait;
use url::Url;

use super::define_port_error;

/// Decoded JSON object keyed by field name.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

define_port_error! {
    /// Errors surfaced while fetching a provider document.
    pub enum FetchError {
        /// The request could not be sent or the body could not be read.
        Transport { message: String } => "request failed: {message}",
        /// The body was not a JSON object.
        Decode { message: String } => "response is not a JSON object: {message}",
    }
}

/// Port performing one GET and decoding the body into a JSON object.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    /// Fetch `url` and decode its body.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let body = fetcher.fetch_json(&"https://api.agify.io/?name=Ivan".parse()?).await?;
    /// assert!(body.contains_key("age"));
    /// ```
    async fn fetch_json(&self, url: &Url) -> Result<JsonObject, FetchError>;
}
