//! Application settings loaded via OrthoConfig.
//!
//! Values come from CLI flags, `PEOPLE_*` environment variables and
//! configuration files, in that order of precedence. Every field is optional
//! and falls back to a built-in default through its accessor.

use std::net::SocketAddr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ProviderEndpoints;
use crate::domain::lookup::{
    DEFAULT_AGE_PROVIDER, DEFAULT_GENDER_PROVIDER, DEFAULT_NATIONALITY_PROVIDER,
};

/// Address the HTTP server binds to when none is configured.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// The bind address is not a socket address.
    #[error("invalid bind address {value:?}: {message}")]
    BindAddr {
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
    /// A provider endpoint is not an absolute URL.
    #[error("invalid {setting} {value:?}: {message}")]
    ProviderUrl {
        /// Setting name.
        setting: &'static str,
        /// Configured value.
        value: String,
        /// Parser message.
        message: String,
    },
}

/// Process-wide settings for the people service.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "PEOPLE")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// Age provider endpoint.
    pub age_provider_url: Option<String>,
    /// Gender provider endpoint.
    pub gender_provider_url: Option<String>,
    /// Nationality provider endpoint.
    pub nationality_provider_url: Option<String>,
    /// Emit logs as JSON lines instead of human-readable text.
    #[ortho_config(default = false)]
    pub json_logs: bool,
}

impl AppSettings {
    /// Parsed bind address, falling back to [`DEFAULT_BIND_ADDR`].
    ///
    /// # Errors
    /// Returns [`ConfigError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| ConfigError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Parsed provider endpoints, each falling back to its public default.
    ///
    /// # Errors
    /// Returns [`ConfigError::ProviderUrl`] for the first value that does
    /// not parse as an absolute URL.
    pub fn provider_endpoints(&self) -> Result<ProviderEndpoints, ConfigError> {
        Ok(ProviderEndpoints {
            age: parse_endpoint(
                "age_provider_url",
                self.age_provider_url.as_deref(),
                DEFAULT_AGE_PROVIDER,
            )?,
            gender: parse_endpoint(
                "gender_provider_url",
                self.gender_provider_url.as_deref(),
                DEFAULT_GENDER_PROVIDER,
            )?,
            nationality: parse_endpoint(
                "nationality_provider_url",
                self.nationality_provider_url.as_deref(),
                DEFAULT_NATIONALITY_PROVIDER,
            )?,
        })
    }
}

fn parse_endpoint(
    setting: &'static str,
    configured: Option<&str>,
    default: &str,
) -> Result<Url, ConfigError> {
    let raw = configured.unwrap_or(default);
    Url::parse(raw).map_err(|err| ConfigError::ProviderUrl {
        setting,
        value: raw.to_owned(),
        message: err.to_string(),
    })
}
