//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use people::config::{AppSettings, ConfigError};
use people::domain::ProviderEndpoints;

/// Resolved configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) endpoints: ProviderEndpoints,
}

impl ServerConfig {
    /// Construct a server configuration listening on `bind_addr` and
    /// enriching through the public providers.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Used by server tests with ephemeral ports")
    )]
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            endpoints: ProviderEndpoints::default(),
        }
    }

    /// Resolve a server configuration from loaded settings.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the bind address or a provider URL is
    /// malformed.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, ConfigError> {
        Ok(Self {
            bind_addr: settings.bind_addr()?,
            endpoints: settings.provider_endpoints()?,
        })
    }

    /// Replace the provider endpoints.
    #[cfg_attr(
        not(test),
        expect(dead_code, reason = "Used by server tests with ephemeral ports")
    )]
    #[must_use]
    pub fn with_endpoints(mut self, endpoints: ProviderEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
