//! HTTP access for the TLD list and ranking lookups.
//!
//! Operations that read a remote document go through the [`HttpGet`] trait
//! so tests (and callers with their own HTTP stack) can substitute a
//! different transport. The default implementation is a blocking `reqwest`
//! client.

use crate::error::DomainError;
use tracing::debug;

/// Minimal "fetch a URL as text" capability.
pub trait HttpGet: Send + Sync {
    /// GET `url` and return the response body.
    ///
    /// # Errors
    ///
    /// `DomainError::Network` when the request fails or the server answers
    /// with a non-success status.
    fn get_text(&self, url: &str) -> Result<String, DomainError>;
}

/// Blocking HTTP client backed by `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

impl HttpClient {
    /// Create a client with default settings.
    pub fn new() -> Result<Self, DomainError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("domain-kit/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                DomainError::network_with_source("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self { client })
    }
}

impl HttpGet for HttpClient {
    fn get_text(&self, url: &str) -> Result<String, DomainError> {
        debug!(url, "HTTP GET");

        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(DomainError::network_with_source(
                format!("HTTP {}", status),
                url,
            ));
        }

        Ok(response.text()?)
    }
}
