//! Typed SunoAid API
//!
//! One method per backend endpoint. Methods return the payload with the
//! response envelope already removed.

mod admin;
mod auth;
mod issues;
mod locations;

use std::sync::Arc;

use crate::http::{HttpClient, NetworkHttpClient};
use crate::{ClientConfig, ClientResult};

/// Typed wrapper over an [`HttpClient`]
///
/// Cheap to clone; clones share the underlying transport (and its cookie
/// session).
#[derive(Debug)]
pub struct SunoApi<H = NetworkHttpClient> {
    http: Arc<H>,
}

impl<H> Clone for SunoApi<H> {
    fn clone(&self) -> Self {
        Self {
            http: Arc::clone(&self.http),
        }
    }
}

impl SunoApi<NetworkHttpClient> {
    /// Builds the network transport from configuration
    pub fn from_config(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self::new(NetworkHttpClient::new(config)?))
    }
}

impl<H: HttpClient> SunoApi<H> {
    pub fn new(http: H) -> Self {
        Self {
            http: Arc::new(http),
        }
    }

    pub fn from_shared(http: Arc<H>) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &H {
        &self.http
    }

    pub fn base_url(&self) -> &str {
        self.http.base_url()
    }

    /// Absolute URL for a media path returned by the API
    pub fn media_url(&self, url: &str) -> String {
        crate::http::resolve_media_url(self.http.base_url(), url)
    }
}
