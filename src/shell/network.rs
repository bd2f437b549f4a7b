//! Network backends used by the asset cache worker.

use super::request::{Request, Response};
use crate::error::{AllergenError, Result};
use std::time::Duration;

/// Default HTTP request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Something that can resolve a request over the network.
///
/// A non-2xx status is still a resolved response; only transport failures
/// are errors.
pub trait Network: Send + Sync {
    fn fetch(&self, request: &Request) -> Result<Response>;
}

impl<T: Network + ?Sized> Network for Box<T> {
    fn fetch(&self, request: &Request) -> Result<Response> {
        (**self).fetch(request)
    }
}

/// Blocking HTTP client.
pub struct HttpNetwork {
    #[cfg(feature = "network")]
    client: reqwest::blocking::Client,
    timeout: Duration,
}

impl HttpNetwork {
    /// Build a client with the default timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(DEFAULT_TIMEOUT)
    }

    #[cfg(feature = "network")]
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("allergen-tools/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AllergenError::network("HTTP client", e.to_string()))?;
        Ok(Self { client, timeout })
    }

    #[cfg(not(feature = "network"))]
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        Ok(Self { timeout })
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[cfg(feature = "network")]
impl Network for HttpNetwork {
    fn fetch(&self, request: &Request) -> Result<Response> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| AllergenError::network(&request.url, e.to_string()))?;

        let mut builder = self.client.request(method, &request.url);
        if let Some(accept) = request.header("accept") {
            builder = builder.header(reqwest::header::ACCEPT, accept);
        }
        let response = builder
            .send()
            .map_err(|e| AllergenError::network(&request.url, e.to_string()))?;

        let status = response.status().as_u16();
        let url = response.url().to_string();
        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| AllergenError::network(&request.url, e.to_string()))?;

        tracing::debug!("{} {} -> {}", request.method, request.url, status);
        let mut resolved = Response::new(url, status, body.to_vec());
        for (name, value) in headers {
            resolved = resolved.with_header(&name, value);
        }
        Ok(resolved)
    }
}

#[cfg(not(feature = "network"))]
impl Network for HttpNetwork {
    fn fetch(&self, request: &Request) -> Result<Response> {
        Err(AllergenError::network(
            &request.url,
            "network feature not enabled",
        ))
    }
}

/// A network that is never reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineNetwork;

impl Network for OfflineNetwork {
    fn fetch(&self, request: &Request) -> Result<Response> {
        Err(AllergenError::network(&request.url, "offline"))
    }
}
