//! # Transport
//!
//! The single outbound operation the clients need: GET a URL and return the
//! body bytes. [`HttpTransport`] is the reqwest implementation; tests and
//! embedders may supply their own behind `Arc<dyn Transport>`.
//!
//! No retries, no caching. A non-2xx response is an error.

use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::TransportError;

/// Fetch bytes from a URL.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// GET `url` and return the response body.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    /// Build a transport whose requests time out after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TransportError::Http {
                url: "client_init".into(),
                source: e,
            })?;
        Ok(Self { http })
    }

    /// Wrap an existing client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::Http {
                url: url.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let body = resp.bytes().await.map_err(|e| TransportError::Http {
            url: url.to_string(),
            source: e,
        })?;
        Ok(body.to_vec())
    }
}

/// `base` with `segment` appended as one percent-encoded path segment.
pub(crate) fn append_segment(base: &Url, segment: &str) -> Result<Url, TransportError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| {
            TransportError::InvalidUrl(base.to_string(), "URL cannot be a base".into())
        })?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}
