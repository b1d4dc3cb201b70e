//! Client for published status lists.
//!
//! One GET per call, then parse and decode. Every failure collapses to
//! [`QueryOutcome::InvalidState`] after being logged; a list with no entries
//! is [`QueryOutcome::NotFound`].

use std::sync::Arc;

use tsl_core::{QueryOutcome, StatusListDocument, StatusTokenParser};
use url::Url;

use crate::error::{ClientError, TransportError};
use crate::transport::{append_segment, Transport};

/// Client for status list URIs.
#[derive(Debug, Clone)]
pub struct StatusListClient {
    transport: Arc<dyn Transport>,
    parser: StatusTokenParser,
    base_url: Option<Url>,
}

impl StatusListClient {
    /// `base_url` resolves opaque identifiers; full URLs bypass it.
    pub fn new(transport: Arc<dyn Transport>, base_url: Option<Url>) -> Self {
        Self {
            transport,
            parser: StatusTokenParser::new(),
            base_url,
        }
    }

    /// Replace the token parser, e.g. with one that verifies signatures.
    pub fn with_parser(mut self, parser: StatusTokenParser) -> Self {
        self.parser = parser;
        self
    }

    /// Fetch and decode the list at `reference`.
    ///
    /// `reference` is either an `http(s)` URL or an identifier appended to
    /// the configured base URL.
    pub async fn fetch(&self, reference: &str) -> QueryOutcome<StatusListDocument> {
        match self.try_fetch(reference).await {
            Ok(document) => {
                tracing::debug!(
                    reference,
                    total_entries = document.total_entries,
                    bits = document.bits_per_status,
                    "fetched status list"
                );
                QueryOutcome::found_unless(document, StatusListDocument::is_empty)
            }
            Err(err) => {
                tracing::warn!(reference, error = %err, "status list unavailable");
                QueryOutcome::InvalidState
            }
        }
    }

    /// Fetch and decode, keeping the failure cause.
    pub async fn try_fetch(&self, reference: &str) -> Result<StatusListDocument, ClientError> {
        let url = self.resolve(reference)?;
        let body = self.transport.fetch(&url).await?;
        Ok(self.parser.parse_document(&body)?)
    }

    /// The URL fetched for `reference`.
    pub fn resolve(&self, reference: &str) -> Result<Url, TransportError> {
        let reference = reference.trim();
        if let Ok(url) = Url::parse(reference) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(url);
            }
        }
        match &self.base_url {
            Some(base) => append_segment(base, reference),
            None => Err(TransportError::InvalidUrl(
                reference.to_string(),
                "not an http(s) URL and no status list base URL is configured".into(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::HttpTransport;

    fn client(base: Option<&str>) -> StatusListClient {
        let transport = Arc::new(HttpTransport::new(5).unwrap());
        StatusListClient::new(transport, base.map(|b| Url::parse(b).unwrap()))
    }

    #[test]
    fn full_urls_are_used_as_is() {
        let client = client(Some("https://base.example/lists"));
        assert_eq!(
            client.resolve("https://issuer.example/status/3").unwrap().as_str(),
            "https://issuer.example/status/3"
        );
    }

    #[test]
    fn identifiers_resolve_against_the_base() {
        let client = client(Some("https://base.example/lists"));
        assert_eq!(
            client.resolve("3").unwrap().as_str(),
            "https://base.example/lists/3"
        );
    }

    #[test]
    fn identifiers_without_base_are_rejected() {
        assert!(matches!(
            client(None).resolve("3"),
            Err(TransportError::InvalidUrl(..))
        ));
    }
}
