//! # Status List Token Parser
//!
//! Turns the body published at a status list URI into structured metadata.
//! Two body shapes are accepted:
//!
//! - a compact token `base64url(header).base64url(payload).base64url(signature)`;
//! - a plain JSON document with the same payload shape.
//!
//! The parser checks structure only. Signature checking is delegated to an
//! optional [`TokenVerifier`].

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::bits::BitsPerEntry;
use crate::codec::WireCodec;
use crate::document::StatusListDocument;
use crate::error::{Result, StatusListError};

/// The `status_list` claim: bit width, encoded list, optional aggregation URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusListClaim {
    /// Bits per entry.
    pub bits: BitsPerEntry,
    /// base64url(zlib(packed list)), no padding.
    pub lst: String,
    /// URI of the aggregation document listing sibling lists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation_uri: Option<String>,
}

/// Payload claims of a status list token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusListClaims {
    /// Issuer.
    pub iss: String,
    /// Subject, normally the URI the list is published at.
    pub sub: String,
    /// Issued-at, seconds since the epoch.
    pub iat: i64,
    /// Expiry, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    /// Suggested cache lifetime in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u64>,
    /// The embedded list.
    pub status_list: StatusListClaim,
}

impl StatusListClaims {
    /// `iat` as a UTC timestamp, `None` if out of range.
    pub fn issued_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.iat, 0)
    }

    /// `exp` as a UTC timestamp.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}

/// Protected header of a compact token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    /// Signature algorithm.
    pub alg: String,
    /// Token type, e.g. `statuslist+jwt`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
    /// Key identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
}

/// A parsed status list body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusListToken {
    /// Present when the body was a compact token.
    pub header: Option<TokenHeader>,
    /// Payload claims.
    pub claims: StatusListClaims,
}

impl StatusListToken {
    /// Decode the embedded list into a queryable document.
    pub fn into_document(self) -> Result<StatusListDocument> {
        let status_list = self.claims.status_list;
        let raw = WireCodec::decode_packed(&status_list.lst)?;
        StatusListDocument::from_packed(status_list.bits, raw, status_list.aggregation_uri)
    }
}

/// Hook for verifying the signature of a compact token.
///
/// Implementations must be `Send + Sync` so a single verifier can be shared
/// across concurrent fetches behind an `Arc`.
pub trait TokenVerifier: Send + Sync {
    /// Check `signature` over `signing_input` (`header.payload`, as sent).
    ///
    /// # Errors
    ///
    /// Returns [`StatusListError::Signature`] when the signature is rejected.
    fn verify(&self, header: &TokenHeader, signing_input: &[u8], signature: &[u8]) -> Result<()>;
}

/// Parser for status list bodies.
#[derive(Clone, Default)]
pub struct StatusTokenParser {
    verifier: Option<Arc<dyn TokenVerifier>>,
}

impl std::fmt::Debug for StatusTokenParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusTokenParser")
            .field("verifier", &self.verifier.is_some())
            .finish()
    }
}

impl StatusTokenParser {
    /// Parser that only checks structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parser that also runs `verifier` on every compact token.
    pub fn with_verifier(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self {
            verifier: Some(verifier),
        }
    }

    /// Parse a fetched body and decode its list.
    pub fn parse_document(&self, body: &[u8]) -> Result<StatusListDocument> {
        let token = self.parse(body)?;
        if let Some(issued_at) = token.claims.issued_at() {
            tracing::debug!(
                iss = %token.claims.iss,
                sub = %token.claims.sub,
                %issued_at,
                bits = %token.claims.status_list.bits,
                "parsed status list token"
            );
        }
        token.into_document()
    }

    /// Parse a fetched body without decoding the list.
    ///
    /// # Errors
    ///
    /// `MalformedToken` when the body is not UTF-8, has the wrong number of
    /// segments, or a segment fails to decode; `Signature` when a configured
    /// verifier rejects the token.
    pub fn parse(&self, body: &[u8]) -> Result<StatusListToken> {
        let text = std::str::from_utf8(body)
            .map_err(|e| StatusListError::MalformedToken(format!("body is not utf-8: {e}")))?
            .trim();

        if text.starts_with('{') {
            let claims = serde_json::from_str(text)
                .map_err(|e| StatusListError::MalformedToken(format!("document: {e}")))?;
            return Ok(StatusListToken {
                header: None,
                claims,
            });
        }

        self.parse_compact(text)
    }

    fn parse_compact(&self, text: &str) -> Result<StatusListToken> {
        let segments: Vec<&str> = text.split('.').collect();
        let [header_b64, payload_b64, signature_b64] = segments.as_slice() else {
            return Err(StatusListError::MalformedToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let header: TokenHeader = serde_json::from_slice(&decode_segment("header", header_b64)?)
            .map_err(|e| StatusListError::MalformedToken(format!("header: {e}")))?;
        let claims: StatusListClaims =
            serde_json::from_slice(&decode_segment("payload", payload_b64)?)
                .map_err(|e| StatusListError::MalformedToken(format!("payload: {e}")))?;
        let signature = decode_segment("signature", signature_b64)?;

        if let Some(verifier) = &self.verifier {
            let signing_input = format!("{header_b64}.{payload_b64}");
            verifier.verify(&header, signing_input.as_bytes(), &signature)?;
        }

        Ok(StatusListToken {
            header: Some(header),
            claims,
        })
    }
}

fn decode_segment(name: &str, segment: &str) -> Result<Vec<u8>> {
    WireCodec::decode_base64(segment)
        .map_err(|e| StatusListError::MalformedToken(format!("{name} segment: {e}")))
}
