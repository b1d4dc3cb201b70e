//! # Presentation Status Annotation
//!
//! Scans disclosed attestations for an embedded
//! `status.status_list.{idx, uri}` reference and attaches the live status of
//! each. References are resolved concurrently and independently: one failed
//! fetch drops only its own annotation.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tsl_core::{QueryOutcome, StatusListDocument, StatusListReference};

use crate::status_list::StatusListClient;

/// Live status of one disclosed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentStatus {
    /// The attestation's `document_number`.
    pub document: String,
    /// Entry value, `None` when the index is outside the list.
    pub status: Option<u8>,
    /// The list the entry was read from.
    pub status_list: StatusListDocument,
}

// -- Attestation shapes -------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AttestationDocument {
    #[serde(rename = "docType")]
    doc_type: Option<String>,
    attributes: Option<AttestationAttributes>,
}

#[derive(Debug, Deserialize)]
struct AttestationAttributes {
    #[serde(rename = "eu.europa.ec.eudi.pid.1")]
    pid: Option<AttestationNamespace>,
    #[serde(rename = "org.iso.18013.5.1.mDL")]
    mdl: Option<AttestationNamespace>,
}

#[derive(Debug, Deserialize)]
struct AttestationNamespace {
    document_number: String,
    status: Option<EmbeddedStatus>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedStatus {
    status_list: Option<StatusListReference>,
}

/// The document number and status reference of `element`, if it carries both.
fn status_reference(element: &serde_json::Value) -> Option<(String, StatusListReference)> {
    let document = AttestationDocument::deserialize(element).ok()?;
    document.doc_type?;
    let attributes = document.attributes?;
    let namespace = attributes.pid.or(attributes.mdl)?;
    let reference = namespace.status?.status_list?;
    Some((namespace.document_number, reference))
}

// -- Annotator ----------------------------------------------------------------

/// Annotates presentations with live status.
#[derive(Debug, Clone)]
pub struct StatusAnnotator {
    client: StatusListClient,
    enabled: bool,
}

impl StatusAnnotator {
    pub fn new(client: StatusListClient, enabled: bool) -> Self {
        Self { client, enabled }
    }

    /// One [`DocumentStatus`] per element that references a reachable list.
    ///
    /// `None` when enrichment is switched off.
    pub async fn annotate(&self, presentations: &[serde_json::Value]) -> Option<Vec<DocumentStatus>> {
        if !self.enabled {
            return None;
        }

        let lookups = presentations
            .iter()
            .filter_map(status_reference)
            .map(|(document, reference)| self.lookup(document, reference));
        let statuses: Vec<DocumentStatus> = join_all(lookups).await.into_iter().flatten().collect();

        tracing::debug!(
            presentations = presentations.len(),
            annotated = statuses.len(),
            "annotated presentations with status"
        );
        Some(statuses)
    }

    async fn lookup(&self, document: String, reference: StatusListReference) -> Option<DocumentStatus> {
        match self.client.fetch(&reference.uri).await {
            QueryOutcome::Found(status_list) => Some(DocumentStatus {
                status: status_list.status(reference.index),
                document,
                status_list,
            }),
            QueryOutcome::NotFound | QueryOutcome::InvalidState => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn extracts_pid_reference() {
        let element = json!({
            "docType": "eu.europa.ec.eudi.pid.1",
            "attributes": {
                "eu.europa.ec.eudi.pid.1": {
                    "document_number": "DOC-1",
                    "status": {"status_list": {"idx": 4, "uri": "https://issuer.example/1"}}
                }
            }
        });
        let (document, reference) = status_reference(&element).unwrap();
        assert_eq!(document, "DOC-1");
        assert_eq!(reference.index, 4);
        assert_eq!(reference.uri, "https://issuer.example/1");
    }

    #[test]
    fn extracts_mdl_reference() {
        let element = json!({
            "docType": "org.iso.18013.5.1.mDL",
            "attributes": {
                "org.iso.18013.5.1.mDL": {
                    "document_number": "MDL-9",
                    "status": {"status_list": {"idx": 0, "uri": "https://issuer.example/2"}}
                }
            }
        });
        assert_eq!(status_reference(&element).unwrap().0, "MDL-9");
    }

    #[test]
    fn skips_elements_without_a_reference() {
        let no_doc_type = json!({
            "attributes": {
                "eu.europa.ec.eudi.pid.1": {
                    "document_number": "DOC-1",
                    "status": {"status_list": {"idx": 4, "uri": "https://issuer.example/1"}}
                }
            }
        });
        let no_status = json!({
            "docType": "eu.europa.ec.eudi.pid.1",
            "attributes": {"eu.europa.ec.eudi.pid.1": {"document_number": "DOC-1"}}
        });
        let other_namespace = json!({
            "docType": "x",
            "attributes": {"com.example": {"document_number": "DOC-1"}}
        });
        let not_an_object = json!("eyJhbGciOi...");

        for element in [no_doc_type, no_status, other_namespace, not_an_object] {
            assert!(status_reference(&element).is_none(), "{element}");
        }
    }
}
