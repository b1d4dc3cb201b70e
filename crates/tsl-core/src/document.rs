//! # Status List Documents
//!
//! Decoded results of fetching a status list or an aggregation document,
//! and the reference a credential carries to one entry of a remote list.

use serde::{Deserialize, Serialize};

use crate::array::BitStatusArray;
use crate::bits::BitsPerEntry;
use crate::error::{Result, StatusListError};

/// A fetched and decoded status list.
///
/// Serializes as `{statusList, bitsPerStatus, totalStatuses, aggregationUri?}`
/// with `statusList` in flat form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusListDocument {
    /// The packed entries.
    #[serde(rename = "statusList")]
    pub status_array: BitStatusArray,
    /// Bits per entry, as published.
    pub bits_per_status: u8,
    /// Number of entries in the list.
    #[serde(rename = "totalStatuses")]
    pub total_entries: u32,
    /// Aggregation document URI copied from the token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aggregation_uri: Option<String>,
}

impl StatusListDocument {
    /// Wrap a freshly inflated packed buffer.
    ///
    /// # Errors
    ///
    /// `MalformedToken` if the list holds more than `u32::MAX` entries.
    pub fn from_packed(
        bits: BitsPerEntry,
        raw: Vec<u8>,
        aggregation_uri: Option<String>,
    ) -> Result<Self> {
        let status_array = BitStatusArray::from_packed(bits, raw);
        let total_entries = u32::try_from(status_array.len()).map_err(|_| {
            StatusListError::MalformedToken(format!(
                "status list of {} entries is too large",
                status_array.len()
            ))
        })?;
        Ok(Self {
            status_array,
            bits_per_status: bits.width(),
            total_entries,
            aggregation_uri,
        })
    }

    /// Whether the list holds no entries.
    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }

    /// Status of entry `index`, `None` when outside `[0, total_entries)`.
    pub fn status(&self, index: u32) -> Option<u8> {
        let index = usize::try_from(index).ok()?;
        self.status_array.get(index).ok()
    }
}

/// Status list URIs belonging to one issuance pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregationDocument {
    /// Member list URIs, in published order.
    #[serde(rename = "status_lists")]
    pub member_uris: Vec<String>,
}

impl AggregationDocument {
    /// Whether the pool lists no status lists.
    pub fn is_empty(&self) -> bool {
        self.member_uris.is_empty()
    }
}

/// Pointer from a credential to one entry of a remote status list.
///
/// Matches the `status.status_list` object embedded in credential claims.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusListReference {
    /// Location of the status list.
    pub uri: String,
    /// Entry index inside the list.
    #[serde(rename = "idx")]
    pub index: u32,
}
