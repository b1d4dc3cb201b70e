//! # CBOR Status List Claim
//!
//! The CBOR rendition of the `status_list` claim, used by CWT-based
//! status list tokens:
//!
//! ```text
//! { "bits": uint, "lst": bstr, ? "aggregation_uri": tstr }
//! ```
//!
//! Unlike the JSON claim, `lst` carries the zlib-compressed bytes directly,
//! without base64url.

use ciborium::value::{Integer, Value};

use crate::array::BitStatusArray;
use crate::bits::BitsPerEntry;
use crate::codec::WireCodec;
use crate::error::{Result, StatusListError};

const BITS: &str = "bits";
const LST: &str = "lst";
const AGGREGATION_URI: &str = "aggregation_uri";

/// CBOR `status_list` claim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusListCborClaim {
    /// Bits per entry.
    pub bits: BitsPerEntry,
    /// zlib-compressed packed list.
    pub lst: Vec<u8>,
    /// Aggregation document URI.
    pub aggregation_uri: Option<String>,
}

impl StatusListCborClaim {
    /// Build the claim for `array`.
    pub fn from_array(array: &BitStatusArray, aggregation_uri: Option<String>) -> Result<Self> {
        Ok(Self {
            bits: array.bits(),
            lst: array.to_compressed()?,
            aggregation_uri,
        })
    }

    /// Inflate the list into a packed array.
    pub fn into_array(self) -> Result<BitStatusArray> {
        let raw = WireCodec::inflate(&self.lst)?;
        Ok(BitStatusArray::from_packed(self.bits, raw))
    }

    /// Serialize as a CBOR map.
    pub fn to_cbor(&self) -> Result<Vec<u8>> {
        let mut entries = vec![
            (Value::Text(BITS.into()), Value::Integer(Integer::from(self.bits.width()))),
            (Value::Text(LST.into()), Value::Bytes(self.lst.clone())),
        ];
        if let Some(uri) = &self.aggregation_uri {
            entries.push((Value::Text(AGGREGATION_URI.into()), Value::Text(uri.clone())));
        }

        let mut buf = Vec::new();
        ciborium::into_writer(&Value::Map(entries), &mut buf)
            .map_err(|e| StatusListError::Cbor(e.to_string()))?;
        Ok(buf)
    }

    /// Parse a CBOR map. Unknown keys are ignored.
    pub fn from_cbor(bytes: &[u8]) -> Result<Self> {
        let value: Value =
            ciborium::from_reader(bytes).map_err(|e| StatusListError::Cbor(e.to_string()))?;
        let Value::Map(entries) = value else {
            return Err(StatusListError::Cbor("status list claim is not a map".into()));
        };

        let mut bits = None;
        let mut lst = None;
        let mut aggregation_uri = None;
        for (key, value) in entries {
            match (key.as_text(), value) {
                (Some(BITS), Value::Integer(raw)) => {
                    let raw = u8::try_from(raw)
                        .map_err(|_| StatusListError::Cbor("bits out of range".into()))?;
                    bits = Some(BitsPerEntry::try_from(raw)?);
                }
                (Some(LST), Value::Bytes(bytes)) => lst = Some(bytes),
                (Some(AGGREGATION_URI), Value::Text(uri)) => aggregation_uri = Some(uri),
                (Some(name @ (BITS | LST | AGGREGATION_URI)), _) => {
                    return Err(StatusListError::Cbor(format!("{name} has the wrong type")));
                }
                _ => {}
            }
        }

        Ok(Self {
            bits: bits.ok_or_else(|| StatusListError::Cbor("missing bits".into()))?,
            lst: lst.ok_or_else(|| StatusListError::Cbor("missing lst".into()))?,
            aggregation_uri,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cbor_claim_round_trips_an_array() {
        let mut array = BitStatusArray::new(BitsPerEntry::Two, 12).unwrap();
        array.set(1, 2).unwrap();
        array.set(10, 3).unwrap();

        let claim = StatusListCborClaim::from_array(&array, Some("https://example.com/agg".into())).unwrap();
        let parsed = StatusListCborClaim::from_cbor(&claim.to_cbor().unwrap()).unwrap();
        assert_eq!(parsed, claim);
        assert_eq!(parsed.into_array().unwrap(), array);
    }

    #[test]
    fn lst_is_a_byte_string() {
        let array = BitStatusArray::new(BitsPerEntry::One, 8).unwrap();
        let bytes = StatusListCborClaim::from_array(&array, None).unwrap().to_cbor().unwrap();
        let value: Value = ciborium::from_reader(bytes.as_slice()).unwrap();
        let entries = value.as_map().unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().any(|(k, v)| k.as_text() == Some("lst") && v.is_bytes()));
    }

    #[test]
    fn rejects_missing_or_mistyped_fields() {
        let mut buf = Vec::new();
        let only_bits = Value::Map(vec![(Value::Text("bits".into()), Value::Integer(1.into()))]);
        ciborium::into_writer(&only_bits, &mut buf).unwrap();
        assert!(matches!(StatusListCborClaim::from_cbor(&buf), Err(StatusListError::Cbor(_))));

        let mut buf = Vec::new();
        let text_lst = Value::Map(vec![
            (Value::Text("bits".into()), Value::Integer(1.into())),
            (Value::Text("lst".into()), Value::Text("eNrbuRgAAhcBXQ".into())),
        ]);
        ciborium::into_writer(&text_lst, &mut buf).unwrap();
        assert!(matches!(StatusListCborClaim::from_cbor(&buf), Err(StatusListError::Cbor(_))));
    }

    #[test]
    fn invalid_bits_are_rejected() {
        let mut buf = Vec::new();
        let value = Value::Map(vec![
            (Value::Text("bits".into()), Value::Integer(3.into())),
            (Value::Text("lst".into()), Value::Bytes(vec![])),
        ]);
        ciborium::into_writer(&value, &mut buf).unwrap();
        assert!(matches!(
            StatusListCborClaim::from_cbor(&buf),
            Err(StatusListError::InvalidBits(3))
        ));
    }
}
