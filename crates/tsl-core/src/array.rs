//! # Bit Status Array
//!
//! A dense sequence of fixed-width status values stored in packed form:
//! entry 0 occupies the least-significant `bits` bits of byte 0, entry 1 the
//! next field up, and so on, wrapping into the next byte once a byte is full.
//!
//! The array never grows or shrinks after construction; [`BitStatusArray::set`]
//! mutates entries in place.

use std::fmt;

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};

use crate::bits::BitsPerEntry;
use crate::codec::WireCodec;
use crate::error::{Result, StatusListError};
use crate::token::StatusListClaim;

/// Packed array of status values.
#[derive(Clone, PartialEq, Eq)]
pub struct BitStatusArray {
    bits: BitsPerEntry,
    entry_count: usize,
    buffer: Vec<u8>,
}

impl BitStatusArray {
    /// Allocate a zero-filled array of `entry_count` entries.
    ///
    /// # Errors
    ///
    /// `InvalidSize` when `entry_count` is zero or not a multiple of
    /// `bits.entries_per_byte()`.
    pub fn new(bits: BitsPerEntry, entry_count: usize) -> Result<Self> {
        let per_byte = bits.entries_per_byte();
        if entry_count == 0 || entry_count % per_byte != 0 {
            return Err(StatusListError::InvalidSize {
                entries: entry_count,
                entries_per_byte: per_byte,
            });
        }
        Ok(Self {
            bits,
            entry_count,
            buffer: vec![0u8; entry_count / per_byte],
        })
    }

    /// Allocate an array with every entry set to `value`.
    pub fn with_default(bits: BitsPerEntry, entry_count: usize, value: u8) -> Result<Self> {
        let mut array = Self::new(bits, entry_count)?;
        check_value(bits, value)?;
        let width = bits.width();
        let mut fill = 0u8;
        let mut shift = 0u8;
        while shift < 8 {
            fill |= value << shift;
            shift += width;
        }
        array.buffer.fill(fill);
        Ok(array)
    }

    /// Adopt an already packed buffer. An empty buffer gives an empty array,
    /// which is how a published list with no entries is represented.
    pub fn from_packed(bits: BitsPerEntry, buffer: Vec<u8>) -> Self {
        Self {
            bits,
            entry_count: buffer.len() * bits.entries_per_byte(),
            buffer,
        }
    }

    /// Inflate an `lst` wire string into a packed array.
    pub fn from_encoded(bits: BitsPerEntry, encoded: &str) -> Result<Self> {
        let raw = WireCodec::decode_packed(encoded)?;
        Ok(Self::from_packed(bits, raw))
    }

    /// Bit width of each entry.
    pub fn bits(&self) -> BitsPerEntry {
        self.bits
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entry_count
    }

    /// Whether the array holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entry_count == 0
    }

    /// The packed backing buffer.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Read the status of entry `index`.
    ///
    /// # Errors
    ///
    /// `Range` when `index >= len()`.
    pub fn get(&self, index: usize) -> Result<u8> {
        let (byte_index, shift) = self.locate(index)?;
        Ok((self.buffer[byte_index] >> shift) & self.bits.mask())
    }

    /// Overwrite the status of entry `index`.
    ///
    /// # Errors
    ///
    /// `Range` when `index >= len()`, `ValueOutOfRange` when `value` does
    /// not fit into the bit width.
    pub fn set(&mut self, index: usize, value: u8) -> Result<()> {
        let (byte_index, shift) = self.locate(index)?;
        check_value(self.bits, value)?;
        let mask = self.bits.mask() << shift;
        let byte = &mut self.buffer[byte_index];
        *byte = (*byte & !mask) | (value << shift);
        Ok(())
    }

    /// Iterate over all entry values in index order.
    pub fn iter(&self) -> impl Iterator<Item = u8> + '_ {
        let width = usize::from(self.bits.width());
        let mask = self.bits.mask();
        (0..self.entry_count).map(move |i| (self.buffer[i * width / 8] >> ((i * width) % 8)) & mask)
    }

    /// The flat, one-value-per-slot view.
    pub fn to_flat(&self) -> Vec<u8> {
        self.iter().collect()
    }

    /// zlib-compressed packed buffer.
    pub fn to_compressed(&self) -> Result<Vec<u8>> {
        WireCodec::deflate(&self.buffer)
    }

    /// Compressed and base64url-encoded buffer, ready for the `lst` claim.
    pub fn to_encoded(&self) -> Result<String> {
        WireCodec::encode_packed(&self.buffer)
    }

    /// Build the JSON `status_list` claim for this array.
    pub fn to_claim(&self, aggregation_uri: Option<String>) -> Result<StatusListClaim> {
        Ok(StatusListClaim {
            bits: self.bits,
            lst: self.to_encoded()?,
            aggregation_uri,
        })
    }

    fn locate(&self, index: usize) -> Result<(usize, u32)> {
        if index >= self.entry_count {
            return Err(StatusListError::Range {
                index,
                len: self.entry_count,
            });
        }
        let bit = index * usize::from(self.bits.width());
        // bit % 8 < 8, so the cast is lossless.
        Ok((bit / 8, (bit % 8) as u32))
    }
}

fn check_value(bits: BitsPerEntry, value: u8) -> Result<()> {
    let max = bits.mask();
    if value > max {
        return Err(StatusListError::ValueOutOfRange { value, max });
    }
    Ok(())
}

impl fmt::Debug for BitStatusArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BitStatusArray")
            .field("bits", &self.bits)
            .field("entry_count", &self.entry_count)
            .field("packed_len", &self.buffer.len())
            .finish()
    }
}

/// Serializes as the flat sequence of entry values.
impl Serialize for BitStatusArray {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.entry_count))?;
        for value in self.iter() {
            seq.serialize_element(&value)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_zero_and_partial_bytes() {
        assert!(matches!(
            BitStatusArray::new(BitsPerEntry::One, 0),
            Err(StatusListError::InvalidSize { .. })
        ));
        assert!(matches!(
            BitStatusArray::new(BitsPerEntry::Two, 6),
            Err(StatusListError::InvalidSize { entries: 6, entries_per_byte: 4 })
        ));
        assert_eq!(BitStatusArray::new(BitsPerEntry::Four, 6).unwrap().as_bytes().len(), 3);
    }

    #[test]
    fn set_uses_lsb_first_layout() {
        let mut array = BitStatusArray::new(BitsPerEntry::Two, 8).unwrap();
        array.set(0, 1).unwrap();
        array.set(3, 3).unwrap();
        array.set(5, 2).unwrap();
        assert_eq!(array.as_bytes(), &[0b1100_0001, 0b0000_1000]);
        assert_eq!(array.to_flat(), vec![1, 0, 0, 3, 0, 2, 0, 0]);
    }

    #[test]
    fn set_overwrites_without_touching_neighbours() {
        let mut array = BitStatusArray::with_default(BitsPerEntry::Four, 4, 0xf).unwrap();
        array.set(1, 0x3).unwrap();
        assert_eq!(array.to_flat(), vec![0xf, 0x3, 0xf, 0xf]);
        array.set(1, 0x0).unwrap();
        assert_eq!(array.get(1).unwrap(), 0);
        assert_eq!(array.get(0).unwrap(), 0xf);
    }

    #[test]
    fn with_default_fills_every_entry() {
        let array = BitStatusArray::with_default(BitsPerEntry::Two, 16, 2).unwrap();
        assert!(array.iter().all(|v| v == 2));
        assert!(matches!(
            BitStatusArray::with_default(BitsPerEntry::One, 8, 2),
            Err(StatusListError::ValueOutOfRange { value: 2, max: 1 })
        ));
    }

    #[test]
    fn out_of_bounds_access_is_a_range_error() {
        let mut array = BitStatusArray::new(BitsPerEntry::One, 16).unwrap();
        assert!(matches!(array.get(16), Err(StatusListError::Range { index: 16, len: 16 })));
        assert!(matches!(array.set(99, 1), Err(StatusListError::Range { .. })));
    }

    #[test]
    fn oversized_value_is_rejected() {
        let mut array = BitStatusArray::new(BitsPerEntry::Two, 4).unwrap();
        assert!(matches!(
            array.set(0, 4),
            Err(StatusListError::ValueOutOfRange { value: 4, max: 3 })
        ));
        assert_eq!(array.get(0).unwrap(), 0);
    }

    #[test]
    fn encoded_form_round_trips_through_the_codec() {
        let mut array = BitStatusArray::new(BitsPerEntry::One, 16).unwrap();
        for i in [0, 3, 4, 5, 7, 8, 9, 13, 15] {
            array.set(i, 1).unwrap();
        }
        let encoded = array.to_encoded().unwrap();
        assert_eq!(WireCodec::decode(BitsPerEntry::One, &encoded).unwrap(), array.to_flat());
        assert_eq!(BitStatusArray::from_encoded(BitsPerEntry::One, &encoded).unwrap(), array);
    }

    #[test]
    fn packed_view_matches_the_short_fixture() {
        let array = BitStatusArray::from_encoded(BitsPerEntry::Two, "eNo76fITAAPfAgc").unwrap();
        assert_eq!(array.len(), 12);
        assert_eq!(array.get(1).unwrap(), 2);
        assert_eq!(array.get(11).unwrap(), 3);
        assert_eq!(array.to_flat(), WireCodec::decode(BitsPerEntry::Two, "eNo76fITAAPfAgc").unwrap());
    }

    #[test]
    fn from_packed_accepts_an_empty_buffer() {
        let array = BitStatusArray::from_packed(BitsPerEntry::Eight, Vec::new());
        assert!(array.is_empty());
        assert!(array.get(0).is_err());
    }

    #[test]
    fn serializes_as_flat_values() {
        let mut array = BitStatusArray::new(BitsPerEntry::Four, 2).unwrap();
        array.set(1, 9).unwrap();
        assert_eq!(serde_json::to_string(&array).unwrap(), "[0,9]");
    }

    #[test]
    fn claim_carries_bits_and_aggregation_uri() {
        let array = BitStatusArray::new(BitsPerEntry::One, 8).unwrap();
        let claim = array.to_claim(Some("https://example.com/agg".into())).unwrap();
        assert_eq!(claim.bits, BitsPerEntry::One);
        assert_eq!(claim.aggregation_uri.as_deref(), Some("https://example.com/agg"));
        assert_eq!(WireCodec::decode(claim.bits, &claim.lst).unwrap(), vec![0; 8]);
    }
}
