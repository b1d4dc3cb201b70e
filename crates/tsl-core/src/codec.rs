//! # Wire Codec
//!
//! Stateless conversion between the `lst` wire string and status values.
//!
//! The wire string is `base64url(zlib(packed))` without padding, where
//! `packed` stores `8 / bits` entries per byte. Decoding yields the *flat*
//! form: one status value per output slot, `result[i]` being the status of
//! entry `i`.
//!
//! ## Entry order inside a byte
//!
//! Reading a byte most-significant-bit first yields its entries in reverse
//! logical order. [`WireCodec::unpack`] extracts fields MSB-first and
//! mirrors each group of `8 / bits` entries back into place, which is the
//! same as reading entry `i` at bit shift `(i * bits) % 8` counted from the
//! least-significant bit. [`crate::BitStatusArray`] addresses its packed
//! buffer that way, so both views always agree.

use std::io::{Read, Write};

use base64ct::{Base64UrlUnpadded, Encoding};
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::bits::BitsPerEntry;
use crate::error::{Result, StatusListError};

/// Upper bound on the inflated size of a single status list (64 MiB).
pub const MAX_INFLATED_LEN: u64 = 64 * 1024 * 1024;

/// Encoder/decoder for the compressed, base64url-encoded list.
#[derive(Debug, Clone, Copy, Default)]
pub struct WireCodec;

impl WireCodec {
    /// Decode an encoded list into its flat, one-value-per-slot form.
    ///
    /// # Errors
    ///
    /// `Decode` on invalid base64url, `Decompression` on a corrupt or
    /// oversized zlib stream.
    pub fn decode(bits: BitsPerEntry, encoded: &str) -> Result<Vec<u8>> {
        let raw = Self::decode_packed(encoded)?;
        Ok(Self::unpack(bits, &raw))
    }

    /// Decode an encoded list into its packed byte buffer.
    pub fn decode_packed(encoded: &str) -> Result<Vec<u8>> {
        let compressed = Self::decode_base64(encoded)?;
        Self::inflate(&compressed)
    }

    /// Expand a packed buffer into the flat form.
    pub fn unpack(bits: BitsPerEntry, raw: &[u8]) -> Vec<u8> {
        let width = usize::from(bits.width());
        let per_byte = bits.entries_per_byte();
        let total = raw.len() * 8 / width;

        let mut result = vec![0u8; total];
        // MSB-first offset of the next field within the current byte.
        let mut bit_offset = 0usize;
        for i in 0..total {
            let byte = raw[i * width / 8];
            let field = (byte >> (8 - width - bit_offset)) & bits.mask();

            let group = i / per_byte;
            let index_in_group = i % per_byte;
            let position = group * per_byte + (per_byte - 1 - index_in_group);
            result[position] = field;

            bit_offset = (bit_offset + width) % 8;
        }
        result
    }

    /// Compress and encode a packed buffer into the `lst` wire string.
    pub fn encode_packed(raw: &[u8]) -> Result<String> {
        let compressed = Self::deflate(raw)?;
        Ok(Base64UrlUnpadded::encode_string(&compressed))
    }

    /// Base64url-decode (no padding). ASCII whitespace is ignored so that
    /// line-wrapped lists decode unchanged. Nonzero unused trailing bits
    /// are rejected (RFC 4648 §3.5).
    pub fn decode_base64(encoded: &str) -> Result<Vec<u8>> {
        let compact: String = encoded
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        Ok(Base64UrlUnpadded::decode_vec(&compact)?)
    }

    /// Inflate a zlib (RFC 1950) stream.
    pub fn inflate(compressed: &[u8]) -> Result<Vec<u8>> {
        let mut raw = Vec::new();
        ZlibDecoder::new(compressed)
            .take(MAX_INFLATED_LEN + 1)
            .read_to_end(&mut raw)
            .map_err(|e| StatusListError::Decompression(e.to_string()))?;

        if raw.len() as u64 > MAX_INFLATED_LEN {
            return Err(StatusListError::Decompression(format!(
                "inflated list exceeds {MAX_INFLATED_LEN} bytes"
            )));
        }
        Ok(raw)
    }

    /// Deflate with zlib framing at the best compression level.
    pub fn deflate(raw: &[u8]) -> Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::best());
        encoder
            .write_all(raw)
            .map_err(|e| StatusListError::Compression(e.to_string()))?;
        encoder
            .finish()
            .map_err(|e| StatusListError::Compression(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices_with(list: &[u8], value: u8) -> Vec<usize> {
        list.iter()
            .enumerate()
            .filter(|(_, v)| **v == value)
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn decodes_short_one_bit_list() {
        let list = WireCodec::decode(BitsPerEntry::One, "eNrbuRgAAhcBXQ").unwrap();
        assert_eq!(list.len(), 16);
        assert_eq!(indices_with(&list, 1), vec![0, 3, 4, 5, 7, 8, 9, 13, 15]);
        assert_eq!(indices_with(&list, 0).len(), 7);
    }

    #[test]
    fn decodes_short_two_bit_list() {
        let list = WireCodec::decode(BitsPerEntry::Two, "eNo76fITAAPfAgc").unwrap();
        assert_eq!(list.len(), 12);
        assert_eq!(indices_with(&list, 1), vec![0, 5, 7, 8]);
        assert_eq!(indices_with(&list, 2), vec![1, 9]);
        assert_eq!(indices_with(&list, 3), vec![3, 10, 11]);
        assert_eq!(indices_with(&list, 0), vec![2, 4, 6]);
    }

    #[test]
    fn unpack_mirrors_entries_within_a_byte() {
        // 0b1100_0001: LSB-first 2-bit fields are 1, 0, 0, 3.
        assert_eq!(WireCodec::unpack(BitsPerEntry::Two, &[0b1100_0001]), vec![1, 0, 0, 3]);
        // 4-bit: low nibble first.
        assert_eq!(WireCodec::unpack(BitsPerEntry::Four, &[0xa5]), vec![0x5, 0xa]);
        assert_eq!(WireCodec::unpack(BitsPerEntry::Eight, &[7, 9]), vec![7, 9]);
    }

    #[test]
    fn whitespace_is_ignored() {
        let wrapped = "eNrbuRgA\n  AhcBXQ\r\n";
        assert_eq!(
            WireCodec::decode(BitsPerEntry::One, wrapped).unwrap(),
            WireCodec::decode(BitsPerEntry::One, "eNrbuRgAAhcBXQ").unwrap()
        );
    }

    #[test]
    fn rejects_invalid_alphabet_and_padding() {
        assert!(matches!(
            WireCodec::decode(BitsPerEntry::One, "eNrb*RgAAhcBXQ"),
            Err(StatusListError::Decode(_))
        ));
        assert!(matches!(
            WireCodec::decode(BitsPerEntry::One, "eNrbuRgAAhcBXQ=="),
            Err(StatusListError::Decode(_))
        ));
    }

    #[test]
    fn rejects_non_canonical_trailing_bits() {
        // Same bytes as "eNrbuRgAAhcBXQ" with a nonzero unused low bit.
        assert!(matches!(
            WireCodec::decode(BitsPerEntry::One, "eNrbuRgAAhcBXR"),
            Err(StatusListError::Decode(_))
        ));
    }

    #[test]
    fn rejects_corrupt_zlib_stream() {
        let encoded = Base64UrlUnpadded::encode_string(b"definitely not zlib");
        assert!(matches!(
            WireCodec::decode(BitsPerEntry::One, &encoded),
            Err(StatusListError::Decompression(_))
        ));
    }

    /// zlib stream of `len` zero bytes, written in chunks.
    fn zeros_stream(len: u64) -> Vec<u8> {
        let chunk = vec![0u8; 1 << 20];
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::fast());
        let mut remaining = len;
        while remaining > 0 {
            let n = remaining.min(chunk.len() as u64) as usize;
            encoder.write_all(&chunk[..n]).unwrap();
            remaining -= n as u64;
        }
        encoder.finish().unwrap()
    }

    #[test]
    fn inflate_accepts_list_at_size_cap() {
        let raw = WireCodec::inflate(&zeros_stream(MAX_INFLATED_LEN)).unwrap();
        assert_eq!(raw.len() as u64, MAX_INFLATED_LEN);
    }

    #[test]
    fn inflate_rejects_list_over_size_cap() {
        let encoded = Base64UrlUnpadded::encode_string(&zeros_stream(MAX_INFLATED_LEN + 1));
        assert!(matches!(
            WireCodec::decode(BitsPerEntry::Eight, &encoded),
            Err(StatusListError::Decompression(_))
        ));
    }

    #[test]
    fn empty_payload_decodes_to_empty_list() {
        let encoded = WireCodec::encode_packed(&[]).unwrap();
        assert!(WireCodec::decode(BitsPerEntry::Eight, &encoded).unwrap().is_empty());
    }

    #[test]
    fn deflate_uses_zlib_framing() {
        let compressed = WireCodec::deflate(&[0u8; 32]).unwrap();
        // CMF 0x78 = deflate, 32K window; FLG 0xDA = best compression.
        assert_eq!(&compressed[..2], &[0x78, 0xda]);
        assert_eq!(WireCodec::inflate(&compressed).unwrap(), vec![0u8; 32]);
    }
}
