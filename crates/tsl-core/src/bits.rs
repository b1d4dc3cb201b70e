//! # Bits Per Entry
//!
//! Width of a single status slot. Only widths that evenly divide a byte are
//! legal, so every byte holds a whole number of entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::StatusListError;

/// Number of bits used to encode one status value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BitsPerEntry {
    /// 1 bit per entry, 8 entries per byte.
    One,
    /// 2 bits per entry, 4 entries per byte.
    Two,
    /// 4 bits per entry, 2 entries per byte.
    Four,
    /// 8 bits per entry, 1 entry per byte.
    Eight,
}

impl BitsPerEntry {
    /// All supported widths, narrowest first.
    pub const ALL: [BitsPerEntry; 4] = [Self::One, Self::Two, Self::Four, Self::Eight];

    /// Width in bits.
    pub const fn width(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Four => 4,
            Self::Eight => 8,
        }
    }

    /// How many entries share one byte (`8 / width`).
    pub const fn entries_per_byte(self) -> usize {
        8 / self.width() as usize
    }

    /// Bitmask with the low `width` bits set; also the largest legal value.
    pub const fn mask(self) -> u8 {
        match self {
            Self::Eight => u8::MAX,
            other => (1u8 << other.width()) - 1,
        }
    }
}

impl TryFrom<u8> for BitsPerEntry {
    type Error = StatusListError;

    fn try_from(bits: u8) -> Result<Self, Self::Error> {
        match bits {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            other => Err(StatusListError::InvalidBits(other)),
        }
    }
}

impl From<BitsPerEntry> for u8 {
    fn from(bits: BitsPerEntry) -> Self {
        bits.width()
    }
}

impl fmt::Display for BitsPerEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.width())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_only_byte_divisors() {
        for bits in 0..=16u8 {
            let parsed = BitsPerEntry::try_from(bits);
            assert_eq!(parsed.is_ok(), matches!(bits, 1 | 2 | 4 | 8), "bits = {bits}");
        }
    }

    #[test]
    fn masks_and_entries_per_byte() {
        assert_eq!(BitsPerEntry::One.mask(), 0b1);
        assert_eq!(BitsPerEntry::Two.mask(), 0b11);
        assert_eq!(BitsPerEntry::Four.mask(), 0x0f);
        assert_eq!(BitsPerEntry::Eight.mask(), 0xff);
        assert_eq!(BitsPerEntry::One.entries_per_byte(), 8);
        assert_eq!(BitsPerEntry::Eight.entries_per_byte(), 1);
    }

    #[test]
    fn serde_uses_the_integer_width() {
        let json = serde_json::to_string(&BitsPerEntry::Four).unwrap();
        assert_eq!(json, "4");
        let parsed: BitsPerEntry = serde_json::from_str("2").unwrap();
        assert_eq!(parsed, BitsPerEntry::Two);
        assert!(serde_json::from_str::<BitsPerEntry>("3").is_err());
    }
}
