//! # tsl-cli — CLI Tool for Token Status Lists
//!
//! Provides the `tsl` command-line interface.
//!
//! ## Subcommands
//!
//! - `tsl decode`: Decode an encoded `lst` offline, whole or one entry.
//! - `tsl encode`: Pack and encode a flat list of values.
//! - `tsl fetch`: Fetch a published status list, whole or one entry.
//! - `tsl aggregation`: Fetch the status lists of an issuance pool.
//!
//! ```bash
//! tsl decode --bits 1 --lst eNrbuRgAAhcBXQ --index 3
//! tsl encode --bits 2 1 2 0 3
//! tsl fetch https://issuer.example/lists/1 --index 42
//! tsl aggregation pool-a --base-url https://issuer.example/aggregation
//! ```
//!
//! ## Exit Codes
//!
//! `0` found, `1` error or invalid state, `2` not found.

pub mod codec;
pub mod remote;

use tsl_core::BitsPerEntry;

/// Exit code for a `NotFound` outcome.
pub const EXIT_NOT_FOUND: u8 = 2;

/// Parse a `--bits` value into an entry width.
pub fn parse_bits(raw: &str) -> Result<BitsPerEntry, String> {
    let bits: u8 = raw
        .parse()
        .map_err(|_| format!("`{raw}` is not a number"))?;
    BitsPerEntry::try_from(bits).map_err(|e| e.to_string())
}
