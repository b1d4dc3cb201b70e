//! # Offline Codec Subcommands
//!
//! `decode` and `encode` work on `lst` strings directly, without fetching.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;

use tsl_core::{BitStatusArray, BitsPerEntry, WireCodec};

/// Arguments for `tsl decode`.
#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Bits per entry (1, 2, 4, or 8).
    #[arg(long, value_parser = crate::parse_bits)]
    pub bits: BitsPerEntry,

    /// The encoded list: base64url(zlib(packed)).
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub lst: Option<String>,

    /// Read the encoded list from a file; line breaks are ignored.
    #[arg(long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Print only the entry at this index.
    #[arg(long)]
    pub index: Option<usize>,
}

/// Arguments for `tsl encode`.
#[derive(Args, Debug)]
pub struct EncodeArgs {
    /// Bits per entry (1, 2, 4, or 8).
    #[arg(long, value_parser = crate::parse_bits)]
    pub bits: BitsPerEntry,

    /// Aggregation URI to include in the claim.
    #[arg(long)]
    pub aggregation_uri: Option<String>,

    /// Entry values in index order. Padded with zeros to a whole byte.
    #[arg(required = true)]
    pub values: Vec<u8>,
}

/// Execute `tsl decode`.
pub fn run_decode(args: &DecodeArgs) -> Result<u8> {
    let encoded = match (&args.lst, &args.file) {
        (Some(lst), _) => lst.clone(),
        (None, Some(file)) => std::fs::read_to_string(file)
            .with_context(|| format!("failed to read file: {}", file.display()))?,
        (None, None) => bail!("either --lst or --file is required"),
    };

    let flat = decode(args.bits, &encoded)?;
    match args.index {
        Some(index) => {
            let Some(value) = flat.get(index) else {
                bail!("index {index} is outside the list of {} entries", flat.len());
            };
            println!("{value}");
        }
        None => println!("{}", serde_json::to_string(&flat)?),
    }
    Ok(0)
}

/// Execute `tsl encode`.
pub fn run_encode(args: &EncodeArgs) -> Result<u8> {
    let claim = encode(args.bits, &args.values)?.to_claim(args.aggregation_uri.clone())?;
    println!("{}", serde_json::to_string_pretty(&claim)?);
    Ok(0)
}

/// Decode `encoded` into one value per entry.
pub fn decode(bits: BitsPerEntry, encoded: &str) -> Result<Vec<u8>> {
    WireCodec::decode(bits, encoded).context("failed to decode status list")
}

/// Pack `values`, zero-padding the tail to a whole byte.
pub fn encode(bits: BitsPerEntry, values: &[u8]) -> Result<BitStatusArray> {
    let per_byte = bits.entries_per_byte();
    let len = values.len().div_ceil(per_byte).max(1) * per_byte;

    let mut array = BitStatusArray::new(bits, len)?;
    for (index, value) in values.iter().enumerate() {
        array
            .set(index, *value)
            .with_context(|| format!("entry {index}"))?;
    }
    Ok(array)
}
