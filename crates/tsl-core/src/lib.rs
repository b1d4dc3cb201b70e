//! # tsl-core — Token Status Lists
//!
//! Data model and codecs for remotely published status lists:
//!
//! - **Bits** (`bits.rs`): the legal entry widths (1, 2, 4, 8).
//! - **Array** (`array.rs`): packed status storage with `get`/`set` by index.
//! - **Codec** (`codec.rs`): `base64url(zlib(packed))` to and from the flat,
//!   one-value-per-slot form.
//! - **Token** (`token.rs`): compact-token and plain-JSON body parsing, with a
//!   signature verification hook.
//! - **CBOR** (`cbor.rs`): the CBOR `status_list` claim.
//! - **Document** (`document.rs`): decoded list, aggregation document, and the
//!   credential-side reference to one entry.
//! - **Outcome** (`outcome.rs`): the closed `Found / NotFound / InvalidState`
//!   result shape.
//!
//! ## Crate Policy
//!
//! - No I/O. Fetching lives in `tsl-client`.
//! - Every type is created per request; nothing here holds shared state.

pub mod array;
pub mod bits;
pub mod cbor;
pub mod codec;
pub mod document;
pub mod error;
pub mod outcome;
pub mod token;

pub use array::BitStatusArray;
pub use bits::BitsPerEntry;
pub use cbor::StatusListCborClaim;
pub use codec::WireCodec;
pub use document::{AggregationDocument, StatusListDocument, StatusListReference};
pub use error::StatusListError;
pub use outcome::QueryOutcome;
pub use token::{
    StatusListClaim, StatusListClaims, StatusListToken, StatusTokenParser, TokenHeader,
    TokenVerifier,
};
