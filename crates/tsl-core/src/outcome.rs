//! # Query Outcome
//!
//! The closed `Found / NotFound / InvalidState` result returned by every
//! query in the status subsystem. Callers match all three arms; there is no
//! catch-all variant.

use serde::Serialize;

/// Tri-state result of a status list query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[must_use]
pub enum QueryOutcome<T> {
    /// The resource exists and was decoded.
    Found(T),
    /// The resource is absent or empty.
    NotFound,
    /// Fetching or decoding failed.
    InvalidState,
}

impl<T> QueryOutcome<T> {
    /// `Found(value)` unless `is_empty(&value)`, in which case `NotFound`.
    pub fn found_unless(value: T, is_empty: impl FnOnce(&T) -> bool) -> Self {
        if is_empty(&value) {
            Self::NotFound
        } else {
            Self::Found(value)
        }
    }

    /// Transform the found value, keeping the other arms.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> QueryOutcome<U> {
        match self {
            Self::Found(value) => QueryOutcome::Found(f(value)),
            Self::NotFound => QueryOutcome::NotFound,
            Self::InvalidState => QueryOutcome::InvalidState,
        }
    }

    /// Borrow the found value.
    pub fn as_ref(&self) -> QueryOutcome<&T> {
        match self {
            Self::Found(value) => QueryOutcome::Found(value),
            Self::NotFound => QueryOutcome::NotFound,
            Self::InvalidState => QueryOutcome::InvalidState,
        }
    }

    /// The found value, discarding which failure arm applied.
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound | Self::InvalidState => None,
        }
    }

    /// `true` for `Found`.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}
