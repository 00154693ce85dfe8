//! Error taxonomy for the ledger.
//!
//! Nothing here is fatal: every failure names the identifier involved,
//! leaves the store unchanged, and the store remains usable afterwards.
//! Presenting these to a human is the caller's concern.

use std::io;

use thiserror::Error;

/// An insert collided with an already-stored order key.
///
/// Carries the rejected item identifier. Because the key is hash-derived,
/// a collision between distinct identifiers is reported the same way as a
/// genuine duplicate; see [`derive_key`](crate::derive_key).
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("duplicate item id ({0}); entry not added")]
pub struct DuplicateId(pub String);

/// A removal target was not present in the store.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
#[error("no item with id {0} in the inventory")]
pub struct NotFound(pub String);

/// Umbrella error for callers that mix store mutation with file I/O.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Duplicate(#[from] DuplicateId),
    #[error(transparent)]
    Missing(#[from] NotFound),
    #[error("inventory file i/o failed: {0}")]
    Io(#[from] io::Error),
}
