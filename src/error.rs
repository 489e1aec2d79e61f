//! Domain-specific errors for the state stores.
//!
//! Contains error variants for:
//! - Contract precondition violations (nil account)
//! - Storage lookups that miss (no storage for the account, or no such key)
//! - Malformed primitives and replayed operations
//!
//! A missing account is deliberately absent from this list: account lookups
//! report absence through `Option`, not through an error.

use thiserror::Error;

use crate::primitives::{Address, Word256};

#[derive(Error, Debug)]
pub enum Error {
    #[error("UpdateAccount passed nil account in MemoryState")]
    NilAccount,
    #[error("could not find storage for account {address}")]
    StorageNotFound { address: Address },
    #[error("could not find key {key} for account {address}")]
    StorageKeyNotFound { address: Address, key: Word256 },
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),
    #[error("invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("operation is missing field `{0}`")]
    MissingField(&'static str),
}
