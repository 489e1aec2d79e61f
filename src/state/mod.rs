//! State layer shared by every backend. Defines the capability contract:
//! - Point reads of accounts and storage ([`Reader`])
//! - Point writes and deletes ([`Writer`])
//! - Full scans with early stop ([`Iterable`])
//!
//! [`IterableWriter`] is the union of the three and is what ledger logic
//! holds. [`MemoryState`] is the volatile implementation; persistent
//! backends implement the same traits.

mod memory;

pub use memory::MemoryState;

use crate::{Account, Address, Error, Word256};

pub trait Reader {
    /// Returns `Ok(None)` when no account is stored under `address`.
    fn get_account(&self, address: &Address) -> Result<Option<Account>, Error>;

    /// Unlike [`Reader::get_account`], a miss is an error here.
    fn get_storage(&self, address: &Address, key: &Word256) -> Result<Word256, Error>;
}

pub trait Writer {
    /// Inserts or overwrites the account under its own address.
    /// `None` is a nil record and must be rejected.
    fn update_account(&mut self, account: Option<Account>) -> Result<(), Error>;

    fn remove_account(&mut self, address: &Address) -> Result<(), Error>;

    fn set_storage(&mut self, address: &Address, key: Word256, value: Word256)
        -> Result<(), Error>;
}

/// Visitors return `true` to stop. Both methods return whether iteration
/// was stopped early. Order is unspecified.
pub trait Iterable {
    fn iterate_accounts(&self, consumer: &mut dyn FnMut(&Account) -> bool)
        -> Result<bool, Error>;

    fn iterate_storage(
        &self,
        address: &Address,
        consumer: &mut dyn FnMut(&Word256, &Word256) -> bool,
    ) -> Result<bool, Error>;
}

pub trait IterableWriter: Reader + Writer + Iterable {}

impl<T: Reader + Writer + Iterable + ?Sized> IterableWriter for T {}
