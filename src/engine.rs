use tracing::debug;

use crate::dto::{AccountRow, Operation, OperationType, StorageRow};
use crate::state::{Iterable, IterableWriter, MemoryState};
use crate::{Account, Error};

/// Applies replayed operations to a state backend.
/// Generic over the backend so the same replay can drive any [`IterableWriter`].
pub struct Engine<S = MemoryState> {
    state: S,
}

impl Default for Engine<MemoryState> {
    fn default() -> Self {
        Self::new(MemoryState::new())
    }
}

impl<S: IterableWriter> Engine<S> {
    pub fn new(state: S) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn apply(&mut self, operation: Operation) -> Result<(), Error> {
        debug!(op = ?operation.op_type, address = %operation.address, "applying operation");
        match operation.op_type {
            OperationType::Update => {
                // A row without a balance stands for a nil account record.
                // A missing sequence starts the account at zero.
                let account = operation.balance.map(|balance| Account {
                    address: operation.address,
                    balance,
                    sequence: operation.sequence.unwrap_or_default(),
                });
                self.state.update_account(account)
            }
            OperationType::Remove => self.state.remove_account(&operation.address),
            OperationType::SetStorage => {
                let key = operation.key.ok_or(Error::MissingField("key"))?;
                let value = operation.value.ok_or(Error::MissingField("value"))?;
                self.state.set_storage(&operation.address, key, value)
            }
        }
    }

    /// Account rows sorted by address, each with the size of its storage.
    pub fn account_rows(&self) -> Result<Vec<AccountRow>, Error> {
        let mut accounts = Vec::new();
        self.state.iterate_accounts(&mut |account| {
            accounts.push(account.clone());
            false
        })?;

        let mut rows = Vec::with_capacity(accounts.len());
        for account in &accounts {
            let mut slots = 0;
            self.state.iterate_storage(&account.address(), &mut |_, _| {
                slots += 1;
                false
            })?;
            rows.push(AccountRow::new(account, slots));
        }
        rows.sort_by_key(|row| row.address);
        Ok(rows)
    }
}

impl Engine<MemoryState> {
    /// Storage rows for every address with storage, sorted by address then key.
    /// Includes storage left behind by removed accounts.
    pub fn storage_rows(&self) -> Result<Vec<StorageRow>, Error> {
        let mut rows = Vec::new();
        for address in self.state.storage_addresses() {
            self.state.iterate_storage(address, &mut |key, value| {
                rows.push(StorageRow {
                    address: *address,
                    key: *key,
                    value: *value,
                });
                false
            })?;
        }
        rows.sort_by(|a, b| (a.address, a.key).cmp(&(b.address, b.key)));
        Ok(rows)
    }
}
