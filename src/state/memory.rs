//! Volatile two-level store: address → account, and
//! address → (storage key → storage value).
//!
//! Storage sub-maps are created on the first write under an address and are
//! never dropped before the store itself, so storage outlives a removed
//! account. There is no internal locking: writes need `&mut self`, and
//! callers sharing a store across tasks must synchronize it themselves.

use std::collections::HashMap;

use super::{Iterable, Reader, Writer};
use crate::{Account, Address, Error, Word256};

#[derive(Debug, Default)]
pub struct MemoryState {
    accounts: HashMap<Address, Account>,
    storage: HashMap<Address, HashMap<Word256, Word256>>,
}

impl MemoryState {
    pub fn new() -> Self {
        Self {
            accounts: HashMap::new(),
            storage: HashMap::new(),
        }
    }

    pub fn len_accounts(&self) -> usize {
        self.accounts.len()
    }

    /// Addresses that have a storage sub-map, with or without an account.
    pub fn storage_addresses(&self) -> impl Iterator<Item = &Address> {
        self.storage.keys()
    }
}

impl Reader for MemoryState {
    fn get_account(&self, address: &Address) -> Result<Option<Account>, Error> {
        Ok(self.accounts.get(address).cloned())
    }

    fn get_storage(&self, address: &Address, key: &Word256) -> Result<Word256, Error> {
        let storage = self
            .storage
            .get(address)
            .ok_or(Error::StorageNotFound { address: *address })?;
        storage
            .get(key)
            .copied()
            .ok_or(Error::StorageKeyNotFound {
                address: *address,
                key: *key,
            })
    }
}

impl Writer for MemoryState {
    fn update_account(&mut self, account: Option<Account>) -> Result<(), Error> {
        let account = account.ok_or(Error::NilAccount)?;
        self.accounts.insert(account.address(), account);
        Ok(())
    }

    fn remove_account(&mut self, address: &Address) -> Result<(), Error> {
        self.accounts.remove(address);
        Ok(())
    }

    fn set_storage(
        &mut self,
        address: &Address,
        key: Word256,
        value: Word256,
    ) -> Result<(), Error> {
        self.storage.entry(*address).or_default().insert(key, value);
        Ok(())
    }
}

impl Iterable for MemoryState {
    fn iterate_accounts(
        &self,
        consumer: &mut dyn FnMut(&Account) -> bool,
    ) -> Result<bool, Error> {
        Ok(self.accounts.values().any(|account| consumer(account)))
    }

    fn iterate_storage(
        &self,
        address: &Address,
        consumer: &mut dyn FnMut(&Word256, &Word256) -> bool,
    ) -> Result<bool, Error> {
        let Some(storage) = self.storage.get(address) else {
            return Ok(false);
        };
        Ok(storage.iter().any(|(key, value)| consumer(key, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IterableWriter;
    use rust_decimal_macros::dec;
    use std::collections::HashSet;

    fn address(byte: u8) -> Address {
        Address::new([byte; 20])
    }

    fn account(byte: u8) -> Account {
        Account::new(address(byte), dec!(100))
    }

    #[test]
    fn test_new_store_is_empty() {
        let state = MemoryState::new();
        assert_eq!(state.get_account(&address(1)).unwrap(), None);
        assert_eq!(state.len_accounts(), 0);
        assert_eq!(state.storage_addresses().count(), 0);
    }

    #[test]
    fn test_update_and_get_account() {
        let mut state = MemoryState::new();
        let acc = account(1);

        state.update_account(Some(acc.clone())).unwrap();
        assert_eq!(state.get_account(&acc.address()).unwrap(), Some(acc));

        // Other addresses are still absent, without an error
        assert_eq!(state.get_account(&address(2)).unwrap(), None);
    }

    #[test]
    fn test_update_overwrites_account() {
        let mut state = MemoryState::new();
        let mut acc = account(1);
        state.update_account(Some(acc.clone())).unwrap();

        acc.balance = dec!(42.5);
        acc.sequence = 3;
        state.update_account(Some(acc.clone())).unwrap();

        assert_eq!(state.get_account(&acc.address()).unwrap(), Some(acc));
        assert_eq!(state.len_accounts(), 1);
    }

    #[test]
    fn test_update_nil_account_fails() {
        let mut state = MemoryState::new();
        state.update_account(Some(account(1))).unwrap();

        let result = state.update_account(None);
        assert!(matches!(result, Err(Error::NilAccount)));

        // Account map is unchanged
        assert_eq!(state.len_accounts(), 1);
        assert_eq!(state.get_account(&address(1)).unwrap(), Some(account(1)));
    }

    #[test]
    fn test_remove_account() {
        let mut state = MemoryState::new();
        state.update_account(Some(account(1))).unwrap();

        state.remove_account(&address(1)).unwrap();
        assert_eq!(state.get_account(&address(1)).unwrap(), None);

        // Removing an unknown address is a no-op
        state.remove_account(&address(2)).unwrap();
        assert_eq!(state.get_account(&address(2)).unwrap(), None);
    }

    #[test]
    fn test_get_storage_missing_account_storage() {
        let state = MemoryState::new();
        let result = state.get_storage(&address(1), &Word256::from(1));
        assert!(matches!(
            result,
            Err(Error::StorageNotFound { address: a }) if a == address(1)
        ));
    }

    #[test]
    fn test_get_storage_missing_key() {
        let mut state = MemoryState::new();
        state
            .set_storage(&address(1), Word256::from(1), Word256::from(10))
            .unwrap();

        let result = state.get_storage(&address(1), &Word256::from(2));
        assert!(matches!(
            result,
            Err(Error::StorageKeyNotFound { address: a, key: k })
                if a == address(1) && k == Word256::from(2)
        ));
    }

    #[test]
    fn test_storage_errors_have_distinct_messages() {
        let mut state = MemoryState::new();
        let missing_storage = state
            .get_storage(&address(1), &Word256::from(1))
            .unwrap_err()
            .to_string();

        state
            .set_storage(&address(1), Word256::from(2), Word256::from(20))
            .unwrap();
        let missing_key = state
            .get_storage(&address(1), &Word256::from(1))
            .unwrap_err()
            .to_string();

        assert_eq!(
            missing_storage,
            format!("could not find storage for account {}", address(1))
        );
        assert_eq!(
            missing_key,
            format!(
                "could not find key {} for account {}",
                Word256::from(1),
                address(1)
            )
        );
    }

    #[test]
    fn test_set_storage_overwrites() {
        let mut state = MemoryState::new();
        let key = Word256::from(1);

        state.set_storage(&address(1), key, Word256::from(10)).unwrap();
        state.set_storage(&address(1), key, Word256::from(20)).unwrap();
        assert_eq!(state.get_storage(&address(1), &key).unwrap(), Word256::from(20));

        // Repeating an identical write changes nothing
        state.set_storage(&address(1), key, Word256::from(20)).unwrap();
        assert_eq!(state.get_storage(&address(1), &key).unwrap(), Word256::from(20));
    }

    #[test]
    fn test_zero_value_is_distinct_from_missing_key() {
        let mut state = MemoryState::new();
        state
            .set_storage(&address(1), Word256::from(1), Word256::ZERO)
            .unwrap();

        assert_eq!(
            state.get_storage(&address(1), &Word256::from(1)).unwrap(),
            Word256::ZERO
        );
        assert!(state.get_storage(&address(1), &Word256::from(2)).is_err());
    }

    #[test]
    fn test_storage_without_account() {
        let mut state = MemoryState::new();
        state
            .set_storage(&address(9), Word256::from(1), Word256::from(1))
            .unwrap();

        assert_eq!(state.get_account(&address(9)).unwrap(), None);
        assert_eq!(
            state.storage_addresses().copied().collect::<Vec<_>>(),
            vec![address(9)]
        );
    }

    #[test]
    fn test_iterate_accounts_visits_all() {
        let mut state = MemoryState::new();
        for byte in 1..=3 {
            state.update_account(Some(account(byte))).unwrap();
        }

        let mut seen = HashSet::new();
        let mut calls = 0;
        let stopped = state
            .iterate_accounts(&mut |acc| {
                calls += 1;
                seen.insert(acc.address());
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 3);
        assert_eq!(seen, HashSet::from([address(1), address(2), address(3)]));
    }

    #[test]
    fn test_iterate_accounts_stops_early() {
        let mut state = MemoryState::new();
        for byte in 1..=3 {
            state.update_account(Some(account(byte))).unwrap();
        }

        let mut calls = 0;
        let stopped = state
            .iterate_accounts(&mut |_| {
                calls += 1;
                true
            })
            .unwrap();

        assert!(stopped);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_iterate_empty_store() {
        let state = MemoryState::new();
        let mut calls = 0;
        let stopped = state
            .iterate_accounts(&mut |_| {
                calls += 1;
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_iterate_storage_without_sub_map() {
        let mut state = MemoryState::new();
        state.update_account(Some(account(1))).unwrap();

        let mut calls = 0;
        let stopped = state
            .iterate_storage(&address(1), &mut |_, _| {
                calls += 1;
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_iterate_storage_full_pass() {
        let mut state = MemoryState::new();
        for n in 1..=3 {
            state
                .set_storage(&address(1), Word256::from(n), Word256::from(n * 10))
                .unwrap();
        }

        let mut calls = 0;
        let stopped = state
            .iterate_storage(&address(1), &mut |_, _| {
                calls += 1;
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 3);
    }

    #[test]
    fn test_iterate_storage_stops_early() {
        let mut state = MemoryState::new();
        for n in 1..=5 {
            state
                .set_storage(&address(1), Word256::from(n), Word256::from(n))
                .unwrap();
        }

        let mut calls = 0;
        let stopped = state
            .iterate_storage(&address(1), &mut |_, _| {
                calls += 1;
                calls == 2
            })
            .unwrap();

        assert!(stopped);
        assert_eq!(calls, 2);
    }

    #[test]
    fn test_storage_survives_account_removal() {
        let mut state = MemoryState::new();
        let acc = account(1);
        let (key1, value1) = (Word256::from(1), Word256::from(11));
        let (key2, value2) = (Word256::from(2), Word256::from(22));

        state.update_account(Some(acc.clone())).unwrap();
        state.set_storage(&acc.address(), key1, value1).unwrap();
        state.set_storage(&acc.address(), key2, value2).unwrap();

        let mut collected = HashSet::new();
        let stopped = state
            .iterate_storage(&acc.address(), &mut |key, value| {
                collected.insert((*key, *value));
                false
            })
            .unwrap();
        assert!(!stopped);
        assert_eq!(collected, HashSet::from([(key1, value1), (key2, value2)]));

        state.remove_account(&acc.address()).unwrap();
        assert_eq!(state.get_account(&acc.address()).unwrap(), None);
        assert_eq!(state.get_storage(&acc.address(), &key1).unwrap(), value1);
    }

    #[test]
    fn test_usable_as_trait_object() {
        let mut state: Box<dyn IterableWriter> = Box::new(MemoryState::new());
        state.update_account(Some(account(1))).unwrap();
        state
            .set_storage(&address(1), Word256::from(1), Word256::from(2))
            .unwrap();

        assert!(state.get_account(&address(1)).unwrap().is_some());
        assert_eq!(
            state.get_storage(&address(1), &Word256::from(1)).unwrap(),
            Word256::from(2)
        );
    }
}
