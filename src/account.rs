use rust_decimal::Decimal;

use crate::primitives::Address;

/// A ledger account record. Stores key it by [`Account::address`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub address: Address,
    pub balance: Decimal,
    pub sequence: u64,
}

impl Account {
    pub fn new(address: Address, balance: Decimal) -> Self {
        Self {
            address,
            balance,
            sequence: 0,
        }
    }

    pub fn address(&self) -> Address {
        self.address
    }
}
