use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Account, Address, Word256};

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Update,
    Remove,
    SetStorage,
}

/// One replayed state operation. Which optional columns are required
/// depends on `op_type`; the engine checks them.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct Operation {
    #[serde(rename = "op")]
    pub op_type: OperationType,
    pub address: Address,
    pub balance: Option<Decimal>,
    pub sequence: Option<u64>,
    pub key: Option<Word256>,
    pub value: Option<Word256>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct AccountRow {
    pub address: Address,
    pub balance: Decimal,
    pub sequence: u64,
    pub storage_slots: usize,
}

impl AccountRow {
    pub const HEADER: &'static [&'static str] =
        &["address", "balance", "sequence", "storage_slots"];

    pub fn new(account: &Account, storage_slots: usize) -> Self {
        Self {
            address: account.address(),
            balance: account.balance,
            sequence: account.sequence,
            storage_slots,
        }
    }
}

#[derive(Debug, Serialize, PartialEq)]
pub struct StorageRow {
    pub address: Address,
    pub key: Word256,
    pub value: Word256,
}

impl StorageRow {
    pub const HEADER: &'static [&'static str] = &["address", "key", "value"];
}
