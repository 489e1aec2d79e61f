//! The runner is responsible for setting up a file stream for reading operations from CSV,
//! replaying them into a [`MemoryState`](crate::state::MemoryState), and dumping the
//! resulting accounts and storage to a writer.
//!
//! This module provides both a synchronous and an asynchronous runner implementations.
//!
mod async_runner;
mod sync_runner;

pub use async_runner::run as run_async;
pub use sync_runner::run;

use std::error::Error;
use std::io::Write;

use tracing::info;

use crate::{
    csv_utils::write_csv,
    dto::{AccountRow, StorageRow},
    Engine,
};

type Result<T, E = Box<dyn Error + Send + Sync>> = std::result::Result<T, E>;

/// Writes two CSV blocks: account rows, then every storage entry.
/// Each block starts with its header, even when it has no rows.
fn write_dump<W: Write>(engine: &Engine, mut writer: W) -> Result<()> {
    let accounts = engine.account_rows()?;
    let storage = engine.storage_rows()?;
    info!(
        accounts = accounts.len(),
        storage_entries = storage.len(),
        "writing state dump"
    );
    write_csv(&mut writer, AccountRow::HEADER, accounts.into_iter())?;
    write_csv(&mut writer, StorageRow::HEADER, storage.into_iter())?;
    Ok(())
}

/// Dump expected after replaying `data/example_ops.csv`.
#[cfg(test)]
fn example_dump() -> String {
    use crate::Word256;

    let (a, b, c) = ("11".repeat(20), "22".repeat(20), "33".repeat(20));
    let word = |n: u64| Word256::from(n).to_string();
    format!(
        "address,balance,sequence,storage_slots\n\
         {a},90,1,2\n\
         address,key,value\n\
         {a},{},{}\n\
         {a},{},{}\n\
         {b},{},{}\n\
         {c},{},{}\n",
        word(1),
        word(11),
        word(2),
        word(20),
        word(1),
        word(0),
        word(5),
        word(5),
    )
}
