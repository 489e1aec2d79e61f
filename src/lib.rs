mod account;
mod csv_utils;
mod dto;
mod engine;
mod error;
mod primitives;
mod runner;
pub mod state;

pub use account::Account;
pub use dto::{AccountRow, Operation, OperationType, StorageRow};
pub use engine::Engine;
pub use error::Error;
pub use primitives::{Address, Word256, ADDRESS_LENGTH, WORD256_LENGTH};
pub use runner::{run, run_async};
pub use state::{Iterable, IterableWriter, MemoryState, Reader, Writer};
