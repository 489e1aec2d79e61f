use std::io::Write;
use std::path::Path;

use tracing::warn;

use super::{write_dump, Result};
use crate::{csv_utils::read_csv, dto::Operation, Engine};

/// Replays the operations in the given input file and writes the resulting state to the provided writer.
///
/// # Arguments
/// * `input_path` - Path to the input CSV file containing operations
/// * `writer` - Where to write the state dump (e.g. stdout)
///
/// # Errors
/// Returns an error if:
/// * The input file cannot be read
/// * The CSV is malformed
/// * Writing to the output fails
pub fn run<P, W>(input_path: P, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    let mut engine = Engine::default();

    let operations_iter = read_csv::<Operation, _>(input_path)?;
    for operation in operations_iter {
        // CSV parsing errors are critical - propagate them
        let operation = operation?;
        // Rejected operations leave the state untouched and are skipped
        if let Err(err) = engine.apply(operation) {
            warn!(%err, "skipping operation");
        }
    }

    write_dump(&engine, writer)
}
