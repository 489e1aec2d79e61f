use std::io::Write;
use std::path::Path;

use csv_async::{AsyncReaderBuilder, Error as CsvError, Trim};
use tokio::fs::File;
use tokio::sync::mpsc;
use tokio_stream::StreamExt;
use tracing::warn;

use super::{write_dump, Result};
use crate::{dto::Operation, Engine};

const BUFFER_SIZE: usize = 1024;

/// Replays operations async from the given input file and writes the resulting state to the provided writer.
/// Spawns two tasks:
/// * CSV reader - streams operations from the input file, deserializes them and sends them to the processor via channel.
/// * Processor - owns the state, receives operations from the channel and applies them until the channel is closed.
///
/// The processor task is the only writer, so the state needs no lock.
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
pub async fn run<P, W>(input_path: P, writer: W) -> Result<()>
where
    P: AsRef<Path>,
    W: Write,
{
    // Create channel for passing operations from reader to processor
    let (tx, rx) = mpsc::channel(BUFFER_SIZE);
    let input_path = input_path.as_ref().to_owned();

    let reader_handle = tokio::spawn(read_operations(input_path, tx));
    let processor_handle = tokio::spawn(process_operations(rx));

    // Wait for reader to finish and propagate any errors
    reader_handle.await??;

    // Get final engine state
    let engine = processor_handle.await?;

    write_dump(&engine, writer)
}

/// Reads and deserializes operations from a CSV file.
/// Returns them through the provided channel.
async fn read_operations(
    input_path: impl AsRef<Path> + Send,
    tx: mpsc::Sender<Operation>,
) -> Result<(), CsvError> {
    let file = File::open(input_path).await?;
    let mut csv_reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .create_deserializer(file);

    let mut records = csv_reader.deserialize::<Operation>();
    while let Some(result) = records.next().await {
        match result {
            Ok(operation) => {
                if tx.send(operation).await.is_err() {
                    // Receiver dropped, exit gracefully
                    break;
                }
            }
            // CSV parsing errors are critical - propagate them
            Err(e) => return Err(e),
        }
    }
    Ok(())
}

/// Applies operations received through the channel.
/// Returns the final engine once the channel is closed by the reader.
async fn process_operations(mut rx: mpsc::Receiver<Operation>) -> Engine {
    let mut engine = Engine::default();
    while let Some(operation) = rx.recv().await {
        if let Err(err) = engine.apply(operation) {
            warn!(%err, "skipping operation");
        }
    }
    engine
}
