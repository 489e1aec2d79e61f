use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use memory_state::{run, run_async};

/// Replays state operations from a CSV file into an in-memory store and
/// prints the resulting accounts and storage as CSV.
#[derive(Parser, Debug)]
#[command(name = "memory-state", version)]
struct Args {
    /// CSV file of operations (op,address,balance,sequence,key,value)
    input: PathBuf,

    /// Read the input on a separate task with the async runner
    #[arg(long = "async")]
    use_async: bool,
}

fn main() {
    // Logs go to stderr so stdout carries only the dump
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let result = if args.use_async {
        tokio::runtime::Runtime::new()
            .map_err(Into::into)
            .and_then(|rt| rt.block_on(run_async(&args.input, std::io::stdout())))
    } else {
        run(&args.input, std::io::stdout())
    };

    if let Err(err) = result {
        eprintln!("Error: {}", err);
        process::exit(1);
    }
}
