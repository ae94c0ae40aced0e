use std::fs::File;

use anyhow::{Context, Result};
use lockstep_ledger::{
    bin_utils::BatchRunner, error::ErrorCategory, processor::TransactionProcessError,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let filename = std::env::args()
        .nth(1)
        .context("Expected a file name as the first argument")?;
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let mut stdout = std::io::stdout();
    let runner = BatchRunner::new(&mut stdout, |line, err| match err {
        TransactionProcessError::LedgerErr(err)
            if err.category() == ErrorCategory::BusinessRule =>
        {
            // rejected by account state, the input itself was fine
            tracing::info!(line, "{err}");
        }
        err => eprintln!("Error at line {line}: {err}"),
    });
    runner.run(file)?;
    Ok(())
}
