//! CSV front end for the ledger: reads commands, reports failures per line
//! and prints the final balances.

use std::io::{Read, Write};

use crate::processor::{
    TransactionProcessError, TransactionProcessor, in_memory_processor::InMemoryLedger,
};
use anyhow::{Context, Result};
use csv_parser::CsvTransactionParser;
use csv_printer::write_report;
pub mod csv_parser;
pub mod csv_printer;

/// Replays a CSV command stream against a fresh ledger.
///
/// Rows rejected by the ledger go to `on_error` with their line number and
/// do not stop the run; a record that cannot be parsed does.
pub struct BatchRunner<'w, W> {
    output: &'w mut W,
    on_error: Box<dyn FnMut(u64, TransactionProcessError) + 'w>,
}

impl<'w, W> BatchRunner<'w, W>
where
    W: Write,
{
    pub fn new(
        output: &'w mut W,
        on_error: impl FnMut(u64, TransactionProcessError) + 'w,
    ) -> Self {
        Self {
            output,
            on_error: Box::new(on_error),
        }
    }

    /// Processes every row of `input`, writes the balance report and hands
    /// back the ledger it built.
    pub fn run<R: Read>(mut self, input: R) -> Result<InMemoryLedger> {
        let ledger = InMemoryLedger::default();

        for (line, row) in CsvTransactionParser::new(input) {
            let row = row.with_context(|| format!("Malformed record at line {line}"))?;
            let (kind, account, args) = row.into_parts();
            if let Err(err) = ledger.process_transaction(kind, account, args) {
                (self.on_error)(line, err);
            }
        }

        write_report(self.output, &ledger.accounts())?;
        Ok(ledger)
    }
}
