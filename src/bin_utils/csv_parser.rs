use std::io::Read;

use crate::{
    account::AccountId,
    command::{CommandArgs, TransactionKind},
};
use csv::{Position, Reader, StringRecord, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub account: AccountId,
    pub owner: Option<String>,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
    pub min_balance: Option<Decimal>,
}

impl Transaction {
    pub fn into_parts(self) -> (TransactionKind, AccountId, CommandArgs) {
        (
            self.kind,
            self.account,
            CommandArgs {
                owner: self.owner,
                target: self.target,
                amount: self.amount,
                min_balance: self.min_balance,
            },
        )
    }
}

/// Parses ledger commands in CSV format, yielding each record with the line
/// it starts on.
pub struct CsvTransactionParser<R> {
    reader: Reader<R>,
    record: StringRecord,
}

impl<R> CsvTransactionParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            reader,
            record: StringRecord::new(),
        }
    }
}

impl<R> Iterator for CsvTransactionParser<R>
where
    R: Read,
{
    type Item = (u64, csv::Result<Transaction>);

    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Err(err) => Some((self.reader.position().line(), Err(err))),
            Ok(true) => {
                let line = self.record.position().map_or(0, Position::line);
                let row: csv::Result<Transaction> = self
                    .reader
                    .headers()
                    .and_then(|headers| self.record.deserialize(Some(headers)));
                Some((line, row))
            }
        }
    }
}
