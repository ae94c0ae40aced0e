use thiserror::Error;

use crate::{
    account::AccountId,
    command::{CommandArgs, LedgerCommandError, TransactionKind},
    error::LedgerError,
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum TransactionProcessError {
    #[error(transparent)]
    CommandErr(#[from] LedgerCommandError),
    #[error(transparent)]
    LedgerErr(#[from] LedgerError),
}

pub trait TransactionProcessor {
    fn process_transaction(
        &self,
        kind: TransactionKind,
        account: AccountId,
        args: CommandArgs,
    ) -> Result<(), TransactionProcessError>;
}
