use std::{
    collections::{HashMap, hash_map::Entry},
    sync::Arc,
};

use parking_lot::RwLock;
use rust_decimal::Decimal;

use crate::{
    account::{Account, AccountId},
    command::{CommandArgs, LedgerCommand, LedgerCommandError, TransactionKind},
    error::{AccountError, LedgerError},
};

use super::{TransactionProcessError, TransactionProcessor};

/// Registry of accounts by id. The map lock is only held for lookups and
/// inserts, never while an account balance is locked.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    accounts: RwLock<HashMap<AccountId, Arc<Account>>>,
}

impl InMemoryLedger {
    pub fn open_account(
        &self,
        id: impl Into<AccountId>,
        owner: impl Into<String>,
        initial_balance: Decimal,
        min_balance: Decimal,
    ) -> Result<Arc<Account>, LedgerError> {
        let id = id.into();
        let mut accounts = self.accounts.write();
        match accounts.entry(id) {
            Entry::Occupied(entry) => Err(AccountError::DuplicateAccount {
                id: entry.key().clone(),
            }
            .into()),
            Entry::Vacant(entry) => {
                let account = Arc::new(Account::new(
                    entry.key().clone(),
                    owner,
                    initial_balance,
                    min_balance,
                )?);
                entry.insert(Arc::clone(&account));
                Ok(account)
            }
        }
    }

    pub fn account(&self, id: &str) -> Option<Arc<Account>> {
        self.accounts.read().get(id).cloned()
    }

    /// All accounts, sorted by id.
    pub fn accounts(&self) -> Vec<Arc<Account>> {
        let mut accounts: Vec<_> = self.accounts.read().values().cloned().collect();
        accounts.sort_by(|a, b| a.id().cmp(b.id()));
        accounts
    }

    pub fn execute(&self, command: LedgerCommand) -> Result<(), TransactionProcessError> {
        match command {
            LedgerCommand::Open {
                account,
                owner,
                initial_balance,
                min_balance,
            } => {
                self.open_account(account, owner, initial_balance, min_balance)?;
            }
            LedgerCommand::Deposit { account, amount } => {
                self.existing(account)?.deposit(amount)?;
            }
            LedgerCommand::Withdraw { account, amount } => {
                self.existing(account)?.withdraw(amount)?;
            }
            LedgerCommand::Transfer {
                account,
                target,
                amount,
            } => {
                let source = self.existing(account)?;
                let target = self.existing(target)?;
                source.transfer(amount, &target)?;
            }
        }
        Ok(())
    }

    fn existing(&self, account: AccountId) -> Result<Arc<Account>, LedgerCommandError> {
        self.account(&account)
            .ok_or(LedgerCommandError::UnknownAccount { account })
    }
}

impl TransactionProcessor for InMemoryLedger {
    fn process_transaction(
        &self,
        kind: TransactionKind,
        account: AccountId,
        args: CommandArgs,
    ) -> Result<(), TransactionProcessError> {
        let cmd = LedgerCommand::parse_command(kind, account, args)?;
        self.execute(cmd)
    }
}
