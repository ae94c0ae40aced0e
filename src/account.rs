use std::ptr;

use parking_lot::{Mutex, MutexGuard};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    error::{AccountError, BalanceOverflowError, InsufficientFundsError, LedgerError},
    limits::validate_amount,
};

pub type AccountId = String;

/// A single account. The balance sits behind its own mutex, so an `Account`
/// can be shared between threads by reference or through an `Arc`.
#[derive(Debug)]
pub struct Account {
    id: AccountId,
    owner: String,
    min_balance: Decimal,
    balance: Mutex<Decimal>,
}

impl Account {
    /// Builds a validated account. Ids and owners made only of whitespace
    /// count as empty.
    pub fn new(
        id: impl Into<AccountId>,
        owner: impl Into<String>,
        initial_balance: Decimal,
        min_balance: Decimal,
    ) -> Result<Self, AccountError> {
        let id = id.into();
        let owner = owner.into();
        if id.trim().is_empty() {
            return Err(AccountError::EmptyId);
        }
        if owner.trim().is_empty() {
            return Err(AccountError::EmptyOwner);
        }
        if min_balance < Decimal::ZERO {
            return Err(AccountError::NegativeMinBalance { min_balance });
        }
        // min_balance is known to be non-negative here, so this also rejects
        // a negative initial balance
        if initial_balance < min_balance {
            return Err(AccountError::InitialBelowMinimum {
                initial_balance,
                min_balance,
            });
        }
        Ok(Self {
            id,
            owner,
            min_balance,
            balance: Mutex::new(initial_balance),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn min_balance(&self) -> Decimal {
        self.min_balance
    }

    pub fn balance(&self) -> Decimal {
        *self.balance.lock()
    }

    /// Reads both balances at a single point in time, so a concurrent
    /// transfer between the two is observed either fully or not at all.
    pub fn balances(first: &Account, second: &Account) -> (Decimal, Decimal) {
        if ptr::eq(first, second) {
            let balance = first.balance();
            return (balance, balance);
        }
        let (first_balance, second_balance) = lock_pair(first, second);
        (*first_balance, *second_balance)
    }

    pub fn deposit(&self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = self.checked_amount(amount)?;
        let mut balance = self.balance.lock();
        *balance = self.credited(*balance, amount)?;
        debug!(account = %self.id, %amount, balance = %*balance, "deposit applied");
        Ok(())
    }

    pub fn withdraw(&self, amount: Decimal) -> Result<(), LedgerError> {
        let amount = self.checked_amount(amount)?;
        let mut balance = self.balance.lock();
        self.ensure_covers(*balance, amount)?;
        *balance -= amount;
        debug!(account = %self.id, %amount, balance = %*balance, "withdrawal applied");
        Ok(())
    }

    /// Moves `amount` from `self` to `target`.
    ///
    /// Transferring to the very same account is a successful no-op once the
    /// amount has been validated.
    pub fn transfer(&self, amount: Decimal, target: &Account) -> Result<(), LedgerError> {
        let amount = self.checked_amount(amount)?;
        if ptr::eq(self, target) {
            debug!(account = %self.id, %amount, "transfer to self ignored");
            return Ok(());
        }

        let (mut source_balance, mut target_balance) = lock_pair(self, target);
        self.ensure_covers(*source_balance, amount)?;
        // both results are computed before either balance is written
        let debited = *source_balance - amount;
        let credited = target.credited(*target_balance, amount)?;
        *source_balance = debited;
        *target_balance = credited;
        debug!(
            account = %self.id,
            target = %target.id,
            %amount,
            balance = %*source_balance,
            "transfer applied"
        );
        Ok(())
    }

    fn checked_amount(&self, amount: Decimal) -> Result<Decimal, LedgerError> {
        validate_amount(amount).inspect_err(|err| {
            debug!(account = %self.id, %amount, "amount rejected: {err}");
        })
    }

    fn ensure_covers(
        &self,
        balance: Decimal,
        amount: Decimal,
    ) -> Result<(), InsufficientFundsError> {
        if balance - amount < self.min_balance {
            debug!(account = %self.id, %amount, %balance, "insufficient funds");
            return Err(InsufficientFundsError {
                balance,
                amount,
                min_balance: self.min_balance,
            });
        }
        Ok(())
    }

    fn credited(
        &self,
        balance: Decimal,
        amount: Decimal,
    ) -> Result<Decimal, BalanceOverflowError> {
        balance.checked_add(amount).ok_or_else(|| {
            debug!(account = %self.id, %amount, %balance, "balance overflow");
            BalanceOverflowError { balance, amount }
        })
    }

    fn lock_order_key(&self) -> (&str, usize) {
        (&self.id, ptr::from_ref(self) as usize)
    }
}

/// Locks two distinct accounts in global `(id, address)` order and hands the
/// guards back in argument order.
fn lock_pair<'a>(
    first: &'a Account,
    second: &'a Account,
) -> (MutexGuard<'a, Decimal>, MutexGuard<'a, Decimal>) {
    debug_assert!(!ptr::eq(first, second));
    if first.lock_order_key() < second.lock_order_key() {
        let first_guard = first.balance.lock();
        let second_guard = second.balance.lock();
        (first_guard, second_guard)
    } else {
        let second_guard = second.balance.lock();
        let first_guard = first.balance.lock();
        (first_guard, second_guard)
    }
}
