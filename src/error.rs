use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount must not be negative, got {amount}")]
pub struct NegativeAmountError {
    pub amount: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Amount {amount} exceeds the operation limit of {limit}")]
pub struct ExceedsLimitError {
    pub amount: Decimal,
    pub limit: Decimal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "Insufficient funds: balance {balance} minus {amount} would fall below minimum balance {min_balance}"
)]
pub struct InsufficientFundsError {
    pub balance: Decimal,
    pub amount: Decimal,
    pub min_balance: Decimal,
}

impl InsufficientFundsError {
    /// How far below the floor the balance would have ended up.
    pub fn deficit(&self) -> Decimal {
        self.min_balance - (self.balance - self.amount)
    }
}

/// Crediting `amount` would push the balance past what a `Decimal` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Balance {balance} cannot be credited with {amount} without overflowing")]
pub struct BalanceOverflowError {
    pub balance: Decimal,
    pub amount: Decimal,
}

/// Constraint that rejected an account construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountField {
    Id,
    Owner,
    MinBalance,
    InitialBalance,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    #[error("Account id must not be empty")]
    EmptyId,
    #[error("Account owner must not be empty")]
    EmptyOwner,
    #[error("Minimum balance must not be negative, got {min_balance}")]
    NegativeMinBalance { min_balance: Decimal },
    #[error("Initial balance {initial_balance} is below minimum balance {min_balance}")]
    InitialBelowMinimum {
        initial_balance: Decimal,
        min_balance: Decimal,
    },
    #[error("Account `{id}` already exists")]
    DuplicateAccount { id: AccountId },
}

impl AccountError {
    pub fn field(&self) -> AccountField {
        match self {
            Self::EmptyId | Self::DuplicateAccount { .. } => AccountField::Id,
            Self::EmptyOwner => AccountField::Owner,
            Self::NegativeMinBalance { .. } => AccountField::MinBalance,
            Self::InitialBelowMinimum { .. } => AccountField::InitialBalance,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Input was malformed, retrying with the same arguments cannot succeed.
    Validation,
    /// Input was fine but account state did not allow the operation.
    BusinessRule,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error(transparent)]
    NegativeAmount(#[from] NegativeAmountError),
    #[error(transparent)]
    ExceedsLimit(#[from] ExceedsLimitError),
    #[error(transparent)]
    InsufficientFunds(#[from] InsufficientFundsError),
    #[error(transparent)]
    BalanceOverflow(#[from] BalanceOverflowError),
    #[error(transparent)]
    Account(#[from] AccountError),
}

impl LedgerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InsufficientFunds(_) | Self::BalanceOverflow(_) => ErrorCategory::BusinessRule,
            Self::NegativeAmount(_) | Self::ExceedsLimit(_) | Self::Account(_) => {
                ErrorCategory::Validation
            }
        }
    }
}
