use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;

use crate::{account::AccountId, limits::DEFAULT_MIN_BALANCE};

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Open,
    Deposit,
    Withdrawal,
    Transfer,
}

/// Optional columns of a command; which ones are required depends on the kind.
#[derive(Debug, Clone, Default)]
pub struct CommandArgs {
    pub owner: Option<String>,
    pub target: Option<AccountId>,
    pub amount: Option<Decimal>,
    pub min_balance: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Open {
        account: AccountId,
        owner: String,
        initial_balance: Decimal,
        min_balance: Decimal,
    },
    Deposit {
        account: AccountId,
        amount: Decimal,
    },
    Withdraw {
        account: AccountId,
        amount: Decimal,
    },
    Transfer {
        account: AccountId,
        target: AccountId,
        amount: Decimal,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LedgerCommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: TransactionKind },
    #[error("Owner is required to open account `{account}`")]
    OwnerRequired { account: AccountId },
    #[error("Target account is required for transfer from `{account}`")]
    TargetRequired { account: AccountId },
    #[error("Account `{account}` does not exist")]
    UnknownAccount { account: AccountId },
}

impl LedgerCommand {
    pub fn parse_command(
        kind: TransactionKind,
        account: AccountId,
        args: CommandArgs,
    ) -> Result<Self, LedgerCommandError> {
        let amount = args
            .amount
            .ok_or(LedgerCommandError::AmountRequired { kind })?;
        match kind {
            TransactionKind::Open => {
                let Some(owner) = args.owner else {
                    return Err(LedgerCommandError::OwnerRequired { account });
                };
                Ok(Self::Open {
                    account,
                    owner,
                    initial_balance: amount,
                    min_balance: args.min_balance.unwrap_or(DEFAULT_MIN_BALANCE),
                })
            }
            TransactionKind::Deposit => Ok(Self::Deposit { account, amount }),
            TransactionKind::Withdrawal => Ok(Self::Withdraw { account, amount }),
            TransactionKind::Transfer => {
                let Some(target) = args.target else {
                    return Err(LedgerCommandError::TargetRequired { account });
                };
                Ok(Self::Transfer {
                    account,
                    target,
                    amount,
                })
            }
        }
    }
}
