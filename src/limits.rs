use rust_decimal::Decimal;

use crate::error::{ExceedsLimitError, LedgerError, NegativeAmountError};

/// Largest amount a single deposit, withdrawal or transfer may move.
pub const OPERATION_LIMIT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Floor used by the batch runner when an `open` row leaves it empty.
pub const DEFAULT_MIN_BALANCE: Decimal = Decimal::ZERO;

/// Checks an operation amount against sign and ceiling, in that order.
pub fn validate_amount(amount: Decimal) -> Result<Decimal, LedgerError> {
    if amount < Decimal::ZERO {
        return Err(NegativeAmountError { amount }.into());
    }
    if amount > OPERATION_LIMIT {
        return Err(ExceedsLimitError {
            amount,
            limit: OPERATION_LIMIT,
        }
        .into());
    }
    Ok(amount)
}
