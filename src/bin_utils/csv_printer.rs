use std::{io::Write, sync::Arc};

use anyhow::Context;
use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::Account;

#[derive(Debug, Serialize)]
struct AccountRow<'a> {
    account: &'a str,
    owner: &'a str,
    balance: Decimal,
    min_balance: Decimal,
}

impl<'a> From<&'a Account> for AccountRow<'a> {
    fn from(acc: &'a Account) -> Self {
        Self {
            account: acc.id(),
            owner: acc.owner(),
            balance: acc.balance(),
            min_balance: acc.min_balance(),
        }
    }
}

/// Writes one CSV row per account, in the order given.
pub fn write_report<W>(output: &mut W, accounts: &[Arc<Account>]) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        writer
            .serialize(AccountRow::from(acc.as_ref()))
            .with_context(|| format!("Failed to write account `{}`", acc.id()))?;
    }
    writer.flush().context("Failed to flush account report")
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn prints_header_and_rows() {
        let accounts = [
            Arc::new(Account::new("a", "Ann", dec!(12.50), dec!(0)).unwrap()),
            Arc::new(Account::new("b", "Bob", dec!(3), dec!(1)).unwrap()),
        ];
        let mut output = Vec::new();
        write_report(&mut output, &accounts).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "account,owner,balance,min_balance\na,Ann,12.50,0\nb,Bob,3,1\n"
        );
    }

    #[test]
    fn empty_ledger_prints_nothing() {
        let mut output = Vec::new();
        write_report(&mut output, &[]).unwrap();
        assert!(output.is_empty());
    }
}
