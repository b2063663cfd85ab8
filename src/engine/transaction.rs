//! Generic transaction construction from a `:61:` / `:86:` pair

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::engine::balance::{parse_amount, parse_date};
use crate::traits::DialectStrategy;
use crate::types::*;

static TRANSACTION_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"^(?P<value>\d{6})",
        r"(?P<entry>\d{4})?",
        r"(?P<mark>RC|RD|C|D)",
        r"[A-Z]?",
        r"(?P<amount>[0-9,]{1,15})"
    ))
    .unwrap()
});

/// Build a transaction from its narrative block
///
/// Amount, dates and description come from the generic format; the contra
/// account is asked from the dialect. The holder is left for the dialect's
/// `enrich` step.
pub fn build_transaction<D>(block: &NarrativeBlock, dialect: &D) -> Mt940Result<Transaction>
where
    D: DialectStrategy + ?Sized,
{
    let line = block.structured_line.trim_start();
    let caps = TRANSACTION_RE
        .captures(line)
        .ok_or_else(|| Mt940Error::InvalidTransaction(block.structured_line.clone()))?;

    let value_date = parse_date(&caps["value"])?;
    let book_date = caps
        .name("entry")
        .map(|entry| entry_date(entry.as_str(), value_date))
        .transpose()?;

    let mut amount = parse_amount(&caps["amount"])?;
    if matches!(&caps["mark"], "D" | "RC") {
        amount = -amount;
    }

    Ok(Transaction {
        amount,
        value_date,
        book_date,
        description: block.description(),
        contra_account: dialect.contra_account(block),
        contra_account_holder: None,
    })
}

/// Resolve an `MMDD` entry date against the value date's year
///
/// Entries booked across a year boundary get the neighbouring year.
pub fn entry_date(raw: &str, value_date: NaiveDate) -> Mt940Result<NaiveDate> {
    let invalid = || Mt940Error::InvalidDate(raw.to_string());
    if raw.len() != 4 {
        return Err(invalid());
    }
    let month: u32 = raw[0..2].parse().map_err(|_| invalid())?;
    let day: u32 = raw[2..4].parse().map_err(|_| invalid())?;

    let year = match (value_date.month(), month) {
        (12, 1) => value_date.year() + 1,
        (1, 12) => value_date.year() - 1,
        _ => value_date.year(),
    };

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::Generic;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn block(line: &str) -> NarrativeBlock {
        NarrativeBlock::new(line, vec!["KOSTEN".to_string()])
    }

    #[test]
    fn test_build_debit_transaction() {
        let txn = build_transaction(&block("1105240524D9,00N426NONREF"), &Generic::new()).unwrap();
        assert_eq!(txn.amount, BigDecimal::from_str("-9.00").unwrap());
        assert_eq!(txn.value_date, NaiveDate::from_ymd_opt(2011, 5, 24).unwrap());
        assert_eq!(txn.book_date, NaiveDate::from_ymd_opt(2011, 5, 24));
        assert_eq!(txn.description, "KOSTEN");
        assert_eq!(txn.contra_account, None);
        assert_eq!(txn.contra_account_holder, None);
    }

    #[test]
    fn test_build_reversal_and_funds_code() {
        let generic = Generic::new();

        let reversed_debit =
            build_transaction(&block("110524RD5,50NTRFNONREF"), &generic).unwrap();
        assert_eq!(reversed_debit.amount, BigDecimal::from_str("5.50").unwrap());
        assert_eq!(reversed_debit.book_date, None);

        let reversed_credit = build_transaction(&block("110524RC5,50NTRF"), &generic).unwrap();
        assert_eq!(reversed_credit.amount, BigDecimal::from_str("-5.50").unwrap());

        let with_funds_code =
            build_transaction(&block("1105240524CR100,NTRF"), &generic).unwrap();
        assert_eq!(with_funds_code.amount, BigDecimal::from(100));
    }

    #[test]
    fn test_build_rejects_malformed_line() {
        assert!(matches!(
            build_transaction(&block("NOT A TRANSACTION"), &Generic::new()),
            Err(Mt940Error::InvalidTransaction(_))
        ));
    }

    #[test]
    fn test_entry_date_year_boundary() {
        let value = NaiveDate::from_ymd_opt(2011, 12, 31).unwrap();
        assert_eq!(
            entry_date("0102", value).unwrap(),
            NaiveDate::from_ymd_opt(2012, 1, 2).unwrap()
        );

        let value = NaiveDate::from_ymd_opt(2012, 1, 2).unwrap();
        assert_eq!(
            entry_date("1231", value).unwrap(),
            NaiveDate::from_ymd_opt(2011, 12, 31).unwrap()
        );

        assert!(entry_date("1332", value).is_err());
    }
}
