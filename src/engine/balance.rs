//! Balance, amount and date parsing

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

use crate::types::*;

static BALANCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([CD])(\d{6})([A-Z]{3})([0-9,]{1,15})").unwrap());

/// Parse an MT940 amount with a decimal comma (`"1234,56"`, `"9,"`)
pub fn parse_amount(raw: &str) -> Mt940Result<BigDecimal> {
    let mut normalized = raw.trim().replace(',', ".");
    if normalized.ends_with('.') {
        normalized.push('0');
    }
    if normalized.starts_with('.') {
        normalized.insert(0, '0');
    }
    BigDecimal::from_str(&normalized).map_err(|_| Mt940Error::InvalidAmount(raw.to_string()))
}

/// Parse a `YYMMDD` date
pub fn parse_date(raw: &str) -> Mt940Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%y%m%d").map_err(|_| Mt940Error::InvalidDate(raw.to_string()))
}

/// Parse the content of a balance field (`C110522EUR3236,28`)
pub fn parse_balance(content: &str) -> Mt940Result<Balance> {
    let caps = BALANCE_RE
        .captures(content.trim())
        .ok_or_else(|| Mt940Error::InvalidBalance(content.to_string()))?;

    let mut amount = parse_amount(&caps[4])?;
    if &caps[1] == "D" {
        amount = -amount;
    }

    Ok(Balance {
        currency: caps[3].to_string(),
        amount,
        date: parse_date(&caps[2])?,
    })
}

/// Find the first balance carried by one of `tags`, in tag priority order
pub fn find_balance(statement: &str, tags: &[&str]) -> Option<Balance> {
    for tag in tags {
        let prefix = format!(":{}:", tag);
        let Some(content) = statement
            .lines()
            .find_map(|line| line.strip_prefix(prefix.as_str()))
        else {
            continue;
        };

        match parse_balance(content) {
            Ok(balance) => return Some(balance),
            Err(err) => {
                log::warn!("ignoring :{}: balance line: {}", tag, err);
            }
        }
    }
    None
}
