//! Reconciliation of statement balances against their transactions

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};

use crate::types::*;

/// Outcome of reconciling one statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Opening balance plus the sum of all transactions
    pub expected_closing: BigDecimal,
    /// Closing balance reported by the bank
    pub actual_closing: BigDecimal,
    /// `actual_closing - expected_closing`
    pub difference: BigDecimal,
    /// Whether the statement adds up
    pub is_balanced: bool,
}

/// Checks that opening balance + transactions == closing balance
pub struct ReconciliationEngine;

impl Default for ReconciliationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ReconciliationEngine {
    pub fn new() -> Self {
        Self
    }

    /// Reconcile a statement
    ///
    /// Returns `None` when the statement lacks either balance.
    pub fn reconcile(&self, statement: &Statement) -> Option<ReconciliationReport> {
        let opening = statement.opening_balance.as_ref()?;
        let closing = statement.closing_balance.as_ref()?;

        let expected_closing = &opening.amount + statement.total_amount();
        let difference = &closing.amount - &expected_closing;
        let is_balanced = difference == BigDecimal::from(0);

        Some(ReconciliationReport {
            expected_closing,
            actual_closing: closing.amount.clone(),
            difference,
            is_balanced,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_reconcile_balanced_statement() {
        let date = NaiveDate::from_ymd_opt(2011, 5, 24).unwrap();
        let statement = Statement {
            reference: None,
            account: "517852257".to_string(),
            number: None,
            opening_balance: Some(Balance {
                currency: "EUR".to_string(),
                amount: dec("3236.28"),
                date,
            }),
            closing_balance: Some(Balance {
                currency: "EUR".to_string(),
                amount: dec("3227.28"),
                date,
            }),
            transactions: vec![Transaction {
                amount: dec("-9.00"),
                value_date: date,
                book_date: Some(date),
                description: String::new(),
                contra_account: None,
                contra_account_holder: None,
            }],
        };

        let report = ReconciliationEngine::new().reconcile(&statement).unwrap();
        assert!(report.is_balanced);
        assert_eq!(report.expected_closing, dec("3227.28"));
        assert_eq!(report.difference, BigDecimal::from(0));
    }

    #[test]
    fn test_reconcile_requires_both_balances() {
        let statement = Statement {
            reference: None,
            account: "517852257".to_string(),
            number: None,
            opening_balance: None,
            closing_balance: None,
            transactions: Vec::new(),
        };
        assert!(ReconciliationEngine::new().reconcile(&statement).is_none());
    }
}
