//! Validation utilities

use crate::reconciliation::ReconciliationEngine;
use crate::types::*;

/// Validate that a currency code looks like ISO 4217
pub fn validate_currency(currency: &str) -> Mt940Result<()> {
    if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(Mt940Error::Validation(format!(
            "Currency code '{}' must be three uppercase letters",
            currency
        )));
    }
    Ok(())
}

/// Validate that an account identification is usable
pub fn validate_account(account: &str) -> Mt940Result<()> {
    if account.trim().is_empty() {
        return Err(Mt940Error::Validation(
            "Account identification cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Check an assembled statement against the parser configuration
pub fn validate_statement(statement: &Statement, config: &ParserConfig) -> Mt940Result<()> {
    validate_account(&statement.account)?;

    if !statement.is_complete() {
        if config.require_balances {
            return Err(Mt940Error::IncompleteStatement(format!(
                "statement for account '{}' lacks an opening or closing balance",
                statement.account
            )));
        }
        log::warn!(
            "statement for account '{}' is incomplete: opening={}, closing={}",
            statement.account,
            statement.opening_balance.is_some(),
            statement.closing_balance.is_some()
        );
    }

    if let (Some(opening), Some(closing)) = (&statement.opening_balance, &statement.closing_balance)
    {
        validate_currency(&opening.currency)?;
        if opening.currency != closing.currency {
            return Err(Mt940Error::Validation(format!(
                "Opening balance currency {} differs from closing balance currency {}",
                opening.currency, closing.currency
            )));
        }
    }

    if config.verify_balances {
        if let Some(report) = ReconciliationEngine::new().reconcile(statement) {
            if !report.is_balanced {
                return Err(Mt940Error::UnbalancedStatement(format!(
                    "account '{}': expected closing {}, found {}",
                    statement.account, report.expected_closing, report.actual_closing
                )));
            }
        }
    }

    Ok(())
}
