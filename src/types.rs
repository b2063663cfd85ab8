//! Core types and data structures for MT940 statements

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Raw text of one MT940 file
///
/// Only the short header prefix is used to pick a dialect; the rest of the
/// text is handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Document<'a> {
    text: &'a str,
}

impl<'a> Document<'a> {
    /// Number of leading characters inspected for dialect sniffing
    pub const HEADER_LEN: usize = 6;

    /// Wrap document text
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Full document text
    pub fn text(&self) -> &'a str {
        self.text
    }

    /// The fixed-length header prefix (shorter if the document is shorter)
    pub fn header(&self) -> &'a str {
        let end = self
            .text
            .char_indices()
            .nth(Self::HEADER_LEN)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len());
        &self.text[..end]
    }

    /// Whether the document carries no content at all
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// The text of one transaction: the `:61:` content and its `:86:` lines
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeBlock {
    /// Structured amount/date line (content of the `:61:` field)
    pub structured_line: String,
    /// Free-text narrative lines (content of the `:86:` field), possibly empty
    pub free_text: Vec<String>,
}

impl NarrativeBlock {
    /// Create a new narrative block
    pub fn new(structured_line: impl Into<String>, free_text: Vec<String>) -> Self {
        Self {
            structured_line: structured_line.into(),
            free_text,
        }
    }

    /// First narrative line, if any
    pub fn first_line(&self) -> Option<&str> {
        self.free_text.first().map(String::as_str)
    }

    /// Narrative line at `index`, if any
    pub fn line(&self, index: usize) -> Option<&str> {
        self.free_text.get(index).map(String::as_str)
    }

    /// All narrative lines joined with newlines
    pub fn description(&self) -> String {
        self.free_text.join("\n")
    }
}

/// Counter-party recovered from a narrative
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContraParty {
    /// Normalized account number or `BIC/IBAN` composite
    pub account: Option<String>,
    /// Account holder display name
    pub holder: Option<String>,
}

impl ContraParty {
    /// True when neither account nor holder could be recovered
    pub fn is_unknown(&self) -> bool {
        self.account.is_none() && self.holder.is_none()
    }
}

/// Opening or closing balance of a statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    /// ISO 4217 currency code
    pub currency: String,
    /// Signed amount, debit balances are negative
    pub amount: BigDecimal,
    /// Balance date
    pub date: NaiveDate,
}

/// One statement line with its counter-party details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Signed amount, debits are negative
    pub amount: BigDecimal,
    /// Value date
    pub value_date: NaiveDate,
    /// Entry (booking) date, when the bank supplied one
    pub book_date: Option<NaiveDate>,
    /// Raw narrative text
    pub description: String,
    /// Counter-party account
    pub contra_account: Option<String>,
    /// Counter-party account holder, attached by the dialect after construction
    pub contra_account_holder: Option<String>,
}

impl Transaction {
    /// Counter-party details of this transaction
    pub fn contra_party(&self) -> ContraParty {
        ContraParty {
            account: self.contra_account.clone(),
            holder: self.contra_account_holder.clone(),
        }
    }

    /// Whether money came into the account
    pub fn is_credit(&self) -> bool {
        self.amount > BigDecimal::from(0)
    }
}

/// A parsed account statement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Transaction reference number (`:20:`)
    pub reference: Option<String>,
    /// Account identification (`:25:`)
    pub account: String,
    /// Statement/sequence number (`:28C:` or `:28:`)
    pub number: Option<String>,
    /// Opening balance
    pub opening_balance: Option<Balance>,
    /// Closing balance
    pub closing_balance: Option<Balance>,
    /// Transactions in source order
    pub transactions: Vec<Transaction>,
}

impl Statement {
    /// A statement is complete when both balances were found
    pub fn is_complete(&self) -> bool {
        self.opening_balance.is_some() && self.closing_balance.is_some()
    }

    /// Sum of all transaction amounts
    pub fn total_amount(&self) -> BigDecimal {
        self.transactions.iter().map(|t| &t.amount).sum()
    }
}

/// Parser behaviour switches
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Reject statements without an opening or closing balance
    pub require_balances: bool,
    /// Reject statements whose transactions don't add up to the closing balance
    pub verify_balances: bool,
}

/// Errors that can occur while parsing MT940 documents
#[derive(Debug, thiserror::Error)]
pub enum Mt940Error {
    #[error("Empty document")]
    EmptyDocument,
    #[error("Missing tag: {0}")]
    MissingTag(String),
    #[error("Invalid transaction line: {0}")]
    InvalidTransaction(String),
    #[error("Invalid balance line: {0}")]
    InvalidBalance(String),
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("Incomplete statement: {0}")]
    IncompleteStatement(String),
    #[error("Unbalanced statement: {0}")]
    UnbalancedStatement(String),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type for MT940 operations
pub type Mt940Result<T> = Result<T, Mt940Error>;
