//! The dialect capability interface shared by every bank variant

use crate::engine::balance::find_balance;
use crate::types::*;

/// Fixed configuration of a dialect
///
/// Built once when the dialect is constructed and never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectConfig {
    /// Short name used in logs
    pub name: &'static str,
    /// Header prefix that identifies documents of this dialect
    pub header_prefix: &'static str,
    /// Line content that closes a statement
    pub statement_delimiter: char,
    /// Opening balance tags, in priority order
    pub opening_balance_tags: &'static [&'static str],
    /// Closing balance tags, in priority order
    pub closing_balance_tags: &'static [&'static str],
}

/// Bank specific behaviour plugged into the generic MT940 engine
///
/// Every extraction returns `None` when the narrative doesn't carry the
/// requested detail; an absent counter-party is never an error.
pub trait DialectStrategy: Send + Sync {
    /// Fixed configuration of this dialect
    fn config(&self) -> &DialectConfig;

    /// Dialect name
    fn name(&self) -> &'static str {
        self.config().name
    }

    /// Test if a document with this header prefix belongs to the dialect
    fn accept(&self, header: &str) -> bool {
        let prefix = self.config().header_prefix;
        !prefix.is_empty() && header.starts_with(prefix)
    }

    /// Counter-party account from a transaction narrative
    fn contra_account(&self, block: &NarrativeBlock) -> Option<String>;

    /// Counter-party account holder from a transaction narrative
    fn contra_account_holder(&self, block: &NarrativeBlock) -> Option<String>;

    /// Both counter-party details at once
    fn contra_party(&self, block: &NarrativeBlock) -> ContraParty {
        ContraParty {
            account: self.contra_account(block),
            holder: self.contra_account_holder(block),
        }
    }

    /// Opening balance of a statement segment
    fn opening_balance(&self, statement: &str) -> Option<Balance> {
        find_balance(statement, self.config().opening_balance_tags)
    }

    /// Closing balance of a statement segment
    fn closing_balance(&self, statement: &str) -> Option<Balance> {
        find_balance(statement, self.config().closing_balance_tags)
    }

    /// Post-process a transaction the engine has already built
    fn enrich(&self, transaction: Transaction, _block: &NarrativeBlock) -> Transaction {
        transaction
    }
}
