//! Bank dialects and the registry that picks one per document

pub mod abnamro;
pub mod generic;
pub mod registry;

pub use abnamro::*;
pub use generic::*;
pub use registry::*;

use crate::traits::*;
use crate::types::*;

/// The closed set of supported bank dialects
#[derive(Debug, Clone)]
pub enum Dialect {
    AbnAmro(AbnAmro),
    Generic(Generic),
}

impl From<AbnAmro> for Dialect {
    fn from(dialect: AbnAmro) -> Self {
        Dialect::AbnAmro(dialect)
    }
}

impl From<Generic> for Dialect {
    fn from(dialect: Generic) -> Self {
        Dialect::Generic(dialect)
    }
}

impl Dialect {
    fn strategy(&self) -> &dyn DialectStrategy {
        match self {
            Dialect::AbnAmro(dialect) => dialect,
            Dialect::Generic(dialect) => dialect,
        }
    }
}

impl DialectStrategy for Dialect {
    fn config(&self) -> &DialectConfig {
        self.strategy().config()
    }

    fn accept(&self, header: &str) -> bool {
        self.strategy().accept(header)
    }

    fn contra_account(&self, block: &NarrativeBlock) -> Option<String> {
        self.strategy().contra_account(block)
    }

    fn contra_account_holder(&self, block: &NarrativeBlock) -> Option<String> {
        self.strategy().contra_account_holder(block)
    }

    fn opening_balance(&self, statement: &str) -> Option<Balance> {
        self.strategy().opening_balance(statement)
    }

    fn closing_balance(&self, statement: &str) -> Option<Balance> {
        self.strategy().closing_balance(statement)
    }

    fn enrich(&self, transaction: Transaction, block: &NarrativeBlock) -> Transaction {
        self.strategy().enrich(transaction, block)
    }
}
