//! Fallback dialect for documents no bank dialect accepts

use crate::traits::*;
use crate::types::*;

const GENERIC_CONFIG: DialectConfig = DialectConfig {
    name: "generic",
    header_prefix: "",
    statement_delimiter: '-',
    opening_balance_tags: &["60F"],
    closing_balance_tags: &["62F"],
};

/// Plain MT940 without any counter-party extraction
#[derive(Debug, Clone)]
pub struct Generic {
    config: DialectConfig,
}

impl Default for Generic {
    fn default() -> Self {
        Self::new()
    }
}

impl Generic {
    pub fn new() -> Self {
        Self {
            config: GENERIC_CONFIG,
        }
    }
}

impl DialectStrategy for Generic {
    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn accept(&self, _header: &str) -> bool {
        true
    }

    fn contra_account(&self, _block: &NarrativeBlock) -> Option<String> {
        None
    }

    fn contra_account_holder(&self, _block: &NarrativeBlock) -> Option<String> {
        None
    }
}
