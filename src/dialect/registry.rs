//! First-match-wins dialect registry

use crate::dialect::{AbnAmro, Dialect, Generic};
use crate::traits::DialectStrategy;

/// Ordered list of dialects with a generic fallback
///
/// Dialects are tried in registration order; the first one accepting the
/// document header wins. Documents nobody accepts get the generic dialect.
#[derive(Debug, Clone)]
pub struct DialectRegistry {
    dialects: Vec<Dialect>,
    fallback: Dialect,
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl DialectRegistry {
    /// Registry with no bank dialects, only the fallback
    pub fn empty() -> Self {
        Self {
            dialects: Vec::new(),
            fallback: Dialect::Generic(Generic::new()),
        }
    }

    /// Registry with every built-in bank dialect
    pub fn standard() -> Self {
        Self::empty().with(AbnAmro::new())
    }

    /// Append a dialect (lowest priority so far)
    pub fn with(mut self, dialect: impl Into<Dialect>) -> Self {
        self.register(dialect);
        self
    }

    /// Append a dialect (lowest priority so far)
    pub fn register(&mut self, dialect: impl Into<Dialect>) {
        self.dialects.push(dialect.into());
    }

    /// Registered bank dialects in priority order
    pub fn dialects(&self) -> &[Dialect] {
        &self.dialects
    }

    /// Dialect for a document header prefix
    pub fn select(&self, header: &str) -> &Dialect {
        match self.dialects.iter().find(|dialect| dialect.accept(header)) {
            Some(dialect) => {
                log::debug!("header {:?} accepted by the {} dialect", header, dialect.name());
                dialect
            }
            None => {
                log::debug!("no dialect accepts header {:?}, using fallback", header);
                &self.fallback
            }
        }
    }
}
