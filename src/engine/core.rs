//! Main parser orchestrator that coordinates dialect selection and statement assembly

use crate::dialect::{Dialect, DialectRegistry};
use crate::engine::tokenizer::{field_value, narrative_blocks, split_statements, tag_fields};
use crate::engine::transaction::build_transaction;
use crate::traits::DialectStrategy;
use crate::types::*;
use crate::utils::validate_statement;

/// MT940 parser that picks a bank dialect per document
///
/// The parser holds no per-document state and can be shared between
/// threads to parse independent documents concurrently.
#[derive(Debug, Clone, Default)]
pub struct Mt940Parser {
    registry: DialectRegistry,
    config: ParserConfig,
}

impl Mt940Parser {
    /// Create a parser with the standard dialects and default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with the standard dialects and a custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            registry: DialectRegistry::standard(),
            config,
        }
    }

    /// Create a parser with a custom dialect registry
    pub fn with_registry(registry: DialectRegistry, config: ParserConfig) -> Self {
        Self { registry, config }
    }

    /// Active configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Dialect that would handle `text`
    pub fn dialect_for(&self, text: &str) -> &Dialect {
        self.registry.select(Document::new(text).header())
    }

    /// Parse all statements of a document
    pub fn parse(&self, text: &str) -> Mt940Result<Vec<Statement>> {
        let document = Document::new(text);
        if document.is_blank() {
            return Err(Mt940Error::EmptyDocument);
        }

        let dialect = self.registry.select(document.header());
        log::debug!("parsing document with the {} dialect", dialect.name());

        self.parse_with(document, dialect)
    }

    /// Parse a document with an explicitly chosen dialect
    pub fn parse_with<D>(&self, document: Document<'_>, dialect: &D) -> Mt940Result<Vec<Statement>>
    where
        D: DialectStrategy + ?Sized,
    {
        let statements = split_statements(document.text(), dialect.config().statement_delimiter)
            .iter()
            .map(|segment| self.statement(segment, dialect))
            .collect::<Mt940Result<Vec<_>>>()?;

        log::debug!("parsed {} statement(s)", statements.len());
        Ok(statements)
    }

    /// Assemble one statement from its raw segment
    fn statement<D>(&self, segment: &str, dialect: &D) -> Mt940Result<Statement>
    where
        D: DialectStrategy + ?Sized,
    {
        let fields = tag_fields(segment);

        let account = field_value(&fields, &["25"])
            .ok_or_else(|| Mt940Error::MissingTag(":25: account identification".to_string()))?
            .to_string();

        let transactions = narrative_blocks(&fields)
            .iter()
            .map(|block| {
                let transaction = build_transaction(block, dialect)?;
                Ok(dialect.enrich(transaction, block))
            })
            .collect::<Mt940Result<Vec<_>>>()?;

        let statement = Statement {
            reference: field_value(&fields, &["20"]).map(str::to_string),
            account,
            number: field_value(&fields, &["28C", "28"]).map(str::to_string),
            opening_balance: dialect.opening_balance(segment),
            closing_balance: dialect.closing_balance(segment),
            transactions,
        };

        validate_statement(&statement, &self.config)?;
        Ok(statement)
    }
}
