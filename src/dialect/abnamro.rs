//! ABN AMRO dialect
//!
//! ABN AMRO narratives come in two shapes. SEPA transfers carry labeled
//! `IBAN:`, `BIC:` and `NAAM:` fields anywhere in the narrative. Legacy
//! transfers open the first line with the counter-party account, either a
//! dotted account number or `GIRO` followed by a short number, and put the
//! holder name in fixed-width columns after it.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::traits::*;
use crate::types::*;
use crate::utils::{non_blank, Column};

const ABN_AMRO_CONFIG: DialectConfig = DialectConfig {
    name: "abnamro",
    header_prefix: "ABNANL",
    statement_delimiter: '-',
    opening_balance_tags: &["60F", "60M"],
    closing_balance_tags: &["62F", "62M"],
};

const GIRO_LITERAL: &str = "GIRO";

/// First column of a line starting with a dotted account number
pub const NUMERIC_ACCOUNT_COLUMN: Column = Column::new(0, 32);
/// First column of a `GIRO` line, after the literal
pub const GIRO_ACCOUNT_COLUMN: Column = Column::new(4, 28);
/// Second column of the first line, where names overflow to
pub const NAME_COLUMN: Column = Column::new(32, 32);
/// First column of the line after the account line
pub const CONTINUATION_COLUMN: Column = Column::new(0, 32);
/// Fixed field holding a spaced GIRO number, right after the literal
pub const GIRO_NUMBER_WIDTH: usize = 9;

static NUMERIC_ACCOUNT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9.]{11,14})(?:\s|$)").unwrap());

// One optional separator, then the whole fixed field. Anything after the
// field belongs to the name, even when it starts with digits.
static GIRO_SPACED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"^ ?([0-9 ]{{{}}})(?:\s|$)", GIRO_NUMBER_WIDTH)).unwrap()
});

static GIRO_COMPACT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([0-9]+)(?:\s|$)").unwrap());

static SEPA_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(IBAN|BIC|NAAM|OMSCHRIJVING|KENMERK|MACHTIGING|INCASSANT|BETALINGSKENM\.)\s*:")
        .unwrap()
});

/// How the digit run after `GIRO` is laid out
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GiroLayout {
    /// Older documents: a nine character field, embedded spaces are kept
    #[default]
    Spaced,
    /// Newer documents: a plain digit run
    Compact,
}

impl GiroLayout {
    fn pattern(&self) -> &'static Regex {
        match self {
            GiroLayout::Spaced => &*GIRO_SPACED_RE,
            GiroLayout::Compact => &*GIRO_COMPACT_RE,
        }
    }
}

/// Labeled fields of a SEPA transfer narrative
#[derive(Debug, Clone, PartialEq, Eq)]
struct SepaTransfer {
    iban: String,
    bic: String,
    name: String,
}

impl SepaTransfer {
    /// All of `IBAN:`, `BIC:` and `NAAM:` must carry a value, otherwise the
    /// narrative is not treated as a SEPA transfer at all.
    fn parse(block: &NarrativeBlock) -> Option<Self> {
        if block.free_text.is_empty() {
            return None;
        }
        let text = block.description();

        // (label, label start, value start)
        let labels: Vec<(&str, usize, usize)> = SEPA_LABEL_RE
            .captures_iter(&text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                Some((caps.get(1)?.as_str(), whole.start(), whole.end()))
            })
            .collect();

        let field = |wanted: &str| -> Option<String> {
            let idx = labels.iter().position(|(label, _, _)| *label == wanted)?;
            let value_start = labels[idx].2;
            let value_end = labels
                .get(idx + 1)
                .map(|(_, start, _)| *start)
                .unwrap_or(text.len());
            let value = text[value_start..value_end].trim_start();
            let value = value
                .split(|c: char| c == '\r' || c == '\n')
                .next()
                .unwrap_or_default();
            non_blank(value)
        };

        Some(Self {
            iban: field("IBAN")?,
            bic: field("BIC")?,
            name: field("NAAM")?,
        })
    }

    /// BIC first: IBAN ranges are shared between banks
    fn account(&self) -> String {
        format!("{}/{}", self.bic, self.iban)
    }
}

/// Account prefix of a legacy first line
struct LegacyAccount<'a> {
    account: String,
    /// Rest of the account column after the account number
    remainder: &'a str,
    /// The account column is filled up to its last character
    full: bool,
}

/// ABN AMRO statement dialect
#[derive(Debug, Clone)]
pub struct AbnAmro {
    config: DialectConfig,
    giro_layout: GiroLayout,
}

impl Default for AbnAmro {
    fn default() -> Self {
        Self::new()
    }
}

impl AbnAmro {
    /// Dialect for older documents (spaced GIRO numbers)
    pub fn new() -> Self {
        Self::with_giro_layout(GiroLayout::Spaced)
    }

    /// Dialect with an explicit GIRO layout
    pub fn with_giro_layout(giro_layout: GiroLayout) -> Self {
        Self {
            config: ABN_AMRO_CONFIG,
            giro_layout,
        }
    }

    /// GIRO layout in use
    pub fn giro_layout(&self) -> GiroLayout {
        self.giro_layout
    }

    fn legacy_account<'a>(&self, line: &'a str) -> Option<LegacyAccount<'a>> {
        let (column, pattern) = if line.starts_with(GIRO_LITERAL) {
            (GIRO_ACCOUNT_COLUMN, self.giro_layout.pattern())
        } else {
            (NUMERIC_ACCOUNT_COLUMN, &*NUMERIC_ACCOUNT_RE)
        };

        let text = column.slice(line);
        let digits = pattern.captures(text)?.get(1)?;
        let full = text.chars().count() == column.width
            && text.chars().last().is_some_and(|c| !c.is_whitespace());

        Some(LegacyAccount {
            account: non_blank(&digits.as_str().replace('.', ""))?,
            remainder: &text[digits.end()..],
            full,
        })
    }
}

impl DialectStrategy for AbnAmro {
    fn config(&self) -> &DialectConfig {
        &self.config
    }

    fn contra_account(&self, block: &NarrativeBlock) -> Option<String> {
        if let Some(sepa) = SepaTransfer::parse(block) {
            log::trace!("SEPA narrative, contra account {}", sepa.account());
            return Some(sepa.account());
        }

        let legacy = self.legacy_account(block.first_line()?)?;
        log::trace!("legacy narrative, contra account {}", legacy.account);
        Some(legacy.account)
    }

    fn contra_account_holder(&self, block: &NarrativeBlock) -> Option<String> {
        if let Some(sepa) = SepaTransfer::parse(block) {
            return Some(sepa.name);
        }

        let line = block.first_line()?;
        let legacy = self.legacy_account(line)?;

        // The name lands in whichever column still had room. A name running
        // into the column edge continues in the name column.
        if legacy.full && non_blank(legacy.remainder).is_some() {
            return non_blank(&format!("{}{}", legacy.remainder, NAME_COLUMN.slice(line)));
        }
        non_blank(legacy.remainder)
            .or_else(|| non_blank(NAME_COLUMN.slice(line)))
            .or_else(|| {
                block
                    .line(1)
                    .and_then(|next| non_blank(CONTINUATION_COLUMN.slice(next)))
            })
    }

    fn enrich(&self, mut transaction: Transaction, block: &NarrativeBlock) -> Transaction {
        transaction.contra_account_holder = self.contra_account_holder(block);
        transaction
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn block(lines: &[&str]) -> NarrativeBlock {
        NarrativeBlock::new(
            "1105240524D9,00N426NONREF",
            lines.iter().map(|line| line.to_string()).collect(),
        )
    }

    #[test]
    fn test_accept() {
        let abn = AbnAmro::new();
        assert!(abn.accept("ABNANL"));
        assert!(!abn.accept("INGBNL"));
        assert!(!abn.accept(""));
    }

    #[test]
    fn test_empty_narrative() {
        let abn = AbnAmro::new();
        let empty = block(&[]);
        assert_eq!(abn.contra_account(&empty), None);
        assert_eq!(abn.contra_account_holder(&empty), None);
    }

    #[test]
    fn test_sepa_transfer() {
        let abn = AbnAmro::new();
        let sepa = block(&[
            "SEPA OVERBOEKING                 IBAN: NL12ABNA0123456789",
            "BIC: ABNANL2A                    NAAM: J JANSEN",
            "OMSCHRIJVING: FACTUUR 2011-05",
        ]);
        assert_eq!(
            abn.contra_account(&sepa).as_deref(),
            Some("ABNANL2A/NL12ABNA0123456789")
        );
        assert_eq!(abn.contra_account_holder(&sepa).as_deref(), Some("J JANSEN"));
    }

    #[test]
    fn test_sepa_values_on_following_lines() {
        let abn = AbnAmro::new();
        let sepa = block(&[
            "IBAN:",
            "  NL91ABNA0417164300  ",
            "BIC:   INGBNL2A",
            "NAAM:",
            "A DE VRIES  ",
        ]);
        assert_eq!(
            abn.contra_account(&sepa).as_deref(),
            Some("INGBNL2A/NL91ABNA0417164300")
        );
        assert_eq!(abn.contra_account_holder(&sepa).as_deref(), Some("A DE VRIES"));
    }

    #[test]
    fn test_sepa_takes_priority_over_numeric_prefix() {
        let abn = AbnAmro::new();
        let mixed = block(&[
            "123456789012 SEPA IBAN: NL91ABNA0417164300",
            "BIC: ABNANL2A NAAM: A DE VRIES",
        ]);
        assert_eq!(
            abn.contra_account(&mixed).as_deref(),
            Some("ABNANL2A/NL91ABNA0417164300")
        );
        assert_eq!(abn.contra_account_holder(&mixed).as_deref(), Some("A DE VRIES"));
    }

    #[test]
    fn test_partial_sepa_falls_through() {
        let abn = AbnAmro::new();
        let no_name = block(&["SEPA OVERBOEKING IBAN: NL91ABNA0417164300", "BIC: ABNANL2A"]);
        assert_eq!(abn.contra_account(&no_name), None);
        assert_eq!(abn.contra_account_holder(&no_name), None);

        let numeric = block(&["123456789012 IBAN: NL91ABNA0417164300 BIC: ABNANL2A"]);
        assert_eq!(abn.contra_account(&numeric).as_deref(), Some("123456789012"));
    }

    #[test]
    fn test_dotted_account() {
        let abn = AbnAmro::new();
        let dotted = block(&["123.456.789.01  SOME NAME  "]);
        assert_eq!(abn.contra_account(&dotted).as_deref(), Some("12345678901"));
        assert_eq!(abn.contra_account_holder(&dotted).as_deref(), Some("SOME NAME"));
    }

    #[test]
    fn test_numeric_account_needs_eleven_characters() {
        let abn = AbnAmro::new();
        let short = block(&["12345 J SMITH"]);
        assert_eq!(abn.contra_account(&short), None);
        assert_eq!(abn.contra_account_holder(&short), None);
    }

    #[test]
    fn test_giro_account() {
        let abn = AbnAmro::new();
        let giro = block(&["GIRO123456789  SOME NAME"]);
        assert_eq!(abn.contra_account(&giro).as_deref(), Some("123456789"));
        assert_eq!(abn.contra_account_holder(&giro).as_deref(), Some("SOME NAME"));
    }

    #[test]
    fn test_giro_name_on_next_line() {
        let abn = AbnAmro::new();
        let giro = block(&["GIRO 000123456 ", "PIETER JANSEN"]);
        assert_eq!(abn.contra_account(&giro).as_deref(), Some("000123456"));
        assert_eq!(abn.contra_account_holder(&giro).as_deref(), Some("PIETER JANSEN"));
    }

    #[test]
    fn test_name_in_second_column() {
        let abn = AbnAmro::new();
        let line = format!("{:<32}{}", "123.456.789.01", "J SMITH");
        let overflow = block(&[line.as_str(), "BETALINGSKENM. 1234"]);
        assert_eq!(abn.contra_account(&overflow).as_deref(), Some("12345678901"));
        assert_eq!(abn.contra_account_holder(&overflow).as_deref(), Some("J SMITH"));
    }

    #[test]
    fn test_name_in_second_column_after_giro() {
        let abn = AbnAmro::new();
        let line = format!("{:<32}{}", "GIRO 000123456", "PIETER JANSEN");
        let overflow = block(&[line.as_str(), "PERIODE 05-2011"]);
        assert_eq!(abn.contra_account(&overflow).as_deref(), Some("000123456"));
        assert_eq!(abn.contra_account_holder(&overflow).as_deref(), Some("PIETER JANSEN"));
    }

    #[test]
    fn test_names_starting_with_digits() {
        let abn = AbnAmro::new();

        let giro = block(&["GIRO  6390784  12 APOSTELEN"]);
        assert_eq!(abn.contra_account(&giro).as_deref(), Some("6390784"));
        assert_eq!(abn.contra_account_holder(&giro).as_deref(), Some("12 APOSTELEN"));

        let padded = block(&["GIRO    12345 3 MUSKETIERS BV"]);
        assert_eq!(abn.contra_account(&padded).as_deref(), Some("12345"));
        assert_eq!(abn.contra_account_holder(&padded).as_deref(), Some("3 MUSKETIERS BV"));

        let numeric = block(&["123456789012 3M NEDERLAND"]);
        assert_eq!(abn.contra_account(&numeric).as_deref(), Some("123456789012"));
        assert_eq!(abn.contra_account_holder(&numeric).as_deref(), Some("3M NEDERLAND"));
    }

    #[test]
    fn test_digits_inside_giro_field_stay_in_account() {
        let abn = AbnAmro::new();
        let narrative = block(&["GIRO   12345 3 MUSKETIERS BV"]);
        assert_eq!(abn.contra_account(&narrative).as_deref(), Some("12345 3"));
        assert_eq!(abn.contra_account_holder(&narrative).as_deref(), Some("MUSKETIERS BV"));
    }

    #[test]
    fn test_account_without_digits() {
        let abn = AbnAmro::new();
        assert_eq!(abn.contra_account(&block(&["............ X"])), None);
        assert_eq!(abn.contra_account(&block(&["GIRO          X"])), None);
        assert_eq!(abn.contra_account_holder(&block(&["............ X"])), None);
    }

    #[test]
    fn test_name_crossing_column_edge() {
        let abn = AbnAmro::new();
        let long = block(&["123456789012 JOHANNES VAN DER BERG-ZONNEVELD"]);
        assert_eq!(abn.contra_account(&long).as_deref(), Some("123456789012"));
        assert_eq!(
            abn.contra_account_holder(&long).as_deref(),
            Some("JOHANNES VAN DER BERG-ZONNEVELD")
        );

        let giro = block(&["GIRO   6390784 NUON KLANTENSERVICE"]);
        assert_eq!(abn.contra_account(&giro).as_deref(), Some("6390784"));
        assert_eq!(abn.contra_account_holder(&giro).as_deref(), Some("NUON KLANTENSERVICE"));
    }

    #[test]
    fn test_giro_layouts_diverge_on_embedded_spaces() {
        let narrative = block(&["GIRO 123 4567  J SMITH"]);

        let spaced = AbnAmro::new();
        assert_eq!(spaced.giro_layout(), GiroLayout::Spaced);
        assert_eq!(spaced.contra_account(&narrative).as_deref(), Some("123 4567"));
        assert_eq!(spaced.contra_account_holder(&narrative).as_deref(), Some("J SMITH"));

        let compact = AbnAmro::with_giro_layout(GiroLayout::Compact);
        assert_eq!(compact.contra_account(&narrative).as_deref(), Some("123"));

        let long = block(&["GIRO 1234567890 J SMITH"]);
        assert_eq!(spaced.contra_account(&long), None);
        assert_eq!(compact.contra_account(&long).as_deref(), Some("1234567890"));
    }

    #[test]
    fn test_extraction_is_repeatable() {
        let abn = AbnAmro::new();
        let narrative = block(&["GIRO   6390784 NUON ENERGIE", "PERIODE 05-2011"]);
        let first = abn.contra_party(&narrative);
        let second = abn.contra_party(&narrative);
        assert_eq!(first, second);
        assert_eq!(first.account.as_deref(), Some("6390784"));
        assert_eq!(first.holder.as_deref(), Some("NUON ENERGIE"));
    }

    #[test]
    fn test_no_recognizable_prefix() {
        let abn = AbnAmro::new();
        let fee = block(&["KOSTEN BETALINGSVERKEER", "PERIODE 01-04-2011 T/M 30-06-2011"]);
        assert!(abn.contra_party(&fee).is_unknown());
    }

    #[test]
    fn test_enrich_attaches_holder_only() {
        let abn = AbnAmro::new();
        let narrative = block(&["123456789012 J SMITH"]);
        let built = crate::engine::build_transaction(&narrative, &abn).unwrap();
        assert_eq!(built.contra_account_holder, None);

        let enriched = abn.enrich(built.clone(), &narrative);
        assert_eq!(enriched.contra_account_holder.as_deref(), Some("J SMITH"));
        assert_eq!(enriched.contra_account, built.contra_account);
        assert_eq!(enriched.amount, BigDecimal::from_str("-9.00").unwrap());
        assert_eq!(enriched.description, built.description);
    }

    #[test]
    fn test_intermediate_balance_tags() {
        let abn = AbnAmro::new();
        let segment = ":25:517852257\n:60M:C110522EUR100,00\n:62M:D110524EUR5,00\n";
        let opening = abn.opening_balance(segment).unwrap();
        let closing = abn.closing_balance(segment).unwrap();
        assert_eq!(opening.amount, BigDecimal::from(100));
        assert_eq!(closing.amount, BigDecimal::from(-5));

        let generic = crate::dialect::Generic::new();
        assert!(generic.opening_balance(segment).is_none());
    }
}
