//! Parse an ABN AMRO MT940 statement and print its counter-parties

use mt940_core::{DialectStrategy, Mt940Parser, Mt940Result, ReconciliationEngine};

const DOCUMENT: &str = "ABNANL2A
940
ABNANL2A
:20:ABN AMRO BANK NV
:25:517852257
:28:19321/1
:60F:C110522EUR3236,28
:61:1105240524D9,00N426NONREF
:86:123456789012 J SMITH
:61:1105240524C150,00N426NONREF
:86:GIRO 000123456
PIETER JANSEN
:61:1105250525C25,00NTRFNONREF
:86:SEPA OVERBOEKING                 IBAN: NL12ABNA0123456789
BIC: ABNANL2A                    NAAM: J JANSEN
OMSCHRIJVING: FACTUUR 2011-05
:62F:C110525EUR3402,28
-
";

fn main() -> Mt940Result<()> {
    println!("MT940 Core - Statement Parsing Example");
    println!("======================================\n");

    let parser = Mt940Parser::new();
    println!("Dialect: {}\n", parser.dialect_for(DOCUMENT).name());

    for statement in parser.parse(DOCUMENT)? {
        println!(
            "Statement {} for account {}",
            statement.number.as_deref().unwrap_or("-"),
            statement.account
        );

        for txn in &statement.transactions {
            println!(
                "  {} {:>10}  {:<30} {}",
                txn.value_date,
                txn.amount,
                txn.contra_account.as_deref().unwrap_or("(no account)"),
                txn.contra_account_holder.as_deref().unwrap_or("(no holder)")
            );
        }

        if let Some(report) = ReconciliationEngine::new().reconcile(&statement) {
            println!(
                "  Closing balance {} (expected {}), balanced: {}",
                report.actual_closing, report.expected_closing, report.is_balanced
            );
        }
        println!();
    }

    Ok(())
}
