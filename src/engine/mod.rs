//! Generic MT940 engine: tokenizing, balances, transactions and statement assembly

pub mod balance;
pub mod core;
pub mod tokenizer;
pub mod transaction;

pub use self::core::*;
pub use balance::{find_balance, parse_amount, parse_balance, parse_date};
pub use tokenizer::{narrative_blocks, split_statements, tag_fields, TagField};
pub use transaction::build_transaction;
