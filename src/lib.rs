//! # MT940 Core
//!
//! A SWIFT MT940 bank statement parser with bank-specific dialects for
//! recovering the counter-party ("contra") account and account holder from
//! free-text transaction narratives.
//!
//! ## Features
//!
//! - **Generic engine**: statement splitting, tag tokenizing, balances, amounts and dates
//! - **Dialects**: first-match-wins registry keyed on the document header
//! - **ABN AMRO**: SEPA transfer blocks, dotted legacy accounts and `GIRO` accounts
//! - **Reconciliation**: opening balance + transactions against the closing balance
//!
//! ## Quick Start
//!
//! ```rust
//! use mt940_core::Mt940Parser;
//!
//! let document = "ABNANL2A\n940\nABNANL2A\n:20:ABN AMRO BANK NV\n:25:517852257\n\
//!     :28:19321/1\n:60F:C110522EUR3236,28\n:61:1105240524D9,00N426NONREF\n\
//!     :86:123456789012 J SMITH\n:62F:C110524EUR3227,28\n-\n";
//!
//! let statements = Mt940Parser::new().parse(document).unwrap();
//! let transaction = &statements[0].transactions[0];
//! assert_eq!(transaction.contra_account.as_deref(), Some("123456789012"));
//! assert_eq!(transaction.contra_account_holder.as_deref(), Some("J SMITH"));
//! ```

pub mod dialect;
pub mod engine;
pub mod reconciliation;
pub mod traits;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use dialect::*;
pub use engine::Mt940Parser;
pub use reconciliation::*;
pub use traits::*;
pub use types::*;
