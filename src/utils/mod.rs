//! Utility modules

pub mod columns;
pub mod validation;

pub use columns::*;
pub use validation::*;
