//! Reading topology text.
//!
//! [`tokenizer`] classifies physical lines, [`sections`] maps section names to
//! the kinds the engine models, and [`parser`] routes every row into typed
//! entities or untyped passthrough rows.

pub mod parser;
pub mod sections;
pub mod tokenizer;
