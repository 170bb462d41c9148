//! Section models: how a block of rows turns back into text.
//!
//! - [`typed`] - Sections backed by a
//!   [`TypedCollection`](crate::core::models::collection::TypedCollection),
//!   grouped by the layout each entry renders through
//! - [`declarative`] - Fixed tables of untyped rows (`defaults`, `system`, ...)
//!   and unknown sections

pub mod declarative;
pub mod typed;
