//! # sbmtools
//!
//! Reading, editing and writing GROMACS topology (`.top`) files for native
//! structure-based model simulations.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless pieces: numeric coercion and
//!   fixed-width formatting, the entity records and typed collections, the
//!   interaction potentials that derive rendered parameters from geometry,
//!   section models, and the section-aware parser.
//!
//! - **[`topology`]: The Public API.** The [`Topology`](topology::document::Topology)
//!   document, its configuration, and the error type returned by loading and
//!   saving.

pub mod core;
pub mod topology;
