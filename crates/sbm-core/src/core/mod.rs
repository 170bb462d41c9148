//! # Core Module
//!
//! The stateless foundation of the topology engine.
//!
//! ## Architecture
//!
//! - **Formatting** ([`format`]) - Token coercion, fixed-width line templates and the
//!   Fortran-style scientific notation pass
//! - **Records** ([`models`]) - Atoms, atom groups, untyped rows and typed collections
//! - **Interaction laws** ([`potentials`]) - Function-type tags, headers and derived parameters
//! - **Section models** ([`sections`]) - Rendering of typed and declarative sections
//! - **Reading** ([`io`]) - Line classification and the section-aware parser

pub mod format;
pub mod io;
pub mod models;
pub mod potentials;
pub mod sections;
