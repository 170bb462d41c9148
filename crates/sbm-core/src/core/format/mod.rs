//! Text-level building blocks shared by the parser and the writer.
//!
//! - [`value`] coerces raw tokens into integers, floats or strings.
//! - [`template`] renders field maps through fixed-width line templates.
//! - [`fortran`] produces scientific notation and the `0.XXXXE±NN` convention
//!   expected in GROMACS topology files.

pub mod fortran;
pub mod template;
pub mod value;
