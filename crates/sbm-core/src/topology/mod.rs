//! # Topology Module
//!
//! The user-facing document layer. A [`Topology`](document::Topology) owns one
//! section model per section of a GROMACS topology file, reads it from text,
//! and writes it back.
//!
//! ```
//! use sbmtools::topology::document::Topology;
//! use sbmtools::core::potentials::Potential;
//!
//! let mut topology: Topology = "[ bonds ]\n1 2 1 3.80269060E-01 2.00000000E+04\n".parse()?;
//! assert_eq!(topology.bonds().len(), 1);
//!
//! topology.set_pair_potential(Potential::Gaussian)?;
//! let text = topology.save()?;
//! assert!(text.contains("     1      2 1  0.380269060E+00 0.200000000E+05"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod document;
pub mod error;
