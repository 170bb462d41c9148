//! # Core Models Module
//!
//! Typed records for the rows of a topology file and the homogeneous
//! collections that hold them.
//!
//! ## Key Components
//!
//! - [`atom`] - `[ atoms ]` and `[ atomtypes ]` rows
//! - [`group`] - Pairs, exclusions, angles and dihedrals, i.e. rows addressing 2 to 4 atoms
//! - [`entry`] - Untyped rows and comment lines, kept for lossless passthrough
//! - [`entity`] - The [`Entity`](entity::Entity) capability and the closed
//!   [`Entry`](entity::Entry) sum type
//! - [`collection`] - [`TypedCollection`](collection::TypedCollection), an ordered
//!   sequence of one entity kind
//!
//! ## Usage
//!
//! ```
//! use sbmtools::core::models::collection::TypedCollection;
//! use sbmtools::core::models::group::Pair;
//! use sbmtools::core::potentials::Potential;
//!
//! let native: TypedCollection<Pair> = vec![
//!     Pair::new(1, 5).with_distance(0.52).with_potential(Potential::Gaussian),
//!     Pair::new(2, 6).with_distance(0.61).with_potential(Potential::Gaussian),
//! ]
//! .into();
//! let extra: TypedCollection<Pair> =
//!     vec![Pair::new(2, 6).with_distance(0.61).with_potential(Potential::Gaussian)].into();
//!
//! assert_eq!(native.union(&extra).len(), 2);
//! assert_eq!(native.concat(&extra).len(), 3);
//! ```

pub mod atom;
pub mod collection;
pub mod entity;
pub mod entry;
pub mod group;
