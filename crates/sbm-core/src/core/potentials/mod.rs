//! Interaction laws that turn an atom group's raw geometry into the physical
//! parameters written to a topology line.
//!
//! Every [`Potential`] variant owns a fixed function-type tag, a header
//! comment, and a line template ([`Layout`]). [`Potential::apply`] derives the
//! field map for a group; [`Potential::render`] formats it through the layout.

pub mod bonded;
pub mod dihedrals;
pub mod pairs;

use crate::core::format::template::{FieldMap, Layout, MissingFieldError};
use crate::core::models::entity::EntityKind;
use crate::core::models::group::AtomGroup;
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

const INDEX_FIELDS: [&str; 4] = ["ai", "aj", "ak", "al"];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PotentialError {
    #[error("Potential {potential} requires a {field} which the atom group does not provide")]
    MissingDependency {
        potential: Potential,
        field: &'static str,
    },
    #[error("Potential {potential} acts on {expected} atoms but the group has {found}")]
    ArityMismatch {
        potential: Potential,
        expected: usize,
        found: usize,
    },
    #[error("{kind} has no potential bound and its section provides no default")]
    Unbound { kind: EntityKind },
    #[error(transparent)]
    Template(#[from] MissingFieldError),
}

/// The closed set of interaction laws a topology row can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Potential {
    /// Harmonic bond.
    Bond,
    /// 12-6 Lennard-Jones contact.
    LennardJones,
    /// 12-10 Lennard-Jones contact.
    #[serde(rename = "lennard-jones-10-12")]
    LennardJones1012,
    /// Single Gaussian contact well.
    Gaussian,
    /// Gaussian contact well with an excluded-volume term.
    CombinedGaussian,
    /// Harmonic angle.
    Angle,
    /// Periodic proper dihedral.
    Dihedral,
    ImproperDihedral,
    AllAtomDihedral,
}

impl Potential {
    /// The integer `func` column written for this potential.
    pub fn function_type(self) -> i64 {
        match self {
            Self::Gaussian => pairs::GAUSSIAN_FUNCTION_TYPE,
            Self::CombinedGaussian => pairs::COMBINED_GAUSSIAN_FUNCTION_TYPE,
            Self::AllAtomDihedral => dihedrals::ALL_ATOM_FUNCTION_TYPE,
            _ => 1,
        }
    }

    /// Number of atoms the potential acts on.
    pub fn arity(self) -> usize {
        match self {
            Self::Bond
            | Self::LennardJones
            | Self::LennardJones1012
            | Self::Gaussian
            | Self::CombinedGaussian => 2,
            Self::Angle => 3,
            Self::Dihedral | Self::ImproperDihedral | Self::AllAtomDihedral => 4,
        }
    }

    pub fn layout(self) -> &'static Layout {
        match self {
            Self::Bond => &bonded::BOND_LAYOUT,
            Self::Angle => &bonded::ANGLE_LAYOUT,
            Self::LennardJones => &pairs::LENNARD_JONES_LAYOUT,
            Self::LennardJones1012 => &pairs::LENNARD_JONES_1012_LAYOUT,
            Self::Gaussian => &pairs::GAUSSIAN_LAYOUT,
            Self::CombinedGaussian => &pairs::COMBINED_GAUSSIAN_LAYOUT,
            Self::Dihedral | Self::ImproperDihedral => &dihedrals::PERIODIC_LAYOUT,
            Self::AllAtomDihedral => &dihedrals::ALL_ATOM_LAYOUT,
        }
    }

    pub fn header(self) -> &'static str {
        self.layout().header
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Bond => "Bond",
            Self::LennardJones => "LennardJones",
            Self::LennardJones1012 => "LennardJones1012",
            Self::Gaussian => "Gaussian",
            Self::CombinedGaussian => "CombinedGaussian",
            Self::Angle => "Angle",
            Self::Dihedral => "Dihedral",
            Self::ImproperDihedral => "ImproperDihedral",
            Self::AllAtomDihedral => "AllAtomDihedral",
        }
    }

    fn geometry_field(self) -> &'static str {
        match self.arity() {
            2 => "distance",
            _ => "angle",
        }
    }

    /// Derives the full field map (indices, `func`, physical parameters) for `group`.
    pub fn apply<G: AtomGroup + ?Sized>(self, group: &G) -> Result<FieldMap, PotentialError> {
        let atoms = group.atoms();
        if atoms.len() != self.arity() {
            return Err(PotentialError::ArityMismatch {
                potential: self,
                expected: self.arity(),
                found: atoms.len(),
            });
        }
        let geometry = group.geometry().ok_or(PotentialError::MissingDependency {
            potential: self,
            field: self.geometry_field(),
        })?;

        let mut fields = FieldMap::new();
        for (&name, &index) in INDEX_FIELDS.iter().zip(atoms) {
            fields.insert(name, index);
        }
        fields.insert("func", self.function_type());

        match self {
            Self::Bond => bonded::bond_fields(geometry, &mut fields),
            Self::Angle => bonded::angle_fields(geometry, &mut fields),
            Self::LennardJones => pairs::lennard_jones_fields(geometry, &mut fields),
            Self::LennardJones1012 => pairs::lennard_jones_1012_fields(geometry, &mut fields),
            Self::Gaussian => pairs::gaussian_fields(geometry, &mut fields),
            Self::CombinedGaussian => pairs::combined_gaussian_fields(geometry, &mut fields),
            Self::Dihedral => dihedrals::periodic_fields(geometry, &mut fields),
            Self::ImproperDihedral => dihedrals::improper_fields(geometry, &mut fields),
            Self::AllAtomDihedral => dihedrals::all_atom_fields(geometry, &mut fields),
        }
        Ok(fields)
    }

    /// Applies the potential and renders the resulting line, without the
    /// Fortran-style exponent pass.
    pub fn render<G: AtomGroup + ?Sized>(self, group: &G) -> Result<String, PotentialError> {
        let fields = self.apply(group)?;
        Ok(self.layout().format.render(&fields)?)
    }
}

impl fmt::Display for Potential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
