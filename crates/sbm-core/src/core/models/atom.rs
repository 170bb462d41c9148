use super::entity::{CollectionError, Entity, EntityKind};
use crate::core::format::template::{Align, FieldMap, Layout, Slot};
use crate::core::format::value::Value;
use crate::core::potentials::{Potential, PotentialError};
use std::cmp::Ordering;

static ATOM_SLOTS: [Slot; 8] = [
    Slot::int("", "nr", 6),
    Slot::text(" ", "type", 2, Align::Left),
    Slot::int(" ", "resnr", 7),
    Slot::text(" ", "res", 4, Align::Right),
    Slot::text(" ", "atom", 3, Align::Right),
    Slot::int(" ", "cgnr", 6),
    Slot::fixed(" ", "charge", 8, 3, Align::Right),
    Slot::fixed(" ", "mass", 8, 3, Align::Right),
];

pub static ATOM_LAYOUT: Layout =
    Layout::new(";   nr type resnr  res  atom cgnr charge mass", &ATOM_SLOTS);

/// Columns of an `[ atoms ]` row holding free text rather than numbers.
pub const ATOM_TEXT_COLUMNS: [usize; 3] = [1, 3, 4];

static ATOM_TYPE_SLOTS: [Slot; 6] = [
    Slot::text(" ", "name", 5, Align::Left),
    Slot::fixed(" ", "mass", 8, 3, Align::Left),
    Slot::fixed(" ", "charge", 5, 3, Align::Left),
    Slot::text(" ", "ptype", 4, Align::Left),
    Slot::fixed(" ", "c6", 0, 3, Align::Right),
    Slot::sci(" ", "c12", 10, 6),
];

pub static ATOM_TYPE_LAYOUT: Layout =
    Layout::new(";name  mass    charge ptype   c6 c12", &ATOM_TYPE_SLOTS);

/// Columns of an `[ atomtypes ]` row holding free text rather than numbers.
pub const ATOM_TYPE_TEXT_COLUMNS: [usize; 2] = [0, 3];

fn text_at(values: &[Value], position: usize) -> String {
    values[position].to_string()
}

fn float_at(kind: EntityKind, values: &[Value], position: usize) -> Result<f64, CollectionError> {
    values[position]
        .as_float()
        .ok_or_else(|| CollectionError::uncoercible(kind, values))
}

fn int_at(kind: EntityKind, values: &[Value], position: usize) -> Result<i64, CollectionError> {
    values[position]
        .as_int()
        .ok_or_else(|| CollectionError::uncoercible(kind, values))
}

/// A row of the `[ atoms ]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// 1-based atom number, referenced by every bonded group.
    pub index: u32,
    pub atom_type: String,
    pub residue_number: i64,
    pub residue_name: String,
    pub name: String,
    pub charge_group: i64,
    pub charge: f64,
    pub mass: f64,
}

impl Atom {
    /// Creates an atom in residue 1 with its own charge group, no charge and unit mass.
    pub fn new(index: u32, atom_type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            index,
            atom_type: atom_type.into(),
            residue_number: 1,
            residue_name: String::new(),
            name: name.into(),
            charge_group: index as i64,
            charge: 0.0,
            mass: 1.0,
        }
    }

    pub fn with_residue(mut self, number: i64, name: impl Into<String>) -> Self {
        self.residue_number = number;
        self.residue_name = name.into();
        self
    }

    pub fn with_charge_group(mut self, charge_group: i64) -> Self {
        self.charge_group = charge_group;
        self
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_mass(mut self, mass: f64) -> Self {
        self.mass = mass;
        self
    }
}

impl Entity for Atom {
    const KIND: EntityKind = EntityKind::Atom;

    fn from_values(values: &[Value]) -> Result<Self, CollectionError> {
        if values.len() != 8 {
            return Err(CollectionError::uncoercible(Self::KIND, values));
        }
        let index = values[0]
            .as_index()
            .ok_or_else(|| CollectionError::uncoercible(Self::KIND, values))?;
        Ok(Self {
            index,
            atom_type: text_at(values, 1),
            residue_number: int_at(Self::KIND, values, 2)?,
            residue_name: text_at(values, 3),
            name: text_at(values, 4),
            charge_group: int_at(Self::KIND, values, 5)?,
            charge: float_at(Self::KIND, values, 6)?,
            mass: float_at(Self::KIND, values, 7)?,
        })
    }

    fn intrinsic_cmp(&self, other: &Self) -> Ordering {
        self.index.cmp(&other.index)
    }

    fn layout_and_fields(
        &self,
        _fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError> {
        let fields = FieldMap::new()
            .with("nr", self.index)
            .with("type", self.atom_type.as_str())
            .with("resnr", self.residue_number)
            .with("res", self.residue_name.as_str())
            .with("atom", self.name.as_str())
            .with("cgnr", self.charge_group)
            .with("charge", self.charge)
            .with("mass", self.mass);
        Ok((&ATOM_LAYOUT, fields))
    }

    fn effective_header(&self, _fallback: Option<Potential>) -> Option<&'static str> {
        Some(ATOM_LAYOUT.header)
    }
}

/// A row of the `[ atomtypes ]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomType {
    pub name: String,
    pub mass: f64,
    pub charge: f64,
    /// Particle type, `A` for ordinary atoms.
    pub ptype: String,
    pub c6: f64,
    pub c12: f64,
}

impl AtomType {
    pub fn new(name: impl Into<String>, mass: f64, c6: f64, c12: f64) -> Self {
        Self {
            name: name.into(),
            mass,
            charge: 0.0,
            ptype: "A".to_string(),
            c6,
            c12,
        }
    }

    pub fn with_charge(mut self, charge: f64) -> Self {
        self.charge = charge;
        self
    }

    pub fn with_ptype(mut self, ptype: impl Into<String>) -> Self {
        self.ptype = ptype.into();
        self
    }
}

impl Entity for AtomType {
    const KIND: EntityKind = EntityKind::AtomType;

    fn from_values(values: &[Value]) -> Result<Self, CollectionError> {
        if values.len() != 6 {
            return Err(CollectionError::uncoercible(Self::KIND, values));
        }
        Ok(Self {
            name: text_at(values, 0),
            mass: float_at(Self::KIND, values, 1)?,
            charge: float_at(Self::KIND, values, 2)?,
            ptype: text_at(values, 3),
            c6: float_at(Self::KIND, values, 4)?,
            c12: float_at(Self::KIND, values, 5)?,
        })
    }

    fn intrinsic_cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }

    fn layout_and_fields(
        &self,
        _fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError> {
        let fields = FieldMap::new()
            .with("name", self.name.as_str())
            .with("mass", self.mass)
            .with("charge", self.charge)
            .with("ptype", self.ptype.as_str())
            .with("c6", self.c6)
            .with("c12", self.c12);
        Ok((&ATOM_TYPE_LAYOUT, fields))
    }

    fn effective_header(&self, _fallback: Option<Potential>) -> Option<&'static str> {
        Some(ATOM_TYPE_LAYOUT.header)
    }
}
