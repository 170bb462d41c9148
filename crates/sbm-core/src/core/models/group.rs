use super::entity::{CollectionError, Entity, EntityKind};
use crate::core::format::template::{FieldMap, Layout, Slot};
use crate::core::format::value::Value;
use crate::core::potentials::{Potential, PotentialError};
use std::cmp::Ordering;

/// A group of atoms addressed by 1-based indices, optionally carrying the
/// geometric value (distance or angle) a potential derives parameters from.
pub trait AtomGroup {
    fn atoms(&self) -> &[u32];

    fn geometry(&self) -> Option<f64>;

    fn potential(&self) -> Option<Potential>;

    /// Renders the group through its bound potential.
    ///
    /// Returns `Ok(None)` for an unbound group.
    fn render(&self) -> Result<Option<String>, PotentialError> {
        match self.potential() {
            Some(potential) => potential.render(self).map(Some),
            None => Ok(None),
        }
    }
}

fn group_layout_and_fields<G: AtomGroup + Entity>(
    group: &G,
    fallback: Option<Potential>,
) -> Result<(&'static Layout, FieldMap), PotentialError> {
    let potential = AtomGroup::potential(group)
        .or(fallback)
        .ok_or(PotentialError::Unbound { kind: G::KIND })?;
    let fields = potential.apply(group)?;
    Ok((potential.layout(), fields))
}

fn indices<const N: usize>(
    kind: EntityKind,
    values: &[Value],
) -> Result<[u32; N], CollectionError> {
    let mut atoms = [0u32; N];
    for (slot, value) in atoms.iter_mut().zip(values) {
        *slot = value
            .as_index()
            .ok_or_else(|| CollectionError::uncoercible(kind, values))?;
    }
    if values.len() < N {
        return Err(CollectionError::uncoercible(kind, values));
    }
    Ok(atoms)
}

fn optional_geometry(
    kind: EntityKind,
    values: &[Value],
    position: usize,
) -> Result<Option<f64>, CollectionError> {
    match values.get(position) {
        None => Ok(None),
        Some(value) => value
            .as_float()
            .map(Some)
            .ok_or_else(|| CollectionError::uncoercible(kind, values)),
    }
}

/// Two atoms with an optional distance: a native contact pair or a bond.
#[derive(Debug, Clone, PartialEq)]
pub struct Pair {
    pub atoms: [u32; 2],
    /// Separation of the two atoms in nm.
    pub distance: Option<f64>,
    pub potential: Option<Potential>,
}

impl Pair {
    pub fn new(first: u32, second: u32) -> Self {
        Self {
            atoms: [first, second],
            distance: None,
            potential: None,
        }
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    pub fn with_potential(mut self, potential: Potential) -> Self {
        self.potential = Some(potential);
        self
    }
}

impl AtomGroup for Pair {
    fn atoms(&self) -> &[u32] {
        &self.atoms
    }

    fn geometry(&self) -> Option<f64> {
        self.distance
    }

    fn potential(&self) -> Option<Potential> {
        self.potential
    }
}

impl Entity for Pair {
    const KIND: EntityKind = EntityKind::Pair;

    fn from_values(values: &[Value]) -> Result<Self, CollectionError> {
        if values.len() > 3 {
            return Err(CollectionError::uncoercible(Self::KIND, values));
        }
        Ok(Self {
            atoms: indices(Self::KIND, values)?,
            distance: optional_geometry(Self::KIND, values, 2)?,
            potential: None,
        })
    }

    fn intrinsic_cmp(&self, other: &Self) -> Ordering {
        self.atoms.cmp(&other.atoms)
    }

    fn potential(&self) -> Option<Potential> {
        self.potential
    }

    fn layout_and_fields(
        &self,
        fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError> {
        group_layout_and_fields(self, fallback)
    }
}

static EXCLUSION_SLOTS: [Slot; 2] = [Slot::int("", "ai", 6), Slot::int(" ", "aj", 6)];

pub static EXCLUSION_LAYOUT: Layout = Layout::new(";   ai     aj", &EXCLUSION_SLOTS);

/// A pair of atoms whose non-bonded interaction is switched off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Exclusion {
    pub atoms: [u32; 2],
}

impl Exclusion {
    pub fn new(first: u32, second: u32) -> Self {
        Self {
            atoms: [first, second],
        }
    }
}

impl Entity for Exclusion {
    const KIND: EntityKind = EntityKind::Exclusion;

    fn from_values(values: &[Value]) -> Result<Self, CollectionError> {
        if values.len() != 2 {
            return Err(CollectionError::uncoercible(Self::KIND, values));
        }
        Ok(Self {
            atoms: indices(Self::KIND, values)?,
        })
    }

    fn intrinsic_cmp(&self, other: &Self) -> Ordering {
        self.atoms.cmp(&other.atoms)
    }

    fn layout_and_fields(
        &self,
        _fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError> {
        let fields = FieldMap::new()
            .with("ai", self.atoms[0])
            .with("aj", self.atoms[1]);
        Ok((&EXCLUSION_LAYOUT, fields))
    }

    fn effective_header(&self, _fallback: Option<Potential>) -> Option<&'static str> {
        Some(EXCLUSION_LAYOUT.header)
    }
}

/// Three bonded atoms with an optional equilibrium angle in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Angle {
    pub atoms: [u32; 3],
    pub angle: Option<f64>,
    pub potential: Option<Potential>,
}

impl Angle {
    pub fn new(first: u32, second: u32, third: u32) -> Self {
        Self {
            atoms: [first, second, third],
            angle: None,
            potential: None,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_potential(mut self, potential: Potential) -> Self {
        self.potential = Some(potential);
        self
    }
}

impl AtomGroup for Angle {
    fn atoms(&self) -> &[u32] {
        &self.atoms
    }

    fn geometry(&self) -> Option<f64> {
        self.angle
    }

    fn potential(&self) -> Option<Potential> {
        self.potential
    }
}

impl Entity for Angle {
    const KIND: EntityKind = EntityKind::Angle;

    fn from_values(values: &[Value]) -> Result<Self, CollectionError> {
        if values.len() > 4 {
            return Err(CollectionError::uncoercible(Self::KIND, values));
        }
        Ok(Self {
            atoms: indices(Self::KIND, values)?,
            angle: optional_geometry(Self::KIND, values, 3)?,
            potential: None,
        })
    }

    fn intrinsic_cmp(&self, other: &Self) -> Ordering {
        self.atoms.cmp(&other.atoms)
    }

    fn potential(&self) -> Option<Potential> {
        self.potential
    }

    fn layout_and_fields(
        &self,
        fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError> {
        group_layout_and_fields(self, fallback)
    }
}

/// Four consecutive atoms with an optional dihedral angle in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct Dihedral {
    pub atoms: [u32; 4],
    pub angle: Option<f64>,
    pub potential: Option<Potential>,
}

impl Dihedral {
    pub fn new(first: u32, second: u32, third: u32, fourth: u32) -> Self {
        Self {
            atoms: [first, second, third, fourth],
            angle: None,
            potential: None,
        }
    }

    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn with_potential(mut self, potential: Potential) -> Self {
        self.potential = Some(potential);
        self
    }
}

impl AtomGroup for Dihedral {
    fn atoms(&self) -> &[u32] {
        &self.atoms
    }

    fn geometry(&self) -> Option<f64> {
        self.angle
    }

    fn potential(&self) -> Option<Potential> {
        self.potential
    }
}

impl Entity for Dihedral {
    const KIND: EntityKind = EntityKind::Dihedral;

    fn from_values(values: &[Value]) -> Result<Self, CollectionError> {
        if values.len() > 5 {
            return Err(CollectionError::uncoercible(Self::KIND, values));
        }
        Ok(Self {
            atoms: indices(Self::KIND, values)?,
            angle: optional_geometry(Self::KIND, values, 4)?,
            potential: None,
        })
    }

    fn intrinsic_cmp(&self, other: &Self) -> Ordering {
        self.atoms.cmp(&other.atoms)
    }

    fn potential(&self) -> Option<Potential> {
        self.potential
    }

    fn layout_and_fields(
        &self,
        fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError> {
        group_layout_and_fields(self, fallback)
    }
}
