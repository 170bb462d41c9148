use super::atom::{Atom, AtomType};
use super::entry::{Comment, GenericEntry};
use super::group::{Angle, Dihedral, Exclusion, Pair};
use crate::core::format::template::{FieldMap, Layout};
use crate::core::format::value::Value;
use crate::core::potentials::{Potential, PotentialError};
use std::cmp::Ordering;
use std::fmt;
use thiserror::Error;

/// The kind of record a topology line was turned into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Atom,
    AtomType,
    Pair,
    Exclusion,
    Angle,
    Dihedral,
    Generic,
    Comment,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Atom => "Atom",
            Self::AtomType => "AtomType",
            Self::Pair => "Pair",
            Self::Exclusion => "Exclusion",
            Self::Angle => "Angle",
            Self::Dihedral => "Dihedral",
            Self::Generic => "GenericEntry",
            Self::Comment => "Comment",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    #[error("Type mismatch: expected {expected} but received {found}")]
    TypeMismatch {
        expected: EntityKind,
        found: EntityKind,
    },
    #[error("Type mismatch: cannot build {expected} from values [{values}]")]
    Uncoercible { expected: EntityKind, values: String },
    #[error("Index {index} is out of range for a collection of {len} entries")]
    IndexOutOfRange { index: usize, len: usize },
}

impl CollectionError {
    pub(crate) fn uncoercible(expected: EntityKind, values: &[Value]) -> Self {
        let values = values
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        Self::Uncoercible { expected, values }
    }
}

/// Any record the parser can produce, as a closed sum type.
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Atom(Atom),
    AtomType(AtomType),
    Pair(Pair),
    Exclusion(Exclusion),
    Angle(Angle),
    Dihedral(Dihedral),
    Generic(GenericEntry),
    Comment(Comment),
}

impl Entry {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entry::Atom(_) => EntityKind::Atom,
            Entry::AtomType(_) => EntityKind::AtomType,
            Entry::Pair(_) => EntityKind::Pair,
            Entry::Exclusion(_) => EntityKind::Exclusion,
            Entry::Angle(_) => EntityKind::Angle,
            Entry::Dihedral(_) => EntityKind::Dihedral,
            Entry::Generic(_) => EntityKind::Generic,
            Entry::Comment(_) => EntityKind::Comment,
        }
    }
}

/// A record kind that can live in a [`TypedCollection`](super::collection::TypedCollection)
/// and be rendered by a typed section.
pub trait Entity:
    Clone + PartialEq + fmt::Debug + Into<Entry> + TryFrom<Entry, Error = CollectionError>
{
    const KIND: EntityKind;

    /// Builds the entity from a tuple of constructor values, in field order.
    fn from_values(values: &[Value]) -> Result<Self, CollectionError>;

    /// Ordering within a run of entries sharing the same header.
    fn intrinsic_cmp(&self, other: &Self) -> Ordering;

    fn potential(&self) -> Option<Potential> {
        None
    }

    /// Resolves the layout the entity renders through and its field map.
    ///
    /// `fallback` is the section's default potential, used by groups without
    /// one of their own.
    fn layout_and_fields(
        &self,
        fallback: Option<Potential>,
    ) -> Result<(&'static Layout, FieldMap), PotentialError>;

    /// Header of the layout this entry renders through, used to group output.
    fn effective_header(&self, fallback: Option<Potential>) -> Option<&'static str> {
        self.potential().or(fallback).map(Potential::header)
    }
}

macro_rules! entry_variant {
    ($ty:ident) => {
        impl From<$ty> for Entry {
            fn from(value: $ty) -> Self {
                Entry::$ty(value)
            }
        }

        impl TryFrom<Entry> for $ty {
            type Error = CollectionError;

            fn try_from(entry: Entry) -> Result<Self, Self::Error> {
                match entry {
                    Entry::$ty(value) => Ok(value),
                    other => Err(CollectionError::TypeMismatch {
                        expected: EntityKind::$ty,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

entry_variant!(Atom);
entry_variant!(AtomType);
entry_variant!(Pair);
entry_variant!(Exclusion);
entry_variant!(Angle);
entry_variant!(Dihedral);

impl From<GenericEntry> for Entry {
    fn from(value: GenericEntry) -> Self {
        Entry::Generic(value)
    }
}

impl From<Comment> for Entry {
    fn from(value: Comment) -> Self {
        Entry::Comment(value)
    }
}
