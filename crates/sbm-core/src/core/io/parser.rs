use super::sections::SectionKind;
use super::tokenizer::{Line, classify};
use crate::core::format::value::{Value, coerce};
use crate::core::models::atom::{ATOM_TEXT_COLUMNS, ATOM_TYPE_TEXT_COLUMNS, Atom, AtomType};
use crate::core::models::collection::TypedCollection;
use crate::core::models::entity::Entity;
use crate::core::models::entry::{AnchoredEntry, Comment, GenericEntry, Row};
use crate::core::models::group::{Angle, Dihedral, Exclusion, Pair};
use crate::core::potentials::Potential;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::{debug, trace, warn};

#[derive(Debug, Clone, PartialEq, Error)]
#[error("Parse error on line {line} in section [ {section} ]: {kind}")]
pub struct ParseError {
    pub line: usize,
    pub section: SectionKind,
    pub kind: ParseErrorKind,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("expected at least {expected} fields but found {found}")]
    TooFewFields { expected: usize, found: usize },
}

/// Rows of one typed section: the entities plus the rows kept untyped, each
/// anchored to the number of entities read before it.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBody<T: Entity> {
    pub entries: TypedCollection<T>,
    pub passthrough: Vec<AnchoredEntry>,
}

impl<T: Entity> Default for SectionBody<T> {
    fn default() -> Self {
        Self {
            entries: TypedCollection::new(),
            passthrough: Vec::new(),
        }
    }
}

impl<T: Entity> SectionBody<T> {
    fn place(&mut self, entity: Option<T>, generic: impl FnOnce() -> GenericEntry) {
        match entity {
            Some(entity) => self.entries.append(entity),
            None => self.keep(generic()),
        }
    }

    fn keep(&mut self, entry: GenericEntry) {
        self.passthrough.push(AnchoredEntry::new(self.entries.len(), entry));
    }
}

/// Everything read from a topology text, section by section.
///
/// Repeated sections are merged in order of appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTopology {
    /// Comments, directives and stray rows before the first section header.
    pub preamble: Vec<Row>,
    pub atom_types: SectionBody<AtomType>,
    pub atoms: SectionBody<Atom>,
    pub pairs: SectionBody<Pair>,
    pub bonds: SectionBody<Pair>,
    pub exclusions: SectionBody<Exclusion>,
    pub angles: SectionBody<Angle>,
    pub dihedrals: SectionBody<Dihedral>,
    /// `defaults`, `moleculetype`, `system` and `molecules`, when present.
    pub declarative: BTreeMap<SectionKind, Vec<Row>>,
    /// Sections the engine does not model, by name in order of first appearance.
    pub unknown: Vec<(String, Vec<Row>)>,
}

#[derive(Debug, Clone, Copy)]
enum Cursor {
    Preamble,
    Known(SectionKind),
    Unknown(usize),
}

fn is_typed(kind: SectionKind) -> bool {
    matches!(
        kind,
        SectionKind::AtomTypes
            | SectionKind::Atoms
            | SectionKind::Pairs
            | SectionKind::Bonds
            | SectionKind::Exclusions
            | SectionKind::Angles
            | SectionKind::Dihedrals
    )
}

fn text_columns(kind: SectionKind) -> &'static [usize] {
    match kind {
        SectionKind::Atoms => &ATOM_TEXT_COLUMNS,
        SectionKind::AtomTypes => &ATOM_TYPE_TEXT_COLUMNS,
        _ => &[],
    }
}

fn coerce_row(tokens: &[&str], text_columns: &[usize]) -> Vec<Value> {
    tokens
        .iter()
        .enumerate()
        .map(|(i, token)| {
            if text_columns.contains(&i) {
                Value::Str(token.to_string())
            } else {
                coerce(token)
            }
        })
        .collect()
}

fn require(
    line: usize,
    section: SectionKind,
    found: usize,
    expected: usize,
) -> Result<(), ParseError> {
    if found < expected {
        return Err(ParseError {
            line,
            section,
            kind: ParseErrorKind::TooFewFields { expected, found },
        });
    }
    Ok(())
}

fn tag_at(values: &[Value], position: usize) -> Option<i64> {
    values.get(position).and_then(Value::as_int)
}

fn build<T: Entity>(section: SectionKind, line: usize, values: &[Value]) -> Option<T> {
    match T::from_values(values) {
        Ok(entity) => Some(entity),
        Err(err) => {
            warn!(
                line,
                section = %section,
                error = %err,
                "Keeping malformed row as a generic entry"
            );
            None
        }
    }
}

/// Builds a group from the index columns plus the geometry column and binds it.
fn build_group<T: Entity>(
    section: SectionKind,
    line: usize,
    values: &[Value],
    required: usize,
    positions: &[usize],
    bind: impl FnOnce(T) -> T,
) -> Result<Option<T>, ParseError> {
    require(line, section, values.len(), required)?;
    let picked: Vec<Value> = positions.iter().map(|&i| values[i].clone()).collect();
    Ok(build::<T>(section, line, &picked).map(bind))
}

fn unrecognized(section: SectionKind, line: usize, tag: Option<i64>) {
    debug!(
        line,
        section = %section,
        ?tag,
        "Unrecognized function type, keeping row as a generic entry"
    );
}

fn route_atom(line: usize, values: &[Value]) -> Result<Option<Atom>, ParseError> {
    require(line, SectionKind::Atoms, values.len(), 8)?;
    Ok(build(SectionKind::Atoms, line, &values[..8]))
}

fn route_atom_type(line: usize, values: &[Value]) -> Result<Option<AtomType>, ParseError> {
    require(line, SectionKind::AtomTypes, values.len(), 6)?;
    Ok(build(SectionKind::AtomTypes, line, &values[..6]))
}

fn route_exclusion(line: usize, values: &[Value]) -> Result<Option<Exclusion>, ParseError> {
    require(line, SectionKind::Exclusions, values.len(), 2)?;
    if values.len() > 2 {
        warn!(
            line,
            fields = values.len(),
            "Exclusion lists more than two atoms, keeping row as a generic entry"
        );
        return Ok(None);
    }
    Ok(build(SectionKind::Exclusions, line, values))
}

fn route_pair(line: usize, values: &[Value]) -> Result<Option<Pair>, ParseError> {
    let potential = match tag_at(values, 2) {
        Some(5) => Potential::Gaussian,
        Some(6) => Potential::CombinedGaussian,
        tag => {
            unrecognized(SectionKind::Pairs, line, tag);
            return Ok(None);
        }
    };
    build_group(SectionKind::Pairs, line, values, 5, &[0, 1, 4], |pair: Pair| {
        pair.with_potential(potential)
    })
}

fn route_bond(line: usize, values: &[Value]) -> Result<Option<Pair>, ParseError> {
    match tag_at(values, 2) {
        Some(1) => build_group(SectionKind::Bonds, line, values, 4, &[0, 1, 3], |pair: Pair| {
            pair.with_potential(Potential::Bond)
        }),
        tag => {
            unrecognized(SectionKind::Bonds, line, tag);
            Ok(None)
        }
    }
}

fn route_angle(line: usize, values: &[Value]) -> Result<Option<Angle>, ParseError> {
    match tag_at(values, 3) {
        Some(1) => build_group(
            SectionKind::Angles,
            line,
            values,
            5,
            &[0, 1, 2, 4],
            |angle: Angle| angle.with_potential(Potential::Angle),
        ),
        tag => {
            unrecognized(SectionKind::Angles, line, tag);
            Ok(None)
        }
    }
}

fn route_dihedral(line: usize, values: &[Value]) -> Result<Option<Dihedral>, ParseError> {
    const POSITIONS: [usize; 5] = [0, 1, 2, 3, 5];
    let section = SectionKind::Dihedrals;
    let potential = match tag_at(values, 4) {
        Some(1) => {
            require(line, section, values.len(), 8)?;
            match tag_at(values, 7) {
                Some(1) => Potential::ImproperDihedral,
                Some(3) => Potential::Dihedral,
                multiplicity => {
                    debug!(
                        line,
                        ?multiplicity,
                        "Unrecognized dihedral multiplicity, keeping row as a generic entry"
                    );
                    return Ok(None);
                }
            }
        }
        Some(2) => Potential::AllAtomDihedral,
        tag => {
            unrecognized(section, line, tag);
            return Ok(None);
        }
    };
    build_group(section, line, values, 6, &POSITIONS, |dihedral: Dihedral| {
        dihedral.with_potential(potential)
    })
}

struct Parser {
    parsed: ParsedTopology,
    cursor: Cursor,
}

impl Parser {
    fn enter(&mut self, name: &str, line: usize) {
        self.cursor = match SectionKind::from_name(name) {
            Some(kind) => {
                if !is_typed(kind) {
                    self.parsed.declarative.entry(kind).or_default();
                }
                Cursor::Known(kind)
            }
            None => {
                let position = self.parsed.unknown.iter().position(|(n, _)| n == name);
                let index = position.unwrap_or_else(|| {
                    self.parsed.unknown.push((name.to_string(), Vec::new()));
                    self.parsed.unknown.len() - 1
                });
                debug!(line, section = name, "Keeping unknown section verbatim");
                Cursor::Unknown(index)
            }
        };
        trace!(line, section = name, "Entered section");
    }

    /// The row list a comment or untyped row goes to, or `None` inside a typed section.
    fn rows(&mut self) -> Option<&mut Vec<Row>> {
        match self.cursor {
            Cursor::Preamble => Some(&mut self.parsed.preamble),
            Cursor::Unknown(index) => Some(&mut self.parsed.unknown[index].1),
            Cursor::Known(kind) if is_typed(kind) => None,
            Cursor::Known(kind) => Some(self.parsed.declarative.entry(kind).or_default()),
        }
    }

    fn comment(&mut self, text: &str, line: usize) {
        match self.rows() {
            Some(rows) => rows.push(Row::Comment(Comment::new(text))),
            None => trace!(line, "Dropping comment inside a typed section"),
        }
    }

    fn directive(&mut self, text: &str, line: usize) {
        let entry = GenericEntry::from_line(Vec::new(), None, text);
        match self.cursor {
            Cursor::Known(kind) if is_typed(kind) => {
                warn!(
                    line,
                    section = %kind,
                    directive = text,
                    "Directive inside a typed section, keeping its rows in source order"
                );
                self.typed_passthrough(kind, entry);
            }
            _ => {
                if let Some(rows) = self.rows() {
                    rows.push(Row::Entry(entry));
                }
            }
        }
    }

    fn typed_passthrough(&mut self, kind: SectionKind, entry: GenericEntry) {
        let parsed = &mut self.parsed;
        match kind {
            SectionKind::AtomTypes => parsed.atom_types.keep(entry),
            SectionKind::Atoms => parsed.atoms.keep(entry),
            SectionKind::Pairs => parsed.pairs.keep(entry),
            SectionKind::Bonds => parsed.bonds.keep(entry),
            SectionKind::Exclusions => parsed.exclusions.keep(entry),
            SectionKind::Angles => parsed.angles.keep(entry),
            SectionKind::Dihedrals => parsed.dihedrals.keep(entry),
            _ => {}
        }
    }

    fn data(
        &mut self,
        raw: &str,
        tokens: &[&str],
        comment: Option<&str>,
        line: usize,
    ) -> Result<(), ParseError> {
        let kind = match self.cursor {
            Cursor::Known(kind) if is_typed(kind) => kind,
            cursor => {
                if matches!(cursor, Cursor::Preamble) {
                    warn!(line, "Data row before the first section header");
                }
                let entry = GenericEntry::from_line(
                    coerce_row(tokens, &[]),
                    comment.map(str::to_string),
                    raw,
                );
                if let Some(rows) = self.rows() {
                    rows.push(Row::Entry(entry));
                }
                return Ok(());
            }
        };

        let values = coerce_row(tokens, text_columns(kind));
        let generic =
            || GenericEntry::from_line(values.clone(), comment.map(str::to_string), raw);
        let parsed = &mut self.parsed;
        match kind {
            SectionKind::Atoms => parsed.atoms.place(route_atom(line, &values)?, generic),
            SectionKind::AtomTypes => parsed
                .atom_types
                .place(route_atom_type(line, &values)?, generic),
            SectionKind::Pairs => parsed.pairs.place(route_pair(line, &values)?, generic),
            SectionKind::Bonds => parsed.bonds.place(route_bond(line, &values)?, generic),
            SectionKind::Exclusions => parsed
                .exclusions
                .place(route_exclusion(line, &values)?, generic),
            SectionKind::Angles => parsed.angles.place(route_angle(line, &values)?, generic),
            SectionKind::Dihedrals => parsed
                .dihedrals
                .place(route_dihedral(line, &values)?, generic),
            _ => {}
        }
        Ok(())
    }
}

/// Parses a whole topology text in a single pass.
///
/// Unknown sections, unrecognized function types and malformed numbers never
/// fail the parse; such rows are kept as [`GenericEntry`] values. A typed row
/// with fewer fields than its layout needs is an error.
pub fn parse(text: &str) -> Result<ParsedTopology, ParseError> {
    let mut parser = Parser {
        parsed: ParsedTopology::default(),
        cursor: Cursor::Preamble,
    };

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        match classify(raw) {
            Line::Blank => {}
            Line::SectionHeader(name) => parser.enter(name, line),
            Line::Comment(text) => parser.comment(text, line),
            Line::Directive(text) => parser.directive(text, line),
            Line::Data { tokens, comment } => {
                parser.data(raw.trim_end(), &tokens, comment, line)?
            }
        }
    }

    let parsed = parser.parsed;
    debug!(
        atoms = parsed.atoms.entries.len(),
        pairs = parsed.pairs.entries.len(),
        bonds = parsed.bonds.entries.len(),
        angles = parsed.angles.entries.len(),
        dihedrals = parsed.dihedrals.entries.len(),
        unknown_sections = parsed.unknown.len(),
        "Parsed topology"
    );
    Ok(parsed)
}
