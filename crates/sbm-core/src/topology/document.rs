use super::config::{ConfigError, TopologyConfig};
use super::error::TopologyError;
use crate::core::io::parser::{self, ParsedTopology, SectionBody};
use crate::core::io::sections::SectionKind;
use crate::core::models::atom::{ATOM_LAYOUT, ATOM_TYPE_LAYOUT, Atom, AtomType};
use crate::core::models::collection::TypedCollection;
use crate::core::models::entity::Entity;
use crate::core::models::entry::{AnchoredEntry, Row};
use crate::core::models::group::{Angle, Dihedral, EXCLUSION_LAYOUT, Exclusion, Pair};
use crate::core::potentials::Potential;
use crate::core::sections::declarative::DeclarativeSection;
use crate::core::sections::typed::TypedSection;
use std::io::{BufRead, Write};
use std::str::FromStr;
use tracing::{debug, info, instrument};

/// An in-memory topology: one section model per section of the file.
///
/// The pairs section renders unbound pairs through the configured pair
/// potential. Replacing the pairs or the pair potential rebuilds that section
/// in the same call, so the collection and its rendering state never diverge.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    config: TopologyConfig,
    preamble: Vec<Row>,
    defaults: DeclarativeSection,
    atom_types: TypedSection<AtomType>,
    molecule_type: DeclarativeSection,
    atoms: TypedSection<Atom>,
    pairs: TypedSection<Pair>,
    bonds: TypedSection<Pair>,
    exclusions: TypedSection<Exclusion>,
    angles: TypedSection<Angle>,
    dihedrals: TypedSection<Dihedral>,
    extra_sections: Vec<DeclarativeSection>,
    system: DeclarativeSection,
    molecules: DeclarativeSection,
}

fn group_section<T: Entity>(
    kind: SectionKind,
    potential: Potential,
    fortran: bool,
) -> TypedSection<T> {
    TypedSection::with_default_potential(kind.title(), potential).fortran_notation(fortran)
}

fn fill<T: Entity>(section: TypedSection<T>, body: SectionBody<T>) -> TypedSection<T> {
    section
        .with_entries(body.entries)
        .with_passthrough(body.passthrough)
}

fn render_typed<T: Entity>(section: &TypedSection<T>) -> Result<String, TopologyError> {
    section.render().map_err(|source| TopologyError::Render {
        section: section.title(),
        source,
    })
}

impl Default for Topology {
    fn default() -> Self {
        Self::from_valid_config(TopologyConfig::default())
    }
}

impl Topology {
    /// An empty document with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TopologyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: TopologyConfig) -> Self {
        let fortran = config.fortran_notation;
        Self {
            preamble: Vec::new(),
            defaults: DeclarativeSection::defaults(
                config.nbfunc,
                config.comb_rule,
                &config.gen_pairs,
            ),
            atom_types: TypedSection::new(SectionKind::AtomTypes.title(), ATOM_TYPE_LAYOUT.header),
            molecule_type: DeclarativeSection::molecule_type(&config.molecule_name, config.nrexcl),
            atoms: TypedSection::new(SectionKind::Atoms.title(), ATOM_LAYOUT.header),
            pairs: group_section(SectionKind::Pairs, config.pair_potential, fortran),
            bonds: group_section(SectionKind::Bonds, Potential::Bond, fortran),
            exclusions: TypedSection::new(SectionKind::Exclusions.title(), EXCLUSION_LAYOUT.header),
            angles: group_section(SectionKind::Angles, Potential::Angle, fortran),
            dihedrals: group_section(SectionKind::Dihedrals, Potential::Dihedral, fortran),
            extra_sections: Vec::new(),
            system: DeclarativeSection::system(&config.system_name),
            molecules: DeclarativeSection::molecules(&config.molecule_name, config.molecule_count),
            config,
        }
    }

    fn assemble(config: TopologyConfig, parsed: ParsedTopology) -> Self {
        let mut topology = Self::from_valid_config(config);
        let ParsedTopology {
            preamble,
            atom_types,
            atoms,
            pairs,
            bonds,
            exclusions,
            angles,
            dihedrals,
            declarative,
            unknown,
        } = parsed;

        topology.preamble = preamble;
        topology.atom_types = fill(topology.atom_types, atom_types);
        topology.atoms = fill(topology.atoms, atoms);
        topology.pairs = fill(topology.pairs, pairs);
        topology.bonds = fill(topology.bonds, bonds);
        topology.exclusions = fill(topology.exclusions, exclusions);
        topology.angles = fill(topology.angles, angles);
        topology.dihedrals = fill(topology.dihedrals, dihedrals);

        for (kind, rows) in declarative {
            let section = DeclarativeSection::new(kind, rows);
            match kind {
                SectionKind::Defaults => topology.defaults = section,
                SectionKind::MoleculeType => topology.molecule_type = section,
                SectionKind::System => topology.system = section,
                SectionKind::Molecules => topology.molecules = section,
                _ => {}
            }
        }
        topology.extra_sections = unknown
            .into_iter()
            .map(|(name, rows)| DeclarativeSection::unknown(name, rows))
            .collect();
        topology
    }

    /// Replaces the whole document with the contents of `text`.
    ///
    /// On error the document is left as it was.
    #[instrument(skip_all, fields(bytes = text.len()))]
    pub fn load(&mut self, text: &str) -> Result<(), TopologyError> {
        let parsed = parser::parse(text)?;
        *self = Self::assemble(self.config.clone(), parsed);
        info!(
            atoms = self.atoms.entries().len(),
            pairs = self.pairs.entries().len(),
            bonds = self.bonds.entries().len(),
            angles = self.angles.entries().len(),
            dihedrals = self.dihedrals.entries().len(),
            "Loaded topology"
        );
        Ok(())
    }

    /// Renders every section in file order, separated by blank lines.
    #[instrument(skip_all)]
    pub fn save(&self) -> Result<String, TopologyError> {
        let mut blocks = Vec::with_capacity(12 + self.extra_sections.len());
        if !self.preamble.is_empty() {
            let preamble: Vec<String> = self.preamble.iter().map(|row| row.write(None)).collect();
            blocks.push(preamble.join("\n"));
        }
        blocks.push(self.defaults.render());
        blocks.push(render_typed(&self.atom_types)?);
        blocks.push(self.molecule_type.render());
        blocks.push(render_typed(&self.atoms)?);
        blocks.push(render_typed(&self.pairs)?);
        blocks.push(render_typed(&self.bonds)?);
        blocks.push(render_typed(&self.exclusions)?);
        blocks.push(render_typed(&self.angles)?);
        blocks.push(render_typed(&self.dihedrals)?);
        blocks.extend(self.extra_sections.iter().map(DeclarativeSection::render));
        blocks.push(self.system.render());
        blocks.push(self.molecules.render());

        let mut text = blocks.join("\n\n");
        text.push('\n');
        debug!(sections = blocks.len(), bytes = text.len(), "Rendered topology");
        Ok(text)
    }

    pub fn read_from(reader: &mut impl BufRead) -> Result<Self, TopologyError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    pub fn write_to(&self, writer: &mut impl Write) -> Result<(), TopologyError> {
        writer.write_all(self.save()?.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    pub fn preamble(&self) -> &[Row] {
        &self.preamble
    }

    pub fn set_preamble(&mut self, rows: Vec<Row>) {
        self.preamble = rows;
    }

    pub fn atom_types(&self) -> &TypedCollection<AtomType> {
        self.atom_types.entries()
    }

    pub fn atom_types_mut(&mut self) -> &mut TypedCollection<AtomType> {
        self.atom_types.entries_mut()
    }

    pub fn set_atom_types(&mut self, atom_types: TypedCollection<AtomType>) {
        self.atom_types.set_entries(atom_types);
    }

    pub fn atoms(&self) -> &TypedCollection<Atom> {
        self.atoms.entries()
    }

    pub fn atoms_mut(&mut self) -> &mut TypedCollection<Atom> {
        self.atoms.entries_mut()
    }

    pub fn set_atoms(&mut self, atoms: TypedCollection<Atom>) {
        self.atoms.set_entries(atoms);
    }

    pub fn pairs(&self) -> &TypedCollection<Pair> {
        self.pairs.entries()
    }

    pub fn pairs_mut(&mut self) -> &mut TypedCollection<Pair> {
        self.pairs.entries_mut()
    }

    pub fn pairs_section(&self) -> &TypedSection<Pair> {
        &self.pairs
    }

    /// Replaces the pairs and rebuilds the pairs section around the current
    /// pair potential. Untyped rows read from text are kept.
    pub fn set_pairs(&mut self, pairs: TypedCollection<Pair>) {
        let passthrough = std::mem::take(self.pairs.passthrough_mut());
        self.pairs = self.pairs_section_for(self.config.pair_potential, pairs, passthrough);
    }

    pub fn pair_potential(&self) -> Potential {
        self.config.pair_potential
    }

    /// Selects the potential unbound pairs render through and rebuilds the
    /// pairs section with it.
    pub fn set_pair_potential(&mut self, potential: Potential) -> Result<(), ConfigError> {
        if potential.arity() != 2 {
            return Err(ConfigError::InvalidPairPotential(potential));
        }
        let pairs = std::mem::take(self.pairs.entries_mut());
        let passthrough = std::mem::take(self.pairs.passthrough_mut());
        self.pairs = self.pairs_section_for(potential, pairs, passthrough);
        self.config.pair_potential = potential;
        debug!(%potential, "Rebuilt pairs section");
        Ok(())
    }

    fn pairs_section_for(
        &self,
        potential: Potential,
        pairs: TypedCollection<Pair>,
        passthrough: Vec<AnchoredEntry>,
    ) -> TypedSection<Pair> {
        group_section(SectionKind::Pairs, potential, self.config.fortran_notation)
            .with_entries(pairs)
            .with_passthrough(passthrough)
    }

    pub fn bonds(&self) -> &TypedCollection<Pair> {
        self.bonds.entries()
    }

    pub fn bonds_mut(&mut self) -> &mut TypedCollection<Pair> {
        self.bonds.entries_mut()
    }

    pub fn set_bonds(&mut self, bonds: TypedCollection<Pair>) {
        self.bonds.set_entries(bonds);
    }

    pub fn exclusions(&self) -> &TypedCollection<Exclusion> {
        self.exclusions.entries()
    }

    pub fn exclusions_mut(&mut self) -> &mut TypedCollection<Exclusion> {
        self.exclusions.entries_mut()
    }

    pub fn set_exclusions(&mut self, exclusions: TypedCollection<Exclusion>) {
        self.exclusions.set_entries(exclusions);
    }

    pub fn angles(&self) -> &TypedCollection<Angle> {
        self.angles.entries()
    }

    pub fn angles_mut(&mut self) -> &mut TypedCollection<Angle> {
        self.angles.entries_mut()
    }

    pub fn set_angles(&mut self, angles: TypedCollection<Angle>) {
        self.angles.set_entries(angles);
    }

    pub fn dihedrals(&self) -> &TypedCollection<Dihedral> {
        self.dihedrals.entries()
    }

    pub fn dihedrals_mut(&mut self) -> &mut TypedCollection<Dihedral> {
        self.dihedrals.entries_mut()
    }

    pub fn set_dihedrals(&mut self, dihedrals: TypedCollection<Dihedral>) {
        self.dihedrals.set_entries(dihedrals);
    }

    pub fn defaults(&self) -> &DeclarativeSection {
        &self.defaults
    }

    pub fn set_defaults(&mut self, nbfunc: i64, comb_rule: i64, gen_pairs: &str) {
        self.defaults = DeclarativeSection::defaults(nbfunc, comb_rule, gen_pairs);
    }

    pub fn molecule_type(&self) -> &DeclarativeSection {
        &self.molecule_type
    }

    pub fn set_molecule_type(&mut self, name: &str, nrexcl: i64) {
        self.molecule_type = DeclarativeSection::molecule_type(name, nrexcl);
    }

    pub fn system(&self) -> &DeclarativeSection {
        &self.system
    }

    /// The system title: the tokens of the first `[ system ]` row.
    pub fn system_name(&self) -> Option<String> {
        self.system.first_entry().map(|entry| {
            entry
                .values()
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" ")
        })
    }

    pub fn set_system_name(&mut self, name: &str) {
        self.system = DeclarativeSection::system(name);
    }

    pub fn molecules(&self) -> &DeclarativeSection {
        &self.molecules
    }

    pub fn set_molecules(&mut self, name: &str, count: i64) {
        self.molecules = DeclarativeSection::molecules(name, count);
    }

    /// Sections the engine does not model, in order of first appearance.
    pub fn extra_sections(&self) -> &[DeclarativeSection] {
        &self.extra_sections
    }

    pub fn extra_sections_mut(&mut self) -> &mut Vec<DeclarativeSection> {
        &mut self.extra_sections
    }
}

impl FromStr for Topology {
    type Err = TopologyError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let mut topology = Self::new();
        topology.load(text)?;
        Ok(topology)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::parser::ParseErrorKind;
    use crate::core::potentials::PotentialError;
    use std::io::{self, BufReader};
    use std::sync::{Arc, Mutex};

    const BOND_LINE: &str = "1 2 1 3.80269060E-01 2.00000000E+04";

    fn plain() -> Topology {
        Topology::with_config(
            TopologyConfig::builder()
                .fortran_notation(false)
                .build()
                .unwrap(),
        )
        .unwrap()
    }

    fn tokens(text: &str) -> Vec<&str> {
        text.split_whitespace().collect()
    }

    fn section<'a>(text: &'a str, title: &str) -> &'a str {
        let start = text.find(&format!("[ {} ]", title)).unwrap();
        let rest = &text[start..];
        let end = rest.find("\n\n").unwrap_or(rest.len());
        &rest[..end]
    }

    #[test]
    fn bond_line_parses_and_renders_back_unchanged() {
        let topology: Topology = format!("[ bonds ]\n{}\n", BOND_LINE).parse().unwrap();
        let bond = topology.bonds().get(0).unwrap();
        assert_eq!(bond.atoms, [1, 2]);
        assert_eq!(bond.distance, Some(0.38026906));
        assert_eq!(bond.potential, Some(Potential::Bond));

        let rendered = Potential::Bond.render(bond).unwrap();
        assert_eq!(tokens(&rendered), tokens(BOND_LINE));
    }

    #[test]
    fn save_applies_fortran_notation_to_potential_lines() {
        let topology: Topology = format!("[ bonds ]\n{}\n", BOND_LINE).parse().unwrap();
        let text = topology.save().unwrap();
        assert_eq!(
            section(&text, "bonds"),
            concat!(
                "[ bonds ]\n",
                ";   ai     aj func         r0(nm)                Kb\n",
                "     1      2 1  0.380269060E+00 0.200000000E+05",
            )
        );
    }

    #[test]
    fn save_without_fortran_notation_keeps_plain_exponents() {
        let mut topology = plain();
        topology.load(&format!("[ bonds ]\n{}\n", BOND_LINE)).unwrap();
        let text = topology.save().unwrap();
        assert!(text.contains("     1      2 1  3.80269060E-01 2.00000000E+04"));
    }

    #[test]
    fn empty_document_writes_every_default_section_in_order() {
        let text = Topology::new().save().unwrap();
        let titles: Vec<_> = text.lines().filter(|line| line.starts_with('[')).collect();
        assert_eq!(
            titles,
            vec![
                "[ defaults ]",
                "[ atomtypes ]",
                "[ moleculetype ]",
                "[ atoms ]",
                "[ pairs ]",
                "[ bonds ]",
                "[ exclusions ]",
                "[ angles ]",
                "[ dihedrals ]",
                "[ system ]",
                "[ molecules ]",
            ]
        );
        assert_eq!(
            section(&text, "pairs"),
            "[ pairs ]\n;   ai     aj ftype             c6                c12"
        );
        assert_eq!(section(&text, "system"), "[ system ]\n;name\nMacromolecule");
        assert!(text.ends_with("Macromolecule    1\n"));
    }

    #[test]
    fn alternating_pair_potentials_group_under_one_header_each() {
        let text = "\
[ pairs ]
1 4 5 1.0 0.50 0.08
1 5 6 1.0 0.52 0.08 1.6E-05
2 6 5 1.0 0.61 0.09
2 7 6 1.0 0.47 0.07 1.6E-05
";
        let topology: Topology = text.parse().unwrap();
        let saved = topology.save().unwrap();
        let pairs = section(&saved, "pairs");
        let headers: Vec<_> = pairs.lines().filter(|l| l.starts_with(';')).collect();
        assert_eq!(headers.len(), 2);
        assert!(headers.contains(&Potential::Gaussian.header()));
        assert!(headers.contains(&Potential::CombinedGaussian.header()));
        assert_eq!(pairs.lines().count(), 1 + 2 + 4);
    }

    #[test]
    fn loading_the_same_text_twice_yields_equal_documents() {
        let text = "\
[ atoms ]
     1 CA       1  MET  CA      1    0.000    1.000
[ bonds ]
1 2 1 0.38 2.0E+04
[ angles ]
1 2 3 1 109.5 40.0
";
        let first: Topology = text.parse().unwrap();
        let second: Topology = text.parse().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.save().unwrap(), second.save().unwrap());
    }

    #[test]
    fn saved_documents_load_back_to_the_same_collections() {
        let mut topology = Topology::new();
        topology.set_atoms(
            vec![
                Atom::new(1, "CA", "CA").with_residue(1, "MET"),
                Atom::new(2, "CA", "CA").with_residue(2, "LYS").with_mass(1.5),
            ]
            .into(),
        );
        topology.set_bonds(
            vec![
                Pair::new(1, 2)
                    .with_distance(0.38)
                    .with_potential(Potential::Bond),
            ]
            .into(),
        );
        topology.set_pairs(
            vec![Pair::new(1, 2).with_distance(0.55).with_potential(Potential::Gaussian)].into(),
        );
        topology.set_exclusions(vec![Exclusion::new(1, 2)].into());
        topology.set_angles(
            vec![Angle::new(1, 2, 3).with_angle(109.5).with_potential(Potential::Angle)].into(),
        );
        topology.set_dihedrals(
            vec![
                Dihedral::new(1, 2, 3, 4).with_angle(-60.0).with_potential(Potential::Dihedral),
                Dihedral::new(1, 2, 3, 4)
                    .with_angle(15.0)
                    .with_potential(Potential::ImproperDihedral),
                Dihedral::new(2, 3, 4, 5)
                    .with_angle(180.0)
                    .with_potential(Potential::AllAtomDihedral),
            ]
            .into(),
        );

        let reloaded: Topology = topology.save().unwrap().parse().unwrap();
        assert_eq!(reloaded.atoms(), topology.atoms());
        assert_eq!(reloaded.bonds(), topology.bonds());
        assert_eq!(reloaded.pairs(), topology.pairs());
        assert_eq!(reloaded.exclusions(), topology.exclusions());
        assert_eq!(reloaded.angles(), topology.angles());
        assert_eq!(
            reloaded.dihedrals().as_slice().len(),
            topology.dihedrals().as_slice().len()
        );
        for dihedral in topology.dihedrals() {
            assert!(reloaded.dihedrals().contains(dihedral));
        }
        assert_eq!(reloaded.save().unwrap(), topology.save().unwrap());
    }

    #[test]
    fn set_pair_potential_rebuilds_the_pairs_section() {
        let mut topology = plain();
        topology.set_pairs(vec![Pair::new(1, 2).with_distance(1.0)].into());
        let text = topology.save().unwrap();
        assert!(section(&text, "pairs").contains("     1      2 1 2.00000000E+00 1.00000000E+00"));

        topology.set_pair_potential(Potential::Gaussian).unwrap();
        assert_eq!(topology.pair_potential(), Potential::Gaussian);
        assert_eq!(
            topology.pairs_section().default_potential(),
            Some(Potential::Gaussian)
        );
        assert_eq!(topology.pairs().len(), 1);
        let text = topology.save().unwrap();
        let pairs = section(&text, "pairs");
        assert!(pairs.contains(Potential::Gaussian.header()));
        assert!(pairs.contains("     1      2 5 1.00000000E+00 1.00000000E+00"));
    }

    #[test]
    fn set_pair_potential_rejects_bonded_potentials() {
        let mut topology = Topology::new();
        let err = topology.set_pair_potential(Potential::Angle).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPairPotential(Potential::Angle)));
        assert_eq!(topology.pair_potential(), Potential::LennardJones);
    }

    #[test]
    fn failed_load_leaves_the_document_untouched() {
        let mut topology: Topology = format!("[ bonds ]\n{}\n", BOND_LINE).parse().unwrap();
        let before = topology.clone();
        let err = topology.load("[ angles ]\n1 2 3 1\n").unwrap_err();
        assert!(matches!(
            err,
            TopologyError::Parse(parser::ParseError {
                line: 2,
                kind: ParseErrorKind::TooFewFields { expected: 5, found: 4 },
                ..
            })
        ));
        assert_eq!(topology, before);
    }

    #[test]
    fn missing_geometry_fails_the_save() {
        let mut topology = Topology::new();
        topology.set_angles(vec![Angle::new(1, 2, 3)].into());
        let err = topology.save().unwrap_err();
        assert!(matches!(
            err,
            TopologyError::Render {
                section: "angles",
                source: PotentialError::MissingDependency { .. }
            }
        ));
    }

    #[test]
    fn declarative_and_unknown_sections_survive_a_round_trip() {
        let text = "\
; written by hand
#include \"sbm.itp\"

[ defaults ]
; nbfunc comb-rule gen-pairs
  1  1  no

[ moleculetype ]
; name nrexcl
CI2  3

[ position_restraints ]
  1  1  1000 1000 1000

[ system ]
; name
Chymotrypsin inhibitor 2

[ molecules ]
; name #molec
CI2  1
";
        let topology: Topology = text.parse().unwrap();
        assert_eq!(topology.system_name().as_deref(), Some("Chymotrypsin inhibitor 2"));
        assert_eq!(topology.extra_sections().len(), 1);

        let saved = topology.save().unwrap();
        assert!(saved.starts_with("; written by hand\n#include \"sbm.itp\"\n\n[ defaults ]"));
        assert_eq!(
            section(&saved, "defaults"),
            "[ defaults ]\n; nbfunc comb-rule gen-pairs\n  1  1  no"
        );
        assert_eq!(
            section(&saved, "position_restraints"),
            "[ position_restraints ]\n  1  1  1000 1000 1000"
        );
        assert!(saved.find("[ position_restraints ]") < saved.find("[ system ]"));
        assert!(saved.find("[ dihedrals ]") < saved.find("[ position_restraints ]"));

        let reloaded: Topology = saved.parse().unwrap();
        assert_eq!(reloaded, topology);
    }

    #[test]
    fn declarative_setters_replace_section_content() {
        let mut topology = Topology::new();
        topology.set_system_name("Protein");
        topology.set_molecules("Protein", 2);
        topology.set_molecule_type("Protein", 4);
        topology.set_defaults(1, 2, "yes");
        let text = topology.save().unwrap();
        assert_eq!(topology.system_name().as_deref(), Some("Protein"));
        assert!(section(&text, "molecules").ends_with("Protein          2"));
        assert!(section(&text, "moleculetype").ends_with("Protein                 4"));
        assert!(section(&text, "defaults").ends_with("           1            2 yes"));
    }

    #[test]
    fn read_from_and_write_to_use_streams() {
        let input = format!("[ bonds ]\n{}\n", BOND_LINE);
        let mut reader = BufReader::new(input.as_bytes());
        let topology = Topology::read_from(&mut reader).unwrap();
        let mut output = Vec::new();
        topology.write_to(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), topology.save().unwrap());
    }

    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn degraded_rows_are_reported_as_warnings() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();

        let topology = tracing::subscriber::with_default(subscriber, || {
            "[ bonds ]\n0 2 1 0.38 2.0E+04\n".parse::<Topology>().unwrap()
        });

        assert!(topology.bonds().is_empty());
        let logs = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(logs.contains("Keeping malformed row as a generic entry"));
        assert!(logs.contains("WARN"));
        let saved = topology.save().unwrap();
        assert!(section(&saved, "bonds").ends_with("0 2 1 0.38 2.0E+04"));
    }

    #[test]
    fn section_names_differing_in_case_are_kept_verbatim() {
        let topology: Topology = format!("[ Bonds ]\n{}\n", BOND_LINE).parse().unwrap();
        assert!(topology.bonds().is_empty());
        assert_eq!(topology.extra_sections().len(), 1);
        assert_eq!(topology.extra_sections()[0].title(), "Bonds");

        let saved = topology.save().unwrap();
        assert_eq!(section(&saved, "Bonds"), format!("[ Bonds ]\n{}", BOND_LINE));
        assert_eq!(saved.parse::<Topology>().unwrap(), topology);
    }

    #[test]
    fn ifdef_blocks_inside_typed_sections_keep_their_entries() {
        let text = "\
[ dihedrals ]
#ifdef FLEXIBLE
2 3 4 5 1 120.0 0.5 3
#endif
1 2 3 4 1 -35.0 1.0 1
";
        let mut topology = plain();
        topology.load(text).unwrap();
        let saved = topology.save().unwrap();
        let lines: Vec<_> = section(&saved, "dihedrals").lines().collect();
        assert_eq!(lines[1], "#ifdef FLEXIBLE");
        assert_eq!(lines[2], Potential::Dihedral.header());
        assert_eq!(&tokens(lines[3])[..5], ["2", "3", "4", "5", "1"]);
        assert_eq!(lines[4], "#endif");
        assert_eq!(&tokens(lines[5])[..5], ["1", "2", "3", "4", "1"]);
        assert_eq!(lines.len(), 6);

        let reloaded: Topology = saved.parse().unwrap();
        assert_eq!(reloaded.dihedrals(), topology.dihedrals());
    }

    #[test]
    fn exclusions_listing_several_atoms_survive_a_save() {
        let topology: Topology = "[ exclusions ]\n1 2 3 4\n".parse().unwrap();
        assert!(topology.exclusions().is_empty());
        let saved = topology.save().unwrap();
        assert!(section(&saved, "exclusions").ends_with("\n1 2 3 4"));
    }
}
