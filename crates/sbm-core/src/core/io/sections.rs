use phf::{Map, phf_map};
use std::fmt;

/// Section names the engine understands, in the order a document is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SectionKind {
    Defaults,
    AtomTypes,
    MoleculeType,
    Atoms,
    Pairs,
    Bonds,
    Exclusions,
    Angles,
    Dihedrals,
    System,
    Molecules,
}

#[rustfmt::skip]
static SECTION_KINDS: Map<&'static str, SectionKind> = phf_map! {
    "defaults"     => SectionKind::Defaults,
    "atomtypes"    => SectionKind::AtomTypes,
    "moleculetype" => SectionKind::MoleculeType,
    "atoms"        => SectionKind::Atoms,
    "pairs"        => SectionKind::Pairs,
    "bonds"        => SectionKind::Bonds,
    "exclusions"   => SectionKind::Exclusions,
    "angles"       => SectionKind::Angles,
    "dihedrals"    => SectionKind::Dihedrals,
    "system"       => SectionKind::System,
    "molecules"    => SectionKind::Molecules,
};

impl SectionKind {
    /// Looks up a section by its exact, case-sensitive name.
    pub fn from_name(name: &str) -> Option<Self> {
        SECTION_KINDS.get(name).copied()
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Defaults => "defaults",
            Self::AtomTypes => "atomtypes",
            Self::MoleculeType => "moleculetype",
            Self::Atoms => "atoms",
            Self::Pairs => "pairs",
            Self::Bonds => "bonds",
            Self::Exclusions => "exclusions",
            Self::Angles => "angles",
            Self::Dihedrals => "dihedrals",
            Self::System => "system",
            Self::Molecules => "molecules",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Renders a bracketed section title line.
pub fn title_line(name: &str) -> String {
    format!("[ {} ]", name)
}
