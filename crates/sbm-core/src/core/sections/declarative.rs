use crate::core::format::template::{Align, Layout, Slot};
use crate::core::format::value::Value;
use crate::core::io::sections::{SectionKind, title_line};
use crate::core::models::entry::{GenericEntry, Row};

static DEFAULTS_SLOTS: [Slot; 3] = [
    Slot::int("", "nbfunc", 12),
    Slot::int(" ", "comb-rule", 12),
    Slot::text(" ", "gen-pairs", 0, Align::Left),
];

pub static DEFAULTS_LAYOUT: Layout =
    Layout::new(";     nbfunc    comb-rule gen-pairs", &DEFAULTS_SLOTS);

static MOLECULE_TYPE_SLOTS: [Slot; 2] = [
    Slot::text("", "name", 23, Align::Left),
    Slot::int(" ", "nrexcl", 0),
];

pub static MOLECULE_TYPE_LAYOUT: Layout =
    Layout::new(";name                   nrexcl", &MOLECULE_TYPE_SLOTS);

static SYSTEM_SLOTS: [Slot; 1] = [Slot::text("", "name", 0, Align::Left)];

pub static SYSTEM_LAYOUT: Layout = Layout::new(";name", &SYSTEM_SLOTS);

static MOLECULES_SLOTS: [Slot; 2] = [
    Slot::text("", "name", 16, Align::Left),
    Slot::int(" ", "#molec", 0),
];

pub static MOLECULES_LAYOUT: Layout = Layout::new(";name            #molec", &MOLECULES_SLOTS);

fn layout_for(kind: SectionKind) -> Option<&'static Layout> {
    match kind {
        SectionKind::Defaults => Some(&DEFAULTS_LAYOUT),
        SectionKind::MoleculeType => Some(&MOLECULE_TYPE_LAYOUT),
        SectionKind::System => Some(&SYSTEM_LAYOUT),
        SectionKind::Molecules => Some(&MOLECULES_LAYOUT),
        _ => None,
    }
}

/// A section holding a small table of untyped rows: `defaults`,
/// `moleculetype`, `system`, `molecules`, or a section the engine does not know.
#[derive(Debug, Clone, PartialEq)]
pub struct DeclarativeSection {
    title: String,
    layout: Option<&'static Layout>,
    rows: Vec<Row>,
}

impl DeclarativeSection {
    pub fn new(kind: SectionKind, rows: Vec<Row>) -> Self {
        Self {
            title: kind.title().to_string(),
            layout: layout_for(kind),
            rows,
        }
    }

    /// A section written back exactly as read, with no header of its own.
    pub fn unknown(title: impl Into<String>, rows: Vec<Row>) -> Self {
        Self {
            title: title.into(),
            layout: None,
            rows,
        }
    }

    pub fn defaults(nbfunc: i64, comb_rule: i64, gen_pairs: &str) -> Self {
        Self::single(
            SectionKind::Defaults,
            vec![nbfunc.into(), comb_rule.into(), gen_pairs.into()],
        )
    }

    pub fn molecule_type(name: &str, nrexcl: i64) -> Self {
        Self::single(SectionKind::MoleculeType, vec![name.into(), nrexcl.into()])
    }

    pub fn system(name: &str) -> Self {
        Self::single(SectionKind::System, vec![name.into()])
    }

    pub fn molecules(name: &str, count: i64) -> Self {
        Self::single(SectionKind::Molecules, vec![name.into(), count.into()])
    }

    fn single(kind: SectionKind, values: Vec<Value>) -> Self {
        Self::new(kind, vec![Row::Entry(GenericEntry::new(values))])
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub fn set_rows(&mut self, rows: Vec<Row>) {
        self.rows = rows;
    }

    /// Non-comment rows in order.
    pub fn entries(&self) -> impl Iterator<Item = &GenericEntry> {
        self.rows.iter().filter_map(Row::as_entry)
    }

    pub fn first_entry(&self) -> Option<&GenericEntry> {
        self.entries().next()
    }

    /// Renders the title, the header unless the rows carry their own comment
    /// lines, and every row.
    pub fn render(&self) -> String {
        let mut lines = vec![title_line(&self.title)];
        if let Some(layout) = self.layout {
            if !self.rows.iter().any(Row::is_comment) {
                lines.push(layout.header.to_string());
            }
        }
        let format = self.layout.map(|layout| &layout.format);
        lines.extend(self.rows.iter().map(|row| row.write(format)));
        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::entry::Comment;

    #[test]
    fn defaults_render_right_aligned_columns() {
        assert_eq!(
            DeclarativeSection::defaults(1, 1, "no").render(),
            "[ defaults ]\n;     nbfunc    comb-rule gen-pairs\n           1            1 no"
        );
    }

    #[test]
    fn molecule_type_and_molecules_pad_the_name() {
        assert_eq!(
            DeclarativeSection::molecule_type("Macromolecule", 3).render(),
            "[ moleculetype ]\n;name                   nrexcl\nMacromolecule           3"
        );
        assert_eq!(
            DeclarativeSection::molecules("Macromolecule", 1).render(),
            "[ molecules ]\n;name            #molec\nMacromolecule    1"
        );
    }

    #[test]
    fn system_renders_the_bare_name() {
        assert_eq!(
            DeclarativeSection::system("Macromolecule").render(),
            "[ system ]\n;name\nMacromolecule"
        );
    }

    #[test]
    fn rows_with_their_own_comments_suppress_the_default_header() {
        let section = DeclarativeSection::new(
            SectionKind::System,
            vec![
                Row::Comment(Comment::new("; system name")),
                Row::Entry(GenericEntry::from_line(vec![Value::from("Protein")], None, "Protein")),
            ],
        );
        assert_eq!(section.render(), "[ system ]\n; system name\nProtein");
        assert_eq!(section.first_entry().unwrap().values(), &[Value::from("Protein")]);
    }

    #[test]
    fn unknown_sections_write_rows_verbatim() {
        let section = DeclarativeSection::unknown(
            "position_restraints",
            vec![Row::Entry(GenericEntry::from_line(
                vec![Value::Int(1), Value::Int(1)],
                None,
                "  1  1  1000 1000 1000",
            ))],
        );
        assert_eq!(
            section.render(),
            "[ position_restraints ]\n  1  1  1000 1000 1000"
        );
    }
}
