use crate::core::format::fortran::to_fortran_notation;
use crate::core::io::sections::title_line;
use crate::core::models::collection::TypedCollection;
use crate::core::models::entity::Entity;
use crate::core::models::entry::AnchoredEntry;
use crate::core::potentials::{Potential, PotentialError};
use tracing::trace;

/// A section backed by a typed collection.
///
/// Rows the parser could not type (unrecognized function types, malformed
/// indices) are carried as passthrough rows and written after the typed
/// entries. Once a passthrough row is a preprocessor directive, the section
/// is written in source order instead: entries unsorted, each passthrough row
/// back in front of the entry it preceded.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedSection<T: Entity> {
    title: &'static str,
    default_header: &'static str,
    default_potential: Option<Potential>,
    fortran: bool,
    entries: TypedCollection<T>,
    passthrough: Vec<AnchoredEntry>,
}

impl<T: Entity> TypedSection<T> {
    /// A section whose entries render through their own layouts.
    pub fn new(title: &'static str, default_header: &'static str) -> Self {
        Self {
            title,
            default_header,
            default_potential: None,
            fortran: false,
            entries: TypedCollection::new(),
            passthrough: Vec::new(),
        }
    }

    /// A section of atom groups, with `potential` applied to entries that carry none.
    pub fn with_default_potential(title: &'static str, potential: Potential) -> Self {
        Self {
            default_potential: Some(potential),
            ..Self::new(title, potential.header())
        }
    }

    pub fn fortran_notation(mut self, enabled: bool) -> Self {
        self.fortran = enabled;
        self
    }

    pub fn with_entries(mut self, entries: TypedCollection<T>) -> Self {
        self.entries = entries;
        self
    }

    pub fn with_passthrough(mut self, passthrough: Vec<AnchoredEntry>) -> Self {
        self.passthrough = passthrough;
        self
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn default_header(&self) -> &'static str {
        self.default_header
    }

    pub fn default_potential(&self) -> Option<Potential> {
        self.default_potential
    }

    pub fn entries(&self) -> &TypedCollection<T> {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut TypedCollection<T> {
        &mut self.entries
    }

    pub fn set_entries(&mut self, entries: TypedCollection<T>) {
        self.entries = entries;
    }

    pub fn passthrough(&self) -> &[AnchoredEntry] {
        &self.passthrough
    }

    pub fn passthrough_mut(&mut self) -> &mut Vec<AnchoredEntry> {
        &mut self.passthrough
    }

    /// Whether a directive among the passthrough rows pins the section to the
    /// order it was read in.
    pub fn keeps_source_order(&self) -> bool {
        self.passthrough.iter().any(|row| row.entry.is_directive())
    }

    /// Renders the title, the entries grouped under their layout headers, and
    /// the passthrough rows.
    ///
    /// A header line is written before the first entry and again whenever the
    /// layout changes between consecutive entries. Any entry failing to
    /// render fails the whole section.
    pub fn render(&self) -> Result<String, PotentialError> {
        let mut lines = vec![title_line(self.title)];
        let mut active_header: Option<&'static str> = None;
        let source_order = self.keeps_source_order();
        let entries: Vec<&T> = if source_order {
            trace!(section = self.title, "Writing entries in source order");
            self.entries.iter().collect()
        } else {
            self.entries.sort_entries(self.default_potential)
        };
        let mut pending = self.passthrough.iter().peekable();

        for (position, entry) in entries.into_iter().enumerate() {
            if source_order {
                while let Some(row) = pending.next_if(|row| row.after <= position) {
                    lines.push(row.entry.write(None));
                }
            }
            let (layout, fields) = entry.layout_and_fields(self.default_potential)?;
            if active_header != Some(layout.header) {
                lines.push(layout.header.to_string());
                active_header = Some(layout.header);
            }
            let line = layout.format.render(&fields)?;
            if self.fortran {
                lines.push(to_fortran_notation(&line).into_owned());
            } else {
                lines.push(line);
            }
        }

        if self.entries.is_empty() {
            lines.push(self.default_header.to_string());
        }
        if pending.peek().is_some() {
            trace!(
                section = self.title,
                rows = pending.len(),
                "Writing passthrough rows"
            );
        }
        lines.extend(pending.map(|row| row.entry.write(None)));

        Ok(lines.join("\n"))
    }
}
