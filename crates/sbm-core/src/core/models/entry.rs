use crate::core::format::template::LineFormat;
use crate::core::format::value::Value;
use std::fmt;

/// A row kept as its coerced tokens rather than a typed entity.
///
/// Rows read from text remember their original line and are written back
/// verbatim until they are modified. Equality compares the values and the
/// inline comment only.
#[derive(Debug, Clone, Default)]
pub struct GenericEntry {
    values: Vec<Value>,
    comment: Option<String>,
    raw: Option<String>,
}

impl GenericEntry {
    pub fn new(values: Vec<Value>) -> Self {
        Self {
            values,
            comment: None,
            raw: None,
        }
    }

    /// Builds a row that renders back exactly as `line`.
    pub fn from_line(values: Vec<Value>, comment: Option<String>, line: impl Into<String>) -> Self {
        Self {
            values,
            comment,
            raw: Some(line.into()),
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self.raw = None;
        self
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn get(&self, position: usize) -> Option<&Value> {
        self.values.get(position)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replaces the value at `position`, padding with empty text if the row is shorter.
    pub fn set(&mut self, position: usize, value: impl Into<Value>) {
        if position >= self.values.len() {
            self.values.resize(position + 1, Value::Str(String::new()));
        }
        self.values[position] = value.into();
        self.raw = None;
    }

    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
        self.raw = None;
    }

    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }

    /// True for a preprocessor line such as `#ifdef` or `#include`.
    pub fn is_directive(&self) -> bool {
        self.values.is_empty()
            && self
                .raw
                .as_deref()
                .is_some_and(|raw| raw.trim_start().starts_with('#'))
    }

    /// Renders the row, through `format` when given, else space separated.
    pub fn write(&self, format: Option<&LineFormat>) -> String {
        if let Some(raw) = &self.raw {
            return raw.clone();
        }
        let mut line = match format {
            Some(format) => format.render_positional(&self.values),
            None => self
                .values
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" "),
        };
        if let Some(comment) = &self.comment {
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str("; ");
            line.push_str(comment);
        }
        line
    }
}

impl PartialEq for GenericEntry {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values && self.comment == other.comment
    }
}

impl From<Vec<Value>> for GenericEntry {
    fn from(values: Vec<Value>) -> Self {
        Self::new(values)
    }
}

/// An untyped row of a typed section, anchored to the number of typed
/// entries that preceded it in the text.
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredEntry {
    pub after: usize,
    pub entry: GenericEntry,
}

impl AnchoredEntry {
    pub fn new(after: usize, entry: GenericEntry) -> Self {
        Self { after, entry }
    }
}

/// A full-line `;` comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    text: String,
}

impl Comment {
    /// Creates a comment line, prefixing `"; "` when `text` is not already a comment.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        if text.trim_start().starts_with(';') {
            Self { text }
        } else {
            Self {
                text: format!("; {}", text),
            }
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// One line of an untyped section.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Entry(GenericEntry),
    Comment(Comment),
}

impl Row {
    pub fn write(&self, format: Option<&LineFormat>) -> String {
        match self {
            Row::Entry(entry) => entry.write(format),
            Row::Comment(comment) => comment.text().to_string(),
        }
    }

    pub fn is_comment(&self) -> bool {
        matches!(self, Row::Comment(_))
    }

    pub fn as_entry(&self) -> Option<&GenericEntry> {
        match self {
            Row::Entry(entry) => Some(entry),
            Row::Comment(_) => None,
        }
    }
}

impl From<GenericEntry> for Row {
    fn from(entry: GenericEntry) -> Self {
        Row::Entry(entry)
    }
}

impl From<Comment> for Row {
    fn from(comment: Comment) -> Self {
        Row::Comment(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::format::template::Slot;

    #[test]
    fn parsed_rows_write_back_their_original_text() {
        let entry = GenericEntry::from_line(
            vec![Value::Int(1), Value::Int(2), Value::Int(9)],
            Some("odd".into()),
            "  1   2  9 ; odd",
        );
        assert_eq!(entry.write(None), "  1   2  9 ; odd");
    }

    #[test]
    fn modifying_a_row_drops_its_original_text() {
        let mut entry = GenericEntry::from_line(vec![Value::Int(1), Value::Int(2)], None, "1    2");
        entry.set(1, 5i64);
        assert_eq!(entry.raw(), None);
        assert_eq!(entry.write(None), "1 5");
    }

    #[test]
    fn set_beyond_the_end_pads_the_row() {
        let mut entry = GenericEntry::new(vec![Value::Int(1)]);
        entry.set(2, "x");
        assert_eq!(entry.len(), 3);
        assert_eq!(entry.get(1), Some(&Value::Str(String::new())));
    }

    #[test]
    fn only_bare_hash_lines_are_directives() {
        assert!(GenericEntry::from_line(Vec::new(), None, "#ifdef FLEXIBLE").is_directive());
        assert!(!GenericEntry::from_line(vec![Value::Int(1)], None, "1 2").is_directive());
        assert!(!GenericEntry::new(Vec::new()).is_directive());
    }

    #[test]
    fn write_uses_the_given_line_format() {
        static SLOTS: [Slot; 2] = [Slot::int("", "ai", 6), Slot::int(" ", "aj", 6)];
        let format = LineFormat::new(&SLOTS);
        let entry = GenericEntry::new(vec![Value::Int(1), Value::Int(2)]).with_comment("native");
        assert_eq!(entry.write(Some(&format)), "     1      2 ; native");
    }

    #[test]
    fn equality_ignores_original_text() {
        let parsed = GenericEntry::from_line(vec![Value::Int(1)], None, "   1");
        assert_eq!(parsed, GenericEntry::new(vec![Value::Int(1)]));
    }

    #[test]
    fn comment_new_adds_a_marker_only_when_missing() {
        assert_eq!(Comment::new("header").text(), "; header");
        assert_eq!(Comment::new(";   ai     aj").text(), ";   ai     aj");
    }

    #[test]
    fn comment_rows_write_their_text() {
        let row = Row::from(Comment::new("note"));
        assert!(row.is_comment());
        assert_eq!(row.write(None), "; note");
        assert_eq!(row.as_entry(), None);
    }
}
