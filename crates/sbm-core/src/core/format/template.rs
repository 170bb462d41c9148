use super::fortran::format_scientific;
use super::value::Value;
use thiserror::Error;

/// Horizontal alignment of a padded column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// How a single column turns a [`Value`] into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spec {
    /// Integer, padded to `width` (0 disables padding).
    Int { width: usize, align: Align },
    /// Fixed-point float with `precision` fraction digits.
    Fixed {
        width: usize,
        precision: usize,
        align: Align,
    },
    /// Scientific notation (`X.XXXE±NN`) with `precision` fraction digits, right aligned.
    Sci { width: usize, precision: usize },
    /// Free text, printed as-is.
    Text { width: usize, align: Align },
}

/// One column of a line template: literal text preceding the field, the field
/// name looked up in the [`FieldMap`], and the formatting spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    pub lead: &'static str,
    pub field: &'static str,
    pub spec: Spec,
}

impl Slot {
    pub const fn int(lead: &'static str, field: &'static str, width: usize) -> Self {
        Self {
            lead,
            field,
            spec: Spec::Int {
                width,
                align: Align::Right,
            },
        }
    }

    pub const fn fixed(
        lead: &'static str,
        field: &'static str,
        width: usize,
        precision: usize,
        align: Align,
    ) -> Self {
        Self {
            lead,
            field,
            spec: Spec::Fixed {
                width,
                precision,
                align,
            },
        }
    }

    pub const fn sci(
        lead: &'static str,
        field: &'static str,
        width: usize,
        precision: usize,
    ) -> Self {
        Self {
            lead,
            field,
            spec: Spec::Sci { width, precision },
        }
    }

    pub const fn text(lead: &'static str, field: &'static str, width: usize, align: Align) -> Self {
        Self {
            lead,
            field,
            spec: Spec::Text { width, align },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Line template requires field '{field}' which is absent from the field map")]
pub struct MissingFieldError {
    pub field: &'static str,
}

/// An ordered field-name → value map produced by a potential or an entity.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldMap {
    entries: Vec<(&'static str, Value)>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &'static str, value: impl Into<Value>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    pub fn get_float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_float)
    }

    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_int)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(key, _)| *key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn pad(text: String, width: usize, align: Align) -> String {
    match align {
        Align::Left => format!("{:<width$}", text, width = width),
        Align::Right => format!("{:>width$}", text, width = width),
    }
}

fn render_value(value: &Value, spec: Spec) -> String {
    match (spec, value) {
        (Spec::Int { width, align }, Value::Int(i)) => pad(i.to_string(), width, align),
        (
            Spec::Fixed {
                width,
                precision,
                align,
            },
            v,
        ) if v.is_numeric() => pad(
            format!("{:.*}", precision, v.as_float().unwrap_or_default()),
            width,
            align,
        ),
        (Spec::Sci { width, precision }, v) if v.is_numeric() => pad(
            format_scientific(v.as_float().unwrap_or_default(), precision),
            width,
            Align::Right,
        ),
        (Spec::Int { width, align }, v)
        | (Spec::Text { width, align }, v)
        | (Spec::Fixed { width, align, .. }, v) => pad(v.to_string(), width, align),
        (Spec::Sci { width, .. }, v) => pad(v.to_string(), width, Align::Right),
    }
}

/// A fixed positional line template.
///
/// Values whose type does not fit the column spec (text in a numeric column,
/// for instance) are printed through their `Display` form rather than rejected,
/// so hand-assembled generic rows always render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineFormat {
    slots: &'static [Slot],
}

impl LineFormat {
    pub const fn new(slots: &'static [Slot]) -> Self {
        Self { slots }
    }

    pub fn slots(&self) -> &'static [Slot] {
        self.slots
    }

    /// Names of the fields this template consumes, in column order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> {
        self.slots.iter().map(|slot| slot.field)
    }

    pub fn render(&self, fields: &FieldMap) -> Result<String, MissingFieldError> {
        let mut line = String::new();
        for slot in self.slots {
            let value = fields
                .get(slot.field)
                .ok_or(MissingFieldError { field: slot.field })?;
            line.push_str(slot.lead);
            line.push_str(&render_value(value, slot.spec));
        }
        Ok(line)
    }

    /// Renders positional values (a generic row) against the template.
    ///
    /// Values beyond the last slot are appended separated by a single space.
    pub fn render_positional(&self, values: &[Value]) -> String {
        let mut line = String::new();
        for (i, value) in values.iter().enumerate() {
            match self.slots.get(i) {
                Some(slot) => {
                    line.push_str(slot.lead);
                    line.push_str(&render_value(value, slot.spec));
                }
                None => {
                    line.push(' ');
                    line.push_str(&value.to_string());
                }
            }
        }
        line
    }
}

/// A header comment paired with the line template it describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub header: &'static str,
    pub format: LineFormat,
}

impl Layout {
    pub const fn new(header: &'static str, slots: &'static [Slot]) -> Self {
        Self {
            header,
            format: LineFormat::new(slots),
        }
    }
}
