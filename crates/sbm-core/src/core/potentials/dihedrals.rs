use crate::core::format::template::{FieldMap, Layout, Slot};

pub const ALL_ATOM_FUNCTION_TYPE: i64 = 2;

pub const PERIODIC_FORCE_CONSTANT: f64 = 0.5;
pub const PERIODIC_MULTIPLICITY: i64 = 3;
pub const IMPROPER_FORCE_CONSTANT: f64 = 1.0;
pub const IMPROPER_MULTIPLICITY: i64 = 1;
pub const ALL_ATOM_FORCE_CONSTANT: f64 = 1.0;

static PERIODIC_SLOTS: [Slot; 8] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "ak", 6),
    Slot::int(" ", "al", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "phi0", 0, 8),
    Slot::sci(" ", "kd", 0, 8),
    Slot::int(" ", "mult", 0),
];

/// Shared by periodic and improper dihedrals, which differ only in constants.
pub static PERIODIC_LAYOUT: Layout = Layout::new(
    ";   ai     aj     ak     al ftype     phi0(deg)   Kd           mult",
    &PERIODIC_SLOTS,
);

static ALL_ATOM_SLOTS: [Slot; 7] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "ak", 6),
    Slot::int(" ", "al", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "phi0", 0, 8),
    Slot::sci(" ", "kd", 0, 8),
];

pub static ALL_ATOM_LAYOUT: Layout = Layout::new(
    ";   ai     aj     ak     al ftype     phi0(deg)   Kd",
    &ALL_ATOM_SLOTS,
);

pub(super) fn periodic_fields(angle: f64, fields: &mut FieldMap) {
    fields.insert("phi0", angle);
    fields.insert("kd", PERIODIC_FORCE_CONSTANT);
    fields.insert("mult", PERIODIC_MULTIPLICITY);
}

pub(super) fn improper_fields(angle: f64, fields: &mut FieldMap) {
    fields.insert("phi0", angle);
    fields.insert("kd", IMPROPER_FORCE_CONSTANT);
    fields.insert("mult", IMPROPER_MULTIPLICITY);
}

pub(super) fn all_atom_fields(angle: f64, fields: &mut FieldMap) {
    fields.insert("phi0", angle);
    fields.insert("kd", ALL_ATOM_FORCE_CONSTANT);
}
