use crate::core::format::template::{FieldMap, Layout, Slot};

/// Harmonic bond force constant, kJ mol⁻¹ nm⁻².
pub const BOND_FORCE_CONSTANT: f64 = 2.0e4;
/// Harmonic angle force constant, kJ mol⁻¹ rad⁻².
pub const ANGLE_FORCE_CONSTANT: f64 = 40.0;

static BOND_SLOTS: [Slot; 5] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "func", 0),
    Slot::sci("  ", "r0", 0, 8),
    Slot::sci(" ", "kb", 0, 8),
];

pub static BOND_LAYOUT: Layout = Layout::new(
    ";   ai     aj func         r0(nm)                Kb",
    &BOND_SLOTS,
);

static ANGLE_SLOTS: [Slot; 6] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "ak", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "theta0", 0, 8),
    Slot::sci(" ", "ka", 0, 8),
];

pub static ANGLE_LAYOUT: Layout = Layout::new(
    ";   ai     aj     ak func       th0(deg)                Ka",
    &ANGLE_SLOTS,
);

pub(super) fn bond_fields(distance: f64, fields: &mut FieldMap) {
    fields.insert("r0", distance);
    fields.insert("kb", BOND_FORCE_CONSTANT);
}

pub(super) fn angle_fields(angle: f64, fields: &mut FieldMap) {
    fields.insert("theta0", angle);
    fields.insert("ka", ANGLE_FORCE_CONSTANT);
}

#[cfg(test)]
mod tests {
    use crate::core::models::group::{Angle, Pair};
    use crate::core::potentials::Potential;

    #[test]
    fn bond_renders_distance_and_force_constant() {
        let pair = Pair::new(1, 2).with_distance(0.75);
        assert_eq!(
            Potential::Bond.render(&pair).unwrap(),
            "     1      2 1  7.50000000E-01 2.00000000E+04"
        );
    }

    #[test]
    fn bond_accepts_large_indices_without_truncation() {
        let pair = Pair::new(1234567, 2).with_distance(0.38026906);
        assert_eq!(
            Potential::Bond.render(&pair).unwrap(),
            "1234567      2 1  3.80269060E-01 2.00000000E+04"
        );
    }

    #[test]
    fn angle_renders_equilibrium_angle_and_force_constant() {
        let angle = Angle::new(1, 2, 3).with_angle(0.75);
        assert_eq!(
            Potential::Angle.render(&angle).unwrap(),
            "     1      2      3 1 7.50000000E-01 4.00000000E+01"
        );
    }
}
