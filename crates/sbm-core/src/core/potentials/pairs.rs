use crate::core::format::template::{FieldMap, Layout, Slot};
use std::f64::consts::LN_2;

pub const GAUSSIAN_FUNCTION_TYPE: i64 = 5;
pub const COMBINED_GAUSSIAN_FUNCTION_TYPE: i64 = 6;

pub const GAUSSIAN_AMPLITUDE: f64 = 1.0;
/// Excluded-volume coefficient of the combined Gaussian contact.
pub const EXCLUDED_VOLUME: f64 = 0.167772196e-4;

static LENNARD_JONES_SLOTS: [Slot; 5] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "c6", 0, 8),
    Slot::sci(" ", "c12", 0, 8),
];

pub static LENNARD_JONES_LAYOUT: Layout = Layout::new(
    ";   ai     aj ftype             c6                c12",
    &LENNARD_JONES_SLOTS,
);

static LENNARD_JONES_1012_SLOTS: [Slot; 5] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "c10", 0, 8),
    Slot::sci(" ", "c12", 0, 8),
];

pub static LENNARD_JONES_1012_LAYOUT: Layout =
    Layout::new("; i j type and weight", &LENNARD_JONES_1012_SLOTS);

static GAUSSIAN_SLOTS: [Slot; 6] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "amplitude", 0, 8),
    Slot::sci(" ", "mu", 0, 8),
    Slot::sci(" ", "sigma", 0, 8),
];

pub static GAUSSIAN_LAYOUT: Layout = Layout::new(
    ";   ai     aj ftype             Amplitude     mu    sigma",
    &GAUSSIAN_SLOTS,
);

static COMBINED_GAUSSIAN_SLOTS: [Slot; 7] = [
    Slot::int("", "ai", 6),
    Slot::int(" ", "aj", 6),
    Slot::int(" ", "func", 0),
    Slot::sci(" ", "amplitude", 0, 8),
    Slot::sci(" ", "mu", 0, 8),
    Slot::sci(" ", "sigma", 0, 8),
    Slot::sci(" ", "a", 0, 8),
];

pub static COMBINED_GAUSSIAN_LAYOUT: Layout = Layout::new(
    ";   ai     aj ftype      Amplitude                 mu              sigma                  a",
    &COMBINED_GAUSSIAN_SLOTS,
);

/// Width of a Gaussian well whose half maximum sits at `distance / 5`.
pub fn gaussian_width(distance: f64) -> f64 {
    (distance.powi(2) / (50.0 * LN_2)).sqrt()
}

pub(super) fn lennard_jones_fields(distance: f64, fields: &mut FieldMap) {
    fields.insert("c6", 2.0 * distance.powi(6));
    fields.insert("c12", distance.powi(12));
}

pub(super) fn lennard_jones_1012_fields(distance: f64, fields: &mut FieldMap) {
    fields.insert("c10", 6.0 * distance.powi(10));
    fields.insert("c12", 5.0 * distance.powi(12));
}

pub(super) fn gaussian_fields(distance: f64, fields: &mut FieldMap) {
    fields.insert("amplitude", GAUSSIAN_AMPLITUDE);
    fields.insert("mu", distance);
    fields.insert("sigma", gaussian_width(distance));
}

pub(super) fn combined_gaussian_fields(distance: f64, fields: &mut FieldMap) {
    gaussian_fields(distance, fields);
    fields.insert("a", EXCLUDED_VOLUME);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::group::Pair;
    use crate::core::potentials::Potential;

    #[test]
    fn gaussian_width_follows_half_maximum_relation() {
        assert!((gaussian_width(0.5) - 0.0849321800).abs() < 1e-9);
        assert!((gaussian_width(1.0) - 0.169864360).abs() < 1e-9);
    }

    #[test]
    fn gaussian_pair_renders_amplitude_mu_and_sigma() {
        let pair = Pair::new(1, 2).with_distance(0.5);
        assert_eq!(
            Potential::Gaussian.render(&pair).unwrap(),
            "     1      2 5 1.00000000E+00 5.00000000E-01 8.49321800E-02"
        );
    }

    #[test]
    fn combined_gaussian_appends_excluded_volume() {
        let pair = Pair::new(1, 2).with_distance(0.5);
        assert_eq!(
            Potential::CombinedGaussian.render(&pair).unwrap(),
            "     1      2 6 1.00000000E+00 5.00000000E-01 8.49321800E-02 1.67772196E-05"
        );
    }

    #[test]
    fn lennard_jones_coefficients_scale_with_distance() {
        let pair = Pair::new(3, 7).with_distance(1.0);
        assert_eq!(
            Potential::LennardJones.render(&pair).unwrap(),
            "     3      7 1 2.00000000E+00 1.00000000E+00"
        );
        assert_eq!(
            Potential::LennardJones1012.render(&pair).unwrap(),
            "     3      7 1 6.00000000E+00 5.00000000E+00"
        );
    }
}
