use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static SCIENTIFIC_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([1-9])\.(\d+)E([+-])(\d{2})\b").expect("scientific token pattern is valid")
});

/// Formats `value` in scientific notation with a signed, at least two digit exponent.
///
/// This mirrors the C/Python `%.<precision>E` conversion (`7.50000000E-01`),
/// which Rust's `{:E}` does not produce on its own (`7.5E-1`).
pub fn format_scientific(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return value.to_string().to_uppercase();
    }
    let rendered = format!("{:.*E}", precision, value);
    match rendered.split_once('E') {
        Some((mantissa, exponent)) => {
            let exponent: i32 = exponent.parse().unwrap_or(0);
            let sign = if exponent < 0 { '-' } else { '+' };
            format!("{}E{}{:02}", mantissa, sign, exponent.abs())
        }
        None => rendered,
    }
}

fn shift_mantissa(caps: &Captures<'_>) -> String {
    let lead = &caps[1];
    let fraction = &caps[2];
    let magnitude: i32 = caps[4].parse().unwrap_or(0);
    let exponent = if &caps[3] == "-" {
        -magnitude + 1
    } else {
        magnitude + 1
    };
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("0.{}{}E{}{:02}", lead, fraction, sign, exponent.abs())
}

/// Rewrites `X.XXXXE±NN` tokens into the `0.XXXXXE±NN` convention GROMACS
/// topologies are traditionally written in.
///
/// Text that is not a matching scientific token is returned untouched, and
/// applying the pass to its own output is a no-op.
pub fn to_fortran_notation(text: &str) -> Cow<'_, str> {
    SCIENTIFIC_TOKEN.replace_all(text, |caps: &Captures<'_>| shift_mantissa(caps))
}
