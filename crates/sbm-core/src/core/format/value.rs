use std::fmt;

/// A single field of a topology line after numeric coercion.
///
/// Tokens are tried as an integer first, then as a floating-point number, and
/// are otherwise kept verbatim as text. The coercion never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Str(String),
}

impl Value {
    /// Returns the integer payload, if this value was coerced to an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a float. Integers are widened.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Str(_) => None,
        }
    }

    /// Returns the value as a 1-based atom index (a strictly positive integer).
    pub fn as_index(&self) -> Option<u32> {
        self.as_int()
            .filter(|i| *i >= 1)
            .and_then(|i| u32::try_from(i).ok())
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        !matches!(self, Value::Str(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            // Keep a trailing ".0" so integral floats stay floats when re-read.
            Value::Float(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{:.1}", v)
            }
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(s) => f.write_str(s),
        }
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix('-').unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Converts a raw token to an integer, a float, or leaves it as a string.
pub fn coerce(token: &str) -> Value {
    if is_integer_literal(token) {
        if let Ok(i) = token.parse::<i64>() {
            return Value::Int(i);
        }
    }
    // Only tokens with a digit are numbers, so `nan` and `inf` stay text.
    if !token.bytes().any(|b| b.is_ascii_digit()) {
        return Value::Str(token.to_string());
    }
    match token.parse::<f64>() {
        Ok(f) => Value::Float(f),
        Err(_) => Value::Str(token.to_string()),
    }
}
