use crate::types::FieldKind;
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Significant digits of a rendered single precision literal.
pub const FLOAT_DIGITS: usize = 7;

/// Significant digits of a rendered double precision literal.
pub const DOUBLE_DIGITS: usize = 15;

/// `value` rounded to `digits` significant decimal digits, the way the
/// literal formatter prints it. May round up to infinity near `f64::MAX`.
pub fn round_significant(value: f64, digits: usize) -> f64 {
    format!("{:.*e}", digits.saturating_sub(1), value)
        .parse()
        .unwrap_or(f64::INFINITY)
}

/// Literal as it appears in the descriptor document.
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
#[serde(untagged)]
pub enum DataValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Bool(b) => write!(f, "{}", b),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(v) => write!(f, "{}", v),
            DataValue::String(s) => f.write_str(s),
        }
    }
}

/// A literal interpreted against a `FieldKind`. One variant per kind.
#[derive(Debug, PartialEq, Clone)]
pub enum TypedLiteral {
    Integer(i64),
    Float(f64),
    Double(f64),
    Character(char),
    String(String),
    Bool(bool),
}

#[derive(Debug, Error, PartialEq, Clone)]
pub enum LiteralError {
    #[error("'{value}' is not a valid {kind} literal")]
    Mismatch { kind: FieldKind, value: String },

    #[error("'{value}' does not fit in a {kind} value")]
    OutOfRange { kind: FieldKind, value: String },
}

impl DataValue {
    /// Integer view used by dimension resolution. Floating values are
    /// truncated; text must parse as a decimal integer.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DataValue::Integer(i) => Some(*i),
            DataValue::Float(v) if v.is_finite() => Some(v.trunc() as i64),
            DataValue::Float(_) => None,
            DataValue::String(s) => s.trim().parse().ok(),
            DataValue::Bool(_) => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            DataValue::Integer(i) => Some(*i as f64),
            DataValue::Float(v) => Some(*v),
            DataValue::String(s) => s.trim().parse().ok(),
            DataValue::Bool(_) => None,
        }
    }

    /// Only a native boolean or the words `true`/`false` qualify.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DataValue::Bool(b) => Some(*b),
            DataValue::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
            DataValue::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
            DataValue::String(_) | DataValue::Integer(_) | DataValue::Float(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            DataValue::String(s) => Some(s),
            DataValue::Bool(_) | DataValue::Integer(_) | DataValue::Float(_) => None,
        }
    }

    /// Interpret this literal as a value of `kind`.
    pub fn coerce(&self, kind: FieldKind) -> Result<TypedLiteral, LiteralError> {
        let mismatch = || LiteralError::Mismatch {
            kind,
            value: self.to_string(),
        };
        let out_of_range = || LiteralError::OutOfRange {
            kind,
            value: self.to_string(),
        };

        match kind {
            FieldKind::Integer => {
                let value = self.as_integer().ok_or_else(mismatch)?;
                if i32::try_from(value).is_err() {
                    return Err(out_of_range());
                }
                Ok(TypedLiteral::Integer(value))
            }
            FieldKind::Float => {
                let value = self.as_real().ok_or_else(mismatch)?;
                /* The range applies to the literal as rendered */
                let rendered = round_significant(value, FLOAT_DIGITS);
                if !rendered.is_finite() || rendered.abs() > f64::from(f32::MAX) {
                    return Err(out_of_range());
                }
                Ok(TypedLiteral::Float(value))
            }
            FieldKind::Double => {
                let value = self.as_real().ok_or_else(mismatch)?;
                if !round_significant(value, DOUBLE_DIGITS).is_finite() {
                    return Err(out_of_range());
                }
                Ok(TypedLiteral::Double(value))
            }
            FieldKind::Character => {
                let text = self.as_text().ok_or_else(mismatch)?;
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    /* One C_CHAR holds one byte */
                    (Some(c), None) if c.is_ascii() => Ok(TypedLiteral::Character(c)),
                    (Some(_), None) => Err(out_of_range()),
                    _ => Err(mismatch()),
                }
            }
            FieldKind::String => {
                let text = self.as_text().ok_or_else(mismatch)?;
                Ok(TypedLiteral::String(text.to_string()))
            }
            FieldKind::Bool => self.as_bool().map(TypedLiteral::Bool).ok_or_else(mismatch),
        }
    }
}
