//! Parameter kinds, dynamically typed values and typed conversions.

use std::fmt;

use ares_core::DirectionVector;

use crate::{ParamError, ParamResult};

// ── ParamKind ─────────────────────────────────────────────────────────────────

/// The declared type of a parameter.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamKind {
    Int,
    Float,
    Bool,
    Text,
    Direction,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamKind::Int       => "int",
            ParamKind::Float     => "float",
            ParamKind::Bool      => "bool",
            ParamKind::Text      => "text",
            ParamKind::Direction => "direction",
        };
        f.write_str(s)
    }
}

// ── ParamValue ────────────────────────────────────────────────────────────────

/// A parameter value of any supported kind.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Direction(DirectionVector),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Int(_)       => ParamKind::Int,
            ParamValue::Float(_)     => ParamKind::Float,
            ParamValue::Bool(_)      => ParamKind::Bool,
            ParamValue::Text(_)      => ParamKind::Text,
            ParamValue::Direction(_) => ParamKind::Direction,
        }
    }

    /// Parse user input (a form field, an ini value) as a value of `kind`.
    ///
    /// Directions accept `x,y`, `x y` or `(x, y)`.
    pub fn parse(kind: ParamKind, raw: &str) -> ParamResult<ParamValue> {
        let fail = || ParamError::Parse { raw: raw.to_owned(), kind };
        let s = raw.trim();
        match kind {
            ParamKind::Int   => s.parse().map(ParamValue::Int).map_err(|_| fail()),
            ParamKind::Float => s.parse().map(ParamValue::Float).map_err(|_| fail()),
            ParamKind::Bool  => match s.to_ascii_lowercase().as_str() {
                "true" | "yes" | "1"  => Ok(ParamValue::Bool(true)),
                "false" | "no" | "0"  => Ok(ParamValue::Bool(false)),
                _ => Err(fail()),
            },
            ParamKind::Text => Ok(ParamValue::Text(s.to_owned())),
            ParamKind::Direction => {
                let inner = s.trim_start_matches('(').trim_end_matches(')');
                let parts: Vec<&str> = inner
                    .split(|c: char| c == ',' || c.is_whitespace())
                    .filter(|p| !p.is_empty())
                    .collect();
                match parts.as_slice() {
                    [x, y] => {
                        let x: f64 = x.parse().map_err(|_| fail())?;
                        let y: f64 = y.parse().map_err(|_| fail())?;
                        Ok(ParamValue::Direction(DirectionVector::new(x, y)))
                    }
                    _ => Err(fail()),
                }
            }
        }
    }

    /// Widen to `kind` where that is lossless in meaning (int → float).
    ///
    /// Returns the value unchanged when no widening applies.
    pub(crate) fn coerce(self, kind: ParamKind) -> ParamValue {
        match (self, kind) {
            (ParamValue::Int(i), ParamKind::Float) => ParamValue::Float(i as f64),
            (v, _) => v,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(i)       => write!(f, "{i}"),
            ParamValue::Float(x)     => write!(f, "{x}"),
            ParamValue::Bool(b)      => write!(f, "{b}"),
            ParamValue::Text(s)      => f.write_str(s),
            ParamValue::Direction(d) => write!(f, "({}, {})", d.x, d.y),
        }
    }
}

// ── Typed access ──────────────────────────────────────────────────────────────

/// Rust types that map one-to-one onto a [`ParamKind`].
///
/// Used by [`Parameters::get`](crate::Parameters::get) for type-checked
/// lookup: a value of another kind reads as `None`.
pub trait ParamType: Sized {
    const KIND: ParamKind;

    fn from_value(value: &ParamValue) -> Option<Self>;

    fn into_value(self) -> ParamValue;
}

macro_rules! param_type {
    ($ty:ty, $kind:ident) => {
        impl ParamType for $ty {
            const KIND: ParamKind = ParamKind::$kind;

            fn from_value(value: &ParamValue) -> Option<Self> {
                match value {
                    ParamValue::$kind(v) => Some(v.clone()),
                    _ => None,
                }
            }

            fn into_value(self) -> ParamValue {
                ParamValue::$kind(self)
            }
        }

        impl From<$ty> for ParamValue {
            fn from(v: $ty) -> ParamValue {
                ParamValue::$kind(v)
            }
        }
    };
}

param_type!(i64, Int);
param_type!(f64, Float);
param_type!(bool, Bool);
param_type!(String, Text);
param_type!(DirectionVector, Direction);

impl From<i32> for ParamValue {
    fn from(v: i32) -> ParamValue {
        ParamValue::Int(v as i64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> ParamValue {
        ParamValue::Text(v.to_owned())
    }
}
