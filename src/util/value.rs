//! Property values and the numeric coercion table used by `Set`.

use super::{DVec3, Error, Result, ValueKind};
use std::fmt;

/// A property value.
///
/// Stored values always match the property's [`ValueKind`]; `Int` only
/// appears as an input to `Set` and is coerced before storage.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Double(f64),
    Double3(DVec3),
    String(String),
    Enum(i32),
}

impl Value {
    /// Name of the variant, for error messages.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "Bool",
            Self::Int(_) => "Int",
            Self::Double(_) => "Double",
            Self::Double3(_) => "Double3",
            Self::String(_) => "String",
            Self::Enum(_) => "Enum",
        }
    }

    /// Default value stored by a freshly created property of `kind`.
    ///
    /// Compound properties carry no value.
    pub fn default_for(kind: ValueKind) -> Option<Self> {
        match kind {
            ValueKind::Bool => Some(Self::Bool(false)),
            ValueKind::Double => Some(Self::Double(0.0)),
            ValueKind::Double3 => Some(Self::Double3(DVec3::ZERO)),
            ValueKind::String => Some(Self::String(String::new())),
            ValueKind::Enum => Some(Self::Enum(0)),
            ValueKind::Compound => None,
        }
    }

    /// Numeric view of scalar inputs; `None` for strings and vectors.
    fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Bool(b) => Some(if b { 1.0 } else { 0.0 }),
            Self::Int(i) => Some(i as f64),
            Self::Double(d) => Some(d),
            Self::Enum(e) => Some(e as f64),
            Self::Double3(_) | Self::String(_) => None,
        }
    }

    /// Coerce this value for storage in a property of `kind`.
    ///
    /// `enum_count` is the number of declared items of an Enum property;
    /// when non-zero the ordinal is clamped into `0..enum_count`.
    pub fn coerce(self, kind: ValueKind, enum_count: usize) -> Result<Value> {
        let actual = self.type_name();
        let mismatch = || Error::wrong_type(kind, actual);

        match kind {
            ValueKind::Compound => Err(mismatch()),
            ValueKind::Bool => match self {
                Self::Bool(b) => Ok(Self::Bool(b)),
                other => other.as_f64().map(|x| Self::Bool(x != 0.0)).ok_or_else(mismatch),
            },
            ValueKind::Double => self.as_f64().map(Self::Double).ok_or_else(mismatch),
            ValueKind::Double3 => match self {
                Self::Double3(v) => Ok(Self::Double3(v)),
                other => other.as_f64().map(|x| Self::Double3(DVec3::splat(x))).ok_or_else(mismatch),
            },
            ValueKind::String => match self {
                Self::String(s) => Ok(Self::String(s)),
                Self::Bool(b) => Ok(Self::String(b.to_string())),
                Self::Int(i) => Ok(Self::String(i.to_string())),
                Self::Enum(e) => Ok(Self::String(e.to_string())),
                Self::Double(d) => Ok(Self::String(format!("{:.6}", d))),
                Self::Double3(_) => Err(mismatch()),
            },
            ValueKind::Enum => {
                let ordinal = match self {
                    Self::Enum(e) => e as i64,
                    Self::Int(i) => i,
                    other => other.as_f64().ok_or_else(mismatch)?.trunc() as i64,
                };
                Ok(Self::Enum(clamp_ordinal(ordinal, enum_count)))
            }
        }
    }
}

/// Fit an ordinal into an enum with `enum_count` declared items.
///
/// With items declared the ordinal clamps to `[0, enum_count - 1]`, so a
/// WrapMode set to 5.0 reads back as Clamp (1). The FBX SDK stores the raw
/// ordinal there and reads back 5. Without items only the i32 range applies.
fn clamp_ordinal(ordinal: i64, enum_count: usize) -> i32 {
    let ordinal = if enum_count > 0 {
        ordinal.clamp(0, enum_count as i64 - 1)
    } else {
        ordinal
    };
    ordinal.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Double(d) => write!(f, "{}", d),
            Self::Double3(v) => write!(f, "({}, {}, {})", v.x, v.y, v.z),
            Self::String(s) => write!(f, "{:?}", s),
            Self::Enum(e) => write!(f, "#{}", e),
        }
    }
}

// === Conversions into values ===

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Self::Int(v as i64)
            }
        })*
    };
}

impl_from_int!(i8, u8, i16, u16, i32, u32, i64);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Double(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Double(v)
    }
}

impl From<DVec3> for Value {
    fn from(v: DVec3) -> Self {
        Self::Double3(v)
    }
}

impl From<[f64; 3]> for Value {
    fn from(v: [f64; 3]) -> Self {
        Self::Double3(DVec3::from_array(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

// === Typed reads ===

impl TryFrom<Value> for bool {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Bool(b) => Ok(b),
            other => Err(Error::wrong_type("Bool", other.type_name())),
        }
    }
}

impl TryFrom<Value> for f64 {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Double(d) => Ok(d),
            other => Err(Error::wrong_type("Double", other.type_name())),
        }
    }
}

impl TryFrom<Value> for DVec3 {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Double3(d) => Ok(d),
            other => Err(Error::wrong_type("Double3", other.type_name())),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::String(s) => Ok(s),
            other => Err(Error::wrong_type("String", other.type_name())),
        }
    }
}

impl TryFrom<Value> for i32 {
    type Error = Error;

    fn try_from(v: Value) -> Result<Self> {
        match v {
            Value::Enum(e) => Ok(e),
            other => Err(Error::wrong_type("Enum", other.type_name())),
        }
    }
}
