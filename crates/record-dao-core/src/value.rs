// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Dynamically typed component values.
//!
//! Records are strongly typed, but write payloads, filters and generators
//! need one uniform currency. [`Value`] is that currency and [`ValueKind`]
//! describes the type of a field without carrying a value.
//!
//! # Conversions
//!
//! | Rust type | Kind | Null handling |
//! |-----------|------|---------------|
//! | `bool` | `Bool` | rejected |
//! | `i8`..`i64`, `u8`..`u32` | `Int` | rejected, range checked |
//! | `f32`, `f64` | `Float` | rejected |
//! | `String` | `Text` | rejected |
//! | `Vec<u8>` | `Bytes` | rejected |
//! | `uuid::Uuid` | `Uuid` | rejected (feature `uuid`) |
//! | `DateTime<Utc>` | `Timestamp` | rejected (feature `chrono`) |
//! | `NaiveDate` | `Date` | rejected (feature `chrono`) |
//! | `Option<T>` | kind of `T` | `Null` ⇔ `None` |

use std::fmt;

use crate::error::{DaoError, Result};

/// Type descriptor of a persistable field.
///
/// Also the key of the per-DAO generator registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValueKind {
    /// Boolean.
    Bool,

    /// Signed 64-bit integer (all integer field types).
    Int,

    /// 64-bit float.
    Float,

    /// UTF-8 text.
    Text,

    /// Raw bytes.
    Bytes,

    /// UUID.
    Uuid,

    /// UTC timestamp.
    Timestamp,

    /// Calendar date.
    Date
}

impl ValueKind {
    /// Lowercase name of the kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Float => "float",
            Self::Text => "text",
            Self::Bytes => "bytes",
            Self::Uuid => "uuid",
            Self::Timestamp => "timestamp",
            Self::Date => "date"
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single component value.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    /// Absent value. Generated fields that are `Null` get filled on save.
    #[default]
    Null,

    /// Boolean value.
    Bool(bool),

    /// Integer value.
    Int(i64),

    /// Float value.
    Float(f64),

    /// Text value.
    Text(String),

    /// Byte string.
    Bytes(Vec<u8>),

    /// UUID value.
    #[cfg(feature = "uuid")]
    Uuid(uuid::Uuid),

    /// UTC timestamp.
    #[cfg(feature = "chrono")]
    Timestamp(chrono::DateTime<chrono::Utc>),

    /// Calendar date.
    #[cfg(feature = "chrono")]
    Date(chrono::NaiveDate)
}

impl Value {
    /// Check if this is [`Value::Null`].
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Kind of the value, `None` for `Null`.
    pub const fn kind(&self) -> Option<ValueKind> {
        match self {
            Self::Null => None,
            Self::Bool(_) => Some(ValueKind::Bool),
            Self::Int(_) => Some(ValueKind::Int),
            Self::Float(_) => Some(ValueKind::Float),
            Self::Text(_) => Some(ValueKind::Text),
            Self::Bytes(_) => Some(ValueKind::Bytes),
            #[cfg(feature = "uuid")]
            Self::Uuid(_) => Some(ValueKind::Uuid),
            #[cfg(feature = "chrono")]
            Self::Timestamp(_) => Some(ValueKind::Timestamp),
            #[cfg(feature = "chrono")]
            Self::Date(_) => Some(ValueKind::Date)
        }
    }

    /// Integer payload, if any.
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None
        }
    }

    /// Text payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(v) => Some(v),
            _ => None
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "{v:?}"),
            Self::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            #[cfg(feature = "uuid")]
            Self::Uuid(v) => write!(f, "{v}"),
            #[cfg(feature = "chrono")]
            Self::Timestamp(v) => write!(f, "{}", v.to_rfc3339()),
            #[cfg(feature = "chrono")]
            Self::Date(v) => write!(f, "{v}")
        }
    }
}

/// Conversion between a field type and [`Value`].
///
/// Implemented for the supported scalar types and for `Option<T>`. The derive
/// macro uses [`FieldValue::KIND`] to build field descriptors at compile
/// time.
pub trait FieldValue: Sized {
    /// Kind reported in the field descriptor.
    const KIND: ValueKind;

    /// Convert the field into a component value.
    fn to_value(&self) -> Value;

    /// Convert a component value back into the field type.
    ///
    /// # Errors
    ///
    /// [`DaoError::TypeMismatch`] when the value has the wrong kind, is out
    /// of range, or is `Null` for a non-optional type.
    fn from_value(value: Value) -> Result<Self>;
}

/// Build a type mismatch error for a bare value.
pub(crate) fn mismatch(expected: ValueKind, found: &Value) -> DaoError {
    let found = match found.kind() {
        Some(kind) => format!("{kind} {found}"),
        None => found.to_string()
    };
    DaoError::TypeMismatch {
        field: String::new(),
        expected,
        found
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ValueKind = T::KIND;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some)
        }
    }
}

macro_rules! int_field {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldValue for $ty {
            const KIND: ValueKind = ValueKind::Int;

            fn to_value(&self) -> Value {
                Value::Int(i64::from(*self))
            }

            fn from_value(value: Value) -> Result<Self> {
                match value {
                    Value::Int(v) => {
                        <$ty>::try_from(v).map_err(|_| mismatch(Self::KIND, &Value::Int(v)))
                    }
                    other => Err(mismatch(Self::KIND, &other))
                }
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Value::Int(i64::from(v))
            }
        }
    )*};
}

int_field!(i8, i16, i32, i64, u8, u16, u32);

impl FieldValue for bool {
    const KIND: ValueKind = ValueKind::Bool;

    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bool(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

impl FieldValue for f64 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Float(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

impl FieldValue for f32 {
    const KIND: ValueKind = ValueKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            #[allow(clippy::cast_possible_truncation)]
            Value::Float(v) => {
                let narrowed = v as f32;
                if narrowed.is_infinite() && v.is_finite() {
                    return Err(mismatch(Self::KIND, &Value::Float(v)));
                }
                Ok(narrowed)
            }
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

impl FieldValue for String {
    const KIND: ValueKind = ValueKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Text(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

impl FieldValue for Vec<u8> {
    const KIND: ValueKind = ValueKind::Bytes;

    fn to_value(&self) -> Value {
        Value::Bytes(self.clone())
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

#[cfg(feature = "uuid")]
impl FieldValue for uuid::Uuid {
    const KIND: ValueKind = ValueKind::Uuid;

    fn to_value(&self) -> Value {
        Value::Uuid(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Uuid(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

#[cfg(feature = "chrono")]
impl FieldValue for chrono::DateTime<chrono::Utc> {
    const KIND: ValueKind = ValueKind::Timestamp;

    fn to_value(&self) -> Value {
        Value::Timestamp(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Timestamp(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

#[cfg(feature = "chrono")]
impl FieldValue for chrono::NaiveDate {
    const KIND: ValueKind = ValueKind::Date;

    fn to_value(&self) -> Value {
        Value::Date(*self)
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Date(v) => Ok(v),
            other => Err(mismatch(Self::KIND, &other))
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Bytes(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

#[cfg(feature = "uuid")]
impl From<uuid::Uuid> for Value {
    fn from(v: uuid::Uuid) -> Self {
        Value::Uuid(v)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Value {
    fn from(v: chrono::DateTime<chrono::Utc>) -> Self {
        Value::Timestamp(v)
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Value {
    fn from(v: chrono::NaiveDate) -> Self {
        Value::Date(v)
    }
}
