//! Tagged value representation consumed by the universal converter.

use crate::enumeration::Enumeration;
use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, Offset, Utc};
use rust_decimal::Decimal;
use std::any::TypeId;

/// An enumeration member carried with its concrete type identity.
///
/// The type tag makes cross-enumeration coercion detectable: a member of
/// one enumeration never converts to another, even when the numeric
/// values line up.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EnumValue {
    type_id: TypeId,
    value: i64,
    name: Option<&'static str>,
}

impl EnumValue {
    /// The member's underlying numeric value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// The declared member name, when the value is a declared member.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Whether this member belongs to the enumeration `T`.
    pub fn is<T: Enumeration>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Downcast to a member of `T`. `None` for a foreign enumeration.
    pub fn downcast<T: Enumeration>(&self) -> Option<T> {
        if self.is::<T>() {
            T::from_value(self.value)
        } else {
            None
        }
    }
}

/// A conversion input of unknown declared type.
///
/// Callers normally construct one through the `From` impls. Two of them
/// carry timezone knowledge into the variant choice:
///
/// - `DateTime<Utc>` becomes a zero-offset [`Value::DateTimeOffset`];
/// - `DateTime<Local>` becomes a [`Value::DateTimeOffset`] with its fixed
///   local offset;
/// - a bare [`NaiveDateTime`] stays a [`Value::DateTime`], an unanchored
///   wall time.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// The absent input. Every conversion maps it to absence
    /// (`false` for booleans).
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F64(f64),
    Decimal(Decimal),
    /// A wall time without timezone anchoring.
    DateTime(NaiveDateTime),
    /// An instant with an explicit UTC offset.
    DateTimeOffset(DateTime<FixedOffset>),
    Text(String),
    Enum(EnumValue),
}

impl Value {
    /// Wraps an enumeration member with its type identity.
    pub fn enumeration<T: Enumeration>(member: T) -> Value {
        Value::Enum(EnumValue {
            type_id: TypeId::of::<T>(),
            value: member.value(),
            name: member.name(),
        })
    }

    /// Builds a value from an opt-in [`Convertible`] type, preferring its
    /// numeric fast paths over the text projection.
    pub fn from_convertible<C: Convertible>(source: &C) -> Value {
        if let Some(n) = source.to_i64() {
            return Value::I64(n);
        }
        if let Some(f) = source.to_f64() {
            return Value::F64(f);
        }
        if let Some(b) = source.to_bool() {
            return Value::Bool(b);
        }
        Value::Text(source.to_text())
    }

    /// The natural text projection of the value. Absent input projects to
    /// the empty string.
    pub fn text(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::I32(n) => n.to_string(),
            Value::I64(n) => n.to_string(),
            Value::F64(f) => f.to_string(),
            Value::Decimal(d) => d.to_string(),
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::DateTimeOffset(dt) => dt.to_rfc3339(),
            Value::Text(s) => s.clone(),
            Value::Enum(e) => match e.name() {
                Some(name) => name.to_string(),
                None => e.value().to_string(),
            },
        }
    }

    /// Whether this is the absent input.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Opt-in fast-path conversion for foreign types.
///
/// A type implements the numeric accessors it can answer cheaply; the
/// converter falls back to [`Convertible::to_text`] when none apply.
pub trait Convertible {
    fn to_bool(&self) -> Option<bool> {
        None
    }

    fn to_i64(&self) -> Option<i64> {
        None
    }

    fn to_f64(&self) -> Option<f64> {
        None
    }

    /// The natural text projection, always available.
    fn to_text(&self) -> String;
}

impl From<bool> for Value {
    fn from(v: bool) -> Value {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Value {
        Value::I32(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Value {
        Value::I64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Value {
        Value::F64(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Value {
        Value::Decimal(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Value {
        Value::DateTime(v)
    }
}

impl From<DateTime<FixedOffset>> for Value {
    fn from(v: DateTime<FixedOffset>) -> Value {
        Value::DateTimeOffset(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Value {
        Value::DateTimeOffset(v.fixed_offset())
    }
}

impl From<DateTime<Local>> for Value {
    fn from(v: DateTime<Local>) -> Value {
        let offset = v.offset().fix();
        Value::DateTimeOffset(v.with_timezone(&offset))
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Value {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Value {
        Value::Text(v)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(v: Option<T>) -> Value {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}
