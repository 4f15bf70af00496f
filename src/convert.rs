//! Universal converter: a tagged [`Value`] into a requested target type.
//!
//! Every operation walks the same ladder: absent input short-circuits,
//! an input already of the target type passes through unchanged, textual
//! input delegates to the primitive parser, and anything else attempts a
//! direct coercion before retrying through its text projection. Every
//! failure converges on absence; nothing here panics or returns an error
//! type.

use crate::context::{DateStyle, FormatContext, NumberStyle};
use crate::enumeration::Enumeration;
use crate::parse;
use crate::value::Value;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Utc};
use num_traits::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

/// Converts a value to a logical value.
///
/// Absent input is `false` by policy. Numeric input is truthy when
/// nonzero. Textual input first tries the canonical spellings, then a
/// numeric reading; date-time input is never truthy.
pub fn to_boolean(value: &Value) -> bool {
    to_boolean_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a logical value honoring the given locale for the
/// truthy-numeric text fallback.
pub fn to_boolean_with(value: &Value, context: &FormatContext) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::I32(n) => *n != 0,
        Value::I64(n) => *n != 0,
        Value::F64(f) => *f != 0.0,
        Value::Decimal(d) => !d.is_zero(),
        Value::DateTime(_) | Value::DateTimeOffset(_) => false,
        Value::Enum(e) => e.value() != 0,
        Value::Text(s) => text_to_boolean(s, context),
    }
}

fn text_to_boolean(text: &str, context: &FormatContext) -> bool {
    let t = text.trim();
    if t.eq_ignore_ascii_case("true") {
        return true;
    }
    if t.eq_ignore_ascii_case("false") {
        return false;
    }
    match parse::parse_f64_with(
        t,
        NumberStyle::FLOAT.with_thousands(),
        context,
    ) {
        Some(f) => f != 0.0,
        None => false,
    }
}

/// Converts a value to a 32-bit signed integer under the invariant
/// context.
pub fn to_i32(value: &Value) -> Option<i32> {
    to_i32_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a 32-bit signed integer.
///
/// Real-number input rounds half to even and must land in range.
pub fn to_i32_with(value: &Value, context: &FormatContext) -> Option<i32> {
    match value {
        Value::I32(n) => Some(*n),
        _ => to_i64_with(value, context).and_then(|n| i32::try_from(n).ok()),
    }
}

/// Converts a value to a 64-bit signed integer under the invariant
/// context.
pub fn to_i64(value: &Value) -> Option<i64> {
    to_i64_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a 64-bit signed integer.
///
/// Real-number input rounds half to even and must land in range.
pub fn to_i64_with(value: &Value, context: &FormatContext) -> Option<i64> {
    match value {
        Value::Null => None,
        Value::I64(n) => Some(*n),
        Value::I32(n) => Some(i64::from(*n)),
        Value::Bool(b) => Some(i64::from(*b)),
        Value::F64(f) => float_to_i64(*f),
        Value::Decimal(d) => d.round().to_i64(),
        Value::Enum(e) => Some(e.value()),
        Value::DateTime(_) | Value::DateTimeOffset(_) => None,
        Value::Text(s) => parse::parse_i64_with(s, NumberStyle::INTEGER, context),
    }
}

fn float_to_i64(f: f64) -> Option<i64> {
    if !f.is_finite() {
        return None;
    }
    let rounded = f.round_ties_even();
    // i64::MAX is not exactly representable as f64; the exclusive upper
    // bound 2^63 is.
    if rounded >= -(2f64.powi(63)) && rounded < 2f64.powi(63) {
        Some(rounded as i64)
    } else {
        None
    }
}

/// Converts a value to a double-precision floating-point number under the
/// invariant context.
pub fn to_f64(value: &Value) -> Option<f64> {
    to_f64_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a double-precision floating-point number.
pub fn to_f64_with(value: &Value, context: &FormatContext) -> Option<f64> {
    match value {
        Value::Null => None,
        Value::F64(f) => Some(*f),
        Value::I32(n) => Some(f64::from(*n)),
        Value::I64(n) => Some(*n as f64),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Decimal(d) => d.to_f64(),
        Value::Enum(e) => Some(e.value() as f64),
        Value::DateTime(_) | Value::DateTimeOffset(_) => None,
        Value::Text(s) => parse::parse_f64_with(
            s,
            NumberStyle::FLOAT.with_thousands(),
            context,
        ),
    }
}

/// Converts a value to a decimal number under the invariant context.
pub fn to_decimal(value: &Value) -> Option<Decimal> {
    to_decimal_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a decimal number.
pub fn to_decimal_with(value: &Value, context: &FormatContext) -> Option<Decimal> {
    match value {
        Value::Null => None,
        Value::Decimal(d) => Some(*d),
        Value::I32(n) => Some(Decimal::from(*n)),
        Value::I64(n) => Some(Decimal::from(*n)),
        Value::Bool(b) => Some(if *b { Decimal::ONE } else { Decimal::ZERO }),
        Value::F64(f) => Decimal::from_f64(*f),
        Value::Enum(e) => Some(Decimal::from(e.value())),
        Value::DateTime(_) | Value::DateTimeOffset(_) => None,
        Value::Text(s) => parse::parse_decimal_with(s, NumberStyle::NUMBER, context),
    }
}

/// Converts a value to a date and time without offset under the invariant
/// context.
pub fn to_date_time(value: &Value) -> Option<NaiveDateTime> {
    to_date_time_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a date and time without offset.
///
/// An offset-carrying input yields its UTC wall time. Raw numbers are not
/// interpreted as epoch counts here; that reading belongs to
/// [`to_date_time_offset`] and the explicit helpers in
/// [`crate::datetime`].
pub fn to_date_time_with(value: &Value, context: &FormatContext) -> Option<NaiveDateTime> {
    match value {
        Value::DateTime(dt) => Some(*dt),
        Value::DateTimeOffset(dt) => Some(dt.naive_utc()),
        Value::Text(s) => parse::parse_date_time_with(s, context),
        _ => None,
    }
}

/// Converts a value to a date without time under the invariant context.
pub fn to_date(value: &Value) -> Option<NaiveDate> {
    to_date_with(value, &FormatContext::INVARIANT)
}

/// Converts a value to a date without time.
///
/// The value converts as a full date-time first; the time portion is then
/// discarded.
pub fn to_date_with(value: &Value, context: &FormatContext) -> Option<NaiveDate> {
    to_date_time_with(value, context).map(|dt| dt.date())
}

/// Converts a value to a date and time with offset under the invariant
/// context.
pub fn to_date_time_offset(value: &Value) -> Option<DateTime<FixedOffset>> {
    to_date_time_offset_with(value, DateStyle::None, &FormatContext::INVARIANT)
}

/// Converts a value to a date and time with offset.
///
/// Raw integer input is read as a UTC-epoch seconds count. A bare wall
/// time takes the system local offset; an input built from a UTC instant
/// already carries a zero offset.
pub fn to_date_time_offset_with(
    value: &Value,
    style: DateStyle,
    context: &FormatContext,
) -> Option<DateTime<FixedOffset>> {
    match value {
        Value::DateTimeOffset(dt) => Some(*dt),
        Value::DateTime(dt) => parse::local_offset(*dt),
        Value::I32(n) => epoch_seconds(i64::from(*n)),
        Value::I64(n) => epoch_seconds(*n),
        Value::Text(s) => parse::parse_date_time_offset_with(s, style, context),
        _ => None,
    }
}

fn epoch_seconds(seconds: i64) -> Option<DateTime<FixedOffset>> {
    DateTime::<Utc>::from_timestamp(seconds, 0).map(|dt| dt.fixed_offset())
}

/// Converts a value to a member of the enumeration `T`.
///
/// An enumeration input converts only within its own type; members of a
/// foreign enumeration are never coerced, regardless of numeric
/// compatibility. Textual input follows [`parse::parse_enum`]; integral
/// input, including whole real numbers, goes through the enumeration's
/// own `from_value`.
pub fn to_enum<T: Enumeration>(value: &Value) -> Option<T> {
    match value {
        Value::Null => None,
        Value::Enum(e) => e.downcast::<T>(),
        Value::Text(s) => parse::parse_enum::<T>(s),
        Value::I32(n) => T::from_value(i64::from(*n)),
        Value::I64(n) => T::from_value(*n),
        Value::F64(f) if f.fract() == 0.0 => float_to_i64(*f).and_then(T::from_value),
        Value::Decimal(d) if d.fract().is_zero() => d.to_i64().and_then(T::from_value),
        _ => None,
    }
}

/// The natural text projection of a value. Absent input yields the empty
/// string.
pub fn to_text(value: &Value) -> String {
    value.text()
}
