//! Primitive parser: textual representations into typed values.
//!
//! Every operation follows the same contract: empty or all-whitespace input
//! yields absence (`false` for booleans), malformed or out-of-range input
//! yields absence, and nothing here panics or returns an error type.

use crate::context::{DateStyle, FormatContext, NumberFormat, NumberStyle};
use crate::enumeration::Enumeration;
use chrono::{
    DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc,
};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Invariant date-time formats accepted for offset-less input, most
/// specific first.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %H:%M",
];

/// Invariant date-time formats carrying an explicit UTC offset.
const DATE_TIME_OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%m/%d/%Y %I:%M:%S %p %:z",
    "%m/%d/%Y %H:%M:%S %:z",
];

/// Invariant date-only formats.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%B %e, %Y", "%b %e, %Y"];

/// Parses the canonical textual spellings of a logical value.
///
/// Only `true` and `false` (ASCII-case-insensitive, surrounding whitespace
/// ignored) are recognized; any other text, including numeric text, yields
/// `false`. Callers that want truthy-numeric semantics go through
/// [`crate::convert::to_boolean`].
pub fn parse_boolean(text: &str) -> bool {
    let t = text.trim();
    t.eq_ignore_ascii_case("true")
}

/// Parses a 32-bit signed integer under the invariant context.
pub fn parse_i32(text: &str) -> Option<i32> {
    parse_i32_with(text, NumberStyle::INTEGER, &FormatContext::INVARIANT)
}

/// Parses a 32-bit signed integer honoring the given style and locale.
pub fn parse_i32_with(text: &str, style: NumberStyle, context: &FormatContext) -> Option<i32> {
    let normalized = normalize_number(text, style, &context.numbers)?;
    i32::from_str(&normalized).ok()
}

/// Parses a 64-bit signed integer under the invariant context.
pub fn parse_i64(text: &str) -> Option<i64> {
    parse_i64_with(text, NumberStyle::INTEGER, &FormatContext::INVARIANT)
}

/// Parses a 64-bit signed integer honoring the given style and locale.
pub fn parse_i64_with(text: &str, style: NumberStyle, context: &FormatContext) -> Option<i64> {
    let normalized = normalize_number(text, style, &context.numbers)?;
    i64::from_str(&normalized).ok()
}

/// Parses a double-precision floating-point number under the invariant
/// context, accepting group separators.
pub fn parse_f64(text: &str) -> Option<f64> {
    parse_f64_with(
        text,
        NumberStyle::FLOAT.with_thousands(),
        &FormatContext::INVARIANT,
    )
}

/// Parses a double-precision floating-point number honoring the given
/// style and locale.
///
/// Non-finite spellings (`NaN`, `inf`) are rejected: a value that cannot
/// participate in further conversion is treated as not convertible.
pub fn parse_f64_with(text: &str, style: NumberStyle, context: &FormatContext) -> Option<f64> {
    let normalized = normalize_number(text, style, &context.numbers)?;
    f64::from_str(&normalized).ok().filter(|f| f.is_finite())
}

/// Parses a decimal number under the invariant context.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    parse_decimal_with(text, NumberStyle::NUMBER, &FormatContext::INVARIANT)
}

/// Parses a decimal number honoring the given style and locale.
pub fn parse_decimal_with(
    text: &str,
    style: NumberStyle,
    context: &FormatContext,
) -> Option<Decimal> {
    let normalized = normalize_number(text, style, &context.numbers)?;
    if style.allow_exponent && normalized.contains(['e', 'E']) {
        return Decimal::from_scientific(&normalized).ok();
    }
    Decimal::from_str(&normalized).ok()
}

/// Maps locale-specific separators to the invariant spelling and enforces
/// the style flags. Returns `None` when the text is empty, all-whitespace,
/// or uses a notation the style does not allow.
fn normalize_number(text: &str, style: NumberStyle, format: &NumberFormat) -> Option<String> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if !style.allow_sign && (t.starts_with('+') || t.starts_with('-')) {
        return None;
    }
    let mut out = String::with_capacity(t.len());
    for c in t.chars() {
        if c == format.group_separator {
            if !style.allow_thousands {
                return None;
            }
            continue;
        }
        if c == format.decimal_separator {
            if !style.allow_decimal_point {
                return None;
            }
            out.push('.');
            continue;
        }
        if (c == 'e' || c == 'E') && !style.allow_exponent {
            return None;
        }
        out.push(c);
    }
    Some(out)
}

/// Parses a date and time without offset information under the invariant
/// context.
pub fn parse_date_time(text: &str) -> Option<NaiveDateTime> {
    parse_date_time_with(text, &FormatContext::INVARIANT)
}

/// Parses a date and time without offset information.
///
/// Input carrying an explicit offset is accepted too; the result is the
/// wall time at that offset.
pub fn parse_date_time_with(text: &str, _context: &FormatContext) -> Option<NaiveDateTime> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(t, format) {
            return Some(dt);
        }
    }
    if let Some(dt) = parse_with_offset(t) {
        return Some(dt.naive_local());
    }
    // Date-only input resolves to midnight.
    parse_date_inner(t).and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Parses a date and time with offset under the invariant context,
/// resolving offset-less input to the system local offset.
pub fn parse_date_time_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    parse_date_time_offset_with(text, DateStyle::None, &FormatContext::INVARIANT)
}

/// Parses a date and time with offset.
///
/// An explicit offset in the text always wins. Otherwise the `style`
/// decides the anchor: [`DateStyle::AssumeUniversal`] yields a zero
/// offset, [`DateStyle::AssumeLocal`] and [`DateStyle::None`] yield the
/// system local offset in effect at that wall time.
pub fn parse_date_time_offset_with(
    text: &str,
    style: DateStyle,
    context: &FormatContext,
) -> Option<DateTime<FixedOffset>> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if let Some(dt) = parse_with_offset(t) {
        return Some(dt);
    }
    let naive = parse_date_time_with(t, context)?;
    match style {
        DateStyle::AssumeUniversal => {
            Some(Utc.from_utc_datetime(&naive).fixed_offset())
        }
        DateStyle::None | DateStyle::AssumeLocal => local_offset(naive),
    }
}

/// Anchors a wall time in the system local time zone.
///
/// Ambiguous wall times (backward transitions) resolve to the earlier
/// instant; skipped wall times (forward transitions) are not convertible.
pub(crate) fn local_offset(naive: NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&dt.offset().fix()))
}

fn parse_with_offset(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt);
    }
    for format in DATE_TIME_OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    None
}

/// Parses a date without time under the invariant context. Time portions
/// of a date-time text are discarded.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    parse_date_inner(t).or_else(|| parse_date_time(t).map(|dt| dt.date()))
}

fn parse_date_inner(text: &str) -> Option<NaiveDate> {
    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(text, format) {
            return Some(d);
        }
    }
    None
}

/// Parses an enumeration member from its name or underlying numeric value.
///
/// Names match ASCII-case-insensitively. Comma-separated names combine
/// bitwise, which is only meaningful for flags types; for a plain
/// enumeration the combined value resolves only if it happens to be a
/// declared member. Pipe-separated input is not supported and yields
/// `None`.
pub fn parse_enum<T: Enumeration>(text: &str) -> Option<T> {
    let t = text.trim();
    if t.is_empty() {
        return None;
    }
    if let Ok(n) = t.parse::<i64>() {
        return T::from_value(n);
    }
    let mut combined = 0i64;
    for part in t.split(',') {
        let part = part.trim();
        if part.is_empty() {
            return None;
        }
        let (_, value) = T::MEMBERS
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(part))?;
        combined |= value;
    }
    T::from_value(combined)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;
    use proptest::prelude::*;

    enumeration! {
        enum FileMode {
            CreateNew = 1,
            Create = 2,
            Open = 3,
        }
    }

    flags! {
        struct FileAttributes {
            ReadOnly = 0x0001,
            Hidden = 0x0002,
            System = 0x0004,
            Directory = 0x0010,
            Archive = 0x0020,
        }
    }

    #[test]
    fn boolean_accepts_canonical_spellings_only() {
        assert!(parse_boolean("true"));
        assert!(parse_boolean("True"));
        assert!(parse_boolean("TRUE"));
        assert!(parse_boolean(" true "));
        assert!(!parse_boolean("false"));
        assert!(!parse_boolean("False"));
        assert!(!parse_boolean(""));
        assert!(!parse_boolean(" "));
        // Deliberate narrowing: numeric text is not truthy here.
        assert!(!parse_boolean("1"));
        assert!(!parse_boolean("0"));
        assert!(!parse_boolean("yes"));
    }

    #[test]
    fn i32_basic_and_edges() {
        assert_eq!(parse_i32("9527"), Some(9527));
        assert_eq!(parse_i32("-100"), Some(-100));
        assert_eq!(parse_i32("+7"), Some(7));
        assert_eq!(parse_i32("0"), Some(0));
        assert_eq!(parse_i32(""), None);
        assert_eq!(parse_i32(" "), None);
        assert_eq!(parse_i32("x"), None);
        assert_eq!(parse_i32("12.5"), None);
        // i32::MAX + 1 is out of range, not an error.
        assert_eq!(parse_i32("2147483648"), None);
        assert_eq!(parse_i32("2147483647"), Some(i32::MAX));
    }

    #[test]
    fn i64_basic_and_edges() {
        assert_eq!(parse_i64("9527"), Some(9527));
        assert_eq!(parse_i64("-9223372036854775808"), Some(i64::MIN));
        assert_eq!(parse_i64("9223372036854775808"), None);
        assert_eq!(parse_i64("1,234"), None);
        assert_eq!(parse_i64("\t"), None);
    }

    #[test]
    fn integer_style_can_opt_into_thousands() {
        let style = NumberStyle::INTEGER.with_thousands();
        assert_eq!(
            parse_i64_with("1,234,567", style, &FormatContext::INVARIANT),
            Some(1_234_567)
        );
    }

    #[test]
    fn f64_basic_and_edges() {
        assert_eq!(parse_f64("9527.5"), Some(9527.5));
        assert_eq!(parse_f64("-100.5"), Some(-100.5));
        assert_eq!(parse_f64("0.0"), Some(0.0));
        assert_eq!(parse_f64("1,234.5"), Some(1234.5));
        assert_eq!(parse_f64("1e3"), Some(1000.0));
        assert_eq!(parse_f64(""), None);
        assert_eq!(parse_f64("x"), None);
        assert_eq!(parse_f64("NaN"), None);
        assert_eq!(parse_f64("inf"), None);
    }

    #[test]
    fn locale_aware_numbers() {
        let de = FormatContext {
            numbers: NumberFormat {
                decimal_separator: ',',
                group_separator: '.',
            },
        };
        assert_eq!(
            parse_f64_with("1.234,5", NumberStyle::NUMBER, &de),
            Some(1234.5)
        );
        assert_eq!(
            parse_decimal_with("1.234,56", NumberStyle::NUMBER, &de),
            Decimal::from_str("1234.56").ok()
        );
    }

    #[test]
    fn decimal_basic_and_edges() {
        assert_eq!(parse_decimal("9527.56"), Decimal::from_str("9527.56").ok());
        assert_eq!(parse_decimal("1,234.56"), Decimal::from_str("1234.56").ok());
        assert_eq!(parse_decimal("-0.001"), Decimal::from_str("-0.001").ok());
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("x"), None);
        // NUMBER style rejects exponent notation.
        assert_eq!(parse_decimal("1e3"), None);
    }

    #[test]
    fn date_time_formats() {
        let expected = NaiveDate::from_ymd_opt(2006, 1, 2)
            .expect("valid date")
            .and_hms_opt(15, 4, 5)
            .expect("valid time");
        assert_eq!(parse_date_time("2006-01-02T15:04:05"), Some(expected));
        assert_eq!(parse_date_time("2006-01-02 15:04:05"), Some(expected));
        assert_eq!(parse_date_time("01/02/2006 15:04:05"), Some(expected));
        assert_eq!(parse_date_time("01/02/2006 3:04:05 PM"), Some(expected));
        assert_eq!(
            parse_date_time("2006-01-02"),
            NaiveDate::from_ymd_opt(2006, 1, 2).and_then(|d| d.and_hms_opt(0, 0, 0))
        );
        assert_eq!(parse_date_time(""), None);
        assert_eq!(parse_date_time("invalid date"), None);
        assert_eq!(parse_date_time("2006-13-01"), None);
    }

    #[test]
    fn date_time_offset_explicit_offset_wins() {
        let parsed = parse_date_time_offset("2006-01-02T15:04:05+02:00").expect("parses");
        assert_eq!(parsed.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(parsed.naive_local().hour(), 15);

        let assumed_utc = parse_date_time_offset_with(
            "2006-01-02 15:04:05",
            DateStyle::AssumeUniversal,
            &FormatContext::INVARIANT,
        )
        .expect("parses");
        assert_eq!(assumed_utc.offset().local_minus_utc(), 0);
        assert_eq!(assumed_utc.naive_utc().hour(), 15);
    }

    #[test]
    fn date_time_offset_offsetless_uses_local() {
        let parsed = parse_date_time_offset("2006-01-02 15:04:05").expect("parses");
        let expected = local_offset(
            NaiveDate::from_ymd_opt(2006, 1, 2)
                .expect("valid date")
                .and_hms_opt(15, 4, 5)
                .expect("valid time"),
        )
        .expect("resolvable in local zone");
        assert_eq!(parsed, expected);
    }

    #[test]
    fn date_time_offset_rejects_malformed() {
        assert_eq!(parse_date_time_offset(""), None);
        assert_eq!(parse_date_time_offset(" "), None);
        assert_eq!(parse_date_time_offset("invalid date"), None);
        assert_eq!(parse_date_time_offset("2006-13-01"), None);
    }

    #[test]
    fn date_only() {
        let expected = NaiveDate::from_ymd_opt(2006, 1, 2);
        assert_eq!(parse_date("2006-01-02"), expected);
        assert_eq!(parse_date("01/02/2006"), expected);
        assert_eq!(parse_date("January 2, 2006"), expected);
        // Time portion is discarded.
        assert_eq!(parse_date("2006-01-02 15:04:05"), expected);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2023-13-01"), None);
    }

    #[test]
    fn enum_by_name_case_insensitive() {
        assert_eq!(parse_enum::<FileMode>("Open"), Some(FileMode::Open));
        assert_eq!(parse_enum::<FileMode>("open"), Some(FileMode::Open));
        assert_eq!(parse_enum::<FileMode>("OPEN"), Some(FileMode::Open));
        assert_eq!(parse_enum::<FileMode>("oPeN"), Some(FileMode::Open));
    }

    #[test]
    fn enum_by_numeric_text() {
        assert_eq!(parse_enum::<FileMode>("1"), Some(FileMode::CreateNew));
        assert_eq!(parse_enum::<FileMode>("3"), Some(FileMode::Open));
        // Plain enumerations validate membership.
        assert_eq!(parse_enum::<FileMode>("9"), None);
    }

    #[test]
    fn enum_rejects_blank_and_malformed() {
        for input in ["", " ", "  ", "\t", "\n", "\r\n"] {
            assert_eq!(parse_enum::<FileMode>(input), None, "input {input:?}");
        }
        for input in ["invalid", "OpenInvalid", "123abc", "abc123", "!@#$%"] {
            assert_eq!(parse_enum::<FileMode>(input), None, "input {input:?}");
        }
    }

    #[test]
    fn flags_comma_separated_combine() {
        assert_eq!(
            parse_enum::<FileAttributes>("ReadOnly, Hidden"),
            Some(FileAttributes::ReadOnly | FileAttributes::Hidden)
        );
        assert_eq!(
            parse_enum::<FileAttributes>("readonly, hidden"),
            Some(FileAttributes::ReadOnly | FileAttributes::Hidden)
        );
        assert_eq!(
            parse_enum::<FileAttributes>("ReadOnly, Hidden, System"),
            Some(FileAttributes::ReadOnly | FileAttributes::Hidden | FileAttributes::System)
        );
        assert_eq!(
            parse_enum::<FileAttributes>("Directory, ReadOnly"),
            Some(FileAttributes::Directory | FileAttributes::ReadOnly)
        );
    }

    #[test]
    fn flags_pipe_separated_unsupported() {
        for input in [
            "ReadOnly|Hidden",
            "readonly|hidden",
            "READONLY|HIDDEN",
            "ReadOnly|Hidden|System",
            "Archive|Directory",
        ] {
            assert_eq!(parse_enum::<FileAttributes>(input), None, "input {input:?}");
        }
        assert_eq!(parse_enum::<FileMode>("Open|Create"), None);
    }

    proptest! {
        #[test]
        fn i64_round_trips_through_text(n in any::<i64>()) {
            prop_assert_eq!(parse_i64(&n.to_string()), Some(n));
        }

        #[test]
        fn i32_round_trips_through_text(n in any::<i32>()) {
            prop_assert_eq!(parse_i32(&n.to_string()), Some(n));
        }

        #[test]
        fn rfc3339_round_trips(secs in 0i64..=4_102_444_800, offset_mins in -14 * 60..=14 * 60) {
            let offset = FixedOffset::east_opt(offset_mins * 60).expect("in range");
            let dt = DateTime::from_timestamp(secs, 0)
                .expect("in range")
                .with_timezone(&offset);
            prop_assert_eq!(parse_date_time_offset(&dt.to_rfc3339()), Some(dt));
        }
    }
}
