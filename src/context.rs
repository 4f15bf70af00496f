//! Locale and style configuration carried through conversion calls.

/// Locale-specific number formatting symbols.
///
/// The default is the invariant format: `.` as the decimal separator and
/// `,` as the group separator.
///
/// # Example
///
/// ```
/// use convert_kit::context::NumberFormat;
///
/// let de = NumberFormat {
///     decimal_separator: ',',
///     group_separator: '.',
/// };
/// assert_ne!(de, NumberFormat::default());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub group_separator: char,
}

impl NumberFormat {
    /// The invariant format: `.` decimal separator, `,` group separator.
    pub const INVARIANT: NumberFormat = NumberFormat {
        decimal_separator: '.',
        group_separator: ',',
    };
}

impl Default for NumberFormat {
    fn default() -> Self {
        NumberFormat::INVARIANT
    }
}

/// Flags controlling which numeric notations a parse accepts.
///
/// Presets mirror the common style families: integer parses reject group
/// separators and decimal points, float parses accept a decimal point and
/// an exponent, and number parses accept group separators and a decimal
/// point but no exponent.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NumberStyle {
    pub allow_sign: bool,
    pub allow_thousands: bool,
    pub allow_decimal_point: bool,
    pub allow_exponent: bool,
}

impl NumberStyle {
    /// Signed whole numbers only.
    pub const INTEGER: NumberStyle = NumberStyle {
        allow_sign: true,
        allow_thousands: false,
        allow_decimal_point: false,
        allow_exponent: false,
    };

    /// Signed real numbers with optional exponent notation.
    pub const FLOAT: NumberStyle = NumberStyle {
        allow_sign: true,
        allow_thousands: false,
        allow_decimal_point: true,
        allow_exponent: true,
    };

    /// Signed real numbers with group separators, no exponent.
    pub const NUMBER: NumberStyle = NumberStyle {
        allow_sign: true,
        allow_thousands: true,
        allow_decimal_point: true,
        allow_exponent: false,
    };

    /// Copy of `self` that also accepts group separators.
    pub const fn with_thousands(mut self) -> Self {
        self.allow_thousands = true;
        self
    }
}

/// How an offset-less date-time text is anchored when an offset result is
/// requested.
///
/// `None` resolves to the system local offset, matching the behavior of
/// offset parsing without an explicit assumption.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DateStyle {
    #[default]
    None,
    AssumeLocal,
    AssumeUniversal,
}

/// Bundled locale configuration passed through a conversion call.
///
/// The default context is the invariant configuration, which is also what
/// every parse and convert function without an explicit `_with` variant
/// uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatContext {
    pub numbers: NumberFormat,
}

impl FormatContext {
    /// The invariant context.
    pub const INVARIANT: FormatContext = FormatContext {
        numbers: NumberFormat::INVARIANT,
    };
}
