//! Enumeration protocol used by the text and value converters.
//!
//! Rust has no runtime reflection over enum members, so types opt in to
//! enumeration conversion by implementing [`Enumeration`], usually through
//! the [`enumeration!`] or [`flags!`] macros.

/// A type convertible to and from its member names and underlying numeric
/// value.
///
/// Plain enumerations (via [`enumeration!`]) are closed types: `from_value`
/// accepts declared members only. Flag sets (via [`flags!`]) combine
/// bitwise and keep their permissive historical contract: `from_value`
/// accepts any bit pattern, declared or not.
pub trait Enumeration: Copy + PartialEq + Send + Sync + Sized + 'static {
    /// Declared members as `(name, value)` pairs.
    const MEMBERS: &'static [(&'static str, i64)];

    /// Whether members combine bitwise.
    const FLAGS: bool = false;

    /// Build a member from its underlying numeric value.
    fn from_value(value: i64) -> Option<Self>;

    /// The member's underlying numeric value.
    fn value(self) -> i64;

    /// The declared name for `self`, if it is a declared member.
    fn name(self) -> Option<&'static str> {
        let v = self.value();
        Self::MEMBERS
            .iter()
            .find(|(_, value)| *value == v)
            .map(|(name, _)| *name)
    }
}

/// Declares a plain fieldless enum and implements [`Enumeration`] for it.
///
/// # Example
///
/// ```
/// use convert_kit::{enumeration, Enumeration};
///
/// enumeration! {
///     pub enum FileMode {
///         CreateNew = 1,
///         Create = 2,
///         Open = 3,
///     }
/// }
///
/// assert_eq!(FileMode::from_value(3), Some(FileMode::Open));
/// assert_eq!(FileMode::from_value(9), None);
/// assert_eq!(FileMode::Open.value(), 3);
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($member:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(i64)]
        $vis enum $name {
            $($member = $value),+
        }

        impl $crate::Enumeration for $name {
            const MEMBERS: &'static [(&'static str, i64)] =
                &[$((stringify!($member), $value)),+];

            fn from_value(value: i64) -> Option<Self> {
                match value {
                    $(v if v == $value => Some(Self::$member),)+
                    _ => None,
                }
            }

            fn value(self) -> i64 {
                self as i64
            }
        }
    };
}

/// Declares a bit-set newtype with named constants and implements
/// [`Enumeration`] for it.
///
/// Members combine with `|`. Numeric input is not validated against the
/// declared members, so undeclared bit patterns round-trip unchanged.
///
/// # Example
///
/// ```
/// use convert_kit::{flags, Enumeration};
///
/// flags! {
///     pub struct FileAttributes {
///         ReadOnly = 0x0001,
///         Hidden = 0x0002,
///         System = 0x0004,
///     }
/// }
///
/// let combined = FileAttributes::ReadOnly | FileAttributes::Hidden;
/// assert_eq!(combined.value(), 0x0003);
/// assert_eq!(FileAttributes::from_value(0x0400), Some(FileAttributes(0x0400)));
/// ```
#[macro_export]
macro_rules! flags {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $($member:ident = $value:expr),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        $vis struct $name(pub i64);

        impl $name {
            $(#[allow(non_upper_case_globals)]
            $vis const $member: $name = $name($value);)+

            /// Whether every bit of `other` is set in `self`.
            $vis fn contains(self, other: $name) -> bool {
                self.0 & other.0 == other.0
            }
        }

        impl core::ops::BitOr for $name {
            type Output = $name;

            fn bitor(self, rhs: $name) -> $name {
                $name(self.0 | rhs.0)
            }
        }

        impl $crate::Enumeration for $name {
            const MEMBERS: &'static [(&'static str, i64)] =
                &[$((stringify!($member), $value)),+];

            const FLAGS: bool = true;

            fn from_value(value: i64) -> Option<Self> {
                Some($name(value))
            }

            fn value(self) -> i64 {
                self.0
            }
        }
    };
}
