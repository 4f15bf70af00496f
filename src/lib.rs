//! # convert-kit
//!
//! Small, independent utility surfaces for everyday plumbing:
//!
//! - **Conversion layer:** parse text into primitives and normalize
//!   arbitrary tagged values to a requested target type, with one uniform
//!   failure mode — absence, never a panic or an error value
//! - **JSON cache wrapper:** typed get/set over any byte-oriented
//!   distributed cache, plus an in-memory backend with absolute and
//!   sliding expiration
//! - **HTTP logging:** a `reqwest` middleware that dumps outbound
//!   requests and responses through the `log` facade
//!
//! ## Quick Start
//!
//! ```
//! use convert_kit::{convert, parse, Value};
//!
//! // Text to primitives: malformed input is absence, not an error.
//! assert_eq!(parse::parse_i32("9527"), Some(9527));
//! assert_eq!(parse::parse_i32("x"), None);
//!
//! // Values of unknown declared type normalize the same way.
//! assert_eq!(convert::to_i32(&Value::from(9527)), Some(9527));
//! assert_eq!(convert::to_i32(&Value::from("9527")), Some(9527));
//! assert!(!convert::to_boolean(&Value::Null));
//! ```
//!
//! Enumerations participate through the [`Enumeration`] trait, usually
//! via the [`enumeration!`] and [`flags!`] macros:
//!
//! ```
//! use convert_kit::{enumeration, parse};
//!
//! enumeration! {
//!     pub enum FileMode {
//!         CreateNew = 1,
//!         Create = 2,
//!         Open = 3,
//!     }
//! }
//!
//! assert_eq!(parse::parse_enum::<FileMode>("OPEN"), Some(FileMode::Open));
//! assert_eq!(parse::parse_enum::<FileMode>("3"), Some(FileMode::Open));
//! ```

#[macro_use]
extern crate log;

#[macro_use]
pub mod enumeration;

pub mod context;
pub mod convert;
pub mod datetime;
pub mod error;
pub mod hex;
pub mod parse;
pub mod value;

#[cfg(feature = "cache")]
pub mod cache;

#[cfg(feature = "http")]
pub mod http;

// Re-exports for convenience
pub use context::{DateStyle, FormatContext, NumberFormat, NumberStyle};
pub use enumeration::Enumeration;
pub use error::{Error, Result};
pub use value::{Convertible, EnumValue, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
