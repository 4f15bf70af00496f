//! Logging for outbound HTTP clients.
//!
//! [`LoggingMiddleware`] plugs into a `reqwest_middleware` client stack
//! and logs wire-style dumps of requests and responses through the `log`
//! facade.

mod logging;
mod options;

pub use logging::{format_request, LoggingMiddleware};
pub use options::HttpLoggingOptions;
