//! Configuration for the outbound HTTP logging middleware.

/// Programmatic configuration for [`crate::http::LoggingMiddleware`].
///
/// Logging is enabled by default; body capture is off by default because
/// capturing a response body forces buffering it in memory.
#[derive(Clone, Debug)]
pub struct HttpLoggingOptions {
    /// Whether the middleware logs at all. When `false` it is a
    /// pass-through.
    pub enabled: bool,
    /// Include the request body in the request dump, when it is an
    /// in-memory body.
    pub log_request_body: bool,
    /// Include the response body in the response dump. The body is
    /// buffered and the response rebuilt so the caller still sees it.
    pub log_response_body: bool,
    /// Request header names omitted from the dump, case-insensitive.
    pub ignore_request_headers: Vec<String>,
    /// Response header names omitted from the dump, case-insensitive.
    pub ignore_response_headers: Vec<String>,
}

impl Default for HttpLoggingOptions {
    fn default() -> Self {
        HttpLoggingOptions {
            enabled: true,
            log_request_body: false,
            log_response_body: false,
            ignore_request_headers: Vec::new(),
            ignore_response_headers: Vec::new(),
        }
    }
}

impl HttpLoggingOptions {
    /// Disable the middleware entirely.
    pub fn disabled() -> Self {
        HttpLoggingOptions {
            enabled: false,
            ..Default::default()
        }
    }

    /// Include request bodies in the dump.
    pub fn with_request_body(mut self) -> Self {
        self.log_request_body = true;
        self
    }

    /// Include response bodies in the dump.
    pub fn with_response_body(mut self) -> Self {
        self.log_response_body = true;
        self
    }

    /// Omit the given request header from the dump.
    pub fn ignore_request_header(mut self, name: impl Into<String>) -> Self {
        self.ignore_request_headers.push(name.into());
        self
    }

    /// Omit the given response header from the dump.
    pub fn ignore_response_header(mut self, name: impl Into<String>) -> Self {
        self.ignore_response_headers.push(name.into());
        self
    }
}
