//! Request/response logging middleware for outbound `reqwest` clients.

use super::HttpLoggingOptions;
use async_trait::async_trait;
use http::Extensions;
use reqwest::{Request, Response, ResponseBuilderExt};
use reqwest_middleware::{Middleware, Next};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

/// Middleware that logs a wire-style dump of every outbound request and
/// its response, together with an in-flight request count and elapsed
/// time.
///
/// # Example
///
/// ```no_run
/// use convert_kit::http::{HttpLoggingOptions, LoggingMiddleware};
/// use reqwest_middleware::ClientBuilder;
///
/// let client = ClientBuilder::new(reqwest::Client::new())
///     .with(LoggingMiddleware::new(HttpLoggingOptions::default()))
///     .build();
/// ```
pub struct LoggingMiddleware {
    options: HttpLoggingOptions,
    in_flight: AtomicUsize,
}

impl LoggingMiddleware {
    /// Create the middleware with the given options.
    pub fn new(options: HttpLoggingOptions) -> Self {
        LoggingMiddleware {
            options,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Requests currently between send and completion.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

impl Default for LoggingMiddleware {
    fn default() -> Self {
        LoggingMiddleware::new(HttpLoggingOptions::default())
    }
}

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        req: Request,
        extensions: &mut Extensions,
        next: Next<'_>,
    ) -> reqwest_middleware::Result<Response> {
        if !self.options.enabled {
            return next.run(req, extensions).await;
        }

        let queued = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        info!("Request-Queue: {}", queued);

        let watch = Instant::now();
        let request_dump = format_request(&req, &self.options);
        info!("Request-Message:\n\n{}", request_dump);

        let result = next.run(req, extensions).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match result {
            Err(e) => {
                error!(
                    "Request-Error: {}, elapsed: {}ms\n\n{}",
                    e,
                    watch.elapsed().as_millis(),
                    request_dump
                );
                Err(e)
            }
            Ok(response) => {
                let (response, response_dump) =
                    dump_response(response, &self.options).await?;
                info!(
                    "Response-Message: {}ms\n\n{}",
                    watch.elapsed().as_millis(),
                    response_dump
                );
                Ok(response)
            }
        }
    }
}

fn version_str(version: http::Version) -> &'static str {
    match version {
        http::Version::HTTP_09 => "HTTP/0.9",
        http::Version::HTTP_10 => "HTTP/1.0",
        http::Version::HTTP_11 => "HTTP/1.1",
        http::Version::HTTP_2 => "HTTP/2",
        http::Version::HTTP_3 => "HTTP/3",
        _ => "HTTP/?",
    }
}

fn is_ignored(name: &str, ignored: &[String]) -> bool {
    ignored.iter().any(|h| h.eq_ignore_ascii_case(name))
}

/// Renders a wire-style dump of an outbound request: request line,
/// headers not on the ignore list, and the body when enabled and held in
/// memory.
pub fn format_request(req: &Request, options: &HttpLoggingOptions) -> String {
    let mut out = format!(
        "{} {} {}\n",
        req.method(),
        req.url(),
        version_str(req.version())
    );
    for (name, value) in req.headers() {
        if is_ignored(name.as_str(), &options.ignore_request_headers) {
            continue;
        }
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(value.to_str().unwrap_or("<binary>"));
        out.push('\n');
    }
    if options.log_request_body {
        if let Some(bytes) = req.body().and_then(|b| b.as_bytes()) {
            out.push('\n');
            out.push_str(&String::from_utf8_lossy(bytes));
        }
    }
    out
}

/// Renders a wire-style dump of a response, buffering and rebuilding it
/// when the body is captured so the caller still observes the full body.
async fn dump_response(
    response: Response,
    options: &HttpLoggingOptions,
) -> reqwest_middleware::Result<(Response, String)> {
    let mut out = format!(
        "{} {}\n",
        version_str(response.version()),
        response.status()
    );
    for (name, value) in response.headers() {
        if is_ignored(name.as_str(), &options.ignore_response_headers) {
            continue;
        }
        out.push_str(name.as_str());
        out.push_str(": ");
        out.push_str(value.to_str().unwrap_or("<binary>"));
        out.push('\n');
    }

    if !options.log_response_body {
        return Ok((response, out));
    }

    let status = response.status();
    let version = response.version();
    let headers = response.headers().clone();
    let url = response.url().clone();
    let bytes = response.bytes().await.map_err(reqwest_middleware::Error::Reqwest)?;

    out.push('\n');
    out.push_str(&String::from_utf8_lossy(&bytes));

    // The URL rides along as an extension so the rebuilt response keeps it.
    let mut builder = http::Response::builder()
        .status(status)
        .version(version)
        .url(url);
    for (name, value) in headers.iter() {
        builder = builder.header(name, value);
    }
    let rebuilt = builder
        .body(bytes)
        .map_err(|e| reqwest_middleware::Error::Middleware(anyhow::Error::new(e)))?;
    Ok((Response::from(rebuilt), out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::routing::{get, post};
    use axum::Router;
    use reqwest_middleware::ClientBuilder;
    use std::net::SocketAddr;
    use std::sync::Arc;

    fn init_logs() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    async fn spawn_server() -> SocketAddr {
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route("/echo", post(|body: String| async move { body }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind succeeds");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("server runs");
        });
        addr
    }

    #[tokio::test]
    async fn round_trip_with_logging() {
        init_logs();
        let addr = spawn_server().await;
        let middleware = Arc::new(LoggingMiddleware::default());
        let client = ClientBuilder::new(reqwest::Client::new())
            .with_arc(middleware.clone())
            .build();

        let response = client
            .get(format!("http://{addr}/ping"))
            .send()
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        assert_eq!(response.text().await.expect("body"), "pong");
        assert_eq!(middleware.in_flight(), 0);
    }

    #[tokio::test]
    async fn response_body_capture_preserves_body() {
        init_logs();
        let addr = spawn_server().await;
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(LoggingMiddleware::new(
                HttpLoggingOptions::default().with_response_body(),
            ))
            .build();

        let response = client
            .post(format!("http://{addr}/echo"))
            .body("hello, world")
            .send()
            .await
            .expect("request succeeds");
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        // The middleware consumed and rebuilt the response; the caller
        // still gets the whole body and the original request URL.
        assert_eq!(response.url().as_str(), format!("http://{addr}/echo"));
        assert_eq!(response.text().await.expect("body"), "hello, world");
    }

    #[tokio::test]
    async fn disabled_middleware_passes_through() {
        let addr = spawn_server().await;
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(LoggingMiddleware::new(HttpLoggingOptions::disabled()))
            .build();

        let response = client
            .get(format!("http://{addr}/ping"))
            .send()
            .await
            .expect("request succeeds");
        assert_eq!(response.text().await.expect("body"), "pong");
    }

    #[tokio::test]
    async fn transport_errors_are_propagated() {
        // Nothing listens on this port.
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(LoggingMiddleware::default())
            .build();
        let result = client.get("http://127.0.0.1:1/ping").send().await;
        assert!(result.is_err());
    }

    #[test]
    fn request_dump_contains_line_and_headers() {
        let client = reqwest::Client::new();
        let req = client
            .get("http://example.com/path")
            .header("X-Trace", "abc123")
            .header("Authorization", "Bearer secret")
            .build()
            .expect("builds");

        let options = HttpLoggingOptions::default().ignore_request_header("authorization");
        let dump = format_request(&req, &options);
        assert!(dump.starts_with("GET http://example.com/path HTTP/1.1"));
        assert!(dump.contains("x-trace: abc123"));
        assert!(!dump.contains("secret"));
    }

    #[test]
    fn request_body_dumped_only_when_enabled() {
        let client = reqwest::Client::new();
        let req = client
            .post("http://example.com/")
            .body("payload")
            .build()
            .expect("builds");

        let silent = format_request(&req, &HttpLoggingOptions::default());
        assert!(!silent.contains("payload"));

        let verbose = format_request(&req, &HttpLoggingOptions::default().with_request_body());
        assert!(verbose.contains("payload"));
    }
}
