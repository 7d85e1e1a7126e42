use crate::ids::{IdSource, RequestId};
use may_minihttp::Request;
use std::collections::HashMap;
use std::io::Read;
use tracing::{debug, warn};

/// Parsed HTTP request data used by `AppService`.
///
/// The body is kept as raw bytes; decoding into a batch is the service's job so that a
/// decode failure can be answered with its own message.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRequest {
    /// Correlation id, from `x-request-id` when valid
    pub request_id: RequestId,
    pub id_source: IdSource,
    /// HTTP method (GET, POST, etc.)
    pub method: String,
    /// Request path without the query string
    pub path: String,
    /// HTTP headers (lowercase keys)
    pub headers: HashMap<String, String>,
    /// Raw request body
    pub body: Vec<u8>,
}

impl ParsedRequest {
    /// Build a header-less request with a freshly minted id.
    pub fn new(method: &str, path: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            request_id: RequestId::generate(),
            id_source: IdSource::Generated,
            method: method.to_string(),
            path: strip_query(path).to_string(),
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    /// Attach headers (keys already lowercase) and adopt `x-request-id` from them.
    #[must_use]
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        let (request_id, id_source) = RequestId::resolve(self.header("x-request-id"));
        self.request_id = request_id;
        self.id_source = id_source;
        self
    }

    /// Get a header by name (case-insensitive)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

fn strip_query(path: &str) -> &str {
    path.split('?').next().unwrap_or("/")
}

/// Parse an incoming `may_minihttp::Request` into a [`ParsedRequest`].
///
/// A body read failure is logged and treated as an empty body, which the decoder then
/// rejects with a 400.
pub fn parse_request(req: Request) -> ParsedRequest {
    let headers: HashMap<String, String> = req
        .headers()
        .iter()
        .map(|h| {
            (
                h.name.to_ascii_lowercase(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect();

    let mut parsed =
        ParsedRequest::new(req.method(), req.path(), Vec::new()).with_headers(headers);

    if let Err(e) = req.body().read_to_end(&mut parsed.body) {
        warn!(request_id = %parsed.request_id, error = %e, "Failed to read request body");
        parsed.body.clear();
    }

    debug!(
        request_id = %parsed.request_id,
        id_source = parsed.id_source.as_str(),
        method = %parsed.method,
        path = %parsed.path,
        header_count = parsed.headers.len(),
        body_size_bytes = parsed.body.len(),
        "HTTP request parsed"
    );

    parsed
}
