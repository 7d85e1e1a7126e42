use may_minihttp::Response;

/// Response produced by the service pipeline, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerResponse {
    /// HTTP status code
    pub status: u16,
    /// Full `Content-Type` header line
    pub content_type: &'static str,
    /// Full `Allow` header line, set on 405
    pub allow: Option<&'static str>,
    pub body: Vec<u8>,
}

impl HandlerResponse {
    #[must_use]
    pub fn json(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            content_type: "Content-Type: application/json",
            allow: None,
            body,
        }
    }

    /// Plain-text response, the shape used for every error.
    #[must_use]
    pub fn text(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            content_type: "Content-Type: text/plain; charset=utf-8",
            allow: None,
            body: message.into().into_bytes(),
        }
    }

    /// 405 for a known path; every route is POST-only, so `Allow` is fixed.
    #[must_use]
    pub fn method_not_allowed() -> Self {
        Self {
            allow: Some("Allow: POST"),
            ..Self::text(405, "method not allowed")
        }
    }

    #[cfg(test)]
    pub(crate) fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a [`HandlerResponse`] onto the wire response.
pub fn write_response(res: &mut Response, response: HandlerResponse) {
    res.status_code(response.status as usize, status_reason(response.status));
    res.header(response.content_type);
    if let Some(allow) = response.allow {
        res.header(allow);
    }
    res.body_vec(response.body);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(400), "Bad Request");
        assert_eq!(status_reason(405), "Method Not Allowed");
    }

    #[test]
    fn test_method_not_allowed_sets_allow() {
        let res = HandlerResponse::method_not_allowed();
        assert_eq!(res.status, 405);
        assert_eq!(res.allow, Some("Allow: POST"));
        assert!(res.content_type.contains("text/plain"));
    }
}
