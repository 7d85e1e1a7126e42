//! # Router Module
//!
//! Static route table for the service. There are exactly two routes and no path
//! parameters, so matching is a linear scan over `(Method, path)` pairs; the query string
//! is ignored.
//!
//! A known path requested with the wrong method is reported separately from an unknown
//! path so the service can answer 405 with an `Allow` header instead of 404.

use crate::timing::TimingMode;
use http::Method;

/// An endpoint the service can dispatch to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /process-single`
    ProcessSingle,
    /// `POST /process-concurrent`
    ProcessConcurrent,
}

impl Endpoint {
    #[must_use]
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::ProcessSingle => "/process-single",
            Endpoint::ProcessConcurrent => "/process-concurrent",
        }
    }

    /// Timing mode this endpoint runs its batch under.
    #[must_use]
    pub fn mode(&self) -> TimingMode {
        match self {
            Endpoint::ProcessSingle => TimingMode::Sequential,
            Endpoint::ProcessConcurrent => TimingMode::Concurrent,
        }
    }
}

/// Result of matching a request against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    Matched(Endpoint),
    /// Path exists but not for this method. Every route is POST, so the response's
    /// `Allow` header is fixed.
    MethodNotAllowed,
    NotFound,
}

/// Router to match HTTP requests to endpoints
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<(Method, Endpoint)>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: vec![
                (Method::POST, Endpoint::ProcessSingle),
                (Method::POST, Endpoint::ProcessConcurrent),
            ],
        }
    }

    #[must_use]
    pub fn route(&self, method: &Method, path: &str) -> RouteOutcome {
        let path = path.split('?').next().unwrap_or("/");
        let mut path_known = false;
        for (m, endpoint) in &self.routes {
            if endpoint.path() != path {
                continue;
            }
            if m == method {
                return RouteOutcome::Matched(*endpoint);
            }
            path_known = true;
        }
        if path_known {
            RouteOutcome::MethodNotAllowed
        } else {
            RouteOutcome::NotFound
        }
    }
}
