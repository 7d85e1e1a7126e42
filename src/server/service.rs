use super::request::{parse_request, ParsedRequest};
use super::response::{write_response, HandlerResponse};
use crate::batch::SortBatch;
use crate::router::{RouteOutcome, Router};
use crate::timing::SortHarness;
use http::Method;
use may_minihttp::{HttpService, Request, Response};
use std::io;
use std::time::Instant;
use tracing::{error, info, warn};

/// The HTTP service: one stateless pipeline per request.
///
/// `AWAIT_REQUEST → DECODE → COMPUTE → ENCODE → RESPOND`, where a decode failure
/// short-circuits to a 400 carrying the decoder's message. `may_minihttp` clones the
/// service per connection; clones share nothing mutable.
#[derive(Clone, Debug)]
pub struct AppService {
    pub router: Router,
    pub harness: SortHarness,
}

impl AppService {
    pub fn new(harness: SortHarness) -> Self {
        Self {
            router: Router::new(),
            harness,
        }
    }

    /// Run the full request pipeline without touching the transport.
    pub fn handle(&self, req: ParsedRequest) -> HandlerResponse {
        self.process(&req).0
    }

    /// Pipeline body; also reports how many arrays were decoded, if the body decoded.
    fn process(&self, req: &ParsedRequest) -> (HandlerResponse, Option<usize>) {
        let method = match Method::from_bytes(req.method.as_bytes()) {
            Ok(m) => m,
            Err(_) => return (HandlerResponse::text(400, "invalid method"), None),
        };

        let endpoint = match self.router.route(&method, &req.path) {
            RouteOutcome::Matched(endpoint) => endpoint,
            RouteOutcome::MethodNotAllowed => return (HandlerResponse::method_not_allowed(), None),
            RouteOutcome::NotFound => {
                return (HandlerResponse::text(404, "404 page not found"), None)
            }
        };

        let mut batch = match SortBatch::decode(&req.body) {
            Ok(batch) => batch,
            Err(e) => {
                warn!(
                    request_id = %req.request_id,
                    path = %req.path,
                    kind = e.kind(),
                    error = %e,
                    "Request body rejected"
                );
                return (HandlerResponse::text(400, e.to_string()), None);
            }
        };

        let arrays = batch.len();
        let response = match self.harness.run(endpoint.mode(), &mut batch) {
            Ok(report) => HandlerResponse::json(200, report.encode()),
            Err(e) => {
                error!(
                    request_id = %req.request_id,
                    mode = %endpoint.mode(),
                    arrays = batch.len(),
                    error = %e,
                    "Timing harness failed"
                );
                HandlerResponse::text(500, e.to_string())
            }
        };
        (response, Some(arrays))
    }
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let start = Instant::now();
        let parsed = parse_request(req);
        let (response, arrays) = self.process(&parsed);

        info!(
            request_id = %parsed.request_id,
            method = %parsed.method,
            path = %parsed.path,
            status = response.status,
            arrays = arrays.unwrap_or(0),
            latency_us = start.elapsed().as_micros() as u64,
            "Request completed"
        );

        write_response(res, response);
        Ok(())
    }
}
