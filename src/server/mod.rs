//! # Server Module
//!
//! HTTP plumbing on top of `may_minihttp`: request parsing, the [`AppService`] pipeline,
//! response writing, and the listener lifecycle ([`HttpServer`] / [`ServerHandle`]).

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerExit, ServerHandle};
pub use request::{parse_request, ParsedRequest};
pub use response::{write_response, HandlerResponse};
pub use service::AppService;
