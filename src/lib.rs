//! # sortbench
//!
//! **sortbench** is a small coroutine-powered HTTP service that demonstrates the cost of
//! sequential versus concurrent execution on an embarrassingly parallel workload: sorting
//! a batch of independent integer arrays.
//!
//! ## Overview
//!
//! Two endpoints accept the same request body and sort every array in it ascending,
//! reporting how long each individual sort took in nanoseconds:
//!
//! | Method | Path | Response field | Scheduling |
//! |---|---|---|---|
//! | POST | `/process-single` | `sequential_time` | one array after another |
//! | POST | `/process-concurrent` | `concurrent_time` | one coroutine per array, joined |
//!
//! ```text
//! POST /process-single
//! {"to_sort": [[3, 1, 2], [5, 4]]}
//!
//! 200 OK
//! {"sequential_time": [412, 198]}
//! ```
//!
//! A body that does not decode gets a `400 Bad Request` whose plain-text body is the
//! decoder's error message.
//!
//! ## Architecture
//!
//! - **[`batch`]** - Request/response wire types, decoding and encoding
//! - **[`timing`]** - The sequential and fan-out/join timers
//! - **[`router`]** - Static `(method, path)` route table
//! - **[`server`]** - `may_minihttp` service, request parsing, response writing, listener
//! - **[`cli`]** - `serve` and `compare` commands
//! - **[`runtime_config`]** - Coroutine stack size and worker threads from the environment
//! - **[`logging`]** - `tracing` subscriber setup
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Client
//!     participant Server as HttpServer<br/>(may_minihttp)
//!     participant Service as AppService
//!     participant Harness as SortHarness
//!     participant Unit as Sort unit<br/>(coroutine)
//!
//!     Client->>Server: POST /process-concurrent
//!     Server->>Service: call(req)
//!     Service->>Service: route + decode
//!     alt Decode failed
//!         Service-->>Client: 400 text/plain
//!     end
//!     Service->>Harness: run(Concurrent, batch)
//!     loop one per array
//!         Harness->>Unit: spawn(array)
//!     end
//!     Unit-->>Harness: join → (sorted array, nanos)
//!     Harness-->>Service: TimingReport
//!     Service-->>Client: 200 {"concurrent_time": [...]}
//! ```
//!
//! Nothing is shared between requests. Within one concurrent request, each sort unit owns
//! its array and returns its duration through its own join handle, so the per-index result
//! slots are disjoint and need no locking.

pub mod batch;
pub mod cli;
pub mod ids;
pub mod logging;
pub mod router;
pub mod runtime_config;
pub mod server;
pub mod timing;

pub use batch::{DecodeError, SortBatch, TimingReport};
pub use router::{Endpoint, Router};
pub use server::{AppService, HttpServer, ServerHandle};
pub use timing::{SortHarness, TimingMode};
