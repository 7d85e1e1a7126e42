//! # CLI Module
//!
//! Command-line interface for the `sortbench` binary.
//!
//! ## Commands
//!
//! ### `serve` (default)
//!
//! Run the HTTP service:
//!
//! ```bash
//! sortbench serve --addr 0.0.0.0:9000
//! ```
//!
//! Running `sortbench` with no subcommand is the same as `sortbench serve`.
//!
//! ### `compare`
//!
//! Time a request body offline, without a server. Each timer gets its own copy of the
//! unsorted input, so the two columns are directly comparable:
//!
//! ```bash
//! sortbench compare --input batch.json --mode both
//! ```
//!
//! Prints the resulting JSON report to stdout.

mod commands;


pub use commands::{compare, run_cli, serve, Cli, Commands, CompareMode, DEFAULT_ADDR};
