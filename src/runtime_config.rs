//! # Runtime Configuration Module
//!
//! Environment-driven tuning for the `may` coroutine runtime.
//!
//! These variables shape how work is scheduled, not what the service exposes. The two
//! routes and the default listen port (`0.0.0.0:9000`) are deliberately not read from the
//! environment; only `serve --addr` can move the listener.
//!
//! ## Environment Variables
//!
//! ### `SORTBENCH_STACK_SIZE`
//!
//! Stack size for every coroutine: connection handlers and concurrent sort units alike.
//! Accepts decimal (`65536`) or hexadecimal (`0x10000`). Default: `0x10000` (64 KB).
//!
//! The standard unstable sort recurses at most O(log n) deep, so the default comfortably
//! covers arrays far larger than any request body could carry.
//!
//! ### `SORTBENCH_WORKERS`
//!
//! Number of OS worker threads `may` schedules coroutines on. This caps the real
//! parallelism of the concurrent endpoint. Default: available parallelism.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use sortbench::runtime_config::RuntimeConfig;
//!
//! let config = RuntimeConfig::from_env();
//! config.apply();
//! println!("Stack size: {} bytes, {} workers", config.stack_size, config.workers);
//! ```

use std::env;
use std::thread;

/// Default coroutine stack size (64 KB)
pub const DEFAULT_STACK_SIZE: usize = 0x10000;

/// Runtime configuration loaded from environment variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Stack size for coroutines in bytes
    pub stack_size: usize,
    /// Number of `may` worker threads
    pub workers: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            stack_size: DEFAULT_STACK_SIZE,
            workers: default_workers(),
        }
    }
}

impl RuntimeConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_values(
            env::var("SORTBENCH_STACK_SIZE").ok().as_deref(),
            env::var("SORTBENCH_WORKERS").ok().as_deref(),
        )
    }

    /// Build from raw variable values; unparsable or zero values fall back to defaults.
    #[must_use]
    pub fn from_values(stack_size: Option<&str>, workers: Option<&str>) -> Self {
        let stack_size = stack_size
            .and_then(parse_size)
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_STACK_SIZE);
        let workers = workers
            .and_then(|w| w.trim().parse::<usize>().ok())
            .filter(|w| *w > 0)
            .unwrap_or_else(default_workers);
        RuntimeConfig {
            stack_size,
            workers,
        }
    }

    /// Push this configuration into the global `may` runtime.
    ///
    /// Must run before the first coroutine is spawned; `may` fixes its worker count on
    /// first use.
    pub fn apply(&self) {
        may::config()
            .set_stack_size(self.stack_size)
            .set_workers(self.workers);
    }
}

fn parse_size(val: &str) -> Option<usize> {
    let val = val.trim();
    if let Some(hex) = val.strip_prefix("0x").or_else(|| val.strip_prefix("0X")) {
        usize::from_str_radix(hex, 16).ok()
    } else {
        val.parse().ok()
    }
}

fn default_workers() -> usize {
    thread::available_parallelism().map_or(1, |n| n.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("0x4000"), Some(0x4000));
        assert_eq!(parse_size("0X8000"), Some(0x8000));
        assert_eq!(parse_size("32768"), Some(32768));
        assert_eq!(parse_size("lots"), None);
    }

    #[test]
    fn test_from_values_defaults() {
        let config = RuntimeConfig::from_values(None, None);
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert!(config.workers >= 1);
    }

    #[test]
    fn test_from_values_overrides() {
        let config = RuntimeConfig::from_values(Some("0x8000"), Some("3"));
        assert_eq!(config.stack_size, 0x8000);
        assert_eq!(config.workers, 3);
    }

    #[test]
    fn test_from_values_rejects_zero_and_garbage() {
        let config = RuntimeConfig::from_values(Some("0"), Some("none"));
        assert_eq!(config.stack_size, DEFAULT_STACK_SIZE);
        assert_eq!(config.workers, default_workers());
    }
}
