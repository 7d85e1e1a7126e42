//! # Timing Module
//!
//! The timing harness behind both endpoints.
//!
//! ## Overview
//!
//! Both timers sort each array ascending in place with the standard library's unstable
//! comparison sort and record how long that sort took in nanoseconds. They differ only in
//! how the work is scheduled:
//!
//! - **[`sequential`]** sorts the arrays one after another on the calling coroutine.
//! - **[`concurrent`]** spawns one `may` coroutine per array and joins all of them before
//!   returning. `may` schedules coroutines over a pool of OS worker threads, so the sorts
//!   really do run in parallel.
//!
//! The measured interval is the sort call only. For the concurrent timer that means
//! spawn and scheduling overhead is not included; small inputs therefore understate the
//! real cost of fanning out.
//!
//! ## Usage
//!
//! ```rust
//! use sortbench::batch::SortBatch;
//! use sortbench::timing::{SortHarness, TimingMode};
//!
//! let harness = SortHarness::new(0x10000);
//! let mut batch = SortBatch::new(vec![vec![3, 1, 2], vec![5, 4]]);
//! let report = harness.run(TimingMode::Sequential, &mut batch).unwrap();
//!
//! assert_eq!(batch.to_sort, vec![vec![1, 2, 3], vec![4, 5]]);
//! assert_eq!(report.sequential_time.map(|t| t.len()), Some(2));
//! assert!(report.concurrent_time.is_none());
//! ```

pub mod concurrent;
pub mod sequential;

pub use concurrent::time_concurrent;
pub use sequential::time_sequential;

use crate::batch::{SortBatch, TimingReport};
use crate::runtime_config::RuntimeConfig;
use std::fmt;
use std::io;
use std::time::Instant;
use tracing::debug;

/// Per-array sort routine: sorts in place and returns elapsed nanoseconds.
pub(crate) type SortFn = fn(&mut [i64]) -> i64;

/// Sort one array in place and return the elapsed nanoseconds, saturating at `i64::MAX`.
#[inline]
pub(crate) fn time_sort(arr: &mut [i64]) -> i64 {
    let start = Instant::now();
    arr.sort_unstable();
    i64::try_from(start.elapsed().as_nanos()).unwrap_or(i64::MAX)
}

/// How a batch is scheduled while being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimingMode {
    /// One array at a time on the calling coroutine
    Sequential,
    /// One coroutine per array, joined before reporting
    Concurrent,
}

impl TimingMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimingMode::Sequential => "sequential",
            TimingMode::Concurrent => "concurrent",
        }
    }
}

impl fmt::Display for TimingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Runs a batch through the timer selected by [`TimingMode`].
///
/// Holds no per-request state; one harness is shared by every connection.
#[derive(Debug, Clone, Copy)]
pub struct SortHarness {
    stack_size: usize,
    sort: SortFn,
}

impl SortHarness {
    /// Create a harness whose concurrent units use `stack_size` bytes of coroutine stack.
    #[must_use]
    pub fn new(stack_size: usize) -> Self {
        Self {
            stack_size,
            sort: time_sort,
        }
    }

    /// Replace the per-array sort routine.
    #[cfg(test)]
    pub(crate) fn with_sort(mut self, sort: SortFn) -> Self {
        self.sort = sort;
        self
    }

    #[must_use]
    pub fn from_config(config: &RuntimeConfig) -> Self {
        Self::new(config.stack_size)
    }

    #[must_use]
    pub fn stack_size(&self) -> usize {
        self.stack_size
    }

    /// Sort every array of `batch` in place and report per-array durations.
    ///
    /// The returned report has exactly one populated field, matching `mode`, with one
    /// entry per array in `batch.to_sort`.
    ///
    /// # Errors
    ///
    /// Only the concurrent mode can fail, when a coroutine cannot be spawned or joined.
    pub fn run(&self, mode: TimingMode, batch: &mut SortBatch) -> io::Result<TimingReport> {
        let elements = batch.element_count();
        let report = match mode {
            TimingMode::Sequential => {
                let times = sequential::sort_each(&mut batch.to_sort, self.sort);
                log_run(mode, batch.len(), elements, &times);
                TimingReport::sequential(times)
            }
            TimingMode::Concurrent => {
                let times = concurrent::fan_out(&mut batch.to_sort, self.stack_size, self.sort)?;
                log_run(mode, batch.len(), elements, &times);
                TimingReport::concurrent(times)
            }
        };
        Ok(report)
    }
}

fn log_run(mode: TimingMode, arrays: usize, elements: usize, times: &[i64]) {
    let sort_nanos: i64 = times.iter().fold(0i64, |acc, t| acc.saturating_add(*t));
    debug!(
        mode = %mode,
        arrays,
        elements,
        sort_nanos,
        "Batch timed"
    );
}
