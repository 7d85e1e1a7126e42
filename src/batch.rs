//! # Batch Module
//!
//! Wire types for the two timing endpoints.
//!
//! A request carries a batch of integer arrays under `to_sort`; a response carries one
//! nanosecond duration per array under either `sequential_time` or `concurrent_time`,
//! depending on which endpoint produced it. The field that does not apply is omitted from
//! the JSON entirely (never `null`).
//!
//! ```rust
//! use sortbench::batch::{SortBatch, TimingReport};
//!
//! let batch = SortBatch::decode(br#"{"to_sort": [[3, 1, 2], [5, 4]]}"#).unwrap();
//! assert_eq!(batch.len(), 2);
//!
//! let report = TimingReport::sequential(vec![120, 80]);
//! assert_eq!(report.encode(), br#"{"sequential_time":[120,80]}"#.to_vec());
//! ```

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Request body: the arrays to sort, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortBatch {
    /// Arrays to sort. A missing key or `null` decodes as an empty batch.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub to_sort: Vec<Vec<i64>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<Vec<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<Vec<i64>>>::deserialize(deserializer)?.unwrap_or_default())
}

impl SortBatch {
    pub fn new(to_sort: Vec<Vec<i64>>) -> Self {
        Self { to_sort }
    }

    /// Decode a raw request body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] for malformed, truncated or type-mismatched JSON,
    /// including an empty body.
    pub fn decode(body: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(body).map_err(DecodeError::from)
    }

    /// Number of arrays in the batch.
    #[must_use]
    pub fn len(&self) -> usize {
        self.to_sort.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_sort.is_empty()
    }

    /// Total number of integers across all arrays.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.to_sort.iter().map(Vec::len).sum()
    }
}

/// Response body: per-array sort durations in nanoseconds.
///
/// Exactly one field is populated by the constructors. Index `i` of the populated field
/// corresponds to index `i` of the request's `to_sort`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequential_time: Option<Vec<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub concurrent_time: Option<Vec<i64>>,
}

impl TimingReport {
    #[must_use]
    pub fn sequential(times: Vec<i64>) -> Self {
        Self {
            sequential_time: Some(times),
            concurrent_time: None,
        }
    }

    #[must_use]
    pub fn concurrent(times: Vec<i64>) -> Self {
        Self {
            sequential_time: None,
            concurrent_time: Some(times),
        }
    }

    /// Merge another report's populated fields into this one.
    ///
    /// Used by the `compare` command to print both timings side by side.
    #[must_use]
    pub fn merge(mut self, other: TimingReport) -> Self {
        if other.sequential_time.is_some() {
            self.sequential_time = other.sequential_time;
        }
        if other.concurrent_time.is_some() {
            self.concurrent_time = other.concurrent_time;
        }
        self
    }

    /// Serialize to a JSON body.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        // A struct of optional integer vectors always serializes.
        serde_json::to_vec(self).unwrap_or_default()
    }
}

/// Failure to decode a request body into a [`SortBatch`].
///
/// The `Display` text is what the client receives as the 400 response body.
#[derive(Debug)]
pub enum DecodeError {
    /// Input is not syntactically valid JSON.
    Syntax(serde_json::Error),
    /// Valid JSON with the wrong shape, e.g. a string where an integer was expected.
    Data(serde_json::Error),
    /// Input ended before a complete JSON value (includes an empty body).
    Eof(serde_json::Error),
}

impl DecodeError {
    /// Short machine-readable kind, used as a log field.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            DecodeError::Syntax(_) => "syntax",
            DecodeError::Data(_) => "data",
            DecodeError::Eof(_) => "eof",
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        match err.classify() {
            Category::Data => DecodeError::Data(err),
            Category::Eof => DecodeError::Eof(err),
            Category::Syntax | Category::Io => DecodeError::Syntax(err),
        }
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Syntax(e) | DecodeError::Data(e) | DecodeError::Eof(e) => {
                write!(f, "{e}")
            }
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Syntax(e) | DecodeError::Data(e) | DecodeError::Eof(e) => Some(e),
        }
    }
}
