//! Request correlation ids.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Where a request's id came from; logged next to the id.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdSource {
    /// Adopted from the caller's `x-request-id`.
    Header,
    /// Minted here because the header was absent or not a ULID.
    Generated,
}

impl IdSource {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            IdSource::Header => "header",
            IdSource::Generated => "generated",
        }
    }
}

/// ULID tying together the log lines of one request.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
pub struct RequestId(ulid::Ulid);

impl RequestId {
    #[must_use]
    pub fn generate() -> Self {
        Self(ulid::Ulid::new())
    }

    /// Adopt `header` when it holds a ULID (surrounding whitespace ignored); otherwise mint
    /// a fresh id.
    #[must_use]
    pub fn resolve(header: Option<&str>) -> (Self, IdSource) {
        match header.map(str::parse::<RequestId>) {
            Some(Ok(id)) => (id, IdSource::Header),
            _ => (Self::generate(), IdSource::Generated),
        }
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for RequestId {
    type Err = ulid::DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ulid::Ulid::from_string(s.trim()).map(RequestId)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_adopts_valid_header() {
        let id = RequestId::generate();
        let header = format!("  {id} ");
        assert_eq!(RequestId::resolve(Some(&header)), (id, IdSource::Header));
    }

    #[test]
    fn test_resolve_mints_when_absent_or_invalid() {
        let (a, source_a) = RequestId::resolve(Some("req-42"));
        let (b, source_b) = RequestId::resolve(None);
        assert_eq!(source_a, IdSource::Generated);
        assert_eq!(source_b, IdSource::Generated);
        assert_ne!(a, b);
        assert_eq!(a.to_string().len(), 26);
    }
}
