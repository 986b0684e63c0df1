//! Query parameters and header values carried through to handlers verbatim.

/// An inclusive byte range parsed from a `Range: bytes=start-end` header.
///
/// Only the single fully-bounded form is recognized. Callers that see a
/// `Range` header this parser rejects should treat the request as invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ByteRange {
    /// First byte offset, inclusive.
    pub start: u64,
    /// Last byte offset, inclusive.
    pub end: u64,
}

impl ByteRange {
    /// Parse a `bytes=start-end` header value.
    ///
    /// Returns `None` for anything that is not a single fully-bounded
    /// ascending range, including suffix ranges (`bytes=-5`), open-ended
    /// ranges (`bytes=5-`), and multi-range values.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let spec = value.strip_prefix("bytes=")?;
        let (start, end) = spec.split_once('-')?;
        let start: u64 = start.parse().ok()?;
        let end: u64 = end.parse().ok()?;
        if start > end {
            return None;
        }
        Some(Self { start, end })
    }

    /// Number of bytes the range covers.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// Always false; a parsed range covers at least one byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for ByteRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "bytes={}-{}", self.start, self.end)
    }
}

/// Listing and multipart parameters extracted from the request query string.
///
/// All fields are optional; the classifier fills in whatever the request
/// carried and handlers interpret absence per operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// `prefix` query parameter.
    pub prefix: Option<String>,
    /// `delimiter` query parameter.
    pub delimiter: Option<String>,
    /// `marker` (list v1) or `key-marker` query parameter.
    pub marker: Option<String>,
    /// `continuation-token` (list v2) query parameter.
    pub continuation_token: Option<String>,
    /// `max-keys`, `max-uploads`, or `max-parts` query parameter.
    pub max_keys: Option<i32>,
    /// `versionId` query parameter.
    pub version_id: Option<String>,
    /// `uploadId` query parameter.
    pub upload_id: Option<String>,
    /// `partNumber` query parameter.
    pub part_number: Option<i32>,
    /// Parsed `Range` header, when present and fully bounded.
    pub range: Option<ByteRange>,
}

impl ListParams {
    /// True when no parameter was supplied.
    #[must_use]
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}
