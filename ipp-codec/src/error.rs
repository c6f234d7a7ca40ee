//! Error types surfaced by [`crate::decode`], [`crate::encode`], and [`crate::stream`].

use thiserror::Error;

/// Error during message decoding ([RFC 2910 §3](https://www.rfc-editor.org/rfc/rfc2910#section-3)).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The buffer ended in the middle of a field.
    #[error("Truncated: buffer ended mid-field")]
    Truncated,

    /// A length or fixed-size value failed its invariant.
    #[error("Malformed: {reason}")]
    Malformed { reason: String },

    /// A group tag was outside the known set and was not the end-of-attributes marker.
    #[error("Unsupported attribute-group tag: {tag:#04x}")]
    UnsupportedGroup { tag: u8 },

    /// A value tag was not in the dispatch table.
    #[error("Unsupported value tag: {tag:#04x}")]
    UnsupportedValueTag { tag: u8 },

    /// An extended value tag (`0x7f`) named a real tag that doesn't fit in a single octet.
    #[error("Unsupported extended value tag: {tag:#010x}")]
    UnsupportedExtendedValueTag { tag: i32 },

    /// A zero-length attribute name (a continuation record) appeared with no prior named
    /// attribute in the current group to continue.
    #[error("Unexpected continuation record with no prior attribute")]
    UnexpectedContinuation,
}

/// Error during message encoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// `version.major` was outside `1..255` or `version.minor` was outside `0..255`.
    #[error("Invalid version: {major}.{minor}")]
    InvalidVersion { major: u8, minor: u8 },

    /// `id` was zero; every encoded request/response must carry a non-zero request-id.
    #[error("Request id must be non-zero")]
    ZeroRequestId,
}

/// Error surfaced by [`crate::stream::HeaderParser`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamError {
    /// The writable side finished before a complete header was parsed.
    #[error("Stream ended before the header was complete")]
    PrematureEnd,

    /// The accumulated header prefix failed to decode.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}
