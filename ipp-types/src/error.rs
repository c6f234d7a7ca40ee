//! Error-related types.

use thiserror::Error;

/// A validation error.
///
/// Returned by the generator helpers in [`crate::generate`] and by the `TryFrom` impls of the
/// ASCII-only string newtypes in [`crate::value`].
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ValidationError {
    /// An integer (or enum) value was outside `i32::MIN..=i32::MAX`.
    #[error("Integer out of range: {got}")]
    IntegerOutOfRange { got: i64 },

    /// A byte above `0x7f` was found in a kind that only permits US-ASCII.
    #[error("Invalid byte b'\\x{byte:02x}' at index {at}, expected US-ASCII")]
    NotAscii { byte: u8, at: usize },

    /// A string argument was empty where a non-empty string is required.
    #[error("Must not be empty")]
    Empty,

    /// An enum generator was given a label that is not present in the caller-supplied set.
    #[error("{label:?} is not a known enum value")]
    InvalidEnumValue { label: String },

    /// A `Resolution` generator was given a negative cross-feed or feed value.
    #[error("Resolution components must be non-negative, got {got}")]
    NegativeResolution { got: i32 },

    /// A `dateTime` value's UTC direction octet wasn't `b'+'` or `b'-'`.
    #[error("Invalid UTC direction {got:?}, expected '+' or '-'")]
    InvalidUtcDirection { got: char },

    /// A `dateTime` value's fields don't form a valid point in time (bad calendar date, a
    /// `second` above 60, or a UTC offset outside `FixedOffset`'s representable range).
    #[error("dateTime fields do not form a valid point in time")]
    InvalidDateTimeFields,
}
