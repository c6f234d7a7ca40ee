//! Validated constructors for [`Value`]s.
//!
//! These are thin wrappers that validate native Rust inputs and produce [`Value`] instances;
//! they never reach the wire directly. Each follows the same "verify, then construct" shape as
//! the [`crate::value::AsciiString`] newtype: fallible inputs go through a function that returns
//! `Result<Value, ValidationError>`; out-of-band kinds have nothing to validate and are exposed
//! as zero-argument constructors returning `Value` directly.

use crate::{
    error::ValidationError,
    tag::ResolutionUnit,
    value::{AsciiString, RangeOfInteger, Resolution, StringWithLanguage, Value},
};

pub fn unsupported() -> Value {
    Value::Unsupported
}

pub fn default_value() -> Value {
    Value::Default
}

pub fn unknown() -> Value {
    Value::Unknown
}

pub fn no_value() -> Value {
    Value::NoValue
}

/// Builds an `integer` value. Fails if `value` does not fit in `i32`.
pub fn integer(value: i64) -> Result<Value, ValidationError> {
    let narrowed = i32::try_from(value).map_err(|_| ValidationError::IntegerOutOfRange {
        got: value,
    })?;
    Ok(Value::Integer(narrowed))
}

/// Builds a `boolean` value from any input that can be interpreted as truthy/falsy.
pub fn boolean(value: bool) -> Value {
    Value::Boolean(value)
}

/// Builds an `enum` value directly from its numeric code.
///
/// Per RFC 2911 §4.1, registered enum values start at 2 (0 and 1 are reserved); values below 2
/// are rejected.
pub fn enum_value(value: i32) -> Result<Value, ValidationError> {
    if value < 2 {
        return Err(ValidationError::IntegerOutOfRange {
            got: i64::from(value),
        });
    }
    Ok(Value::Enum(value))
}

/// Builds an `enum` value by looking up `label` in an ordered set, using the set's 1-based
/// position (offset by one, since registered enum values start at 2) as the wire value.
pub fn enum_from_label(label: &str, labels: &[&str]) -> Result<Value, ValidationError> {
    let position = labels
        .iter()
        .position(|candidate| *candidate == label)
        .ok_or_else(|| ValidationError::InvalidEnumValue {
            label: label.to_owned(),
        })?;
    Ok(Value::Enum(position as i32 + 2))
}

/// Builds a `resolution` value. Fails if `x` or `y` is negative.
pub fn resolution(x: i32, y: i32, unit: ResolutionUnit) -> Result<Value, ValidationError> {
    if x < 0 {
        return Err(ValidationError::NegativeResolution { got: x });
    }
    if y < 0 {
        return Err(ValidationError::NegativeResolution { got: y });
    }
    Ok(Value::Resolution(Resolution { x, y, unit }))
}

/// Builds a `rangeOfInteger` value, normalizing `lower`/`upper` so that `lower <= upper`.
pub fn range_of_integer(a: i32, b: i32) -> Value {
    Value::RangeOfInteger(RangeOfInteger::new(a, b))
}

/// Builds a `textWithLanguage` value. Fails if `language` or `string` is empty.
pub fn text_with_language(language: &str, string: &str) -> Result<Value, ValidationError> {
    Ok(Value::TextWithLanguage(string_with_language(
        language, string,
    )?))
}

/// Builds a `nameWithLanguage` value. Fails if `language` or `string` is empty.
pub fn name_with_language(language: &str, string: &str) -> Result<Value, ValidationError> {
    Ok(Value::NameWithLanguage(string_with_language(
        language, string,
    )?))
}

fn string_with_language(
    language: &str,
    string: &str,
) -> Result<StringWithLanguage, ValidationError> {
    let language = language.trim();
    if language.is_empty() {
        return Err(ValidationError::Empty);
    }
    if string.is_empty() {
        return Err(ValidationError::Empty);
    }
    Ok(StringWithLanguage {
        language: AsciiString::try_from(language)?,
        string: string.to_owned(),
    })
}

/// Builds a `textWithoutLanguage` value from any UTF-8 string.
pub fn text_without_language(string: impl Into<String>) -> Value {
    Value::TextWithoutLanguage(string.into())
}

/// Builds a `nameWithoutLanguage` value from any UTF-8 string.
pub fn name_without_language(string: impl Into<String>) -> Value {
    Value::NameWithoutLanguage(string.into())
}

macro_rules! ascii_kind {
    ($(#[$meta:meta])* $fn_name:ident, $variant:ident) => {
        $(#[$meta])*
        pub fn $fn_name(value: &str) -> Result<Value, ValidationError> {
            Ok(Value::$variant(AsciiString::try_from(value)?))
        }
    };
}

ascii_kind!(
    /// Builds a `keyword` value. Fails if `value` contains a non-ASCII byte.
    keyword,
    Keyword
);
ascii_kind!(
    /// Builds a `uri` value. Fails if `value` contains a non-ASCII byte.
    uri,
    Uri
);
ascii_kind!(
    /// Builds a `uriScheme` value. Fails if `value` contains a non-ASCII byte.
    uri_scheme,
    UriScheme
);
ascii_kind!(
    /// Builds a `charset` value. Fails if `value` contains a non-ASCII byte.
    charset,
    Charset
);
ascii_kind!(
    /// Builds a `naturalLanguage` value. Fails if `value` contains a non-ASCII byte.
    natural_language,
    NaturalLanguage
);
ascii_kind!(
    /// Builds a `mimeMediaType` value. Fails if `value` contains a non-ASCII byte.
    mime_media_type,
    MimeMediaType
);
