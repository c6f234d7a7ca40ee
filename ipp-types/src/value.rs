//! The IPP value model: one variant per RFC 2910 value kind.
//!
//! Each variant knows its own wire tag ([`Value::tag`]) and how to serialize its payload
//! ([`Value::encode_payload`]). This is a tagged variant (a sum type) rather than the
//! class-per-kind hierarchy the reference `toBuffer`-per-subclass design uses; dispatch happens
//! once, in `encode_payload`'s `match`, instead of through virtual calls.

use std::fmt;

use chrono::{DateTime as ChronoDateTime, Datelike, FixedOffset, TimeZone, Timelike};

use crate::{
    error::ValidationError,
    tag::{value_tag, ResolutionUnit},
};

/// A US-ASCII string, used for `keyword`, `uri`, `uriScheme`, `charset`, `naturalLanguage`, and
/// `mimeMediaType` values, and for attribute names.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AsciiString(String);

impl AsciiString {
    pub fn verify(value: &str) -> Result<(), ValidationError> {
        if let Some((at, byte)) = value
            .bytes()
            .enumerate()
            .find(|(_, byte)| *byte > 0x7f)
        {
            return Err(ValidationError::NotAscii { byte, at });
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<&str> for AsciiString {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::verify(value)?;
        Ok(Self(value.to_owned()))
    }
}

impl TryFrom<String> for AsciiString {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::verify(&value)?;
        Ok(Self(value))
    }
}

impl fmt::Display for AsciiString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A string paired with a language tag, used for `textWithLanguage` and `nameWithLanguage`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StringWithLanguage {
    pub language: AsciiString,
    pub string: String,
}

/// The RFC 2579 date-and-time structure carried by a `dateTime` value.
///
/// Wraps a [`chrono::DateTime<FixedOffset>`] reconstructed in the wire-declared zone, the same
/// approach the reference codec's `datetime` module uses for its own date-time value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime(ChronoDateTime<FixedOffset>);

impl DateTime {
    /// Builds a `DateTime` from already-validated wire fields.
    ///
    /// `deci_seconds` is accepted but not representable in [`chrono::DateTime`]'s second
    /// resolution beyond nanoseconds; it is folded into the timestamp's sub-second component.
    #[allow(clippy::too_many_arguments)]
    pub fn from_wire_fields(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        deci_seconds: u8,
        utc_direction: char,
        utc_hours: u8,
        utc_minutes: u8,
    ) -> Result<Self, ValidationError> {
        let sign = match utc_direction {
            '+' => 1,
            '-' => -1,
            other => return Err(ValidationError::InvalidUtcDirection { got: other }),
        };
        if second > 60 {
            return Err(ValidationError::InvalidDateTimeFields);
        }
        // RFC 2579's leap-second escape (`second == 60`) has no slot in `NaiveTime`'s normal
        // 0..=59 range; chrono represents it by keeping the wall-clock second at 59 and pushing
        // the millisecond component past 1000 instead.
        let milli = if second == 60 {
            1000 + u32::from(deci_seconds) * 100
        } else {
            u32::from(deci_seconds) * 100
        };
        let wall_second = u32::from(second.min(59));
        let offset_seconds = sign * (i32::from(utc_hours) * 3600 + i32::from(utc_minutes) * 60);
        let offset = FixedOffset::east_opt(offset_seconds).ok_or(ValidationError::InvalidDateTimeFields)?;
        let naive = chrono::NaiveDate::from_ymd_opt(i32::from(year), u32::from(month), u32::from(day))
            .and_then(|date| date.and_hms_milli_opt(u32::from(hour), u32::from(minute), wall_second, milli))
            .ok_or(ValidationError::InvalidDateTimeFields)?;
        let value = offset
            .from_local_datetime(&naive)
            .single()
            .ok_or(ValidationError::InvalidDateTimeFields)?;
        Ok(Self(value))
    }

    pub fn wire_fields(&self) -> [u8; 11] {
        let v = &self.0;
        let offset_minutes = v.offset().local_minus_utc() / 60;
        let (direction, offset_minutes) = if offset_minutes < 0 {
            ('-', -offset_minutes)
        } else {
            ('+', offset_minutes)
        };
        // `timestamp_subsec_millis` reports 1000..=1999 for a leap second chrono represents at
        // wall-clock second 59; unwind that back into `second == 60` plus the true sub-second.
        let subsec_millis = v.timestamp_subsec_millis();
        let is_leap_second = subsec_millis >= 1000;
        let second = if is_leap_second { 60 } else { v.second() as u8 };
        let deci_seconds = ((subsec_millis % 1000) / 100) as u8;
        let year = v.year() as u16;
        let mut out = [0u8; 11];
        out[0..2].copy_from_slice(&year.to_be_bytes());
        out[2] = v.month() as u8;
        out[3] = v.day() as u8;
        out[4] = v.hour() as u8;
        out[5] = v.minute() as u8;
        out[6] = second;
        out[7] = deci_seconds;
        out[8] = direction as u8;
        out[9] = (offset_minutes / 60) as u8;
        out[10] = (offset_minutes % 60) as u8;
        out
    }

    pub fn as_chrono(&self) -> &ChronoDateTime<FixedOffset> {
        &self.0
    }
}

/// A printer/client resolution, e.g. `300x300 dpi`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Resolution {
    pub x: i32,
    pub y: i32,
    pub unit: ResolutionUnit,
}

/// An inclusive integer range, normalized so that `lower <= upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeOfInteger {
    pub lower: i32,
    pub upper: i32,
}

impl RangeOfInteger {
    /// Normalizes `a`/`b` so that `lower = min(a, b)` and `upper = max(a, b)`.
    pub fn new(a: i32, b: i32) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }
}

/// One RFC 2910 attribute value.
///
/// Every variant is tagged with the wire byte it corresponds to and knows how to serialize its
/// own length-prefixed payload; the decoder builds these from a tag->constructor dispatch, the
/// encoder just calls [`Value::tag`] and [`Value::encode_payload`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Value {
    /// `unsupported` (0x10): an out-of-band marker, zero-length payload.
    Unsupported,
    /// `default` (0x11): an out-of-band marker, zero-length payload.
    Default,
    /// `unknown` (0x12): an out-of-band marker, zero-length payload.
    Unknown,
    /// `no-value` (0x13): an out-of-band marker, zero-length payload.
    NoValue,
    Integer(i32),
    Boolean(bool),
    Enum(i32),
    OctetString(Vec<u8>),
    DateTime(DateTime),
    Resolution(Resolution),
    RangeOfInteger(RangeOfInteger),
    TextWithLanguage(StringWithLanguage),
    NameWithLanguage(StringWithLanguage),
    TextWithoutLanguage(String),
    NameWithoutLanguage(String),
    Keyword(AsciiString),
    Uri(AsciiString),
    UriScheme(AsciiString),
    Charset(AsciiString),
    NaturalLanguage(AsciiString),
    MimeMediaType(AsciiString),
}

impl Value {
    /// The value-tag byte to write in the TLV header.
    pub fn tag(&self) -> u8 {
        match self {
            Value::Unsupported => value_tag::UNSUPPORTED,
            Value::Default => value_tag::DEFAULT,
            Value::Unknown => value_tag::UNKNOWN,
            Value::NoValue => value_tag::NO_VALUE,
            Value::Integer(_) => value_tag::INTEGER,
            Value::Boolean(_) => value_tag::BOOLEAN,
            Value::Enum(_) => value_tag::ENUM,
            Value::OctetString(_) => value_tag::OCTET_STRING,
            Value::DateTime(_) => value_tag::DATE_TIME,
            Value::Resolution(_) => value_tag::RESOLUTION,
            Value::RangeOfInteger(_) => value_tag::RANGE_OF_INTEGER,
            Value::TextWithLanguage(_) => value_tag::TEXT_WITH_LANGUAGE,
            Value::NameWithLanguage(_) => value_tag::NAME_WITH_LANGUAGE,
            Value::TextWithoutLanguage(_) => value_tag::TEXT_WITHOUT_LANGUAGE,
            Value::NameWithoutLanguage(_) => value_tag::NAME_WITHOUT_LANGUAGE,
            Value::Keyword(_) => value_tag::KEYWORD,
            Value::Uri(_) => value_tag::URI,
            Value::UriScheme(_) => value_tag::URI_SCHEME,
            Value::Charset(_) => value_tag::CHARSET,
            Value::NaturalLanguage(_) => value_tag::NATURAL_LANGUAGE,
            Value::MimeMediaType(_) => value_tag::MIME_MEDIA_TYPE,
        }
    }

    /// Returns the length-prefixed value payload: a 16-bit big-endian length followed by that
    /// many octets. Out-of-band kinds emit exactly two zero bytes.
    pub fn encode_payload(&self) -> Vec<u8> {
        fn with_len(body: Vec<u8>) -> Vec<u8> {
            let mut out = Vec::with_capacity(2 + body.len());
            out.extend_from_slice(&(body.len() as i16).to_be_bytes());
            out.extend_from_slice(&body);
            out
        }

        match self {
            Value::Unsupported | Value::Default | Value::Unknown | Value::NoValue => {
                with_len(Vec::new())
            }
            Value::Integer(v) | Value::Enum(v) => with_len(v.to_be_bytes().to_vec()),
            Value::Boolean(v) => with_len(vec![u8::from(*v)]),
            Value::OctetString(bytes) => with_len(bytes.clone()),
            Value::DateTime(dt) => with_len(dt.wire_fields().to_vec()),
            Value::Resolution(res) => {
                let mut body = Vec::with_capacity(9);
                body.extend_from_slice(&res.x.to_be_bytes());
                body.extend_from_slice(&res.y.to_be_bytes());
                body.push(res.unit.as_i8() as u8);
                with_len(body)
            }
            Value::RangeOfInteger(range) => {
                let mut body = Vec::with_capacity(8);
                body.extend_from_slice(&range.lower.to_be_bytes());
                body.extend_from_slice(&range.upper.to_be_bytes());
                with_len(body)
            }
            Value::TextWithLanguage(s) | Value::NameWithLanguage(s) => {
                let lang = s.language.as_str().as_bytes();
                let text = s.string.as_bytes();
                let mut body = Vec::with_capacity(4 + lang.len() + text.len());
                body.extend_from_slice(&(lang.len() as i16).to_be_bytes());
                body.extend_from_slice(lang);
                body.extend_from_slice(&(text.len() as i16).to_be_bytes());
                body.extend_from_slice(text);
                with_len(body)
            }
            Value::TextWithoutLanguage(s) | Value::NameWithoutLanguage(s) => {
                with_len(s.as_bytes().to_vec())
            }
            Value::Keyword(s)
            | Value::Uri(s)
            | Value::UriScheme(s)
            | Value::Charset(s)
            | Value::NaturalLanguage(s)
            | Value::MimeMediaType(s) => with_len(s.as_str().as_bytes().to_vec()),
        }
    }
}
