//! The one-shot binary decoder: byte slice in, [`Message`] out.
//!
//! Field widths are pulled out of the slice with `nom`'s fixed-width number parsers, the same
//! building blocks the reference grammar uses for its ABNF terminals; everything above that
//! (the group/attribute loop, the one-byte lookahead that tells a value tag from the next group
//! tag) is plain control flow, since IPP's TLV framing has no combinator-friendly repetition
//! structure to lean on.

use nom::bytes::complete::take;
use nom::number::complete::{be_i16, be_i32, be_u8};

use ipp_types::{
    tag::{value_tag, GroupTag, GroupTagClass, ResolutionUnit},
    value::{AsciiString, DateTime, RangeOfInteger, Resolution, StringWithLanguage},
    Message, Value,
};

use crate::error::DecodeError;

/// Parses one complete IPP message from `input`, returning the unconsumed remainder.
///
/// There usually is none to consume: a full `[header][groups][0x03]` message has nothing left
/// over except whatever trailing `data` it carries, which is folded into [`Message::data`]
/// rather than returned separately.
pub fn decode_message(input: &[u8]) -> Result<(&[u8], Message), DecodeError> {
    if input.len() < 8 {
        return Err(DecodeError::Truncated);
    }
    let (rest, major) = be_u8::<_, nom::error::Error<&[u8]>>(input).map_err(|_| DecodeError::Truncated)?;
    let (rest, minor) = be_u8::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;
    let (rest, code) = be_i16::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;
    let (rest, id) = be_i32::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;

    let mut message = Message::new(code, id);
    message.version.major = major;
    message.version.minor = minor;

    log::trace!("decoding ipp message code={code:#06x} id={id}");

    let mut rest = rest;
    loop {
        let (next, tag) = be_u8::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;
        rest = next;
        match GroupTag::from_u8(tag) {
            GroupTagClass::EndOfAttributes => {
                if !rest.is_empty() {
                    message.data = Some(rest.to_vec());
                }
                return Ok((&[], message));
            }
            GroupTagClass::Group(group) => {
                log::trace!("entering attribute group {group:?}");
                rest = decode_attributes(rest, group, &mut message)?;
            }
            GroupTagClass::Unknown(other) => {
                return Err(DecodeError::UnsupportedGroup { tag: other });
            }
        }
    }
}

/// Consumes attribute records for `group` until the next byte names a group tag (`< 0x10`),
/// at which point it returns the slice starting at that byte so the caller's group loop can
/// read it.
fn decode_attributes<'a>(
    mut rest: &'a [u8],
    group: GroupTag,
    message: &mut Message,
) -> Result<&'a [u8], DecodeError> {
    loop {
        let tag = *rest.first().ok_or(DecodeError::Truncated)?;
        if tag < value_tag::UNSUPPORTED {
            return Ok(rest);
        }

        let (next, _) = be_u8::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;
        rest = next;

        let (next, name_len) = be_i16::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;
        if name_len < 0 {
            return Err(DecodeError::Malformed {
                reason: format!("negative name length {name_len}"),
            });
        }
        let (next, name_bytes) =
            take::<_, _, nom::error::Error<&[u8]>>(name_len as usize)(next).map_err(|_| DecodeError::Truncated)?;
        rest = next;

        let (next, value_len) = be_i16::<_, nom::error::Error<&[u8]>>(rest).map_err(|_| DecodeError::Truncated)?;
        if value_len < 0 {
            return Err(DecodeError::Malformed {
                reason: format!("negative value length {value_len}"),
            });
        }
        let (next, value_bytes) =
            take::<_, _, nom::error::Error<&[u8]>>(value_len as usize)(next).map_err(|_| DecodeError::Truncated)?;
        rest = next;

        let (effective_tag, payload) = if tag == value_tag::EXTENDED {
            if value_bytes.len() < 4 {
                return Err(DecodeError::Malformed {
                    reason: "extended value tag shorter than 4 octets".to_owned(),
                });
            }
            let real_tag = i32::from_be_bytes([
                value_bytes[0],
                value_bytes[1],
                value_bytes[2],
                value_bytes[3],
            ]);
            let real_tag = u8::try_from(real_tag)
                .map_err(|_| DecodeError::UnsupportedExtendedValueTag { tag: real_tag })?;
            (real_tag, &value_bytes[4..])
        } else {
            (tag, value_bytes)
        };

        log::trace!("decoding attribute tag={effective_tag:#04x} name_len={name_len}");

        let value = decode_value(effective_tag, payload)?;

        let group_bucket = message.group_mut(group);
        if name_len == 0 {
            if !group_bucket.push_continuation(value) {
                return Err(DecodeError::UnexpectedContinuation);
            }
        } else {
            let name = ascii_name(name_bytes)?;
            group_bucket.push(name, vec![value]);
        }
    }
}

fn ascii_name(bytes: &[u8]) -> Result<String, DecodeError> {
    let s = std::str::from_utf8(bytes).map_err(|_| DecodeError::Malformed {
        reason: "attribute name is not valid UTF-8".to_owned(),
    })?;
    AsciiString::try_from(s)
        .map_err(|_| DecodeError::Malformed {
            reason: "attribute name contains a non-ASCII octet".to_owned(),
        })
        .map(AsciiString::into_string)
}

fn decode_value(tag: u8, payload: &[u8]) -> Result<Value, DecodeError> {
    use value_tag::*;

    match tag {
        UNSUPPORTED => empty(payload, Value::Unsupported),
        DEFAULT => empty(payload, Value::Default),
        UNKNOWN => empty(payload, Value::Unknown),
        NO_VALUE => empty(payload, Value::NoValue),
        INTEGER => Ok(Value::Integer(fixed_i32(payload)?)),
        ENUM => Ok(Value::Enum(fixed_i32(payload)?)),
        BOOLEAN => {
            if payload.len() != 1 {
                return Err(malformed("boolean value is not 1 octet"));
            }
            match payload[0] {
                0 => Ok(Value::Boolean(false)),
                1 => Ok(Value::Boolean(true)),
                other => Err(malformed(&format!("boolean octet {other:#04x} is not 0 or 1"))),
            }
        }
        OCTET_STRING => Ok(Value::OctetString(payload.to_vec())),
        DATE_TIME => {
            if payload.len() != 11 {
                return Err(malformed("dateTime value is not 11 octets"));
            }
            let direction = payload[8] as char;
            let dt = DateTime::from_wire_fields(
                u16::from_be_bytes([payload[0], payload[1]]),
                payload[2],
                payload[3],
                payload[4],
                payload[5],
                payload[6],
                payload[7],
                direction,
                payload[9],
                payload[10],
            )
            .map_err(|_| malformed("invalid dateTime fields"))?;
            Ok(Value::DateTime(dt))
        }
        RESOLUTION => {
            if payload.len() != 9 {
                return Err(malformed("resolution value is not 9 octets"));
            }
            let x = i32::from_be_bytes(payload[0..4].try_into().unwrap());
            let y = i32::from_be_bytes(payload[4..8].try_into().unwrap());
            let unit = ResolutionUnit::from_i8(payload[8] as i8)
                .ok_or_else(|| malformed("invalid resolution unit"))?;
            Ok(Value::Resolution(Resolution { x, y, unit }))
        }
        RANGE_OF_INTEGER => {
            if payload.len() != 8 {
                return Err(malformed("rangeOfInteger value is not 8 octets"));
            }
            let lower = i32::from_be_bytes(payload[0..4].try_into().unwrap());
            let upper = i32::from_be_bytes(payload[4..8].try_into().unwrap());
            Ok(Value::RangeOfInteger(RangeOfInteger { lower, upper }))
        }
        TEXT_WITH_LANGUAGE | NAME_WITH_LANGUAGE => {
            let swl = decode_string_with_language(payload)?;
            if tag == TEXT_WITH_LANGUAGE {
                Ok(Value::TextWithLanguage(swl))
            } else {
                Ok(Value::NameWithLanguage(swl))
            }
        }
        TEXT_WITHOUT_LANGUAGE | NAME_WITHOUT_LANGUAGE => {
            let s = String::from_utf8(payload.to_vec())
                .map_err(|_| malformed("value is not valid UTF-8"))?;
            if tag == TEXT_WITHOUT_LANGUAGE {
                Ok(Value::TextWithoutLanguage(s))
            } else {
                Ok(Value::NameWithoutLanguage(s))
            }
        }
        KEYWORD | URI | URI_SCHEME | CHARSET | NATURAL_LANGUAGE | MIME_MEDIA_TYPE => {
            let s = std::str::from_utf8(payload).map_err(|_| malformed("value is not valid UTF-8"))?;
            let ascii =
                AsciiString::try_from(s).map_err(|_| malformed("value contains a non-ASCII octet"))?;
            Ok(match tag {
                KEYWORD => Value::Keyword(ascii),
                URI => Value::Uri(ascii),
                URI_SCHEME => Value::UriScheme(ascii),
                CHARSET => Value::Charset(ascii),
                NATURAL_LANGUAGE => Value::NaturalLanguage(ascii),
                _ => Value::MimeMediaType(ascii),
            })
        }
        other => Err(DecodeError::UnsupportedValueTag { tag: other }),
    }
}

fn empty(payload: &[u8], value: Value) -> Result<Value, DecodeError> {
    if !payload.is_empty() {
        return Err(malformed("out-of-band value carried a non-empty payload"));
    }
    Ok(value)
}

fn fixed_i32(payload: &[u8]) -> Result<i32, DecodeError> {
    let bytes: [u8; 4] = payload
        .try_into()
        .map_err(|_| malformed("integer/enum value is not 4 octets"))?;
    Ok(i32::from_be_bytes(bytes))
}

fn decode_string_with_language(payload: &[u8]) -> Result<StringWithLanguage, DecodeError> {
    if payload.len() < 2 {
        return Err(malformed("textWithLanguage value is too short"));
    }
    let lang_len = u16::from_be_bytes([payload[0], payload[1]]) as usize;
    let rest = &payload[2..];
    if rest.len() < lang_len + 2 {
        return Err(malformed("textWithLanguage value is too short for its language field"));
    }
    let lang_bytes = &rest[..lang_len];
    let rest = &rest[lang_len..];
    let text_len = u16::from_be_bytes([rest[0], rest[1]]) as usize;
    let text_bytes = rest
        .get(2..2 + text_len)
        .ok_or_else(|| malformed("textWithLanguage value is too short for its text field"))?;

    let language = std::str::from_utf8(lang_bytes)
        .map_err(|_| malformed("language tag is not valid UTF-8"))
        .and_then(|s| AsciiString::try_from(s).map_err(|_| malformed("language tag is not ASCII")))?;
    let string = String::from_utf8(text_bytes.to_vec())
        .map_err(|_| malformed("text is not valid UTF-8"))?;

    Ok(StringWithLanguage { language, string })
}

fn malformed(reason: &str) -> DecodeError {
    DecodeError::Malformed {
        reason: reason.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s1() -> Vec<u8> {
        vec![
            0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01, 0x47, 0x00, 0x12, 0x61, 0x74,
            0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x63, 0x68, 0x61, 0x72, 0x73,
            0x65, 0x74, 0x00, 0x05, 0x75, 0x74, 0x66, 0x2D, 0x38, 0x48, 0x00, 0x1B, 0x61, 0x74,
            0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x6E, 0x61, 0x74, 0x75, 0x72,
            0x61, 0x6C, 0x2D, 0x6C, 0x61, 0x6E, 0x67, 0x75, 0x61, 0x67, 0x65, 0x00, 0x05, 0x65,
            0x6E, 0x2D, 0x75, 0x73, 0x03,
        ]
    }

    #[test]
    fn decodes_get_printer_attributes_request() {
        let bytes = s1();
        let (rest, message) = decode_message(&bytes).unwrap();
        assert!(rest.is_empty());
        assert_eq!(message.version, ipp_types::Version::V1_1);
        assert_eq!(message.code, 0x000B);
        assert_eq!(message.id, 1);
        assert_eq!(message.operation_name(), Some("Get-Printer-Attributes"));
        assert!(message.data.is_none());

        let group = message.group(GroupTag::Operation).unwrap();
        assert_eq!(
            group.get("attributes-charset").unwrap(),
            &[Value::Charset("utf-8".try_into().unwrap())]
        );
        assert_eq!(
            group.get("attributes-natural-language").unwrap(),
            &[Value::NaturalLanguage("en-us".try_into().unwrap())]
        );
    }

    #[test]
    fn decodes_multi_value_continuation() {
        let mut bytes = vec![0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01];
        bytes.extend_from_slice(&[
            0x44, 0x00, 0x14, b'r', b'e', b'q', b'u', b'e', b's', b't', b'e', b'd', b'-', b'a',
            b't', b't', b'r', b'i', b'b', b'u', b't', b'e', b's', 0x00, 0x06, b'c', b'o', b'p',
            b'i', b'e', b's',
        ]);
        bytes.extend_from_slice(&[0x44, 0x00, 0x00, 0x00, 0x05, b'm', b'e', b'd', b'i', b'a']);
        bytes.push(0x03);

        let (_, message) = decode_message(&bytes).unwrap();
        let values = message
            .group(GroupTag::Operation)
            .unwrap()
            .get("requested-attributes")
            .unwrap();
        assert_eq!(
            values,
            &[
                Value::Keyword("copies".try_into().unwrap()),
                Value::Keyword("media".try_into().unwrap()),
            ]
        );
    }

    #[test]
    fn truncated_header_fails() {
        let bytes = [0x01, 0x01, 0x00, 0x0B, 0x00, 0x00];
        assert_eq!(decode_message(&bytes), Err(DecodeError::Truncated));
    }

    #[test]
    fn truncated_mid_group_fails() {
        let mut bytes = vec![0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01];
        bytes.push(0x44);
        assert_eq!(decode_message(&bytes), Err(DecodeError::Truncated));
    }

    #[test]
    fn unexpected_continuation_without_prior_attribute_fails() {
        let mut bytes = vec![0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01];
        bytes.extend_from_slice(&[0x44, 0x00, 0x00, 0x00, 0x05, b'm', b'e', b'd', b'i', b'a']);
        bytes.push(0x03);
        assert_eq!(
            decode_message(&bytes),
            Err(DecodeError::UnexpectedContinuation)
        );
    }

    #[test]
    fn trailing_data_is_captured() {
        let mut bytes = s1();
        bytes.pop();
        bytes.push(0x03);
        bytes.extend_from_slice(&[0xFF, 0xFE, 0xFD]);
        let (_, message) = decode_message(&bytes).unwrap();
        assert_eq!(message.data, Some(vec![0xFF, 0xFE, 0xFD]));
    }

    #[test]
    fn unsupported_group_tag_fails() {
        let bytes = [0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x0F];
        assert_eq!(
            decode_message(&bytes),
            Err(DecodeError::UnsupportedGroup { tag: 0x0F })
        );
    }

    #[test]
    fn extended_value_tag_wider_than_a_byte_fails() {
        let mut bytes = vec![0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01];
        bytes.extend_from_slice(&[value_tag::EXTENDED, 0x00, 0x02, b'x', b'x']);
        bytes.extend_from_slice(&[0x00, 0x04, 0x00, 0x00, 0x01, 0x00]);
        assert_eq!(
            decode_message(&bytes),
            Err(DecodeError::UnsupportedExtendedValueTag { tag: 0x0100 })
        );
    }
}
