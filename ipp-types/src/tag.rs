//! Bidirectional tag tables for attribute groups, value kinds, operations, and statuses.
//!
//! "Begin-attribute-group-tag" values ([RFC 2910 §3.5.1](https://www.rfc-editor.org/rfc/rfc2910#section-3.5.1))
//! and "value-tag" values ([RFC 2910 §3.5.2](https://www.rfc-editor.org/rfc/rfc2910#section-3.5.2)).

/// A group tag, or the end-of-attribute-groups sentinel.
///
/// Unlike a value tag, a group tag byte has exactly three interpretations on decode: a known
/// group, the end marker, or unsupported. There is no "out of band" case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GroupTag {
    Operation,
    Job,
    Printer,
    Unsupported,
}

impl GroupTag {
    pub const OPERATION: u8 = 0x01;
    pub const JOB: u8 = 0x02;
    pub const END_OF_ATTRIBUTES: u8 = 0x03;
    pub const PRINTER: u8 = 0x04;
    pub const UNSUPPORTED: u8 = 0x05;

    /// The canonical order in which non-empty groups are emitted by the encoder.
    pub const CANONICAL_ORDER: [GroupTag; 4] = [
        GroupTag::Operation,
        GroupTag::Job,
        GroupTag::Printer,
        GroupTag::Unsupported,
    ];

    pub fn as_u8(self) -> u8 {
        match self {
            GroupTag::Operation => Self::OPERATION,
            GroupTag::Job => Self::JOB,
            GroupTag::Printer => Self::PRINTER,
            GroupTag::Unsupported => Self::UNSUPPORTED,
        }
    }

    /// Classifies a raw tag byte.
    ///
    /// Returns `None` for the end-of-attributes marker and `Some(Err(byte))` for a byte in
    /// `0x00..=0x0f` that names neither a known group nor the end marker.
    pub fn from_u8(byte: u8) -> GroupTagClass {
        match byte {
            Self::OPERATION => GroupTagClass::Group(GroupTag::Operation),
            Self::JOB => GroupTagClass::Group(GroupTag::Job),
            Self::END_OF_ATTRIBUTES => GroupTagClass::EndOfAttributes,
            Self::PRINTER => GroupTagClass::Group(GroupTag::Printer),
            Self::UNSUPPORTED => GroupTagClass::Group(GroupTag::Unsupported),
            other => GroupTagClass::Unknown(other),
        }
    }
}

/// Result of classifying a group-tag byte during decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupTagClass {
    Group(GroupTag),
    EndOfAttributes,
    Unknown(u8),
}

/// Out-of-band and typed value-tag bytes ([RFC 2910 §3.5.2](https://www.rfc-editor.org/rfc/rfc2910#section-3.5.2)).
///
/// A value tag below `0x10` never appears here: on the wire, such a byte is always a
/// [`GroupTag`], and the decoder's attribute loop treats it as the signal to back up and
/// return to the group loop.
pub mod value_tag {
    pub const UNSUPPORTED: u8 = 0x10;
    pub const DEFAULT: u8 = 0x11;
    pub const UNKNOWN: u8 = 0x12;
    pub const NO_VALUE: u8 = 0x13;

    pub const INTEGER: u8 = 0x21;
    pub const BOOLEAN: u8 = 0x22;
    pub const ENUM: u8 = 0x23;

    pub const OCTET_STRING: u8 = 0x30;
    pub const DATE_TIME: u8 = 0x31;
    pub const RESOLUTION: u8 = 0x32;
    pub const RANGE_OF_INTEGER: u8 = 0x33;
    pub const TEXT_WITH_LANGUAGE: u8 = 0x35;
    pub const NAME_WITH_LANGUAGE: u8 = 0x36;

    pub const TEXT_WITHOUT_LANGUAGE: u8 = 0x41;
    pub const NAME_WITHOUT_LANGUAGE: u8 = 0x42;
    pub const KEYWORD: u8 = 0x44;
    pub const URI: u8 = 0x45;
    pub const URI_SCHEME: u8 = 0x46;
    pub const CHARSET: u8 = 0x47;
    pub const NATURAL_LANGUAGE: u8 = 0x48;
    pub const MIME_MEDIA_TYPE: u8 = 0x49;

    /// The extended-value-tag escape: the real tag follows as 4 big-endian octets.
    pub const EXTENDED: u8 = 0x7f;
}

/// A resolution's unit of measure ([RFC 2911 §4.2.13](https://www.rfc-editor.org/rfc/rfc2911#section-4.2.13)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionUnit {
    PerInch,
    PerCm,
}

impl ResolutionUnit {
    pub fn as_i8(self) -> i8 {
        match self {
            ResolutionUnit::PerInch => 3,
            ResolutionUnit::PerCm => 4,
        }
    }

    pub fn from_i8(value: i8) -> Option<Self> {
        match value {
            3 => Some(ResolutionUnit::PerInch),
            4 => Some(ResolutionUnit::PerCm),
            _ => None,
        }
    }
}

/// Reverse-lookup table from operation-id to its symbolic name (RFC 2911 §4.4.15 and extensions).
///
/// Informational only: an unknown operation-id is not a decode error, it simply has no name.
pub fn operation_name(code: i16) -> Option<&'static str> {
    Some(match code {
        0x0002 => "Print-Job",
        0x0003 => "Print-URI",
        0x0004 => "Validate-Job",
        0x0005 => "Create-Job",
        0x0006 => "Send-Document",
        0x0007 => "Send-URI",
        0x0008 => "Cancel-Job",
        0x0009 => "Get-Job-Attributes",
        0x000a => "Get-Jobs",
        0x000b => "Get-Printer-Attributes",
        0x000c => "Hold-Job",
        0x000d => "Release-Job",
        0x000e => "Restart-Job",
        0x0010 => "Pause-Printer",
        0x0011 => "Resume-Printer",
        0x0012 => "Purge-Jobs",
        _ => return None,
    })
}

/// Reverse-lookup table from status-code to its symbolic name (RFC 2911 §13).
pub fn status_name(code: i16) -> Option<&'static str> {
    Some(match code {
        0x0000 => "successful-ok",
        0x0001 => "successful-ok-ignored-or-substituted-attributes",
        0x0002 => "successful-ok-conflicting-attributes",
        0x0400 => "client-error-bad-request",
        0x0401 => "client-error-forbidden",
        0x0402 => "client-error-not-authenticated",
        0x0403 => "client-error-not-authorized",
        0x0404 => "client-error-not-possible",
        0x0405 => "client-error-timeout",
        0x0406 => "client-error-not-found",
        0x0407 => "client-error-gone",
        0x0408 => "client-error-request-entity-too-large",
        0x0409 => "client-error-request-value-too-long",
        0x040a => "client-error-document-format-not-supported",
        0x040b => "client-error-attributes-or-values-not-supported",
        0x040c => "client-error-uri-scheme-not-supported",
        0x040d => "client-error-charset-not-supported",
        0x040e => "client-error-conflicting-attributes",
        0x040f => "client-error-compression-not-supported",
        0x0410 => "client-error-compression-error",
        0x0411 => "client-error-document-format-error",
        0x0412 => "client-error-document-access-error",
        0x0500 => "server-error-internal-error",
        0x0501 => "server-error-operation-not-supported",
        0x0502 => "server-error-service-unavailable",
        0x0503 => "server-error-version-not-supported",
        0x0504 => "server-error-device-error",
        0x0505 => "server-error-temporary-error",
        0x0506 => "server-error-not-accepting-jobs",
        0x0507 => "server-error-busy",
        0x0508 => "server-error-job-canceled",
        0x0509 => "server-error-multiple-document-jobs-not-supported",
        _ => return None,
    })
}

/// Status code for `successful-ok`, the default target of [`crate::message::Message::derive_response`].
pub const SUCCESSFUL_OK: i16 = 0x0000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_group_tags() {
        assert_eq!(
            GroupTag::from_u8(0x01),
            GroupTagClass::Group(GroupTag::Operation)
        );
        assert_eq!(
            GroupTag::from_u8(0x04),
            GroupTagClass::Group(GroupTag::Printer)
        );
        assert_eq!(GroupTag::from_u8(0x03), GroupTagClass::EndOfAttributes);
        assert_eq!(GroupTag::from_u8(0x0f), GroupTagClass::Unknown(0x0f));
    }

    #[test]
    fn operation_name_is_informational() {
        assert_eq!(operation_name(0x000b), Some("Get-Printer-Attributes"));
        assert_eq!(operation_name(0x7fff), None);
        assert_eq!(status_name(0x0000), Some("successful-ok"));
        assert_eq!(status_name(0x0412), Some("client-error-document-access-error"));
    }

    #[test]
    fn resolution_unit_round_trips() {
        assert_eq!(ResolutionUnit::from_i8(3), Some(ResolutionUnit::PerInch));
        assert_eq!(ResolutionUnit::from_i8(4), Some(ResolutionUnit::PerCm));
        assert_eq!(ResolutionUnit::from_i8(5), None);
    }
}
