//! The top-level `Message`: header plus grouped attributes plus optional trailing data.

use std::collections::HashMap;

use crate::{
    tag::{operation_name, GroupTag, SUCCESSFUL_OK},
    value::{AsciiString, Value},
};

/// An ordered mapping from attribute name to its (possibly multi-valued) sequence of values.
///
/// Order is insertion order, which is also wire order: IPP requires an attribute's values to be
/// encoded contiguously, and callers rely on groups round-tripping byte-for-byte when the
/// insertion order already matches the captured wire order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeGroup {
    entries: Vec<(String, Vec<Value>)>,
}

impl AttributeGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Value])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub fn get(&self, name: &str) -> Option<&[Value]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Appends a new attribute with one or more values, added after any existing attributes.
    pub fn push(&mut self, name: impl Into<String>, values: Vec<Value>) {
        self.entries.push((name.into(), values));
    }

    /// Appends an additional value to the most recently pushed attribute.
    ///
    /// Mirrors the wire's "zero-length name" continuation record; returns `false` (and does
    /// nothing) if the group has no attributes yet, the condition the decoder reports as
    /// `UnexpectedContinuation`.
    pub fn push_continuation(&mut self, value: Value) -> bool {
        match self.entries.last_mut() {
            Some((_, values)) => {
                values.push(value);
                true
            }
            None => false,
        }
    }
}

/// The IPP protocol version, a `(major, minor)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const V1_1: Version = Version { major: 1, minor: 1 };
}

impl Default for Version {
    fn default() -> Self {
        Version::V1_1
    }
}

/// A decoded or to-be-encoded IPP message.
///
/// `code` is interpreted as an operation-id on requests and a status-code on responses; the
/// wire format does not distinguish the two, so this type doesn't either.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub version: Version,
    pub code: i16,
    pub id: i32,
    pub attributes: HashMap<GroupTag, AttributeGroup>,
    pub data: Option<Vec<u8>>,
}

impl Message {
    pub fn new(code: i16, id: i32) -> Self {
        Self {
            version: Version::default(),
            code,
            id,
            attributes: HashMap::new(),
            data: None,
        }
    }

    /// Returns the attribute group for `tag`, creating an empty one if absent.
    pub fn group_mut(&mut self, tag: GroupTag) -> &mut AttributeGroup {
        self.attributes.entry(tag).or_default()
    }

    pub fn group(&self, tag: GroupTag) -> Option<&AttributeGroup> {
        self.attributes.get(&tag)
    }

    /// Reverse-looks-up `code` as an operation name. Returns `None` for unknown codes and for
    /// responses, where `code` is a status code rather than an operation-id: the lookup table
    /// is purely informational and participates in no validation.
    pub fn operation_name(&self) -> Option<&'static str> {
        operation_name(self.code)
    }

    /// Builds a response to this message: same version and id, the given status code, and
    /// `attributes-charset = "utf-8"` / `attributes-natural-language = "en-us"` pre-populated in
    /// the operation group, as every conformant IPP response must carry them.
    pub fn derive_response(&self, status_code: i16) -> Message {
        let mut response = Message {
            version: self.version,
            code: status_code,
            id: self.id,
            attributes: HashMap::new(),
            data: None,
        };

        let charset = AsciiString::try_from("utf-8").expect("utf-8 is ASCII");
        let language = AsciiString::try_from("en-us").expect("en-us is ASCII");

        let group = response.group_mut(GroupTag::Operation);
        group.push("attributes-charset", vec![Value::Charset(charset)]);
        group.push(
            "attributes-natural-language",
            vec![Value::NaturalLanguage(language)],
        );

        response
    }

    /// [`Message::derive_response`] with `successful-ok` as the status code.
    pub fn derive_successful_response(&self) -> Message {
        self.derive_response(SUCCESSFUL_OK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attribute_group_continuation_appends_to_last() {
        let mut group = AttributeGroup::new();
        group.push("requested-attributes", vec![Value::Integer(1)]);
        assert!(group.push_continuation(Value::Integer(2)));
        assert_eq!(group.get("requested-attributes").unwrap().len(), 2);
    }

    #[test]
    fn continuation_without_prior_attribute_fails() {
        let mut group = AttributeGroup::new();
        assert!(!group.push_continuation(Value::Integer(1)));
    }

    #[test]
    fn derive_response_preserves_version_and_id() {
        let mut request = Message::new(0x000b, 1);
        request.version = Version::V1_1;
        let response = request.derive_response(SUCCESSFUL_OK);
        assert_eq!(response.version, Version::V1_1);
        assert_eq!(response.id, 1);
        assert_eq!(response.code, SUCCESSFUL_OK);
        assert_eq!(response.operation_name(), None);

        let op_group = response.group(GroupTag::Operation).unwrap();
        assert!(op_group.get("attributes-charset").is_some());
        assert!(op_group.get("attributes-natural-language").is_some());
    }
}
