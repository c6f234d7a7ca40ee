//! The one-shot binary encoder: [`Message`] in, bytes out.

use ipp_types::{tag::GroupTag, Message};

use crate::error::EncodeError;

/// Serializes `message` to its wire form.
///
/// Groups are emitted in [`GroupTag::CANONICAL_ORDER`] regardless of the order they were
/// inserted in `message.attributes`; within a group, attributes are emitted in the order
/// [`ipp_types::message::AttributeGroup::iter`] yields them, which is insertion order.
pub fn encode_message(message: &Message) -> Result<Vec<u8>, EncodeError> {
    validate(message)?;

    let mut out = Vec::new();
    out.push(message.version.major);
    out.push(message.version.minor);
    out.extend_from_slice(&message.code.to_be_bytes());
    out.extend_from_slice(&message.id.to_be_bytes());

    for group in GroupTag::CANONICAL_ORDER {
        let Some(bucket) = message.attributes.get(&group) else {
            continue;
        };
        if bucket.is_empty() {
            continue;
        }

        log::trace!("encoding attribute group {group:?}");
        out.push(group.as_u8());

        for (name, values) in bucket.iter() {
            let mut first = true;
            for value in values {
                out.push(value.tag());
                let written_name = if first { name } else { "" };
                out.extend_from_slice(&(written_name.len() as i16).to_be_bytes());
                out.extend_from_slice(written_name.as_bytes());
                out.extend_from_slice(&value.encode_payload());
                first = false;
            }
        }
    }

    out.push(GroupTag::END_OF_ATTRIBUTES);

    if let Some(data) = &message.data {
        out.extend_from_slice(data);
    }

    Ok(out)
}

fn validate(message: &Message) -> Result<(), EncodeError> {
    if message.version.major == 0 {
        return Err(EncodeError::InvalidVersion {
            major: message.version.major,
            minor: message.version.minor,
        });
    }
    if message.id == 0 {
        return Err(EncodeError::ZeroRequestId);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use ipp_types::Value;

    use super::*;

    #[test]
    fn encodes_get_printer_attributes_request() {
        let mut message = Message::new(0x000B, 1);
        message.version = ipp_types::Version::V1_1;
        message.group_mut(GroupTag::Operation).push(
            "attributes-charset",
            vec![Value::Charset("utf-8".try_into().unwrap())],
        );
        message.group_mut(GroupTag::Operation).push(
            "attributes-natural-language",
            vec![Value::NaturalLanguage("en-us".try_into().unwrap())],
        );

        let bytes = encode_message(&message).unwrap();
        let expected = vec![
            0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01, 0x47, 0x00, 0x12, 0x61, 0x74,
            0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x63, 0x68, 0x61, 0x72, 0x73,
            0x65, 0x74, 0x00, 0x05, 0x75, 0x74, 0x66, 0x2D, 0x38, 0x48, 0x00, 0x1B, 0x61, 0x74,
            0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x6E, 0x61, 0x74, 0x75, 0x72,
            0x61, 0x6C, 0x2D, 0x6C, 0x61, 0x6E, 0x67, 0x75, 0x61, 0x67, 0x65, 0x00, 0x05, 0x65,
            0x6E, 0x2D, 0x75, 0x73, 0x03,
        ];
        assert_eq!(bytes, expected);
    }

    #[test]
    fn encodes_multi_value_continuation() {
        let mut message = Message::new(0x000B, 1);
        message.group_mut(GroupTag::Operation).push(
            "requested-attributes",
            vec![
                Value::Keyword("copies".try_into().unwrap()),
                Value::Keyword("media".try_into().unwrap()),
            ],
        );

        let bytes = encode_message(&message).unwrap();
        let name = b"requested-attributes";
        let mut expected = vec![0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, GroupTag::OPERATION];
        expected.push(0x44);
        expected.extend_from_slice(&(name.len() as i16).to_be_bytes());
        expected.extend_from_slice(name);
        expected.extend_from_slice(&[0x00, 0x06]);
        expected.extend_from_slice(b"copies");
        expected.extend_from_slice(&[0x44, 0x00, 0x00, 0x00, 0x05]);
        expected.extend_from_slice(b"media");
        expected.push(GroupTag::END_OF_ATTRIBUTES);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn rejects_zero_request_id() {
        let message = Message::new(0x000B, 0);
        assert_eq!(encode_message(&message), Err(EncodeError::ZeroRequestId));
    }

    #[test]
    fn canonical_order_ignores_insertion_order() {
        let mut message = Message::new(0x000B, 1);
        message
            .group_mut(GroupTag::Printer)
            .push("printer-name", vec![Value::NameWithoutLanguage("x".into())]);
        message
            .group_mut(GroupTag::Operation)
            .push("printer-uri", vec![Value::Uri("ipp://h/p".try_into().unwrap())]);

        let bytes = encode_message(&message).unwrap();
        let body = &bytes[8..];
        let operation_pos = body.iter().position(|&b| b == GroupTag::OPERATION).unwrap();
        let printer_pos = body.iter().position(|&b| b == GroupTag::PRINTER).unwrap();
        assert!(operation_pos < printer_pos);
    }
}
