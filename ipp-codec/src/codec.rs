//! Codec entry points: [`MessageCodec`] implements both [`Decoder`] and [`Encoder`].
//!
//! `Message` here has no borrowed fields. Unlike the reference codec's IMAP types, which borrow
//! from the input buffer and so need a lifetime-generic `Message<'a>` associated type, every IPP
//! value is owned once decoded. The trait shape is kept anyway: it's what callers of the
//! reference codec already know how to reach for.

use ipp_types::Message;

use crate::{decode::decode_message, encode::encode_message, error::DecodeError, error::EncodeError};

/// Implemented for types that know how to decode a specific message kind.
pub trait Decoder {
    type Message: Sized;
    type Error;

    fn decode(input: &[u8]) -> Result<(&[u8], Self::Message), Self::Error>;
}

/// Implemented for types that know how to encode a specific message kind.
pub trait Encoder {
    type Message: ?Sized;
    type Error;

    fn encode(message: &Self::Message) -> Result<Vec<u8>, Self::Error>;
}

/// Codec for full IPP messages (header, attribute groups, optional trailing data).
#[derive(Debug)]
pub struct MessageCodec;

impl Decoder for MessageCodec {
    type Message = Message;
    type Error = DecodeError;

    fn decode(input: &[u8]) -> Result<(&[u8], Message), DecodeError> {
        decode_message(input)
    }
}

impl Encoder for MessageCodec {
    type Message = Message;
    type Error = EncodeError;

    fn encode(message: &Message) -> Result<Vec<u8>, EncodeError> {
        encode_message(message)
    }
}

#[cfg(test)]
mod tests {
    use ipp_types::{tag::GroupTag, Value};

    use super::*;
    use crate::testing::kat_inverse_message;

    #[test]
    fn round_trips_through_the_trait_api() {
        let bytes = [
            0x01u8, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01, 0x47, 0x00, 0x12, 0x61, 0x74,
            0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x63, 0x68, 0x61, 0x72, 0x73,
            0x65, 0x74, 0x00, 0x05, 0x75, 0x74, 0x66, 0x2D, 0x38, 0x48, 0x00, 0x1B, 0x61, 0x74,
            0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x6E, 0x61, 0x74, 0x75, 0x72,
            0x61, 0x6C, 0x2D, 0x6C, 0x61, 0x6E, 0x67, 0x75, 0x61, 0x67, 0x65, 0x00, 0x05, 0x65,
            0x6E, 0x2D, 0x75, 0x73, 0x03,
        ];
        let (rest, message) = MessageCodec::decode(&bytes).unwrap();
        assert!(rest.is_empty());
        let reencoded = MessageCodec::encode(&message).unwrap();
        assert_eq!(reencoded, bytes);
    }

    #[test]
    fn test_kat_inverse_message() {
        let mut expected = Message::new(0x000B, 1);
        expected.group_mut(GroupTag::Operation).push(
            "attributes-charset",
            vec![Value::Charset("utf-8".try_into().unwrap())],
        );
        expected.group_mut(GroupTag::Operation).push(
            "attributes-natural-language",
            vec![Value::NaturalLanguage("en-us".try_into().unwrap())],
        );

        kat_inverse_message(&[(
            &[
                0x01, 0x01, 0x00, 0x0B, 0x00, 0x00, 0x00, 0x01, 0x01, 0x47, 0x00, 0x12, 0x61,
                0x74, 0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x63, 0x68, 0x61,
                0x72, 0x73, 0x65, 0x74, 0x00, 0x05, 0x75, 0x74, 0x66, 0x2D, 0x38, 0x48, 0x00,
                0x1B, 0x61, 0x74, 0x74, 0x72, 0x69, 0x62, 0x75, 0x74, 0x65, 0x73, 0x2D, 0x6E,
                0x61, 0x74, 0x75, 0x72, 0x61, 0x6C, 0x2D, 0x6C, 0x61, 0x6E, 0x67, 0x75, 0x61,
                0x67, 0x65, 0x00, 0x05, 0x65, 0x6E, 0x2D, 0x75, 0x73, 0x03,
            ][..],
            &[][..],
            expected,
        )]);
    }
}
