//! Known-answer-test helper for the unit tests in [`crate::codec`].

use ipp_types::Message;

use crate::codec::{Decoder, MessageCodec};

/// Decodes `test_input`, asserts it matches `expected_object` and `expected_remainder`, then
/// re-encodes and re-decodes the result to check that the round trip is stable.
pub(crate) fn kat_inverse_message(tests: &[(&[u8], &[u8], Message)]) {
    for (no, (test_input, expected_remainder, expected_object)) in tests.iter().enumerate() {
        println!("# {no}");

        let (got_remainder, got_object) =
            MessageCodec::decode(test_input).expect("first parsing failed");
        assert_eq!(expected_object, &got_object);
        assert_eq!(*expected_remainder, got_remainder);

        let got_output = crate::encode::encode_message(&got_object).expect("encoding failed");

        let (got_remainder, got_object_again) =
            MessageCodec::decode(&got_output).expect("second parsing failed");
        assert_eq!(got_object, got_object_again);
        assert!(got_remainder.is_empty());
    }
}
