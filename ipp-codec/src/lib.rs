//! Binary codec for the Internet Printing Protocol (IPP): parsing, serialization, and an
//! incremental header parser for chunked input, built on the [`ipp_types`] data model.

#![deny(missing_debug_implementations)]

pub mod codec;
pub mod decode;
pub mod encode;
pub mod error;
pub mod stream;

#[cfg(test)]
pub(crate) mod testing;

pub use codec::{Decoder, Encoder, MessageCodec};
pub use decode::decode_message;
pub use encode::encode_message;
pub use error::{DecodeError, EncodeError, StreamError};
pub use stream::{HeaderParser, WriteOutcome};

pub use ipp_types;
