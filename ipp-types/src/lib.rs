//! Misuse-resistant data structures for the Internet Printing Protocol (IPP), as defined by
//! [RFC 2910](https://www.rfc-editor.org/rfc/rfc2910) (encoding) and
//! [RFC 2911](https://www.rfc-editor.org/rfc/rfc2911) (semantics).
//!
//! This crate only defines *what* an IPP message is: the tag tables, the [`value::Value`]
//! model, [`message::Message`], and validated [`generate`] constructors. Parsing and
//! serialization live in `ipp-codec`, built on top of this crate, mirroring how a
//! misuse-resistant protocol crate keeps "what a message is" separate from "how it travels on
//! the wire."

#![deny(missing_debug_implementations)]

pub mod error;
pub mod generate;
pub mod message;
pub mod tag;
pub mod value;

pub use message::{AttributeGroup, Message, Version};
pub use tag::GroupTag;
pub use value::Value;
