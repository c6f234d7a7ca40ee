//! Incremental header parsing over chunked input.
//!
//! [`HeaderParser`] accumulates bytes until it can see a complete header (the 8-byte fixed
//! prefix plus the attribute-group sequence up to and including the end-of-groups marker),
//! decodes that prefix exactly once, and then stops buffering: every byte after the marker is
//! handed back to the caller immediately instead of being copied into an internal buffer. This
//! is the same shape as a fragmentizer that hands a complete frame to its owner and then
//! switches to forwarding raw bytes, just with a looser "is this plausibly the end" scan instead
//! of a length-prefixed frame.

use ipp_types::{
    tag::{value_tag, GroupTag, GroupTagClass},
    Message,
};

use crate::decode::decode_message;
use crate::error::StreamError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    ExpectGroup,
    ExpectAttribute,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Phase {
    Collecting,
    PassThrough,
    Ended,
}

/// Feed chunks in with [`HeaderParser::write`]; once [`HeaderParser::write`] returns a
/// `header_ready` outcome carrying a [`Message`], every subsequent call (and the trailing bytes
/// returned alongside that same outcome) is body, not header.
#[derive(Debug)]
pub struct HeaderParser {
    buffer: Vec<u8>,
    phase: Phase,
}

/// What happened as a result of feeding one chunk to [`HeaderParser::write`].
#[derive(Debug, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The header isn't complete yet; more input is needed.
    NeedMore,
    /// The header just became complete. Fires exactly once per parser.
    HeaderReady { message: Message, body: Vec<u8> },
    /// The parser was already past the header; `body` is chunk data flowing straight through.
    Body(Vec<u8>),
}

impl Default for HeaderParser {
    fn default() -> Self {
        Self::new()
    }
}

impl HeaderParser {
    pub fn new() -> Self {
        Self {
            buffer: Vec::new(),
            phase: Phase::Collecting,
        }
    }

    /// Feeds one chunk. Returns [`WriteOutcome::NeedMore`] while still collecting, or the
    /// decoded message and any bytes past the header the moment the scan finds the marker.
    pub fn write(&mut self, chunk: &[u8]) -> Result<WriteOutcome, StreamError> {
        match self.phase {
            Phase::Ended => Ok(WriteOutcome::Body(Vec::new())),
            Phase::PassThrough => Ok(WriteOutcome::Body(chunk.to_vec())),
            Phase::Collecting => {
                self.buffer.extend_from_slice(chunk);
                match scan_header_end(&self.buffer) {
                    None => {
                        log::trace!(
                            "header scan inconclusive, buffer len={}",
                            self.buffer.len()
                        );
                        Ok(WriteOutcome::NeedMore)
                    }
                    Some(end) => {
                        let header_bytes = self.buffer[..end].to_vec();
                        let body = self.buffer[end..].to_vec();
                        let (_, message) = decode_message(&header_bytes)?;
                        log::debug!("header ready: code={:#06x} id={}", message.code, message.id);
                        self.phase = Phase::PassThrough;
                        self.buffer.clear();
                        Ok(WriteOutcome::HeaderReady { message, body })
                    }
                }
            }
        }
    }

    /// Signals that the writable side is finished. Returns an error if the header was never
    /// completed; otherwise marks the parser ended.
    pub fn finish(&mut self) -> Result<(), StreamError> {
        match self.phase {
            Phase::Collecting => {
                self.phase = Phase::Ended;
                Err(StreamError::PrematureEnd)
            }
            Phase::PassThrough | Phase::Ended => {
                self.phase = Phase::Ended;
                Ok(())
            }
        }
    }
}

/// Loose scan for the end-of-groups marker, starting at offset 8 (right after the fixed
/// header). Returns the offset one past the marker byte, i.e. the length of the header prefix
/// that should be handed to the decoder, or `None` if `buffer` doesn't yet contain enough to
/// tell.
///
/// This never validates anything beyond "is this byte in range": a value tag it can't place is
/// simply treated as good enough to skip past by length; the decoder is what actually rejects
/// malformed structure once the full prefix is available.
fn scan_header_end(buffer: &[u8]) -> Option<usize> {
    if buffer.len() < 8 {
        return None;
    }

    let mut pos = 8;
    let mut state = ScanState::ExpectGroup;

    loop {
        match state {
            ScanState::ExpectGroup => {
                let tag = *buffer.get(pos)?;
                match GroupTag::from_u8(tag) {
                    GroupTagClass::EndOfAttributes => return Some(pos + 1),
                    GroupTagClass::Group(_) => {
                        pos += 1;
                        state = ScanState::ExpectAttribute;
                    }
                    GroupTagClass::Unknown(_) => return Some(pos + 1),
                }
            }
            ScanState::ExpectAttribute => {
                let tag = *buffer.get(pos)?;
                if tag < value_tag::UNSUPPORTED {
                    state = ScanState::ExpectGroup;
                    continue;
                }
                pos += 1;

                let name_len = read_i16(buffer, pos)?;
                pos += 2;
                pos = pos.checked_add(name_len.max(0) as usize)?;

                let value_len = read_i16(buffer, pos)?;
                pos += 2;
                pos = pos.checked_add(value_len.max(0) as usize)?;

                if pos > buffer.len() {
                    return None;
                }
            }
        }
    }
}

fn read_i16(buffer: &[u8], pos: usize) -> Option<i16> {
    let bytes = buffer.get(pos..pos + 2)?;
    Some(i16::from_be_bytes([bytes[0], bytes[1]]))
}
