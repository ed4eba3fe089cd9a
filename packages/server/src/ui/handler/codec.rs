//! Line framing for chat connections.
//!
//! Wraps `LinesCodec` so that an over-long line becomes a frame instead of a
//! stream error: `FramedRead` stops yielding after any decoder error, and a
//! too-long line must not end the connection.
//!
//! While a connection is still choosing its display name, the first payload
//! does not need a trailing newline. Whatever has arrived when a read ends
//! without a pending newline is taken as the name.

use bytes::BytesMut;
use tokio_util::codec::{Decoder, LinesCodec, LinesCodecError};

/// One decoded frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// A complete line, without its terminator
    Text(String),
    /// A line longer than the limit was discarded
    TooLong,
}

#[derive(Debug)]
pub struct ChatLineCodec {
    lines: LinesCodec,
    max_length: usize,
    awaiting_name: bool,
}

impl ChatLineCodec {
    /// Codec for a freshly accepted connection (name phase)
    pub fn new(max_length: usize) -> Self {
        Self {
            lines: LinesCodec::new_with_max_length(max_length),
            max_length,
            awaiting_name: true,
        }
    }

    /// Switch to strict newline framing once the name is registered
    pub fn name_accepted(&mut self) {
        self.awaiting_name = false;
    }
}

impl Decoder for ChatLineCodec {
    type Item = Line;
    type Error = LinesCodecError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Line>, LinesCodecError> {
        match self.lines.decode(src) {
            Ok(Some(line)) => Ok(Some(Line::Text(line))),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Line::TooLong)),
            Err(e) => Err(e),
            // LinesCodec drains the buffer while discarding, so leftover bytes
            // here are an unterminated payload within the length limit
            Ok(None) if self.awaiting_name && !src.is_empty() => {
                let payload = src.split();
                // the inner codec remembers how far it scanned; start it over
                self.lines = LinesCodec::new_with_max_length(self.max_length);
                let text = String::from_utf8(payload.to_vec()).map_err(|e| {
                    LinesCodecError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
                })?;
                Ok(Some(Line::Text(text.trim_end_matches('\r').to_string())))
            }
            Ok(None) => Ok(None),
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Line>, LinesCodecError> {
        match self.lines.decode_eof(src) {
            Ok(line) => Ok(line.map(Line::Text)),
            Err(LinesCodecError::MaxLineLengthExceeded) => Ok(Some(Line::TooLong)),
            Err(e) => Err(e),
        }
    }
}
