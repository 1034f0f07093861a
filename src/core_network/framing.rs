//! Control-channel framing: turns the raw byte stream into command lines.

use log::debug;
use thiserror::Error;
use tokio_util::bytes::BytesMut;
use tokio_util::codec::Decoder;

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("command line exceeds {max} bytes")]
    LineTooLong { max: usize },

    #[error("control connection read failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Splits the control stream on LF (an optional CR before it is dropped).
///
/// Lines come out trimmed and lossily decoded as UTF-8. An incomplete line
/// is reported as `Ok(None)`; a line longer than `max_length` is an error
/// and the connection is not expected to survive it.
#[derive(Debug)]
pub struct CommandCodec {
    max_length: usize,
    // Where the next LF search starts, so partial lines are scanned once
    next_index: usize,
}

impl CommandCodec {
    pub fn new(max_length: usize) -> Self {
        Self {
            max_length,
            next_index: 0,
        }
    }
}

impl Decoder for CommandCodec {
    type Item = String;
    type Error = FramingError;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<String>, FramingError> {
        let newline = buf[self.next_index..].iter().position(|b| *b == b'\n');

        let Some(offset) = newline else {
            // A trailing CR may still be waiting for its LF
            let pending = buf.len() - usize::from(buf.last() == Some(&b'\r'));
            if pending > self.max_length {
                return Err(FramingError::LineTooLong {
                    max: self.max_length,
                });
            }
            self.next_index = buf.len();
            return Ok(None);
        };

        let end = self.next_index + offset;
        self.next_index = 0;
        let frame = buf.split_to(end + 1);
        let mut content = &frame[..end];
        if content.last() == Some(&b'\r') {
            content = &content[..content.len() - 1];
        }
        if content.len() > self.max_length {
            return Err(FramingError::LineTooLong {
                max: self.max_length,
            });
        }

        Ok(Some(String::from_utf8_lossy(content).trim().to_string()))
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<String>, FramingError> {
        if let Some(line) = self.decode(buf)? {
            return Ok(Some(line));
        }
        if !buf.is_empty() {
            debug!("Discarding {} bytes of unterminated command", buf.len());
            buf.clear();
            self.next_index = 0;
        }
        Ok(None)
    }
}
