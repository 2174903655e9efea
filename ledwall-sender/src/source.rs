//! Frame source
//!
//! Frames arrive back to back on a byte stream with no header or
//! delimiter. Every exact read of one frame length is a frame; a short read
//! ends the stream.

use std::io::{ErrorKind, Read};

use crate::error::SourceError;

/// Splits a byte stream into fixed-length frames
pub struct FrameSource<R> {
    reader: R,
    buf: Vec<u8>,
    frames: u64,
}

impl<R: Read> FrameSource<R> {
    /// Read frames of `frame_len` bytes from `reader`
    pub fn new(reader: R, frame_len: usize) -> Self {
        Self {
            reader,
            buf: vec![0; frame_len],
            frames: 0,
        }
    }

    /// Next complete frame, or `None` once the stream has ended
    ///
    /// A trailing partial frame is discarded.
    pub fn next_frame(&mut self) -> Result<Option<&[u8]>, SourceError> {
        match self.reader.read_exact(&mut self.buf) {
            Ok(()) => {
                self.frames += 1;
                Ok(Some(&self.buf))
            }
            Err(err) if err.kind() == ErrorKind::UnexpectedEof => Ok(None),
            Err(source) => Err(SourceError::Read {
                frame: self.frames,
                source,
            }),
        }
    }

    /// Complete frames read so far
    pub fn frames_read(&self) -> u64 {
        self.frames
    }
}
