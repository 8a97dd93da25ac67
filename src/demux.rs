//! Motion-JPEG elementary stream demultiplexing.
//!
//! The external transcoder emits independently encoded JPEG images back to
//! back with no container. Each image is delimited by the standard
//! start-of-image (`FF D8`) and end-of-image (`FF D9`) markers; the demuxer
//! accumulates reads in a buffer, cuts out complete marker pairs, decodes
//! them, and assigns gap-free sequence indices in stream order.

use std::io::Read;

use image::ImageFormat;
use log::{debug, trace};

use crate::error::PipelineError;
use crate::frame::DecodedFrame;

/// JPEG start-of-image marker.
pub const SOI: [u8; 2] = [0xFF, 0xD8];
/// JPEG end-of-image marker.
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Read chunk size for the raw stream.
const READ_CHUNK: usize = 4096;

/// Streaming demuxer over any byte source.
///
/// Iterates `Result<DecodedFrame, PipelineError>`; frame emission is
/// independent of how the underlying reads are chunked, because every call
/// drains all complete marker pairs currently buffered before reading more.
/// A decode failure or a stream I/O error ends the iteration with that
/// error; the caller treats both as fatal.
pub struct FrameDemuxer<R: Read> {
    reader: R,
    buffer: Vec<u8>,
    next_index: usize,
    eof: bool,
    failed: bool,
}

impl<R: Read> FrameDemuxer<R> {
    pub fn new(reader: R) -> Self {
        FrameDemuxer {
            reader,
            buffer: Vec::with_capacity(READ_CHUNK * 4),
            next_index: 0,
            eof: false,
            failed: false,
        }
    }

    /// Number of frames emitted so far.
    pub fn frames_emitted(&self) -> usize {
        self.next_index
    }

    /// Cut and decode the first complete marker pair in the buffer, if any.
    ///
    /// Bytes preceding the start marker are not a valid frame and are
    /// discarded along with the consumed range.
    fn extract_frame(&mut self) -> Option<Result<DecodedFrame, PipelineError>> {
        let start = find_marker(&self.buffer, SOI, 0)?;
        let end = find_marker(&self.buffer, EOI, start + SOI.len())?;

        let frame_end = end + EOI.len();
        let index = self.next_index;

        let decoded =
            image::load_from_memory_with_format(&self.buffer[start..frame_end], ImageFormat::Jpeg);
        self.buffer.drain(..frame_end);

        match decoded {
            Ok(image) => {
                self.next_index += 1;
                trace!(
                    "demuxed frame {} ({}x{}, {} bytes)",
                    index,
                    image.width(),
                    image.height(),
                    frame_end - start
                );
                Some(Ok(DecodedFrame { index, image }))
            }
            Err(source) => Some(Err(PipelineError::FrameDecode { index, source })),
        }
    }
}

impl<R: Read> Iterator for FrameDemuxer<R> {
    type Item = Result<DecodedFrame, PipelineError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        loop {
            if let Some(result) = self.extract_frame() {
                self.failed = result.is_err();
                return Some(result);
            }

            if self.eof {
                debug!("frame stream ended after {} frames", self.next_index);
                return None;
            }

            let mut chunk = [0u8; READ_CHUNK];
            match self.reader.read(&mut chunk) {
                Ok(0) => self.eof = true,
                Ok(n) => self.buffer.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    self.failed = true;
                    return Some(Err(PipelineError::StreamRead(e)));
                }
            }
        }
    }
}

/// Find a two-byte marker at or after `from`.
fn find_marker(haystack: &[u8], marker: [u8; 2], from: usize) -> Option<usize> {
    if from >= haystack.len() {
        return None;
    }
    haystack[from..]
        .windows(2)
        .position(|w| w == marker)
        .map(|p| p + from)
}
