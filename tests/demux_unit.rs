//! Unit tests for the MJPEG demuxer, driven by synthetic streams built with
//! the image crate's JPEG encoder.

use std::io::{Cursor, Read};

use image::{ImageFormat, Rgb, RgbImage};

use raskii::demux::FrameDemuxer;
use raskii::error::PipelineError;

/// Encode a solid-gray square as JPEG bytes.
fn jpeg_frame(level: u8, size: u32) -> Vec<u8> {
    let img = RgbImage::from_pixel(size, size, Rgb([level, level, level]));
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Jpeg)
        .unwrap();
    bytes
}

/// Reader that hands out at most `chunk` bytes per read call.
struct ChunkedReader {
    data: Vec<u8>,
    pos: usize,
    chunk: usize,
}

impl ChunkedReader {
    fn new(data: Vec<u8>, chunk: usize) -> Self {
        ChunkedReader {
            data,
            pos: 0,
            chunk,
        }
    }
}

impl Read for ChunkedReader {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.chunk.min(buf.len()).min(self.data.len() - self.pos);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

fn stream_of(levels: &[u8], size: u32) -> Vec<u8> {
    let mut bytes = Vec::new();
    for &level in levels {
        bytes.extend(jpeg_frame(level, size));
    }
    bytes
}

#[test]
fn emits_every_frame_indexed_in_stream_order() {
    let stream = stream_of(&[0, 128, 255], 16);
    let frames: Vec<_> = FrameDemuxer::new(stream.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();

    assert_eq!(frames.len(), 3);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.index, i, "indices are gap-free and ordered");
        assert_eq!((frame.width(), frame.height()), (16, 16));
    }

    // Brightness order survives JPEG round-tripping.
    let brightness: Vec<u8> = frames
        .iter()
        .map(|f| f.image.to_luma8().get_pixel(8, 8).0[0])
        .collect();
    assert!(brightness[0] < brightness[1] && brightness[1] < brightness[2]);
}

#[test]
fn emission_is_independent_of_read_chunking() {
    let stream = stream_of(&[10, 90, 170, 250], 12);

    let reference: Vec<_> = FrameDemuxer::new(stream.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(reference.len(), 4);

    for chunk in [1, 3, 7, 64, 1024, 8192] {
        let frames: Vec<_> = FrameDemuxer::new(ChunkedReader::new(stream.clone(), chunk))
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        assert_eq!(frames.len(), reference.len(), "chunk size {}", chunk);
        for (a, b) in frames.iter().zip(&reference) {
            assert_eq!(a.index, b.index);
            assert_eq!(a.image.to_rgb8().into_raw(), b.image.to_rgb8().into_raw());
        }
    }
}

#[test]
fn bytes_before_the_start_marker_are_discarded() {
    let mut stream = vec![0x00, 0x11, 0x22, 0x33];
    stream.extend(stream_of(&[200], 8));

    let frames: Vec<_> = FrameDemuxer::new(stream.as_slice())
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(frames[0].index, 0);
}

#[test]
fn frames_buffered_at_eof_are_still_drained() {
    // The whole stream arrives in one read; every frame must come out even
    // though no further reads happen.
    let stream = stream_of(&[40, 80, 120], 8);
    let demux = FrameDemuxer::new(ChunkedReader::new(stream, usize::MAX));
    assert_eq!(demux.count(), 3);
}

#[test]
fn undecodable_frame_aborts_the_stream() {
    let mut stream = stream_of(&[100], 8);
    stream.extend_from_slice(&[0xFF, 0xD8, 0xDE, 0xAD, 0xBE, 0xEF, 0xFF, 0xD9]);
    stream.extend(stream_of(&[200], 8));

    let mut demux = FrameDemuxer::new(stream.as_slice());
    assert!(demux.next().unwrap().is_ok());
    let err = demux.next().unwrap().unwrap_err();
    assert!(matches!(err, PipelineError::FrameDecode { index: 1, .. }));
    assert!(demux.next().is_none(), "fatal errors fuse the demuxer");
}

#[test]
fn stream_read_error_is_fatal() {
    struct FailingReader;
    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("pipe burst"))
        }
    }

    let mut demux = FrameDemuxer::new(FailingReader);
    let err = demux.next().unwrap().unwrap_err();
    assert!(matches!(err, PipelineError::StreamRead(_)));
    assert!(demux.next().is_none());
}
