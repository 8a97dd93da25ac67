//! Bounded-concurrency frame transcoding.
//!
//! Frames are grouped into fixed-size batches. Within a batch every frame
//! gets its own thread (gray -> resample -> glyphs); the scope join is the
//! batch barrier, and batches run strictly one after another, so the number
//! of in-flight frames never exceeds one batch. Each task writes into the
//! slot matching its frame's position, never into a completion-ordered
//! structure, which keeps the final document in emission order no matter
//! which task finishes first.
//!
//! For the streaming case, [`spawn_demuxer`] runs the demuxer on its own
//! thread behind a channel bounded to one batch, so demuxing of batch N+1
//! overlaps transcoding of batch N while the external process stays
//! backpressured.

use std::io::Read;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{sync_channel, Receiver};
use std::thread;

use log::debug;

use crate::ascii::{render_frame, Charset, TargetGeometry};
use crate::demux::FrameDemuxer;
use crate::document::{AsciiDocument, GlyphGrid};
use crate::error::PipelineError;
use crate::frame::DecodedFrame;

/// Default frames per batch. Tunable via config; not a contract.
pub const DEFAULT_BATCH_SIZE: usize = 16;

/// Per-completed-frame progress callback. Receives the running total of
/// completed frames; called from worker threads.
pub type ProgressFn<'a> = dyn Fn(usize) + Sync + 'a;

/// Batch transcoder: decoded frames in, ordered glyph grids out.
pub struct Transcoder<'a> {
    geometry: TargetGeometry,
    charset: &'a Charset,
    batch_size: usize,
    progress: Option<&'a ProgressFn<'a>>,
}

impl<'a> Transcoder<'a> {
    pub fn new(geometry: TargetGeometry, charset: &'a Charset) -> Self {
        Transcoder {
            geometry,
            charset,
            batch_size: DEFAULT_BATCH_SIZE,
            progress: None,
        }
    }

    /// Set the batch size (minimum 1).
    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = size.max(1);
        self
    }

    /// Install a per-completed-frame progress callback.
    pub fn progress(mut self, callback: &'a ProgressFn<'a>) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Transcode an ordered sequence of frames into a document.
    ///
    /// Accepts either the receiver side of [`spawn_demuxer`] (streaming) or
    /// any pre-decoded ordered collection (batch case). The first error,
    /// whether from the source iterator or a transcoding task, aborts the
    /// run after the current batch has settled; no partial batch is emitted.
    pub fn run<I>(&self, frames: I) -> Result<AsciiDocument, PipelineError>
    where
        I: IntoIterator<Item = Result<DecodedFrame, PipelineError>>,
    {
        let mut document = AsciiDocument::new();
        let completed = AtomicUsize::new(0);
        let mut batch: Vec<DecodedFrame> = Vec::with_capacity(self.batch_size);

        for item in frames {
            batch.push(item?);
            if batch.len() == self.batch_size {
                let full = std::mem::replace(&mut batch, Vec::with_capacity(self.batch_size));
                self.process_batch(full, &mut document, &completed)?;
            }
        }

        if !batch.is_empty() {
            self.process_batch(batch, &mut document, &completed)?;
        }

        debug!("transcoded {} frames", document.len());
        Ok(document)
    }

    /// Process one batch: fan out, join at the barrier, append in order.
    fn process_batch(
        &self,
        frames: Vec<DecodedFrame>,
        document: &mut AsciiDocument,
        completed: &AtomicUsize,
    ) -> Result<(), PipelineError> {
        let mut slots: Vec<Option<Result<GlyphGrid, PipelineError>>> = Vec::new();
        slots.resize_with(frames.len(), || None);

        // Each task owns a disjoint slot, so no lock is needed; the scope
        // join waits for every task, errors included.
        thread::scope(|scope| {
            for (slot, frame) in slots.iter_mut().zip(frames) {
                scope.spawn(move || {
                    *slot = Some(self.transcode_frame(frame, completed));
                });
            }
        });

        // All tasks have settled. Surface the first failure before emitting
        // anything so a failed batch contributes no partial output.
        let mut grids = Vec::with_capacity(slots.len());
        for slot in slots {
            grids.push(slot.expect("batch task always writes its slot")?);
        }
        for grid in grids {
            document.push(grid);
        }
        Ok(())
    }

    fn transcode_frame(
        &self,
        frame: DecodedFrame,
        completed: &AtomicUsize,
    ) -> Result<GlyphGrid, PipelineError> {
        let index = frame.index;
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            render_frame(&frame.image, self.geometry, self.charset)
        }));

        match outcome {
            Ok(grid) => {
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Some(progress) = self.progress {
                    progress(done);
                }
                Ok(grid)
            }
            Err(payload) => Err(PipelineError::TranscodeTask {
                index,
                reason: panic_reason(payload),
            }),
        }
    }
}

fn panic_reason(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "task panicked".to_string()
    }
}

/// Run a [`FrameDemuxer`] on a background thread behind a bounded channel.
///
/// The channel holds at most one batch of decoded frames, which is the
/// blocking handoff between demuxing and transcoding: the demuxer blocks
/// once it is a full batch ahead, and the external process in turn blocks
/// on its pipe. Dropping the receiver stops the demuxer thread.
pub fn spawn_demuxer<R: Read + Send + 'static>(
    reader: R,
    capacity: usize,
) -> Receiver<Result<DecodedFrame, PipelineError>> {
    let (tx, rx) = sync_channel(capacity.max(1));
    thread::spawn(move || {
        for item in FrameDemuxer::new(reader) {
            if tx.send(item).is_err() {
                // Consumer hung up (pipeline aborted); stop reading.
                break;
            }
        }
    });
    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, RgbImage};

    fn solid_frame(index: usize, level: u8, size: u32) -> DecodedFrame {
        let img = RgbImage::from_pixel(size, size, image::Rgb([level, level, level]));
        DecodedFrame {
            index,
            image: DynamicImage::ImageRgb8(img),
        }
    }

    fn two_level() -> &'static Charset {
        static SET: Charset = Charset {
            name: "dot-at",
            description: "test",
            glyphs: &['.', '@'],
        };
        &SET
    }

    #[test]
    fn empty_input_yields_empty_document() {
        let geometry = TargetGeometry {
            width: 2,
            height: 2,
        };
        let transcoder = Transcoder::new(geometry, two_level());
        let doc = transcoder.run(std::iter::empty()).unwrap();
        assert!(doc.is_empty());
    }

    #[test]
    fn grids_match_target_geometry() {
        let geometry = TargetGeometry {
            width: 5,
            height: 3,
        };
        let transcoder = Transcoder::new(geometry, two_level()).batch_size(2);
        let frames = (0..5).map(|i| Ok(solid_frame(i, 255, 8)));
        let doc = transcoder.run(frames).unwrap();
        assert_eq!(doc.len(), 5);
        for grid in doc.frames() {
            assert_eq!((grid.width, grid.height), (5, 3));
            assert_eq!(grid.text, "@@@@@\n@@@@@\n@@@@@\n");
        }
    }

    #[test]
    fn source_error_aborts_the_run() {
        let geometry = TargetGeometry {
            width: 2,
            height: 2,
        };
        let transcoder = Transcoder::new(geometry, two_level());
        let frames = vec![
            Ok(solid_frame(0, 0, 4)),
            Err(PipelineError::StreamRead(std::io::Error::other("pipe broke"))),
        ];
        let err = transcoder.run(frames).unwrap_err();
        assert!(matches!(err, PipelineError::StreamRead(_)));
    }

    #[test]
    fn task_panic_aborts_the_batch_with_no_output() {
        // A degenerate ramp makes glyph selection panic inside the task;
        // the panic must come back as a TranscodeTask error at the batch
        // join, after every sibling has settled, with no document emitted.
        static EMPTY: Charset = Charset {
            name: "empty",
            description: "degenerate ramp",
            glyphs: &[],
        };
        let geometry = TargetGeometry {
            width: 2,
            height: 2,
        };
        let transcoder = Transcoder::new(geometry, &EMPTY).batch_size(3);
        let frames = (0..3).map(|i| Ok(solid_frame(i, 128, 4)));
        let err = transcoder.run(frames).unwrap_err();
        assert!(
            matches!(err, PipelineError::TranscodeTask { index: 0, .. }),
            "got {:?}",
            err
        );
    }

    #[test]
    fn task_panic_in_a_later_batch_discards_earlier_output() {
        // Batch 1 succeeds, batch 2 panics; the run as a whole still fails
        // and surfaces nothing from the good batch.
        static EMPTY: Charset = Charset {
            name: "empty-late",
            description: "degenerate ramp",
            glyphs: &[],
        };
        let geometry = TargetGeometry {
            width: 2,
            height: 2,
        };
        let good = Transcoder::new(geometry, two_level()).batch_size(2);
        let ok_doc = good.run((0..2).map(|i| Ok(solid_frame(i, 0, 4)))).unwrap();
        assert_eq!(ok_doc.len(), 2, "sanity: these frames transcode fine");

        let bad = Transcoder::new(geometry, &EMPTY).batch_size(2);
        let err = bad.run((0..4).map(|i| Ok(solid_frame(i, 0, 4)))).unwrap_err();
        assert!(matches!(err, PipelineError::TranscodeTask { .. }));
    }

    #[test]
    fn progress_reports_every_frame() {
        let geometry = TargetGeometry {
            width: 2,
            height: 2,
        };
        let seen = AtomicUsize::new(0);
        let callback = |_done: usize| {
            seen.fetch_add(1, Ordering::Relaxed);
        };
        let transcoder = Transcoder::new(geometry, two_level())
            .batch_size(3)
            .progress(&callback);
        let frames = (0..7).map(|i| Ok(solid_frame(i, 128, 4)));
        transcoder.run(frames).unwrap();
        assert_eq!(seen.load(Ordering::Relaxed), 7);
    }
}
