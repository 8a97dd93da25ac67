//! Error types for the conversion pipeline and its collaborators.

use std::path::PathBuf;

/// Errors raised inside the core frame-to-text pipeline.
///
/// All variants are fatal: the pipeline produces no partial document and
/// surfaces exactly one of these to the caller. Retry policy, if any,
/// belongs to the source loader.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// I/O failure while reading the raw frame stream.
    #[error("failed to read the frame stream: {0}")]
    StreamRead(#[source] std::io::Error),

    /// The bytes between a start/end-of-image marker pair are not a valid
    /// still image.
    #[error("frame {index} is not a valid image: {source}")]
    FrameDecode {
        index: usize,
        #[source]
        source: image::ImageError,
    },

    /// Output geometry could not be planned. Raised before any frame is
    /// processed.
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A concurrent transcoding task failed or panicked. Sibling tasks in
    /// the same batch were allowed to settle; their output is discarded.
    #[error("transcoding frame {index} failed: {reason}")]
    TranscodeTask { index: usize, reason: String },
}

/// Errors from the target geometry planner.
#[derive(Debug, thiserror::Error)]
pub enum GeometryError {
    /// Stdout is not attached to a terminal, or the size query failed.
    #[error("cannot determine terminal size: {0}")]
    TerminalUnavailable(#[source] std::io::Error),

    /// The terminal is too small to fit even a 1x1 character output.
    #[error(
        "terminal ({term_width}x{term_height}) is too small to fit a \
         {src_width}x{src_height} source; resize the terminal or pass --width"
    )]
    TerminalTooSmall {
        term_width: u16,
        term_height: u16,
        src_width: u32,
        src_height: u32,
    },

    /// The requested width and source aspect produce a dimension below 1.
    #[error("width {width} with a {src_width}x{src_height} source yields an empty output")]
    DegenerateSize {
        width: u32,
        src_width: u32,
        src_height: u32,
    },
}

/// Errors from the source loader (process spawning and image fetching).
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("ffmpeg not found. Please install it and make sure it is on your PATH.\n\n    https://ffmpeg.org/download.html\n")]
    FfmpegNotFound,

    #[error("failed to spawn ffmpeg: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("the file '{0}' does not exist or is not readable")]
    FileNotFound(PathBuf),

    #[error("unsupported file extension '{0}'")]
    UnsupportedExtension(String),

    #[error("fetching '{url}' failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("fetching '{url}' failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
