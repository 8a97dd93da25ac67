//! End-to-end conversion flows wiring the loader, planner, transcoder,
//! document and renderer together.

use std::path::PathBuf;

use log::debug;

use crate::ascii::{charset, render_frame, Charset, TargetGeometry};
use crate::document::{split_frames, AsciiDocument};
use crate::error::{PipelineError, SourceError};
use crate::playback;
use crate::source::{self, VideoStream};
use crate::transcode::{spawn_demuxer, Transcoder};

/// Errors surfaced by a conversion run.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("no frames were decoded from '{0}'")]
    NoFrames(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Settings shared by the conversion flows, already merged from CLI flags
/// and the config file.
pub struct RunOptions {
    pub charset: &'static Charset,
    pub width: Option<u32>,
    pub fps: u32,
    pub batch_size: usize,
    pub output: Option<PathBuf>,
}

/// Convert a still image to a single-grid document, then print or save it.
pub fn image_to_ascii(path: &str, opts: &RunOptions) -> Result<(), RunError> {
    let image = source::load_image(path)?;
    let geometry = TargetGeometry::plan(image.width(), image.height(), opts.width)
        .map_err(PipelineError::from)?;
    debug!(
        "image {}x{} -> {}x{} glyphs",
        image.width(),
        image.height(),
        geometry.width,
        geometry.height
    );

    let document = AsciiDocument::single(render_frame(&image, geometry, opts.charset));

    match &opts.output {
        Some(dir) => {
            let saved = document.save(dir, &source::file_stem(path))?;
            println!("saved {}", saved.display());
        }
        None => print!("{}", document.to_text()),
    }
    Ok(())
}

/// Convert a video to a multi-frame document via the streaming pipeline,
/// then play it back or save it.
pub fn video_to_ascii(path: &str, opts: &RunOptions) -> Result<(), RunError> {
    let mut stream = VideoStream::open(path, opts.fps)?;
    let bytes = stream.take_stream().ok_or_else(|| {
        SourceError::SpawnFailed(std::io::Error::other("ffmpeg stdout was not captured"))
    })?;

    // Demuxing runs ahead on its own thread, at most one batch deep.
    let frames = spawn_demuxer(bytes, opts.batch_size);

    // Geometry is fixed for the whole run from the first frame's raster,
    // before any frame is transcoded.
    let first = match frames.recv() {
        Ok(item) => item?,
        Err(_) => return Err(RunError::NoFrames(path.to_string())),
    };
    let geometry = TargetGeometry::plan(first.width(), first.height(), opts.width)
        .map_err(PipelineError::from)?;
    debug!(
        "video {}x{} -> {}x{} glyphs per frame",
        first.width(),
        first.height(),
        geometry.width,
        geometry.height
    );

    let report = |done: usize| {
        eprint!("\rtranscoded {} frames", done);
    };
    let transcoder = Transcoder::new(geometry, opts.charset)
        .batch_size(opts.batch_size)
        .progress(&report);

    let document = transcoder.run(std::iter::once(Ok(first)).chain(frames))?;
    eprintln!();
    stream.finish()?;

    if document.is_empty() {
        return Err(RunError::NoFrames(path.to_string()));
    }

    if let Some(dir) = &opts.output {
        let saved = document.save(dir, &source::file_stem(path))?;
        println!("saved {}", saved.display());
    }

    // Saving and playback are independent: a saved run still plays back
    // when the art fits the current terminal.
    let fits = geometry_fits(geometry, crossterm::terminal::size().ok());
    if fits {
        let texts: Vec<&str> = document.frames().iter().map(|f| f.text.as_str()).collect();
        playback::play_frames(&texts, opts.fps)?;
    } else if opts.output.is_none() {
        println!(
            "the ASCII art is larger than the terminal; enlarge the \
             terminal or pass -o to save it to a file"
        );
    }
    Ok(())
}

/// Whether a planned geometry fits the terminal. An unavailable terminal
/// size counts as not fitting.
fn geometry_fits(geometry: TargetGeometry, term: Option<(u16, u16)>) -> bool {
    match term {
        Some((term_width, term_height)) => {
            geometry.width <= term_width as u32 && geometry.height <= term_height as u32
        }
        None => false,
    }
}

/// What to do with a previously saved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RenderPlan {
    /// Single frame: print it as-is.
    Print,
    /// Multiple frames that fit the terminal: animate them.
    Play,
    /// Multiple frames wider than the terminal by this many columns.
    TooWide(usize),
}

/// Play back (or print) a previously saved ASCII document.
///
/// A multi-frame document wider than the terminal is not played; the frames
/// would wrap and the animation would be garbage.
pub fn render_document(path: &std::path::Path, fps: u32) -> Result<(), RunError> {
    let text = std::fs::read_to_string(path)?;
    let term_width = crossterm::terminal::size().ok().map(|(w, _)| w);

    match render_plan(&text, term_width) {
        RenderPlan::Print => print!("{}", text),
        RenderPlan::Play => {
            let frames = split_frames(&text);
            playback::play_frames(&frames, fps)?;
        }
        RenderPlan::TooWide(excess) => {
            println!(
                "the ASCII art is {} columns wider than the terminal; enlarge \
                 the terminal to play it back",
                excess
            );
        }
    }
    Ok(())
}

fn render_plan(text: &str, term_width: Option<u16>) -> RenderPlan {
    if split_frames(text).len() <= 1 {
        return RenderPlan::Print;
    }
    let line_width = text.lines().next().map_or(0, |l| l.chars().count());
    match term_width {
        Some(cols) if line_width > cols as usize => RenderPlan::TooWide(line_width - cols as usize),
        _ => RenderPlan::Play,
    }
}

/// Print every registered character set with its description.
pub fn show_charsets() {
    for (i, set) in charset::registry().iter().enumerate() {
        println!("{}", set.description);
        let glyphs: Vec<String> = set.glyphs.iter().map(|c| c.to_string()).collect();
        println!("{}) {}\n", i + 1, glyphs.join(" "));
    }
    println!("Note: the Unicode sets may not render in all terminals.");
}
