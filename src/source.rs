//! Source acquisition: the ffmpeg transcoder process and still images.
//!
//! Video input is never decoded here; ffmpeg is spawned to re-emit the
//! source as a motion-JPEG elementary stream on its stdout, which the
//! demuxer consumes. The process, its format selection and its lifecycle
//! are opaque to the pipeline.

use std::io::{BufRead, BufReader};
use std::path::Path;
use std::process::{Child, ChildStdout, Command, Stdio};
use std::thread::{self, JoinHandle};

use image::DynamicImage;
use log::{debug, warn};

use crate::error::SourceError;

/// What a given input path refers to, by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Image,
    Video,
    /// A previously saved ASCII document.
    Document,
}

/// Classify a path by its extension.
pub fn classify(path: &str) -> Result<InputKind, SourceError> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" | "png" | "webp" | "tiff" | "bmp" | "gif" => Ok(InputKind::Image),
        "mp4" | "avi" | "mov" | "mkv" | "flv" | "webm" | "mpeg" => Ok(InputKind::Video),
        "txt" => Ok(InputKind::Document),
        other => Err(SourceError::UnsupportedExtension(other.to_string())),
    }
}

/// File stem used when persisting the output document.
pub fn file_stem(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("ascii")
        .to_string()
}

/// A running ffmpeg process emitting an MJPEG elementary stream.
///
/// Stdout is handed to the demuxer as the single reader; stderr is drained
/// by a background thread into debug logs so the pipe never fills up. The
/// process is killed on drop if still running.
#[derive(Debug)]
pub struct VideoStream {
    child: Child,
    stdout: Option<ChildStdout>,
    stderr_thread: Option<JoinHandle<Vec<String>>>,
}

impl VideoStream {
    /// Spawn ffmpeg transcoding `path` to MJPEG at the given frame rate.
    pub fn open(path: &str, fps: u32) -> Result<Self, SourceError> {
        if !Path::new(path).exists() {
            return Err(SourceError::FileNotFound(path.into()));
        }

        let fps = fps.to_string();
        let mut child = Command::new("ffmpeg")
            .args([
                "-i", path, "-f", "image2pipe", "-vcodec", "mjpeg", "-r", &fps, "pipe:1",
            ])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    SourceError::FfmpegNotFound
                } else {
                    SourceError::SpawnFailed(e)
                }
            })?;

        let stdout = child.stdout.take();
        let stderr_thread = child.stderr.take().map(|stderr| {
            thread::spawn(move || {
                let reader = BufReader::new(stderr);
                let mut lines = Vec::new();
                for line in reader.lines() {
                    match line {
                        Ok(l) => {
                            debug!("[ffmpeg] {}", l);
                            lines.push(l);
                        }
                        Err(_) => break,
                    }
                }
                lines
            })
        });

        debug!("spawned ffmpeg (pid {}) for '{}'", child.id(), path);
        Ok(VideoStream {
            child,
            stdout,
            stderr_thread,
        })
    }

    /// Take exclusive ownership of the MJPEG byte stream.
    ///
    /// Can only be taken once; the demuxer is the single reader.
    pub fn take_stream(&mut self) -> Option<ChildStdout> {
        self.stdout.take()
    }

    /// Wait for ffmpeg to exit and log its stderr if it failed.
    pub fn finish(&mut self) -> Result<(), SourceError> {
        let status = self.child.wait()?;
        let stderr = self
            .stderr_thread
            .take()
            .and_then(|h| h.join().ok())
            .unwrap_or_default();

        if !status.success() {
            warn!("ffmpeg exited with {}", status);
            for line in stderr.iter().rev().take(5) {
                warn!("[ffmpeg] {}", line);
            }
        }
        Ok(())
    }
}

impl Drop for VideoStream {
    fn drop(&mut self) {
        if matches!(self.child.try_wait(), Ok(None)) {
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Load a still image from a local path or an http(s) URL.
pub fn load_image(path: &str) -> Result<DynamicImage, SourceError> {
    if path.starts_with("http://") || path.starts_with("https://") {
        let response =
            reqwest::blocking::get(path).map_err(|source| SourceError::Http {
                url: path.to_string(),
                source,
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                url: path.to_string(),
                status: status.as_u16(),
            });
        }
        let bytes = response.bytes().map_err(|source| SourceError::Http {
            url: path.to_string(),
            source,
        })?;
        Ok(image::load_from_memory(&bytes)?)
    } else {
        if !Path::new(path).exists() {
            return Err(SourceError::FileNotFound(path.into()));
        }
        Ok(image::open(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_by_extension() {
        assert_eq!(classify("clip.mp4").unwrap(), InputKind::Video);
        assert_eq!(classify("clip.MOV").unwrap(), InputKind::Video);
        assert_eq!(classify("photo.jpeg").unwrap(), InputKind::Image);
        assert_eq!(classify("art.txt").unwrap(), InputKind::Document);
        assert!(matches!(
            classify("notes.pdf"),
            Err(SourceError::UnsupportedExtension(_))
        ));
        assert!(matches!(
            classify("no_extension"),
            Err(SourceError::UnsupportedExtension(_))
        ));
    }

    #[test]
    fn stem_strips_directory_and_extension() {
        assert_eq!(file_stem("media/clips/cat.mp4"), "cat");
        assert_eq!(file_stem("cat.tar.mp4"), "cat.tar");
    }

    #[test]
    fn missing_video_file_is_reported_before_spawn() {
        let err = VideoStream::open("definitely/not/here.mp4", 12).unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound(_)));
    }

    #[test]
    fn missing_image_file_is_reported() {
        let err = load_image("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, SourceError::FileNotFound(_)));
    }
}
