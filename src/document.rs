//! The assembled text document and its persisted layout.
//!
//! Persisted layout is plain text: one glyph row per line, frames separated
//! by exactly one blank line, no header or metadata.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// One rendered frame: a W x H grid of glyphs, rows newline-terminated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphGrid {
    pub width: u32,
    pub height: u32,
    pub text: String,
}

/// An ordered sequence of glyph grids; one grid for a still image, one per
/// source frame for a video.
#[derive(Debug, Default)]
pub struct AsciiDocument {
    frames: Vec<GlyphGrid>,
}

impl AsciiDocument {
    pub fn new() -> Self {
        AsciiDocument::default()
    }

    pub fn single(frame: GlyphGrid) -> Self {
        AsciiDocument {
            frames: vec![frame],
        }
    }

    /// Append the next frame. Callers append in index order only.
    pub fn push(&mut self, frame: GlyphGrid) {
        self.frames.push(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn frames(&self) -> &[GlyphGrid] {
        &self.frames
    }

    /// Serialize to the persisted layout. Grids already end with a newline,
    /// so joining on a single newline yields exactly one blank line between
    /// frames.
    pub fn to_text(&self) -> String {
        let texts: Vec<&str> = self.frames.iter().map(|f| f.text.as_str()).collect();
        texts.join("\n")
    }

    /// Write the document to `<dir>/<stem>.txt` and return the path.
    pub fn save(&self, dir: &Path, stem: &str) -> std::io::Result<PathBuf> {
        let path = dir.join(format!("{}.txt", stem));
        let mut file = fs::File::create(&path)?;
        file.write_all(self.to_text().as_bytes())?;
        Ok(path)
    }
}

/// Split persisted document text back into per-frame chunks.
///
/// The inverse of [`AsciiDocument::to_text`]: a single chunk means a still
/// image, several mean a playable animation.
pub fn split_frames(text: &str) -> Vec<&str> {
    text.split("\n\n").filter(|f| !f.is_empty()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(text: &str) -> GlyphGrid {
        GlyphGrid {
            width: text.lines().next().map_or(0, |l| l.chars().count()) as u32,
            height: text.lines().count() as u32,
            text: text.to_string(),
        }
    }

    #[test]
    fn single_frame_has_no_separator() {
        let doc = AsciiDocument::single(grid("@@\n@@\n"));
        assert_eq!(doc.to_text(), "@@\n@@\n");
    }

    #[test]
    fn frames_are_separated_by_one_blank_line() {
        let mut doc = AsciiDocument::new();
        doc.push(grid("ab\n"));
        doc.push(grid("cd\n"));
        doc.push(grid("ef\n"));
        assert_eq!(doc.to_text(), "ab\n\ncd\n\nef\n");
    }

    #[test]
    fn split_frames_round_trips() {
        let mut doc = AsciiDocument::new();
        doc.push(grid("ab\nab\n"));
        doc.push(grid("cd\ncd\n"));
        let text = doc.to_text();
        let frames = split_frames(&text);
        assert_eq!(frames, vec!["ab\nab", "cd\ncd\n"]);
        assert_eq!(frames.len(), doc.len());
    }

    #[test]
    fn save_writes_stem_txt() {
        let dir = tempfile::tempdir().unwrap();
        let doc = AsciiDocument::single(grid(".:\n.:\n"));
        let path = doc.save(dir.path(), "clip").unwrap();
        assert_eq!(path.file_name().unwrap(), "clip.txt");
        assert_eq!(std::fs::read_to_string(path).unwrap(), ".:\n.:\n");
    }
}
