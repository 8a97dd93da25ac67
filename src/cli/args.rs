//! CLI argument parsing with clap.

use clap::Parser;
use std::path::PathBuf;

/// Convert videos and images to ASCII art in the terminal.
#[derive(Parser, Debug)]
#[command(name = "raskii")]
#[command(version, about = "Convert videos and images to ASCII art", long_about = None)]
pub struct Args {
    /// Path or URL of the image/video to convert
    #[arg(short, long)]
    pub path: Option<String>,

    /// Output folder; the document is written as <folder>/<stem>.txt
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Play back a previously saved ASCII document
    #[arg(short, long)]
    pub render: Option<PathBuf>,

    /// Output width in characters; height follows the source aspect.
    /// Defaults to fitting the terminal.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=500))]
    pub width: Option<u32>,

    /// Character set index (see --showset)
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=13))]
    pub charset: Option<u8>,

    /// Video frame rate for transcoding and playback
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=24))]
    pub fps: Option<u32>,

    /// List all character sets and exit
    #[arg(short, long)]
    pub showset: bool,

    /// Config file path
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::parse_from(["raskii"]);
        assert!(args.path.is_none());
        assert!(args.output.is_none());
        assert!(args.render.is_none());
        assert!(args.width.is_none());
        assert!(args.charset.is_none());
        assert!(args.fps.is_none());
        assert!(!args.showset);
        assert!(args.config.is_none());
    }

    #[test]
    fn short_flags() {
        let args = Args::parse_from(["raskii", "-p", "cat.mp4", "-w", "120", "-c", "5", "-f", "24"]);
        assert_eq!(args.path.as_deref(), Some("cat.mp4"));
        assert_eq!(args.width, Some(120));
        assert_eq!(args.charset, Some(5));
        assert_eq!(args.fps, Some(24));
    }

    #[test]
    fn charset_range_is_enforced() {
        assert!(Args::try_parse_from(["raskii", "-c", "0"]).is_err());
        assert!(Args::try_parse_from(["raskii", "-c", "14"]).is_err());
        assert!(Args::try_parse_from(["raskii", "-c", "13"]).is_ok());
    }

    #[test]
    fn width_range_is_enforced() {
        assert!(Args::try_parse_from(["raskii", "-w", "0"]).is_err());
        assert!(Args::try_parse_from(["raskii", "-w", "501"]).is_err());
        assert!(Args::try_parse_from(["raskii", "-w", "500"]).is_ok());
    }

    #[test]
    fn fps_range_is_enforced() {
        assert!(Args::try_parse_from(["raskii", "-f", "0"]).is_err());
        assert!(Args::try_parse_from(["raskii", "-f", "25"]).is_err());
    }
}
