use clap::Parser;

use raskii::ascii::Charset;
use raskii::cli::Args;
use raskii::config::Config;
use raskii::convert::{self, RunOptions};
use raskii::source::{self, InputKind};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    if args.showset {
        convert::show_charsets();
        return Ok(());
    }

    let config = Config::load(args.config.as_deref())?;

    let charset_index = args.charset.unwrap_or(config.ascii.charset);
    let charset = Charset::from_index(charset_index)
        .ok_or_else(|| format!("charset index {} is out of range (1-13)", charset_index))?;
    let fps = args.fps.unwrap_or(config.playback.fps);

    if let Some(render) = &args.render {
        convert::render_document(render, fps)?;
        return Ok(());
    }

    let Some(path) = args.path else {
        eprintln!("Usage: raskii --path <file>");
        eprintln!("Type --help to see a list of all options.");
        return Ok(());
    };

    let opts = RunOptions {
        charset,
        width: args.width,
        fps,
        batch_size: config.pipeline.batch_size,
        output: args.output,
    };

    // Direct image URLs have no meaningful extension to classify.
    if path.starts_with("http://") || path.starts_with("https://") {
        convert::image_to_ascii(&path, &opts)?;
        return Ok(());
    }

    match source::classify(&path)? {
        InputKind::Image => convert::image_to_ascii(&path, &opts)?,
        InputKind::Video => convert::video_to_ascii(&path, &opts)?,
        InputKind::Document => convert::render_document(std::path::Path::new(&path), fps)?,
    }
    Ok(())
}
