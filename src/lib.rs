//! raskii library crate.
//!
//! Converts videos and still images into ASCII-art text documents and plays
//! them back in the terminal. The binary is a thin wrapper; everything is
//! exposed here so integration tests can drive the pipeline directly.

pub mod ascii;
pub mod cli;
pub mod config;
pub mod convert;
pub mod demux;
pub mod document;
pub mod error;
pub mod frame;
pub mod playback;
pub mod source;
pub mod transcode;
