//! Frame and raster value types shared across the pipeline.

use image::DynamicImage;

/// One decoded frame of the source, tagged with its emission order.
///
/// Indices are assigned at decode time and are strictly increasing with no
/// gaps, so the document assembler can rely on them for final ordering.
#[derive(Debug)]
pub struct DecodedFrame {
    /// Position of this frame in the source stream, starting at 0.
    pub index: usize,
    /// The decoded raster (RGB or RGBA).
    pub image: DynamicImage,
}

impl DecodedFrame {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// A W x H plane of 8-bit samples, row-major.
///
/// Used both for luminance (`GrayRaster` role) and opacity (`AlphaMask`
/// role); the two are resampled independently but share this representation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), (width * height) as usize);
        Raster {
            width,
            height,
            data,
        }
    }

    /// Sample at (x, y). Callers are expected to stay in bounds.
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> u8 {
        self.data[(y * self.width + x) as usize]
    }
}
