//! Per-frame rendering: raster in, glyph grid out.

use image::DynamicImage;

use super::charset::Charset;
use super::geometry::TargetGeometry;
use super::{grayscale, resize};
use crate::document::GlyphGrid;
use crate::frame::Raster;

/// Render one decoded raster to a glyph grid of the target geometry.
///
/// Luminance extraction runs first so only the gray plane (and, when the
/// source has one, the alpha plane) is resampled.
pub fn render_frame(image: &DynamicImage, geometry: TargetGeometry, charset: &Charset) -> GlyphGrid {
    let (gray, alpha) = grayscale::extract(image);
    let gray = resize::resample(&gray, geometry.width, geometry.height);
    let alpha = alpha.map(|a| resize::resample(&a, geometry.width, geometry.height));
    to_glyphs(&gray, alpha.as_ref(), charset)
}

/// Map resampled gray (and optional alpha) planes onto ramp glyphs.
///
/// Rows are newline-terminated; the grid text therefore ends with a newline.
pub fn to_glyphs(gray: &Raster, alpha: Option<&Raster>, charset: &Charset) -> GlyphGrid {
    let mut text = String::with_capacity((gray.width as usize + 1) * gray.height as usize);

    for y in 0..gray.height {
        for x in 0..gray.width {
            let g = gray.at(x, y);
            let glyph = match alpha {
                Some(mask) => charset.glyph_masked(g, mask.at(x, y)),
                None => charset.glyph(g),
            };
            text.push(glyph);
        }
        text.push('\n');
    }

    GlyphGrid {
        width: gray.width,
        height: gray.height,
        text,
    }
}
