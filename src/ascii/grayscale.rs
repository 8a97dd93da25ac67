//! RGB(A) to luminance conversion using the ITU-R BT.601 formula.

use image::DynamicImage;

use crate::frame::Raster;

/// Convert a decoded frame to a gray raster and, when the source carries
/// transparency, a parallel alpha mask.
///
/// Luminance is `round(0.299*R + 0.587*G + 0.114*B)` computed in integer
/// math (coefficients scaled by 1000) and truncated to 8 bits. The alpha
/// mask is the source's 8-bit alpha channel copied as-is; palette or keyed
/// transparency does not count as an alpha channel, so such sources get
/// `None`.
pub fn extract(image: &DynamicImage) -> (Raster, Option<Raster>) {
    let width = image.width();
    let height = image.height();
    let pixel_count = (width * height) as usize;

    let rgba = image.to_rgba8();
    let mut gray = Vec::with_capacity(pixel_count);

    let has_alpha = image.color().has_alpha();
    let mut alpha = has_alpha.then(|| Vec::with_capacity(pixel_count));

    for px in rgba.chunks_exact(4) {
        let r = px[0] as u32;
        let g = px[1] as u32;
        let b = px[2] as u32;
        // Coefficients scaled by 1000; +500 rounds to nearest.
        let lum = (299 * r + 587 * g + 114 * b + 500) / 1000;
        gray.push(lum as u8);

        if let Some(ref mut a) = alpha {
            a.push(px[3]);
        }
    }

    (
        Raster::new(width, height, gray),
        alpha.map(|a| Raster::new(width, height, a)),
    )
}
