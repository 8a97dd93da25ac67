//! Bilinear resampling of 8-bit rasters.
//!
//! Grayscale conversion always happens before the resize, so only one
//! channel is ever interpolated; the alpha mask goes through the same
//! function separately.

use crate::frame::Raster;

/// Interpolate along x for both neighbor rows, then along y.
#[inline]
fn lerp2(q11: u8, q21: u8, q12: u8, q22: u8, dx: f64, dy: f64) -> u8 {
    let top = (1.0 - dx) * q11 as f64 + dx * q21 as f64;
    let bottom = (1.0 - dx) * q12 as f64 + dx * q22 as f64;
    ((1.0 - dy) * top + dy * bottom).round() as u8
}

/// Resample a raster to `new_width` x `new_height`.
///
/// For each target pixel the source coordinate is `x * W / W'` (and the y
/// analogue); the four nearest source samples are taken with the right/below
/// neighbor clamped to the last valid column/row, never wrapped. Targets of
/// width or height 1 are valid and produce one row/column.
pub fn resample(src: &Raster, new_width: u32, new_height: u32) -> Raster {
    debug_assert!(src.width >= 1 && src.height >= 1);
    debug_assert!(new_width >= 1 && new_height >= 1);

    let x_ratio = src.width as f64 / new_width as f64;
    let y_ratio = src.height as f64 / new_height as f64;

    let mut data = Vec::with_capacity((new_width * new_height) as usize);

    for y in 0..new_height {
        let orig_y = y as f64 * y_ratio;
        let y1 = orig_y as u32;
        let y2 = (y1 + 1).min(src.height - 1);
        let dy = orig_y - y1 as f64;

        for x in 0..new_width {
            let orig_x = x as f64 * x_ratio;
            let x1 = orig_x as u32;
            let x2 = (x1 + 1).min(src.width - 1);
            let dx = orig_x - x1 as f64;

            data.push(lerp2(
                src.at(x1, y1),
                src.at(x2, y1),
                src.at(x1, y2),
                src.at(x2, y2),
                dx,
                dy,
            ));
        }
    }

    Raster::new(new_width, new_height, data)
}
