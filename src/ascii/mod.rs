//! Frame-to-glyph conversion building blocks.
//!
//! The per-frame pipeline is:
//!
//! 1. **Luminance mapping** - RGB(A) to an 8-bit gray raster (+ alpha mask)
//! 2. **Bilinear resampling** - gray/alpha rasters to the target geometry
//! 3. **Glyph selection** - brightness (and opacity) to ramp characters
//!
//! [`geometry`] plans the target dimensions once per run, before any frame
//! is processed; [`render`] ties the three per-frame steps together.

pub mod charset;
pub mod geometry;
pub mod grayscale;
pub mod render;
pub mod resize;

pub use charset::{Charset, CHARSET_COUNT};
pub use geometry::TargetGeometry;
pub use render::render_frame;
