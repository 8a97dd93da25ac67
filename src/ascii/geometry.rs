//! Output geometry planning.
//!
//! Terminal character cells are roughly twice as tall as wide, so the
//! planner applies a fixed 2.0 width correction to keep the source aspect
//! on the character grid. Geometry is planned once per run, before any
//! frame is transcoded, and both dimensions must come out >= 1; a terminal
//! that is too small or a degenerate aspect is an error, never a clamp.

use crate::error::GeometryError;

/// Width correction for the terminal character cell aspect (height/width).
pub const CELL_ASPECT: f64 = 2.0;

/// Fixed output dimensions for a whole run, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetGeometry {
    pub width: u32,
    pub height: u32,
}

impl TargetGeometry {
    /// Plan the geometry for a source raster.
    ///
    /// With a width override the terminal is ignored and the height follows
    /// from the source aspect; otherwise the current terminal size bounds
    /// both dimensions.
    pub fn plan(
        src_width: u32,
        src_height: u32,
        width_override: Option<u32>,
    ) -> Result<TargetGeometry, GeometryError> {
        match width_override {
            Some(width) => Self::from_width(src_width, src_height, width),
            None => {
                let (term_width, term_height) =
                    crossterm::terminal::size().map_err(GeometryError::TerminalUnavailable)?;
                Self::fit_terminal(src_width, src_height, term_width, term_height)
            }
        }
    }

    /// Fit the source into a terminal of the given size.
    ///
    /// scale = min(termH / H, termW / (2 * W)), width = floor(W * scale * 2),
    /// height = floor(H * scale); both dimensions fit the terminal and the
    /// source aspect survives the non-square character grid.
    pub fn fit_terminal(
        src_width: u32,
        src_height: u32,
        term_width: u16,
        term_height: u16,
    ) -> Result<TargetGeometry, GeometryError> {
        let height_scale = term_height as f64 / src_height as f64;
        let width_scale = term_width as f64 / (CELL_ASPECT * src_width as f64);
        let scale = height_scale.min(width_scale);

        let width = (src_width as f64 * scale * CELL_ASPECT) as u32;
        let height = (src_height as f64 * scale) as u32;

        if width < 1 || height < 1 {
            return Err(GeometryError::TerminalTooSmall {
                term_width,
                term_height,
                src_width,
                src_height,
            });
        }

        Ok(TargetGeometry { width, height })
    }

    /// Derive the height from an explicit width and the source aspect.
    pub fn from_width(
        src_width: u32,
        src_height: u32,
        width: u32,
    ) -> Result<TargetGeometry, GeometryError> {
        let height = (src_height as f64 * width as f64 / (src_width as f64 * CELL_ASPECT)).round()
            as u32;

        if width < 1 || height < 1 {
            return Err(GeometryError::DegenerateSize {
                width,
                src_width,
                src_height,
            });
        }

        Ok(TargetGeometry { width, height })
    }
}
