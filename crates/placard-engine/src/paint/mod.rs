//! Paint model shared between layout and the raster painter.
//!
//! Scope:
//! - color representation (straight-alpha sRGB bytes)
//! - paint sources (solid, two-stop axis-aligned gradient)
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::{Color, ParseColorError};
pub use gradient::{GradientAxis, LinearGradient};

/// Paint source for filling a region.
///
/// Extend by adding variants and a matching arm in `raster::fill`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    LinearGradient(LinearGradient),
}

impl From<Color> for Paint {
    fn from(c: Color) -> Self {
        Paint::Solid(c)
    }
}

impl From<LinearGradient> for Paint {
    fn from(g: LinearGradient) -> Self {
        Paint::LinearGradient(g)
    }
}
