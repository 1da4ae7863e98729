//! CPU rasterization into an RGBA buffer.

mod canvas;
mod fill;
mod mask;

pub use canvas::Canvas;
pub use fill::{fill_gradient, fill_paint, fill_solid};
pub use mask::{clamp_radius, RoundedMask};
