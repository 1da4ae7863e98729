//! Coordinate and geometry types shared by the raster painter and layout.
//!
//! Canonical space:
//! - Physical pixels of the output canvas (scale already applied)
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;

pub use rect::{PixelRect, Rect};
pub use vec2::Vec2;
