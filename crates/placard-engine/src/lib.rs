//! Placard engine crate.
//!
//! Geometry, colors and gradients, font loading and line breaking, and the
//! CPU canvas the poster layout paints into.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod raster;
pub mod text;
