/// Largest usable corner radius for a `width × height` box.
///
/// Negative radii become 0; radii above half the shorter side are clamped
/// so opposite corners never overlap.
#[inline]
pub fn clamp_radius(radius: f32, width: u32, height: u32) -> f32 {
    let half = width.min(height) as f32 / 2.0;
    if radius.is_finite() { radius.clamp(0.0, half) } else { 0.0 }
}

/// Rounded rectangle of `width × height` with a clamped corner radius,
/// queried per pixel in the shape's own coordinates.
///
/// A pixel is inside when its center lies within the shape. Nothing is
/// allocated, so very tall cards cost only what is actually queried.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RoundedMask {
    width: u32,
    height: u32,
    radius: f32,
}

impl RoundedMask {
    pub fn new(width: u32, height: u32, radius: f32) -> Self {
        Self { width, height, radius: clamp_radius(radius, width, height) }
    }

    /// Coverage test; anything outside the box is outside the shape.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return false;
        }
        let r = self.radius;
        let (w, h) = (self.width as f32, self.height as f32);
        let px = x as f32 + 0.5;
        let py = y as f32 + 0.5;
        // Nearest point on the inner (radius-shrunk) rectangle.
        let cx = px.clamp(r, (w - r).max(r));
        let cy = py.clamp(r, (h - r).max(r));
        let (dx, dy) = (px - cx, py - cy);
        dx * dx + dy * dy <= r * r + f32::EPSILON
    }

    /// True for inside pixels with an outside 4-neighbour: the 1px outline.
    pub fn is_outline(&self, x: i64, y: i64) -> bool {
        self.contains(x, y)
            && [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)]
                .iter()
                .any(|&(nx, ny)| !self.contains(nx, ny))
    }
}
