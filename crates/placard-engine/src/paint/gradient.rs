use super::Color;

/// Axis a two-color gradient runs along.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum GradientAxis {
    /// Left to right, one color per pixel column.
    Horizontal,
    /// Top to bottom, one color per pixel row.
    Vertical,
}

impl GradientAxis {
    /// Snaps an angle in degrees to the nearest supported axis.
    ///
    /// Angles within 45° of 0°/180° are horizontal; everything else
    /// (including exact diagonals and non-finite input) is vertical.
    pub fn from_angle(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return GradientAxis::Vertical;
        }
        let a = degrees.rem_euclid(180.0);
        if a < 45.0 || a > 135.0 {
            GradientAxis::Horizontal
        } else {
            GradientAxis::Vertical
        }
    }
}

/// Two-stop linear gradient with an angle in degrees.
///
/// Only axis-aligned rendering is supported; see [`GradientAxis::from_angle`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LinearGradient {
    pub start: Color,
    pub end: Color,
    pub angle: f32,
}

impl LinearGradient {
    #[inline]
    pub const fn new(start: Color, end: Color, angle: f32) -> Self {
        Self { start, end, angle }
    }

    #[inline]
    pub fn axis(&self) -> GradientAxis {
        GradientAxis::from_angle(self.angle)
    }

    /// Color at normalized position `t` along the axis.
    #[inline]
    pub fn color_at(&self, t: f32) -> Color {
        self.start.lerp(self.end, t)
    }

    /// Color of step `i` out of `extent` pixels.
    ///
    /// `t = i / max(1, extent - 1)`, so a 1px extent is pure `start` and the
    /// last pixel of a longer extent is pure `end`.
    #[inline]
    pub fn color_at_step(&self, i: u32, extent: u32) -> Color {
        let denom = extent.saturating_sub(1).max(1);
        self.color_at(i as f32 / denom as f32)
    }
}
