use placard_engine::paint::{Color, Paint};

use crate::model::StyleOverride;
use crate::theme::Theme;

/// Concrete colors and scaled lengths for one card.
///
/// Built once per module by taking each override field over its theme
/// fallback. A gradient override replaces the fill entirely.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ResolvedStyle {
    pub fill: Paint,
    pub outline: Color,
    pub radius: f32,
    pub padding: f32,
    pub text: Color,
    pub accent: Color,
    pub muted: Color,
}

impl ResolvedStyle {
    pub fn resolve(style: &StyleOverride, theme: &Theme, scale: f32) -> Self {
        let palette = &theme.palette;
        let fill = match style.bg_gradient {
            Some(g) => Paint::LinearGradient(g),
            None => Paint::Solid(style.bg_color.unwrap_or(palette.card)),
        };
        Self {
            fill,
            outline: palette.card_border,
            radius: scaled(style.radius.unwrap_or(theme.tokens.radius), scale),
            padding: scaled(style.padding.unwrap_or(theme.tokens.card_padding), scale),
            text: style.text_color.unwrap_or(palette.text),
            accent: style.accent_color.unwrap_or(palette.primary),
            muted: palette.muted,
        }
    }
}

/// Unscaled length to whole device pixels, never negative.
///
/// The epsilon absorbs f32 error for decimal scales (`20 × 1.3` is 26, not 25).
#[inline]
pub(crate) fn scaled(v: f32, scale: f32) -> f32 {
    (v * scale + 1e-3).floor().max(0.0)
}
