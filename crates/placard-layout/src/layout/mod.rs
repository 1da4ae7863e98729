//! Per-kind layout rules.
//!
//! Every module kind implements [`Block`]: a pure height computation and a
//! paint routine that fills the card's inner rectangle. [`measure`] and
//! [`draw`] are the only entry points and dispatch with a single match.

mod quote;
mod rich;
mod stats;
mod sticker;
mod summary;
mod title;

use placard_engine::coords::{Rect, Vec2};
use placard_engine::paint::Color;
use placard_engine::raster::Canvas;
use placard_engine::text::{wrap_text, Font, FontProvider};

use crate::assets::ImageCache;
use crate::model::{Align, Module, ModuleKind};
use crate::style::{scaled, ResolvedStyle};

pub use sticker::{fit_image, FitPlan};
pub use stats::{grid_cell, row_count};

/// Shared services and the export scale for one render.
pub struct LayoutCtx<'a> {
    pub fonts: &'a dyn FontProvider,
    pub images: &'a ImageCache,
    pub scale: f32,
}

impl<'a> LayoutCtx<'a> {
    pub fn new(fonts: &'a dyn FontProvider, images: &'a ImageCache, scale: f32) -> Self {
        Self { fonts, images, scale }
    }

    /// Unscaled length in device pixels.
    #[inline]
    pub fn px(&self, v: f32) -> f32 {
        scaled(v, self.scale)
    }

    /// Font at an unscaled point size.
    #[inline]
    pub fn font(&self, size: f32, bold: bool) -> Font {
        self.fonts.font(self.px(size), bold)
    }
}

// ── Block trait ───────────────────────────────────────────────────────────

/// Layout rule for one module kind.
pub trait Block {
    /// Height of the content inside the card padding.
    ///
    /// Must be deterministic: equal inputs give equal heights.
    fn content_height(&self, style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32;

    /// Paints content into `inner`, whose height is `content_height`.
    fn paint(&self, canvas: &mut Canvas, style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx);

    /// Full card height.
    fn measure(&self, style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32 {
        style.padding * 2.0 + self.content_height(style, inner_width, ctx)
    }
}

/// Card with no content for unrecognized kinds.
struct Placeholder;

impl Placeholder {
    const HEIGHT: f32 = 80.0;
}

impl Block for Placeholder {
    fn content_height(&self, _style: &ResolvedStyle, _inner_width: f32, _ctx: &LayoutCtx) -> f32 {
        0.0
    }

    fn paint(&self, _canvas: &mut Canvas, _style: &ResolvedStyle, _inner: Rect, _ctx: &LayoutCtx) {}

    fn measure(&self, _style: &ResolvedStyle, _inner_width: f32, ctx: &LayoutCtx) -> f32 {
        ctx.px(Self::HEIGHT)
    }
}

fn block(kind: &ModuleKind) -> &dyn Block {
    match kind {
        ModuleKind::Title(m) => m,
        ModuleKind::Summary(m) => m,
        ModuleKind::Stats(m) => m,
        ModuleKind::Quote(m) => m,
        ModuleKind::Rich(m) => m,
        ModuleKind::Image(m) => m,
        ModuleKind::Unknown(_) => &Placeholder,
    }
}

/// Card height for `module` in a column `width` pixels wide.
pub fn measure(module: &Module, style: &ResolvedStyle, width: f32, ctx: &LayoutCtx) -> f32 {
    block(&module.kind).measure(style, inner_width(style, width), ctx)
}

/// Paints `module`'s card at the top of `area` and returns its height.
///
/// `area`'s bottom is only an upper bound; the card takes exactly the
/// height [`measure`] reports.
pub fn draw(canvas: &mut Canvas, module: &Module, style: &ResolvedStyle, area: Rect, ctx: &LayoutCtx) -> f32 {
    let rule = block(&module.kind);
    let inner_w = inner_width(style, area.width());
    let height = rule.measure(style, inner_w, ctx);
    let card = area.with_height(height);

    canvas.draw_card(card, style.radius, &style.fill, Some(style.outline));

    let inner = Rect::new(
        card.x() + style.padding,
        card.y() + style.padding,
        inner_w,
        (height - 2.0 * style.padding).max(0.0),
    );
    rule.paint(canvas, style, inner, ctx);
    height
}

#[inline]
fn inner_width(style: &ResolvedStyle, width: f32) -> f32 {
    width - 2.0 * style.padding
}

// ── shared painting helpers ───────────────────────────────────────────────

/// Left edge of a line `line_width` wide placed in `inner` by `align`.
pub(crate) fn aligned_x(inner: Rect, line_width: f32, align: Align) -> f32 {
    match align {
        Align::Left => inner.x(),
        Align::Center => inner.x() + ((inner.width() - line_width) / 2.0).floor(),
    }
}

/// Paints `lines` top-down from `y`, one `line_height` apart. Returns the
/// cursor after the last line.
#[allow(clippy::too_many_arguments)]
pub(crate) fn paint_lines(
    canvas: &mut Canvas,
    lines: &[String],
    font: &Font,
    color: Color,
    inner: Rect,
    y: f32,
    line_height: f32,
    align: Align,
) -> f32 {
    let mut cy = y;
    for line in lines {
        let x = aligned_x(inner, font.text_width(line), align);
        canvas.draw_text(line, font, Vec2::new(x, cy), color, None);
        cy += line_height;
    }
    cy
}

/// Wraps an optional string; `None` and `""` give no lines.
pub(crate) fn wrap_opt(text: Option<&str>, font: &Font, max_width: f32) -> Vec<String> {
    match text {
        Some(t) => wrap_text(t, font, max_width),
        None => Vec::new(),
    }
}


#[cfg(test)]
mod tests {
    use super::testing::*;
    use super::*;
    use crate::model::{
        Fit, ImageModule, Metric, QuoteModule, RichModule, StatsModule, SummaryModule, TitleModule,
    };
    use crate::theme::Theme;
    use image::{Rgba, RgbaImage};

    // ── dispatch ──────────────────────────────────────────────────────────

    fn every_kind() -> Vec<Module> {
        vec![
            Module::title(TitleModule::default()),
            Module::summary(SummaryModule {
                items: vec!["第一条很长很长的总结内容".into(), String::new(), "short".into()],
                ..SummaryModule::default()
            }),
            Module::stats(StatsModule {
                metrics: (0..5).map(|i| Metric::new(format!("m{i}"), "1")).collect(),
                ..StatsModule::default()
            }),
            Module::quote(QuoteModule::default()),
            Module::rich(RichModule {
                title: Some("标题".into()),
                body: Some("mixed 中英文 body text".into()),
                items: vec!["one".into(), "二".into()],
                image_path: Some("mem://photo".into()),
                align: Align::Center,
            }),
            Module::image(ImageModule { path: "mem://photo".into(), fit: Fit::Cover, height: 120 }),
            Module::image(ImageModule { path: "missing.png".into(), fit: Fit::Contain, height: 80 }),
            Module::new(ModuleKind::Unknown("chart".into())),
        ]
    }

    #[test]
    fn draw_returns_measured_height() {
        let images = ImageCache::new();
        images.insert("mem://photo", RgbaImage::from_pixel(40, 30, Rgba([200, 10, 10, 255])));
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let st = style(1.0);
        for module in every_kind() {
            for width in [-50.0, 0.0, 37.0, 300.0, 500.0] {
                let h = measure(&module, &st, width, &ctx);
                assert_eq!(h, measure(&module, &st, width, &ctx));
                let mut c = canvas();
                let drawn = draw(&mut c, &module, &st, Rect::new(50.0, 50.0, width, 800.0), &ctx);
                assert_eq!(drawn, h, "{} at width {width}", module.kind.type_name());
            }
        }
    }

    #[test]
    fn unknown_kind_is_fixed_height_card() {
        let images = ImageCache::new();
        let st = style(1.0);
        let module = Module::new(ModuleKind::Unknown("chart".into()));
        assert_eq!(measure(&module, &st, 500.0, &LayoutCtx::new(&FONTS, &images, 1.0)), 80.0);
        assert_eq!(measure(&module, &st, 500.0, &LayoutCtx::new(&FONTS, &images, 2.0)), 160.0);

        let mut c = canvas();
        draw(&mut c, &module, &st, Rect::new(50.0, 50.0, 500.0, 800.0), &LayoutCtx::new(&FONTS, &images, 1.0));
        assert_eq!(c.pixel(300, 90), Some(Theme::default().palette.card));
        assert_eq!(c.pixel(300, 140), Some(Theme::default().palette.background));
    }

    // ── helpers ───────────────────────────────────────────────────────────

    #[test]
    fn center_alignment_floors() {
        let inner = Rect::new(10.0, 0.0, 101.0, 10.0);
        assert_eq!(aligned_x(inner, 50.0, Align::Center), 35.0);
        assert_eq!(aligned_x(inner, 50.0, Align::Left), 10.0);
    }

    #[test]
    fn missing_text_wraps_to_nothing() {
        let font = Font::builtin(18.0, false);
        assert!(wrap_opt(None, &font, 100.0).is_empty());
        assert!(wrap_opt(Some(""), &font, 100.0).is_empty());
    }
}
