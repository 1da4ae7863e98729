//! Poster compositor: stacks module cards top to bottom.

use placard_engine::coords::Rect;
use placard_engine::paint::Paint;
use placard_engine::raster::Canvas;
use placard_engine::text::FontProvider;

use crate::assets::ImageCache;
use crate::layout::{self, LayoutCtx};
use crate::model::{CanvasConfig, Module};
use crate::style::{scaled, ResolvedStyle};
use crate::theme::Theme;

/// Where one module's card landed, in output pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Placement {
    pub index: usize,
    pub rect: Rect,
}

/// Renders module lists with a shared font provider and image cache.
///
/// Rendering is a pure function of its arguments; the only shared state
/// is the append-only caches behind `fonts` and `images`.
pub struct Renderer<'a> {
    fonts: &'a dyn FontProvider,
    images: &'a ImageCache,
}

impl<'a> Renderer<'a> {
    pub fn new(fonts: &'a dyn FontProvider, images: &'a ImageCache) -> Self {
        Self { fonts, images }
    }

    pub fn render(&self, modules: &[Module], theme: &Theme, page: &CanvasConfig, scale: f32) -> Canvas {
        self.render_placed(modules, theme, page, scale).0
    }

    /// Renders and also reports every card's rectangle.
    pub fn render_placed(
        &self,
        modules: &[Module],
        theme: &Theme,
        page: &CanvasConfig,
        scale: f32,
    ) -> (Canvas, Vec<Placement>) {
        let frame = Frame::new(theme, page, scale);
        let ctx = LayoutCtx::new(self.fonts, self.images, frame.scale);
        let mut canvas = Canvas::new(frame.width, frame.height, &background(theme, page));
        log::debug!(
            "rendering {} modules on {}x{} (scale {}, theme '{}')",
            modules.len(),
            frame.width,
            frame.height,
            frame.scale,
            theme.id
        );

        let mut placements = Vec::with_capacity(modules.len());
        let mut y = frame.pad;
        for (index, module) in modules.iter().enumerate() {
            let style = ResolvedStyle::resolve(&module.style, theme, frame.scale);
            let h = layout::draw(&mut canvas, module, &style, frame.area(y), &ctx);
            log::debug!("card {index} '{}' ({}) at y={y} h={h}", module.name, module.kind.type_name());
            placements.push(Placement { index, rect: Rect::new(frame.pad, y, frame.content_width, h) });
            y += h + frame.gap;
        }
        (canvas, placements)
    }

    /// Card rectangles without painting anything.
    pub fn plan(&self, modules: &[Module], theme: &Theme, page: &CanvasConfig, scale: f32) -> Vec<Placement> {
        let frame = Frame::new(theme, page, scale);
        let ctx = LayoutCtx::new(self.fonts, self.images, frame.scale);
        let mut y = frame.pad;
        modules
            .iter()
            .enumerate()
            .map(|(index, module)| {
                let style = ResolvedStyle::resolve(&module.style, theme, frame.scale);
                let h = layout::measure(module, &style, frame.content_width, &ctx);
                let rect = Rect::new(frame.pad, y, frame.content_width, h);
                y += h + frame.gap;
                Placement { index, rect }
            })
            .collect()
    }
}

/// Page background: canvas override gradient, then override color, then
/// the theme's own background.
pub fn background(theme: &Theme, page: &CanvasConfig) -> Paint {
    match (page.bg_gradient, page.bg_color) {
        (Some(g), _) => Paint::LinearGradient(g),
        (None, Some(c)) => Paint::Solid(c),
        (None, None) => theme.background(),
    }
}

/// Scaled page geometry shared by painting and planning.
struct Frame {
    scale: f32,
    width: u32,
    height: u32,
    pad: f32,
    gap: f32,
    content_width: f32,
}

impl Frame {
    fn new(theme: &Theme, page: &CanvasConfig, scale: f32) -> Self {
        let scale = if scale.is_finite() && scale > 0.0 {
            scale
        } else {
            log::warn!("invalid scale {scale}, using 1.0");
            1.0
        };
        let width = scaled(page.width as f32, scale) as u32;
        let pad = scaled(page.padding as f32, scale);
        Self {
            scale,
            width,
            height: scaled(page.height as f32, scale) as u32,
            pad,
            gap: scaled(theme.tokens.gap, scale),
            content_width: width as f32 - 2.0 * pad,
        }
    }

    /// Column from `y` down to the bottom padding; open-ended for cards.
    fn area(&self, y: f32) -> Rect {
        let bottom = self.height as f32 - self.pad;
        Rect::new(self.pad, y, self.content_width, (bottom - y).max(0.0))
    }
}
