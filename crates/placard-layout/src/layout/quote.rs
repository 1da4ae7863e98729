use placard_engine::coords::{Rect, Vec2};
use placard_engine::raster::Canvas;
use placard_engine::text::{wrap_text, Font};

use super::{paint_lines, Block, LayoutCtx};
use crate::model::{Align, QuoteModule};
use crate::style::ResolvedStyle;

const QUOTE_SIZE: f32 = 22.0;
const AUTHOR_SIZE: f32 = 16.0;
const QUOTE_LEADING: f32 = 8.0;
const AUTHOR_GAP: f32 = 6.0;

struct QuoteLayout {
    quote_font: Font,
    author_font: Font,
    lines: Vec<String>,
    line_h: f32,
    /// Gap plus author line; zero without an author.
    author_h: f32,
    gap: f32,
}

impl QuoteLayout {
    fn new(m: &QuoteModule, inner_width: f32, ctx: &LayoutCtx) -> Self {
        let quote_font = ctx.font(QUOTE_SIZE, false);
        let author_font = ctx.font(AUTHOR_SIZE, false);
        let gap = ctx.px(AUTHOR_GAP);
        Self {
            lines: wrap_text(&m.text, &quote_font, inner_width),
            line_h: quote_font.size() + ctx.px(QUOTE_LEADING),
            author_h: if m.author.is_empty() { 0.0 } else { gap + author_font.size() },
            gap,
            quote_font,
            author_font,
        }
    }

    fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_h + self.author_h
    }
}

impl QuoteModule {
    /// Attribution line as painted.
    pub fn attribution(&self) -> Option<String> {
        if self.author.is_empty() { None } else { Some(format!("— {}", self.author)) }
    }
}

impl Block for QuoteModule {
    fn content_height(&self, _style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32 {
        QuoteLayout::new(self, inner_width, ctx).height()
    }

    fn paint(&self, canvas: &mut Canvas, style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx) {
        let l = QuoteLayout::new(self, inner.width(), ctx);
        let y = paint_lines(canvas, &l.lines, &l.quote_font, style.text, inner, inner.y(), l.line_h, Align::Left);
        if let Some(author) = self.attribution() {
            let at = Vec2::new(inner.x(), y + l.gap);
            canvas.draw_text(&author, &l.author_font, at, style.muted, None);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::assets::ImageCache;

    #[test]
    fn quote_with_author() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let m = QuoteModule::default();
        // one line of 22 + 8, gap 6, author 16
        assert_eq!(m.content_height(&style(1.0), 600.0, &ctx), 30.0 + 6.0 + 16.0);
    }

    #[test]
    fn empty_author_reserves_nothing() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let m = QuoteModule { text: "日日精进".into(), author: String::new() };
        assert_eq!(m.content_height(&style(1.0), 600.0, &ctx), 30.0);
        assert_eq!(m.attribution(), None);
    }

    #[test]
    fn attribution_has_dash_prefix() {
        let m = QuoteModule { text: String::new(), author: "佚名".into() };
        assert_eq!(m.attribution().as_deref(), Some("— 佚名"));
    }

    #[test]
    fn long_quote_wraps() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let m = QuoteModule { text: "日日精进久久为功".into(), author: String::new() };
        // 22px cells in 100px: four per line
        assert_eq!(m.content_height(&style(1.0), 100.0, &ctx), 2.0 * 30.0);
    }
}
