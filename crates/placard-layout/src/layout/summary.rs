use placard_engine::coords::{Rect, Vec2};
use placard_engine::raster::Canvas;
use placard_engine::text::{wrap_text, Font};

use super::{Block, LayoutCtx};
use crate::model::SummaryModule;
use crate::style::ResolvedStyle;

const TITLE_SIZE: f32 = 22.0;
const BODY_SIZE: f32 = 18.0;
const BULLET_GAP: f32 = 8.0;
const LINE_GAP: f32 = 8.0;
const DEFAULT_BULLET: &str = "•";

/// Title header plus bulleted items, each wrapped beside its bullet.
struct SummaryLayout<'m> {
    title_font: Font,
    body_font: Font,
    bullet: &'m str,
    header_h: f32,
    line_h: f32,
    /// Bullet column width including its gap.
    indent: f32,
    items: Vec<Vec<String>>,
}

impl<'m> SummaryLayout<'m> {
    fn new(m: &'m SummaryModule, inner_width: f32, ctx: &LayoutCtx) -> Self {
        let title_font = ctx.font(TITLE_SIZE, true);
        let body_font = ctx.font(BODY_SIZE, false);
        let line_gap = ctx.px(LINE_GAP);
        let bullet = if m.bullet.is_empty() { DEFAULT_BULLET } else { m.bullet.as_str() };

        // one bullet width for every item
        let indent = body_font.text_width(bullet) + ctx.px(BULLET_GAP);
        let items = m
            .items
            .iter()
            .map(|item| wrap_text(item, &body_font, inner_width - indent))
            .collect();

        Self {
            header_h: if m.title.is_empty() { 0.0 } else { title_font.size() + line_gap },
            line_h: body_font.size() + line_gap,
            title_font,
            body_font,
            bullet,
            indent,
            items,
        }
    }

    fn height(&self) -> f32 {
        let lines: usize = self.items.iter().map(Vec::len).sum();
        self.header_h + lines as f32 * self.line_h
    }
}

impl Block for SummaryModule {
    fn content_height(&self, _style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32 {
        SummaryLayout::new(self, inner_width, ctx).height()
    }

    fn paint(&self, canvas: &mut Canvas, style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx) {
        let l = SummaryLayout::new(self, inner.width(), ctx);
        let mut y = inner.y();

        if l.header_h > 0.0 {
            let header = Rect::new(inner.x(), y, inner.width(), l.header_h);
            canvas.draw_text(&self.title, &l.title_font, header.origin, style.text, Some(header));
            y += l.header_h;
        }

        for lines in &l.items {
            if lines.is_empty() {
                continue;
            }
            canvas.draw_text(l.bullet, &l.body_font, Vec2::new(inner.x(), y), style.accent, None);
            for line in lines {
                canvas.draw_text(line, &l.body_font, Vec2::new(inner.x() + l.indent, y), style.text, None);
                y += l.line_h;
            }
        }
    }
}
