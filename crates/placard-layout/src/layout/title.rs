use placard_engine::coords::Rect;
use placard_engine::raster::Canvas;
use placard_engine::text::{wrap_text, Font};

use super::{paint_lines, Block, LayoutCtx};
use crate::model::TitleModule;
use crate::style::ResolvedStyle;

const TITLE_SIZE: f32 = 42.0;
const SUBTITLE_SIZE: f32 = 20.0;
const TITLE_LEADING: f32 = 10.0;
const SUBTITLE_LEADING: f32 = 6.0;
const SUBTITLE_GAP: f32 = 8.0;

struct TitleLayout {
    title_font: Font,
    sub_font: Font,
    title: Vec<String>,
    subtitle: Vec<String>,
    title_lh: f32,
    subtitle_lh: f32,
    gap: f32,
}

impl TitleLayout {
    fn new(m: &TitleModule, inner_width: f32, ctx: &LayoutCtx) -> Self {
        let title_font = ctx.font(TITLE_SIZE, true);
        let sub_font = ctx.font(SUBTITLE_SIZE, false);
        Self {
            title: wrap_text(&m.title, &title_font, inner_width),
            subtitle: wrap_text(&m.subtitle, &sub_font, inner_width),
            title_lh: title_font.size() + ctx.px(TITLE_LEADING),
            subtitle_lh: sub_font.size() + ctx.px(SUBTITLE_LEADING),
            gap: ctx.px(SUBTITLE_GAP),
            title_font,
            sub_font,
        }
    }

    fn height(&self) -> f32 {
        let gap = if self.subtitle.is_empty() { 0.0 } else { self.gap };
        self.title.len() as f32 * self.title_lh + gap + self.subtitle.len() as f32 * self.subtitle_lh
    }
}

impl Block for TitleModule {
    fn content_height(&self, _style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32 {
        TitleLayout::new(self, inner_width, ctx).height()
    }

    fn paint(&self, canvas: &mut Canvas, style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx) {
        let l = TitleLayout::new(self, inner.width(), ctx);
        let mut y = paint_lines(canvas, &l.title, &l.title_font, style.text, inner, inner.y(), l.title_lh, self.align);
        if !l.subtitle.is_empty() {
            y += l.gap;
            paint_lines(canvas, &l.subtitle, &l.sub_font, style.muted, inner, y, l.subtitle_lh, self.align);
        }
    }
}
