use std::sync::Arc;

use image::imageops::{self, FilterType};
use image::RgbaImage;
use placard_engine::coords::{Rect, Vec2};
use placard_engine::raster::Canvas;
use placard_engine::text::Font;

use super::{aligned_x, paint_lines, wrap_opt, Block, LayoutCtx};
use crate::model::RichModule;
use crate::style::ResolvedStyle;

const TITLE_SIZE: f32 = 22.0;
const BODY_SIZE: f32 = 18.0;
const LEADING: f32 = 8.0;
const SEGMENT_GAP: f32 = 12.0;
const MAX_IMAGE_HEIGHT: f32 = 240.0;

/// Width-fit size for an `iw × ih` image, capped at `max_h` tall.
///
/// Aspect ratio is kept; `None` when nothing would be visible.
pub(crate) fn rich_image_size(iw: u32, ih: u32, max_w: f32, max_h: f32) -> Option<(u32, u32)> {
    if iw == 0 || ih == 0 || max_w < 1.0 || max_h < 1.0 {
        return None;
    }
    let mut ratio = max_w / iw as f32;
    if ih as f32 * ratio > max_h {
        ratio = max_h / ih as f32;
    }
    let w = (iw as f32 * ratio).floor() as u32;
    let h = (ih as f32 * ratio).floor() as u32;
    (w > 0 && h > 0).then_some((w, h))
}

struct RichLayout {
    title_font: Font,
    body_font: Font,
    title: Vec<String>,
    body: Vec<String>,
    items: Vec<String>,
    image: Option<(Arc<RgbaImage>, u32, u32)>,
    title_lh: f32,
    body_lh: f32,
    gap: f32,
}

impl RichLayout {
    fn new(m: &RichModule, inner_width: f32, ctx: &LayoutCtx) -> Self {
        let title_font = ctx.font(TITLE_SIZE, true);
        let body_font = ctx.font(BODY_SIZE, false);
        let items = m
            .items
            .iter()
            .flat_map(|item| wrap_opt(Some(item), &body_font, inner_width))
            .collect();
        let image = m
            .image_path
            .as_deref()
            .and_then(|p| ctx.images.get(p))
            .and_then(|img| {
                let (w, h) = rich_image_size(img.width(), img.height(), inner_width, ctx.px(MAX_IMAGE_HEIGHT))?;
                Some((img, w, h))
            });
        Self {
            title: wrap_opt(m.title.as_deref(), &title_font, inner_width),
            body: wrap_opt(m.body.as_deref(), &body_font, inner_width),
            items,
            image,
            title_lh: title_font.size() + ctx.px(LEADING),
            body_lh: body_font.size() + ctx.px(LEADING),
            gap: ctx.px(SEGMENT_GAP),
            title_font,
            body_font,
        }
    }

    /// Heights of the segments that are present, in paint order.
    fn segments(&self) -> impl Iterator<Item = f32> + '_ {
        [
            self.title.len() as f32 * self.title_lh,
            self.body.len() as f32 * self.body_lh,
            self.items.len() as f32 * self.body_lh,
            self.image.as_ref().map_or(0.0, |&(_, _, h)| h as f32),
        ]
        .into_iter()
        .filter(|&h| h > 0.0)
    }

    fn height(&self) -> f32 {
        let (sum, count) = self.segments().fold((0.0, 0usize), |(s, n), h| (s + h, n + 1));
        sum + count.saturating_sub(1) as f32 * self.gap
    }
}

impl Block for RichModule {
    fn content_height(&self, _style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32 {
        RichLayout::new(self, inner_width, ctx).height()
    }

    fn paint(&self, canvas: &mut Canvas, style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx) {
        let l = RichLayout::new(self, inner.width(), ctx);
        let mut cursor = SegmentCursor { y: inner.y(), gap: l.gap, started: false };

        if !l.title.is_empty() {
            let y = cursor.begin();
            cursor.y = paint_lines(canvas, &l.title, &l.title_font, style.text, inner, y, l.title_lh, self.align);
        }
        if !l.body.is_empty() {
            let y = cursor.begin();
            cursor.y = paint_lines(canvas, &l.body, &l.body_font, style.text, inner, y, l.body_lh, self.align);
        }
        if !l.items.is_empty() {
            let y = cursor.begin();
            cursor.y = paint_lines(canvas, &l.items, &l.body_font, style.text, inner, y, l.body_lh, self.align);
        }
        if let Some((img, w, h)) = &l.image {
            let y = cursor.begin();
            let scaled = imageops::resize(img.as_ref(), *w, *h, FilterType::Triangle);
            canvas.draw_image(&scaled, Vec2::new(aligned_x(inner, *w as f32, self.align), y));
        }
    }
}

/// Vertical cursor that inserts the segment gap between present segments.
struct SegmentCursor {
    y: f32,
    gap: f32,
    started: bool,
}

impl SegmentCursor {
    fn begin(&mut self) -> f32 {
        if self.started {
            self.y += self.gap;
        }
        self.started = true;
        self.y
    }
}
