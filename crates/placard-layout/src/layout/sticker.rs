use image::imageops::{self, FilterType};
use placard_engine::coords::{Rect, Vec2};
use placard_engine::raster::Canvas;

use super::{Block, LayoutCtx};
use crate::model::{Fit, ImageModule};
use crate::style::ResolvedStyle;

/// Placement of a source image inside a reserved box.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FitPlan {
    /// Size the source is resampled to.
    pub scaled: (u32, u32),
    /// Visible window of the scaled image as `(x, y, w, h)`.
    pub crop: (u32, u32, u32, u32),
    /// Top-left of the visible window relative to the box.
    pub offset: (u32, u32),
}

/// Sizes a `src` image into a `bounds` box.
///
/// Both policies start from the box height. `Contain` then shrinks to the
/// box width if needed; `Cover` grows to the box width if it falls short
/// and crops whatever still overflows around the center. Aspect ratio is
/// always kept and the visible part is centered in the box.
pub fn fit_image(src: (u32, u32), bounds: (u32, u32), fit: Fit) -> Option<FitPlan> {
    let (iw, ih) = src;
    let (bw, bh) = bounds;
    if iw == 0 || ih == 0 || bw == 0 || bh == 0 {
        return None;
    }
    let (iw_f, ih_f) = (iw as f64, ih as f64);
    let by_height = ((iw_f * bh as f64 / ih_f).floor() as u32, bh);
    let by_width = (bw, (ih_f * bw as f64 / iw_f).floor() as u32);

    let (sw, sh) = match fit {
        Fit::Contain if by_height.0 > bw => by_width,
        Fit::Cover if by_height.0 < bw => by_width,
        _ => by_height,
    };
    let (sw, sh) = (sw.max(1), sh.max(1));

    let (vw, vh) = (sw.min(bw), sh.min(bh));
    Some(FitPlan {
        scaled: (sw, sh),
        crop: ((sw - vw) / 2, (sh - vh) / 2, vw, vh),
        offset: ((bw - vw) / 2, (bh - vh) / 2),
    })
}

impl Block for ImageModule {
    fn content_height(&self, _style: &ResolvedStyle, _inner_width: f32, ctx: &LayoutCtx) -> f32 {
        ctx.px(self.height as f32)
    }

    fn paint(&self, canvas: &mut Canvas, _style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx) {
        // a missing image leaves the card empty
        let Some(source) = ctx.images.get(&self.path) else { return };
        let bounds = (inner.width().max(0.0) as u32, inner.height().max(0.0) as u32);
        let Some(plan) = fit_image(source.dimensions(), bounds, self.fit) else { return };

        // only the part of the placement that lands on the canvas is resampled
        let ax = (inner.x() + plan.offset.0 as f32).floor() as i64;
        let ay = (inner.y() + plan.offset.1 as f32).floor() as i64;
        let (cx, cy, cw, ch) = plan.crop;
        let Some((dx, dy, vw, vh)) = visible_window(ax, ay, cw, ch, canvas.width(), canvas.height()) else {
            return;
        };

        // crop in source space, then resample only the visible window
        let (iw, ih) = source.dimensions();
        let (sw, sh) = plan.scaled;
        let (kx, ky) = (iw as f64 / sw as f64, ih as f64 / sh as f64);
        let src_x = (((cx + dx) as f64 * kx).floor() as u32).min(iw - 1);
        let src_y = (((cy + dy) as f64 * ky).floor() as u32).min(ih - 1);
        let src_w = ((vw as f64 * kx).round() as u32).clamp(1, iw - src_x);
        let src_h = ((vh as f64 * ky).round() as u32).clamp(1, ih - src_y);
        let window = imageops::crop_imm(source.as_ref(), src_x, src_y, src_w, src_h).to_image();
        let visible = imageops::resize(&window, vw, vh, FilterType::Lanczos3);

        canvas.draw_image(&visible, Vec2::new((ax + dx as i64) as f32, (ay + dy as i64) as f32));
    }
}

/// Part of a `w × h` placement at `(x, y)` that falls inside a
/// `canvas_w × canvas_h` canvas, as `(dx, dy, w, h)` relative to the
/// placement.
fn visible_window(x: i64, y: i64, w: u32, h: u32, canvas_w: u32, canvas_h: u32) -> Option<(u32, u32, u32, u32)> {
    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + w as i64).min(canvas_w as i64);
    let y1 = (y + h as i64).min(canvas_h as i64);
    if x0 >= x1 || y0 >= y1 {
        return None;
    }
    Some(((x0 - x) as u32, (y0 - y) as u32, (x1 - x0) as u32, (y1 - y0) as u32))
}
