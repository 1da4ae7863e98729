use placard_engine::coords::{Rect, Vec2};
use placard_engine::raster::Canvas;
use placard_engine::text::Font;

use super::{Block, LayoutCtx};
use crate::model::StatsModule;
use crate::style::ResolvedStyle;

const TITLE_SIZE: f32 = 22.0;
const LABEL_SIZE: f32 = 14.0;
const VALUE_SIZE: f32 = 24.0;
const HEADER_GAP: f32 = 10.0;
const CELL_GAP: f32 = 10.0;
const LABEL_OFFSET: f32 = 2.0;
const COL_GAP: f32 = 16.0;
const ROW_GAP: f32 = 12.0;

/// Row-major grid position `(row, col)` of metric `index`.
#[inline]
pub fn grid_cell(index: usize, columns: usize) -> (usize, usize) {
    let columns = columns.max(1);
    (index / columns, index % columns)
}

/// Rows needed for `count` metrics.
#[inline]
pub fn row_count(count: usize, columns: usize) -> usize {
    count.div_ceil(columns.max(1))
}

struct StatsLayout {
    title_font: Font,
    label_font: Font,
    value_font: Font,
    columns: usize,
    rows: usize,
    header_h: f32,
    cell_w: f32,
    cell_h: f32,
    col_gap: f32,
    row_gap: f32,
}

impl StatsLayout {
    fn new(m: &StatsModule, inner_width: f32, ctx: &LayoutCtx) -> Self {
        let title_font = ctx.font(TITLE_SIZE, true);
        let label_font = ctx.font(LABEL_SIZE, false);
        let value_font = ctx.font(VALUE_SIZE, true);
        let columns = m.column_count();
        let col_gap = ctx.px(COL_GAP);
        Self {
            columns,
            rows: row_count(m.metrics.len(), columns),
            header_h: if m.title.is_empty() { 0.0 } else { title_font.size() + ctx.px(HEADER_GAP) },
            cell_w: ((inner_width - (columns - 1) as f32 * col_gap) / columns as f32).floor(),
            cell_h: value_font.size() + label_font.size() + ctx.px(CELL_GAP),
            col_gap,
            row_gap: ctx.px(ROW_GAP),
            title_font,
            label_font,
            value_font,
        }
    }

    fn height(&self) -> f32 {
        let gaps = self.rows.saturating_sub(1) as f32 * self.row_gap;
        self.header_h + self.rows as f32 * self.cell_h + gaps
    }

    fn cell(&self, index: usize, grid_top: f32, inner: Rect) -> Rect {
        let (row, col) = grid_cell(index, self.columns);
        Rect::new(
            inner.x() + col as f32 * (self.cell_w + self.col_gap),
            grid_top + row as f32 * (self.cell_h + self.row_gap),
            self.cell_w,
            self.cell_h,
        )
    }
}

impl Block for StatsModule {
    fn content_height(&self, _style: &ResolvedStyle, inner_width: f32, ctx: &LayoutCtx) -> f32 {
        StatsLayout::new(self, inner_width, ctx).height()
    }

    fn paint(&self, canvas: &mut Canvas, style: &ResolvedStyle, inner: Rect, ctx: &LayoutCtx) {
        let l = StatsLayout::new(self, inner.width(), ctx);
        let mut top = inner.y();
        if l.header_h > 0.0 {
            let header = Rect::new(inner.x(), top, inner.width(), l.header_h);
            canvas.draw_text(&self.title, &l.title_font, header.origin, style.text, Some(header));
            top += l.header_h;
        }

        let label_dy = l.value_font.size() + ctx.px(LABEL_OFFSET);
        for (i, metric) in self.metrics.iter().enumerate() {
            // values and labels never wrap; overflow is clipped to the cell
            let cell = l.cell(i, top, inner);
            canvas.draw_text(&metric.value, &l.value_font, cell.origin, style.accent, Some(cell));
            let label_at = Vec2::new(cell.x(), cell.y() + label_dy);
            canvas.draw_text(&metric.label, &l.label_font, label_at, style.muted, Some(cell));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::testing::*;
    use super::*;
    use crate::assets::ImageCache;
    use crate::model::Metric;

    fn stats(n: usize, columns: i64) -> StatsModule {
        StatsModule {
            title: "今日数据".into(),
            metrics: (0..n).map(|i| Metric::new(format!("label {i}"), format!("{i}"))).collect(),
            columns,
        }
    }

    // ── grid math ─────────────────────────────────────────────────────────

    #[test]
    fn rows_are_ceiling() {
        assert_eq!(row_count(5, 2), 3);
        assert_eq!(row_count(4, 2), 2);
        assert_eq!(row_count(0, 3), 0);
        assert_eq!(row_count(7, 0), 7);
    }

    #[test]
    fn cells_are_row_major() {
        for n in 0..20usize {
            for c in 1..=4usize {
                for i in 0..n {
                    let (r, col) = grid_cell(i, c);
                    assert_eq!(r * c + col, i);
                    assert!(r < row_count(n, c));
                }
            }
        }
        assert_eq!(grid_cell(4, 2), (2, 0));
    }

    // ── layout ────────────────────────────────────────────────────────────

    #[test]
    fn height_counts_rows_and_gaps() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        // header 32, cell 24 + 14 + 10 = 48, gap 12
        let h = stats(5, 2).content_height(&style(1.0), 600.0, &ctx);
        assert_eq!(h, 32.0 + 3.0 * 48.0 + 2.0 * 12.0);
    }

    #[test]
    fn no_metrics_no_negative_gap() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        assert_eq!(stats(0, 2).content_height(&style(1.0), 600.0, &ctx), 32.0);
    }

    #[test]
    fn columns_are_clamped_in_layout() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let wide = stats(8, 40).content_height(&style(1.0), 600.0, &ctx);
        let four = stats(8, 4).content_height(&style(1.0), 600.0, &ctx);
        assert_eq!(wide, four);
        let none = stats(3, 0).content_height(&style(1.0), 600.0, &ctx);
        let one = stats(3, 1).content_height(&style(1.0), 600.0, &ctx);
        assert_eq!(none, one);
    }

    #[test]
    fn cell_rects_tile_the_width() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let inner = Rect::new(10.0, 0.0, 616.0, 500.0);
        let l = StatsLayout::new(&stats(5, 2), inner.width(), &ctx);
        assert_eq!(l.cell_w, 300.0);
        let last = l.cell(4, 100.0, inner);
        assert_eq!((last.x(), last.y()), (10.0, 100.0 + 2.0 * 60.0));
        let second = l.cell(1, 100.0, inner);
        assert_eq!(second.x(), 10.0 + 316.0);
    }

    #[test]
    fn long_values_stay_inside_their_cell() {
        let images = ImageCache::new();
        let ctx = LayoutCtx::new(&FONTS, &images, 1.0);
        let m = StatsModule {
            title: String::new(),
            metrics: vec![Metric::new("l", "999999999999999999999999"), Metric::new("r", "")],
            columns: 2,
        };
        let mut c = canvas();
        let before = c.clone();
        let inner = Rect::new(0.0, 0.0, 216.0, 48.0);
        m.paint(&mut c, &style(1.0), inner, &ctx);
        // right cell starts at 100 + 16; only the empty metric's label may paint there
        for x in 100..216 {
            for y in 0..24 {
                assert_eq!(c.pixel(x, y), before.pixel(x, y), "({x},{y})");
            }
        }
    }
}
