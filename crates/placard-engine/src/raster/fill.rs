use image::{Rgba, RgbaImage};

use crate::coords::PixelRect;
use crate::paint::{Color, GradientAxis, LinearGradient, Paint};

/// Paints `gradient` into `rect` of `buffer`, one color per column (horizontal)
/// or per row (vertical). Pixels outside the buffer are skipped.
///
/// `t` runs over the rect's own extent, so a clipped rect still shows the
/// colors it would have had unclipped.
pub fn fill_gradient(buffer: &mut RgbaImage, rect: PixelRect, gradient: &LinearGradient) {
    if rect.is_empty() {
        return;
    }
    let Some((x0, y0, x1, y1)) = clip(buffer, rect) else { return };

    match gradient.axis() {
        GradientAxis::Horizontal => {
            for x in x0..x1 {
                let step = (x as i64 - rect.x) as u32;
                let px = Rgba(gradient.color_at_step(step, rect.width as u32).to_rgba());
                for y in y0..y1 {
                    buffer.put_pixel(x, y, px);
                }
            }
        }
        GradientAxis::Vertical => {
            for y in y0..y1 {
                let step = (y as i64 - rect.y) as u32;
                let px = Rgba(gradient.color_at_step(step, rect.height as u32).to_rgba());
                for x in x0..x1 {
                    buffer.put_pixel(x, y, px);
                }
            }
        }
    }
}

/// Overwrites `rect` with a solid color.
pub fn fill_solid(buffer: &mut RgbaImage, rect: PixelRect, color: Color) {
    let Some((x0, y0, x1, y1)) = clip(buffer, rect) else { return };
    let px = Rgba(color.to_rgba());
    for y in y0..y1 {
        for x in x0..x1 {
            buffer.put_pixel(x, y, px);
        }
    }
}

/// Overwrites `rect` with `paint`.
pub fn fill_paint(buffer: &mut RgbaImage, rect: PixelRect, paint: &Paint) {
    match paint {
        Paint::Solid(c) => fill_solid(buffer, rect, *c),
        Paint::LinearGradient(g) => fill_gradient(buffer, rect, g),
    }
}

/// Intersects `rect` with the buffer bounds: `(x0, y0, x1, y1)`, exclusive max.
pub(crate) fn clip(buffer: &RgbaImage, rect: PixelRect) -> Option<(u32, u32, u32, u32)> {
    if rect.is_empty() {
        return None;
    }
    let x0 = rect.x.max(0);
    let y0 = rect.y.max(0);
    let x1 = (rect.x + rect.width).min(buffer.width() as i64);
    let y1 = (rect.y + rect.height).min(buffer.height() as i64);
    if x0 >= x1 || y0 >= y1 {
        None
    } else {
        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn px(img: &RgbaImage, x: u32, y: u32) -> Color {
        Color::from_rgba(img.get_pixel(x, y).0)
    }

    fn whole(w: u32, h: u32) -> PixelRect {
        PixelRect { x: 0, y: 0, width: w as i64, height: h as i64 }
    }

    #[test]
    fn horizontal_gradient_endpoints() {
        let mut img = RgbaImage::new(10, 3);
        let g = LinearGradient::new(Color::rgb(0, 0, 0), Color::rgb(255, 255, 255), 0.0);
        fill_gradient(&mut img, whole(10, 3), &g);
        assert_eq!(px(&img, 0, 1), g.start);
        assert_eq!(px(&img, 9, 1), g.end);
        // Columns are constant.
        assert_eq!(px(&img, 4, 0), px(&img, 4, 2));
    }

    #[test]
    fn vertical_gradient_endpoints() {
        let mut img = RgbaImage::new(3, 8);
        let g = LinearGradient::new(Color::rgb(10, 20, 30), Color::rgb(200, 100, 50), 90.0);
        fill_gradient(&mut img, whole(3, 8), &g);
        assert_eq!(px(&img, 1, 0), g.start);
        assert_eq!(px(&img, 1, 7), g.end);
        assert_eq!(px(&img, 0, 3), px(&img, 2, 3));
    }

    #[test]
    fn gradient_is_monotonic_along_axis() {
        let mut img = RgbaImage::new(50, 1);
        let g = LinearGradient::new(Color::rgb(0, 0, 0), Color::rgb(255, 0, 0), 180.0);
        fill_gradient(&mut img, whole(50, 1), &g);
        let reds: Vec<u8> = (0..50).map(|x| px(&img, x, 0).r).collect();
        assert!(reds.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn one_pixel_extent_is_start_color() {
        let mut img = RgbaImage::new(1, 1);
        let g = LinearGradient::new(Color::rgb(7, 8, 9), Color::rgb(200, 200, 200), 0.0);
        fill_gradient(&mut img, whole(1, 1), &g);
        assert_eq!(px(&img, 0, 0), g.start);
    }

    #[test]
    fn clipped_rect_keeps_its_own_parameterization() {
        let mut img = RgbaImage::new(5, 1);
        let g = LinearGradient::new(Color::rgb(0, 0, 0), Color::rgb(100, 100, 100), 0.0);
        // Rect spans x = -5..5 (11 px wide, so step 10 is the end); only 0..5 is visible.
        fill_gradient(&mut img, PixelRect { x: -5, y: 0, width: 11, height: 1 }, &g);
        assert_eq!(px(&img, 0, 0), g.color_at_step(5, 11));
    }

    #[test]
    fn degenerate_rect_is_noop() {
        let mut img = RgbaImage::from_pixel(2, 2, Rgba([1, 2, 3, 255]));
        fill_solid(&mut img, PixelRect { x: 0, y: 0, width: 0, height: 2 }, Color::white());
        fill_solid(&mut img, PixelRect { x: 5, y: 5, width: 2, height: 2 }, Color::white());
        assert_eq!(px(&img, 0, 0), Color::rgb(1, 2, 3));
    }
}
