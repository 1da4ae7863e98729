use std::io::Cursor;
use std::path::Path;

use image::imageops::{self, FilterType};
use image::{ImageFormat, Rgba, RgbaImage};

use crate::coords::{PixelRect, Rect, Vec2};
use crate::paint::{Color, Paint};
use crate::text::Font;

use super::fill::{clip, fill_paint};
use super::mask::RoundedMask;

/// Owned RGBA raster the poster is painted into.
///
/// All drawing clips silently to the canvas bounds; degenerate rectangles
/// are no-ops.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    pixels: RgbaImage,
}

impl Canvas {
    /// A `width × height` canvas filled with `background`.
    ///
    /// Zero dimensions are bumped to 1 so the result can always be encoded.
    pub fn new(width: u32, height: u32, background: &Paint) -> Self {
        let mut pixels = RgbaImage::new(width.max(1), height.max(1));
        let all = PixelRect { x: 0, y: 0, width: pixels.width() as i64, height: pixels.height() as i64 };
        fill_paint(&mut pixels, all, background);
        Self { pixels }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width() as f32, self.height() as f32)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        self.pixels.get_pixel_checked(x, y).map(|p| Color::from_rgba(p.0))
    }

    #[inline]
    pub fn image(&self) -> &RgbaImage {
        &self.pixels
    }

    // ── fills ─────────────────────────────────────────────────────────────

    /// Overwrites `rect` with `paint` (no blending).
    pub fn fill(&mut self, rect: Rect, paint: &Paint) {
        fill_paint(&mut self.pixels, rect.to_pixels(), paint);
    }

    /// Card background: `paint` clipped to a rounded rectangle, then an
    /// optional 1px outline along the shape's edge.
    ///
    /// Only the part of `rect` that lands on the canvas is rendered. The
    /// fill goes through a scratch buffer covering that visible window and
    /// is composited through the rounded mask; gradients stay parameterized
    /// over the whole card, not the window.
    pub fn draw_card(&mut self, rect: Rect, radius: f32, paint: &Paint, outline: Option<Color>) {
        let pr = rect.to_pixels();
        let Some((x0, y0, x1, y1)) = clip(&self.pixels, pr) else { return };
        let extent = |v: i64| u32::try_from(v).unwrap_or(u32::MAX);
        let mask = RoundedMask::new(extent(pr.width), extent(pr.height), radius);

        let mut scratch = RgbaImage::new(x1 - x0, y1 - y0);
        let card_in_window = PixelRect { x: pr.x - x0 as i64, y: pr.y - y0 as i64, ..pr };
        fill_paint(&mut scratch, card_in_window, paint);

        for y in y0..y1 {
            for x in x0..x1 {
                let lx = x as i64 - pr.x;
                let ly = y as i64 - pr.y;
                if !mask.contains(lx, ly) {
                    continue;
                }
                let dst = Color::from_rgba(self.pixels.get_pixel(x, y).0);
                let src = Color::from_rgba(scratch.get_pixel(x - x0, y - y0).0);
                let mut out = src.blend_over(dst, 255);
                if let Some(edge) = outline {
                    if mask.is_outline(lx, ly) {
                        out = edge.blend_over(out, 255);
                    }
                }
                self.pixels.put_pixel(x, y, Rgba(out.to_rgba()));
            }
        }
    }

    // ── text ──────────────────────────────────────────────────────────────

    /// Paints one line of text with its line box's top-left at `origin`.
    ///
    /// Nothing is wrapped here; callers pass lines from `wrap_text`.
    /// `clip` restricts painting further than the canvas bounds.
    pub fn draw_text(&mut self, text: &str, font: &Font, origin: Vec2, color: Color, clip_to: Option<Rect>) {
        let area = match clip_to {
            Some(c) if c.is_empty() => return,
            Some(c) => match c.intersect(self.bounds()) {
                Some(a) => a,
                None => return,
            },
            None => self.bounds(),
        }
        .to_pixels();
        if area.is_empty() {
            return;
        }
        let (ax1, ay1) = (area.x + area.width, area.y + area.height);

        let baseline = (origin.y + font.ascent()).floor() as i64;
        let mut pen = origin.x;
        for ch in text.chars() {
            if let Some(glyph) = font.rasterize(ch) {
                let gx = pen.floor() as i64 + glyph.left as i64;
                let gy = baseline + glyph.top as i64;
                for (i, &coverage) in glyph.coverage.iter().enumerate() {
                    if coverage == 0 {
                        continue;
                    }
                    let x = gx + (i % glyph.width) as i64;
                    let y = gy + (i / glyph.width) as i64;
                    if x < area.x || y < area.y || x >= ax1 || y >= ay1 {
                        continue;
                    }
                    let (x, y) = (x as u32, y as u32);
                    let dst = Color::from_rgba(self.pixels.get_pixel(x, y).0);
                    self.pixels.put_pixel(x, y, Rgba(color.blend_over(dst, coverage).to_rgba()));
                }
            }
            pen += font.advance(ch);
        }
    }

    // ── images ────────────────────────────────────────────────────────────

    /// Alpha-composites `image` with its top-left at `origin`.
    pub fn draw_image(&mut self, image: &RgbaImage, origin: Vec2) {
        imageops::overlay(&mut self.pixels, image, origin.x.floor() as i64, origin.y.floor() as i64);
    }

    // ── export ────────────────────────────────────────────────────────────

    /// Lossless PNG bytes of the canvas, channels written unchanged.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Vec::new();
        self.pixels.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), image::ImageError> {
        self.pixels.save_with_format(path, ImageFormat::Png)
    }

    /// Downscaled copy `width` pixels wide, aspect ratio preserved.
    pub fn resized_to_width(&self, width: u32) -> Canvas {
        let width = width.max(1);
        let ratio = width as f32 / self.width() as f32;
        let height = ((self.height() as f32 * ratio) as u32).max(1);
        Canvas { pixels: imageops::resize(&self.pixels, width, height, FilterType::Triangle) }
    }
}
