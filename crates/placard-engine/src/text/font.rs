use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use unicode_width::UnicodeWidthChar;

/// Error returned by [`load_font_file`] and [`load_font_bytes`].
#[derive(Debug, Clone)]
pub struct FontLoadError {
    /// Source of the bytes, if they came from disk.
    pub path: Option<PathBuf>,
    pub reason: String,
}

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "font load error ({}): {}", p.display(), self.reason),
            None => write!(f, "font load error: {}", self.reason),
        }
    }
}

impl std::error::Error for FontLoadError {}

/// Parses a TrueType / OpenType font (first face of a collection).
pub fn load_font_bytes(bytes: &[u8]) -> Result<Arc<fontdue::Font>, FontLoadError> {
    fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
        .map(Arc::new)
        .map_err(|e| FontLoadError { path: None, reason: e.to_string() })
}

/// Reads and parses a font file.
pub fn load_font_file(path: &Path) -> Result<Arc<fontdue::Font>, FontLoadError> {
    let bytes = std::fs::read(path).map_err(|e| FontLoadError {
        path: Some(path.to_path_buf()),
        reason: e.to_string(),
    })?;
    load_font_bytes(&bytes).map_err(|e| FontLoadError { path: Some(path.to_path_buf()), ..e })
}

/// Glyph outline source behind a [`Font`].
#[derive(Clone)]
pub enum Face {
    /// A parsed font file. Immutable and shared between sizes.
    Outline(Arc<fontdue::Font>),
    /// File-free fallback: fixed advances, glyphs painted as hollow boxes.
    Builtin,
}

impl fmt::Debug for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Face::Outline(font) => f
                .debug_struct("Outline")
                .field("units_per_em", &font.units_per_em())
                .finish(),
            Face::Builtin => f.write_str("Builtin"),
        }
    }
}

/// Coverage bitmap of one glyph, positioned relative to the pen on the baseline.
#[derive(Debug, Clone)]
pub struct GlyphBitmap {
    /// Offset from the pen x to the bitmap's left column.
    pub left: i32,
    /// Offset from the baseline to the bitmap's top row (negative = above).
    pub top: i32,
    pub width: usize,
    pub height: usize,
    /// Row-major coverage, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// A face at a pixel size. Cheap to clone.
///
/// Every width used for wrapping, alignment and painting comes from
/// [`Font::advance`], so measured and painted text always agree.
#[derive(Debug, Clone)]
pub struct Font {
    face: Face,
    size: f32,
    bold: bool,
}

impl Font {
    pub fn new(face: Face, size: f32, bold: bool) -> Self {
        Self { face, size: size.max(1.0), bold }
    }

    pub fn builtin(size: f32, bold: bool) -> Self {
        Self::new(Face::Builtin, size, bold)
    }

    /// Pixel size; also the layout line metric used by the poster rules.
    #[inline]
    pub fn size(&self) -> f32 {
        self.size
    }

    #[inline]
    pub fn is_bold(&self) -> bool {
        self.bold
    }

    #[inline]
    pub fn is_builtin(&self) -> bool {
        matches!(self.face, Face::Builtin)
    }

    /// Horizontal advance of one character.
    pub fn advance(&self, ch: char) -> f32 {
        match &self.face {
            Face::Outline(font) => font.metrics(ch, self.size).advance_width,
            Face::Builtin => builtin_advance(ch, self.size),
        }
    }

    /// Rendered width of a single line of text.
    pub fn text_width(&self, text: &str) -> f32 {
        text.chars().map(|c| self.advance(c)).sum()
    }

    /// Distance from the top of a line box to its baseline.
    pub fn ascent(&self) -> f32 {
        match &self.face {
            Face::Outline(font) => font
                .horizontal_line_metrics(self.size)
                .map(|m| m.ascent)
                .unwrap_or(self.size * 0.8),
            Face::Builtin => (self.size * 0.8).floor(),
        }
    }

    /// Coverage bitmap for `ch`, or `None` for blank glyphs.
    pub fn rasterize(&self, ch: char) -> Option<GlyphBitmap> {
        if ch.is_whitespace() || ch.is_control() {
            return None;
        }
        match &self.face {
            Face::Outline(font) => {
                let (m, coverage) = font.rasterize(ch, self.size);
                if m.width == 0 || m.height == 0 {
                    return None;
                }
                Some(GlyphBitmap {
                    left: m.xmin,
                    top: -(m.height as i32 + m.ymin),
                    width: m.width,
                    height: m.height,
                    coverage,
                })
            }
            Face::Builtin => builtin_box(builtin_advance(ch, self.size), self.size, self.bold),
        }
    }
}

/// Narrow cells advance half the size, double-width cells the full size.
fn builtin_advance(ch: char, size: f32) -> f32 {
    match ch.width() {
        Some(cells) => cells as f32 * size * 0.5,
        None => 0.0,
    }
}

fn builtin_box(advance: f32, size: f32, bold: bool) -> Option<GlyphBitmap> {
    let inset = (size * 0.1).floor().max(1.0) as usize;
    let width = (advance as usize).saturating_sub(2 * inset);
    let height = (size * 0.7).floor() as usize;
    if width == 0 || height == 0 {
        return None;
    }

    let stroke = ((size / 16.0).floor() as usize).max(1) + usize::from(bold);
    let mut coverage = vec![0u8; width * height];
    for y in 0..height {
        for x in 0..width {
            let edge = x < stroke || y < stroke || x + stroke >= width || y + stroke >= height;
            if edge {
                coverage[y * width + x] = 255;
            }
        }
    }

    Some(GlyphBitmap {
        left: inset as i32,
        top: -(height as i32),
        width,
        height,
        coverage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── builtin metrics ───────────────────────────────────────────────────

    #[test]
    fn builtin_latin_is_half_size() {
        let f = Font::builtin(20.0, false);
        assert_eq!(f.advance('a'), 10.0);
        assert_eq!(f.advance(' '), 10.0);
        assert_eq!(f.text_width("hello"), 50.0);
    }

    #[test]
    fn builtin_cjk_is_full_size() {
        let f = Font::builtin(20.0, false);
        assert_eq!(f.advance('今'), 20.0);
        assert_eq!(f.text_width("今日总结"), 80.0);
    }

    #[test]
    fn builtin_control_chars_have_no_width() {
        let f = Font::builtin(20.0, false);
        assert_eq!(f.advance('\t'), 0.0);
        assert_eq!(f.advance('\n'), 0.0);
    }

    #[test]
    fn width_scales_linearly_with_size() {
        let s = "Hello 世界 • 2025";
        assert_eq!(Font::builtin(36.0, true).text_width(s), 2.0 * Font::builtin(18.0, true).text_width(s));
    }

    // ── rasterize ─────────────────────────────────────────────────────────

    #[test]
    fn builtin_box_fits_inside_advance() {
        let f = Font::builtin(40.0, false);
        let g = f.rasterize('W').unwrap();
        assert!(g.left >= 0);
        assert!(g.left as f32 + g.width as f32 <= f.advance('W'));
        assert_eq!(g.coverage.len(), g.width * g.height);
        assert!(g.top < 0, "glyph sits above the baseline");
    }

    #[test]
    fn builtin_box_is_hollow() {
        let g = Font::builtin(40.0, false).rasterize('X').unwrap();
        let center = (g.height / 2) * g.width + g.width / 2;
        assert_eq!(g.coverage[0], 255);
        assert_eq!(g.coverage[center], 0);
    }

    #[test]
    fn whitespace_has_no_bitmap() {
        assert!(Font::builtin(40.0, false).rasterize(' ').is_none());
        assert!(Font::builtin(40.0, false).rasterize('\u{3000}').is_none());
    }

    // ── loading ───────────────────────────────────────────────────────────

    #[test]
    fn missing_file_reports_path() {
        let err = load_font_file(Path::new("/nonexistent/font.ttf")).unwrap_err();
        assert_eq!(err.path.as_deref(), Some(Path::new("/nonexistent/font.ttf")));
        assert!(err.to_string().contains("/nonexistent/font.ttf"));
    }

    #[test]
    fn garbage_bytes_fail_to_parse() {
        assert!(load_font_bytes(b"definitely not a font").is_err());
    }
}
