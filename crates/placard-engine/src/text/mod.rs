//! Text: fonts, the font fallback chain and line wrapping.

mod font;
mod provider;
mod wrap;

pub use font::{load_font_bytes, load_font_file, Face, Font, FontLoadError, GlyphBitmap};
pub use provider::{system_font_candidates, BuiltinFonts, FontLibrary, FontProvider, ASSET_BOLD, ASSET_REGULAR};
pub use wrap::{is_cjk, tokenize, wrap_text};
