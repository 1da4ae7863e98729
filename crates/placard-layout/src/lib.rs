//! Placard layout: poster modules, themes and the compositor on top of
//! `placard-engine`.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use placard_layout::prelude::*;
//!
//! let fonts = FontLibrary::new().with_asset_dir("assets/fonts");
//! let images = ImageCache::new();
//! let doc = PosterDocument::load("poster.json")?;
//! let theme = doc.theme(&ThemeStore::builtin());
//!
//! let canvas = Renderer::new(&fonts, &images).render(&doc.modules, &theme, &doc.canvas, 2.0);
//! canvas.save_png("poster.png")?;
//! ```
//!
//! # Adding a module kind
//!
//! Add a variant to [`ModuleKind`], implement [`layout::Block`] for its
//! content type, and add the arm to the dispatch in `layout`.

pub mod assets;
pub mod compositor;
pub mod document;
pub mod layout;
pub mod model;
pub mod style;
pub mod theme;

pub use assets::{load_image, ImageCache, ImageLoadError};
pub use compositor::{Placement, Renderer};
pub use document::{Direction, DocumentError, PosterDocument};
pub use model::{
    Align, CanvasConfig, Fit, ImageModule, Metric, Module, ModuleKind, QuoteModule, RichModule, StatsModule,
    StyleOverride, SummaryModule, TitleModule,
};
pub use style::ResolvedStyle;
pub use theme::{Palette, Theme, ThemeStore, Tokens, DEFAULT_THEME_ID};

/// Everything needed to build and render a poster.
pub mod prelude {
    pub use crate::{
        Align, CanvasConfig, Fit, ImageCache, ImageModule, Metric, Module, ModuleKind, PosterDocument, QuoteModule,
        Renderer, RichModule, StatsModule, StyleOverride, SummaryModule, Theme, ThemeStore, TitleModule,
    };
    pub use placard_engine::paint::{Color, LinearGradient, Paint};
    pub use placard_engine::raster::Canvas;
    pub use placard_engine::text::{BuiltinFonts, FontLibrary, FontProvider};
}
