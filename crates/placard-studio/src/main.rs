//! Renders a poster document to PNG.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use placard_engine::logging::{init_logging, LoggingConfig};
use placard_engine::text::FontLibrary;
use placard_layout::{ImageCache, PosterDocument, Renderer, Theme, ThemeStore};

/// Width of the downscaled preview image.
const PREVIEW_WIDTH: u32 = 700;

#[derive(Parser)]
#[command(name = "placard-studio")]
#[command(about = "Render a poster document to PNG", long_about = None)]
struct Cli {
    /// Poster document (JSON)
    document: PathBuf,

    /// Output PNG path
    output: PathBuf,

    /// Export scale; values below 1 are raised to 1
    #[arg(default_value_t = 1.0)]
    scale: f32,

    /// Directory holding NotoSansSC-Regular.otf / NotoSansSC-Bold.otf
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Also write a 700px-wide preview here
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Theme id overriding the document's own
    #[arg(long)]
    theme: Option<String>,

    /// Debug logging for the placard crates
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(if cli.verbose { LoggingConfig::verbose() } else { LoggingConfig::default() });

    run(&cli, &ThemeStore::builtin())
}

fn run(cli: &Cli, store: &ThemeStore) -> Result<()> {
    let doc = PosterDocument::load(&cli.document)
        .with_context(|| format!("reading document {}", cli.document.display()))?;
    let theme = match &cli.theme {
        Some(id) => pick_theme(store, id)?,
        None => doc.theme(store),
    };

    let fonts = match &cli.assets {
        Some(dir) => FontLibrary::new().with_asset_dir(dir),
        None => FontLibrary::new(),
    };
    let images = ImageCache::with_base_dir(document_dir(&cli.document));
    let scale = export_scale(cli.scale);

    let canvas = Renderer::new(&fonts, &images).render(&doc.modules, &theme, &doc.canvas, scale);
    canvas
        .save_png(&cli.output)
        .with_context(|| format!("writing {}", cli.output.display()))?;
    log::info!("wrote {} ({}x{})", cli.output.display(), canvas.width(), canvas.height());

    if let Some(path) = &cli.preview {
        let preview = if scale == 1.0 {
            canvas.resized_to_width(PREVIEW_WIDTH)
        } else {
            Renderer::new(&fonts, &images)
                .render(&doc.modules, &theme, &doc.canvas, 1.0)
                .resized_to_width(PREVIEW_WIDTH)
        };
        preview
            .save_png(path)
            .with_context(|| format!("writing preview {}", path.display()))?;
        log::info!("wrote preview {}", path.display());
    }
    Ok(())
}

/// A theme named on the command line must exist; documents fall back instead.
fn pick_theme(store: &ThemeStore, id: &str) -> Result<Theme> {
    if !store.ids().any(|known| known == id) {
        let known: Vec<&str> = store.ids().collect();
        bail!("unknown theme '{id}' (available: {})", known.join(", "));
    }
    Ok(store.get(id).clone())
}

/// Export never goes below 1×; NaN falls back to 1×.
fn export_scale(requested: f32) -> f32 {
    if requested.is_nan() { 1.0 } else { requested.max(1.0) }
}

fn document_dir(path: &Path) -> PathBuf {
    path.parent().map(Path::to_path_buf).unwrap_or_default()
}
