//! Image loading for image and rich modules.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use image::RgbaImage;

#[derive(Debug)]
pub enum ImageLoadError {
    EmptyPath,
    Io(std::io::Error),
    Decode(image::ImageError),
}

impl fmt::Display for ImageLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyPath => write!(f, "no image path given"),
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Decode(err) => write!(f, "image error: {err}"),
        }
    }
}

impl std::error::Error for ImageLoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EmptyPath => None,
            Self::Io(err) => Some(err),
            Self::Decode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ImageLoadError {
    fn from(v: std::io::Error) -> Self {
        Self::Io(v)
    }
}

impl From<image::ImageError> for ImageLoadError {
    fn from(v: image::ImageError) -> Self {
        match v {
            image::ImageError::IoError(io) => Self::Io(io),
            other => Self::Decode(other),
        }
    }
}

/// Decodes an image file into straight-alpha RGBA8.
pub fn load_image(path: &Path) -> Result<RgbaImage, ImageLoadError> {
    if path.as_os_str().is_empty() {
        return Err(ImageLoadError::EmptyPath);
    }
    let bytes = std::fs::read(path)?;
    Ok(image::load_from_memory(&bytes)?.to_rgba8())
}

// ── ImageCache ────────────────────────────────────────────────────────────

/// Decoded images keyed by resolved path.
///
/// Append-only: failures are remembered as `None` so a broken path is
/// reported once and never re-read. Relative paths resolve against
/// `base_dir` when one is set (usually the document's directory).
#[derive(Debug, Default)]
pub struct ImageCache {
    base_dir: Option<PathBuf>,
    images: RwLock<HashMap<PathBuf, Option<Arc<RgbaImage>>>>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base_dir(dir: impl Into<PathBuf>) -> Self {
        Self { base_dir: Some(dir.into()), images: RwLock::default() }
    }

    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        match &self.base_dir {
            Some(base) if p.is_relative() => base.join(p),
            _ => p.to_path_buf(),
        }
    }

    /// The decoded image, or `None` if it cannot be loaded.
    pub fn get(&self, path: &str) -> Option<Arc<RgbaImage>> {
        if path.trim().is_empty() {
            return None;
        }
        let key = self.resolve(path);

        if let Some(hit) = self.images.read().unwrap_or_else(|e| e.into_inner()).get(&key) {
            return hit.clone();
        }

        let loaded = match load_image(&key) {
            Ok(img) => {
                log::debug!("loaded image {} ({}x{})", key.display(), img.width(), img.height());
                Some(Arc::new(img))
            }
            Err(err) => {
                log::warn!("image {} unavailable: {err}", key.display());
                None
            }
        };

        let mut images = self.images.write().unwrap_or_else(|e| e.into_inner());
        images.entry(key).or_insert(loaded).clone()
    }

    /// Seeds the cache with an in-memory image.
    pub fn insert(&self, path: &str, image: RgbaImage) {
        let key = self.resolve(path);
        self.images.write().unwrap_or_else(|e| e.into_inner()).insert(key, Some(Arc::new(image)));
    }

    pub fn len(&self) -> usize {
        self.images.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
