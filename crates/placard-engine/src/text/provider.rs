use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::font::{load_font_file, Face, Font};

/// Regular face looked up inside an asset directory.
pub const ASSET_REGULAR: &str = "NotoSansSC-Regular.otf";
/// Bold face looked up inside an asset directory.
pub const ASSET_BOLD: &str = "NotoSansSC-Bold.otf";

/// Source of fonts for layout and painting.
///
/// Must never fail: implementations fall back until they reach the
/// built-in face. Returned fonts are immutable and may be shared across
/// threads.
pub trait FontProvider: Send + Sync {
    fn font(&self, size: f32, bold: bool) -> Font;
}

/// Provider that always hands out the built-in face.
///
/// Metrics are exact and file-independent, which makes layouts reproducible.
#[derive(Debug, Default, Copy, Clone)]
pub struct BuiltinFonts;

impl FontProvider for BuiltinFonts {
    fn font(&self, size: f32, bold: bool) -> Font {
        Font::builtin(size, bold)
    }
}

/// File-backed provider with the fallback chain
/// bold asset (if requested) → regular asset → system fonts → built-in.
///
/// Parsed faces are cached per path. The cache only grows; a path that
/// failed to load is remembered as a miss and not read again.
pub struct FontLibrary {
    regular: Option<PathBuf>,
    bold: Option<PathBuf>,
    system: Vec<PathBuf>,
    faces: RwLock<HashMap<PathBuf, Option<Arc<fontdue::Font>>>>,
}

impl FontLibrary {
    /// Library with no asset fonts and the platform's system candidates.
    pub fn new() -> Self {
        Self {
            regular: None,
            bold: None,
            system: system_font_candidates(),
            faces: RwLock::new(HashMap::new()),
        }
    }

    /// Uses [`ASSET_REGULAR`] / [`ASSET_BOLD`] inside `dir`.
    pub fn with_asset_dir(mut self, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        self.regular = Some(dir.join(ASSET_REGULAR));
        self.bold = Some(dir.join(ASSET_BOLD));
        self
    }

    /// Replaces the system search list.
    pub fn with_system_fonts(mut self, paths: Vec<PathBuf>) -> Self {
        self.system = paths;
        self
    }

    fn face(&self, path: &Path) -> Option<Arc<fontdue::Font>> {
        {
            let faces = self.faces.read().unwrap_or_else(|e| e.into_inner());
            if let Some(entry) = faces.get(path) {
                return entry.clone();
            }
        }

        // Only existing files are worth a warning; most candidates are absent.
        let loaded = if path.exists() {
            load_font_file(path)
                .map_err(|e| log::warn!("{e}; trying next font"))
                .ok()
        } else {
            None
        };

        let mut faces = self.faces.write().unwrap_or_else(|e| e.into_inner());
        faces.entry(path.to_path_buf()).or_insert(loaded).clone()
    }

    fn resolve(&self, bold: bool) -> Option<Arc<fontdue::Font>> {
        let bold_asset = if bold { self.bold.as_deref() } else { None };
        bold_asset
            .into_iter()
            .chain(self.regular.as_deref())
            .chain(self.system.iter().map(PathBuf::as_path))
            .find_map(|p| self.face(p))
    }
}

impl Default for FontLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl FontProvider for FontLibrary {
    fn font(&self, size: f32, bold: bool) -> Font {
        match self.resolve(bold) {
            Some(face) => Font::new(Face::Outline(face), size, bold),
            None => Font::builtin(size, bold),
        }
    }
}

/// CJK-capable fonts commonly installed on the current platform.
pub fn system_font_candidates() -> Vec<PathBuf> {
    if cfg!(target_os = "windows") {
        let fonts = std::env::var_os("WINDIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(r"C:\Windows"))
            .join("Fonts");
        [
            "msyh.ttc",
            "msyhbd.ttc",
            "msjh.ttc",
            "simhei.ttf",
            "simfang.ttf",
            "simkai.ttf",
            "msmincho.ttc",
            "arialuni.ttf",
        ]
        .iter()
        .map(|name| fonts.join(name))
        .collect()
    } else if cfg!(target_os = "macos") {
        [
            "/System/Library/Fonts/PingFang.ttc",
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
            "/System/Library/Fonts/STHeiti Medium.ttc",
            "/System/Library/Fonts/STHeiti Light.ttc",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    } else {
        [
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
            "/usr/share/fonts/truetype/wqy/wqy-zenhei.ttc",
        ]
        .iter()
        .map(PathBuf::from)
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_provider_honours_size_and_weight() {
        let f = BuiltinFonts.font(42.0, true);
        assert_eq!(f.size(), 42.0);
        assert!(f.is_bold());
        assert!(f.is_builtin());
    }

    #[test]
    fn library_without_any_fonts_falls_back_to_builtin() {
        let lib = FontLibrary::new()
            .with_asset_dir("/nonexistent/assets")
            .with_system_fonts(vec![PathBuf::from("/nonexistent/system.ttc")]);
        let f = lib.font(20.0, true);
        assert!(f.is_builtin());
        assert_eq!(f.size(), 20.0);
    }

    #[test]
    fn unreadable_font_file_is_skipped_and_cached() {
        let dir = std::env::temp_dir().join(format!("placard-fonts-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let bogus = dir.join("broken.ttf");
        std::fs::write(&bogus, b"not a font").unwrap();

        let lib = FontLibrary::new().with_system_fonts(vec![bogus.clone()]);
        assert!(lib.font(18.0, false).is_builtin());
        assert!(lib.font(24.0, false).is_builtin());
        assert_eq!(lib.faces.read().unwrap().get(&bogus).map(Option::is_none), Some(true));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn provider_is_object_safe() {
        let _fonts: Box<dyn FontProvider> = Box::new(BuiltinFonts);
    }
}
