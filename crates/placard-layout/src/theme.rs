//! Themes and the caller-owned theme store.

use std::collections::BTreeMap;

use placard_engine::paint::{Color, LinearGradient, Paint};

pub const DEFAULT_THEME_ID: &str = "black_gold";

/// Semantic colors of a theme.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub primary: Color,
    pub text: Color,
    pub muted: Color,
    pub accent: Color,
    pub card: Color,
    pub card_border: Color,
}

/// Spacing tokens in unscaled units.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tokens {
    pub radius: f32,
    pub gap: f32,
    pub column_gap: f32,
    pub card_padding: f32,
}

impl Default for Tokens {
    fn default() -> Self {
        Self { radius: 20.0, gap: 24.0, column_gap: 40.0, card_padding: 24.0 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub id: String,
    pub palette: Palette,
    pub tokens: Tokens,
    pub background_gradient: Option<LinearGradient>,
}

impl Theme {
    pub fn new(id: impl Into<String>, palette: Palette) -> Self {
        Self { id: id.into(), palette, tokens: Tokens::default(), background_gradient: None }
    }

    /// Page background: the gradient when present, else the palette color.
    pub fn background(&self) -> Paint {
        match self.background_gradient {
            Some(g) => Paint::LinearGradient(g),
            None => Paint::Solid(self.palette.background),
        }
    }

    pub fn black_gold() -> Self {
        Theme::new(
            "black_gold",
            Palette {
                background: Color::rgb(0x0F, 0x0F, 0x0F),
                primary: Color::rgb(0xD4, 0xAF, 0x37),
                text: Color::rgb(0xED, 0xED, 0xED),
                muted: Color::rgb(0x85, 0x85, 0x85),
                accent: Color::rgb(0x6C, 0x5C, 0xE7),
                card: Color::rgb(0x1A, 0x1A, 0x1A),
                card_border: Color::rgb(0x2A, 0x2A, 0x2A),
            },
        )
    }

    pub fn morandi_cream() -> Self {
        Theme::new(
            "morandi_cream",
            Palette {
                background: Color::rgb(0xF3, 0xF1, 0xED),
                primary: Color::rgb(0xBE, 0xB4, 0xA7),
                text: Color::rgb(0x2B, 0x2B, 0x2B),
                muted: Color::rgb(0x6B, 0x7F, 0x94),
                accent: Color::rgb(0xD4, 0xA5, 0xA5),
                card: Color::rgb(0xFF, 0xFF, 0xFF),
                card_border: Color::rgb(0xE4, 0xE1, 0xDC),
            },
        )
    }

    pub fn mist_blueviolet() -> Self {
        Theme::new(
            "mist_blueviolet",
            Palette {
                background: Color::rgb(0x10, 0x15, 0x22),
                primary: Color::rgb(0x7A, 0x88, 0xFF),
                text: Color::rgb(0xEC, 0xEF, 0xF4),
                muted: Color::rgb(0x7C, 0x81, 0x90),
                accent: Color::rgb(0xD0, 0xA2, 0xF7),
                card: Color::rgb(0x15, 0x1A, 0x2B),
                card_border: Color::rgb(0x22, 0x27, 0x3A),
            },
        )
    }

    pub fn fresh_summer() -> Self {
        Theme::new(
            "fresh_summer",
            Palette {
                background: Color::rgb(0xF2, 0xFB, 0xF7),
                primary: Color::rgb(0x2B, 0xB6, 0x73),
                text: Color::rgb(0x22, 0x30, 0x3C),
                muted: Color::rgb(0x6B, 0x7F, 0x94),
                accent: Color::rgb(0x00, 0xB8, 0xD9),
                card: Color::rgb(0xFF, 0xFF, 0xFF),
                card_border: Color::rgb(0xDA, 0xE6, 0xE0),
            },
        )
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::black_gold()
    }
}

// ── ThemeStore ────────────────────────────────────────────────────────────

/// Themes keyed by id. Owned by the caller and passed into rendering.
///
/// Lookups never fail: unknown ids resolve to the default theme.
#[derive(Debug, Clone)]
pub struct ThemeStore {
    themes: BTreeMap<String, Theme>,
    default: Theme,
}

impl ThemeStore {
    /// The four built-in themes, `black_gold` as default.
    pub fn builtin() -> Self {
        let mut store = Self { themes: BTreeMap::new(), default: Theme::black_gold() };
        for theme in [
            Theme::black_gold(),
            Theme::morandi_cream(),
            Theme::mist_blueviolet(),
            Theme::fresh_summer(),
        ] {
            store.insert(theme);
        }
        store
    }

    pub fn get(&self, id: &str) -> &Theme {
        match self.themes.get(id) {
            Some(theme) => theme,
            None => {
                log::warn!("unknown theme '{id}', using '{}'", self.default.id);
                &self.default
            }
        }
    }

    /// Adds or replaces a theme under its own id.
    pub fn insert(&mut self, theme: Theme) {
        if theme.id == self.default.id {
            self.default = theme.clone();
        }
        self.themes.insert(theme.id.clone(), theme);
    }

    /// Ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.themes.keys().map(String::as_str)
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::builtin()
    }
}
