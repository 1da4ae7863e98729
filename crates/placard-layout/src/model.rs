use placard_engine::paint::{Color, LinearGradient};

// ── shared enums ──────────────────────────────────────────────────────────

/// Horizontal placement of each wrapped line inside the card.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
}

impl Align {
    /// `"center"` selects centering; anything else is left.
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("center") { Align::Center } else { Align::Left }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Align::Left => "left",
            Align::Center => "center",
        }
    }
}

/// How an image is sized into its reserved box.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Fit {
    /// Whole image visible, letterboxed inside the box.
    #[default]
    Contain,
    /// Box filled, overflow cropped around the center.
    Cover,
}

impl Fit {
    pub fn parse(s: &str) -> Self {
        if s.eq_ignore_ascii_case("cover") { Fit::Cover } else { Fit::Contain }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Fit::Contain => "contain",
            Fit::Cover => "cover",
        }
    }
}

// ── style override ────────────────────────────────────────────────────────

/// Sparse per-module override. `None` inherits from the theme.
///
/// Lengths are in unscaled poster units.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StyleOverride {
    pub bg_color: Option<Color>,
    pub bg_gradient: Option<LinearGradient>,
    pub text_color: Option<Color>,
    pub accent_color: Option<Color>,
    pub radius: Option<f32>,
    pub padding: Option<f32>,
}

impl StyleOverride {
    pub fn is_empty(&self) -> bool {
        *self == StyleOverride::default()
    }
}

// ── module content ────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct TitleModule {
    pub title: String,
    pub subtitle: String,
    pub align: Align,
}

impl Default for TitleModule {
    fn default() -> Self {
        Self { title: "今日总结".into(), subtitle: "2025-06-01".into(), align: Align::Left }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryModule {
    pub title: String,
    pub items: Vec<String>,
    pub bullet: String,
}

impl Default for SummaryModule {
    fn default() -> Self {
        Self {
            title: "今日摘要".into(),
            items: vec!["要点 A".into(), "要点 B".into()],
            bullet: "•".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

impl Metric {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self { label: label.into(), value: value.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatsModule {
    pub title: String,
    pub metrics: Vec<Metric>,
    /// Requested column count; layout clamps it to `1..=4`.
    pub columns: i64,
}

impl StatsModule {
    pub const MAX_COLUMNS: usize = 4;

    pub fn column_count(&self) -> usize {
        self.columns.clamp(1, Self::MAX_COLUMNS as i64) as usize
    }
}

impl Default for StatsModule {
    fn default() -> Self {
        Self { title: "今日数据".into(), metrics: vec![Metric::new("项", "值")], columns: 2 }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuoteModule {
    pub text: String,
    pub author: String,
}

impl Default for QuoteModule {
    fn default() -> Self {
        Self { text: "日日精进，久久为功。".into(), author: "——".into() }
    }
}

/// Free-form block; every segment is optional.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RichModule {
    pub title: Option<String>,
    pub body: Option<String>,
    pub items: Vec<String>,
    pub image_path: Option<String>,
    pub align: Align,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageModule {
    pub path: String,
    pub fit: Fit,
    /// Reserved box height in unscaled units.
    pub height: u32,
}

impl Default for ImageModule {
    fn default() -> Self {
        Self { path: String::new(), fit: Fit::Contain, height: 200 }
    }
}

// ── module ────────────────────────────────────────────────────────────────

/// Closed set of module kinds. Layout dispatches on this in one place.
#[derive(Debug, Clone, PartialEq)]
pub enum ModuleKind {
    Title(TitleModule),
    Summary(SummaryModule),
    Stats(StatsModule),
    Quote(QuoteModule),
    Rich(RichModule),
    Image(ImageModule),
    /// Unrecognized `type`; renders as an empty placeholder card.
    Unknown(String),
}

impl ModuleKind {
    /// Document `type` tag.
    pub fn type_name(&self) -> &str {
        match self {
            ModuleKind::Title(_) => "title",
            ModuleKind::Summary(_) => "summary",
            ModuleKind::Stats(_) => "stats",
            ModuleKind::Quote(_) => "quote",
            ModuleKind::Rich(_) => "rich",
            ModuleKind::Image(_) => "image",
            ModuleKind::Unknown(name) => name,
        }
    }

    /// Label shown in module lists when none is given.
    pub fn default_name(&self) -> &'static str {
        match self {
            ModuleKind::Title(_) => "标题",
            ModuleKind::Summary(_) => "摘要",
            ModuleKind::Stats(_) => "统计",
            ModuleKind::Quote(_) => "金句",
            ModuleKind::Rich(_) => "自定义模块",
            ModuleKind::Image(_) => "图片/贴纸",
            ModuleKind::Unknown(_) => "模块",
        }
    }
}

/// One poster card: display label, style override and content.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    /// Editor label; never painted.
    pub name: String,
    pub style: StyleOverride,
    pub kind: ModuleKind,
}

impl Module {
    pub fn new(kind: ModuleKind) -> Self {
        Self { name: kind.default_name().to_owned(), style: StyleOverride::default(), kind }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, style: StyleOverride) -> Self {
        self.style = style;
        self
    }

    pub fn title(m: TitleModule) -> Self {
        Self::new(ModuleKind::Title(m))
    }

    pub fn summary(m: SummaryModule) -> Self {
        Self::new(ModuleKind::Summary(m))
    }

    pub fn stats(m: StatsModule) -> Self {
        Self::new(ModuleKind::Stats(m))
    }

    pub fn quote(m: QuoteModule) -> Self {
        Self::new(ModuleKind::Quote(m))
    }

    pub fn rich(m: RichModule) -> Self {
        Self::new(ModuleKind::Rich(m))
    }

    pub fn image(m: ImageModule) -> Self {
        Self::new(ModuleKind::Image(m))
    }
}

// ── canvas ────────────────────────────────────────────────────────────────

/// Poster page geometry in unscaled units.
///
/// `dpi` is carried as metadata only.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
    pub padding: u32,
    pub bg_color: Option<Color>,
    pub bg_gradient: Option<LinearGradient>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self { width: 1240, height: 1754, dpi: 150, padding: 64, bg_color: None, bg_gradient: None }
    }
}

impl CanvasConfig {
    pub fn new(width: u32, height: u32, padding: u32) -> Self {
        Self { width, height, padding, ..Self::default() }
    }
}
