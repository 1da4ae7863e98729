//! JSON poster documents.
//!
//! Schema:
//! `{canvas:{width,height,dpi,padding,bg_color?,bg_gradient?}, theme,
//! theme_data?, modules:[{type, name?, style?, ...fields}]}`.
//!
//! Decoding is lenient where the renderer can recover: unknown module
//! types become [`ModuleKind::Unknown`], malformed colors are dropped with
//! a warning, and missing fields take their defaults.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use placard_engine::paint::{Color, LinearGradient};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::model::{
    Align, CanvasConfig, Fit, ImageModule, Metric, Module, ModuleKind, QuoteModule, RichModule, StatsModule,
    StyleOverride, SummaryModule, TitleModule,
};
use crate::theme::{Palette, Theme, ThemeStore, Tokens, DEFAULT_THEME_ID};

// ── errors ────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub enum DocumentError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A module record whose fields do not fit its `type`.
    Module { index: usize, source: serde_json::Error },
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "io error: {err}"),
            Self::Json(err) => write!(f, "json error: {err}"),
            Self::Module { index, source } => write!(f, "module {index}: {source}"),
        }
    }
}

impl std::error::Error for DocumentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Json(err) => Some(err),
            Self::Module { source, .. } => Some(source),
        }
    }
}

impl From<std::io::Error> for DocumentError {
    fn from(v: std::io::Error) -> Self {
        Self::Io(v)
    }
}

impl From<serde_json::Error> for DocumentError {
    fn from(v: serde_json::Error) -> Self {
        Self::Json(v)
    }
}

// ── document ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

/// A poster: page geometry, theme selection and ordered modules.
#[derive(Debug, Clone, PartialEq)]
pub struct PosterDocument {
    pub canvas: CanvasConfig,
    pub theme_id: String,
    /// Inline theme; wins over `theme_id` when present.
    pub theme_data: Option<Theme>,
    pub modules: Vec<Module>,
}

impl Default for PosterDocument {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            theme_id: DEFAULT_THEME_ID.to_owned(),
            theme_data: None,
            modules: Vec::new(),
        }
    }
}

impl PosterDocument {
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let record: DocumentRecord = serde_json::from_str(json)?;
        record.into_document()
    }

    /// Pretty JSON with non-ASCII text left unescaped.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(&DocumentRecord::from_document(self)?)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let doc = Self::from_json(&text)?;
        log::debug!("loaded {} modules from {}", doc.modules.len(), path.as_ref().display());
        Ok(doc)
    }

    /// Writes pretty JSON, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Inline theme if present, else `theme_id` through `store`.
    pub fn theme(&self, store: &ThemeStore) -> Theme {
        match &self.theme_data {
            Some(theme) => theme.clone(),
            None => store.get(&self.theme_id).clone(),
        }
    }

    // ── editing ───────────────────────────────────────────────────────────

    pub fn push_module(&mut self, module: Module) {
        self.modules.push(module);
    }

    pub fn remove_module(&mut self, index: usize) -> Option<Module> {
        (index < self.modules.len()).then(|| self.modules.remove(index))
    }

    /// Swaps a module with its neighbour. Returns its new index, or `None`
    /// when it is already at that edge or out of range.
    pub fn move_module(&mut self, index: usize, direction: Direction) -> Option<usize> {
        let target = match direction {
            Direction::Up => index.checked_sub(1)?,
            Direction::Down => index + 1,
        };
        if index >= self.modules.len() || target >= self.modules.len() {
            return None;
        }
        self.modules.swap(index, target);
        Some(target)
    }
}

// ── records ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, Deserialize)]
struct DocumentRecord {
    #[serde(default)]
    canvas: CanvasRecord,
    #[serde(default = "default_theme_id")]
    theme: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    theme_data: Option<ThemeRecord>,
    #[serde(default)]
    modules: Vec<ModuleRecord>,
}

fn default_theme_id() -> String {
    DEFAULT_THEME_ID.to_owned()
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct CanvasRecord {
    width: u32,
    height: u32,
    dpi: u32,
    padding: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bg_gradient: Option<GradientRecord>,
}

impl Default for CanvasRecord {
    fn default() -> Self {
        let c = CanvasConfig::default();
        Self { width: c.width, height: c.height, dpi: c.dpi, padding: c.padding, bg_color: None, bg_gradient: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct GradientRecord {
    #[serde(rename = "type")]
    kind: String,
    start: String,
    end: String,
    angle: f32,
}

impl Default for GradientRecord {
    fn default() -> Self {
        Self { kind: "linear".into(), start: "#000000".into(), end: "#FFFFFF".into(), angle: 90.0 }
    }
}

#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct StyleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    bg_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bg_gradient: Option<GradientRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    accent_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ModuleRecord {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "StyleRecord::is_empty")]
    style: StyleRecord,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// JSON string or number, kept as display text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(serde_json::Number),
}

impl Default for Scalar {
    fn default() -> Self {
        Scalar::Text(String::new())
    }
}

/// Integer field that also takes floats (truncated), numeric strings and
/// `null`; `null` or a blank string mean "use the default".
fn lenient_int<'de, D: Deserializer<'de>>(de: D) -> Result<Option<i64>, D::Error> {
    let value = match Option::<Scalar>::deserialize(de)? {
        None => return Ok(None),
        Some(Scalar::Text(t)) if t.trim().is_empty() => return Ok(None),
        Some(Scalar::Text(t)) => t
            .trim()
            .parse::<f64>()
            .map_err(|_| D::Error::custom(format!("expected a number, found '{t}'")))?,
        Some(Scalar::Number(n)) => n.as_f64().ok_or_else(|| D::Error::custom("number out of range"))?,
    };
    if value.is_finite() { Ok(Some(value.trunc() as i64)) } else { Err(D::Error::custom("number must be finite")) }
}

impl From<Scalar> for String {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Text(t) => t,
            Scalar::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct TitleFields {
    title: String,
    subtitle: String,
    align: String,
}

impl Default for TitleFields {
    fn default() -> Self {
        let m = TitleModule::default();
        Self { title: m.title, subtitle: m.subtitle, align: m.align.as_str().into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct SummaryFields {
    title: String,
    items: Vec<Scalar>,
    bullet: String,
}

impl Default for SummaryFields {
    fn default() -> Self {
        let m = SummaryModule::default();
        Self { title: m.title, items: m.items.into_iter().map(Scalar::Text).collect(), bullet: m.bullet }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct MetricRecord {
    label: Scalar,
    value: Scalar,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct StatsFields {
    title: String,
    metrics: Vec<MetricRecord>,
    #[serde(deserialize_with = "lenient_int")]
    columns: Option<i64>,
}

impl Default for StatsFields {
    fn default() -> Self {
        let m = StatsModule::default();
        Self {
            title: m.title,
            metrics: m
                .metrics
                .into_iter()
                .map(|mt| MetricRecord { label: Scalar::Text(mt.label), value: Scalar::Text(mt.value) })
                .collect(),
            columns: Some(m.columns),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct QuoteFields {
    text: String,
    author: String,
}

impl Default for QuoteFields {
    fn default() -> Self {
        let m = QuoteModule::default();
        Self { text: m.text, author: m.author }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct RichFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    body: Option<String>,
    items: Vec<Scalar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    image_path: Option<String>,
    align: String,
}

impl Default for RichFields {
    fn default() -> Self {
        Self { title: None, body: None, items: Vec::new(), image_path: None, align: "left".into() }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
struct ImageFields {
    path: String,
    fit: String,
    #[serde(deserialize_with = "lenient_int")]
    height: Option<i64>,
}

impl Default for ImageFields {
    fn default() -> Self {
        let m = ImageModule::default();
        Self { path: m.path, fit: m.fit.as_str().into(), height: Some(m.height.into()) }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct TokensRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    radius: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    column_gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    card_padding: Option<f32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ThemeRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    palette: BTreeMap<String, String>,
    tokens: TokensRecord,
    #[serde(skip_serializing_if = "Option::is_none")]
    background_gradient: Option<GradientRecord>,
}

// ── record → model ────────────────────────────────────────────────────────

/// Neutral text color when an inline palette has none.
const FALLBACK_TEXT: Color = Color::rgb(0x22, 0x22, 0x22);
const INLINE_THEME_ID: &str = "custom";

fn parse_color(field: &str, value: Option<&str>) -> Option<Color> {
    let raw = value?;
    match raw.parse::<Color>() {
        Ok(c) => Some(c),
        Err(err) => {
            log::warn!("ignoring {field}: {err}");
            None
        }
    }
}

impl GradientRecord {
    fn to_gradient(&self, field: &str) -> Option<LinearGradient> {
        if !self.kind.eq_ignore_ascii_case("linear") {
            log::warn!("ignoring {field}: unsupported gradient type '{}'", self.kind);
            return None;
        }
        let start = parse_color(field, Some(self.start.as_str()))?;
        let end = parse_color(field, Some(self.end.as_str()))?;
        Some(LinearGradient::new(start, end, self.angle))
    }

    fn from_gradient(g: &LinearGradient) -> Self {
        Self { kind: "linear".into(), start: g.start.to_hex(), end: g.end.to_hex(), angle: g.angle }
    }
}

impl StyleRecord {
    fn is_empty(&self) -> bool {
        *self == StyleRecord::default()
    }

    fn to_style(&self) -> StyleOverride {
        StyleOverride {
            bg_color: parse_color("style.bg_color", self.bg_color.as_deref()),
            bg_gradient: self.bg_gradient.as_ref().and_then(|g| g.to_gradient("style.bg_gradient")),
            text_color: parse_color("style.text_color", self.text_color.as_deref()),
            accent_color: parse_color("style.accent_color", self.accent_color.as_deref()),
            radius: self.radius,
            padding: self.padding,
        }
    }

    fn from_style(s: &StyleOverride) -> Self {
        Self {
            bg_color: s.bg_color.map(Color::to_hex),
            bg_gradient: s.bg_gradient.as_ref().map(GradientRecord::from_gradient),
            text_color: s.text_color.map(Color::to_hex),
            accent_color: s.accent_color.map(Color::to_hex),
            radius: s.radius,
            padding: s.padding,
        }
    }
}

impl ThemeRecord {
    fn to_theme(&self) -> Theme {
        let text = parse_color("theme_data.palette.text", self.palette.get("text").map(String::as_str))
            .unwrap_or(FALLBACK_TEXT);
        let color = |key: &str| {
            let field = format!("theme_data.palette.{key}");
            parse_color(&field, self.palette.get(key).map(String::as_str)).unwrap_or(text)
        };
        let defaults = Tokens::default();
        Theme {
            id: self.id.clone().unwrap_or_else(|| INLINE_THEME_ID.to_owned()),
            palette: Palette {
                background: color("background"),
                primary: color("primary"),
                text,
                muted: color("muted"),
                accent: color("accent"),
                card: color("card"),
                card_border: color("card_border"),
            },
            tokens: Tokens {
                radius: self.tokens.radius.unwrap_or(defaults.radius),
                gap: self.tokens.gap.unwrap_or(defaults.gap),
                column_gap: self.tokens.column_gap.unwrap_or(defaults.column_gap),
                card_padding: self.tokens.card_padding.unwrap_or(defaults.card_padding),
            },
            background_gradient: self
                .background_gradient
                .as_ref()
                .and_then(|g| g.to_gradient("theme_data.background_gradient")),
        }
    }

    fn from_theme(t: &Theme) -> Self {
        let p = &t.palette;
        let palette = [
            ("background", p.background),
            ("primary", p.primary),
            ("text", p.text),
            ("muted", p.muted),
            ("accent", p.accent),
            ("card", p.card),
            ("card_border", p.card_border),
        ]
        .into_iter()
        .map(|(k, c)| (k.to_owned(), c.to_hex()))
        .collect();
        Self {
            id: Some(t.id.clone()),
            palette,
            tokens: TokensRecord {
                radius: Some(t.tokens.radius),
                gap: Some(t.tokens.gap),
                column_gap: Some(t.tokens.column_gap),
                card_padding: Some(t.tokens.card_padding),
            },
            background_gradient: t.background_gradient.as_ref().map(GradientRecord::from_gradient),
        }
    }
}

fn strings(items: Vec<Scalar>) -> Vec<String> {
    items.into_iter().map(String::from).collect()
}

fn fields<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(map))
}

impl ModuleRecord {
    fn into_module(self, index: usize) -> Result<Module, DocumentError> {
        let wrap = |source| DocumentError::Module { index, source };
        let kind = match self.kind.as_str() {
            "title" => {
                let f: TitleFields = fields(self.fields).map_err(wrap)?;
                ModuleKind::Title(TitleModule { title: f.title, subtitle: f.subtitle, align: Align::parse(&f.align) })
            }
            "summary" => {
                let f: SummaryFields = fields(self.fields).map_err(wrap)?;
                ModuleKind::Summary(SummaryModule { title: f.title, items: strings(f.items), bullet: f.bullet })
            }
            "stats" => {
                let f: StatsFields = fields(self.fields).map_err(wrap)?;
                let metrics = f.metrics.into_iter().map(|m| Metric::new(m.label, m.value)).collect();
                let columns = f.columns.unwrap_or(StatsModule::default().columns);
                ModuleKind::Stats(StatsModule { title: f.title, metrics, columns })
            }
            "quote" => {
                let f: QuoteFields = fields(self.fields).map_err(wrap)?;
                ModuleKind::Quote(QuoteModule { text: f.text, author: f.author })
            }
            "rich" => {
                let f: RichFields = fields(self.fields).map_err(wrap)?;
                ModuleKind::Rich(RichModule {
                    title: f.title,
                    body: f.body,
                    items: strings(f.items),
                    image_path: f.image_path,
                    align: Align::parse(&f.align),
                })
            }
            "image" | "sticker" => {
                let f: ImageFields = fields(self.fields).map_err(wrap)?;
                // negative heights reserve nothing
                let height = f.height.map_or(ImageModule::default().height, |h| h.clamp(0, u32::MAX.into()) as u32);
                ModuleKind::Image(ImageModule { path: f.path, fit: Fit::parse(&f.fit), height })
            }
            other => {
                log::warn!("module {index}: unknown type '{other}', rendering a placeholder");
                ModuleKind::Unknown(other.to_owned())
            }
        };
        let mut module = Module::new(kind).with_style(self.style.to_style());
        if let Some(name) = self.name {
            module.name = name;
        }
        Ok(module)
    }

    fn from_module(m: &Module) -> Result<Self, serde_json::Error> {
        let value = match &m.kind {
            ModuleKind::Title(t) => serde_json::to_value(TitleFields {
                title: t.title.clone(),
                subtitle: t.subtitle.clone(),
                align: t.align.as_str().into(),
            })?,
            ModuleKind::Summary(s) => serde_json::to_value(SummaryFields {
                title: s.title.clone(),
                items: s.items.iter().cloned().map(Scalar::Text).collect(),
                bullet: s.bullet.clone(),
            })?,
            ModuleKind::Stats(s) => serde_json::to_value(StatsFields {
                title: s.title.clone(),
                metrics: s
                    .metrics
                    .iter()
                    .map(|mt| MetricRecord { label: Scalar::Text(mt.label.clone()), value: Scalar::Text(mt.value.clone()) })
                    .collect(),
                columns: Some(s.columns),
            })?,
            ModuleKind::Quote(q) => serde_json::to_value(QuoteFields { text: q.text.clone(), author: q.author.clone() })?,
            ModuleKind::Rich(r) => serde_json::to_value(RichFields {
                title: r.title.clone(),
                body: r.body.clone(),
                items: r.items.iter().cloned().map(Scalar::Text).collect(),
                image_path: r.image_path.clone(),
                align: r.align.as_str().into(),
            })?,
            ModuleKind::Image(i) => serde_json::to_value(ImageFields {
                path: i.path.clone(),
                fit: i.fit.as_str().into(),
                height: Some(i.height.into()),
            })?,
            ModuleKind::Unknown(_) => Value::Object(Map::new()),
        };
        let fields = match value {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Ok(Self {
            kind: m.kind.type_name().to_owned(),
            name: Some(m.name.clone()),
            style: StyleRecord::from_style(&m.style),
            fields,
        })
    }
}

impl DocumentRecord {
    fn into_document(self) -> Result<PosterDocument, DocumentError> {
        let c = self.canvas;
        let canvas = CanvasConfig {
            width: c.width,
            height: c.height,
            dpi: c.dpi,
            padding: c.padding,
            bg_color: parse_color("canvas.bg_color", c.bg_color.as_deref()),
            bg_gradient: c.bg_gradient.as_ref().and_then(|g| g.to_gradient("canvas.bg_gradient")),
        };
        let modules = self
            .modules
            .into_iter()
            .enumerate()
            .map(|(i, m)| m.into_module(i))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PosterDocument {
            canvas,
            theme_id: self.theme,
            theme_data: self.theme_data.as_ref().map(ThemeRecord::to_theme),
            modules,
        })
    }

    fn from_document(doc: &PosterDocument) -> Result<Self, serde_json::Error> {
        let c = &doc.canvas;
        Ok(Self {
            canvas: CanvasRecord {
                width: c.width,
                height: c.height,
                dpi: c.dpi,
                padding: c.padding,
                bg_color: c.bg_color.map(Color::to_hex),
                bg_gradient: c.bg_gradient.as_ref().map(GradientRecord::from_gradient),
            },
            theme: doc.theme_id.clone(),
            theme_data: doc.theme_data.as_ref().map(ThemeRecord::from_theme),
            modules: doc.modules.iter().map(ModuleRecord::from_module).collect::<Result<_, _>>()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"{
      "canvas": {"width": 1080, "height": 1920, "dpi": 150, "padding": 48},
      "theme": "fresh_summer",
      "modules": [
        {"type": "title", "title": "周报", "subtitle": "第 23 周", "align": "center"},
        {"type": "summary", "items": ["完成布局", 42]},
        {"type": "stats", "metrics": [{"label": "提交", "value": 17}, {"label": "评审", "value": "3"}], "columns": 3},
        {"type": "quote", "text": "慢慢来", "author": "", "style": {"bg_color": "#FFEEDD", "radius": 8}},
        {"type": "rich", "body": "正文"},
        {"type": "sticker", "path": "logo.png"},
        {"type": "chart", "series": [1, 2, 3]}
      ]
    }"##;

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("placard-doc-{}-{name}", std::process::id()))
    }

    // ── decoding ──────────────────────────────────────────────────────────

    #[test]
    fn decodes_every_kind() {
        let doc = PosterDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.canvas.width, 1080);
        assert_eq!(doc.canvas.padding, 48);
        assert_eq!(doc.theme_id, "fresh_summer");
        let kinds: Vec<&str> = doc.modules.iter().map(|m| m.kind.type_name()).collect();
        assert_eq!(kinds, ["title", "summary", "stats", "quote", "rich", "image", "chart"]);

        let ModuleKind::Title(t) = &doc.modules[0].kind else { panic!() };
        assert_eq!(t.align, Align::Center);
        let ModuleKind::Stats(s) = &doc.modules[2].kind else { panic!() };
        assert_eq!(s.metrics[0], Metric::new("提交", "17"));
        assert_eq!(s.columns, 3);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let doc = PosterDocument::from_json(SAMPLE).unwrap();
        let ModuleKind::Summary(s) = &doc.modules[1].kind else { panic!() };
        assert_eq!(s.title, "今日摘要");
        assert_eq!(s.items, ["完成布局", "42"]);
        assert_eq!(s.bullet, "•");
        let ModuleKind::Image(i) = &doc.modules[5].kind else { panic!() };
        assert_eq!((i.fit, i.height), (Fit::Contain, 200));
        assert_eq!(doc.modules[5].name, "图片/贴纸");
        let ModuleKind::Rich(r) = &doc.modules[4].kind else { panic!() };
        assert_eq!(r.title, None);
        assert_eq!(r.body.as_deref(), Some("正文"));
    }

    #[test]
    fn empty_document_is_default() {
        let doc = PosterDocument::from_json("{}").unwrap();
        assert_eq!(doc, PosterDocument::default());
    }

    #[test]
    fn style_overrides_are_parsed() {
        let doc = PosterDocument::from_json(SAMPLE).unwrap();
        let style = &doc.modules[3].style;
        assert_eq!(style.bg_color, Some(Color::rgb(0xFF, 0xEE, 0xDD)));
        assert_eq!(style.radius, Some(8.0));
        assert_eq!(style.padding, None);
    }

    #[test]
    fn malformed_colors_are_dropped() {
        let json = r##"{"modules":[{"type":"quote","style":{"bg_color":"tomato","text_color":"#123",
            "bg_gradient":{"start":"#000","end":"nope","angle":0}}}]}"##;
        let doc = PosterDocument::from_json(json).unwrap();
        let style = &doc.modules[0].style;
        assert_eq!(style.bg_color, None);
        assert_eq!(style.bg_gradient, None);
        assert_eq!(style.text_color, Some(Color::rgb(0x11, 0x22, 0x33)));
    }

    #[test]
    fn wrong_field_type_reports_module_index() {
        let json = r#"{"modules":[{"type":"title"},{"type":"image","height":"tall"}]}"#;
        let err = PosterDocument::from_json(json).unwrap_err();
        assert!(matches!(err, DocumentError::Module { index: 1, .. }), "{err}");
    }

    #[test]
    fn numeric_fields_accept_strings_floats_and_null() {
        let json = r#"{"modules":[
            {"type":"stats","columns":"3"},
            {"type":"stats","columns":null},
            {"type":"image","height":200.0},
            {"type":"sticker","height":" 120 "},
            {"type":"image","height":-5}
        ]}"#;
        let doc = PosterDocument::from_json(json).unwrap();
        let columns = |i: usize| match &doc.modules[i].kind {
            ModuleKind::Stats(s) => s.columns,
            other => panic!("{other:?}"),
        };
        let height = |i: usize| match &doc.modules[i].kind {
            ModuleKind::Image(m) => m.height,
            other => panic!("{other:?}"),
        };
        assert_eq!(columns(0), 3);
        assert_eq!(columns(1), StatsModule::default().columns);
        assert_eq!(height(2), 200);
        assert_eq!(height(3), 120);
        assert_eq!(height(4), 0);
    }

    #[test]
    fn saved_numbers_stay_integers() {
        let mut doc = PosterDocument::default();
        doc.push_module(Module::new(ModuleKind::Image(ImageModule { height: 240, ..ImageModule::default() })));
        let json = doc.to_json().unwrap();
        assert!(json.contains("\"height\": 240"), "{json}");
    }

    #[test]
    fn record_without_type_is_an_error() {
        assert!(matches!(PosterDocument::from_json(r#"{"modules":[{"title":"x"}]}"#), Err(DocumentError::Json(_))));
    }

    // ── themes ────────────────────────────────────────────────────────────

    #[test]
    fn theme_id_resolves_through_store() {
        let store = ThemeStore::builtin();
        let doc = PosterDocument::from_json(SAMPLE).unwrap();
        assert_eq!(doc.theme(&store).id, "fresh_summer");
        let doc = PosterDocument::from_json(r#"{"theme":"missing"}"#).unwrap();
        assert_eq!(doc.theme(&store).id, DEFAULT_THEME_ID);
    }

    #[test]
    fn inline_theme_fills_missing_keys() {
        let json = r##"{"theme":"black_gold","theme_data":{"palette":{"text":"#101010","card":"#FAFAFA"},
            "tokens":{"gap":10}}}"##;
        let doc = PosterDocument::from_json(json).unwrap();
        let theme = doc.theme(&ThemeStore::builtin());
        assert_eq!(theme.id, "custom");
        assert_eq!(theme.palette.card, Color::rgb(0xFA, 0xFA, 0xFA));
        assert_eq!(theme.palette.primary, Color::rgb(0x10, 0x10, 0x10));
        assert_eq!(theme.tokens.gap, 10.0);
        assert_eq!(theme.tokens.radius, 20.0);
    }

    #[test]
    fn inline_theme_without_text_uses_neutral() {
        let doc = PosterDocument::from_json(r#"{"theme_data":{"palette":{}}}"#).unwrap();
        let theme = doc.theme_data.unwrap();
        assert_eq!(theme.palette.text, FALLBACK_TEXT);
        assert_eq!(theme.palette.background, FALLBACK_TEXT);
    }

    // ── saving ────────────────────────────────────────────────────────────

    #[test]
    fn json_keeps_cjk_unescaped() {
        let mut doc = PosterDocument::default();
        doc.push_module(Module::title(TitleModule::default()));
        let json = doc.to_json().unwrap();
        assert!(json.contains("今日总结"));
        assert!(json.contains("\"type\": \"title\""));
    }

    #[test]
    fn save_then_load_preserves_document() {
        let mut doc = PosterDocument::from_json(SAMPLE).unwrap();
        doc.theme_data = Some(Theme::mist_blueviolet());
        doc.canvas.bg_gradient = Some(LinearGradient::new(Color::black(), Color::rgb(40, 40, 80), 90.0));
        let path = temp_path("nested").join("poster.json");
        doc.save(&path).unwrap();
        let back = PosterDocument::load(&path).unwrap();
        let _ = std::fs::remove_dir_all(path.parent().unwrap());
        assert_eq!(back, doc);
    }

    // ── editing ───────────────────────────────────────────────────────────

    fn three() -> PosterDocument {
        let mut doc = PosterDocument::default();
        for name in ["a", "b", "c"] {
            doc.push_module(Module::quote(QuoteModule::default()).with_name(name));
        }
        doc
    }

    fn names(doc: &PosterDocument) -> Vec<&str> {
        doc.modules.iter().map(|m| m.name.as_str()).collect()
    }

    #[test]
    fn move_swaps_with_neighbour() {
        let mut doc = three();
        assert_eq!(doc.move_module(1, Direction::Up), Some(0));
        assert_eq!(names(&doc), ["b", "a", "c"]);
        assert_eq!(doc.move_module(1, Direction::Down), Some(2));
        assert_eq!(names(&doc), ["b", "c", "a"]);
    }

    #[test]
    fn move_at_edges_is_noop() {
        let mut doc = three();
        assert_eq!(doc.move_module(0, Direction::Up), None);
        assert_eq!(doc.move_module(2, Direction::Down), None);
        assert_eq!(doc.move_module(7, Direction::Up), None);
        assert_eq!(names(&doc), ["a", "b", "c"]);
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut doc = three();
        assert_eq!(doc.remove_module(1).map(|m| m.name), Some("b".into()));
        assert!(doc.remove_module(5).is_none());
        assert_eq!(names(&doc), ["a", "c"]);
    }
}
