//! Posting configuration types.
//!
//! A [`PostingConfig`] is the complete declarative description of one
//! graphic: content, media, brand styling, layout variant and format. It is
//! always a full value; there is no partially-filled state.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::carousel::{Carousel, Slide};
use crate::format::Format;

/// Layout variant of a posting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PostType {
    /// Hero split with optional featured image.
    #[default]
    Event,
    /// Big headline in a glass card.
    Announcement,
    /// Minimal, headline only.
    PureVisual,
    /// Statement in quotes.
    Quote,
    /// Proof-point cards.
    Stat,
    /// Service spotlight.
    Service,
    /// Team/job post.
    Hiring,
    /// Short notice.
    Reminder,
    /// Visual slide.
    Presentation,
    /// Multi-slide container.
    Carousel,
}

/// Layout variant of a carousel slide. Slides cannot nest carousels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SlideType {
    #[default]
    Event,
    Announcement,
    PureVisual,
    Quote,
    Stat,
    Service,
    Hiring,
    Reminder,
    Presentation,
}

impl PostType {
    pub const ALL: [PostType; 10] = [
        PostType::Event,
        PostType::Announcement,
        PostType::PureVisual,
        PostType::Quote,
        PostType::Stat,
        PostType::Service,
        PostType::Hiring,
        PostType::Reminder,
        PostType::Presentation,
        PostType::Carousel,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            PostType::Event => "event",
            PostType::Announcement => "announcement",
            PostType::PureVisual => "pure-visual",
            PostType::Quote => "quote",
            PostType::Stat => "stat",
            PostType::Service => "service",
            PostType::Hiring => "hiring",
            PostType::Reminder => "reminder",
            PostType::Presentation => "presentation",
            PostType::Carousel => "carousel",
        }
    }

    /// Name with separators normalized to underscores, as used in filenames.
    pub fn file_token(self) -> String {
        self.as_str().replace('-', "_")
    }

    /// Whether the editor offers a featured image for this variant.
    pub fn accepts_featured_image(self) -> bool {
        matches!(
            self,
            PostType::Event | PostType::Service | PostType::Hiring | PostType::PureVisual
        )
    }
}

impl From<SlideType> for PostType {
    fn from(slide_type: SlideType) -> Self {
        match slide_type {
            SlideType::Event => PostType::Event,
            SlideType::Announcement => PostType::Announcement,
            SlideType::PureVisual => PostType::PureVisual,
            SlideType::Quote => PostType::Quote,
            SlideType::Stat => PostType::Stat,
            SlideType::Service => PostType::Service,
            SlideType::Hiring => PostType::Hiring,
            SlideType::Reminder => PostType::Reminder,
            SlideType::Presentation => PostType::Presentation,
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown post type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown post type: {0}")]
pub struct UnknownPostType(pub String);

impl FromStr for PostType {
    type Err = UnknownPostType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().replace('_', "-");
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| UnknownPostType(s.to_string()))
    }
}

/// Call-to-action button mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CtaMode {
    Off,
    #[default]
    Primary,
    Secondary,
}

/// How many stat cards the stat layout shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatsMode {
    #[default]
    Off,
    One,
    Three,
}

impl StatsMode {
    pub fn card_count(self) -> usize {
        match self {
            StatsMode::Off => 0,
            StatsMode::One => 1,
            StatsMode::Three => 3,
        }
    }
}

/// Star density of the space background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Density {
    Low,
    #[default]
    Medium,
    High,
}

impl Density {
    pub fn star_count(self) -> usize {
        match self {
            Density::Low => 30,
            Density::Medium => 60,
            Density::High => 100,
        }
    }
}

/// Strength of the blurred background glows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GlowIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl GlowIntensity {
    pub fn opacity(self) -> f32 {
        match self {
            GlowIntensity::Low => 0.15,
            GlowIntensity::Medium => 0.25,
            GlowIntensity::High => 0.4,
        }
    }
}

/// Corner the logo is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum LogoPosition {
    #[default]
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogoSize {
    Small,
    #[default]
    Medium,
    Large,
}

/// Color transform applied to an uploaded logo image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogoColor {
    Original,
    White,
    Black,
    #[default]
    Primary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum FontFamily {
    #[default]
    Vazirmatn,
    #[serde(rename = "Segoe UI")]
    SegoeUi,
    Inter,
}

impl FontFamily {
    /// CSS family name.
    pub fn css_name(self) -> &'static str {
        match self {
            FontFamily::Vazirmatn => "Vazirmatn",
            FontFamily::SegoeUi => "Segoe UI",
            FontFamily::Inter => "Inter",
        }
    }
}

/// Full-bleed background media. Image and gradient exclude each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Backdrop {
    #[default]
    None,
    /// Image source (URL or data URI).
    Image(String),
    /// CSS gradient expression.
    Gradient(String),
}

impl Backdrop {
    pub fn image(&self) -> Option<&str> {
        match self {
            Backdrop::Image(src) => Some(src),
            _ => None,
        }
    }

    pub fn gradient(&self) -> Option<&str> {
        match self {
            Backdrop::Gradient(css) => Some(css),
            _ => None,
        }
    }
}

/// One value/label pair of the stat layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Stat {
    pub value: String,
    pub label: String,
}

impl Stat {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// Corporate identity settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrandSettings {
    /// Uploaded logo image; the text badge is used when absent.
    pub logo: Option<String>,
    pub logo_text: String,
    /// Accent color as hex string.
    pub primary_color: String,
    pub secondary_color: String,
    pub font_family: FontFamily,
    pub logo_size: LogoSize,
    /// Whether an image logo sits inside a translucent rounded container.
    pub logo_background: bool,
    pub logo_color: LogoColor,
}

impl Default for BrandSettings {
    fn default() -> Self {
        Self {
            logo: None,
            logo_text: "PKN".to_string(),
            primary_color: "#01AAD5".to_string(),
            secondary_color: "#1D1D1B".to_string(),
            font_family: FontFamily::Vazirmatn,
            logo_size: LogoSize::Medium,
            logo_background: true,
            logo_color: LogoColor::Primary,
        }
    }
}

/// The complete description of one graphic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostingConfig {
    // Media
    pub backdrop: Backdrop,
    pub featured_image: Option<String>,
    /// Overlay strength in percent, `0..=100`.
    pub image_darken: u8,
    pub space_background_enabled: bool,

    pub carousel: Carousel,

    // Post type & content
    pub post_type: PostType,
    pub headline: String,
    pub subline: String,
    pub pill_label: String,
    pub cta_label: String,
    /// Free text, conventionally `"<date> · <location>"`.
    pub meta_line: String,
    pub stats: [Stat; 3],
    pub highlight_word: String,

    // Brand controls
    pub logo_enabled: bool,
    pub logo_position: LogoPosition,
    pub pill_enabled: bool,
    pub cta_mode: CtaMode,
    pub stats_mode: StatsMode,
    pub highlight_enabled: bool,
    pub background_density: Density,
    pub glow_intensity: GlowIntensity,

    pub format: Format,

    pub brand: BrandSettings,
}

impl Default for PostingConfig {
    fn default() -> Self {
        Self {
            backdrop: Backdrop::None,
            featured_image: None,
            image_darken: 30,
            space_background_enabled: true,
            carousel: Carousel::default(),
            post_type: PostType::Event,
            headline: "IT KOSMOS Conference 2026".to_string(),
            subline: "Join the Mission to the Future of Technology".to_string(),
            pill_label: "Event".to_string(),
            cta_label: "Jetzt anmelden".to_string(),
            meta_line: "15. März 2026 · Vienna Space Center".to_string(),
            stats: [
                Stat::new("500+", "Participants"),
                Stat::new("50+", "Speakers"),
                Stat::new("3", "Days"),
            ],
            highlight_word: "IT KOSMOS".to_string(),
            logo_enabled: true,
            logo_position: LogoPosition::TopLeft,
            pill_enabled: true,
            cta_mode: CtaMode::Primary,
            stats_mode: StatsMode::Off,
            highlight_enabled: true,
            background_density: Density::Medium,
            glow_intensity: GlowIntensity::Medium,
            format: Format::Square,
            brand: BrandSettings::default(),
        }
    }
}

impl PostingConfig {
    /// Parse a configuration document. Missing fields take default values.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read a configuration document from disk.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PostingError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PostingError::IoError {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_json_str(&content).map_err(|e| PostingError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Darken percentage as a `[0, 1]` factor.
    pub fn darken_factor(&self) -> f32 {
        f32::from(self.image_darken.min(100)) / 100.0
    }

    /// The same configuration with another format.
    pub fn for_format(&self, format: Format) -> Self {
        Self {
            format,
            ..self.clone()
        }
    }

    /// The configuration as rendered for one carousel slide: the slide's own
    /// type, media and copy replace the parent's corresponding fields.
    pub fn with_slide(&self, slide: &Slide) -> Self {
        Self {
            post_type: slide.slide_type.into(),
            backdrop: slide.backdrop.clone(),
            featured_image: slide.featured_image.clone(),
            headline: slide.headline.clone(),
            subline: slide.subline.clone(),
            pill_label: slide.pill_label.clone(),
            cta_label: slide.cta_label.clone(),
            meta_line: slide.meta_line.clone(),
            ..self.clone()
        }
    }

    /// Backdrop in effect for rendering, following the active carousel slide.
    pub fn active_backdrop(&self) -> &Backdrop {
        if self.post_type == PostType::Carousel {
            if let Some(slide) = self.carousel.active_slide() {
                return &slide.backdrop;
            }
        }
        &self.backdrop
    }
}

/// Errors that can occur when reading configuration documents.
#[derive(Debug, thiserror::Error)]
pub enum PostingError {
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Parse error in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_complete_event_posting() {
        let config = PostingConfig::default();
        assert_eq!(config.post_type, PostType::Event);
        assert_eq!(config.format, Format::Square);
        assert_eq!(config.headline, "IT KOSMOS Conference 2026");
        assert_eq!(config.meta_line, "15. März 2026 · Vienna Space Center");
        assert_eq!(config.stats[0], Stat::new("500+", "Participants"));
        assert_eq!(config.brand.primary_color, "#01AAD5");
        assert_eq!(config.backdrop, Backdrop::None);
        assert!(config.carousel.slides.is_empty());
    }

    #[test]
    fn test_post_type_strings() {
        assert_eq!(PostType::PureVisual.as_str(), "pure-visual");
        assert_eq!(PostType::PureVisual.file_token(), "pure_visual");
        assert_eq!(
            serde_json::to_string(&PostType::PureVisual).unwrap(),
            "\"pure-visual\""
        );
        assert_eq!("pure_visual".parse::<PostType>().unwrap(), PostType::PureVisual);
        assert!("story".parse::<PostType>().is_err());
    }

    #[test]
    fn test_density_and_glow_tables() {
        assert_eq!(Density::Low.star_count(), 30);
        assert_eq!(Density::Medium.star_count(), 60);
        assert_eq!(Density::High.star_count(), 100);
        assert!((GlowIntensity::Low.opacity() - 0.15).abs() < 1e-6);
        assert!((GlowIntensity::Medium.opacity() - 0.25).abs() < 1e-6);
        assert!((GlowIntensity::High.opacity() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let config = PostingConfig::from_json_str(
            r#"{ "post_type": "quote", "format": "9:16", "brand": { "font_family": "Segoe UI" } }"#,
        )
        .unwrap();
        assert_eq!(config.post_type, PostType::Quote);
        assert_eq!(config.format, Format::Story);
        assert_eq!(config.brand.font_family, FontFamily::SegoeUi);
        assert_eq!(config.brand.logo_text, "PKN");
        assert_eq!(config.headline, "IT KOSMOS Conference 2026");
    }

    #[test]
    fn test_backdrop_serialization() {
        let json = serde_json::to_string(&Backdrop::Gradient("linear-gradient(red, blue)".into()))
            .unwrap();
        assert_eq!(json, r#"{"kind":"gradient","value":"linear-gradient(red, blue)"}"#);
        let none: Backdrop = serde_json::from_str(r#"{"kind":"none"}"#).unwrap();
        assert_eq!(none, Backdrop::None);
    }

    #[test]
    fn test_darken_factor_clamps() {
        let mut config = PostingConfig::default();
        config.image_darken = 250;
        assert!((config.darken_factor() - 1.0).abs() < 1e-6);
        config.image_darken = 45;
        assert!((config.darken_factor() - 0.45).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = PostingConfig::from_json_file("/nonexistent/posting.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/posting.json"));
    }

    #[test]
    fn test_read_document_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posting.json");
        std::fs::write(&path, r#"{ "headline": "Hello" }"#).unwrap();
        let config = PostingConfig::from_json_file(&path).unwrap();
        assert_eq!(config.headline, "Hello");
    }
}
