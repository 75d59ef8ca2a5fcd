//! Presets.
//!
//! Presets are applied once. Picking a post type copies its default labels
//! and toggles into the configuration; later edits are independent of it.

use std::str::FromStr;

use crate::patch::PostingPatch;
use crate::posting::{CtaMode, Density, GlowIntensity, PostType, PostingConfig, StatsMode};

impl PostType {
    /// Field defaults copied into a configuration when this variant is picked.
    pub fn preset(self) -> PostingPatch {
        let base = PostingPatch {
            post_type: Some(self),
            ..PostingPatch::default()
        };
        match self {
            PostType::Event => PostingPatch {
                pill_label: Some("Event".into()),
                cta_label: Some("Jetzt anmelden".into()),
                cta_mode: Some(CtaMode::Primary),
                pill_enabled: Some(true),
                ..base
            },
            PostType::Announcement => PostingPatch {
                pill_label: Some("Neu".into()),
                cta_label: Some("Mehr erfahren".into()),
                cta_mode: Some(CtaMode::Primary),
                pill_enabled: Some(true),
                ..base
            },
            PostType::PureVisual => PostingPatch {
                pill_enabled: Some(false),
                cta_mode: Some(CtaMode::Off),
                stats_mode: Some(StatsMode::Off),
                ..base
            },
            PostType::Quote => PostingPatch {
                pill_label: Some("Quote".into()),
                pill_enabled: Some(true),
                cta_mode: Some(CtaMode::Off),
                ..base
            },
            PostType::Stat => PostingPatch {
                stats_mode: Some(StatsMode::Three),
                pill_enabled: Some(true),
                cta_mode: Some(CtaMode::Off),
                ..base
            },
            PostType::Service => PostingPatch {
                pill_label: Some("Service".into()),
                cta_label: Some("Mehr erfahren".into()),
                cta_mode: Some(CtaMode::Primary),
                pill_enabled: Some(true),
                ..base
            },
            PostType::Hiring => PostingPatch {
                pill_label: Some("Job".into()),
                cta_label: Some("Jetzt bewerben".into()),
                cta_mode: Some(CtaMode::Primary),
                pill_enabled: Some(true),
                ..base
            },
            PostType::Reminder => PostingPatch {
                pill_label: Some("Reminder".into()),
                pill_enabled: Some(true),
                cta_mode: Some(CtaMode::Off),
                ..base
            },
            PostType::Presentation => PostingPatch {
                pill_enabled: Some(true),
                cta_mode: Some(CtaMode::Primary),
                ..base
            },
            PostType::Carousel => PostingPatch {
                pill_enabled: Some(false),
                cta_mode: Some(CtaMode::Off),
                ..base
            },
        }
    }
}

impl PostingConfig {
    /// Switch layout variant and apply its defaults.
    pub fn with_post_type(&self, post_type: PostType) -> PostingConfig {
        self.apply(&post_type.preset())
    }
}

/// Whole-configuration starting points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GlobalPreset {
    PknStandard,
    Minimal,
    EventStrong,
}

impl GlobalPreset {
    pub const ALL: [GlobalPreset; 3] = [
        GlobalPreset::PknStandard,
        GlobalPreset::Minimal,
        GlobalPreset::EventStrong,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GlobalPreset::PknStandard => "pkn-standard",
            GlobalPreset::Minimal => "minimal",
            GlobalPreset::EventStrong => "event-strong",
        }
    }

    /// A fresh configuration built from the defaults.
    pub fn config(self) -> PostingConfig {
        let defaults = PostingConfig::default();
        match self {
            GlobalPreset::PknStandard => PostingConfig {
                headline: "IT KOSMOS Conference 2026".to_string(),
                subline: "Join the Mission to the Future of Technology".to_string(),
                ..defaults
            },
            GlobalPreset::Minimal => PostingConfig {
                space_background_enabled: false,
                pill_enabled: false,
                cta_mode: CtaMode::Off,
                highlight_enabled: false,
                glow_intensity: GlowIntensity::Low,
                background_density: Density::Low,
                ..defaults
            },
            GlobalPreset::EventStrong => PostingConfig {
                post_type: PostType::Event,
                space_background_enabled: true,
                background_density: Density::High,
                glow_intensity: GlowIntensity::High,
                cta_mode: CtaMode::Primary,
                stats_mode: StatsMode::Three,
                ..defaults
            },
        }
    }
}

/// Error returned when parsing an unknown preset name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown preset: {0}. Use one of pkn-standard, minimal, event-strong")]
pub struct UnknownPreset(pub String);

impl FromStr for GlobalPreset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s.trim())
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

/// A named background gradient offered by the media editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    pub name: &'static str,
    pub css: &'static str,
}

pub const GRADIENT_PRESETS: [GradientPreset; 10] = [
    GradientPreset {
        name: "Space Blue",
        css: "linear-gradient(135deg, #0a0118 0%, #1a0a2e 50%, #0d1b4e 100%)",
    },
    GradientPreset {
        name: "Cyber Cyan",
        css: "linear-gradient(135deg, #012830 0%, #014d60 50%, #01AAD5 100%)",
    },
    GradientPreset {
        name: "Deep Ocean",
        css: "linear-gradient(135deg, #000428 0%, #004e92 100%)",
    },
    GradientPreset {
        name: "Purple Nebula",
        css: "linear-gradient(135deg, #2d1b69 0%, #6a1b9a 50%, #0a0118 100%)",
    },
    GradientPreset {
        name: "Dark Teal",
        css: "linear-gradient(135deg, #0d1b2a 0%, #1a3a4a 50%, #0a2a3a 100%)",
    },
    GradientPreset {
        name: "Midnight Blue",
        css: "linear-gradient(135deg, #0a0a1a 0%, #1a1a3e 50%, #0a0a2e 100%)",
    },
    GradientPreset {
        name: "Steel Blue",
        css: "linear-gradient(135deg, #1d1d1b 0%, #2d3a4a 50%, #1a2a3a 100%)",
    },
    GradientPreset {
        name: "Galaxy",
        css: "linear-gradient(135deg, #0a0118 0%, #12022d 25%, #1a0a2e 50%, #0d1b4e 75%, #0a0118 100%)",
    },
    GradientPreset {
        name: "PKN Brand",
        css: "linear-gradient(135deg, #1D1D1B 0%, #01AAD5 100%)",
    },
    GradientPreset {
        name: "PKN Reverse",
        css: "linear-gradient(135deg, #01AAD5 0%, #1D1D1B 100%)",
    },
];

/// Look up a gradient preset by its display name (case-insensitive).
pub fn gradient_preset(name: &str) -> Option<&'static GradientPreset> {
    GRADIENT_PRESETS
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
}
