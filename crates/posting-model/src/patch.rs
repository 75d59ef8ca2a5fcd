//! Immutable updates.
//!
//! Editing surfaces never mutate a [`PostingConfig`] in place. They describe a
//! change as a [`PostingPatch`] and receive a new configuration from
//! [`PostingConfig::apply`].

use crate::carousel::Carousel;
use crate::format::Format;
use crate::posting::{
    Backdrop, CtaMode, Density, FontFamily, GlowIntensity, LogoColor, LogoPosition, LogoSize,
    PostType, PostingConfig, Stat, StatsMode,
};

/// A partial update. `None` leaves the field untouched.
///
/// Nullable fields use `Option<Option<_>>`: `Some(None)` clears them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingPatch {
    pub backdrop: Option<Backdrop>,
    pub featured_image: Option<Option<String>>,
    pub image_darken: Option<u8>,
    pub space_background_enabled: Option<bool>,
    pub carousel: Option<Carousel>,
    pub current_slide_index: Option<usize>,
    pub post_type: Option<PostType>,
    pub headline: Option<String>,
    pub subline: Option<String>,
    pub pill_label: Option<String>,
    pub cta_label: Option<String>,
    pub meta_line: Option<String>,
    pub stats: Option<[Stat; 3]>,
    pub highlight_word: Option<String>,
    pub logo_enabled: Option<bool>,
    pub logo_position: Option<LogoPosition>,
    pub pill_enabled: Option<bool>,
    pub cta_mode: Option<CtaMode>,
    pub stats_mode: Option<StatsMode>,
    pub highlight_enabled: Option<bool>,
    pub background_density: Option<Density>,
    pub glow_intensity: Option<GlowIntensity>,
    pub format: Option<Format>,
    pub brand: Option<BrandPatch>,
}

/// A partial update of the brand settings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandPatch {
    pub logo: Option<Option<String>>,
    pub logo_text: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub font_family: Option<FontFamily>,
    pub logo_size: Option<LogoSize>,
    pub logo_background: Option<bool>,
    pub logo_color: Option<LogoColor>,
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(v) = value {
        *target = v.clone();
    }
}

impl PostingConfig {
    /// Produce a new configuration from this one plus a patch.
    ///
    /// A headline that no longer contains the highlight word clears the
    /// word while highlighting is on, unless the patch sets a word itself.
    pub fn apply(&self, patch: &PostingPatch) -> PostingConfig {
        let mut next = self.clone();

        set(&mut next.backdrop, &patch.backdrop);
        set(&mut next.featured_image, &patch.featured_image);
        if let Some(darken) = patch.image_darken {
            next.image_darken = darken.min(100);
        }
        set(
            &mut next.space_background_enabled,
            &patch.space_background_enabled,
        );
        set(&mut next.carousel, &patch.carousel);
        set(&mut next.carousel.current_index, &patch.current_slide_index);
        set(&mut next.post_type, &patch.post_type);
        set(&mut next.subline, &patch.subline);
        set(&mut next.pill_label, &patch.pill_label);
        set(&mut next.cta_label, &patch.cta_label);
        set(&mut next.meta_line, &patch.meta_line);
        set(&mut next.stats, &patch.stats);
        set(&mut next.logo_enabled, &patch.logo_enabled);
        set(&mut next.logo_position, &patch.logo_position);
        set(&mut next.pill_enabled, &patch.pill_enabled);
        set(&mut next.cta_mode, &patch.cta_mode);
        set(&mut next.stats_mode, &patch.stats_mode);
        set(&mut next.highlight_enabled, &patch.highlight_enabled);
        set(&mut next.background_density, &patch.background_density);
        set(&mut next.glow_intensity, &patch.glow_intensity);
        set(&mut next.format, &patch.format);

        if let Some(headline) = &patch.headline {
            if patch.highlight_word.is_none()
                && next.highlight_enabled
                && !next.highlight_word.is_empty()
                && !headline.contains(next.highlight_word.as_str())
            {
                next.highlight_word.clear();
            }
            next.headline = headline.clone();
        }
        set(&mut next.highlight_word, &patch.highlight_word);

        if let Some(brand) = &patch.brand {
            let b = &mut next.brand;
            set(&mut b.logo, &brand.logo);
            set(&mut b.logo_text, &brand.logo_text);
            set(&mut b.primary_color, &brand.primary_color);
            set(&mut b.secondary_color, &brand.secondary_color);
            set(&mut b.font_family, &brand.font_family);
            set(&mut b.logo_size, &brand.logo_size);
            set(&mut b.logo_background, &brand.logo_background);
            set(&mut b.logo_color, &brand.logo_color);
        }

        next
    }

    /// Toggle the stats block the way the content editor does: turning it on
    /// shows one card and moves a non-stat posting to the stat layout.
    pub fn set_stats_enabled(&self, enabled: bool) -> PostingConfig {
        let patch = if enabled {
            PostingPatch {
                stats_mode: Some(StatsMode::One),
                post_type: (self.post_type != PostType::Stat).then_some(PostType::Stat),
                ..PostingPatch::default()
            }
        } else {
            PostingPatch {
                stats_mode: Some(StatsMode::Off),
                ..PostingPatch::default()
            }
        };
        self.apply(&patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_returns_new_value_and_keeps_original() {
        let original = PostingConfig::default();
        let patch = PostingPatch {
            subline: Some("New subline".into()),
            format: Some(Format::Story),
            ..Default::default()
        };
        let next = original.apply(&patch);
        assert_eq!(next.subline, "New subline");
        assert_eq!(next.format, Format::Story);
        assert_eq!(original.format, Format::Square);
        assert_eq!(next.headline, original.headline);
    }

    #[test]
    fn test_setting_gradient_replaces_image() {
        let with_image = PostingConfig::default().apply(&PostingPatch {
            backdrop: Some(Backdrop::Image("data:image/png;base64,AAAA".into())),
            ..Default::default()
        });
        let with_gradient = with_image.apply(&PostingPatch {
            backdrop: Some(Backdrop::Gradient("linear-gradient(#000, #fff)".into())),
            ..Default::default()
        });
        assert!(with_gradient.backdrop.image().is_none());
        assert_eq!(
            with_gradient.backdrop.gradient(),
            Some("linear-gradient(#000, #fff)")
        );
    }

    #[test]
    fn test_headline_without_highlight_word_clears_it() {
        let next = PostingConfig::default().apply(&PostingPatch {
            headline: Some("Tech Summit 2026".into()),
            ..Default::default()
        });
        assert_eq!(next.highlight_word, "");
    }

    #[test]
    fn test_headline_keeping_highlight_word_preserves_it() {
        let next = PostingConfig::default().apply(&PostingPatch {
            headline: Some("Join IT KOSMOS now".into()),
            ..Default::default()
        });
        assert_eq!(next.highlight_word, "IT KOSMOS");
    }

    #[test]
    fn test_headline_and_word_in_same_patch() {
        let next = PostingConfig::default().apply(&PostingPatch {
            headline: Some("Tech Summit 2026".into()),
            highlight_word: Some("Summit".into()),
            ..Default::default()
        });
        assert_eq!(next.highlight_word, "Summit");
    }

    #[test]
    fn test_darken_is_clamped() {
        let next = PostingConfig::default().apply(&PostingPatch {
            image_darken: Some(180),
            ..Default::default()
        });
        assert_eq!(next.image_darken, 100);
    }

    #[test]
    fn test_brand_patch_and_logo_clear() {
        let with_logo = PostingConfig::default().apply(&PostingPatch {
            brand: Some(BrandPatch {
                logo: Some(Some("logo.png".into())),
                logo_color: Some(LogoColor::White),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(with_logo.brand.logo.as_deref(), Some("logo.png"));
        assert_eq!(with_logo.brand.logo_color, LogoColor::White);

        let cleared = with_logo.apply(&PostingPatch {
            brand: Some(BrandPatch {
                logo: Some(None),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert!(cleared.brand.logo.is_none());
        assert_eq!(cleared.brand.logo_text, "PKN");
    }

    #[test]
    fn test_enabling_stats_switches_to_stat_layout() {
        let next = PostingConfig::default().set_stats_enabled(true);
        assert_eq!(next.post_type, PostType::Stat);
        assert_eq!(next.stats_mode, StatsMode::One);
        // Preset values of the stat layout are not applied.
        assert_eq!(next.cta_mode, CtaMode::Primary);

        let off = next.set_stats_enabled(false);
        assert_eq!(off.stats_mode, StatsMode::Off);
        assert_eq!(off.post_type, PostType::Stat);
    }
}
