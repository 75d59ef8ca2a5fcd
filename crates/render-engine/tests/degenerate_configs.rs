//! Composition and surface preparation never fail, whatever the configuration holds.

use pkn_layout::compose;
use pkn_posting_model::{
    Backdrop, Carousel, CtaMode, Density, Format, GlowIntensity, LogoColor, PostType,
    PostingConfig, Slide, SlideType, Stat, StatsMode,
};
use pkn_render_engine::{ComposedSurfaces, SurfaceProvider};

const SLIDE_TYPES: [SlideType; 9] = [
    SlideType::Event,
    SlideType::Announcement,
    SlideType::PureVisual,
    SlideType::Quote,
    SlideType::Stat,
    SlideType::Service,
    SlideType::Hiring,
    SlideType::Reminder,
    SlideType::Presentation,
];

fn blank_stats() -> [Stat; 3] {
    std::array::from_fn(|_| Stat {
        value: String::new(),
        label: String::new(),
    })
}

type Edit = Box<dyn Fn(&mut PostingConfig)>;

fn case(name: &'static str, edit: impl Fn(&mut PostingConfig) + 'static) -> (&'static str, Edit) {
    (name, Box::new(edit))
}

/// Edge-case overrides, each applied on top of every post type.
fn edge_cases() -> Vec<(&'static str, Edit)> {
    vec![
        case("empty texts", |c| {
            c.headline.clear();
            c.subline.clear();
            c.meta_line.clear();
            c.pill_label.clear();
            c.cta_label.clear();
            c.highlight_word.clear();
            c.highlight_enabled = true;
            c.stats = blank_stats();
            c.stats_mode = StatsMode::Three;
        }),
        case("separator only meta line", |c| {
            c.meta_line = "·".into();
            c.highlight_word = "not in the headline".into();
        }),
        case("darken beyond range", |c| {
            c.image_darken = u8::MAX;
            c.backdrop = Backdrop::Image("bg.jpg".into());
        }),
        case("empty image sources", |c| {
            c.backdrop = Backdrop::Image(String::new());
            c.featured_image = Some(String::new());
            c.brand.logo = Some(String::new());
            c.brand.logo_color = LogoColor::Primary;
        }),
        case("empty gradient and brand", |c| {
            c.backdrop = Backdrop::Gradient(String::new());
            c.brand.primary_color.clear();
            c.brand.secondary_color.clear();
            c.brand.logo_text.clear();
            c.cta_mode = CtaMode::Secondary;
        }),
        case("everything off", |c| {
            c.space_background_enabled = false;
            c.logo_enabled = false;
            c.pill_enabled = false;
            c.cta_mode = CtaMode::Off;
            c.stats_mode = StatsMode::Off;
            c.highlight_enabled = false;
        }),
        case("dense and bright", |c| {
            c.background_density = Density::High;
            c.glow_intensity = GlowIntensity::High;
            c.stats_mode = StatsMode::One;
        }),
        case("empty carousel past the end", |c| {
            c.carousel = Carousel::new(Vec::new(), 3);
        }),
        case("every slide type at max index", |c| {
            c.carousel = Carousel::new(
                SLIDE_TYPES
                    .iter()
                    .enumerate()
                    .map(|(i, t)| Slide::new(format!("s{i}"), *t, ""))
                    .collect(),
                usize::MAX,
            );
        }),
    ]
}

#[test]
fn test_edge_cases_compose_in_every_format() {
    let surfaces = ComposedSurfaces::new();
    for (name, edit) in edge_cases() {
        for post_type in PostType::ALL {
            let mut config = PostingConfig::default().with_post_type(post_type);
            edit(&mut config);

            for format in Format::ALL {
                let graphic = compose(&config, format);
                let dims = format.dimensions();
                assert_eq!(
                    (graphic.width, graphic.height),
                    (dims.width, dims.height),
                    "{name} {post_type} {format}"
                );
            }

            let prepared = surfaces.prepare(&config, &Format::ALL, "#0a0118");
            assert_eq!(prepared.len(), Format::ALL.len(), "{name} {post_type}");
            for format in Format::ALL {
                let surface = prepared.get(format).unwrap();
                let markup = &surface.markup;
                assert!(markup.contains(r#"id="pkn-surface""#), "{name} {post_type} {format}");
                for bad in ["NaN", "infpx", "inf%"] {
                    assert!(!markup.contains(bad), "{bad} in {name} {post_type} {format}");
                }
            }
        }
    }
}

#[test]
fn test_every_slide_type_renders_as_active_slide() {
    for slide_type in SLIDE_TYPES {
        let config = PostingConfig {
            post_type: PostType::Carousel,
            carousel: Carousel::new(vec![Slide::new("only", slide_type, "Slide headline")], 0),
            ..PostingConfig::default()
        };
        for format in Format::ALL {
            let graphic = compose(&config, format);
            assert!(graphic.root.find("slide-dots").is_some(), "{slide_type:?} {format}");
        }
    }
}
