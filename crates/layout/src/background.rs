//! Background layers: star field, glows and the user's backdrop.

use pkn_posting_model::{Backdrop, PostingConfig};

use crate::components::ROUND;
use crate::palette::{tw, Color, Paint, Stop};
use crate::starfield::star_positions;
use crate::tree::{Inset, Length, Node, Position, Style};

/// Diameter of a star dot.
pub const STAR_SIZE: f32 = 4.0;

/// Base fill of every graphic.
pub fn base_paint() -> Paint {
    Paint::linear(
        135.0,
        [
            Color::hex("#0a0118"),
            Color::hex("#1a0a2e"),
            Color::hex("#0a0118"),
        ],
    )
}

fn absolute(inset: Inset) -> Position {
    Position::Absolute {
        inset,
        centered: false,
    }
}

fn full_bleed() -> Style {
    Style {
        position: absolute(Inset::fill()),
        ..Style::default()
    }
}

fn glow(inset: Inset, centered: bool, fraction: f32, color: Color, blur: f32, opacity: f32) -> Node {
    Node::frame(Style {
        position: Position::Absolute { inset, centered },
        width: Length::Percent(fraction),
        height: Length::Percent(fraction),
        radius: Some(ROUND),
        background: Some(Paint::solid(color)),
        blur: Some(blur),
        opacity: Some(opacity),
        ..Style::default()
    })
    .with_role("glow")
}

/// Stars followed by the three glows. Empty when the space background is off.
pub fn space_layer(config: &PostingConfig) -> Vec<Node> {
    if !config.space_background_enabled {
        return Vec::new();
    }

    let mut nodes: Vec<Node> = star_positions(config.background_density.star_count())
        .into_iter()
        .map(|star| {
            Node::frame(Style {
                position: absolute(Inset {
                    top: Some(Length::Percent(star.top_percent as f32)),
                    left: Some(Length::Percent(star.left_percent as f32)),
                    ..Inset::default()
                }),
                width: Length::Px(STAR_SIZE),
                height: Length::Px(STAR_SIZE),
                radius: Some(ROUND),
                background: Some(Paint::solid(Color::white(1.0))),
                opacity: Some(star.opacity as f32),
                ..Style::default()
            })
            .with_role("star")
        })
        .collect();

    let zero = Some(Length::Px(0.0));
    let half = Some(Length::Percent(50.0));
    let opacity = config.glow_intensity.opacity();
    nodes.push(glow(
        Inset {
            top: zero,
            right: zero,
            ..Inset::default()
        },
        false,
        50.0,
        tw::CYAN_500,
        150.0,
        opacity,
    ));
    nodes.push(glow(
        Inset {
            bottom: zero,
            left: zero,
            ..Inset::default()
        },
        false,
        50.0,
        tw::BLUE_600,
        150.0,
        opacity,
    ));
    nodes.push(glow(
        Inset {
            top: half,
            left: half,
            ..Inset::default()
        },
        true,
        100.0 / 3.0,
        tw::PURPLE_600,
        120.0,
        opacity * 0.7,
    ));
    nodes
}

/// Gradient or image backdrop layers for the backdrop in effect.
pub fn backdrop_layers(config: &PostingConfig) -> Vec<Node> {
    match config.active_backdrop() {
        Backdrop::None => Vec::new(),
        Backdrop::Gradient(css) => vec![Node::frame(Style {
            background: Some(Paint::css_value(css.as_str())),
            ..full_bleed()
        })
        .with_role("backdrop-gradient")],
        Backdrop::Image(src) => {
            let darken = config.darken_factor();
            let brightness = 1.0 - f64::from(config.image_darken.min(100)) / 100.0;
            let image = Node::image(
                src.as_str(),
                Style {
                    width: Length::Percent(100.0),
                    height: Length::Percent(100.0),
                    cover: true,
                    filter: Some(format!("brightness({brightness})")),
                    ..Style::default()
                },
            )
            .with_role("backdrop-image");
            let overlay = Node::frame(Style {
                background: Some(Paint::LinearGradient {
                    angle: 180.0,
                    stops: vec![
                        Stop {
                            color: Color::black(0.6),
                            at: None,
                        },
                        Stop {
                            color: Color::black(0.4),
                            at: None,
                        },
                        Stop {
                            color: Color::black(0.6),
                            at: None,
                        },
                    ],
                }),
                opacity: Some(darken),
                ..full_bleed()
            })
            .with_role("backdrop-overlay");
            vec![Node::frame(full_bleed())
                .with_role("backdrop")
                .with_children(vec![image, overlay])]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkn_posting_model::{Density, GlowIntensity, PostingPatch};

    #[test]
    fn test_star_count_follows_density() {
        for (density, expected) in [(Density::Low, 30), (Density::Medium, 60), (Density::High, 100)] {
            let config = PostingConfig {
                background_density: density,
                ..PostingConfig::default()
            };
            let layer = space_layer(&config);
            assert_eq!(layer.iter().filter(|n| n.role == Some("star")).count(), expected);
            assert_eq!(layer.iter().filter(|n| n.role == Some("glow")).count(), 3);
        }
    }

    #[test]
    fn test_glow_opacity() {
        let config = PostingConfig {
            glow_intensity: GlowIntensity::High,
            ..PostingConfig::default()
        };
        let glows: Vec<f32> = space_layer(&config)
            .iter()
            .filter(|n| n.role == Some("glow"))
            .filter_map(|n| n.style.opacity)
            .collect();
        assert!((glows[0] - 0.4).abs() < 1e-6);
        assert!((glows[1] - 0.4).abs() < 1e-6);
        assert!((glows[2] - 0.28).abs() < 1e-6);
    }

    #[test]
    fn test_disabled_space_background_is_empty() {
        let config = PostingConfig {
            space_background_enabled: false,
            ..PostingConfig::default()
        };
        assert!(space_layer(&config).is_empty());
    }

    #[test]
    fn test_image_backdrop_darken() {
        let config = PostingConfig::default().apply(&PostingPatch {
            backdrop: Some(Backdrop::Image("photo.jpg".into())),
            image_darken: Some(40),
            ..Default::default()
        });
        let layers = backdrop_layers(&config);
        assert_eq!(layers.len(), 1);
        let image = layers[0].find("backdrop-image").unwrap();
        assert_eq!(image.style.filter.as_deref(), Some("brightness(0.6)"));
        let overlay = layers[0].find("backdrop-overlay").unwrap();
        assert!((overlay.style.opacity.unwrap() - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_gradient_backdrop_passes_css_through() {
        let css = "linear-gradient(135deg, #000428 0%, #004e92 100%)";
        let config = PostingConfig {
            backdrop: Backdrop::Gradient(css.into()),
            ..PostingConfig::default()
        };
        let layers = backdrop_layers(&config);
        assert_eq!(layers[0].style.background, Some(Paint::css_value(css)));
        assert!(backdrop_layers(&PostingConfig::default()).is_empty());
    }
}
