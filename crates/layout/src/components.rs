//! Building blocks shared by the post type layouts.

use pkn_posting_model::{
    BrandSettings, CtaMode, LogoColor, LogoPosition, LogoSize, PostingConfig, Stat,
};

use crate::palette::{tw, Color, Paint};
use crate::text::{parse_meta_line, split_highlight, HeadlineSpan};
use crate::tree::{
    Align, Border, Direction, Edges, Icon, Inset, Justify, Length, Node, Position, Style, TextAlign,
};

/// Corner radius used for pills and dots.
pub const ROUND: f32 = 9999.0;
/// Distance of the logo from its corner.
pub const LOGO_OFFSET: f32 = 48.0;

const LEADING_TIGHT: f32 = 1.25;
const LEADING_RELAXED: f32 = 1.625;

fn primary(brand: &BrandSettings) -> Color {
    Color::hex(brand.primary_color.clone())
}

fn brand_gradient(brand: &BrandSettings) -> Paint {
    Paint::linear(
        135.0,
        [
            Color::hex(brand.primary_color.clone()),
            Color::hex(brand.secondary_color.clone()),
        ],
    )
}

/// Dark translucent card with a light hairline border.
pub fn glass_card(padding: f32, gap: f32) -> Node {
    Node::frame(Style {
        padding: Edges::all(padding),
        gap,
        background: Some(Paint::solid(Color::black(0.4))),
        backdrop_blur: Some(24.0),
        border: Some(Border {
            width: 1.0,
            color: Color::white(0.2),
        }),
        radius: Some(24.0),
        ..Style::default()
    })
    .with_role("glass-card")
}

/// Rounded label chip in the accent color.
pub fn pill(label: &str, brand: &BrandSettings) -> Node {
    let text = Node::text(
        label,
        Style {
            font_size: Some(14.0),
            font_weight: Some(600),
            uppercase: true,
            letter_spacing: Some(0.05),
            color: Some(primary(brand)),
            ..Style::default()
        },
    );
    Node::frame(Style {
        padding: Edges::xy(24.0, 8.0),
        radius: Some(ROUND),
        background: Some(Paint::solid(Color::hex_alpha(&brand.primary_color, "33"))),
        border: Some(Border {
            width: 1.0,
            color: Color::hex_alpha(&brand.primary_color, "80"),
        }),
        backdrop_blur: Some(4.0),
        ..Style::default()
    })
    .with_role("pill")
    .with_children(vec![text])
}

/// The pill when it is switched on.
pub fn pill_if_enabled(config: &PostingConfig) -> Option<Node> {
    config
        .pill_enabled
        .then(|| pill(&config.pill_label, &config.brand))
}

/// Call-to-action button, or `None` when the mode is off.
pub fn cta_button(config: &PostingConfig) -> Option<Node> {
    let brand = &config.brand;
    let mut style = Style {
        direction: Direction::Row,
        align: Some(Align::Center),
        gap: 12.0,
        padding: Edges::xy(32.0, 16.0),
        radius: Some(12.0),
        font_size: Some(16.0),
        font_weight: Some(600),
        color: Some(Color::white(1.0)),
        ..Style::default()
    };
    match config.cta_mode {
        CtaMode::Off => return None,
        CtaMode::Primary => {
            style.background = Some(brand_gradient(brand));
            style.shadow = Some(format!("0 10px 40px {}50", brand.primary_color));
        }
        CtaMode::Secondary => {
            style.background = Some(Paint::solid(Color::white(0.1)));
            style.border = Some(Border {
                width: 1.0,
                color: Color::white(0.3),
            });
            style.backdrop_blur = Some(4.0);
        }
    }
    Some(
        Node::frame(style)
            .with_role("cta")
            .with_children(vec![
                Node::text(config.cta_label.as_str(), Style::default()),
                Node::icon(Icon::ArrowRight, 20.0, None),
            ]),
    )
}

/// Wrap a node in a frame with top padding, as the layouts space their CTAs.
pub fn padded_top(node: Node, top: f32) -> Node {
    Node::frame(Style {
        padding: Edges {
            top,
            ..Edges::default()
        },
        ..Style::default()
    })
    .with_children(vec![node])
}

/// Bold white headline. With `highlight`, the highlight word is painted with
/// the accent gradient.
pub fn headline(config: &PostingConfig, font_size: f32, highlight: bool) -> Node {
    let spans = if highlight {
        split_highlight(
            &config.headline,
            &config.highlight_word,
            config.highlight_enabled,
        )
    } else {
        split_highlight(&config.headline, "", false)
    };

    let children = spans
        .into_iter()
        .map(|span| match span {
            HeadlineSpan::Plain(text) => Node::text(text, Style::default()),
            HeadlineSpan::Highlight(text) => Node::text(
                text,
                Style {
                    background: Some(Paint::linear(
                        90.0,
                        [tw::CYAN_400, tw::BLUE_400, tw::PURPLE_400],
                    )),
                    clip_text: true,
                    ..Style::default()
                },
            )
            .with_role("highlight"),
        })
        .collect();

    Node::frame(Style {
        font_size: Some(font_size),
        font_weight: Some(700),
        line_height: Some(LEADING_TIGHT),
        color: Some(Color::white(1.0)),
        ..Style::default()
    })
    .with_role("headline")
    .with_children(children)
}

/// Gray supporting copy.
pub fn subline(text: &str, font_size: f32, relaxed: bool) -> Node {
    Node::text(
        text,
        Style {
            font_size: Some(font_size),
            line_height: relaxed.then_some(LEADING_RELAXED),
            color: Some(tw::GRAY_300),
            ..Style::default()
        },
    )
    .with_role("subline")
}

/// Sizing of a meta row.
#[derive(Debug, Clone, Copy)]
pub struct MetaSizes {
    pub text: f32,
    pub icon: f32,
    pub gap: f32,
}

/// Calendar + date and, if present, map pin + location, in cyan.
pub fn meta_row(meta_line: &str, sizes: MetaSizes) -> Option<Node> {
    let meta = parse_meta_line(meta_line)?;
    let item = |icon: Icon, text: String| {
        Node::frame(Style {
            direction: Direction::Row,
            align: Some(Align::Center),
            gap: 8.0,
            ..Style::default()
        })
        .with_children(vec![
            Node::icon(icon, sizes.icon, None),
            Node::text(
                text,
                Style {
                    font_size: Some(sizes.text),
                    ..Style::default()
                },
            ),
        ])
    };

    let mut items = vec![item(Icon::Calendar, meta.date).with_role("meta-date")];
    if let Some(location) = meta.location {
        items.push(item(Icon::MapPin, location).with_role("meta-location"));
    }
    Some(
        Node::frame(Style {
            direction: Direction::Row,
            align: Some(Align::Center),
            gap: sizes.gap,
            wrap: true,
            color: Some(tw::CYAN_400),
            ..Style::default()
        })
        .with_role("meta")
        .with_children(items),
    )
}

/// Whole meta line behind a single map pin, in the accent color.
pub fn location_row(
    meta_line: &str,
    brand: &BrandSettings,
    text_size: f32,
    centered: bool,
) -> Option<Node> {
    if meta_line.is_empty() {
        return None;
    }
    Some(
        Node::frame(Style {
            direction: Direction::Row,
            align: Some(Align::Center),
            justify: centered.then_some(Justify::Center),
            gap: 16.0,
            color: Some(primary(brand)),
            ..Style::default()
        })
        .with_role("meta")
        .with_children(vec![
            Node::icon(Icon::MapPin, 20.0, None),
            Node::text(
                meta_line,
                Style {
                    font_size: Some(text_size),
                    ..Style::default()
                },
            ),
        ]),
    )
}

/// Circular gradient badge holding the team icon.
pub fn icon_badge(size: f32, centered: bool) -> Node {
    Node::frame(Style {
        width: Length::Px(size),
        height: Length::Px(size),
        radius: Some(ROUND),
        align: Some(Align::Center),
        justify: Some(Justify::Center),
        margin_auto: centered,
        background: Some(Paint::linear(90.0, [tw::CYAN_500, tw::BLUE_600])),
        ..Style::default()
    })
    .with_role("icon-badge")
    .with_children(vec![Node::icon(Icon::Users, size / 2.0, Some(Color::white(1.0)))])
}

/// Accent gradients of the stat cards, by position.
pub fn stat_gradient(index: usize) -> Paint {
    let (from, to) = match index % 3 {
        0 => (tw::CYAN_400, tw::BLUE_400),
        1 => (tw::BLUE_400, tw::PURPLE_400),
        _ => (tw::PURPLE_400, tw::PINK_400),
    };
    Paint::linear(90.0, [from, to])
}

pub fn stat_card(stat: &Stat, index: usize) -> Node {
    let mut card = glass_card(64.0, 24.0).with_role("stat-card");
    card.style.min_width = Some(200.0);
    card.style.align = Some(Align::Center);
    card.style.text_align = Some(TextAlign::Center);
    card.children = vec![
        Node::text(
            stat.value.as_str(),
            Style {
                font_size: Some(96.0),
                font_weight: Some(700),
                background: Some(stat_gradient(index)),
                clip_text: true,
                ..Style::default()
            },
        )
        .with_role("stat-value"),
        Node::text(
            stat.label.as_str(),
            Style {
                font_size: Some(24.0),
                font_weight: Some(500),
                color: Some(tw::GRAY_300),
                ..Style::default()
            },
        )
        .with_role("stat-label"),
    ];
    card
}

/// Featured image inside a glass frame of fixed width.
pub fn featured_panel(src: &str, width: f32, image_height: f32, padding: f32) -> Node {
    let image = Node::image(
        src,
        Style {
            width: Length::Percent(100.0),
            height: Length::Px(image_height),
            cover: true,
            radius: Some(16.0),
            ..Style::default()
        },
    );
    let mut card = glass_card(padding, 0.0);
    card.push(image);
    Node::frame(Style {
        width: Length::Px(width),
        no_shrink: true,
        ..Style::default()
    })
    .with_role("featured")
    .with_children(vec![card])
}

fn logo_image_height(size: LogoSize) -> f32 {
    match size {
        LogoSize::Small => 64.0,
        LogoSize::Medium => 96.0,
        LogoSize::Large => 128.0,
    }
}

fn logo_text_size(size: LogoSize) -> f32 {
    match size {
        LogoSize::Small => 24.0,
        LogoSize::Medium => 36.0,
        LogoSize::Large => 48.0,
    }
}

/// CSS filter applied to an uploaded logo.
pub fn logo_filter(color: LogoColor) -> Option<&'static str> {
    match color {
        LogoColor::Original => None,
        LogoColor::White => Some("brightness(0) invert(1)"),
        LogoColor::Black => Some("brightness(0)"),
        LogoColor::Primary => None,
    }
}

fn corner_inset(position: LogoPosition) -> Inset {
    let offset = Some(Length::Px(LOGO_OFFSET));
    match position {
        LogoPosition::TopLeft => Inset {
            top: offset,
            left: offset,
            ..Inset::default()
        },
        LogoPosition::TopRight => Inset {
            top: offset,
            right: offset,
            ..Inset::default()
        },
        LogoPosition::BottomLeft => Inset {
            bottom: offset,
            left: offset,
            ..Inset::default()
        },
        LogoPosition::BottomRight => Inset {
            bottom: offset,
            right: offset,
            ..Inset::default()
        },
    }
}

/// Logo pinned to its corner: the uploaded image or a text badge.
pub fn logo(config: &PostingConfig) -> Node {
    let brand = &config.brand;
    let content = match &brand.logo {
        Some(src) => {
            let image = Node::image(
                src.as_str(),
                Style {
                    height: Length::Px(logo_image_height(brand.logo_size)),
                    filter: logo_filter(brand.logo_color).map(str::to_string),
                    opacity: (brand.logo_color == LogoColor::Primary).then_some(0.0),
                    ..Style::default()
                },
            )
            .with_role("logo-image");
            // Primary: the image only sizes the box, its alpha masks a solid fill.
            let image = if brand.logo_color == LogoColor::Primary {
                Node::frame(Style {
                    background: Some(Paint::solid(primary(brand))),
                    mask: Some(src.clone()),
                    ..Style::default()
                })
                .with_role("logo-tint")
                .with_children(vec![image])
            } else {
                image
            };
            if brand.logo_background {
                Node::frame(Style {
                    padding: Edges::all(16.0),
                    radius: Some(16.0),
                    background: Some(Paint::solid(Color::white(0.1))),
                    backdrop_blur: Some(12.0),
                    border: Some(Border {
                        width: 1.0,
                        color: Color::white(0.2),
                    }),
                    shadow: Some("0 25px 50px -12px rgba(0, 0, 0, 0.25)".to_string()),
                    ..Style::default()
                })
                .with_role("logo-container")
                .with_children(vec![image])
            } else {
                image
            }
        }
        None => Node::frame(Style {
            padding: Edges::xy(32.0, 16.0),
            radius: Some(16.0),
            background: Some(brand_gradient(brand)),
            border: Some(Border {
                width: 2.0,
                color: Color::white(0.1),
            }),
            shadow: Some("0 25px 50px -12px rgba(0, 0, 0, 0.25)".to_string()),
            ..Style::default()
        })
        .with_role("logo-badge")
        .with_children(vec![Node::text(
            brand.logo_text.as_str(),
            Style {
                font_size: Some(logo_text_size(brand.logo_size)),
                font_weight: Some(700),
                letter_spacing: Some(0.05),
                color: Some(Color::white(1.0)),
                ..Style::default()
            },
        )]),
    };

    Node::frame(Style {
        position: Position::Absolute {
            inset: corner_inset(config.logo_position),
            centered: false,
        },
        z_index: Some(20),
        ..Style::default()
    })
    .with_role("logo")
    .with_children(vec![content])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkn_posting_model::{BrandPatch, PostingPatch};

    #[test]
    fn test_cta_off_is_omitted() {
        let config = PostingConfig {
            cta_mode: CtaMode::Off,
            ..PostingConfig::default()
        };
        assert!(cta_button(&config).is_none());
    }

    #[test]
    fn test_primary_cta_uses_brand_gradient() {
        let cta = cta_button(&PostingConfig::default()).unwrap();
        assert_eq!(cta.inner_text(), "Jetzt anmelden");
        let bg = cta.style.background.as_ref().unwrap();
        assert_eq!(bg.css(), "linear-gradient(135deg, #01AAD5, #1D1D1B)");
        assert_eq!(cta.style.shadow.as_deref(), Some("0 10px 40px #01AAD550"));
    }

    #[test]
    fn test_secondary_cta_is_translucent() {
        let config = PostingConfig {
            cta_mode: CtaMode::Secondary,
            ..PostingConfig::default()
        };
        let cta = cta_button(&config).unwrap();
        assert_eq!(cta.style.background, Some(Paint::solid(Color::white(0.1))));
        assert!(cta.style.shadow.is_none());
    }

    #[test]
    fn test_pill_colors_derive_from_primary() {
        let node = pill("Event", &BrandSettings::default());
        assert_eq!(
            node.style.background,
            Some(Paint::solid(Color::hex("#01AAD533")))
        );
        assert_eq!(node.style.border.as_ref().unwrap().color, Color::hex("#01AAD580"));
        assert_eq!(node.inner_text(), "Event");
    }

    #[test]
    fn test_headline_highlight_spans() {
        let node = headline(&PostingConfig::default(), 60.0, true);
        let highlights = node.find_all("highlight");
        assert_eq!(highlights.len(), 1);
        assert_eq!(highlights[0].text_content(), Some("IT KOSMOS"));
        assert_eq!(node.inner_text(), "IT KOSMOS Conference 2026");

        let flat = headline(&PostingConfig::default(), 60.0, false);
        assert!(flat.find("highlight").is_none());
        assert_eq!(flat.children.len(), 1);
    }

    #[test]
    fn test_meta_row_items() {
        let sizes = MetaSizes {
            text: 18.0,
            icon: 24.0,
            gap: 24.0,
        };
        let row = meta_row("15. März 2026 · Vienna Space Center", sizes).unwrap();
        assert_eq!(row.children.len(), 2);
        assert_eq!(row.find("meta-location").unwrap().inner_text(), "Vienna Space Center");

        let row = meta_row("Tomorrow", sizes).unwrap();
        assert!(row.find("meta-location").is_none());
        assert!(meta_row("", sizes).is_none());
    }

    #[test]
    fn test_logo_filters() {
        assert_eq!(logo_filter(LogoColor::Original), None);
        assert_eq!(logo_filter(LogoColor::White), Some("brightness(0) invert(1)"));
        assert_eq!(logo_filter(LogoColor::Black), Some("brightness(0)"));
        assert_eq!(logo_filter(LogoColor::Primary), None);
    }

    #[test]
    fn test_primary_logo_is_tinted_with_brand_color() {
        let config = PostingConfig::default().apply(&PostingPatch {
            brand: Some(BrandPatch {
                logo: Some(Some("logo.png".into())),
                logo_color: Some(LogoColor::Primary),
                primary_color: Some("#ff3366".into()),
                ..Default::default()
            }),
            ..Default::default()
        });
        let node = logo(&config);
        let tint = node.find("logo-tint").unwrap();
        assert_eq!(tint.style.background, Some(Paint::solid(Color::hex("#ff3366"))));
        assert_eq!(tint.style.mask.as_deref(), Some("logo.png"));
        let image = tint.find("logo-image").unwrap();
        assert_eq!(image.style.opacity, Some(0.0));
        assert_eq!(image.style.filter, None);

        let white = PostingConfig::default().apply(&PostingPatch {
            brand: Some(BrandPatch {
                logo: Some(Some("logo.png".into())),
                logo_color: Some(LogoColor::White),
                ..Default::default()
            }),
            ..Default::default()
        });
        assert!(logo(&white).find("logo-tint").is_none());
    }

    #[test]
    fn test_logo_variants() {
        let badge = logo(&PostingConfig::default());
        assert!(badge.find("logo-badge").is_some());
        assert_eq!(badge.inner_text(), "PKN");

        let with_image = PostingConfig::default().apply(&PostingPatch {
            logo_position: Some(LogoPosition::BottomRight),
            brand: Some(BrandPatch {
                logo: Some(Some("logo.svg".into())),
                logo_size: Some(LogoSize::Large),
                logo_background: Some(false),
                ..Default::default()
            }),
            ..Default::default()
        });
        let node = logo(&with_image);
        assert!(node.find("logo-container").is_none());
        let image = node.find("logo-image").unwrap();
        assert_eq!(image.style.height, Length::Px(128.0));
        match node.style.position {
            Position::Absolute { inset, .. } => {
                assert_eq!(inset.bottom, Some(Length::Px(48.0)));
                assert_eq!(inset.right, Some(Length::Px(48.0)));
                assert_eq!(inset.top, None);
            }
            Position::Flow => panic!("logo must be absolutely placed"),
        }
    }

    #[test]
    fn test_stat_gradients_cycle() {
        assert_eq!(stat_gradient(0), Paint::linear(90.0, [tw::CYAN_400, tw::BLUE_400]));
        assert_eq!(stat_gradient(2), Paint::linear(90.0, [tw::PURPLE_400, tw::PINK_400]));
    }
}
