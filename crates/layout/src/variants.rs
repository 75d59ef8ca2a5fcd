//! One content layout per post type.
//!
//! Every layout fills the whole canvas and reads its format from
//! `config.format`. Dispatch is an exhaustive match, so adding a post type
//! without a layout does not compile.

use pkn_posting_model::{PostType, PostingConfig, SlideType};

use crate::components::{
    cta_button, featured_panel, glass_card, headline, icon_badge, location_row, meta_row,
    padded_top, pill_if_enabled, stat_card, subline, MetaSizes, ROUND,
};
use crate::palette::{tw, Color, Paint};
use crate::tree::{
    Align, Direction, Edges, Inset, Justify, Length, Node, Position, Style, TextAlign,
};

/// Content layer for the configuration's post type.
pub fn content(config: &PostingConfig) -> Node {
    match config.post_type {
        PostType::Event => event(config),
        PostType::Announcement => announcement(config),
        PostType::PureVisual => pure_visual(config),
        PostType::Quote => quote(config),
        PostType::Stat => stat(config),
        PostType::Service => service(config),
        PostType::Hiring => hiring(config),
        PostType::Reminder => reminder(config),
        PostType::Presentation => presentation(config),
        PostType::Carousel => carousel(config),
    }
}

fn slide_content(slide_type: SlideType, config: &PostingConfig) -> Node {
    match slide_type {
        SlideType::Event => event(config),
        SlideType::Announcement => announcement(config),
        SlideType::PureVisual => pure_visual(config),
        SlideType::Quote => quote(config),
        SlideType::Stat => stat(config),
        SlideType::Service => service(config),
        SlideType::Hiring => hiring(config),
        SlideType::Reminder => reminder(config),
        SlideType::Presentation => presentation(config),
    }
}

/// A full-size frame for a layout root.
fn canvas(style: Style) -> Node {
    Node::frame(Style {
        width: Length::Percent(100.0),
        height: Length::Percent(100.0),
        ..style
    })
}

fn centered_row(padding: Edges) -> Style {
    Style {
        direction: Direction::Row,
        align: Some(Align::Center),
        justify: Some(Justify::Center),
        padding,
        ..Style::default()
    }
}

fn centered_column(padding: Edges) -> Style {
    Style {
        justify: Some(Justify::Center),
        padding,
        ..Style::default()
    }
}

/// Push the present items, skipping omitted ones.
fn items(nodes: impl IntoIterator<Item = Option<Node>>) -> Vec<Node> {
    nodes.into_iter().flatten().collect()
}

fn cta_with_padding(config: &PostingConfig, top: f32) -> Option<Node> {
    cta_button(config).map(|cta| padded_top(cta, top))
}

fn event(config: &PostingConfig) -> Node {
    let wide = config.format.is_wide();
    let (padding, title, sub, panel) = if wide {
        (Edges::xy(48.0, 40.0), 48.0, 20.0, 300.0)
    } else {
        (Edges::xy(64.0, 48.0), 60.0, 24.0, 420.0)
    };
    let meta = if wide {
        MetaSizes {
            text: 16.0,
            icon: 20.0,
            gap: 16.0,
        }
    } else {
        MetaSizes {
            text: 18.0,
            icon: 24.0,
            gap: 24.0,
        }
    };

    let column = Node::frame(Style {
        grow: true,
        gap: 24.0,
        ..Style::default()
    })
    .with_children(items([
        pill_if_enabled(config),
        Some(headline(config, title, true)),
        Some(subline(&config.subline, sub, true)),
        meta_row(&config.meta_line, meta),
        cta_button(config),
    ]));

    let featured = config
        .featured_image
        .as_deref()
        .map(|src| featured_panel(src, panel, panel, 12.0));

    canvas(Style {
        direction: Direction::Row,
        align: Some(Align::Center),
        justify: Some(Justify::SpaceBetween),
        padding,
        gap: 40.0,
        ..Style::default()
    })
    .with_role("layout-event")
    .with_children(items([Some(column), featured]))
}

fn announcement(config: &PostingConfig) -> Node {
    let tall = config.format.is_tall();
    let mut card = glass_card(if tall { 80.0 } else { 64.0 }, 32.0);
    card.style.max_width = Some(896.0);
    card.children = items([
        pill_if_enabled(config),
        Some(headline(config, if tall { 96.0 } else { 72.0 }, true)),
        Some(subline(&config.subline, 36.0, true)),
        cta_with_padding(config, 24.0),
    ]);

    canvas(centered_column(Edges::xy(80.0, 0.0)))
        .with_role("layout-announcement")
        .with_children(vec![card])
}

fn pure_visual(config: &PostingConfig) -> Node {
    let card = (!config.headline.is_empty()).then(|| {
        let mut card = glass_card(40.0, 0.0);
        card.push(headline(config, 60.0, false));
        card
    });

    canvas(Style {
        direction: Direction::Row,
        align: Some(Align::End),
        padding: Edges::all(64.0),
        ..Style::default()
    })
    .with_role("layout-pure-visual")
    .with_children(items([card]))
}

fn quote(config: &PostingConfig) -> Node {
    let tall = config.format.is_tall();
    let statement = Node::text(
        format!("\u{201c}{}\u{201d}", config.headline),
        Style {
            font_size: Some(if tall { 60.0 } else { 48.0 }),
            font_weight: Some(700),
            italic: true,
            line_height: Some(1.25),
            color: Some(Color::white(1.0)),
            ..Style::default()
        },
    )
    .with_role("quote-text");
    let attribution = (!config.subline.is_empty()).then(|| {
        Node::text(
            format!("\u{2014} {}", config.subline),
            Style {
                font_size: Some(30.0),
                font_weight: Some(500),
                color: Some(Color::hex(config.brand.primary_color.clone())),
                ..Style::default()
            },
        )
        .with_role("subline")
    });
    let blockquote = Node::frame(Style {
        margin_top: 40.0,
        gap: 32.0,
        ..Style::default()
    })
    .with_children(items([Some(statement), attribution]));

    let mut card = glass_card(if tall { 80.0 } else { 64.0 }, 0.0);
    card.style.max_width = Some(896.0);
    card.children = items([pill_if_enabled(config), Some(blockquote)]);

    canvas(centered_row(Edges::xy(80.0, 0.0)))
        .with_role("layout-quote")
        .with_children(vec![card])
}

fn stat(config: &PostingConfig) -> Node {
    let count = config.stats_mode.card_count();
    let stats = (count > 0).then(|| {
        Node::frame(Style {
            direction: if config.format.is_tall() {
                Direction::Column
            } else {
                Direction::Row
            },
            gap: 40.0,
            ..Style::default()
        })
        .with_role("stats")
        .with_children(
            config
                .stats
                .iter()
                .take(count)
                .enumerate()
                .map(|(i, s)| stat_card(s, i))
                .collect(),
        )
    });

    let mut title = headline(config, 60.0, false);
    title.style.text_align = Some(TextAlign::Center);
    title.style.max_width = Some(768.0);

    canvas(Style {
        align: Some(Align::Center),
        justify: Some(Justify::Center),
        padding: Edges::xy(80.0, 0.0),
        gap: 64.0,
        ..Style::default()
    })
    .with_role("layout-stat")
    .with_children(items([pill_if_enabled(config), stats, Some(title)]))
}

fn service(config: &PostingConfig) -> Node {
    let mut card = glass_card(64.0, 24.0);
    card.children = items([
        pill_if_enabled(config),
        Some(headline(config, 60.0, false)),
        Some(subline(&config.subline, 24.0, false)),
        cta_with_padding(config, 16.0),
    ]);
    let column = Node::frame(Style {
        grow: true,
        ..Style::default()
    })
    .with_children(vec![card]);
    let featured = config
        .featured_image
        .as_deref()
        .map(|src| featured_panel(src, 400.0, 500.0, 16.0));

    canvas(Style {
        direction: Direction::Row,
        align: Some(Align::Center),
        padding: Edges::xy(64.0, 0.0),
        gap: 48.0,
        ..Style::default()
    })
    .with_role("layout-service")
    .with_children(items([Some(column), featured]))
}

fn hiring(config: &PostingConfig) -> Node {
    if let Some(src) = config.featured_image.as_deref() {
        let mut card = glass_card(48.0, 24.0);
        card.children = items([
            pill_if_enabled(config),
            Some(icon_badge(64.0, false)),
            Some(headline(config, 48.0, false)),
            Some(subline(&config.subline, 24.0, false)),
            location_row(&config.meta_line, &config.brand, 18.0, false),
            cta_with_padding(config, 16.0),
        ]);
        let column = Node::frame(Style {
            grow: true,
            ..Style::default()
        })
        .with_children(vec![card]);

        return canvas(Style {
            direction: Direction::Row,
            align: Some(Align::Center),
            padding: Edges::xy(64.0, 0.0),
            gap: 48.0,
            ..Style::default()
        })
        .with_role("layout-hiring")
        .with_children(vec![column, featured_panel(src, 400.0, 500.0, 16.0)]);
    }

    let mut card = glass_card(64.0, 32.0);
    card.style.max_width = Some(896.0);
    card.style.margin_auto = true;
    card.style.align = Some(Align::Center);
    card.style.text_align = Some(TextAlign::Center);
    card.children = items([
        pill_if_enabled(config),
        Some(icon_badge(80.0, true)),
        Some(headline(config, 60.0, false)),
        Some(subline(&config.subline, 30.0, false)),
        location_row(&config.meta_line, &config.brand, 20.0, true),
        cta_with_padding(config, 16.0),
    ]);

    canvas(centered_column(Edges::xy(80.0, 0.0)))
        .with_role("layout-hiring")
        .with_children(vec![card])
}

fn reminder(config: &PostingConfig) -> Node {
    let mut title = headline(config, 48.0, false);
    title.style.margin_top = 16.0;

    let mut card = glass_card(48.0, 24.0);
    card.style.max_width = Some(768.0);
    card.style.align = Some(Align::Center);
    card.style.text_align = Some(TextAlign::Center);
    card.children = items([
        pill_if_enabled(config),
        Some(title),
        (!config.subline.is_empty()).then(|| subline(&config.subline, 20.0, false)),
    ]);

    canvas(centered_row(Edges::xy(80.0, 0.0)))
        .with_role("layout-reminder")
        .with_children(vec![card])
}

fn presentation(config: &PostingConfig) -> Node {
    let mut card = glass_card(64.0, 24.0);
    card.style.max_width = Some(896.0);
    card.children = items([
        pill_if_enabled(config),
        Some(headline(config, 72.0, true)),
        Some(subline(&config.subline, 30.0, false)),
        cta_with_padding(config, 16.0),
    ]);

    canvas(centered_column(Edges::xy(80.0, 0.0)))
        .with_role("layout-presentation")
        .with_children(vec![card])
}

fn carousel_placeholder() -> Node {
    let mut card = glass_card(80.0, 24.0).with_role("carousel-empty");
    card.style.align = Some(Align::Center);
    card.style.text_align = Some(TextAlign::Center);
    card.children = vec![
        Node::text(
            "\u{1f4f1}",
            Style {
                font_size: Some(60.0),
                ..Style::default()
            },
        ),
        Node::text(
            "Keine Slides",
            Style {
                font_size: Some(36.0),
                font_weight: Some(700),
                color: Some(Color::white(1.0)),
                ..Style::default()
            },
        ),
        Node::text(
            "Slides im Carousel Manager hinzufügen",
            Style {
                font_size: Some(20.0),
                color: Some(tw::GRAY_400),
                ..Style::default()
            },
        ),
    ];

    canvas(centered_row(Edges::xy(80.0, 0.0)))
        .with_role("layout-carousel")
        .with_children(vec![card])
}

fn slide_dots(total: usize, active: usize) -> Node {
    let dots = (0..total)
        .map(|i| {
            let is_active = i == active;
            Node::frame(Style {
                width: Length::Px(if is_active { 32.0 } else { 12.0 }),
                height: Length::Px(12.0),
                radius: Some(ROUND),
                background: Some(Paint::solid(if is_active {
                    tw::CYAN_400
                } else {
                    Color::white(0.3)
                })),
                ..Style::default()
            })
            .with_role(if is_active { "dot-active" } else { "dot" })
        })
        .collect();

    let offset = Some(Length::Px(24.0));
    Node::frame(Style {
        position: Position::Absolute {
            inset: Inset {
                bottom: offset,
                right: offset,
                ..Inset::default()
            },
            centered: false,
        },
        direction: Direction::Row,
        gap: 8.0,
        ..Style::default()
    })
    .with_role("slide-dots")
    .with_children(dots)
}

fn carousel(config: &PostingConfig) -> Node {
    let (Some(index), Some(slide)) = (
        config.carousel.resolved_index(),
        config.carousel.active_slide(),
    ) else {
        return carousel_placeholder();
    };

    let slide_config = config.with_slide(slide);
    canvas(Style::default())
        .with_role("layout-carousel")
        .with_children(vec![
            slide_content(slide.slide_type, &slide_config),
            slide_dots(config.carousel.len(), index),
        ])
}
