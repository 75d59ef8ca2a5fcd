//! Pre-capture pass over a composed tree.
//!
//! The rasterizer cannot parse the OKLCH color space and loses the measured
//! width of gradient-filled boxes. Before capture every OKLCH color is
//! rewritten to sRGB, raw CSS paints that still mention `oklch(` are
//! dropped, and auto-width gradient boxes get their intrinsic width pinned.

use pkn_layout::palette::{Color, Paint};
use pkn_layout::tree::{Direction, Length, Node, NodeKind, Position};
use serde::Serialize;

/// Approximate advance width of rendered text.
pub trait TextMeasure {
    fn text_width(&self, text: &str, font_size: f32, weight: u16, letter_spacing_em: f32) -> f32;
}

/// Glyph-count estimate used when no font metrics are available.
#[derive(Debug, Clone, Copy, Default)]
pub struct EstimatedMeasure;

impl TextMeasure for EstimatedMeasure {
    fn text_width(&self, text: &str, font_size: f32, weight: u16, letter_spacing_em: f32) -> f32 {
        let advance = if weight >= 600 { 0.6 } else { 0.56 };
        let glyphs = text.chars().count() as f32;
        glyphs * font_size * (advance + letter_spacing_em)
    }
}

/// What the pass changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SanitizeReport {
    pub converted_colors: usize,
    pub dropped_paints: usize,
    pub pinned_nodes: usize,
}

const DEFAULT_FONT_SIZE: f32 = 16.0;
const DEFAULT_WEIGHT: u16 = 400;

#[derive(Debug, Clone, Copy)]
struct Inherited {
    font_size: f32,
    weight: u16,
    letter_spacing: f32,
}

impl Inherited {
    fn root() -> Self {
        Self {
            font_size: DEFAULT_FONT_SIZE,
            weight: DEFAULT_WEIGHT,
            letter_spacing: 0.0,
        }
    }

    fn descend(self, node: &Node) -> Self {
        let s = &node.style;
        Self {
            font_size: s.font_size.unwrap_or(self.font_size),
            weight: s.font_weight.unwrap_or(self.weight),
            letter_spacing: s.letter_spacing.unwrap_or(self.letter_spacing),
        }
    }
}

/// Rewrite `root` in place so it captures faithfully.
pub fn sanitize_for_capture(root: &mut Node, measure: &dyn TextMeasure) -> SanitizeReport {
    let mut report = SanitizeReport::default();
    convert_colors(root, &mut report);
    pin_widths(root, Inherited::root(), measure, &mut report);
    report
}

fn convert_colors(root: &mut Node, report: &mut SanitizeReport) {
    root.walk_mut(&mut |node| {
        let s = &mut node.style;
        let mut convert = |color: &Color| {
            if color.is_oklch() {
                report.converted_colors += 1;
                color.to_rgba()
            } else {
                color.clone()
            }
        };

        if let Some(color) = s.color.as_ref().map(&mut convert) {
            s.color = Some(color);
        }
        if let Some(border) = s.border.as_mut() {
            border.color = convert(&border.color);
        }

        let oklch_css = |value: &str| value.contains("oklch(");
        s.background = match s.background.take() {
            Some(Paint::Css { value }) if oklch_css(&value) => {
                report.dropped_paints += 1;
                None
            }
            Some(paint) => Some(paint.map_colors(|c| {
                if c.is_oklch() {
                    report.converted_colors += 1;
                    c.to_rgba()
                } else {
                    c.clone()
                }
            })),
            None => None,
        };
        if s.shadow.as_deref().is_some_and(oklch_css) {
            s.shadow = None;
            report.dropped_paints += 1;
        }
    });
}

fn needs_pin(node: &Node) -> bool {
    let s = &node.style;
    let stretched = matches!(
        s.position,
        Position::Absolute { inset, .. } if inset.left.is_some() && inset.right.is_some()
    );
    s.background.as_ref().is_some_and(Paint::is_gradient)
        && s.width == Length::Auto
        && s.pinned_width.is_none()
        && !s.grow
        && !stretched
}

fn pin_widths(
    node: &mut Node,
    inherited: Inherited,
    measure: &dyn TextMeasure,
    report: &mut SanitizeReport,
) {
    let own = inherited.descend(node);
    if needs_pin(node) {
        node.style.pinned_width = Some(intrinsic_width(node, inherited, measure));
        report.pinned_nodes += 1;
    }
    for child in &mut node.children {
        pin_widths(child, own, measure, report);
    }
}

/// Border-box width the node would take without a width constraint.
fn intrinsic_width(node: &Node, inherited: Inherited, measure: &dyn TextMeasure) -> f32 {
    let s = &node.style;
    if let Some(w) = s.pinned_width {
        return w;
    }
    if let Length::Px(w) = s.width {
        return w;
    }

    let own = inherited.descend(node);
    let chrome =
        s.padding.left + s.padding.right + s.border.as_ref().map_or(0.0, |b| b.width * 2.0);

    let content = match &node.kind {
        NodeKind::Text { content } => {
            measure.text_width(content, own.font_size, own.weight, own.letter_spacing)
        }
        NodeKind::Icon { .. } | NodeKind::Image { .. } => 0.0,
        NodeKind::Frame => {
            let flow: Vec<f32> = node
                .children
                .iter()
                .filter(|c| matches!(c.style.position, Position::Flow))
                .map(|c| intrinsic_width(c, own, measure))
                .collect();
            let inline = node
                .children
                .iter()
                .all(|c| matches!(c.kind, NodeKind::Text { .. }));
            if s.direction == Direction::Row || (inline && !flow.is_empty()) {
                let gaps = if inline {
                    0.0
                } else {
                    s.gap * flow.len().saturating_sub(1) as f32
                };
                flow.iter().sum::<f32>() + gaps
            } else {
                flow.iter().copied().fold(0.0, f32::max)
            }
        }
    };

    let width = chrome + content;
    let width = s.min_width.map_or(width, |min| width.max(min));
    let width = s.max_width.map_or(width, |max| width.min(max));
    width.ceil()
}
