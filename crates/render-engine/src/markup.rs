//! Standalone surface markup.
//!
//! A composed graphic is serialized into a self-contained HTML document. The
//! graphic root sits at the fixed `(0, 0)` anchor with its exact pixel size,
//! so a capture clip of `(0, 0, width, height)` covers it precisely.

use std::fmt::Write as _;

use maud::{html, Markup, PreEscaped, DOCTYPE};

use pkn_layout::tree::{
    Align, Direction, Icon, Justify, Length, Node, NodeKind, Position, Style, TextAlign,
};
use pkn_layout::Graphic;

/// Element id of the graphic root.
pub const SURFACE_ID: &str = "pkn-surface";

const DEFAULT_BACKGROUND: &str = "#0a0118";

/// How a node is placed relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Root,
    Block,
    /// A run inside a text container.
    Inline,
}

/// Render the full document for a graphic.
pub fn render_document(graphic: &Graphic, background: &str) -> Markup {
    let background = if is_css_color(background) {
        background
    } else {
        tracing::warn!(background, "Ignoring invalid page background");
        DEFAULT_BACKGROUND
    };
    let page_css = format!(
        "*{{box-sizing:border-box;margin:0;padding:0}}\
         html,body{{width:{w}px;height:{h}px;margin:0;overflow:hidden;background:{background}}}",
        w = graphic.width,
        h = graphic.height,
    );

    html! {
        (DOCTYPE)
        html lang="de" {
            head {
                meta charset="UTF-8";
                title { "PKN " (graphic.format.ratio()) }
                style { (PreEscaped(page_css)) }
            }
            body {
                (render_node(&graphic.root, Placement::Root))
            }
        }
    }
}

/// Document as a string.
pub fn document_string(graphic: &Graphic, background: &str) -> String {
    render_document(graphic, background).into_string()
}

fn is_text_container(node: &Node) -> bool {
    !node.children.is_empty()
        && node
            .children
            .iter()
            .all(|c| matches!(c.kind, NodeKind::Text { .. }))
}

fn render_node(node: &Node, placement: Placement) -> Markup {
    let css = style_css(node, placement);
    let pinned = node.style.pinned_width.is_some();
    let id = (placement == Placement::Root).then_some(SURFACE_ID);

    match &node.kind {
        NodeKind::Frame => {
            let child_placement = if is_text_container(node) {
                Placement::Inline
            } else {
                Placement::Block
            };
            html! {
                div id=[id] data-role=[node.role] data-pin[pinned] style=(css) {
                    @for child in &node.children {
                        (render_node(child, child_placement))
                    }
                }
            }
        }
        NodeKind::Text { content } => html! {
            span data-role=[node.role] data-pin[pinned] style=(css) { (content) }
        },
        NodeKind::Image { src } => html! {
            img data-role=[node.role] src=(src) alt="" style=(css);
        },
        NodeKind::Icon { icon } => icon_svg(*icon, &css),
    }
}

fn icon_svg(icon: Icon, css: &str) -> Markup {
    let paths = match icon {
        Icon::ArrowRight => r#"<path d="M5 12h14"/><path d="m12 5 7 7-7 7"/>"#,
        Icon::Calendar => {
            r#"<path d="M8 2v4"/><path d="M16 2v4"/><rect width="18" height="18" x="3" y="4" rx="2"/><path d="M3 10h18"/>"#
        }
        Icon::MapPin => {
            r#"<path d="M20 10c0 4.993-5.539 10.193-7.399 11.799a1 1 0 0 1-1.202 0C9.539 20.193 4 14.993 4 10a8 8 0 0 1 16 0"/><circle cx="12" cy="10" r="3"/>"#
        }
        Icon::Users => {
            r#"<path d="M16 21v-2a4 4 0 0 0-4-4H6a4 4 0 0 0-4 4v2"/><circle cx="9" cy="7" r="4"/><path d="M22 21v-2a4 4 0 0 0-3-3.87"/><path d="M16 3.13a4 4 0 0 1 0 7.75"/>"#
        }
    };
    html! {
        svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round"
            stroke-linejoin="round" style=(css) {
            (PreEscaped(paths))
        }
    }
}

/// Inline CSS for a node.
fn style_css(node: &Node, placement: Placement) -> String {
    let s = &node.style;
    let mut css = String::new();
    let mut decl = |name: &str, value: &str| {
        let _ = write!(css, "{name}:{value};");
    };

    match (placement, s.position) {
        (Placement::Root, _) => {
            decl("position", "fixed");
            decl("top", "0");
            decl("left", "0");
        }
        (_, Position::Flow) => decl("position", "relative"),
        (_, Position::Absolute { inset, centered }) => {
            decl("position", "absolute");
            for (side, value) in [
                ("top", inset.top),
                ("right", inset.right),
                ("bottom", inset.bottom),
                ("left", inset.left),
            ] {
                if let Some(offset) = value.and_then(Length::css) {
                    decl(side, &offset);
                }
            }
            if centered {
                decl("transform", "translate(-50%, -50%)");
            }
        }
    }

    match (&node.kind, placement) {
        (NodeKind::Frame, _) if is_text_container(node) => decl("display", "block"),
        (NodeKind::Frame, _) => {
            decl("display", "flex");
            decl(
                "flex-direction",
                match s.direction {
                    Direction::Row => "row",
                    Direction::Column => "column",
                },
            );
            let align = match (s.align, s.direction) {
                (Some(a), _) => Some(align_css(a)),
                (None, Direction::Column) => Some("flex-start"),
                (None, Direction::Row) => None,
            };
            if let Some(align) = align {
                decl("align-items", align);
            }
            if let Some(justify) = s.justify {
                decl("justify-content", justify_css(justify));
            }
            if s.wrap {
                decl("flex-wrap", "wrap");
            }
            if s.gap > 0.0 {
                decl("gap", &format!("{}px", s.gap));
            }
        }
        (NodeKind::Text { .. }, Placement::Inline) if s.pinned_width.is_some() => {
            decl("display", "inline-block")
        }
        (NodeKind::Text { .. }, Placement::Inline) => {}
        (NodeKind::Image { .. }, _) | (NodeKind::Text { .. }, _) => decl("display", "block"),
        (NodeKind::Icon { .. }, _) => decl("flex-shrink", "0"),
    }

    if let Some(z) = s.z_index {
        decl("z-index", &z.to_string());
    }
    match s.pinned_width {
        Some(w) => decl("width", &format!("{w}px")),
        None => {
            if let Some(w) = s.width.css() {
                decl("width", &w);
            }
        }
    }
    if let Some(h) = s.height.css() {
        decl("height", &h);
    }
    if let Some(w) = s.min_width {
        decl("min-width", &format!("{w}px"));
    }
    if let Some(w) = s.max_width {
        decl("max-width", &format!("{w}px"));
    }
    if s.grow {
        decl("flex", "1 1 0%");
    }
    if s.no_shrink {
        decl("flex-shrink", "0");
    }
    if !s.padding.is_zero() {
        let p = s.padding;
        decl(
            "padding",
            &format!("{}px {}px {}px {}px", p.top, p.right, p.bottom, p.left),
        );
    }
    if s.margin_top > 0.0 {
        decl("margin-top", &format!("{}px", s.margin_top));
    }
    if s.margin_auto {
        decl("margin-left", "auto");
        decl("margin-right", "auto");
    }
    if s.overflow_hidden {
        decl("overflow", "hidden");
    }

    paint_css(s, &mut decl);
    text_css(s, &mut decl);
    css
}

fn paint_css(s: &Style, decl: &mut impl FnMut(&str, &str)) {
    if let Some(bg) = &s.background {
        decl("background", &bg.css());
        if s.clip_text {
            decl("-webkit-background-clip", "text");
            decl("background-clip", "text");
            decl("-webkit-text-fill-color", "transparent");
            decl("color", "transparent");
        }
    }
    if let Some(border) = &s.border {
        decl(
            "border",
            &format!("{}px solid {}", border.width, border.color.css()),
        );
    }
    if let Some(r) = s.radius {
        decl("border-radius", &format!("{r}px"));
    }
    if let Some(shadow) = &s.shadow {
        decl("box-shadow", shadow);
    }
    if let Some(o) = s.opacity {
        decl("opacity", &o.to_string());
    }
    let filter = match (s.blur, &s.filter) {
        (Some(b), Some(f)) => Some(format!("blur({b}px) {f}")),
        (Some(b), None) => Some(format!("blur({b}px)")),
        (None, Some(f)) => Some(f.clone()),
        (None, None) => None,
    };
    if let Some(filter) = filter {
        decl("filter", &filter);
    }
    if let Some(b) = s.backdrop_blur {
        decl("backdrop-filter", &format!("blur({b}px)"));
    }
    if let Some(src) = &s.mask {
        let image = css_url(src);
        for prefix in ["-webkit-", ""] {
            decl(&format!("{prefix}mask-image"), &image);
            decl(&format!("{prefix}mask-size"), "100% 100%");
            decl(&format!("{prefix}mask-repeat"), "no-repeat");
        }
    }
    if s.cover {
        decl("object-fit", "cover");
    }
}

/// Quoted CSS `url()` with the characters that would end the string encoded.
fn css_url(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + 7);
    out.push_str("url('");
    for ch in src.chars() {
        match ch {
            '\'' => out.push_str("%27"),
            '\\' => out.push_str("%5C"),
            '\n' | '\r' => {}
            _ => out.push(ch),
        }
    }
    out.push_str("')");
    out
}

/// Whether `value` is safe to place in a stylesheet as a color.
fn is_css_color(value: &str) -> bool {
    !value.is_empty()
        && value.chars().all(|c| {
            c.is_ascii_alphanumeric() || matches!(c, '#' | '(' | ')' | ',' | '.' | '%' | ' ' | '-' | '/')
        })
}

fn text_css(s: &Style, decl: &mut impl FnMut(&str, &str)) {
    if let Some(family) = &s.font_family {
        decl("font-family", &format!("'{family}', sans-serif"));
    }
    if let Some(size) = s.font_size {
        decl("font-size", &format!("{size}px"));
    }
    if let Some(weight) = s.font_weight {
        decl("font-weight", &weight.to_string());
    }
    if s.italic {
        decl("font-style", "italic");
    }
    if s.uppercase {
        decl("text-transform", "uppercase");
    }
    if let Some(spacing) = s.letter_spacing {
        decl("letter-spacing", &format!("{spacing}em"));
    }
    if let Some(lh) = s.line_height {
        decl("line-height", &lh.to_string());
    }
    if let Some(align) = s.text_align {
        decl(
            "text-align",
            match align {
                TextAlign::Left => "left",
                TextAlign::Center => "center",
            },
        );
    }
    if !s.clip_text {
        if let Some(color) = &s.color {
            decl("color", &color.css());
        }
    }
}

fn align_css(align: Align) -> &'static str {
    match align {
        Align::Start => "flex-start",
        Align::Center => "center",
        Align::End => "flex-end",
        Align::Stretch => "stretch",
    }
}

fn justify_css(justify: Justify) -> &'static str {
    match justify {
        Justify::Start => "flex-start",
        Justify::Center => "center",
        Justify::End => "flex-end",
        Justify::SpaceBetween => "space-between",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkn_layout::compose;
    use pkn_posting_model::{Format, PostingConfig};

    #[test]
    fn test_root_is_anchored_with_exact_size() {
        let graphic = compose(&PostingConfig::default(), Format::Story);
        let html = document_string(&graphic, "#0a0118");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"id="pkn-surface""#));
        assert!(html.contains("position:fixed;top:0;left:0;"));
        assert!(html.contains("width:1080px;height:1920px;"));
        assert!(html.contains("html,body{width:1080px;height:1920px;"));
    }

    #[test]
    fn test_text_is_escaped() {
        let config = PostingConfig {
            headline: "<script>alert(1)</script>".into(),
            highlight_enabled: false,
            ..PostingConfig::default()
        };
        let html = document_string(&compose(&config, Format::Square), "#000");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_headline_renders_inline_runs() {
        let graphic = compose(&PostingConfig::default(), Format::Square);
        let headline = graphic.root.find("headline").unwrap();
        let css = style_css(headline, Placement::Block);
        assert!(css.contains("display:block;"));
        let highlight = headline.find("highlight").unwrap();
        let css = style_css(highlight, Placement::Inline);
        assert!(!css.contains("display:"));
        assert!(css.contains("background-clip:text;"));
    }

    #[test]
    fn test_background_cannot_leave_the_stylesheet() {
        let graphic = compose(&PostingConfig::default(), Format::Square);
        let html = document_string(&graphic, "red}</style><script>x()</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("background:#0a0118}"));

        let html = document_string(&graphic, "rgba(10, 1, 24, 0.9)");
        assert!(html.contains("background:rgba(10, 1, 24, 0.9)}"));
    }

    #[test]
    fn test_mask_is_quoted_url() {
        let mut node = Node::frame(Style {
            mask: Some("it's\\logo.png".into()),
            ..Style::default()
        });
        node.role = Some("logo-tint");
        let css = style_css(&node, Placement::Block);
        assert!(css.contains("mask-image:url('it%27s%5Clogo.png');"));
        assert!(css.contains("-webkit-mask-size:100% 100%;"));
    }

    #[test]
    fn test_icons_render_as_svg() {
        let graphic = compose(&PostingConfig::default(), Format::Square);
        let html = document_string(&graphic, "#0a0118");
        assert!(html.contains("<svg"));
        assert!(html.contains(r#"stroke="currentColor""#));
    }
}
