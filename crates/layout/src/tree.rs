//! The composed visual tree.
//!
//! A [`Node`] is a box with a style and children, a run of text, an image or
//! an icon. The tree is plain data: markup generation, sanitizing and tests
//! all walk the same structure.

use serde::Serialize;

use crate::palette::{Color, Paint};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "unit", content = "value", rename_all = "lowercase")]
pub enum Length {
    #[default]
    Auto,
    Px(f32),
    Percent(f32),
}

impl Length {
    pub fn css(self) -> Option<String> {
        match self {
            Length::Auto => None,
            Length::Px(v) => Some(format!("{v}px")),
            Length::Percent(v) => Some(format!("{v}%")),
        }
    }
}

/// Offsets of an absolutely placed node. `None` sides are unset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Inset {
    pub top: Option<Length>,
    pub right: Option<Length>,
    pub bottom: Option<Length>,
    pub left: Option<Length>,
}

impl Inset {
    /// All four sides at zero.
    pub fn fill() -> Self {
        let zero = Some(Length::Px(0.0));
        Self {
            top: zero,
            right: zero,
            bottom: zero,
            left: zero,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum Position {
    /// Laid out by the parent.
    #[default]
    Flow,
    Absolute {
        inset: Inset,
        /// Shift by half of its own size on both axes.
        centered: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Row,
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Align {
    Start,
    Center,
    End,
    Stretch,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Justify {
    Start,
    Center,
    End,
    SpaceBetween,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn all(v: f32) -> Self {
        Self {
            top: v,
            right: v,
            bottom: v,
            left: v,
        }
    }

    pub const fn xy(x: f32, y: f32) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0.0 && self.right == 0.0 && self.bottom == 0.0 && self.left == 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

/// Box and text styling. Every field has a neutral default.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct Style {
    pub position: Position,
    pub z_index: Option<i32>,
    pub width: Length,
    pub height: Length,
    pub min_width: Option<f32>,
    pub max_width: Option<f32>,
    /// Take the remaining space of a flow parent.
    pub grow: bool,
    /// Keep the declared width when the parent runs out of space.
    pub no_shrink: bool,
    pub direction: Direction,
    pub gap: f32,
    pub padding: Edges,
    pub margin_top: f32,
    /// Center horizontally inside the parent.
    pub margin_auto: bool,
    pub align: Option<Align>,
    pub justify: Option<Justify>,
    pub wrap: bool,
    pub overflow_hidden: bool,

    pub background: Option<Paint>,
    /// Paint the background through the glyphs instead of the box.
    pub clip_text: bool,
    pub border: Option<Border>,
    pub radius: Option<f32>,
    pub shadow: Option<String>,
    pub opacity: Option<f32>,
    /// Gaussian blur of the node itself, in pixels.
    pub blur: Option<f32>,
    pub backdrop_blur: Option<f32>,
    /// Free CSS filter chain, e.g. `brightness(0.7)`.
    pub filter: Option<String>,
    /// Image whose alpha masks the node, stretched over its box.
    pub mask: Option<String>,
    pub cover: bool,

    pub font_family: Option<String>,
    pub font_size: Option<f32>,
    pub font_weight: Option<u16>,
    pub italic: bool,
    pub uppercase: bool,
    /// In `em`.
    pub letter_spacing: Option<f32>,
    pub line_height: Option<f32>,
    pub text_align: Option<TextAlign>,
    pub color: Option<Color>,

    /// Measured width written by the pre-capture pass.
    pub pinned_width: Option<f32>,
}

/// Line-art icons used by the layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Icon {
    ArrowRight,
    Calendar,
    MapPin,
    Users,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum NodeKind {
    Frame,
    Text { content: String },
    Image { src: String },
    Icon { icon: Icon },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Node {
    /// Short role tag, e.g. `"pill"`, `"headline"`. Used by tests and markup.
    pub role: Option<&'static str>,
    #[serde(flatten)]
    pub kind: NodeKind,
    pub style: Style,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Node {
    pub fn frame(style: Style) -> Self {
        Self {
            role: None,
            kind: NodeKind::Frame,
            style,
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>, style: Style) -> Self {
        Self {
            role: None,
            kind: NodeKind::Text {
                content: content.into(),
            },
            style,
            children: Vec::new(),
        }
    }

    pub fn image(src: impl Into<String>, style: Style) -> Self {
        Self {
            role: None,
            kind: NodeKind::Image { src: src.into() },
            style,
            children: Vec::new(),
        }
    }

    pub fn icon(icon: Icon, size: f32, color: Option<Color>) -> Self {
        Self {
            role: None,
            kind: NodeKind::Icon { icon },
            style: Style {
                width: Length::Px(size),
                height: Length::Px(size),
                color,
                ..Style::default()
            },
            children: Vec::new(),
        }
    }

    pub fn with_role(mut self, role: &'static str) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Text content if this is a text node.
    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Text { content } => Some(content),
            _ => None,
        }
    }

    /// Depth-first, pre-order.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn walk_mut(&mut self, visit: &mut impl FnMut(&mut Node)) {
        visit(self);
        for child in &mut self.children {
            child.walk_mut(visit);
        }
    }

    /// All nodes carrying `role`, in document order.
    pub fn find_all(&self, role: &str) -> Vec<&Node> {
        let mut found = Vec::new();
        self.walk(&mut |n| {
            if n.role == Some(role) {
                found.push(n);
            }
        });
        found
    }

    pub fn find(&self, role: &str) -> Option<&Node> {
        self.find_all(role).into_iter().next()
    }

    /// Concatenated text of this subtree.
    pub fn inner_text(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |n| {
            if let Some(t) = n.text_content() {
                out.push_str(t);
            }
        });
        out
    }

    pub fn count(&self) -> usize {
        let mut n = 0;
        self.walk(&mut |_| n += 1);
        n
    }
}
