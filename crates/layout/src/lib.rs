//! PKN Layout — the graphic composer
//!
//! Turns a posting configuration into a visual tree:
//! - **Star field:** Deterministic star positions from index hashing
//! - **Text rules:** Highlight splitting and meta line parsing
//! - **Components:** Pill, CTA, glass card, logo, stat cards
//! - **Variants:** One layout per post type, dispatched exhaustively
//!
//! This crate is pure computation. Markup and capture live in the render
//! engine.

pub mod background;
pub mod components;
pub mod compose;
pub mod palette;
pub mod starfield;
pub mod text;
pub mod tree;
pub mod variants;

pub use compose::{compose, Graphic};
pub use palette::{Color, Paint};
pub use starfield::{star_at, star_positions, Star};
pub use text::{parse_meta_line, split_highlight, HeadlineSpan, MetaLine};
pub use tree::{Node, NodeKind, Style};
