//! Carousel slides.
//!
//! A carousel posting renders one slide at a time. Each slide carries its
//! own type, media and copy; everything else (brand, toggles, format) comes
//! from the parent configuration.

use serde::{Deserialize, Serialize};

use crate::posting::{Backdrop, SlideType};

/// One independent content/media bundle inside a carousel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Slide {
    pub id: String,
    pub slide_type: SlideType,
    pub backdrop: Backdrop,
    pub headline: String,
    pub subline: String,
    pub pill_label: String,
    pub cta_label: String,
    pub meta_line: String,
    pub featured_image: Option<String>,
}

impl Slide {
    pub fn new(id: impl Into<String>, slide_type: SlideType, headline: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            slide_type,
            headline: headline.into(),
            ..Self::default()
        }
    }
}

/// Ordered slides plus the current-slide pointer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Carousel {
    pub slides: Vec<Slide>,
    pub current_index: usize,
}

impl Carousel {
    pub fn new(slides: Vec<Slide>, current_index: usize) -> Self {
        Self {
            slides,
            current_index,
        }
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the slide that renders.
    ///
    /// `None` for an empty carousel. An index past the end clamps to the
    /// last slide.
    pub fn resolved_index(&self) -> Option<usize> {
        if self.slides.is_empty() {
            return None;
        }
        Some(self.current_index.min(self.slides.len() - 1))
    }

    pub fn active_slide(&self) -> Option<&Slide> {
        self.resolved_index().map(|i| &self.slides[i])
    }
}
