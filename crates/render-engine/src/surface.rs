//! Off-screen export surfaces.
//!
//! One surface per format, composed at native size and sanitized for
//! capture. The exporter looks surfaces up by format; a missing surface is a
//! per-format failure, never a panic.

use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use pkn_common::{PknError, PknResult};
use pkn_layout::{compose, Graphic};
use pkn_posting_model::{Format, PostingConfig};

use crate::markup::document_string;
use crate::sanitize::{sanitize_for_capture, EstimatedMeasure, SanitizeReport, TextMeasure};

/// A graphic ready to be captured.
#[derive(Debug, Clone, Serialize)]
pub struct Surface {
    pub format: Format,
    pub graphic: Graphic,
    /// Standalone HTML document of the sanitized graphic.
    pub markup: String,
    pub report: SanitizeReport,
}

impl Surface {
    pub fn prepare(
        config: &PostingConfig,
        format: Format,
        measure: &dyn TextMeasure,
        background: &str,
    ) -> Self {
        let mut graphic = compose(config, format);
        let report = sanitize_for_capture(&mut graphic.root, measure);
        let markup = document_string(&graphic, background);
        debug!(
            format = format.ratio(),
            converted = report.converted_colors,
            pinned = report.pinned_nodes,
            "Prepared export surface"
        );
        Self {
            format,
            graphic,
            markup,
            report,
        }
    }

    pub fn width(&self) -> u32 {
        self.graphic.width
    }

    pub fn height(&self) -> u32 {
        self.graphic.height
    }
}

/// Surfaces keyed by format, iterated in the fixed export order.
#[derive(Debug, Clone, Default)]
pub struct ExportSurfaces {
    surfaces: BTreeMap<Format, Surface>,
}

impl ExportSurfaces {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, surface: Surface) {
        self.surfaces.insert(surface.format, surface);
    }

    pub fn get(&self, format: Format) -> PknResult<&Surface> {
        self.surfaces
            .get(&format)
            .ok_or_else(|| PknError::missing_target(format.ratio()))
    }

    pub fn remove(&mut self, format: Format) -> Option<Surface> {
        self.surfaces.remove(&format)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    pub fn formats(&self) -> Vec<Format> {
        self.surfaces.keys().copied().collect()
    }
}

/// Builds the surfaces an export run captures from.
pub trait SurfaceProvider: Send + Sync {
    fn prepare(
        &self,
        config: &PostingConfig,
        formats: &[Format],
        background: &str,
    ) -> ExportSurfaces;
}

/// Composes every requested format from the configuration.
pub struct ComposedSurfaces {
    measure: Box<dyn TextMeasure + Send + Sync>,
}

impl ComposedSurfaces {
    pub fn new() -> Self {
        Self::with_measure(EstimatedMeasure)
    }

    pub fn with_measure(measure: impl TextMeasure + Send + Sync + 'static) -> Self {
        Self {
            measure: Box::new(measure),
        }
    }
}

impl Default for ComposedSurfaces {
    fn default() -> Self {
        Self::new()
    }
}

impl SurfaceProvider for ComposedSurfaces {
    fn prepare(
        &self,
        config: &PostingConfig,
        formats: &[Format],
        background: &str,
    ) -> ExportSurfaces {
        let mut surfaces = ExportSurfaces::new();
        for &format in formats {
            surfaces.insert(Surface::prepare(
                config,
                format,
                self.measure.as_ref(),
                background,
            ));
        }
        surfaces
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BACKGROUND: &str = "#0a0118";

    #[test]
    fn test_surfaces_follow_format_order() {
        let provider = ComposedSurfaces::default();
        let surfaces = provider.prepare(
            &PostingConfig::default(),
            &[Format::Story, Format::Square, Format::Widescreen],
            BACKGROUND,
        );
        assert_eq!(
            surfaces.formats(),
            vec![Format::Square, Format::Widescreen, Format::Story]
        );
        let story = surfaces.get(Format::Story).unwrap();
        assert_eq!((story.width(), story.height()), (1080, 1920));
        assert!(story.markup.contains("height:1920px"));
    }

    #[test]
    fn test_missing_surface_is_an_error() {
        let mut surfaces =
            ComposedSurfaces::default().prepare(&PostingConfig::default(), &Format::ALL, BACKGROUND);
        assert_eq!(surfaces.len(), 5);
        assert!(surfaces.remove(Format::Portrait).is_some());
        let err = surfaces.get(Format::Portrait).unwrap_err();
        assert_eq!(err.to_string(), "Export surface not found: 3:4");
    }

    #[test]
    fn test_surface_markup_has_no_oklch() {
        let surfaces =
            ComposedSurfaces::default().prepare(&PostingConfig::default(), &Format::ALL, BACKGROUND);
        for format in surfaces.formats() {
            let surface = surfaces.get(format).unwrap();
            assert!(!surface.markup.contains("oklch("), "{format}");
        }
    }
}
