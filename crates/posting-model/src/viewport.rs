//! Display scaling.
//!
//! Previews show a format shrunk into a fixed budget box. Export sizing is a
//! separate function of the format alone; nothing here feeds into capture.

use serde::{Deserialize, Serialize};

use crate::format::{Dimensions, Format};

/// Maximum box a scaled surface must fit into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleBudget {
    pub max_width: f64,
    pub max_height: f64,
}

impl ScaleBudget {
    /// Editor preview pane.
    pub const PREVIEW: ScaleBudget = ScaleBudget {
        max_width: 750.0,
        max_height: 570.0,
    };

    /// Format picker thumbnails.
    pub const THUMBNAIL: ScaleBudget = ScaleBudget {
        max_width: 100.0,
        max_height: 100.0,
    };

    pub const fn new(max_width: f64, max_height: f64) -> Self {
        Self {
            max_width,
            max_height,
        }
    }
}

/// Scale factor and the rounded on-screen size it produces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportScale {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
}

/// Largest factor `<= 1` that fits `width × height` into the budget.
///
/// Degenerate inputs (zero, negative or non-finite) yield `0.0`.
pub fn fit_scale(width: f64, height: f64, max_width: f64, max_height: f64) -> f64 {
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(width) && valid(height)) {
        return 0.0;
    }
    if !(max_width.is_finite() && max_height.is_finite()) || max_width <= 0.0 || max_height <= 0.0
    {
        return 0.0;
    }
    (max_width / width).min(max_height / height).min(1.0)
}

/// Scale a format into an arbitrary budget.
pub fn scale_into(format: Format, budget: ScaleBudget) -> ViewportScale {
    let Dimensions { width, height } = format.dimensions();
    let (w, h) = (f64::from(width), f64::from(height));
    let scale = fit_scale(w, h, budget.max_width, budget.max_height);
    ViewportScale {
        scale,
        width: (w * scale).round() as u32,
        height: (h * scale).round() as u32,
    }
}

pub fn preview_scale(format: Format) -> ViewportScale {
    scale_into(format, ScaleBudget::PREVIEW)
}

pub fn thumbnail_scale(format: Format) -> ViewportScale {
    scale_into(format, ScaleBudget::THUMBNAIL)
}

/// Pixel size of the exported raster: native size times the output scale.
///
/// Independent of any preview scale. Non-positive or non-finite scales
/// produce an empty size.
pub fn export_dimensions(format: Format, output_scale: f64) -> Dimensions {
    let Dimensions { width, height } = format.dimensions();
    if !output_scale.is_finite() || output_scale <= 0.0 {
        return Dimensions {
            width: 0,
            height: 0,
        };
    }
    Dimensions {
        width: (f64::from(width) * output_scale).round() as u32,
        height: (f64::from(height) * output_scale).round() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_preview_story() {
        let s = preview_scale(Format::Story);
        assert!((s.scale - 570.0 / 1920.0).abs() < 1e-9);
        assert_eq!((s.width, s.height), (321, 570));
    }

    #[test]
    fn test_preview_widescreen_is_width_bound() {
        let s = preview_scale(Format::Widescreen);
        assert!((s.scale - 0.625).abs() < 1e-9);
        assert_eq!((s.width, s.height), (750, 422));
    }

    #[test]
    fn test_thumbnail_square() {
        let s = thumbnail_scale(Format::Square);
        assert_eq!((s.width, s.height), (100, 100));
    }

    #[test]
    fn test_small_surface_is_never_enlarged() {
        assert_eq!(fit_scale(200.0, 100.0, 750.0, 570.0), 1.0);
    }

    #[test]
    fn test_degenerate_budget_yields_zero() {
        assert_eq!(fit_scale(1080.0, 1080.0, 0.0, 570.0), 0.0);
        assert_eq!(fit_scale(1080.0, 1080.0, -5.0, 570.0), 0.0);
        assert_eq!(fit_scale(1080.0, 1080.0, f64::NAN, 570.0), 0.0);
        assert_eq!(fit_scale(0.0, 1080.0, 750.0, 570.0), 0.0);
        let s = scale_into(Format::Square, ScaleBudget::new(0.0, 0.0));
        assert_eq!((s.width, s.height), (0, 0));
    }

    #[test]
    fn test_export_dimensions_ignore_preview() {
        let _ = preview_scale(Format::Story);
        let d = export_dimensions(Format::Story, 2.0);
        assert_eq!((d.width, d.height), (2160, 3840));
        let d = export_dimensions(Format::Widescreen, 1.0);
        assert_eq!((d.width, d.height), (1200, 675));
        assert_eq!(export_dimensions(Format::Square, 0.0).width, 0);
    }

    proptest! {
        #[test]
        fn prop_scaled_surface_fits_budget(
            max_w in 1.0f64..4000.0,
            max_h in 1.0f64..4000.0,
            idx in 0usize..5,
        ) {
            let format = Format::ALL[idx];
            let s = scale_into(format, ScaleBudget::new(max_w, max_h));
            prop_assert!(s.scale > 0.0);
            prop_assert!(s.scale <= 1.0);
            // Rounding may add at most half a pixel.
            prop_assert!(f64::from(s.width) <= max_w + 0.5);
            prop_assert!(f64::from(s.height) <= max_h + 0.5);
        }
    }
}
