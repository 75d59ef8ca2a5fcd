//! Colors and paints.
//!
//! Fixed accent colors come from the utility palette the graphics were
//! designed with, which is defined in OKLCH. Brand colors arrive as hex
//! strings from the configuration.

use serde::Serialize;

/// A single color value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "space", rename_all = "lowercase")]
pub enum Color {
    /// `#rgb`, `#rrggbb` or `#rrggbbaa`, passed through verbatim.
    Hex { value: String },
    Rgba { r: u8, g: u8, b: u8, a: f32 },
    /// Lightness in `[0, 1]`, chroma, hue in degrees.
    Oklch { l: f32, c: f32, h: f32, alpha: f32 },
}

impl Color {
    pub fn hex(value: impl Into<String>) -> Self {
        Color::Hex {
            value: value.into(),
        }
    }

    /// Hex color with a two-digit alpha suffix appended, e.g. `#01AAD5` + `33`.
    pub fn hex_alpha(value: &str, alpha_hex: &str) -> Self {
        Color::Hex {
            value: format!("{value}{alpha_hex}"),
        }
    }

    pub const fn white(a: f32) -> Self {
        Color::Rgba {
            r: 255,
            g: 255,
            b: 255,
            a,
        }
    }

    pub const fn black(a: f32) -> Self {
        Color::Rgba { r: 0, g: 0, b: 0, a }
    }

    const fn oklch(l: f32, c: f32, h: f32) -> Self {
        Color::Oklch {
            l,
            c,
            h,
            alpha: 1.0,
        }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        match self {
            Color::Oklch { l, c, h, .. } => Color::Oklch { l, c, h, alpha },
            Color::Rgba { r, g, b, .. } => Color::Rgba { r, g, b, a: alpha },
            hex => hex,
        }
    }

    pub fn is_oklch(&self) -> bool {
        matches!(self, Color::Oklch { .. })
    }

    /// sRGB equivalent. Out-of-gamut channels are clipped.
    pub fn to_rgba(&self) -> Color {
        match *self {
            Color::Oklch { l, c, h, alpha } => {
                let [r, g, b] = oklch_to_srgb(f64::from(l), f64::from(c), f64::from(h));
                Color::Rgba { r, g, b, a: alpha }
            }
            ref other => other.clone(),
        }
    }

    pub fn css(&self) -> String {
        match self {
            Color::Hex { value } => value.clone(),
            Color::Rgba { r, g, b, a } => format!("rgba({r}, {g}, {b}, {a})"),
            Color::Oklch { l, c, h, alpha } => {
                let l = (l * 1000.0).round() / 10.0;
                if (*alpha - 1.0).abs() < f32::EPSILON {
                    format!("oklch({l}% {c} {h})")
                } else {
                    format!("oklch({l}% {c} {h} / {alpha})")
                }
            }
        }
    }
}

fn oklch_to_srgb(l: f64, c: f64, h: f64) -> [u8; 3] {
    let (sin, cos) = h.to_radians().sin_cos();
    let (a, b) = (c * cos, c * sin);

    let l_ = l + 0.396_337_777_4 * a + 0.215_803_757_3 * b;
    let m_ = l - 0.105_561_345_8 * a - 0.063_854_172_8 * b;
    let s_ = l - 0.089_484_177_5 * a - 1.291_485_548_0 * b;
    let (l3, m3, s3) = (l_.powi(3), m_.powi(3), s_.powi(3));

    let linear = [
        4.076_741_662_1 * l3 - 3.307_711_591_3 * m3 + 0.230_969_929_2 * s3,
        -1.268_438_004_6 * l3 + 2.609_757_401_1 * m3 - 0.341_319_396_5 * s3,
        -0.004_196_086_3 * l3 - 0.703_418_614_7 * m3 + 1.707_614_701_0 * s3,
    ];

    linear.map(|v| {
        let v = v.clamp(0.0, 1.0);
        let encoded = if v <= 0.003_130_8 {
            12.92 * v
        } else {
            1.055 * v.powf(1.0 / 2.4) - 0.055
        };
        (encoded * 255.0).round().clamp(0.0, 255.0) as u8
    })
}

/// Utility palette entries used by the layouts.
pub mod tw {
    use super::Color;

    pub const GRAY_300: Color = Color::oklch(0.872, 0.01, 258.338);
    pub const GRAY_400: Color = Color::oklch(0.707, 0.022, 261.325);
    pub const CYAN_400: Color = Color::oklch(0.789, 0.154, 211.53);
    pub const CYAN_500: Color = Color::oklch(0.715, 0.143, 215.221);
    pub const BLUE_400: Color = Color::oklch(0.707, 0.165, 254.624);
    pub const BLUE_600: Color = Color::oklch(0.546, 0.245, 262.881);
    pub const PURPLE_400: Color = Color::oklch(0.714, 0.203, 305.504);
    pub const PURPLE_600: Color = Color::oklch(0.558, 0.288, 302.321);
    pub const PINK_400: Color = Color::oklch(0.718, 0.202, 349.761);
}

/// One gradient stop; `at` is a percentage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stop {
    pub color: Color,
    pub at: Option<f32>,
}

/// A background fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid { color: Color },
    /// Directional gradient; the angle follows CSS (`90` = to the right).
    LinearGradient { angle: f32, stops: Vec<Stop> },
    /// Raw CSS background supplied by the user.
    Css { value: String },
}

impl Paint {
    pub fn solid(color: Color) -> Self {
        Paint::Solid { color }
    }

    /// Evenly spaced stops.
    pub fn linear(angle: f32, colors: impl IntoIterator<Item = Color>) -> Self {
        Paint::LinearGradient {
            angle,
            stops: colors
                .into_iter()
                .map(|color| Stop { color, at: None })
                .collect(),
        }
    }

    pub fn css_value(value: impl Into<String>) -> Self {
        Paint::Css {
            value: value.into(),
        }
    }

    pub fn is_gradient(&self) -> bool {
        match self {
            Paint::LinearGradient { .. } => true,
            Paint::Css { value } => value.contains("gradient("),
            Paint::Solid { .. } => false,
        }
    }

    pub fn css(&self) -> String {
        match self {
            Paint::Solid { color } => color.css(),
            Paint::LinearGradient { angle, stops } => {
                let stops: Vec<String> = stops
                    .iter()
                    .map(|s| match s.at {
                        Some(at) => format!("{} {at}%", s.color.css()),
                        None => s.color.css(),
                    })
                    .collect();
                format!("linear-gradient({angle}deg, {})", stops.join(", "))
            }
            Paint::Css { value } => value.clone(),
        }
    }

    /// Apply `f` to every color in the paint.
    pub fn map_colors(&self, mut f: impl FnMut(&Color) -> Color) -> Paint {
        match self {
            Paint::Solid { color } => Paint::Solid { color: f(color) },
            Paint::LinearGradient { angle, stops } => Paint::LinearGradient {
                angle: *angle,
                stops: stops
                    .iter()
                    .map(|s| Stop {
                        color: f(&s.color),
                        at: s.at,
                    })
                    .collect(),
            },
            Paint::Css { value } => Paint::Css {
                value: value.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oklch_extremes_map_to_black_and_white() {
        let white = Color::Oklch {
            l: 1.0,
            c: 0.0,
            h: 0.0,
            alpha: 1.0,
        };
        assert_eq!(
            white.to_rgba(),
            Color::Rgba {
                r: 255,
                g: 255,
                b: 255,
                a: 1.0
            }
        );
        let black = Color::Oklch {
            l: 0.0,
            c: 0.0,
            h: 0.0,
            alpha: 0.5,
        };
        assert_eq!(black.to_rgba(), Color::black(0.5));
    }

    #[test]
    fn test_cyan_converts_close_to_reference() {
        // cyan-500 is roughly #00b8db.
        let Color::Rgba { r, g, b, .. } = tw::CYAN_500.to_rgba() else {
            panic!("expected rgba");
        };
        assert!(r < 20, "r = {r}");
        assert!((170..=195).contains(&g), "g = {g}");
        assert!((205..=230).contains(&b), "b = {b}");
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(Color::white(0.3).css(), "rgba(255, 255, 255, 0.3)");
        assert_eq!(Color::hex_alpha("#01AAD5", "33").css(), "#01AAD533");
        assert_eq!(tw::CYAN_400.css(), "oklch(78.9% 0.154 211.53)");
        let paint = Paint::linear(135.0, [Color::hex("#01AAD5"), Color::hex("#1D1D1B")]);
        assert_eq!(paint.css(), "linear-gradient(135deg, #01AAD5, #1D1D1B)");
        assert!(paint.is_gradient());
        assert!(!Paint::solid(Color::black(0.4)).is_gradient());
    }
}
