//! Output formats.
//!
//! The format table is fixed and load-bearing: layout, preview scaling and
//! capture all read their pixel sizes from here and nowhere else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One of the five supported aspect ratios.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
pub enum Format {
    /// 1:1, 1080 × 1080.
    #[serde(rename = "1:1")]
    #[default]
    Square,
    /// 4:3, 1200 × 900.
    #[serde(rename = "4:3")]
    Landscape,
    /// 3:4, 900 × 1200.
    #[serde(rename = "3:4")]
    Portrait,
    /// 16:9, 1200 × 675.
    #[serde(rename = "16:9")]
    Widescreen,
    /// 9:16, 1080 × 1920.
    #[serde(rename = "9:16")]
    Story,
}

/// Exact pixel size of a format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Coarse shape class used by layouts that branch on format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// 16:9 and 4:3.
    Wide,
    /// 9:16 and 3:4.
    Tall,
    /// 1:1.
    Square,
}

impl Format {
    /// All formats in the fixed export order.
    pub const ALL: [Format; 5] = [
        Format::Square,
        Format::Landscape,
        Format::Portrait,
        Format::Widescreen,
        Format::Story,
    ];

    pub const fn dimensions(self) -> Dimensions {
        match self {
            Format::Square => Dimensions {
                width: 1080,
                height: 1080,
            },
            Format::Landscape => Dimensions {
                width: 1200,
                height: 900,
            },
            Format::Portrait => Dimensions {
                width: 900,
                height: 1200,
            },
            Format::Widescreen => Dimensions {
                width: 1200,
                height: 675,
            },
            Format::Story => Dimensions {
                width: 1080,
                height: 1920,
            },
        }
    }

    /// Ratio notation, e.g. `"16:9"`.
    pub const fn ratio(self) -> &'static str {
        match self {
            Format::Square => "1:1",
            Format::Landscape => "4:3",
            Format::Portrait => "3:4",
            Format::Widescreen => "16:9",
            Format::Story => "9:16",
        }
    }

    /// Ratio with `:` replaced by `x`, as used in filenames.
    pub fn file_token(self) -> String {
        self.ratio().replace(':', "x")
    }

    /// Human-readable size label, e.g. `"1080 × 1920 px"`.
    pub fn pixel_label(self) -> String {
        let Dimensions { width, height } = self.dimensions();
        format!("{width} × {height} px")
    }

    pub const fn orientation(self) -> Orientation {
        match self {
            Format::Widescreen | Format::Landscape => Orientation::Wide,
            Format::Story | Format::Portrait => Orientation::Tall,
            Format::Square => Orientation::Square,
        }
    }

    pub fn is_wide(self) -> bool {
        self.orientation() == Orientation::Wide
    }

    pub fn is_tall(self) -> bool {
        self.orientation() == Orientation::Tall
    }

    /// Position in the fixed export order.
    pub fn order_index(self) -> usize {
        Self::ALL
            .iter()
            .position(|f| *f == self)
            .unwrap_or_default()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ratio())
    }
}

/// Error returned when parsing an unknown format string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown format: {0}. Use one of 1:1, 4:3, 3:4, 16:9, 9:16")]
pub struct UnknownFormat(pub String);

impl FromStr for Format {
    type Err = UnknownFormat;

    /// Accepts both ratio (`16:9`) and filename (`16x9`) notation.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace(['x', 'X'], ":");
        Self::ALL
            .into_iter()
            .find(|f| f.ratio() == normalized)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_table_is_exact() {
        let table: Vec<(&str, u32, u32)> = Format::ALL
            .iter()
            .map(|f| (f.ratio(), f.dimensions().width, f.dimensions().height))
            .collect();
        assert_eq!(
            table,
            vec![
                ("1:1", 1080, 1080),
                ("4:3", 1200, 900),
                ("3:4", 900, 1200),
                ("16:9", 1200, 675),
                ("9:16", 1080, 1920),
            ]
        );
    }

    #[test]
    fn test_orientation_classes() {
        assert_eq!(Format::Widescreen.orientation(), Orientation::Wide);
        assert_eq!(Format::Landscape.orientation(), Orientation::Wide);
        assert_eq!(Format::Story.orientation(), Orientation::Tall);
        assert_eq!(Format::Portrait.orientation(), Orientation::Tall);
        assert_eq!(Format::Square.orientation(), Orientation::Square);
    }

    #[test]
    fn test_file_token_and_label() {
        assert_eq!(Format::Widescreen.file_token(), "16x9");
        assert_eq!(Format::Story.pixel_label(), "1080 × 1920 px");
    }

    #[test]
    fn test_parse_accepts_both_notations() {
        assert_eq!("9:16".parse::<Format>().unwrap(), Format::Story);
        assert_eq!("4x3".parse::<Format>().unwrap(), Format::Landscape);
        assert!("2:1".parse::<Format>().is_err());
    }

    #[test]
    fn test_serde_uses_ratio_strings() {
        let json = serde_json::to_string(&Format::Widescreen).unwrap();
        assert_eq!(json, "\"16:9\"");
        let parsed: Format = serde_json::from_str("\"3:4\"").unwrap();
        assert_eq!(parsed, Format::Portrait);
    }

    #[test]
    fn test_order_index_follows_export_order() {
        for (i, format) in Format::ALL.iter().enumerate() {
            assert_eq!(format.order_index(), i);
        }
    }
}
