//! Export file names.

use chrono::NaiveDate;

use pkn_posting_model::{Format, PostType};

/// Prefix shared by every exported file.
pub const FILE_PREFIX: &str = "PKN";

/// `PKN_<post_type>_<format>_<YYYY-MM-DD>.png`, e.g.
/// `PKN_pure_visual_16x9_2026-03-15.png`.
pub fn image_filename(post_type: PostType, format: Format, date: NaiveDate) -> String {
    format!(
        "{FILE_PREFIX}_{}_{}_{}.png",
        post_type.file_token(),
        format.file_token(),
        date.format("%Y-%m-%d")
    )
}

/// `PKN_Postings_<YYYY-MM-DD>.zip`.
pub fn archive_filename(date: NaiveDate) -> String {
    format!("{FILE_PREFIX}_Postings_{}.zip", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn test_image_filename() {
        assert_eq!(
            image_filename(PostType::PureVisual, Format::Widescreen, date()),
            "PKN_pure_visual_16x9_2026-03-15.png"
        );
        assert_eq!(
            image_filename(PostType::Event, Format::Square, date()),
            "PKN_event_1x1_2026-03-15.png"
        );
    }

    #[test]
    fn test_archive_filename() {
        assert_eq!(archive_filename(date()), "PKN_Postings_2026-03-15.zip");
    }
}
