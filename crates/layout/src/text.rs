//! Headline and meta line rules.

use serde::Serialize;

/// A run of headline text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "lowercase")]
pub enum HeadlineSpan {
    Plain(String),
    Highlight(String),
}

impl HeadlineSpan {
    pub fn text(&self) -> &str {
        match self {
            HeadlineSpan::Plain(t) | HeadlineSpan::Highlight(t) => t,
        }
    }
}

/// Split a headline around the first occurrence of the highlight word.
///
/// Returns `[before, word, rest]` where `rest` keeps any later occurrences
/// verbatim. Falls back to the whole headline as plain text when
/// highlighting is off, the word is empty or not a substring. Empty plain
/// runs are dropped.
pub fn split_highlight(headline: &str, word: &str, enabled: bool) -> Vec<HeadlineSpan> {
    let found = if enabled && !word.is_empty() {
        headline.find(word)
    } else {
        None
    };

    let Some(start) = found else {
        return plain(headline).into_iter().collect();
    };

    let before = &headline[..start];
    let rest = &headline[start + word.len()..];
    plain(before)
        .into_iter()
        .chain(std::iter::once(HeadlineSpan::Highlight(word.to_string())))
        .chain(plain(rest))
        .collect()
}

fn plain(text: &str) -> Option<HeadlineSpan> {
    (!text.is_empty()).then(|| HeadlineSpan::Plain(text.to_string()))
}

pub const META_SEPARATOR: char = '·';

/// The two parts of a `"<date> · <location>"` meta line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetaLine {
    pub date: String,
    /// Present only when the separator occurs.
    pub location: Option<String>,
}

/// Split on the first separator and trim both parts.
///
/// An empty meta line yields `None` and renders no meta row.
pub fn parse_meta_line(meta: &str) -> Option<MetaLine> {
    if meta.is_empty() {
        return None;
    }
    Some(match meta.split_once(META_SEPARATOR) {
        Some((date, rest)) => MetaLine {
            date: date.trim().to_string(),
            // Only the segment up to a second separator is shown.
            location: Some(
                rest.split(META_SEPARATOR)
                    .next()
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
            ),
        },
        None => MetaLine {
            date: meta.trim().to_string(),
            location: None,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(s: &str) -> HeadlineSpan {
        HeadlineSpan::Plain(s.into())
    }

    fn h(s: &str) -> HeadlineSpan {
        HeadlineSpan::Highlight(s.into())
    }

    #[test]
    fn test_highlight_in_middle() {
        assert_eq!(
            split_highlight("Join IT KOSMOS now", "IT KOSMOS", true),
            vec![p("Join "), h("IT KOSMOS"), p(" now")]
        );
    }

    #[test]
    fn test_highlight_at_start_drops_empty_prefix() {
        assert_eq!(
            split_highlight("IT KOSMOS Conference 2026", "IT KOSMOS", true),
            vec![h("IT KOSMOS"), p(" Conference 2026")]
        );
    }

    #[test]
    fn test_later_occurrences_stay_verbatim() {
        assert_eq!(
            split_highlight("AI meets AI", "AI", true),
            vec![h("AI"), p(" meets AI")]
        );
    }

    #[test]
    fn test_fallbacks_render_plain_headline() {
        let plain_only = vec![p("Tech Summit")];
        assert_eq!(split_highlight("Tech Summit", "KOSMOS", true), plain_only);
        assert_eq!(split_highlight("Tech Summit", "", true), plain_only);
        assert_eq!(split_highlight("Tech Summit", "Tech", false), plain_only);
    }

    #[test]
    fn test_whole_headline_highlight() {
        assert_eq!(split_highlight("KOSMOS", "KOSMOS", true), vec![h("KOSMOS")]);
    }

    #[test]
    fn test_meta_with_separator() {
        assert_eq!(
            parse_meta_line("15. März 2026 · Vienna Space Center"),
            Some(MetaLine {
                date: "15. März 2026".into(),
                location: Some("Vienna Space Center".into()),
            })
        );
    }

    #[test]
    fn test_meta_without_separator() {
        assert_eq!(
            parse_meta_line("Tomorrow"),
            Some(MetaLine {
                date: "Tomorrow".into(),
                location: None,
            })
        );
    }

    #[test]
    fn test_meta_second_separator_is_cut() {
        let meta = parse_meta_line("Mon · Vienna · Hall B").unwrap();
        assert_eq!(meta.location.as_deref(), Some("Vienna"));
    }

    #[test]
    fn test_empty_meta_renders_nothing() {
        assert_eq!(parse_meta_line(""), None);
    }
}
