use pkn_layout::{compose, star_positions};
use pkn_posting_model::{Density, Format, PostType, PostingConfig};

fn fnv1a_64(input: &str) -> u64 {
    let mut hash: u64 = 0xcbf29ce484222325;
    for byte in input.as_bytes() {
        hash ^= *byte as u64;
        hash = hash.wrapping_mul(0x100000001b3);
    }
    hash
}

#[test]
fn star_field_signature_is_stable() {
    let signature = star_positions(100)
        .iter()
        .map(|s| format!("{:.2},{:.2},{:.2}\n", s.top_percent, s.left_percent, s.opacity))
        .collect::<String>();

    assert_eq!(fnv1a_64(&signature), 0x60b6dfeda8c351bf);
}

#[test]
fn composed_stars_match_generator() {
    let config = PostingConfig {
        background_density: Density::High,
        ..PostingConfig::default()
    };
    let graphic = compose(&config, Format::Story);
    let stars = graphic.root.find_all("star");
    assert_eq!(stars.len(), 100);

    for (node, star) in stars.iter().zip(star_positions(100)) {
        let pkn_layout::tree::Position::Absolute { inset, .. } = node.style.position else {
            panic!("star must be absolutely placed");
        };
        assert_eq!(
            inset.top,
            Some(pkn_layout::tree::Length::Percent(star.top_percent as f32))
        );
        assert_eq!(
            inset.left,
            Some(pkn_layout::tree::Length::Percent(star.left_percent as f32))
        );
    }
}

#[test]
fn every_post_type_composes_in_every_format() {
    for post_type in PostType::ALL {
        let config = PostingConfig::default().with_post_type(post_type);
        for format in Format::ALL {
            let graphic = compose(&config, format);
            assert_eq!(graphic.format, format);
            assert!(graphic.root.count() > 1, "{post_type} {format}");
        }
    }
}
