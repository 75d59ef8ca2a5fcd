//! Graphic composition.

use serde::Serialize;
use tracing::debug;

use pkn_posting_model::{Format, PostingConfig};

use crate::background::{backdrop_layers, base_paint, space_layer};
use crate::components::logo;
use crate::tree::{Length, Node, Style};
use crate::variants::content;

/// A composed graphic: the visual tree of one configuration in one format.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Graphic {
    pub format: Format,
    pub width: u32,
    pub height: u32,
    pub root: Node,
}

/// Compose `config` at the exact pixel size of `format`.
///
/// Total for every configuration value. The layers are, bottom to top: space
/// background, gradient backdrop, image backdrop, content, logo.
pub fn compose(config: &PostingConfig, format: Format) -> Graphic {
    let config = config.for_format(format);
    let dims = format.dimensions();

    let mut layers = space_layer(&config);
    layers.extend(backdrop_layers(&config));

    let mut content_layer = content(&config);
    content_layer.style.z_index = Some(10);
    layers.push(content_layer);

    if config.logo_enabled {
        layers.push(logo(&config));
    }

    let root = Node::frame(Style {
        width: Length::Px(dims.width as f32),
        height: Length::Px(dims.height as f32),
        overflow_hidden: true,
        background: Some(base_paint()),
        font_family: Some(config.brand.font_family.css_name().to_string()),
        ..Style::default()
    })
    .with_role("graphic")
    .with_children(layers);

    debug!(
        post_type = %config.post_type,
        format = %format,
        nodes = root.count(),
        "Composed graphic"
    );

    Graphic {
        format,
        width: dims.width,
        height: dims.height,
        root,
    }
}

impl Graphic {
    /// The visual tree as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pkn_posting_model::{Backdrop, PostType, PostingPatch};

    #[test]
    fn test_root_has_exact_format_size() {
        for format in Format::ALL {
            let graphic = compose(&PostingConfig::default(), format);
            let dims = format.dimensions();
            assert_eq!((graphic.width, graphic.height), (dims.width, dims.height));
            assert_eq!(graphic.root.style.width, Length::Px(dims.width as f32));
            assert_eq!(graphic.root.style.height, Length::Px(dims.height as f32));
        }
    }

    #[test]
    fn test_format_argument_wins_over_config_format() {
        let config = PostingConfig::default().for_format(Format::Story);
        let graphic = compose(&config, Format::Widescreen);
        assert_eq!(graphic.width, 1200);
        assert_eq!(
            graphic.root.find("headline").unwrap().style.font_size,
            Some(48.0)
        );
    }

    #[test]
    fn test_layer_order() {
        let config = PostingConfig::default().apply(&PostingPatch {
            backdrop: Some(Backdrop::Gradient("linear-gradient(#000, #111)".into())),
            ..Default::default()
        });
        let graphic = compose(&config, Format::Square);
        let roles: Vec<&str> = graphic
            .root
            .children
            .iter()
            .filter_map(|n| n.role)
            .filter(|r| *r != "star")
            .collect();
        assert_eq!(
            roles,
            vec!["glow", "glow", "glow", "backdrop-gradient", "layout-event", "logo"]
        );
    }

    #[test]
    fn test_logo_toggle() {
        let config = PostingConfig {
            logo_enabled: false,
            ..PostingConfig::default()
        };
        assert!(compose(&config, Format::Square).root.find("logo").is_none());
    }

    #[test]
    fn test_font_family_from_brand() {
        let graphic = compose(&PostingConfig::default(), Format::Square);
        assert_eq!(graphic.root.style.font_family.as_deref(), Some("Vazirmatn"));
    }

    #[test]
    fn test_compose_is_deterministic() {
        for post_type in PostType::ALL {
            let config = PostingConfig::default().with_post_type(post_type);
            assert_eq!(
                compose(&config, Format::Portrait),
                compose(&config, Format::Portrait)
            );
        }
    }

    #[test]
    fn test_tree_serializes() {
        let json = compose(&PostingConfig::default(), Format::Square)
            .to_json()
            .unwrap();
        assert!(json.contains("\"role\": \"graphic\""));
        assert!(json.contains("\"format\": \"1:1\""));
    }
}
