pub mod export;
pub mod formats;
pub mod info;
pub mod render;
pub mod template;

use anyhow::Context;

use pkn_posting_model::PostingConfig;

use crate::ConfigSource;

/// Resolve the posting configuration a command works on.
///
/// A preset wins over a file; with neither, the defaults are used. The post
/// type switch is applied last.
pub fn load_config(source: &ConfigSource) -> anyhow::Result<PostingConfig> {
    let config = match (&source.preset, &source.config) {
        (Some(preset), path) => {
            if let Some(path) = path {
                tracing::warn!(
                    preset = preset.as_str(),
                    ignored = %path.display(),
                    "Preset given, ignoring config file"
                );
            }
            preset.config()
        }
        (None, Some(path)) => PostingConfig::from_json_file(path)
            .with_context(|| format!("Failed to load posting config {}", path.display()))?,
        (None, None) => PostingConfig::default(),
    };

    Ok(match source.post_type {
        Some(post_type) => config.with_post_type(post_type),
        None => config,
    })
}
