//! Print a configuration document.

use pkn_posting_model::{GlobalPreset, PostingConfig};

pub fn run(preset: Option<GlobalPreset>) -> anyhow::Result<()> {
    let config = preset.map_or_else(PostingConfig::default, GlobalPreset::config);
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
