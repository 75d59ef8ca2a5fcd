//! Render one format.

use std::path::PathBuf;

use anyhow::Context;

use pkn_common::config::AppConfig;
use pkn_posting_model::Format;
use pkn_render_engine::{EstimatedMeasure, Surface};

use crate::commands::load_config;
use crate::ConfigSource;

pub fn run(
    source: &ConfigSource,
    format: Format,
    tree: bool,
    output: Option<PathBuf>,
    app_config: &AppConfig,
) -> anyhow::Result<()> {
    let config = load_config(source)?;
    let surface = Surface::prepare(
        &config,
        format,
        &EstimatedMeasure,
        &app_config.export.background,
    );

    let body = if tree {
        surface.graphic.to_json()?
    } else {
        surface.markup
    };

    match output {
        Some(path) => {
            std::fs::write(&path, body)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(format = %format, path = %path.display(), "Rendered surface");
            println!("Rendered {} to {}", format.ratio(), path.display());
        }
        None => println!("{body}"),
    }
    Ok(())
}
