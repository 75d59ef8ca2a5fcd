//! Summarize a posting configuration.

use pkn_common::config::AppConfig;
use pkn_posting_model::{config_fingerprint, Backdrop, Format, PostType};
use pkn_render_engine::{EstimatedMeasure, Surface};

use crate::commands::load_config;
use crate::ConfigSource;

pub fn run(source: &ConfigSource, app_config: &AppConfig) -> anyhow::Result<()> {
    let config = load_config(source)?;

    println!("Posting: {}", config.post_type);
    println!("  Headline: {}", config.headline);
    if !config.subline.is_empty() {
        println!("  Subline: {}", config.subline);
    }
    if !config.meta_line.is_empty() {
        println!("  Meta: {}", config.meta_line);
    }
    println!("  Fingerprint: {}", config_fingerprint(&config)?);
    println!();

    println!("Media:");
    match config.active_backdrop() {
        Backdrop::None => println!("  Backdrop: none"),
        Backdrop::Image(src) => {
            println!("  Backdrop: image {src} ({}% darken)", config.image_darken)
        }
        Backdrop::Gradient(css) => println!("  Backdrop: {css}"),
    }
    if let Some(ref src) = config.featured_image {
        println!("  Featured image: {src}");
    }
    println!(
        "  Space background: {} (density {:?}, glow {:?})",
        config.space_background_enabled, config.background_density, config.glow_intensity
    );
    println!();

    if config.post_type == PostType::Carousel {
        println!("Carousel:");
        println!("  Slides: {}", config.carousel.len());
        match config.carousel.resolved_index() {
            Some(i) => println!("  Active: {} of {}", i + 1, config.carousel.len()),
            None => println!("  Active: none"),
        }
        println!();
    }

    println!("Layouts:");
    for format in Format::ALL {
        let surface = Surface::prepare(
            &config,
            format,
            &EstimatedMeasure,
            &app_config.export.background,
        );
        println!(
            "  {:<5} {} nodes, {} colors converted, {} widths pinned",
            format.ratio(),
            surface.graphic.root.count(),
            surface.report.converted_colors,
            surface.report.pinned_nodes,
        );
    }

    Ok(())
}
