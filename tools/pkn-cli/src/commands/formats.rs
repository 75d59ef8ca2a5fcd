//! List the output formats.

use pkn_common::config::AppConfig;
use pkn_posting_model::{export_dimensions, scale_into, Format, ScaleBudget};

pub fn run(app_config: &AppConfig) -> anyhow::Result<()> {
    let preview = ScaleBudget::new(app_config.preview.max_width, app_config.preview.max_height);
    let thumbnail = ScaleBudget::new(
        app_config.preview.thumbnail_max_width,
        app_config.preview.thumbnail_max_height,
    );
    let output_scale = app_config.export.output_scale;

    println!(
        "{:<6} {:<16} {:<18} {:<20} {}",
        "Ratio", "Native", "Preview", "Thumbnail", "Export"
    );
    for format in Format::ALL {
        let p = scale_into(format, preview);
        let t = scale_into(format, thumbnail);
        let e = export_dimensions(format, output_scale);
        println!(
            "{:<6} {:<16} {:<18} {:<20} {}x{} @{output_scale}x",
            format.ratio(),
            format.pixel_label(),
            format!("{}x{} ({:.3})", p.width, p.height, p.scale),
            format!("{}x{} ({:.4})", t.width, t.height, t.scale),
            e.width,
            e.height,
        );
    }
    Ok(())
}
