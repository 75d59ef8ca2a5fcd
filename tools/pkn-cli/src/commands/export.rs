//! Export one format or all formats.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use pkn_common::config::AppConfig;
use pkn_posting_model::{config_fingerprint, Format};
use pkn_render_engine::{
    CaptureService, DirectorySink, ExportOutcome, ExportProgress, ExportSettings, ExportStage,
    Exporter, FormatStatus,
};

use crate::commands::load_config;
use crate::ConfigSource;

pub async fn run(
    source: &ConfigSource,
    format: Option<Format>,
    all: bool,
    output: Option<PathBuf>,
    app_config: &AppConfig,
) -> anyhow::Result<()> {
    let config = load_config(source)?;
    let output_dir = output.unwrap_or_else(|| app_config.output_dir.clone());
    let settings = ExportSettings::from(&app_config.export);

    println!("Exporting {} posting", config.post_type);
    println!("  Fingerprint: {}", config_fingerprint(&config)?);
    println!("  Output: {}", output_dir.display());
    println!("  Scale: {}x", settings.output_scale);

    let capture = launch_capture().await?;
    let progress: Box<dyn Fn(ExportProgress) + Send + Sync> = Box::new(|p| {
        if let ExportStage::Capturing(format) = p.stage {
            print!("\r  Capturing {:<5} ({}/{})  ", format.ratio(), p.completed + 1, p.total);
            let _ = std::io::stdout().flush();
        }
    });
    let exporter = Exporter::new(capture, Arc::new(DirectorySink::new(&output_dir)))
        .with_settings(settings)
        .with_progress(progress);

    let outcome = match format {
        Some(format) if !all => exporter.export_format(&config, format).await,
        _ => exporter.export_all(&config).await,
    };
    println!();

    match outcome {
        ExportOutcome::Exported { path } => {
            println!("Export complete: {}", path.display());
            Ok(())
        }
        ExportOutcome::Bundled { path, report } => {
            println!("Archive complete: {}", path.display());
            println!("  {} of {} formats", report.succeeded, report.results.len());
            for failed in report.failed() {
                if let FormatStatus::Failed { error } = &failed.status {
                    println!("  Skipped {}: {error}", failed.format.ratio());
                }
            }
            Ok(())
        }
        ExportOutcome::Failed { error } => Err(anyhow::anyhow!("Export failed: {error}")),
        ExportOutcome::Busy => Err(anyhow::anyhow!("Another export is already running")),
    }
}

#[cfg(feature = "chrome")]
async fn launch_capture() -> anyhow::Result<Arc<dyn CaptureService>> {
    let capture = tokio::task::spawn_blocking(pkn_render_engine::ChromeCapture::launch).await??;
    Ok(Arc::new(capture))
}

#[cfg(not(feature = "chrome"))]
async fn launch_capture() -> anyhow::Result<Arc<dyn CaptureService>> {
    Err(anyhow::anyhow!(
        "No capture backend available (build with the `chrome` feature)"
    ))
}
