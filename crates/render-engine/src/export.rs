//! Single-format and batch export.
//!
//! One export runs at a time. A run snapshots the configuration, prepares
//! the surfaces it needs, then captures formats strictly one after another
//! with a settle delay before each capture. Batch runs skip failed formats
//! and bundle the rest into one archive.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use pkn_common::{Clock, ExportDefaults, PknError, PknResult, Stopwatch, SystemClock};
use pkn_posting_model::{config_fingerprint, Format, PostingConfig};

use crate::archive::{ArchiveBuilder, ArchiveEntry, ZipArchiveBuilder};
use crate::capture::{CaptureRequest, CaptureService};
use crate::download::DownloadSink;
use crate::naming::{archive_filename, image_filename};
use crate::notify::{Notification, Notifier, TracingNotifier};
use crate::surface::{ComposedSurfaces, ExportSurfaces, SurfaceProvider};

/// Export parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    /// Wait before each capture so the surface can settle.
    pub settle_delay: Duration,
    /// Device pixel multiplier of every captured image.
    pub output_scale: f64,
    pub background: String,
    /// Upper bound for a single capture.
    pub capture_timeout: Duration,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self::from(&ExportDefaults::default())
    }
}

impl From<&ExportDefaults> for ExportSettings {
    fn from(defaults: &ExportDefaults) -> Self {
        Self {
            settle_delay: Duration::from_millis(defaults.settle_delay_ms),
            output_scale: defaults.output_scale,
            background: defaults.background.clone(),
            capture_timeout: Duration::from_secs(defaults.capture_timeout_secs),
        }
    }
}

/// What a running export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportTarget {
    Single(Format),
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportState {
    #[default]
    Idle,
    Exporting(ExportTarget),
}

/// Stages of an export run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Capturing(Format),
    Bundling,
    Delivering,
    Complete,
    Failed,
}

/// Export progress report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportProgress {
    /// Formats attempted so far.
    pub completed: usize,
    pub total: usize,
    pub stage: ExportStage,
}

/// Progress callback for export runs.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send + Sync>;

/// Result of one format inside a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FormatStatus {
    Captured { bytes: usize },
    Failed { error: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormatResult {
    pub format: Format,
    pub filename: String,
    #[serde(flatten)]
    pub status: FormatStatus,
}

impl FormatResult {
    pub fn is_success(&self) -> bool {
        matches!(self.status, FormatStatus::Captured { .. })
    }
}

/// Per-format results of a batch run, in format order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportReport {
    pub results: Vec<FormatResult>,
    pub succeeded: usize,
    pub config_fingerprint: String,
    pub elapsed_ms: u64,
}

impl ExportReport {
    pub fn failed(&self) -> impl Iterator<Item = &FormatResult> {
        self.results.iter().filter(|r| !r.is_success())
    }
}

#[derive(Debug)]
pub enum ExportOutcome {
    /// Another export was running; nothing happened.
    Busy,
    Exported { path: PathBuf },
    Bundled { path: PathBuf, report: ExportReport },
    Failed { error: PknError },
}

/// Holds the in-progress flag for the duration of a run.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
    state: &'a Mutex<ExportState>,
}

impl<'a> BusyGuard<'a> {
    fn acquire(
        flag: &'a AtomicBool,
        state: &'a Mutex<ExportState>,
        target: ExportTarget,
    ) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()?;
        *state.lock().unwrap_or_else(PoisonError::into_inner) = ExportState::Exporting(target);
        Some(Self { flag, state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = ExportState::Idle;
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives capture, bundling and delivery.
pub struct Exporter {
    capture: Arc<dyn CaptureService>,
    archive: Arc<dyn ArchiveBuilder>,
    sink: Arc<dyn DownloadSink>,
    clock: Arc<dyn Clock>,
    notifier: Arc<dyn Notifier>,
    surfaces: Arc<dyn SurfaceProvider>,
    settings: ExportSettings,
    progress: Option<ProgressCallback>,
    busy: AtomicBool,
    state: Mutex<ExportState>,
}

impl Exporter {
    pub fn new(capture: Arc<dyn CaptureService>, sink: Arc<dyn DownloadSink>) -> Self {
        Self {
            capture,
            archive: Arc::new(ZipArchiveBuilder::new()),
            sink,
            clock: Arc::new(SystemClock),
            notifier: Arc::new(TracingNotifier),
            surfaces: Arc::new(ComposedSurfaces::new()),
            settings: ExportSettings::default(),
            progress: None,
            busy: AtomicBool::new(false),
            state: Mutex::new(ExportState::Idle),
        }
    }

    pub fn with_archive(mut self, archive: Arc<dyn ArchiveBuilder>) -> Self {
        self.archive = archive;
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_surfaces(mut self, surfaces: Arc<dyn SurfaceProvider>) -> Self {
        self.surfaces = surfaces;
        self
    }

    pub fn with_settings(mut self, settings: ExportSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_progress(mut self, progress: ProgressCallback) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn settings(&self) -> &ExportSettings {
        &self.settings
    }

    pub fn state(&self) -> ExportState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Capture one format and deliver it as a PNG.
    pub async fn export_format(&self, config: &PostingConfig, format: Format) -> ExportOutcome {
        let Some(_guard) =
            BusyGuard::acquire(&self.busy, &self.state, ExportTarget::Single(format))
        else {
            info!(format = %format, "Export already running, ignoring request");
            return ExportOutcome::Busy;
        };

        let snapshot = config.clone();
        let fingerprint = fingerprint_of(&snapshot);
        info!(
            format = %format,
            post_type = %snapshot.post_type,
            fingerprint = %fingerprint,
            capture = self.capture.name(),
            "Starting export"
        );
        self.report(0, 1, ExportStage::Preparing);

        let filename = image_filename(snapshot.post_type, format, self.clock.today());
        let result = async {
            let surfaces =
                self.surfaces
                    .prepare(&snapshot, &[format], &self.settings.background);
            self.report(0, 1, ExportStage::Capturing(format));
            let png = self.capture_one(&surfaces, format).await?;
            self.report(1, 1, ExportStage::Delivering);
            self.sink.deliver(&filename, &png).await
        }
        .await;

        match result {
            Ok(path) => {
                info!(format = %format, path = %path.display(), "Export complete");
                self.report(1, 1, ExportStage::Complete);
                self.notifier
                    .notify(Notification::success(format!("{} exportiert!", format.ratio())));
                ExportOutcome::Exported { path }
            }
            Err(err) => {
                error!(format = %format, error = %err, "Export failed");
                self.report(1, 1, ExportStage::Failed);
                self.notifier
                    .notify(Notification::error("Export fehlgeschlagen"));
                ExportOutcome::Failed { error: err }
            }
        }
    }

    /// Capture every format in order and deliver one archive.
    pub async fn export_all(&self, config: &PostingConfig) -> ExportOutcome {
        let Some(_guard) = BusyGuard::acquire(&self.busy, &self.state, ExportTarget::All) else {
            info!("Export already running, ignoring batch request");
            return ExportOutcome::Busy;
        };

        let watch = Stopwatch::start();
        let snapshot = config.clone();
        let fingerprint = fingerprint_of(&snapshot);
        let total = Format::ALL.len();
        info!(
            post_type = %snapshot.post_type,
            fingerprint = %fingerprint,
            formats = total,
            capture = self.capture.name(),
            "Starting batch export"
        );
        self.report(0, total, ExportStage::Preparing);

        let surfaces = self
            .surfaces
            .prepare(&snapshot, &Format::ALL, &self.settings.background);
        let date = self.clock.today();

        let mut results = Vec::with_capacity(total);
        let mut entries = Vec::with_capacity(total);
        for (i, format) in Format::ALL.into_iter().enumerate() {
            self.report(i, total, ExportStage::Capturing(format));
            let filename = image_filename(snapshot.post_type, format, date);
            match self.capture_one(&surfaces, format).await {
                Ok(png) => {
                    results.push(FormatResult {
                        format,
                        filename: filename.clone(),
                        status: FormatStatus::Captured { bytes: png.len() },
                    });
                    entries.push(ArchiveEntry::new(filename, png));
                }
                Err(err) => {
                    warn!(format = %format, error = %err, "Format failed, skipping");
                    results.push(FormatResult {
                        format,
                        filename,
                        status: FormatStatus::Failed {
                            error: err.to_string(),
                        },
                    });
                }
            }
        }

        let succeeded = entries.len();
        if succeeded == 0 {
            error!("No format captured, no archive written");
            self.report(total, total, ExportStage::Failed);
            self.notifier
                .notify(Notification::error("Kein Export erfolgreich"));
            return ExportOutcome::Failed {
                error: PknError::capture("no format could be captured"),
            };
        }

        self.report(total, total, ExportStage::Bundling);
        let delivered = match self.archive.build(&entries) {
            Ok(bytes) => {
                self.report(total, total, ExportStage::Delivering);
                self.sink.deliver(&archive_filename(date), &bytes).await
            }
            Err(err) => Err(err),
        };

        match delivered {
            Ok(path) => {
                let report = ExportReport {
                    results,
                    succeeded,
                    config_fingerprint: fingerprint,
                    elapsed_ms: watch.elapsed_ms(),
                };
                info!(
                    path = %path.display(),
                    succeeded,
                    failed = total - succeeded,
                    elapsed_ms = report.elapsed_ms,
                    "Batch export complete"
                );
                self.report(total, total, ExportStage::Complete);
                self.notifier.notify(Notification::success(format!(
                    "{succeeded} Formate als ZIP exportiert!"
                )));
                ExportOutcome::Bundled { path, report }
            }
            Err(err) => {
                error!(error = %err, "Archive export failed");
                self.report(total, total, ExportStage::Failed);
                self.notifier
                    .notify(Notification::error("ZIP Export fehlgeschlagen"));
                ExportOutcome::Failed { error: err }
            }
        }
    }

    async fn capture_one(&self, surfaces: &ExportSurfaces, format: Format) -> PknResult<Vec<u8>> {
        let surface = surfaces.get(format)?;
        tokio::time::sleep(self.settings.settle_delay).await;

        let request = CaptureRequest::new(
            format,
            self.settings.output_scale,
            self.settings.background.as_str(),
        )
        .with_timeout(self.settings.capture_timeout);
        let watch = Stopwatch::start();
        let png = tokio::time::timeout(
            self.settings.capture_timeout,
            self.capture.capture(surface, &request),
        )
        .await
        .map_err(|_| {
            PknError::capture(format!(
                "{} capture timed out after {:?}",
                format.ratio(),
                self.settings.capture_timeout
            ))
        })??;

        if png.is_empty() {
            return Err(PknError::capture(format!(
                "{} capture produced no image",
                format.ratio()
            )));
        }
        debug!(
            format = %format,
            bytes = png.len(),
            elapsed_ms = watch.elapsed_ms(),
            "Captured format"
        );
        Ok(png)
    }

    fn report(&self, completed: usize, total: usize, stage: ExportStage) {
        if let Some(cb) = &self.progress {
            cb(ExportProgress {
                completed,
                total,
                stage,
            });
        }
    }
}

fn fingerprint_of(config: &PostingConfig) -> String {
    config_fingerprint(config).unwrap_or_else(|err| {
        warn!(error = %err, "Could not fingerprint configuration");
        "unknown".to_string()
    })
}
