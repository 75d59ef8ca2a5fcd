//! PKN Render Engine
//!
//! Capture and export pipeline that turns composed graphics into files.
//!
//! # Pipeline Architecture
//!
//! ```text
//! PostingConfig ──┐
//!                 ├── compose (per format)
//! Format::ALL ────┘         │
//!                           ├── sanitize (oklch → rgba, pin gradient widths)
//!                           │
//!                           ├── markup (standalone HTML at the (0, 0) anchor)
//!                           │
//!                           ├── capture (settle, rasterize at output scale)
//!                           │
//!                           ├── bundle (zip, format order)
//!                           ▼
//!                     DownloadSink
//! ```
//!
//! The browser-backed capture service lives behind the `chrome` feature.

pub mod archive;
pub mod capture;
#[cfg(feature = "chrome")]
pub mod chrome;
pub mod download;
pub mod export;
pub mod markup;
pub mod naming;
pub mod notify;
pub mod sanitize;
pub mod surface;

pub use archive::{ArchiveBuilder, ArchiveEntry, ZipArchiveBuilder};
pub use capture::{CaptureRequest, CaptureService};
#[cfg(feature = "chrome")]
pub use chrome::ChromeCapture;
pub use download::{DirectorySink, DownloadSink};
pub use export::*;
pub use notify::{Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use sanitize::{sanitize_for_capture, EstimatedMeasure, SanitizeReport, TextMeasure};
pub use surface::{ComposedSurfaces, ExportSurfaces, Surface, SurfaceProvider};
