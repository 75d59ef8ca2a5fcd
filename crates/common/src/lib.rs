//! PKN Posting Common Utilities
//!
//! Shared infrastructure for all PKN Posting crates:
//! - Error types and result aliases
//! - Date clock used for export file naming
//! - Tracing/logging initialization
//! - Configuration loading

pub mod clock;
pub mod config;
pub mod error;
pub mod logging;

pub use clock::*;
pub use config::*;
pub use error::*;
