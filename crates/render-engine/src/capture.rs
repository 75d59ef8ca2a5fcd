//! Raster capture seam.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use pkn_common::PknResult;
use pkn_posting_model::Format;

use crate::surface::Surface;

/// Options handed to the rasterizer for one capture.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaptureRequest {
    /// Logical size of the surface in CSS pixels.
    pub width: u32,
    pub height: u32,
    /// Device pixel multiplier of the output image.
    pub scale: f64,
    /// Painted behind the surface.
    pub background: String,
    /// Load cross-origin images with CORS.
    pub use_cors: bool,
    /// Allow cross-origin images that taint the canvas.
    pub allow_taint: bool,
    /// `0` waits for images without a limit.
    pub image_timeout_ms: u64,
    /// Upper bound the rasterizer enforces on its own work.
    pub timeout: Duration,
}

impl CaptureRequest {
    pub fn new(format: Format, scale: f64, background: impl Into<String>) -> Self {
        let dims = format.dimensions();
        Self {
            width: dims.width,
            height: dims.height,
            scale,
            background: background.into(),
            use_cors: true,
            allow_taint: true,
            image_timeout_ms: 0,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Turns a prepared surface into PNG bytes.
#[async_trait]
pub trait CaptureService: Send + Sync {
    async fn capture(&self, surface: &Surface, request: &CaptureRequest) -> PknResult<Vec<u8>>;

    /// Check if this service can run on the system.
    fn is_available(&self) -> bool {
        true
    }

    /// Service name.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_uses_native_size() {
        let request = CaptureRequest::new(Format::Widescreen, 2.0, "#0a0118");
        assert_eq!((request.width, request.height), (1200, 675));
        assert_eq!(request.scale, 2.0);
        assert!(request.use_cors && request.allow_taint);
        assert_eq!(request.image_timeout_ms, 0);
        assert_eq!(request.timeout, Duration::from_secs(30));

        let request = request.with_timeout(Duration::from_secs(5));
        assert_eq!(request.timeout, Duration::from_secs(5));
    }
}
