//! Headless Chrome capture.
//!
//! Each surface document is written to a scratch file, opened in a fresh tab
//! and screenshotted with a clip of exactly the surface size at the requested
//! device scale. Gradient boxes pinned by the sanitizer are re-measured in
//! the live layout before the shot.
//!
//! The blocking browser work outlives the async capture when the caller gives
//! up on it (e.g. on timeout). It keeps the capture lock until it returns, so
//! the next capture never drives the browser at the same time, and it owns
//! the scratch page and the tab, which are released on every path.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use headless_chrome::protocol::cdp::Page;
use headless_chrome::{Browser, LaunchOptions, Tab};
use tokio::sync::Mutex;
use tokio::task::JoinError;

use pkn_common::{PknError, PknResult};

use crate::capture::{CaptureRequest, CaptureService};
use crate::surface::Surface;

/// Large enough for the tallest and the widest format.
const WINDOW_SIZE: (u32, u32) = (2048, 2048);

const PIN_WIDTHS_JS: &str = "document.querySelectorAll('[data-pin]').forEach(el => { \
     el.style.width = 'auto'; \
     const w = el.getBoundingClientRect().width; \
     el.style.width = w + 'px'; \
     }); true";

static SCRATCH_COUNTER: AtomicU64 = AtomicU64::new(0);

pub struct ChromeCapture {
    browser: Browser,
    scratch_dir: PathBuf,
    exclusive: Arc<Mutex<()>>,
}

impl ChromeCapture {
    /// Launch a headless browser.
    pub fn launch() -> PknResult<Self> {
        let browser = Browser::new(LaunchOptions {
            window_size: Some(WINDOW_SIZE),
            ..Default::default()
        })
        .map_err(|e| PknError::capture(format!("Failed to launch Chrome: {e}")))?;
        Ok(Self {
            browser,
            scratch_dir: std::env::temp_dir(),
            exclusive: Arc::new(Mutex::new(())),
        })
    }

    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }
}

/// Scratch document removed when dropped.
struct ScratchPage {
    path: PathBuf,
}

impl ScratchPage {
    fn new(dir: &Path, surface: &Surface) -> Self {
        let n = SCRATCH_COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = dir.join(format!(
            "pkn-surface-{}-{}-{n}.html",
            std::process::id(),
            surface.format.file_token()
        ));
        Self { path }
    }
}

impl Drop for ScratchPage {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => tracing::warn!(
                error = %err,
                path = %self.path.display(),
                "Failed to remove scratch page"
            ),
        }
    }
}

/// Tab closed when dropped.
struct OpenTab(Arc<Tab>);

impl Deref for OpenTab {
    type Target = Tab;

    fn deref(&self) -> &Tab {
        &self.0
    }
}

impl Drop for OpenTab {
    fn drop(&mut self) {
        if let Err(err) = self.0.close(false) {
            tracing::warn!(error = %err, "Failed to close capture tab");
        }
    }
}

/// Run `job` on the blocking pool while holding `lock`.
///
/// The lock is released only when `job` returns, even if the returned future
/// is dropped first.
async fn run_exclusive<T, F>(lock: &Arc<Mutex<()>>, job: F) -> Result<T, JoinError>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    let held = lock.clone().lock_owned().await;
    tokio::task::spawn_blocking(move || {
        let _held = held;
        job()
    })
    .await
}

fn capture_blocking(
    browser: &Browser,
    page: &Path,
    request: &CaptureRequest,
) -> anyhow::Result<Vec<u8>> {
    let tab = OpenTab(browser.new_tab()?);
    tab.set_default_timeout(request.timeout);
    tab.navigate_to(&format!("file://{}", page.display()))?
        .wait_until_navigated()?;
    tab.evaluate(PIN_WIDTHS_JS, false)?;

    let png = tab.capture_screenshot(
        Page::CaptureScreenshotFormatOption::Png,
        None,
        Some(Page::Viewport {
            x: 0.0,
            y: 0.0,
            width: f64::from(request.width),
            height: f64::from(request.height),
            scale: request.scale,
        }),
        true,
    )?;
    Ok(png)
}

#[async_trait]
impl CaptureService for ChromeCapture {
    async fn capture(&self, surface: &Surface, request: &CaptureRequest) -> PknResult<Vec<u8>> {
        let page = ScratchPage::new(&self.scratch_dir, surface);
        tokio::fs::write(&page.path, surface.markup.as_bytes()).await?;

        let browser = self.browser.clone();
        let request = request.clone();
        let png = run_exclusive(&self.exclusive, move || {
            let page = page;
            capture_blocking(&browser, &page.path, &request)
        })
        .await
        .map_err(|e| PknError::capture(format!("Capture task failed: {e}")))?
        .map_err(|e| PknError::capture(format!("{} capture failed: {e}", surface.format.ratio())))?;

        tracing::debug!(
            format = surface.format.ratio(),
            bytes = png.len(),
            "Captured surface"
        );
        Ok(png)
    }

    fn name(&self) -> &str {
        "chrome"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    use pkn_posting_model::{Format, PostingConfig};

    use crate::sanitize::EstimatedMeasure;

    #[tokio::test]
    async fn test_abandoned_job_finishes_before_the_next_starts() {
        let lock = Arc::new(Mutex::new(()));
        let log = Arc::new(StdMutex::new(Vec::new()));

        let first = {
            let log = log.clone();
            run_exclusive(&lock, move || {
                log.lock().unwrap().push("first start");
                std::thread::sleep(Duration::from_millis(150));
                log.lock().unwrap().push("first end");
            })
        };
        assert!(tokio::time::timeout(Duration::from_millis(20), first)
            .await
            .is_err());

        let second = {
            let log = log.clone();
            run_exclusive(&lock, move || {
                log.lock().unwrap().push("second");
            })
        };
        second.await.unwrap();

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first start", "first end", "second"]
        );
    }

    #[test]
    fn test_scratch_page_is_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let surface = Surface::prepare(
            &PostingConfig::default(),
            Format::Square,
            &EstimatedMeasure,
            "#0a0118",
        );

        let page = ScratchPage::new(dir.path(), &surface);
        std::fs::write(&page.path, "x").unwrap();
        let path = page.path.clone();
        assert!(path.exists());
        drop(page);
        assert!(!path.exists());

        // Never written: dropping is quiet.
        drop(ScratchPage::new(dir.path(), &surface));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
