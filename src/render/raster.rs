//! Page rasterization through the external `pdftoppm` executable
//!
//! The external contract: given a PDF path, a 1-based page number, and a
//! target resolution, produce a PNG of that exact page cropped to its
//! content box. A non-zero exit is the only defined failure signal and is
//! surfaced as [`RenderError::PageRenderFailed`] without retry.
//!
//! The child process gets a bounded wait: it is polled until a deadline and
//! killed on expiry.

use super::types::{RenderError, Result};
use image::DynamicImage;
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tracing::debug;

/// External rasterizer executable (Poppler)
pub const RASTERIZER_TOOL: &str = "pdftoppm";

/// Child poll interval while waiting for the rasterizer
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Rasterize one PDF page to an image.
///
/// Invokes `pdftoppm -png -singlefile -f page -l page -cropbox -r resolution`
/// into a temp directory and loads the resulting PNG.
pub fn rasterize_page(
    pdf_path: &Path,
    page: u32,
    resolution: u32,
    timeout: Duration,
) -> Result<DynamicImage> {
    let tool = which::which(RASTERIZER_TOOL)
        .map_err(|_| RenderError::RasterizerNotFound(RASTERIZER_TOOL.to_string()))?;

    let temp_dir = tempfile::tempdir()?;
    let out_prefix = temp_dir.path().join("page");
    let stderr_path = temp_dir.path().join("stderr");

    let mut cmd = Command::new(tool);
    cmd.arg("-png")
        .arg("-singlefile")
        .args(["-f", &page.to_string(), "-l", &page.to_string()])
        .arg("-cropbox")
        .args(["-r", &resolution.to_string()])
        .arg(pdf_path)
        .arg(&out_prefix)
        .stdout(Stdio::null())
        .stderr(Stdio::from(File::create(&stderr_path)?));

    debug!("rasterizing page {} of {} at {} dpi", page, pdf_path.display(), resolution);
    run_bounded(&mut cmd, page, timeout, &stderr_path)?;

    let png_path = out_prefix.with_extension("png");
    if !png_path.exists() {
        return Err(RenderError::MissingPageImage(png_path));
    }
    image::open(&png_path).map_err(|e| RenderError::ImageError(e.to_string()))
}

/// Run a rasterizer command with a bounded wait.
///
/// Polls the child until it exits or the deadline passes; on expiry the
/// child is killed and a timeout error returned. A non-zero exit surfaces
/// the status and captured stderr.
fn run_bounded(cmd: &mut Command, page: u32, timeout: Duration, stderr_path: &Path) -> Result<()> {
    let mut child = cmd.spawn()?;
    let deadline = Instant::now() + timeout;

    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            child.kill().ok();
            child.wait().ok();
            return Err(RenderError::RenderTimedOut {
                page,
                seconds: timeout.as_secs(),
            });
        }
        std::thread::sleep(POLL_INTERVAL);
    };

    if !status.success() {
        let stderr = std::fs::read_to_string(stderr_path).unwrap_or_default();
        return Err(RenderError::PageRenderFailed {
            page,
            status: status.code().unwrap_or(-1),
            stderr: stderr.trim().to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_bounded_success() {
        let dir = tempfile::tempdir().unwrap();
        let stderr_path = dir.path().join("stderr");
        File::create(&stderr_path).unwrap();
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "exit 0"]);
        assert!(run_bounded(&mut cmd, 1, Duration::from_secs(5), &stderr_path).is_ok());
    }

    #[test]
    fn test_run_bounded_nonzero_exit_carries_status() {
        let dir = tempfile::tempdir().unwrap();
        let stderr_path = dir.path().join("stderr");
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "echo broken >&2; exit 3"])
            .stderr(Stdio::from(File::create(&stderr_path).unwrap()));
        let err = run_bounded(&mut cmd, 7, Duration::from_secs(5), &stderr_path).unwrap_err();
        match err {
            RenderError::PageRenderFailed {
                page,
                status,
                stderr,
            } => {
                assert_eq!(page, 7);
                assert_eq!(status, 3);
                assert_eq!(stderr, "broken");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_run_bounded_times_out() {
        let dir = tempfile::tempdir().unwrap();
        let stderr_path = dir.path().join("stderr");
        File::create(&stderr_path).unwrap();
        let mut cmd = Command::new("sh");
        cmd.args(["-c", "sleep 10"]);
        let err = run_bounded(&mut cmd, 2, Duration::from_millis(200), &stderr_path).unwrap_err();
        assert!(matches!(err, RenderError::RenderTimedOut { page: 2, .. }));
    }

    #[test]
    fn test_rasterize_missing_pdf_is_render_failure() {
        if which::which(RASTERIZER_TOOL).is_err() {
            return; // rasterizer not installed in this environment
        }
        let err = rasterize_page(
            Path::new("/nonexistent/input.pdf"),
            1,
            72,
            Duration::from_secs(30),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            RenderError::PageRenderFailed { .. } | RenderError::MissingPageImage(_)
        ));
    }
}
