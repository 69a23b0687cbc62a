//! Failure screenshots and trace archives
//!
//! All capture errors are reported as
//! [`Error::ArtifactCapture`](crate::Error::ArtifactCapture) so callers can
//! log them without disturbing the test outcome they accompany.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use chrono::Local;
use tracing::info;

use crate::driver::{DriverContext, DriverPage};
use crate::{Error, Result};

/// Replace filesystem-hostile characters in a test name
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// `{dir}/{test}_{YYYYMMDD_HHMMSS}.png`
pub fn screenshot_path(dir: &Path, test_name: &str) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d_%H%M%S");
    dir.join(format!("{}_{}.png", sanitize(test_name), stamp))
}

/// `{dir}/trace-{test}.zip`
pub fn trace_path(dir: &Path, test_name: &str) -> PathBuf {
    dir.join(format!("trace-{}.zip", sanitize(test_name)))
}

/// Capture a full-page screenshot of the current page state
pub async fn save_failure_screenshot(
    page: &Arc<dyn DriverPage>,
    dir: &Path,
    test_name: &str,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::artifact_capture(format!("creating {}: {}", dir.display(), e)))?;
    let bytes = page
        .screenshot(true)
        .await
        .map_err(|e| Error::artifact_capture(format!("capturing screenshot: {}", e)))?;
    let path = screenshot_path(dir, test_name);
    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| Error::artifact_capture(format!("writing {}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Failure screenshot saved");
    Ok(path)
}

/// Stop tracing on the context and write the archive
///
/// Must run before the context is closed; a closed context has no trace
/// left to flush.
pub async fn save_trace(
    context: &Arc<dyn DriverContext>,
    dir: &Path,
    test_name: &str,
) -> Result<PathBuf> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| Error::artifact_capture(format!("creating {}: {}", dir.display(), e)))?;
    let archive = context
        .trace_stop()
        .await
        .map_err(|e| Error::artifact_capture(format!("stopping trace: {}", e)))?;
    let path = trace_path(dir, test_name);
    tokio::fs::write(&path, archive)
        .await
        .map_err(|e| Error::artifact_capture(format!("writing {}: {}", path.display(), e)))?;
    info!(path = %path.display(), "Trace archive saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_replaces_separators() {
        assert_eq!(sanitize("module::case one"), "module__case_one");
        assert_eq!(sanitize("plain-name_1"), "plain-name_1");
    }

    #[test]
    fn screenshot_path_embeds_name_and_timestamp() {
        let path = screenshot_path(Path::new("screenshots"), "checkout test");
        let file = path.file_name().unwrap().to_str().unwrap();
        assert!(file.starts_with("checkout_test_"));
        assert!(file.ends_with(".png"));
        // name + underscore + YYYYMMDD_HHMMSS + extension
        assert_eq!(file.len(), "checkout_test_".len() + 15 + 4);
    }

    #[test]
    fn trace_path_uses_zip_naming() {
        let path = trace_path(Path::new("test-results"), "smoke");
        assert_eq!(path, Path::new("test-results").join("trace-smoke.zip"));
    }
}
