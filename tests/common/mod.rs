//! Common test utilities
//!
//! Shared helpers and fixtures for the integration tests: scripted mock
//! setups for the lifecycle suite and real-browser settings for the
//! ignored end-to-end suite.

use std::sync::Arc;

use e2e_oxide::driver::{Driver, MockDriver};
use e2e_oxide::{Settings, SessionLifecycleManager};

/// Lifecycle manager over a scripted mock driver, artifacts in a temp dir
#[allow(dead_code)]
pub fn mock_manager(trace: bool) -> (MockDriver, SessionLifecycleManager, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let driver = MockDriver::new();
    let settings = Settings {
        trace,
        screenshots_dir: dir.path().join("screenshots"),
        trace_dir: dir.path().join("test-results"),
        ..Default::default()
    };
    let manager =
        SessionLifecycleManager::new(Arc::new(driver.clone()) as Arc<dyn Driver>, settings);
    (driver, manager, dir)
}

/// Settings for the real-browser suite: headless, artifacts in a temp dir
#[allow(dead_code)]
pub fn live_settings(dir: &tempfile::TempDir, trace: bool) -> Settings {
    Settings {
        headless: true,
        trace,
        screenshots_dir: dir.path().join("screenshots"),
        trace_dir: dir.path().join("test-results"),
        logs_dir: dir.path().join("logs"),
        ..Default::default()
    }
}
