//! Real-browser end-to-end tests
//!
//! These drive an actual headless Chromium through the CDP backend and need
//! a browser binary plus network access, so they are ignored by default.
//! Run them with `--include-ignored`.

mod common;

use common::live_settings;
use e2e_oxide::driver::{CdpDriver, Driver, ElementState};
use e2e_oxide::page::BasePage;
use e2e_oxide::pages::ComplicatedPage;
use e2e_oxide::wait::ElementWaiter;
use e2e_oxide::SessionLifecycleManager;
use std::sync::Arc;
use std::time::Duration;

fn live_manager(trace: bool) -> (SessionLifecycleManager, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let settings = live_settings(&dir, trace);
    let manager =
        SessionLifecycleManager::new(Arc::new(CdpDriver::new()) as Arc<dyn Driver>, settings);
    (manager, dir)
}

#[tokio::test]
#[ignore = "requires a Chromium binary and network access"]
async fn practice_site_title_is_reported() {
    let (manager, _dir) = live_manager(false);
    let settings = manager.settings().clone();

    manager
        .run_test("practice_site_title", |fixture| async move {
            let base = BasePage::from_settings(fixture.page.clone(), &settings);
            base.navigate("").await?;
            let title = base.title().await?;
            assert!(title.contains("Ultimate"), "unexpected title: {}", title);
            Ok(())
        })
        .await
        .unwrap();
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary and network access"]
async fn missing_element_wait_respects_its_bound() {
    let (manager, _dir) = live_manager(false);
    let settings = manager.settings().clone();

    manager
        .run_test("missing_element_bound", |fixture| async move {
            let base = BasePage::from_settings(fixture.page.clone(), &settings);
            base.navigate("").await?;

            let waiter = ElementWaiter::new(fixture.page.clone());
            let started = std::time::Instant::now();
            let err = waiter
                .wait_for_element(
                    "#definitely-not-on-this-page",
                    ElementState::Visible,
                    Duration::from_millis(500),
                )
                .await
                .unwrap_err();
            assert!(err.is_timeout());
            assert!(started.elapsed() >= Duration::from_millis(500));
            assert!(started.elapsed() < Duration::from_secs(5));
            Ok(())
        })
        .await
        .unwrap();
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary and network access"]
async fn complicated_page_has_many_buttons() {
    let (manager, _dir) = live_manager(false);
    let settings = manager.settings().clone();

    manager
        .run_test("complicated_page_buttons", |fixture| async move {
            let page = ComplicatedPage::new(fixture.page.clone(), &settings);
            page.open().await?;
            let count = page.button_count().await?;
            assert!(count > 1, "expected repeated buttons, found {}", count);
            Ok(())
        })
        .await
        .unwrap();
    manager.shutdown().await.unwrap();
}

#[tokio::test]
#[ignore = "requires a Chromium binary and network access"]
async fn traced_run_produces_archive() {
    let (manager, dir) = live_manager(true);
    let settings = manager.settings().clone();

    manager
        .run_test("traced_live_run", |fixture| async move {
            let base = BasePage::from_settings(fixture.page.clone(), &settings);
            base.navigate("").await?;
            Ok(())
        })
        .await
        .unwrap();
    manager.shutdown().await.unwrap();

    let archive = dir
        .path()
        .join("test-results")
        .join("trace-traced_live_run.zip");
    let len = std::fs::metadata(&archive).unwrap().len();
    assert!(len > 0, "trace archive is empty");
}
