//! Lifecycle integration tests
//!
//! Validates complete test runs through the public API: fixture setup,
//! page-object interaction, teardown ordering and artifact capture, all
//! against the scripted mock driver.

mod common;

use common::mock_manager;
use e2e_oxide::driver::MockElementSpec;
use e2e_oxide::page::{Asserts, BasePage};
use e2e_oxide::{Error, TestOutcome};
use std::time::Duration;

#[tokio::test]
async fn full_run_with_page_object_interaction() {
    let (driver, manager, _dir) = mock_manager(false);
    let world = driver.world();
    world.set_title("Automation Practice");
    world.set_element("#cta", MockElementSpec::default());

    let report = manager
        .run_test("cta_click", |fixture| async move {
            let base = BasePage::new(
                fixture.page.clone(),
                "https://ultimateqa.com/automation",
                Duration::from_secs(1),
            );
            base.navigate("/").await?;
            base.click("#cta").await?;
            Asserts::new(fixture.page.clone())
                .with_timeout(Duration::from_millis(300))
                .title_contains("Practice")
                .await
        })
        .await
        .unwrap();
    assert!(report.screenshot.is_none());

    let events = driver.log.events();
    let click = events.iter().position(|e| e == "element.click:#cta").unwrap();
    let page_close = events.iter().position(|e| e == "page.close").unwrap();
    let context_close = events.iter().position(|e| e == "context.close").unwrap();
    assert!(click < page_close);
    assert!(page_close < context_close);
}

#[tokio::test]
async fn failing_run_leaves_screenshot_and_propagates_error() {
    let (driver, manager, dir) = mock_manager(false);

    let err = manager
        .run_test("missing_banner", |fixture| async move {
            Asserts::new(fixture.page.clone())
                .with_timeout(Duration::from_millis(200))
                .with_poll_interval(Duration::from_millis(20))
                .element_visible("#banner")
                .await
        })
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Assertion(_)));

    let shots: Vec<_> = std::fs::read_dir(dir.path().join("screenshots"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(shots.len(), 1);
    assert!(std::fs::metadata(&shots[0]).unwrap().len() > 0);
    assert!(driver.log.contains("context.close"));
}

#[tokio::test]
async fn traced_run_writes_archive_before_context_close() {
    let (driver, manager, dir) = mock_manager(true);

    manager
        .run_test("traced_flow", |_fixture| async { Ok(()) })
        .await
        .unwrap();

    let trace_stop = driver.log.index_of("trace.stop").unwrap();
    let context_close = driver.log.index_of("context.close").unwrap();
    assert!(trace_stop < context_close);

    let archive = dir.path().join("test-results").join("trace-traced_flow.zip");
    assert!(std::fs::metadata(&archive).unwrap().len() > 0);
}

#[tokio::test]
async fn consecutive_runs_share_one_browser() {
    let (driver, manager, _dir) = mock_manager(false);

    for name in ["alpha", "beta", "gamma"] {
        manager
            .run_test(name, |_fixture| async { Ok(()) })
            .await
            .unwrap();
    }
    manager.shutdown().await.unwrap();

    let events = driver.log.events();
    assert_eq!(
        events
            .iter()
            .filter(|e| e.starts_with("session.launch"))
            .count(),
        1
    );
    assert_eq!(events.iter().filter(|e| *e == "context.create").count(), 3);
    assert!(driver.log.contains("session.close"));
}

#[tokio::test]
async fn explicit_teardown_matches_outcome() {
    let (driver, manager, _dir) = mock_manager(false);

    let fixture = manager.setup("manual").await.unwrap();
    manager
        .teardown(&fixture, TestOutcome::Failed)
        .await
        .unwrap();

    // Failed teardown attempts the screenshot before closing anything.
    let screenshot = driver.log.index_of("page.screenshot").unwrap();
    let page_close = driver.log.index_of("page.close").unwrap();
    assert!(screenshot < page_close);
}
