//! Driver boundary tests

use super::mock::{MockDriver, MockElementSpec};
use super::traits::*;
use crate::Error;
use std::sync::Arc;

#[test]
fn engine_parses_all_three_identifiers() {
    assert_eq!("chromium".parse::<Engine>().unwrap(), Engine::Chromium);
    assert_eq!("Firefox".parse::<Engine>().unwrap(), Engine::Firefox);
    assert_eq!(" webkit ".parse::<Engine>().unwrap(), Engine::Webkit);
}

#[test]
fn engine_rejects_anything_else() {
    for bad in ["chrome", "safari", "", "edge"] {
        let err = bad.parse::<Engine>().unwrap_err();
        assert!(matches!(err, Error::Configuration(_)), "{}", bad);
    }
}

#[test]
fn engine_display_round_trips() {
    for engine in [Engine::Chromium, Engine::Firefox, Engine::Webkit] {
        assert_eq!(engine.to_string().parse::<Engine>().unwrap(), engine);
    }
}

#[test]
fn element_state_parsing() {
    assert_eq!(
        "visible".parse::<ElementState>().unwrap(),
        ElementState::Visible
    );
    assert_eq!(
        "DETACHED".parse::<ElementState>().unwrap(),
        ElementState::Detached
    );
    assert!("gone".parse::<ElementState>().is_err());
}

#[test]
fn load_state_parsing() {
    assert_eq!("load".parse::<LoadState>().unwrap(), LoadState::Load);
    assert_eq!(
        "domcontentloaded".parse::<LoadState>().unwrap(),
        LoadState::DomContentLoaded
    );
    assert_eq!(
        "networkidle".parse::<LoadState>().unwrap(),
        LoadState::NetworkIdle
    );
    assert!("eventually".parse::<LoadState>().is_err());
}

#[test]
fn launch_options_defaults() {
    let options = LaunchOptions::default();
    assert_eq!(options.engine, Engine::Chromium);
    assert!(options.headless);
    assert_eq!(options.slow_mo_ms, 0);
    assert_eq!(options.launch_timeout_ms, 30_000);
    assert!(options.extra_args.is_empty());
}

#[test]
fn context_options_defaults() {
    let options = ContextOptions::default();
    assert_eq!(options.viewport, Viewport::Maximal);
    assert!(!options.ignore_https_errors);
    assert!(options.permissions.is_empty());
}

#[tokio::test]
async fn mock_launch_records_engine() {
    let driver = MockDriver::new();
    let session = driver.launch(LaunchOptions::default()).await.unwrap();

    assert_eq!(session.engine(), Engine::Chromium);
    assert!(session.is_active());
    assert!(driver.log.contains("session.launch:chromium"));
}

#[tokio::test]
async fn mock_launch_can_be_scripted_to_fail() {
    let driver = MockDriver::new();
    driver
        .world
        .fail_launch
        .store(true, std::sync::atomic::Ordering::SeqCst);

    let err = driver.launch(LaunchOptions::default()).await.unwrap_err();
    assert!(matches!(err, Error::Driver(_)));
}

#[tokio::test]
async fn mock_context_and_page_hierarchy() {
    let driver = MockDriver::new();
    let session = driver.launch(LaunchOptions::default()).await.unwrap();
    let context = session.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    assert_eq!(page.context_id(), context.id());
    assert!(page.is_active());

    page.close().await.unwrap();
    context.close().await.unwrap();
    assert!(!context.is_active());

    let events = driver.log.events();
    assert_eq!(
        events,
        vec![
            "session.launch:chromium",
            "context.create",
            "page.create",
            "page.close",
            "context.close",
        ]
    );
}

#[tokio::test]
async fn mock_elements_follow_the_scripted_world() {
    let driver = MockDriver::new();
    let session = driver.launch(LaunchOptions::default()).await.unwrap();
    let context = session.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    assert!(page.query("#login").await.unwrap().is_none());
    assert_eq!(page.query_count("#login").await.unwrap(), 0);

    driver.world.set_element(
        "#login",
        MockElementSpec {
            text: "Sign in".into(),
            ..Default::default()
        },
    );

    let element = page.query("#login").await.unwrap().unwrap();
    assert_eq!(element.inner_text().await.unwrap(), "Sign in");
    assert!(element.is_visible().await.unwrap());

    element.fill("admin").await.unwrap();
    assert_eq!(element.input_value().await.unwrap(), "admin");
}

#[tokio::test]
async fn mock_element_errors_after_removal() {
    let driver = MockDriver::new();
    let session = driver.launch(LaunchOptions::default()).await.unwrap();
    let context = session.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    driver.world.set_element("#flash", MockElementSpec::default());
    let element = page.query("#flash").await.unwrap().unwrap();

    driver.world.remove_element("#flash");
    let err = element.click().await.unwrap_err();
    assert!(matches!(err, Error::ElementNotFound(_)));
}

#[tokio::test]
async fn mock_trace_lifecycle() {
    let driver = MockDriver::new();
    let session = driver.launch(LaunchOptions::default()).await.unwrap();
    let context: Arc<dyn DriverContext> =
        session.new_context(ContextOptions::default()).await.unwrap();

    context.trace_start(TraceOptions::default()).await.unwrap();
    let archive = context.trace_stop().await.unwrap();
    assert!(!archive.is_empty());

    let trace_start = driver.log.index_of("trace.start").unwrap();
    let trace_stop = driver.log.index_of("trace.stop").unwrap();
    assert!(trace_start < trace_stop);
}

#[tokio::test]
async fn element_handles_render_debug_output() {
    let driver = MockDriver::new();
    driver.world.set_element("#cta", MockElementSpec::default());
    let session = driver.launch(LaunchOptions::default()).await.unwrap();
    let context = session.new_context(ContextOptions::default()).await.unwrap();
    let page = context.new_page().await.unwrap();

    let element = page.query("#cta").await.unwrap().unwrap();
    let rendered = format!("{:?}", element);
    assert!(rendered.contains("#cta"), "{}", rendered);

    // Absent elements render through the same bound on the Option.
    let missing = page.query("#missing").await.unwrap();
    assert_eq!(format!("{:?}", missing), "None");
}
