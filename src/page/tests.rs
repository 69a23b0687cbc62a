//! Page layer tests against the scripted mock driver

use std::sync::Arc;
use std::time::Duration;

use super::{Asserts, BasePage, Locator};
use crate::driver::{
    ContextOptions, Driver, DriverPage, LaunchOptions, MockDriver, MockElementSpec, MockWorld,
};

async fn mock_page() -> (Arc<MockWorld>, Arc<dyn DriverPage>, MockDriver) {
    let driver = MockDriver::new();
    let world = driver.world();
    let session = driver.launch(LaunchOptions::default()).await.unwrap();
    let context = session
        .new_context(ContextOptions::default())
        .await
        .unwrap();
    let page = context.new_page().await.unwrap();
    (world, page, driver)
}

fn base_page(page: Arc<dyn DriverPage>) -> BasePage {
    BasePage::new(page, "https://ultimateqa.com/automation", Duration::from_millis(300))
}

#[tokio::test]
async fn navigate_joins_relative_path_with_base_url() {
    let (world, page, _driver) = mock_page().await;
    let base = base_page(page);

    base.navigate("/complicated-page").await.unwrap();
    assert_eq!(
        *world.url.lock().unwrap(),
        "https://ultimateqa.com/automation/complicated-page"
    );
}

#[tokio::test]
async fn navigate_keeps_absolute_url() {
    let (world, page, _driver) = mock_page().await;
    let base = base_page(page);

    base.navigate("https://example.org/login").await.unwrap();
    assert_eq!(*world.url.lock().unwrap(), "https://example.org/login");
}

#[tokio::test]
async fn click_waits_then_clicks() {
    let (world, page, driver) = mock_page().await;
    world.set_element("#submit", MockElementSpec::default());

    base_page(page).click("#submit").await.unwrap();
    assert!(driver.log.contains("element.click:#submit"));
}

#[tokio::test]
async fn click_on_missing_element_times_out() {
    let (_world, page, _driver) = mock_page().await;

    let err = base_page(page).click("#nope").await.unwrap_err();
    assert!(err.is_timeout());
}

#[tokio::test]
async fn fill_and_read_back_value() {
    let (world, page, _driver) = mock_page().await;
    world.set_element("input[name=email]", MockElementSpec::default());
    let base = base_page(page);

    base.fill("input[name=email]", "qa@example.org").await.unwrap();
    assert_eq!(base.get_value("input[name=email]").await.unwrap(), "qa@example.org");
}

#[tokio::test]
async fn is_visible_reports_false_for_absent_element() {
    let (_world, page, _driver) = mock_page().await;
    assert!(!base_page(page).is_visible("#ghost").await.unwrap());
}

#[tokio::test]
async fn locator_resolves_nth_element() {
    let (world, page, _driver) = mock_page().await;
    world.set_element(
        ".card",
        MockElementSpec {
            count: 3,
            ..Default::default()
        },
    );

    let locator = Locator::new(page, ".card");
    assert_eq!(locator.count().await.unwrap(), 3);
    assert!(locator.nth(2).await.is_ok());
    let err = locator.nth(3).await.unwrap_err();
    assert!(err.to_string().contains("index 3"));
}

#[tokio::test]
async fn locator_survives_element_replacement() {
    let (world, page, _driver) = mock_page().await;
    world.set_element(
        "#status",
        MockElementSpec {
            text: "pending".to_string(),
            ..Default::default()
        },
    );
    let locator = Locator::new(page, "#status");
    assert_eq!(locator.inner_text().await.unwrap(), "pending");

    world.set_element(
        "#status",
        MockElementSpec {
            text: "done".to_string(),
            ..Default::default()
        },
    );
    assert_eq!(locator.inner_text().await.unwrap(), "done");
}

fn fast_asserts(page: Arc<dyn DriverPage>) -> Asserts {
    Asserts::new(page)
        .with_timeout(Duration::from_millis(300))
        .with_poll_interval(Duration::from_millis(20))
}

#[tokio::test]
async fn assert_title_contains_passes_and_fails() {
    let (world, page, _driver) = mock_page().await;
    world.set_title("Ultimate QA | Automation");
    let asserts = fast_asserts(page);

    asserts.title_contains("Automation").await.unwrap();

    let err = asserts.title_contains("Checkout").await.unwrap_err();
    assert!(matches!(err, crate::Error::Assertion(_)), "unexpected error: {}", err);
    assert!(err.to_string().contains("Ultimate QA"));
}

#[tokio::test]
async fn assert_retries_until_condition_holds() {
    let (world, page, _driver) = mock_page().await;
    world.set_url("https://ultimateqa.com/");

    let mutator = world.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(80)).await;
        mutator.set_url("https://ultimateqa.com/complicated-page");
    });

    fast_asserts(page)
        .with_timeout(Duration::from_secs(5))
        .url_contains("complicated-page")
        .await
        .unwrap();
}

#[tokio::test]
async fn assert_element_text_reports_last_observed_value() {
    let (world, page, _driver) = mock_page().await;
    world.set_element(
        "h1",
        MockElementSpec {
            text: "Welcome".to_string(),
            ..Default::default()
        },
    );

    let err = fast_asserts(page)
        .element_text("h1", "Goodbye")
        .await
        .unwrap_err();
    assert!(err.to_string().contains("Welcome"));
}

#[tokio::test]
async fn assert_count_and_enabled_state() {
    let (world, page, _driver) = mock_page().await;
    world.set_element(
        "button.cta",
        MockElementSpec {
            count: 2,
            enabled: false,
            ..Default::default()
        },
    );
    let asserts = fast_asserts(page);

    asserts.element_count("button.cta", 2).await.unwrap();
    asserts.element_disabled("button.cta").await.unwrap();
    assert!(asserts.element_enabled("button.cta").await.is_err());
}
