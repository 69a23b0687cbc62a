//! Page object tests against the scripted mock driver

use std::sync::Arc;

use super::{ComplicatedPage, IndexPage};
use crate::config::Settings;
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

#[tokio::test]
async fn index_page_opens_base_url() {
    let (world, page, _driver) = mock_page().await;
    let settings = Settings::default();
    let index = IndexPage::new(page, &settings);

    index.open().await.unwrap();
    assert!(world
        .url
        .lock()
        .unwrap()
        .starts_with("https://ultimateqa.com/automation"));
}

#[tokio::test]
async fn index_page_follows_big_page_link() {
    let (world, page, driver) = mock_page().await;
    world.set_element("a[href*='complicated-page']", MockElementSpec::default());
    let settings = Settings::default();

    IndexPage::new(page, &settings).open_big_page().await.unwrap();
    assert!(driver
        .log
        .contains("element.click:a[href*='complicated-page']"));
}

#[tokio::test]
async fn complicated_page_counts_and_clicks_buttons() {
    let (world, page, driver) = mock_page().await;
    world.set_element(
        ".et_pb_button",
        MockElementSpec {
            count: 5,
            ..Default::default()
        },
    );
    let settings = Settings::default();
    let complicated = ComplicatedPage::new(page, &settings);

    assert_eq!(complicated.button_count().await.unwrap(), 5);
    complicated.click_button(2).await.unwrap();
    assert!(driver.log.contains("element.click:.et_pb_button"));

    let err = complicated.click_button(9).await.unwrap_err();
    assert!(err.to_string().contains("index 9"));
}

#[tokio::test]
async fn complicated_page_scrolls() {
    let (world, page, driver) = mock_page().await;
    world.set_eval("", serde_json::Value::Null);
    let settings = Settings::default();
    let complicated = ComplicatedPage::new(page, &settings);

    complicated.scroll_by(800.0).await.unwrap();
    assert!(driver.log.contains("page.scroll_by:800"));
}
