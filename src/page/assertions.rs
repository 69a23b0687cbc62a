//! Retrying page assertions
//!
//! Each assertion re-probes the page until it holds or the bound expires.
//! Expiry raises [`Error::Assertion`](crate::Error::Assertion) carrying the
//! expected and last observed values, distinct from a wait timeout.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::driver::DriverPage;
use crate::page::Locator;
use crate::{Error, Result};

const DEFAULT_ASSERT_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_ASSERT_INTERVAL: Duration = Duration::from_millis(100);

/// Retrying assertions over one page
#[derive(Clone)]
pub struct Asserts {
    page: Arc<dyn DriverPage>,
    timeout: Duration,
    poll_interval: Duration,
}

impl Asserts {
    pub fn new(page: Arc<dyn DriverPage>) -> Self {
        Self {
            page,
            timeout: DEFAULT_ASSERT_TIMEOUT,
            poll_interval: DEFAULT_ASSERT_INTERVAL,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    fn locator(&self, selector: &str) -> Locator {
        Locator::new(self.page.clone(), selector)
    }

    pub async fn url_contains(&self, fragment: &str) -> Result<()> {
        let page = self.page.clone();
        self.check(
            || format!("URL contains {:?}", fragment),
            || {
                let page = page.clone();
                let fragment = fragment.to_string();
                async move {
                    let url = page.url().await?;
                    Ok((url.contains(&fragment), url))
                }
            },
        )
        .await
    }

    pub async fn title_contains(&self, fragment: &str) -> Result<()> {
        let page = self.page.clone();
        self.check(
            || format!("title contains {:?}", fragment),
            || {
                let page = page.clone();
                let fragment = fragment.to_string();
                async move {
                    let title = page.title().await?;
                    Ok((title.contains(&fragment), title))
                }
            },
        )
        .await
    }

    pub async fn element_visible(&self, selector: &str) -> Result<()> {
        let locator = self.locator(selector);
        self.check(
            || format!("element {} is visible", selector),
            || {
                let locator = locator.clone();
                async move {
                    let visible = locator.is_visible().await?;
                    Ok((visible, format!("visible={}", visible)))
                }
            },
        )
        .await
    }

    pub async fn element_text(&self, selector: &str, expected: &str) -> Result<()> {
        let locator = self.locator(selector);
        self.check(
            || format!("element {} has text {:?}", selector, expected),
            || {
                let locator = locator.clone();
                let expected = expected.to_string();
                async move {
                    match locator.resolve().await {
                        Ok(element) => {
                            let text = element.inner_text().await?;
                            Ok((text == expected, text))
                        }
                        Err(_) => Ok((false, "<element not found>".to_string())),
                    }
                }
            },
        )
        .await
    }

    pub async fn element_contains_text(&self, selector: &str, fragment: &str) -> Result<()> {
        let locator = self.locator(selector);
        self.check(
            || format!("element {} contains text {:?}", selector, fragment),
            || {
                let locator = locator.clone();
                let fragment = fragment.to_string();
                async move {
                    match locator.resolve().await {
                        Ok(element) => {
                            let text = element.inner_text().await?;
                            Ok((text.contains(&fragment), text))
                        }
                        Err(_) => Ok((false, "<element not found>".to_string())),
                    }
                }
            },
        )
        .await
    }

    pub async fn element_count(&self, selector: &str, expected: usize) -> Result<()> {
        let locator = self.locator(selector);
        self.check(
            || format!("selector {} matches {} elements", selector, expected),
            || {
                let locator = locator.clone();
                async move {
                    let count = locator.count().await?;
                    Ok((count == expected, count.to_string()))
                }
            },
        )
        .await
    }

    pub async fn element_enabled(&self, selector: &str) -> Result<()> {
        self.enabled_state(selector, true).await
    }

    pub async fn element_disabled(&self, selector: &str) -> Result<()> {
        self.enabled_state(selector, false).await
    }

    async fn enabled_state(&self, selector: &str, expected: bool) -> Result<()> {
        let locator = self.locator(selector);
        self.check(
            || format!("element {} enabled={}", selector, expected),
            || {
                let locator = locator.clone();
                async move {
                    match locator.resolve().await {
                        Ok(element) => {
                            let enabled = element.is_enabled().await?;
                            Ok((enabled == expected, format!("enabled={}", enabled)))
                        }
                        Err(_) => Ok((false, "<element not found>".to_string())),
                    }
                }
            },
        )
        .await
    }

    pub async fn element_value(&self, selector: &str, expected: &str) -> Result<()> {
        let locator = self.locator(selector);
        self.check(
            || format!("element {} has value {:?}", selector, expected),
            || {
                let locator = locator.clone();
                let expected = expected.to_string();
                async move {
                    match locator.resolve().await {
                        Ok(element) => {
                            let value = element.input_value().await?;
                            Ok((value == expected, value))
                        }
                        Err(_) => Ok((false, "<element not found>".to_string())),
                    }
                }
            },
        )
        .await
    }

    /// Retry loop shared by all assertions
    ///
    /// The probe returns whether the assertion holds plus a rendering of the
    /// last observed value for the failure message. Driver errors propagate.
    async fn check<D, F, Fut>(&self, describe: D, mut probe: F) -> Result<()>
    where
        D: Fn() -> String,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(bool, String)>>,
    {
        let deadline = Instant::now() + self.timeout;
        let mut last_actual;
        loop {
            let (holds, actual) = probe().await?;
            if holds {
                return Ok(());
            }
            last_actual = actual;
            if Instant::now() >= deadline {
                break;
            }
            debug!(expected = %describe(), actual = %last_actual, "Assertion not satisfied yet, retrying");
            tokio::time::sleep(self.poll_interval).await;
        }
        Err(Error::assertion(format!(
            "expected {}, last observed {:?} after {}ms",
            describe(),
            last_actual,
            self.timeout.as_millis()
        )))
    }
}
