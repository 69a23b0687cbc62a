//! Page object base
//!
//! All page objects wrap a [`BasePage`]. Every interaction first waits for
//! the target to become visible within the implicit wait, then acts, so page
//! object methods never race the DOM they drive.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::config::Settings;
use crate::driver::{DriverPage, ElementState, LoadState};
use crate::page::Locator;
use crate::wait::ElementWaiter;
use crate::Result;

/// Something a page interaction can aim at
#[derive(Debug, Clone)]
pub enum Target {
    /// CSS selector resolved at interaction time
    Selector(String),
    /// Pre-built locator
    Located(Locator),
}

impl From<&str> for Target {
    fn from(selector: &str) -> Self {
        Target::Selector(selector.to_string())
    }
}

impl From<String> for Target {
    fn from(selector: String) -> Self {
        Target::Selector(selector)
    }
}

impl From<Locator> for Target {
    fn from(locator: Locator) -> Self {
        Target::Located(locator)
    }
}

impl Target {
    fn into_locator(self, page: &Arc<dyn DriverPage>) -> Locator {
        match self {
            Target::Selector(selector) => Locator::new(page.clone(), selector),
            Target::Located(locator) => locator,
        }
    }
}

/// Shared behavior for all page objects
#[derive(Clone)]
pub struct BasePage {
    page: Arc<dyn DriverPage>,
    base_url: String,
    implicit_wait: Duration,
    waiter: ElementWaiter,
}

impl BasePage {
    pub fn new(
        page: Arc<dyn DriverPage>,
        base_url: impl Into<String>,
        implicit_wait: Duration,
    ) -> Self {
        let waiter = ElementWaiter::new(page.clone());
        Self {
            page,
            base_url: base_url.into(),
            implicit_wait,
            waiter,
        }
    }

    pub fn from_settings(page: Arc<dyn DriverPage>, settings: &Settings) -> Self {
        Self::new(page, settings.base_url.clone(), settings.implicit_wait())
    }

    pub fn driver_page(&self) -> Arc<dyn DriverPage> {
        self.page.clone()
    }

    pub fn waiter(&self) -> &ElementWaiter {
        &self.waiter
    }

    pub fn locator(&self, selector: impl Into<String>) -> Locator {
        Locator::new(self.page.clone(), selector)
    }

    /// Navigate to an absolute URL or a path under the base URL
    pub async fn navigate(&self, path: &str) -> Result<()> {
        let url = self.resolve_url(path);
        info!(url = %url, "Navigating");
        self.page
            .goto(&url, LoadState::Load, self.page.default_navigation_timeout())
            .await
    }

    fn resolve_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                path.trim_start_matches('/')
            )
        }
    }

    pub async fn url(&self) -> Result<String> {
        self.page.url().await
    }

    pub async fn title(&self) -> Result<String> {
        self.page.title().await
    }

    /// Wait (up to the implicit wait) for the target to be visible, then
    /// hand back a locator for it
    async fn interactable(&self, target: impl Into<Target>) -> Result<Locator> {
        let locator = target.into().into_locator(&self.page);
        self.waiter
            .wait_for_element(locator.selector(), ElementState::Visible, self.implicit_wait)
            .await
    }

    pub async fn click(&self, target: impl Into<Target>) -> Result<()> {
        let locator = self.interactable(target).await?;
        debug!(selector = locator.selector(), "Clicking");
        locator.click().await
    }

    pub async fn fill(&self, target: impl Into<Target>, value: &str) -> Result<()> {
        let locator = self.interactable(target).await?;
        debug!(selector = locator.selector(), "Filling");
        locator.fill(value).await
    }

    pub async fn type_text(
        &self,
        target: impl Into<Target>,
        text: &str,
        delay_ms: u64,
    ) -> Result<()> {
        let locator = self.interactable(target).await?;
        debug!(selector = locator.selector(), "Typing");
        locator.type_text(text, delay_ms).await
    }

    pub async fn get_text(&self, target: impl Into<Target>) -> Result<String> {
        self.interactable(target).await?.inner_text().await
    }

    pub async fn get_value(&self, target: impl Into<Target>) -> Result<String> {
        self.interactable(target).await?.input_value().await
    }

    pub async fn get_attribute(
        &self,
        target: impl Into<Target>,
        name: &str,
    ) -> Result<Option<String>> {
        self.interactable(target).await?.attribute(name).await
    }

    /// Immediate visibility check, no implicit wait
    pub async fn is_visible(&self, target: impl Into<Target>) -> Result<bool> {
        target.into().into_locator(&self.page).is_visible().await
    }

    pub async fn is_enabled(&self, target: impl Into<Target>) -> Result<bool> {
        self.interactable(target).await?.is_enabled().await
    }

    pub async fn check(&self, target: impl Into<Target>) -> Result<()> {
        self.interactable(target).await?.set_checked(true).await
    }

    pub async fn uncheck(&self, target: impl Into<Target>) -> Result<()> {
        self.interactable(target).await?.set_checked(false).await
    }

    pub async fn select_option(&self, target: impl Into<Target>, value: &str) -> Result<()> {
        self.interactable(target).await?.select_option(value).await
    }

    pub async fn hover(&self, target: impl Into<Target>) -> Result<()> {
        self.interactable(target).await?.hover().await
    }

    pub async fn scroll_to(&self, target: impl Into<Target>) -> Result<()> {
        self.interactable(target).await?.scroll_into_view().await
    }

    pub async fn scroll_by(&self, delta_x: f64, delta_y: f64) -> Result<()> {
        self.page.scroll_by(delta_x, delta_y).await
    }

    pub async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        self.page.screenshot(full_page).await
    }

    pub async fn save_screenshot(
        &self,
        path: impl AsRef<std::path::Path>,
        full_page: bool,
    ) -> Result<()> {
        let bytes = self.page.screenshot(full_page).await?;
        tokio::fs::write(path.as_ref(), bytes).await?;
        info!(path = %path.as_ref().display(), "Screenshot saved");
        Ok(())
    }

    pub async fn reload(&self) -> Result<()> {
        self.page.reload().await
    }

    pub async fn go_back(&self) -> Result<()> {
        self.page.go_back().await
    }

    pub async fn go_forward(&self) -> Result<()> {
        self.page.go_forward().await
    }

    pub async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        self.page.evaluate(expression).await
    }
}
