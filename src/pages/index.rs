//! Automation practice landing page

use std::sync::Arc;

use crate::config::Settings;
use crate::driver::DriverPage;
use crate::page::{BasePage, Locator};
use crate::Result;

const BIG_PAGE_LINK: &str = "a[href*='complicated-page']";

/// Landing page of the practice site
#[derive(Clone)]
pub struct IndexPage {
    base: BasePage,
}

impl IndexPage {
    pub fn new(page: Arc<dyn DriverPage>, settings: &Settings) -> Self {
        Self {
            base: BasePage::from_settings(page, settings),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    /// Open the landing page itself
    pub async fn open(&self) -> Result<()> {
        self.base.navigate("").await
    }

    pub async fn title(&self) -> Result<String> {
        self.base.title().await
    }

    pub fn big_page_link(&self) -> Locator {
        self.base.locator(BIG_PAGE_LINK)
    }

    /// Follow the "Big page with many elements" link
    pub async fn open_big_page(&self) -> Result<()> {
        self.base.click(BIG_PAGE_LINK).await
    }
}
