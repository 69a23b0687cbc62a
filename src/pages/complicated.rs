//! "Complicated Page" with many repeated widgets

use std::sync::Arc;
use tracing::debug;

use crate::config::Settings;
use crate::driver::DriverPage;
use crate::page::{BasePage, Locator};
use crate::{Error, Result};

const PAGE_PATH: &str = "complicated-page";
const SECTION_BUTTONS: &str = ".et_pb_button";
const SECTION_SOCIAL: &str = ".et_pb_social_media_follow";

/// Big page with many elements
#[derive(Clone)]
pub struct ComplicatedPage {
    base: BasePage,
}

impl ComplicatedPage {
    pub fn new(page: Arc<dyn DriverPage>, settings: &Settings) -> Self {
        Self {
            base: BasePage::from_settings(page, settings),
        }
    }

    pub fn base(&self) -> &BasePage {
        &self.base
    }

    pub async fn open(&self) -> Result<()> {
        self.base.navigate(PAGE_PATH).await
    }

    pub async fn title(&self) -> Result<String> {
        self.base.title().await
    }

    /// All call-to-action buttons on the page
    pub fn buttons(&self) -> Locator {
        self.base.locator(SECTION_BUTTONS)
    }

    pub async fn button_count(&self) -> Result<usize> {
        self.buttons().count().await
    }

    /// Click the `index`-th call-to-action button
    pub async fn click_button(&self, index: usize) -> Result<()> {
        debug!(index, "Clicking call-to-action button");
        self.buttons().nth(index).await?.click().await
    }

    pub fn social_follow_section(&self) -> Locator {
        self.base.locator(SECTION_SOCIAL)
    }

    pub async fn scroll_by(&self, delta_y: f64) -> Result<()> {
        self.base.scroll_by(0.0, delta_y).await
    }

    /// Scroll the first element whose text contains `fragment` into view
    pub async fn scroll_to_text(&self, fragment: &str) -> Result<()> {
        let script = format!(
            "(() => {{ const needle = '{}'; \
             const el = Array.from(document.querySelectorAll('h1,h2,h3,h4,p,a,button'))\
             .find(e => e.textContent.includes(needle)); \
             if (!el) return false; \
             el.scrollIntoView({{ block: 'center' }}); return true; }})()",
            crate::driver::scripts::escape_js_str(fragment)
        );
        let found = self.base.evaluate(&script).await?;
        if found == serde_json::Value::Bool(true) {
            Ok(())
        } else {
            Err(Error::element_not_found(format!("text {:?}", fragment)))
        }
    }
}
