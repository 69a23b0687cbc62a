//! Deferred element handles
//!
//! A [`Locator`] stores a selector and re-resolves it against the live DOM on
//! every interaction, so a handle stays valid across re-renders of the node
//! it points at.

use std::fmt;
use std::sync::Arc;

use crate::driver::{DriverElement, DriverPage};
use crate::{Error, Result};

/// Re-resolvable handle to the first element matching a selector
#[derive(Clone)]
pub struct Locator {
    page: Arc<dyn DriverPage>,
    selector: String,
}

impl Locator {
    pub fn new(page: Arc<dyn DriverPage>, selector: impl Into<String>) -> Self {
        Self {
            page,
            selector: selector.into(),
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Resolve to the first matching element
    ///
    /// # Errors
    ///
    /// [`Error::ElementNotFound`](crate::Error::ElementNotFound) when no node
    /// currently matches.
    pub async fn resolve(&self) -> Result<Arc<dyn DriverElement>> {
        self.page
            .query(&self.selector)
            .await?
            .ok_or_else(|| Error::element_not_found(&self.selector))
    }

    /// Number of nodes currently matching the selector
    pub async fn count(&self) -> Result<usize> {
        self.page.query_count(&self.selector).await
    }

    /// Resolve to the `index`-th matching element
    pub async fn nth(&self, index: usize) -> Result<Arc<dyn DriverElement>> {
        let elements = self.page.query_all(&self.selector).await?;
        elements.into_iter().nth(index).ok_or_else(|| {
            Error::element_not_found(format!("{} (index {})", self.selector, index))
        })
    }

    pub async fn click(&self) -> Result<()> {
        self.resolve().await?.click().await
    }

    pub async fn fill(&self, value: &str) -> Result<()> {
        self.resolve().await?.fill(value).await
    }

    pub async fn type_text(&self, text: &str, delay_ms: u64) -> Result<()> {
        self.resolve().await?.type_text(text, delay_ms).await
    }

    pub async fn inner_text(&self) -> Result<String> {
        self.resolve().await?.inner_text().await
    }

    pub async fn input_value(&self) -> Result<String> {
        self.resolve().await?.input_value().await
    }

    pub async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.resolve().await?.attribute(name).await
    }

    /// Visibility without waiting; an absent element reports `false`
    pub async fn is_visible(&self) -> Result<bool> {
        match self.page.query(&self.selector).await? {
            Some(element) => element.is_visible().await,
            None => Ok(false),
        }
    }

    pub async fn is_enabled(&self) -> Result<bool> {
        self.resolve().await?.is_enabled().await
    }

    pub async fn set_checked(&self, checked: bool) -> Result<()> {
        self.resolve().await?.set_checked(checked).await
    }

    pub async fn select_option(&self, value: &str) -> Result<()> {
        self.resolve().await?.select_option(value).await
    }

    pub async fn hover(&self) -> Result<()> {
        self.resolve().await?.hover().await
    }

    pub async fn scroll_into_view(&self) -> Result<()> {
        self.resolve().await?.scroll_into_view().await
    }

    pub async fn focus(&self) -> Result<()> {
        self.resolve().await?.focus().await
    }
}

impl fmt::Debug for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Locator")
            .field("selector", &self.selector)
            .finish()
    }
}
