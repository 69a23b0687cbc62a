//! Element and page-state waits
//!
//! Unlike the boolean-returning condition poller, every wait here fails with
//! [`Error::Timeout`](crate::Error::Timeout) when its bound expires, and the
//! error propagates to the calling test.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

use crate::driver::{DriverPage, ElementState, LoadState};
use crate::page::Locator;
use crate::{Error, Result};

/// Default interval between state probes
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);
/// Settle period used to approximate network-idle
const NETWORK_IDLE_SETTLE: Duration = Duration::from_millis(500);

/// Waits for element and page state transitions on one page
#[derive(Clone)]
pub struct ElementWaiter {
    page: Arc<dyn DriverPage>,
    poll_interval: Duration,
}

impl ElementWaiter {
    pub fn new(page: Arc<dyn DriverPage>) -> Self {
        Self {
            page,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the probe interval
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Wait until an element reaches the requested state
    ///
    /// Returns a re-resolvable [`Locator`] for the selector. Satisfied
    /// states return immediately without touching page state, so repeated
    /// calls on an already-satisfied check are cheap and side-effect free.
    pub async fn wait_for_element(
        &self,
        selector: &str,
        state: ElementState,
        timeout: Duration,
    ) -> Result<Locator> {
        debug!(selector, ?state, timeout_ms = timeout.as_millis() as u64, "Waiting for element");
        let page = self.page.clone();
        self.poll_until(
            timeout,
            || format!("element {} did not become {:?}", selector, state),
            || {
                let page = page.clone();
                let selector = selector.to_string();
                async move {
                    match state {
                        ElementState::Attached => Ok(page.query(&selector).await?.is_some()),
                        ElementState::Detached => Ok(page.query(&selector).await?.is_none()),
                        ElementState::Visible => match page.query(&selector).await? {
                            Some(element) => element.is_visible().await,
                            None => Ok(false),
                        },
                        ElementState::Hidden => match page.query(&selector).await? {
                            Some(element) => Ok(!element.is_visible().await?),
                            None => Ok(true),
                        },
                    }
                }
            },
        )
        .await?;

        Ok(Locator::new(self.page.clone(), selector))
    }

    /// Wait until the page URL matches a `*`-wildcard pattern
    pub async fn wait_for_url(&self, pattern: &str, timeout: Duration) -> Result<()> {
        debug!(pattern, timeout_ms = timeout.as_millis() as u64, "Waiting for URL");
        let page = self.page.clone();
        self.poll_until(
            timeout,
            || format!("URL did not match {}", pattern),
            || {
                let page = page.clone();
                let pattern = pattern.to_string();
                async move { Ok(url_matches(&pattern, &page.url().await?)) }
            },
        )
        .await
    }

    /// Wait until the document reaches a load state
    pub async fn wait_for_load_state(&self, state: LoadState, timeout: Duration) -> Result<()> {
        debug!(?state, timeout_ms = timeout.as_millis() as u64, "Waiting for load state");
        let page = self.page.clone();
        self.poll_until(
            timeout,
            || format!("load state {:?} not reached", state),
            || {
                let page = page.clone();
                async move {
                    let ready = page.evaluate("document.readyState").await?;
                    Ok(match state {
                        LoadState::DomContentLoaded => {
                            ready == "interactive" || ready == "complete"
                        }
                        LoadState::Load | LoadState::NetworkIdle => ready == "complete",
                    })
                }
            },
        )
        .await?;

        if state == LoadState::NetworkIdle {
            // Approximation: no CDP network-event plumbing at this layer.
            tokio::time::sleep(NETWORK_IDLE_SETTLE).await;
        }
        Ok(())
    }

    /// Wait until a JavaScript expression evaluates truthy in the page
    pub async fn wait_for_script_condition(
        &self,
        expression: &str,
        timeout: Duration,
    ) -> Result<()> {
        debug!(expression, timeout_ms = timeout.as_millis() as u64, "Waiting for script condition");
        let page = self.page.clone();
        self.poll_until(
            timeout,
            || format!("script condition never turned truthy: {}", expression),
            || {
                let page = page.clone();
                let expression = expression.to_string();
                async move { Ok(is_truthy(&page.evaluate(&expression).await?)) }
            },
        )
        .await
    }

    /// Shared deadline loop: probe at least once, then every poll interval
    ///
    /// Probe errors (driver failures) propagate as-is; expiry becomes a
    /// timeout error built from `describe`.
    async fn poll_until<D, F, Fut>(&self, timeout: Duration, describe: D, mut probe: F) -> Result<()>
    where
        D: Fn() -> String,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<bool>>,
    {
        let deadline = Instant::now() + timeout;
        loop {
            if probe().await? {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(Error::timeout(format!(
                    "{} within {}ms",
                    describe(),
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}

/// JavaScript-style truthiness over a JSON value
fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

/// Match a URL against a pattern where `*` spans any characters
///
/// `**` collapses to `*`; a pattern without wildcards must match exactly.
pub fn url_matches(pattern: &str, url: &str) -> bool {
    let pattern = pattern.replace("**", "*");
    wildcard_match(pattern.as_bytes(), url.as_bytes())
}

fn wildcard_match(pattern: &[u8], text: &[u8]) -> bool {
    let (mut p, mut t) = (0usize, 0usize);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if p < pattern.len() && (pattern[p] == text[t]) {
            p += 1;
            t += 1;
        } else if p < pattern.len() && pattern[p] == b'*' {
            star = Some((p, t));
            p += 1;
        } else if let Some((sp, st)) = star {
            p = sp + 1;
            t = st + 1;
            star = Some((sp, st + 1));
        } else {
            return false;
        }
    }
    while p < pattern.len() && pattern[p] == b'*' {
        p += 1;
    }
    p == pattern.len()
}

#[cfg(test)]
mod pattern_tests {
    use super::*;

    #[test]
    fn exact_match_without_wildcards() {
        assert!(url_matches("https://a.com/x", "https://a.com/x"));
        assert!(!url_matches("https://a.com/x", "https://a.com/y"));
    }

    #[test]
    fn single_star_spans_path_segments() {
        assert!(url_matches("*/complicated-page", "https://a.com/complicated-page"));
        assert!(url_matches("https://a.com/*", "https://a.com/deep/path?q=1"));
    }

    #[test]
    fn double_star_collapses() {
        assert!(url_matches("**/complicated-page", "https://a.com/x/complicated-page"));
    }

    #[test]
    fn middle_wildcards() {
        assert!(url_matches("https://*.example.com/*/end", "https://www.example.com/a/b/end"));
        assert!(!url_matches("https://*.example.com/end", "https://example.org/end"));
    }

    #[test]
    fn truthiness_rules() {
        use serde_json::json;
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!("ready")));
        assert!(is_truthy(&json!({})));
    }
}
