//! Driver boundary traits
//!
//! The framework never talks to a browser directly: everything goes through
//! these traits. The production backend lives in [`crate::driver::chromium`];
//! the mock backend used by the lifecycle and wait tests lives in
//! [`crate::driver::mock`]. Option structs carry named, typed fields with
//! documented defaults instead of opaque keyword pass-through.

use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// Browser engine selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Chromium,
    Firefox,
    Webkit,
}

impl FromStr for Engine {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chromium" => Ok(Engine::Chromium),
            "firefox" => Ok(Engine::Firefox),
            "webkit" => Ok(Engine::Webkit),
            other => Err(crate::Error::configuration(format!(
                "Unsupported browser engine: {}",
                other
            ))),
        }
    }
}

impl fmt::Display for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Engine::Chromium => write!(f, "chromium"),
            Engine::Firefox => write!(f, "firefox"),
            Engine::Webkit => write!(f, "webkit"),
        }
    }
}

/// Options for launching a browser session
#[derive(Debug, Clone)]
pub struct LaunchOptions {
    /// Browser engine
    pub engine: Engine,
    /// Headless mode (no GUI)
    pub headless: bool,
    /// Artificial delay applied before every page action, in milliseconds
    pub slow_mo_ms: u64,
    /// Launch timeout in milliseconds
    pub launch_timeout_ms: u64,
    /// Additional command-line arguments for the browser process
    pub extra_args: Vec<String>,
    /// Explicit browser executable path
    pub executable: Option<PathBuf>,
}

impl Default for LaunchOptions {
    fn default() -> Self {
        Self {
            engine: Engine::Chromium,
            headless: true,
            slow_mo_ms: 0,
            launch_timeout_ms: 30_000,
            extra_args: vec![],
            executable: None,
        }
    }
}

/// Viewport policy for a context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewport {
    /// No fixed size: occupy the maximum available window
    Maximal,
    /// Fixed size in CSS pixels
    Fixed { width: u32, height: u32 },
}

/// Options for creating a browsing context
#[derive(Debug, Clone)]
pub struct ContextOptions {
    /// Locale, e.g. "en-US"
    pub locale: String,
    /// IANA timezone identifier, e.g. "Asia/Shanghai"
    pub timezone_id: String,
    /// Accept invalid certificates
    pub ignore_https_errors: bool,
    /// Permission names to grant, e.g. "geolocation"
    pub permissions: Vec<String>,
    /// Viewport policy
    pub viewport: Viewport,
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            locale: "en-US".to_string(),
            timezone_id: "UTC".to_string(),
            ignore_https_errors: false,
            permissions: vec![],
            viewport: Viewport::Maximal,
        }
    }
}

/// Trace capture options
#[derive(Debug, Clone)]
pub struct TraceOptions {
    /// Capture screenshots along the timeline
    pub screenshots: bool,
    /// Capture DOM snapshots
    pub snapshots: bool,
    /// Capture page sources
    pub sources: bool,
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self {
            screenshots: true,
            snapshots: true,
            sources: true,
        }
    }
}

/// Element state an element wait can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementState {
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl FromStr for ElementState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visible" => Ok(ElementState::Visible),
            "hidden" => Ok(ElementState::Hidden),
            "attached" => Ok(ElementState::Attached),
            "detached" => Ok(ElementState::Detached),
            other => Err(crate::Error::configuration(format!(
                "Unknown element state: {}",
                other
            ))),
        }
    }
}

/// Page load state a load wait can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    Load,
    DomContentLoaded,
    NetworkIdle,
}

impl FromStr for LoadState {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "load" => Ok(LoadState::Load),
            "domcontentloaded" => Ok(LoadState::DomContentLoaded),
            "networkidle" => Ok(LoadState::NetworkIdle),
            other => Err(crate::Error::configuration(format!(
                "Unknown load state: {}",
                other
            ))),
        }
    }
}

/// Browser launcher
///
/// One implementation per backend; the session handle calls `launch` exactly
/// once per run.
#[async_trait]
pub trait Driver: Send + Sync {
    /// Launch a browser session
    async fn launch(&self, options: LaunchOptions) -> Result<Arc<dyn DriverSession>>;
}

/// A launched browser process
#[async_trait]
pub trait DriverSession: Send + Sync + fmt::Debug {
    /// Engine this session was launched with
    fn engine(&self) -> Engine;

    /// Create an isolated browsing context
    async fn new_context(&self, options: ContextOptions) -> Result<Arc<dyn DriverContext>>;

    /// Close the browser process
    async fn close(&self) -> Result<()>;

    /// Check if the session is still usable
    fn is_active(&self) -> bool;
}

/// An isolated browsing context (cookies, storage, permissions)
#[async_trait]
pub trait DriverContext: Send + Sync + fmt::Debug {
    /// Context ID
    fn id(&self) -> &str;

    /// Create a page in this context
    async fn new_page(&self) -> Result<Arc<dyn DriverPage>>;

    /// Start trace recording
    async fn trace_start(&self, options: TraceOptions) -> Result<()>;

    /// Stop trace recording and return the archive bytes
    async fn trace_stop(&self) -> Result<Vec<u8>>;

    /// Close the context
    async fn close(&self) -> Result<()>;

    /// Check if the context is still open
    fn is_active(&self) -> bool;
}

/// One browsing tab
#[async_trait]
pub trait DriverPage: Send + Sync + fmt::Debug {
    /// Page ID
    fn id(&self) -> &str;

    /// Owning context ID
    fn context_id(&self) -> &str;

    /// Navigate and wait for the given load state
    async fn goto(&self, url: &str, wait_until: LoadState, timeout_ms: u64) -> Result<()>;

    /// Current URL
    async fn url(&self) -> Result<String>;

    /// Current document title
    async fn title(&self) -> Result<String>;

    /// Resolve a selector to an element, if attached
    async fn query(&self, selector: &str) -> Result<Option<Arc<dyn DriverElement>>>;

    /// Number of elements currently matching a selector
    async fn query_count(&self, selector: &str) -> Result<usize>;

    /// Resolve a selector to every matching element
    async fn query_all(&self, selector: &str) -> Result<Vec<Arc<dyn DriverElement>>>;

    /// Evaluate a JavaScript expression in the page
    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value>;

    /// Capture a screenshot (PNG bytes)
    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>>;

    /// Scroll the page by the given deltas in pixels
    async fn scroll_by(&self, delta_x: f64, delta_y: f64) -> Result<()>;

    /// Reload the page
    async fn reload(&self) -> Result<()>;

    /// Go back in history
    async fn go_back(&self) -> Result<()>;

    /// Go forward in history
    async fn go_forward(&self) -> Result<()>;

    /// Set the default action timeout in milliseconds
    fn set_default_timeout(&self, timeout_ms: u64);

    /// Set the default navigation timeout in milliseconds
    fn set_default_navigation_timeout(&self, timeout_ms: u64);

    /// Default action timeout in milliseconds
    fn default_timeout(&self) -> u64;

    /// Default navigation timeout in milliseconds
    fn default_navigation_timeout(&self) -> u64;

    /// Close the page
    async fn close(&self) -> Result<()>;

    /// Check if the page is still open
    fn is_active(&self) -> bool;
}

/// A resolved DOM element
#[async_trait]
pub trait DriverElement: Send + Sync + fmt::Debug {
    /// Click the element
    async fn click(&self) -> Result<()>;

    /// Replace the element value with the given text
    async fn fill(&self, value: &str) -> Result<()>;

    /// Type text character by character with a per-key delay
    async fn type_text(&self, text: &str, delay_ms: u64) -> Result<()>;

    /// Visible text content
    async fn inner_text(&self) -> Result<String>;

    /// Current input value
    async fn input_value(&self) -> Result<String>;

    /// Attribute value, if present
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Whether the element is currently visible
    async fn is_visible(&self) -> Result<bool>;

    /// Whether the element is enabled
    async fn is_enabled(&self) -> Result<bool>;

    /// Set the checked state of a checkbox or radio input
    async fn set_checked(&self, checked: bool) -> Result<()>;

    /// Select an option of a `<select>` element by value
    async fn select_option(&self, value: &str) -> Result<()>;

    /// Hover over the element
    async fn hover(&self) -> Result<()>;

    /// Scroll the element into view
    async fn scroll_into_view(&self) -> Result<()>;

    /// Focus the element
    async fn focus(&self) -> Result<()>;
}
