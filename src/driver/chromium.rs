//! CDP-backed driver implementation
//!
//! Talks to a real browser through `chromiumoxide`. Chromium launches
//! directly; Firefox works through its CDP compatibility mode when an
//! executable is supplied or found on PATH; WebKit exposes no CDP endpoint
//! and is rejected at launch (the engine identifier itself is still valid
//! configuration).

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{GrantPermissionsParams, PermissionType};
use chromiumoxide::cdp::browser_protocol::emulation::{
    SetLocaleOverrideParams, SetTimezoneOverrideParams,
};
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::cdp::browser_protocol::security::SetIgnoreCertificateErrorsParams;
use chromiumoxide::cdp::browser_protocol::target::{
    CreateBrowserContextParams, CreateTargetParams, DisposeBrowserContextParams,
};
use chromiumoxide::page::{Page, ScreenshotParams};
use futures::StreamExt;
use serde::Serialize;
use std::io::Write;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::scripts;
use super::traits::{
    ContextOptions, Driver, DriverContext, DriverElement, DriverPage, DriverSession, Engine,
    LaunchOptions, LoadState, TraceOptions, Viewport,
};
use crate::{Error, Result};

const READY_STATE_POLL: Duration = Duration::from_millis(100);
/// Settle period used to approximate network-idle without CDP network events
const NETWORK_IDLE_SETTLE: Duration = Duration::from_millis(500);

/// CDP driver
#[derive(Debug, Clone, Default)]
pub struct CdpDriver;

impl CdpDriver {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Driver for CdpDriver {
    async fn launch(&self, options: LaunchOptions) -> Result<Arc<dyn DriverSession>> {
        let mut builder = BrowserConfig::builder();

        if !options.headless {
            builder = builder.with_head();
        }
        builder = builder.no_sandbox();

        match options.engine {
            Engine::Chromium => {
                if let Some(ref path) = options.executable {
                    builder = builder.chrome_executable(path);
                }
            }
            Engine::Firefox => {
                // Firefox speaks a CDP subset when started with remote
                // debugging; an executable must be resolvable.
                let path = options
                    .executable
                    .clone()
                    .unwrap_or_else(|| "firefox".into());
                builder = builder.chrome_executable(path).arg("--remote-debugging-port=0");
            }
            Engine::Webkit => {
                return Err(Error::driver(
                    "webkit exposes no CDP endpoint; use chromium or firefox with this backend",
                ));
            }
        }

        for arg in &options.extra_args {
            builder = builder.arg(arg);
        }

        let config = builder.build().map_err(Error::driver)?;

        info!(engine = %options.engine, headless = options.headless, "Launching browser");

        let launch = Browser::launch(config);
        let (browser, mut handler) =
            tokio::time::timeout(Duration::from_millis(options.launch_timeout_ms), launch)
                .await
                .map_err(|_| {
                    Error::timeout(format!(
                        "Browser launch exceeded {}ms",
                        options.launch_timeout_ms
                    ))
                })?
                .map_err(|e| Error::driver(format!("Failed to launch browser: {}", e)))?;

        // The handler task pumps CDP messages for the whole session lifetime.
        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    debug!("CDP handler event loop ended");
                    break;
                }
            }
        });

        Ok(Arc::new(CdpSession {
            engine: options.engine,
            slow_mo: Duration::from_millis(options.slow_mo_ms),
            browser: Arc::new(Mutex::new(browser)),
            _handler_task: handler_task,
            active: AtomicBool::new(true),
        }))
    }
}

/// A launched browser process
pub struct CdpSession {
    engine: Engine,
    slow_mo: Duration,
    browser: Arc<Mutex<Browser>>,
    _handler_task: tokio::task::JoinHandle<()>,
    active: AtomicBool,
}

impl std::fmt::Debug for CdpSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpSession")
            .field("engine", &self.engine)
            .finish()
    }
}

#[async_trait]
impl DriverSession for CdpSession {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn new_context(&self, options: ContextOptions) -> Result<Arc<dyn DriverContext>> {
        let browser = self.browser.lock().await;
        let response = browser
            .execute(CreateBrowserContextParams::default())
            .await
            .map_err(|e| Error::driver(format!("Failed to create browser context: {}", e)))?;
        let context_id = response.result.browser_context_id.clone();

        if !options.permissions.is_empty() {
            let permissions = options
                .permissions
                .iter()
                .map(|name| permission_type(name))
                .collect::<Result<Vec<_>>>()?;
            let mut grant = GrantPermissionsParams::new(permissions);
            grant.browser_context_id = Some(context_id.clone());
            browser
                .execute(grant)
                .await
                .map_err(|e| Error::driver(format!("Failed to grant permissions: {}", e)))?;
        }

        debug!(locale = %options.locale, timezone = %options.timezone_id, "Context created");

        Ok(Arc::new(CdpContext {
            id: Uuid::new_v4().to_string(),
            context_id,
            options,
            slow_mo: self.slow_mo,
            browser: self.browser.clone(),
            trace: Arc::new(std::sync::Mutex::new(None)),
            active: AtomicBool::new(true),
        }))
    }

    async fn close(&self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| Error::driver(format!("Failed to close browser: {}", e)))?;
        // Reap the child process; without this it lingers as a zombie
        // until the run exits.
        browser
            .wait()
            .await
            .map_err(|e| Error::driver(format!("Failed to reap browser process: {}", e)))?;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Trace recording attached to one context
#[derive(Debug, Default)]
struct TraceRecording {
    options: TraceOptions,
    events: Vec<TraceEvent>,
    screenshots: Vec<Vec<u8>>,
    sources: Vec<String>,
}

/// One entry on the trace timeline
#[derive(Debug, Serialize)]
struct TraceEvent {
    timestamp_ms: i64,
    kind: String,
    detail: String,
}

type SharedTrace = Arc<std::sync::Mutex<Option<TraceRecording>>>;

fn trace_record(trace: &SharedTrace, kind: &str, detail: &str) {
    if let Some(recording) = trace.lock().unwrap().as_mut() {
        recording.events.push(TraceEvent {
            timestamp_ms: chrono::Utc::now().timestamp_millis(),
            kind: kind.to_string(),
            detail: detail.to_string(),
        });
    }
}

/// An isolated browsing context backed by `Target.createBrowserContext`
pub struct CdpContext {
    id: String,
    context_id: chromiumoxide::cdp::browser_protocol::browser::BrowserContextId,
    options: ContextOptions,
    slow_mo: Duration,
    browser: Arc<Mutex<Browser>>,
    trace: SharedTrace,
    active: AtomicBool,
}

impl std::fmt::Debug for CdpContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpContext").field("id", &self.id).finish()
    }
}

#[async_trait]
impl DriverContext for CdpContext {
    fn id(&self) -> &str {
        &self.id
    }

    async fn new_page(&self) -> Result<Arc<dyn DriverPage>> {
        let mut params = CreateTargetParams::new("about:blank");
        params.browser_context_id = Some(self.context_id.clone());

        let page = {
            let browser = self.browser.lock().await;
            browser
                .new_page(params)
                .await
                .map_err(|e| Error::driver(format!("Failed to create page: {}", e)))?
        };

        // Emulation overrides are applied per page: they attach to the CDP
        // session rather than the browser context.
        let mut locale = SetLocaleOverrideParams::default();
        locale.locale = Some(self.options.locale.clone());
        page.execute(locale)
            .await
            .map_err(|e| Error::driver(format!("Failed to set locale: {}", e)))?;

        page.execute(SetTimezoneOverrideParams::new(self.options.timezone_id.clone()))
            .await
            .map_err(|e| Error::driver(format!("Failed to set timezone: {}", e)))?;

        if self.options.ignore_https_errors {
            page.execute(SetIgnoreCertificateErrorsParams::new(true))
                .await
                .map_err(|e| Error::driver(format!("Failed to relax certificate checks: {}", e)))?;
        }

        if let Viewport::Fixed { width, height } = self.options.viewport {
            page.evaluate(format!("window.resizeTo({}, {})", width, height))
                .await
                .ok();
        }

        trace_record(&self.trace, "page", "created");

        Ok(Arc::new(CdpPage {
            id: Uuid::new_v4().to_string(),
            context_id: self.id.clone(),
            page,
            slow_mo: self.slow_mo,
            trace: self.trace.clone(),
            default_timeout_ms: AtomicU64::new(30_000),
            default_navigation_timeout_ms: AtomicU64::new(30_000),
            active: AtomicBool::new(true),
        }))
    }

    async fn trace_start(&self, options: TraceOptions) -> Result<()> {
        let mut trace = self.trace.lock().unwrap();
        *trace = Some(TraceRecording {
            options,
            events: vec![],
            screenshots: vec![],
            sources: vec![],
        });
        drop(trace);
        trace_record(&self.trace, "trace", "started");
        Ok(())
    }

    async fn trace_stop(&self) -> Result<Vec<u8>> {
        let recording = self
            .trace
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| Error::internal("trace_stop without trace_start"))?;
        build_trace_archive(recording)
    }

    async fn close(&self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);
        let browser = self.browser.lock().await;
        browser
            .execute(DisposeBrowserContextParams::new(self.context_id.clone()))
            .await
            .map_err(|e| Error::driver(format!("Failed to dispose context: {}", e)))?;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Write a trace recording into a zip archive in memory
fn build_trace_archive(recording: TraceRecording) -> Result<Vec<u8>> {
    let cursor = std::io::Cursor::new(Vec::new());
    let mut archive = zip::ZipWriter::new(cursor);
    let file_options = zip::write::SimpleFileOptions::default();

    archive
        .start_file("trace.json", file_options)
        .map_err(|e| Error::artifact_capture(format!("trace archive: {}", e)))?;
    let timeline = serde_json::to_vec_pretty(&recording.events)?;
    archive.write_all(&timeline)?;

    if recording.options.screenshots {
        for (index, image) in recording.screenshots.iter().enumerate() {
            archive
                .start_file(format!("resources/{:04}.png", index), file_options)
                .map_err(|e| Error::artifact_capture(format!("trace archive: {}", e)))?;
            archive.write_all(image)?;
        }
    }

    if recording.options.sources {
        archive
            .start_file("sources.txt", file_options)
            .map_err(|e| Error::artifact_capture(format!("trace archive: {}", e)))?;
        archive.write_all(recording.sources.join("\n").as_bytes())?;
    }

    let cursor = archive
        .finish()
        .map_err(|e| Error::artifact_capture(format!("trace archive: {}", e)))?;
    Ok(cursor.into_inner())
}

/// One browsing tab
pub struct CdpPage {
    id: String,
    context_id: String,
    page: Page,
    slow_mo: Duration,
    trace: SharedTrace,
    default_timeout_ms: AtomicU64,
    default_navigation_timeout_ms: AtomicU64,
    active: AtomicBool,
}

impl std::fmt::Debug for CdpPage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpPage")
            .field("id", &self.id)
            .field("context_id", &self.context_id)
            .finish()
    }
}

impl CdpPage {
    async fn pace(&self) {
        if !self.slow_mo.is_zero() {
            tokio::time::sleep(self.slow_mo).await;
        }
    }

    async fn eval(&self, expression: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| Error::driver(format!("Evaluation failed: {}", e)))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    /// Poll `document.readyState` until the requested load state holds
    async fn await_ready_state(&self, wait_until: LoadState, timeout_ms: u64) -> Result<()> {
        let accepted: &[&str] = match wait_until {
            LoadState::DomContentLoaded => &["interactive", "complete"],
            LoadState::Load | LoadState::NetworkIdle => &["complete"],
        };

        let deadline = tokio::time::Instant::now() + Duration::from_millis(timeout_ms);
        loop {
            let state = self.eval("document.readyState").await?;
            if accepted.iter().any(|s| state == *s) {
                break;
            }
            if tokio::time::Instant::now() >= deadline {
                return Err(Error::timeout(format!(
                    "Load state {:?} not reached within {}ms",
                    wait_until, timeout_ms
                )));
            }
            tokio::time::sleep(READY_STATE_POLL).await;
        }

        if wait_until == LoadState::NetworkIdle {
            // Without CDP network-event plumbing, network-idle is
            // approximated by a settle interval after `complete`.
            tokio::time::sleep(NETWORK_IDLE_SETTLE).await;
        }
        Ok(())
    }

    async fn record_trace_screenshot(&self) {
        let wanted = self
            .trace
            .lock()
            .unwrap()
            .as_ref()
            .map(|r| r.options.screenshots)
            .unwrap_or(false);
        if !wanted {
            return;
        }
        match self.screenshot(false).await {
            Ok(image) => {
                if let Some(recording) = self.trace.lock().unwrap().as_mut() {
                    recording.screenshots.push(image);
                }
            }
            Err(e) => warn!("Trace screenshot skipped: {}", e),
        }
    }
}

#[async_trait]
impl DriverPage for CdpPage {
    fn id(&self) -> &str {
        &self.id
    }

    fn context_id(&self) -> &str {
        &self.context_id
    }

    async fn goto(&self, url: &str, wait_until: LoadState, timeout_ms: u64) -> Result<()> {
        self.pace().await;
        debug!(url, "Navigating");
        let navigation = async {
            self.page
                .goto(url)
                .await
                .map_err(|e| Error::navigation(format!("{}: {}", url, e)))?;
            self.await_ready_state(wait_until, timeout_ms).await
        };
        tokio::time::timeout(Duration::from_millis(timeout_ms), navigation)
            .await
            .map_err(|_| Error::timeout(format!("Navigation to {} exceeded {}ms", url, timeout_ms)))??;

        trace_record(&self.trace, "navigation", url);
        if let Some(recording) = self.trace.lock().unwrap().as_mut() {
            if recording.options.sources {
                recording.sources.push(url.to_string());
            }
        }
        self.record_trace_screenshot().await;
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        let url = self
            .page
            .url()
            .await
            .map_err(|e| Error::driver(format!("Failed to read URL: {}", e)))?;
        Ok(url.unwrap_or_default())
    }

    async fn title(&self) -> Result<String> {
        let title = self
            .page
            .get_title()
            .await
            .map_err(|e| Error::driver(format!("Failed to read title: {}", e)))?;
        Ok(title.unwrap_or_default())
    }

    async fn query(&self, selector: &str) -> Result<Option<Arc<dyn DriverElement>>> {
        match self.page.find_element(selector).await {
            Ok(_) => Ok(Some(Arc::new(CdpElement {
                selector: selector.to_string(),
                index: None,
                page: self.page.clone(),
                slow_mo: self.slow_mo,
                trace: self.trace.clone(),
            }))),
            Err(_) => Ok(None),
        }
    }

    async fn query_count(&self, selector: &str) -> Result<usize> {
        let count = self.eval(&scripts::query_count(selector)).await?;
        Ok(count.as_u64().unwrap_or(0) as usize)
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Arc<dyn DriverElement>>> {
        let count = self.query_count(selector).await?;
        Ok((0..count)
            .map(|index| {
                Arc::new(CdpElement {
                    selector: selector.to_string(),
                    index: Some(index),
                    page: self.page.clone(),
                    slow_mo: self.slow_mo,
                    trace: self.trace.clone(),
                }) as Arc<dyn DriverElement>
            })
            .collect())
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        self.eval(expression).await
    }

    async fn screenshot(&self, full_page: bool) -> Result<Vec<u8>> {
        self.page
            .screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(full_page)
                    .build(),
            )
            .await
            .map_err(|e| Error::driver(format!("Screenshot failed: {}", e)))
    }

    async fn scroll_by(&self, delta_x: f64, delta_y: f64) -> Result<()> {
        self.pace().await;
        self.eval(&scripts::scroll_by(delta_x, delta_y)).await?;
        trace_record(&self.trace, "scroll", &format!("{},{}", delta_x, delta_y));
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.pace().await;
        self.eval("location.reload()").await?;
        trace_record(&self.trace, "reload", "");
        Ok(())
    }

    async fn go_back(&self) -> Result<()> {
        self.pace().await;
        self.eval("history.back()").await?;
        Ok(())
    }

    async fn go_forward(&self) -> Result<()> {
        self.pace().await;
        self.eval("history.forward()").await?;
        Ok(())
    }

    fn set_default_timeout(&self, timeout_ms: u64) {
        self.default_timeout_ms.store(timeout_ms, Ordering::SeqCst);
    }

    fn set_default_navigation_timeout(&self, timeout_ms: u64) {
        self.default_navigation_timeout_ms
            .store(timeout_ms, Ordering::SeqCst);
    }

    fn default_timeout(&self) -> u64 {
        self.default_timeout_ms.load(Ordering::SeqCst)
    }

    fn default_navigation_timeout(&self) -> u64 {
        self.default_navigation_timeout_ms.load(Ordering::SeqCst)
    }

    async fn close(&self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);
        self.page
            .clone()
            .close()
            .await
            .map_err(|e| Error::driver(format!("Failed to close page: {}", e)))?;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// A DOM element addressed by selector (optionally the n-th match)
///
/// Interactions that have a first-class CDP command use it; the rest run as
/// in-page scripts.
pub struct CdpElement {
    selector: String,
    index: Option<usize>,
    page: Page,
    slow_mo: Duration,
    trace: SharedTrace,
}

impl std::fmt::Debug for CdpElement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CdpElement")
            .field("selector", &self.selector)
            .field("index", &self.index)
            .finish()
    }
}

impl CdpElement {
    async fn pace(&self) {
        if !self.slow_mo.is_zero() {
            tokio::time::sleep(self.slow_mo).await;
        }
    }

    async fn eval(&self, expression: &str) -> Result<serde_json::Value> {
        let result = self
            .page
            .evaluate(expression)
            .await
            .map_err(|e| Error::driver(format!("Evaluation failed: {}", e)))?;
        Ok(result.value().cloned().unwrap_or(serde_json::Value::Null))
    }

    /// Run a script bound against this element, erroring when it detached
    async fn eval_on_self(&self, body: &str) -> Result<serde_json::Value> {
        let script = match self.index {
            None => scripts::on_element(&self.selector, body),
            Some(index) => scripts::on_nth_element(&self.selector, index, body),
        };
        let value = self.eval(&script).await?;
        if value.is_null() {
            return Err(Error::element_not_found(&self.selector));
        }
        Ok(value)
    }
}

#[async_trait]
impl DriverElement for CdpElement {
    async fn click(&self) -> Result<()> {
        self.pace().await;
        match self.index {
            None => {
                let element = self
                    .page
                    .find_element(&self.selector)
                    .await
                    .map_err(|_| Error::element_not_found(&self.selector))?;
                element.click().await.map_err(|e| {
                    Error::driver(format!("Click failed on {}: {}", self.selector, e))
                })?;
            }
            Some(_) => {
                self.eval_on_self("(el.click(), true)").await?;
            }
        }
        trace_record(&self.trace, "click", &self.selector);
        Ok(())
    }

    async fn fill(&self, value: &str) -> Result<()> {
        self.pace().await;
        self.eval_on_self(&format!(
            "(el.value = '{}', el.dispatchEvent(new Event('input', {{bubbles: true}})), \
             el.dispatchEvent(new Event('change', {{bubbles: true}})), true)",
            scripts::escape_js_str(value)
        ))
        .await?;
        trace_record(&self.trace, "fill", &self.selector);
        Ok(())
    }

    async fn type_text(&self, text: &str, delay_ms: u64) -> Result<()> {
        self.pace().await;
        let element = self
            .page
            .find_element(&self.selector)
            .await
            .map_err(|_| Error::element_not_found(&self.selector))?;
        element
            .focus()
            .await
            .map_err(|e| Error::driver(format!("Focus failed on {}: {}", self.selector, e)))?;
        for ch in text.chars() {
            element
                .type_str(&ch.to_string())
                .await
                .map_err(|e| Error::driver(format!("Typing failed on {}: {}", self.selector, e)))?;
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
        trace_record(&self.trace, "type", &self.selector);
        Ok(())
    }

    async fn inner_text(&self) -> Result<String> {
        let value = self.eval_on_self("el.innerText ?? ''").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn input_value(&self) -> Result<String> {
        let value = self.eval_on_self("el.value ?? ''").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        let value = self
            .eval_on_self(&format!(
                "el.getAttribute('{}') ?? false",
                scripts::escape_js_str(name)
            ))
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn is_visible(&self) -> Result<bool> {
        let value = self
            .eval_on_self("el.offsetParent !== null || el === document.documentElement")
            .await
            .unwrap_or(serde_json::Value::Bool(false));
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_enabled(&self) -> Result<bool> {
        let value = self.eval_on_self("!el.disabled").await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn set_checked(&self, checked: bool) -> Result<()> {
        self.pace().await;
        self.eval_on_self(&format!(
            "(el.checked = {}, el.dispatchEvent(new Event('change', {{bubbles: true}})), true)",
            checked
        ))
        .await?;
        trace_record(&self.trace, "set_checked", &self.selector);
        Ok(())
    }

    async fn select_option(&self, value: &str) -> Result<()> {
        self.pace().await;
        self.eval_on_self(&format!(
            "(el.value = '{}', el.dispatchEvent(new Event('change', {{bubbles: true}})), true)",
            scripts::escape_js_str(value)
        ))
        .await?;
        trace_record(&self.trace, "select", &self.selector);
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        self.pace().await;
        self.eval_on_self(
            "(el.dispatchEvent(new MouseEvent('mouseover', {bubbles: true})), \
              el.dispatchEvent(new MouseEvent('mouseenter', {bubbles: true})), true)",
        )
        .await?;
        Ok(())
    }

    async fn scroll_into_view(&self) -> Result<()> {
        self.eval_on_self("(el.scrollIntoView({block: 'center'}), true)")
            .await?;
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.eval_on_self("(el.focus(), true)").await?;
        Ok(())
    }
}

/// Map a permission name from configuration to its CDP counterpart
fn permission_type(name: &str) -> Result<PermissionType> {
    match name.trim().to_ascii_lowercase().as_str() {
        "geolocation" => Ok(PermissionType::Geolocation),
        "notifications" => Ok(PermissionType::Notifications),
        "camera" => Ok(PermissionType::VideoCapture),
        "microphone" => Ok(PermissionType::AudioCapture),
        "clipboard-read" => Ok(PermissionType::ClipboardReadWrite),
        "clipboard-write" => Ok(PermissionType::ClipboardSanitizedWrite),
        "background-sync" => Ok(PermissionType::BackgroundSync),
        "midi" => Ok(PermissionType::Midi),
        "payment-handler" => Ok(PermissionType::PaymentHandler),
        other => Err(Error::configuration(format!(
            "Unknown permission: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_names_map_to_cdp_types() {
        assert!(permission_type("geolocation").is_ok());
        assert!(permission_type("Notifications").is_ok());
        assert!(matches!(
            permission_type("teleportation"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn trace_archive_is_well_formed_and_non_empty() {
        let recording = TraceRecording {
            options: TraceOptions::default(),
            events: vec![TraceEvent {
                timestamp_ms: 0,
                kind: "navigation".into(),
                detail: "https://example.com".into(),
            }],
            screenshots: vec![b"\x89PNG".to_vec()],
            sources: vec!["https://example.com".into()],
        };

        let bytes = build_trace_archive(recording).unwrap();
        assert!(!bytes.is_empty());
        // Zip local-file-header magic.
        assert_eq!(&bytes[..2], b"PK");
    }
}
