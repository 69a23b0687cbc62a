//! Mock driver implementation for testing
//!
//! Provides a fully scripted backend: tests decide which elements exist, what
//! expressions evaluate to, and which operations fail. Every driver call is
//! appended to a shared, ordered event log so lifecycle tests can assert
//! teardown ordering.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use super::traits::{
    ContextOptions, Driver, DriverContext, DriverElement, DriverPage, DriverSession, ElementState,
    Engine, LaunchOptions, LoadState, TraceOptions,
};
use crate::{Error, Result};

/// Ordered record of every driver call
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<String>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, event: impl Into<String>) {
        self.events.lock().unwrap().push(event.into());
    }

    /// Snapshot of all recorded events, in call order
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Position of the first event equal to `name`
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.events.lock().unwrap().iter().position(|e| e == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }
}

/// Scripted state of one element selector
#[derive(Debug, Clone)]
pub struct MockElementSpec {
    pub visible: bool,
    pub enabled: bool,
    pub text: String,
    pub value: String,
    pub checked: bool,
    /// Number of nodes the selector matches
    pub count: usize,
}

impl Default for MockElementSpec {
    fn default() -> Self {
        Self {
            visible: true,
            enabled: true,
            text: String::new(),
            value: String::new(),
            checked: false,
            count: 1,
        }
    }
}

/// Shared scripted page world
///
/// All pages created by one [`MockDriver`] observe the same world, so a test
/// can mutate it before or during a wait.
#[derive(Debug, Default)]
pub struct MockWorld {
    pub url: Mutex<String>,
    pub title: Mutex<String>,
    pub ready_state: Mutex<String>,
    pub elements: Mutex<HashMap<String, MockElementSpec>>,
    pub eval_results: Mutex<HashMap<String, serde_json::Value>>,
    pub fail_launch: AtomicBool,
    pub fail_screenshot: AtomicBool,
    pub fail_trace: AtomicBool,
}

impl MockWorld {
    pub fn set_url(&self, url: &str) {
        *self.url.lock().unwrap() = url.to_string();
    }

    pub fn set_title(&self, title: &str) {
        *self.title.lock().unwrap() = title.to_string();
    }

    pub fn set_ready_state(&self, state: &str) {
        *self.ready_state.lock().unwrap() = state.to_string();
    }

    pub fn set_element(&self, selector: &str, spec: MockElementSpec) {
        self.elements
            .lock()
            .unwrap()
            .insert(selector.to_string(), spec);
    }

    pub fn remove_element(&self, selector: &str) {
        self.elements.lock().unwrap().remove(selector);
    }

    pub fn set_eval(&self, expression: &str, value: serde_json::Value) {
        self.eval_results
            .lock()
            .unwrap()
            .insert(expression.to_string(), value);
    }

    fn element(&self, selector: &str) -> Option<MockElementSpec> {
        self.elements.lock().unwrap().get(selector).cloned()
    }

    /// Whether a selector currently satisfies a wait state
    pub fn satisfies(&self, selector: &str, state: ElementState) -> bool {
        let spec = self.element(selector);
        match state {
            ElementState::Attached => spec.is_some(),
            ElementState::Detached => spec.is_none(),
            ElementState::Visible => spec.map(|s| s.visible).unwrap_or(false),
            ElementState::Hidden => spec.map(|s| !s.visible).unwrap_or(true),
        }
    }
}

/// Mock driver
#[derive(Debug, Clone, Default)]
pub struct MockDriver {
    pub log: EventLog,
    pub world: Arc<MockWorld>,
}

impl MockDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn world(&self) -> Arc<MockWorld> {
        self.world.clone()
    }
}

#[async_trait]
impl Driver for MockDriver {
    async fn launch(&self, options: LaunchOptions) -> Result<Arc<dyn DriverSession>> {
        if self.world.fail_launch.load(Ordering::SeqCst) {
            return Err(Error::driver("mock launch failure"));
        }
        self.log.record(format!("session.launch:{}", options.engine));
        Ok(Arc::new(MockSession {
            engine: options.engine,
            log: self.log.clone(),
            world: self.world.clone(),
            active: AtomicBool::new(true),
        }))
    }
}

/// Mock browser session
#[derive(Debug)]
pub struct MockSession {
    engine: Engine,
    log: EventLog,
    world: Arc<MockWorld>,
    active: AtomicBool,
}

#[async_trait]
impl DriverSession for MockSession {
    fn engine(&self) -> Engine {
        self.engine
    }

    async fn new_context(&self, _options: ContextOptions) -> Result<Arc<dyn DriverContext>> {
        self.log.record("context.create");
        Ok(Arc::new(MockContext {
            id: Uuid::new_v4().to_string(),
            log: self.log.clone(),
            world: self.world.clone(),
            active: AtomicBool::new(true),
            tracing: AtomicBool::new(false),
        }))
    }

    async fn close(&self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);
        self.log.record("session.close");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Mock browsing context
#[derive(Debug)]
pub struct MockContext {
    id: String,
    log: EventLog,
    world: Arc<MockWorld>,
    active: AtomicBool,
    tracing: AtomicBool,
}

#[async_trait]
impl DriverContext for MockContext {
    fn id(&self) -> &str {
        &self.id
    }

    async fn new_page(&self) -> Result<Arc<dyn DriverPage>> {
        self.log.record("page.create");
        Ok(Arc::new(MockPage {
            id: Uuid::new_v4().to_string(),
            context_id: self.id.clone(),
            log: self.log.clone(),
            world: self.world.clone(),
            active: AtomicBool::new(true),
            default_timeout_ms: AtomicU64::new(30_000),
            default_navigation_timeout_ms: AtomicU64::new(30_000),
        }))
    }

    async fn trace_start(&self, _options: TraceOptions) -> Result<()> {
        if self.world.fail_trace.load(Ordering::SeqCst) {
            return Err(Error::driver("mock trace start failure"));
        }
        self.tracing.store(true, Ordering::SeqCst);
        self.log.record("trace.start");
        Ok(())
    }

    async fn trace_stop(&self) -> Result<Vec<u8>> {
        if self.world.fail_trace.load(Ordering::SeqCst) {
            return Err(Error::driver("mock trace stop failure"));
        }
        self.tracing.store(false, Ordering::SeqCst);
        self.log.record("trace.stop");
        // Minimal but non-empty archive payload.
        Ok(b"PK\x03\x04 mock trace archive".to_vec())
    }

    async fn close(&self) -> Result<()> {
        self.active.store(false, Ordering::SeqCst);
        self.log.record("context.close");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Mock page
#[derive(Debug)]
pub struct MockPage {
    id: String,
    context_id: String,
    log: EventLog,
    world: Arc<MockWorld>,
    active: AtomicBool,
    default_timeout_ms: AtomicU64,
    default_navigation_timeout_ms: AtomicU64,
}

#[async_trait]
impl DriverPage for MockPage {
    fn id(&self) -> &str {
        &self.id
    }

    fn context_id(&self) -> &str {
        &self.context_id
    }

    async fn goto(&self, url: &str, _wait_until: LoadState, _timeout_ms: u64) -> Result<()> {
        self.world.set_url(url);
        self.world.set_ready_state("complete");
        self.log.record(format!("page.goto:{}", url));
        Ok(())
    }

    async fn url(&self) -> Result<String> {
        Ok(self.world.url.lock().unwrap().clone())
    }

    async fn title(&self) -> Result<String> {
        Ok(self.world.title.lock().unwrap().clone())
    }

    async fn query(&self, selector: &str) -> Result<Option<Arc<dyn DriverElement>>> {
        Ok(self.world.element(selector).map(|_| {
            Arc::new(MockElement {
                selector: selector.to_string(),
                log: self.log.clone(),
                world: self.world.clone(),
            }) as Arc<dyn DriverElement>
        }))
    }

    async fn query_count(&self, selector: &str) -> Result<usize> {
        Ok(self
            .world
            .element(selector)
            .map(|spec| spec.count)
            .unwrap_or(0))
    }

    async fn query_all(&self, selector: &str) -> Result<Vec<Arc<dyn DriverElement>>> {
        let count = self.query_count(selector).await?;
        Ok((0..count)
            .map(|_| {
                Arc::new(MockElement {
                    selector: selector.to_string(),
                    log: self.log.clone(),
                    world: self.world.clone(),
                }) as Arc<dyn DriverElement>
            })
            .collect())
    }

    async fn evaluate(&self, expression: &str) -> Result<serde_json::Value> {
        if expression == "document.readyState" {
            return Ok(serde_json::Value::String(
                self.world.ready_state.lock().unwrap().clone(),
            ));
        }
        Ok(self
            .world
            .eval_results
            .lock()
            .unwrap()
            .get(expression)
            .cloned()
            .unwrap_or(serde_json::Value::Null))
    }

    async fn screenshot(&self, _full_page: bool) -> Result<Vec<u8>> {
        if self.world.fail_screenshot.load(Ordering::SeqCst) {
            return Err(Error::driver("mock screenshot failure"));
        }
        self.log.record("page.screenshot");
        Ok(b"\x89PNG\r\n\x1a\n mock image".to_vec())
    }

    async fn scroll_by(&self, _delta_x: f64, delta_y: f64) -> Result<()> {
        self.log.record(format!("page.scroll_by:{}", delta_y));
        Ok(())
    }

    async fn reload(&self) -> Result<()> {
        self.log.record("page.reload");
        Ok(())
    }

    async fn go_back(&self) -> Result<()> {
        self.log.record("page.go_back");
        Ok(())
    }

    async fn go_forward(&self) -> Result<()> {
        self.log.record("page.go_forward");
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
        self.log.record("page.close");
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

/// Mock element
#[derive(Debug)]
pub struct MockElement {
    selector: String,
    log: EventLog,
    world: Arc<MockWorld>,
}

impl MockElement {
    fn spec(&self) -> Result<MockElementSpec> {
        self.world
            .element(&self.selector)
            .ok_or_else(|| Error::element_not_found(&self.selector))
    }

    fn update<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut MockElementSpec),
    {
        let mut elements = self.world.elements.lock().unwrap();
        let spec = elements
            .get_mut(&self.selector)
            .ok_or_else(|| Error::element_not_found(&self.selector))?;
        f(spec);
        Ok(())
    }
}

#[async_trait]
impl DriverElement for MockElement {
    async fn click(&self) -> Result<()> {
        self.spec()?;
        self.log.record(format!("element.click:{}", self.selector));
        Ok(())
    }

    async fn fill(&self, value: &str) -> Result<()> {
        self.update(|spec| spec.value = value.to_string())?;
        self.log.record(format!("element.fill:{}", self.selector));
        Ok(())
    }

    async fn type_text(&self, text: &str, _delay_ms: u64) -> Result<()> {
        self.update(|spec| spec.value.push_str(text))?;
        self.log.record(format!("element.type:{}", self.selector));
        Ok(())
    }

    async fn inner_text(&self) -> Result<String> {
        Ok(self.spec()?.text)
    }

    async fn input_value(&self) -> Result<String> {
        Ok(self.spec()?.value)
    }

    async fn attribute(&self, _name: &str) -> Result<Option<String>> {
        self.spec()?;
        Ok(None)
    }

    async fn is_visible(&self) -> Result<bool> {
        Ok(self.spec()?.visible)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.spec()?.enabled)
    }

    async fn set_checked(&self, checked: bool) -> Result<()> {
        self.update(|spec| spec.checked = checked)?;
        self.log
            .record(format!("element.set_checked:{}", self.selector));
        Ok(())
    }

    async fn select_option(&self, value: &str) -> Result<()> {
        self.update(|spec| spec.value = value.to_string())?;
        self.log.record(format!("element.select:{}", self.selector));
        Ok(())
    }

    async fn hover(&self) -> Result<()> {
        self.spec()?;
        self.log.record(format!("element.hover:{}", self.selector));
        Ok(())
    }

    async fn scroll_into_view(&self) -> Result<()> {
        self.spec()?;
        self.log
            .record(format!("element.scroll_into_view:{}", self.selector));
        Ok(())
    }

    async fn focus(&self) -> Result<()> {
        self.spec()?;
        self.log.record(format!("element.focus:{}", self.selector));
        Ok(())
    }
}
