//! Test session lifecycle
//!
//! One [`SessionLifecycleManager`] drives a whole run: the browser is
//! launched once and reused, while every test gets a fresh isolated context
//! and page. Teardown ordering is fixed: failure screenshot, then trace
//! flush, then page close, then context close. Artifact capture failures are
//! logged and never mask the test outcome.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::{info, warn};

use crate::config::Settings;
use crate::driver::{Driver, DriverContext, DriverPage, TraceOptions};
use crate::session::artifacts::{save_failure_screenshot, save_trace};
use crate::session::handle::SessionHandle;
use crate::Result;

/// How a test finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed,
}

/// Phase of one test's session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Init,
    SessionReady,
    ContextReady,
    PageReady,
    Running,
    Passed,
    Failed,
    TornDown,
}

/// Per-test resources handed to the test body
#[derive(Debug, Clone)]
pub struct TestFixture {
    pub test_name: String,
    pub context: Arc<dyn DriverContext>,
    pub page: Arc<dyn DriverPage>,
    tracing_enabled: bool,
    state: Arc<Mutex<LifecycleState>>,
}

impl TestFixture {
    pub fn state(&self) -> LifecycleState {
        *self.state.lock().unwrap()
    }

    pub fn tracing_enabled(&self) -> bool {
        self.tracing_enabled
    }

    fn set_state(&self, state: LifecycleState) {
        *self.state.lock().unwrap() = state;
    }
}

/// Artifact paths produced during teardown
#[derive(Debug, Default)]
pub struct TeardownReport {
    pub screenshot: Option<PathBuf>,
    pub trace: Option<PathBuf>,
}

/// Launches the browser lazily and hands out per-test fixtures
pub struct SessionLifecycleManager {
    driver: Arc<dyn Driver>,
    settings: Settings,
    handle: tokio::sync::Mutex<Option<SessionHandle>>,
}

impl SessionLifecycleManager {
    pub fn new(driver: Arc<dyn Driver>, settings: Settings) -> Self {
        Self {
            driver,
            settings,
            handle: tokio::sync::Mutex::new(None),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// The shared browser session, launched on first use
    pub async fn session(&self) -> Result<SessionHandle> {
        let mut guard = self.handle.lock().await;
        if let Some(handle) = guard.as_ref() {
            if handle.is_active() {
                return Ok(handle.clone());
            }
        }
        let handle = SessionHandle::launch(self.driver.clone(), &self.settings).await?;
        *guard = Some(handle.clone());
        Ok(handle)
    }

    /// Build the fixture for one test: fresh context and page, tracing
    /// started when configured
    pub async fn setup(&self, test_name: &str) -> Result<TestFixture> {
        let state = Arc::new(Mutex::new(LifecycleState::Init));

        let session = self.session().await?;
        *state.lock().unwrap() = LifecycleState::SessionReady;

        let context = session.new_context(&self.settings).await?;
        let tracing_enabled = self.settings.trace;

        // Destruction stays strictly nested even when setup dies halfway:
        // a context that never reaches the test still gets closed.
        let page = match self.prepare_page(&context, tracing_enabled, &state).await {
            Ok(page) => page,
            Err(e) => {
                if let Err(close_err) = context.close().await {
                    warn!(test = test_name, error = %close_err, "Context close failed during setup unwind");
                }
                return Err(e);
            }
        };

        info!(test = test_name, tracing = tracing_enabled, "Test fixture ready");
        Ok(TestFixture {
            test_name: test_name.to_string(),
            context,
            page,
            tracing_enabled,
            state,
        })
    }

    /// Setup steps that run inside an open context
    async fn prepare_page(
        &self,
        context: &Arc<dyn DriverContext>,
        tracing_enabled: bool,
        state: &Arc<Mutex<LifecycleState>>,
    ) -> Result<Arc<dyn DriverPage>> {
        if tracing_enabled {
            context.trace_start(TraceOptions::default()).await?;
        }
        *state.lock().unwrap() = LifecycleState::ContextReady;

        let page = context.new_page().await?;
        let action_timeout_ms = self.settings.explicit_wait().as_millis() as u64;
        page.set_default_timeout(action_timeout_ms);
        page.set_default_navigation_timeout(action_timeout_ms);
        *state.lock().unwrap() = LifecycleState::PageReady;
        Ok(page)
    }

    /// Tear down one test's resources
    ///
    /// Capture steps run before the context closes. Screenshot and trace
    /// failures downgrade to warnings; closing failures on the page do too,
    /// so the context close always gets its chance.
    pub async fn teardown(
        &self,
        fixture: &TestFixture,
        outcome: TestOutcome,
    ) -> Result<TeardownReport> {
        fixture.set_state(match outcome {
            TestOutcome::Passed => LifecycleState::Passed,
            TestOutcome::Failed => LifecycleState::Failed,
        });

        let mut report = TeardownReport::default();

        if outcome == TestOutcome::Failed {
            match save_failure_screenshot(
                &fixture.page,
                &self.settings.screenshots_dir,
                &fixture.test_name,
            )
            .await
            {
                Ok(path) => report.screenshot = Some(path),
                Err(e) => warn!(test = %fixture.test_name, error = %e, "Screenshot capture failed"),
            }
        }

        if fixture.tracing_enabled {
            match save_trace(&fixture.context, &self.settings.trace_dir, &fixture.test_name).await
            {
                Ok(path) => report.trace = Some(path),
                Err(e) => warn!(test = %fixture.test_name, error = %e, "Trace capture failed"),
            }
        }

        if let Err(e) = fixture.page.close().await {
            warn!(test = %fixture.test_name, error = %e, "Page close failed");
        }
        fixture.context.close().await?;

        fixture.set_state(LifecycleState::TornDown);
        info!(test = %fixture.test_name, ?outcome, "Test fixture torn down");
        Ok(report)
    }

    /// Run one test body with guaranteed teardown
    ///
    /// The body's error always wins over teardown errors; a teardown error
    /// only surfaces when the body itself passed.
    pub async fn run_test<F, Fut>(&self, test_name: &str, body: F) -> Result<TeardownReport>
    where
        F: FnOnce(TestFixture) -> Fut,
        Fut: Future<Output = Result<()>>,
    {
        let fixture = self.setup(test_name).await?;
        fixture.set_state(LifecycleState::Running);

        let result = body(fixture.clone()).await;
        let outcome = if result.is_ok() {
            TestOutcome::Passed
        } else {
            TestOutcome::Failed
        };

        let teardown = self.teardown(&fixture, outcome).await;
        match (result, teardown) {
            (Err(test_err), _) => Err(test_err),
            (Ok(()), Err(teardown_err)) => Err(teardown_err),
            (Ok(()), Ok(report)) => Ok(report),
        }
    }

    /// Close the shared browser session
    pub async fn shutdown(&self) -> Result<()> {
        let mut guard = self.handle.lock().await;
        if let Some(handle) = guard.take() {
            handle.close().await?;
        }
        Ok(())
    }
}
