//! Browser session handle
//!
//! Owns one launched browser and derives launch and context options from
//! [`Settings`], so call sites never assemble driver options by hand.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::driver::{
    ContextOptions, Driver, DriverContext, DriverSession, Engine, LaunchOptions, Viewport,
};
use crate::Result;

/// A launched browser session
#[derive(Clone)]
pub struct SessionHandle {
    session: Arc<dyn DriverSession>,
}

impl SessionHandle {
    /// Launch a browser according to the settings
    pub async fn launch(driver: Arc<dyn Driver>, settings: &Settings) -> Result<Self> {
        let options = launch_options(settings);
        info!(
            engine = %options.engine,
            headless = options.headless,
            slow_mo_ms = options.slow_mo_ms,
            "Launching browser"
        );
        let session = driver.launch(options).await?;
        Ok(Self { session })
    }

    pub fn engine(&self) -> Engine {
        self.session.engine()
    }

    pub fn session(&self) -> Arc<dyn DriverSession> {
        self.session.clone()
    }

    pub fn is_active(&self) -> bool {
        self.session.is_active()
    }

    /// Open an isolated browsing context configured from the settings
    pub async fn new_context(&self, settings: &Settings) -> Result<Arc<dyn DriverContext>> {
        self.session.new_context(context_options(settings)).await
    }

    pub async fn close(&self) -> Result<()> {
        info!("Closing browser session");
        self.session.close().await
    }
}

/// Launch options derived from settings
pub fn launch_options(settings: &Settings) -> LaunchOptions {
    LaunchOptions {
        engine: settings.browser,
        headless: settings.headless,
        slow_mo_ms: settings.slow_mo_ms,
        launch_timeout_ms: settings.launch_timeout().as_millis() as u64,
        ..Default::default()
    }
}

/// Context options derived from settings
pub fn context_options(settings: &Settings) -> ContextOptions {
    ContextOptions {
        locale: settings.locale.clone(),
        timezone_id: settings.timezone.clone(),
        ignore_https_errors: settings.ignore_https_errors,
        permissions: settings.permissions.clone(),
        viewport: Viewport::Maximal,
    }
}
