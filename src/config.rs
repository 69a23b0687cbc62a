//! Configuration management for E2E-Oxide
//!
//! Settings are resolved from environment variables (the primary surface)
//! or from a TOML file. All
//! values are typed at construction time; malformed numbers, booleans or
//! engine identifiers fail with a configuration error before any test runs.

use crate::driver::Engine;
use crate::{Error, Result};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Framework configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default navigation target
    pub base_url: String,

    /// Browser engine (chromium, firefox, webkit)
    pub browser: Engine,

    /// Run without visible UI
    pub headless: bool,

    /// Per-action artificial delay in milliseconds
    pub slow_mo_ms: u64,

    /// Session launch timeout in seconds
    pub browser_timeout_secs: u64,

    /// Context locale
    pub locale: String,

    /// Context timezone
    pub timezone: String,

    /// Accept invalid certificates
    pub ignore_https_errors: bool,

    /// Permission grants for the context
    pub permissions: Vec<String>,

    /// Default duration for bounded visibility probes, in seconds
    pub implicit_wait_secs: u64,

    /// Default duration for blocking waits and actions, in seconds
    pub explicit_wait_secs: u64,

    /// Enable trace capture for every test context
    pub trace: bool,

    /// Failure screenshot directory
    pub screenshots_dir: PathBuf,

    /// Trace archive directory
    pub trace_dir: PathBuf,

    /// Log file directory
    pub logs_dir: PathBuf,

    /// Runner report directory
    pub reports_dir: PathBuf,

    /// Test data directory
    pub data_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "https://ultimateqa.com/automation".to_string(),
            browser: Engine::Chromium,
            headless: false,
            slow_mo_ms: 0,
            browser_timeout_secs: 20,
            locale: "zh-CN".to_string(),
            timezone: "Asia/Shanghai".to_string(),
            ignore_https_errors: false,
            permissions: vec![],
            // No single canonical wait showed up in practice; both defaults
            // stay independently configurable.
            implicit_wait_secs: 20,
            explicit_wait_secs: 30,
            trace: false,
            screenshots_dir: PathBuf::from("screenshots"),
            trace_dir: PathBuf::from("test-results"),
            logs_dir: PathBuf::from("logs"),
            reports_dir: PathBuf::from("reports"),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Settings {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from a lookup function
    ///
    /// The lookup receives an option name and returns its raw value if set.
    /// Split out from [`Settings::from_env`] so tests can drive the parsing
    /// without touching process-global environment state.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(base_url) = lookup("BASE_URL") {
            settings.base_url = base_url;
        }

        if let Some(browser) = lookup("BROWSER") {
            settings.browser = browser.parse()?;
        }

        if let Some(headless) = lookup("HEADLESS") {
            settings.headless = parse_bool("HEADLESS", &headless)?;
        }

        if let Some(slow_mo) = lookup("SLOW_MO") {
            settings.slow_mo_ms = slow_mo
                .parse()
                .map_err(|_| Error::configuration("Invalid SLOW_MO"))?;
        }

        if let Some(timeout) = lookup("BROWSER_TIMEOUT") {
            settings.browser_timeout_secs = timeout
                .parse()
                .map_err(|_| Error::configuration("Invalid BROWSER_TIMEOUT"))?;
        }

        if let Some(locale) = lookup("LOCALE") {
            settings.locale = locale;
        }

        if let Some(timezone) = lookup("TIMEZONE") {
            settings.timezone = timezone;
        }

        if let Some(ignore) = lookup("IGNORE_HTTPS_ERRORS") {
            settings.ignore_https_errors = parse_bool("IGNORE_HTTPS_ERRORS", &ignore)?;
        }

        if let Some(permissions) = lookup("PERMISSIONS") {
            settings.permissions = permissions
                .split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(str::to_string)
                .collect();
        }

        if let Some(implicit) = lookup("IMPLICIT_WAIT") {
            settings.implicit_wait_secs = implicit
                .parse()
                .map_err(|_| Error::configuration("Invalid IMPLICIT_WAIT"))?;
        }

        if let Some(explicit) = lookup("EXPLICIT_WAIT") {
            settings.explicit_wait_secs = explicit
                .parse()
                .map_err(|_| Error::configuration("Invalid EXPLICIT_WAIT"))?;
        }

        // TRACE is a truthy flag, not a strict boolean: anything outside the
        // recognized truthy values leaves tracing off.
        if let Some(trace) = lookup("TRACE") {
            settings.trace = is_truthy(&trace);
        }

        Ok(settings)
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::configuration(format!("Failed to read config file: {}", e)))?;

        let settings: Settings = toml::from_str(&content)
            .map_err(|e| Error::configuration(format!("Failed to parse config: {}", e)))?;

        Ok(settings)
    }

    /// Default bounded-probe wait
    pub fn implicit_wait(&self) -> Duration {
        Duration::from_secs(self.implicit_wait_secs)
    }

    /// Default blocking wait / action timeout
    pub fn explicit_wait(&self) -> Duration {
        Duration::from_secs(self.explicit_wait_secs)
    }

    /// Session launch timeout
    pub fn launch_timeout(&self) -> Duration {
        Duration::from_secs(self.browser_timeout_secs)
    }

    /// Path of the default YAML test-data file
    pub fn test_data_file(&self) -> PathBuf {
        self.data_dir.join("test_data.yaml")
    }

    /// Create artifact directories if they do not exist yet
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [
            &self.screenshots_dir,
            &self.trace_dir,
            &self.logs_dir,
            &self.reports_dir,
            &self.data_dir,
        ] {
            std::fs::create_dir_all(dir)?;
        }
        Ok(())
    }
}

/// Parse a strict boolean option value
fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(Error::configuration(format!("Invalid {}: {}", key, value))),
    }
}

/// Recognized truthy values for flag-style options such as TRACE
fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
