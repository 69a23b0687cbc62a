//! E2E-Oxide: end-to-end UI test automation framework
//!
//! This library drives real browsers through the Chrome DevTools Protocol and
//! wraps them in the pieces a test suite needs: session lifecycle management,
//! polling waits, page objects and retrying assertions.

pub mod error;
pub mod config;

pub mod data;
pub mod driver;
pub mod logging;
pub mod page;
pub mod pages;
pub mod session;
pub mod wait;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use page::{Asserts, BasePage, Locator, Target};
pub use session::{SessionHandle, SessionLifecycleManager, TestFixture, TestOutcome};
pub use wait::{wait_for_condition, wait_for_condition_async, ElementWaiter};

/// E2E-Oxide library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
