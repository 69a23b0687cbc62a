//! Page object support
//!
//! - [`base`]: [`BasePage`], the interaction layer every page object wraps
//! - [`locator`]: re-resolvable element handles
//! - [`assertions`]: retrying page assertions

pub mod assertions;
pub mod base;
pub mod locator;

#[cfg(test)]
mod tests;

pub use assertions::Asserts;
pub use base::{BasePage, Target};
pub use locator::Locator;
