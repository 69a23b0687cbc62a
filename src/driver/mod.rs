//! # Driver boundary
//!
//! Everything browser-shaped is hidden behind the traits in [`traits`]: a
//! launcher ([`Driver`]), a browser process ([`DriverSession`]), an isolated
//! browsing context ([`DriverContext`]), a tab ([`DriverPage`]) and a
//! resolved element ([`DriverElement`]).
//!
//! ## Module structure
//! - `traits`: trait definitions and typed option structs
//! - `chromium`: production backend over the Chrome DevTools Protocol
//! - `scripts`: in-page JavaScript snippets used by the CDP backend
//! - `mock`: scripted backend for lifecycle and wait tests

pub mod chromium;
pub mod mock;
pub mod scripts;
pub mod traits;

#[cfg(test)]
mod tests;

pub use chromium::CdpDriver;
pub use traits::{
    ContextOptions, Driver, DriverContext, DriverElement, DriverPage, DriverSession, ElementState,
    Engine, LaunchOptions, LoadState, TraceOptions, Viewport,
};

pub use mock::{EventLog, MockDriver, MockElementSpec, MockWorld};
