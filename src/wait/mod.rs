//! Polling waits
//!
//! Two contracts live side by side:
//!
//! - [`poll`] holds the boolean condition poller. It reports expiry by
//!   returning `false` and never constructs an error.
//! - [`element`] holds [`ElementWaiter`], whose waits return
//!   [`Error::Timeout`](crate::Error::Timeout) on expiry so failures carry
//!   the selector and bound that were violated.

pub mod element;
pub mod poll;


pub use element::{url_matches, ElementWaiter, DEFAULT_POLL_INTERVAL};
pub use poll::{wait_for_condition, wait_for_condition_async};
