//! Session lifecycle management
//!
//! - [`handle`]: launched-browser handle and option derivation
//! - [`lifecycle`]: per-test fixture setup, teardown ordering, run wrapper
//! - [`artifacts`]: failure screenshots and trace archives

pub mod artifacts;
pub mod handle;
pub mod lifecycle;


pub use handle::{context_options, launch_options, SessionHandle};
pub use lifecycle::{
    LifecycleState, SessionLifecycleManager, TeardownReport, TestFixture, TestOutcome,
};
