//! Page objects for the Ultimate QA practice site

pub mod complicated;
pub mod index;

#[cfg(test)]
mod tests;

pub use complicated::ComplicatedPage;
pub use index::IndexPage;
