//! reposcope
//!
//! TUI client for browsing GitHub repository search results with
//! incremental, scroll-driven pagination and an on-demand README viewer.
//!
//! Pure core / impure shell: `model` and `engine` hold the data types and
//! the fetch/merge/pagination state machines (testable without terminal or
//! network); `api` is the HTTP boundary; `view` is the ratatui shell that
//! drives the engine with messages.

pub mod api;
pub mod config;
pub mod engine;
pub mod logging;
pub mod model;
pub mod view;

#[cfg(test)]
mod test_support;
