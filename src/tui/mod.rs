//! TUI module for the showcase.
//!
//! Reusable application state and key handling, kept out of the binary
//! so it can be tested. Terminal I/O and drawing remain in
//! `bin/showcase_tui.rs`.

#[cfg(feature = "tui")]
pub mod app;

#[cfg(feature = "tui")]
pub use app::{PanelTab, ShowcaseApp};
