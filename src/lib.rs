//! feedkeys - keyboard layer for a feed reader
//!
//! Keyboard shortcut dispatching (single keys and two-key chords) and
//! current-item navigation over a filterable list of entries, with the
//! feed reader actions those shortcuts are bound to.

pub mod config;
pub mod error;
pub mod input;
pub mod navigation;
pub mod reader;
pub mod terminal;

pub use error::{FeedkeysError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "feedkeys";
