//! # listkeep-settings
//!
//! Layered configuration for the listkeep client.
//!
//! Loading flow:
//! 1. Start with compiled [`Settings::default()`]
//! 2. If the settings file exists, merge user values over defaults
//! 3. Apply environment variable overrides (highest priority)

#![deny(unsafe_code)]

mod errors;
mod loader;
mod types;

pub use errors::{Result, SettingsError};
pub use loader::{load_settings, load_settings_from_path, settings_path};
pub use types::Settings;
