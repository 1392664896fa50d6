//! # give-rs-core
//!
//! Core types for the give-rs admin element renderers. This crate has no
//! dependency on the rendering layer and provides the foundation the forms
//! crate builds on.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`settings`] - Element defaults and runtime configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration
//! - [`i18n`] - Translation catalog, month names, and timezone handling
//! - [`utils`] - Text helpers (HTML escaping, key sanitization)

pub mod error;
pub mod i18n;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{GiveError, GiveResult};
pub use settings::{ElementSettings, Settings};
