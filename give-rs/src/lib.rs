//! # give-rs
//!
//! HTML form elements for a donation platform's admin screens.
//!
//! This is the meta-crate that re-exports the sub-crates for convenient
//! access. Depend on `give-rs` to get everything, or on the individual crates
//! for finer-grained control.
//!
//! ```
//! use give_rs::core::Settings;
//! use give_rs::forms::dropdowns::MonthDropdownArgs;
//! use give_rs::forms::{HtmlElements, MemoryStore};
//!
//! let store = MemoryStore::new();
//! let settings = Settings::default();
//! let elements = HtmlElements::new(&store, &settings)
//!     .with_today(give_rs::chrono::NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
//!
//! let html = elements.month_dropdown(&MonthDropdownArgs::default()).unwrap();
//! assert!(html.contains(r#"<option value="2" selected='selected'>Feb</option>"#));
//! ```

/// Settings, error types, logging, i18n, and text helpers.
pub use give_rs_core as core;

/// Select renderer, data-backed dropdowns, input fields, and the
/// `HtmlElements` facade.
#[cfg(feature = "forms")]
pub use give_rs_forms as forms;

pub use chrono;
pub use serde;
pub use serde_json;
pub use tracing;
pub use tracing_subscriber;
