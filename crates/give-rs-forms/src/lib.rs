//! # give-rs-forms
//!
//! HTML form controls for the give-rs administrative screens.
//!
//! The heart of the crate is [`select::render_select`], which every dropdown
//! goes through. The [`dropdowns`] module builds option lists from record
//! stores (donations, forms, donors, taxonomy terms) and from the calendar,
//! and [`inputs`] covers the single-tag controls. [`elements::HtmlElements`]
//! ties a store and the runtime settings together.
//!
//! ## Modules
//!
//! - [`option_map`] - Option keys, ordered option maps, selection state
//! - [`select`] - The `<select>` renderer and its configuration
//! - [`sources`] - Record store traits and an in-memory store
//! - [`dropdowns`] - Data-backed and calendar dropdowns
//! - [`inputs`] - Checkbox, text, date, textarea, and user search inputs
//! - [`elements`] - The [`HtmlElements`] facade

pub mod dropdowns;
pub mod elements;
pub mod inputs;
pub mod option_map;
pub mod select;
pub mod sources;

pub use elements::HtmlElements;
pub use option_map::{OptionKey, OptionMap, Selection};
pub use select::{render_select, DropdownConfig};
pub use sources::{ElementSource, MemoryStore};
