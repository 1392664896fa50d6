//! Utility functions for give-rs.
//!
//! - [`text`]: HTML escaping, key sanitization, and boolean attribute emitters.

pub mod text;
