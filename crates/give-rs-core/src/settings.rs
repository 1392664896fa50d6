//! Settings for give-rs.
//!
//! [`Settings`] holds runtime configuration (logging, language, timezone)
//! and an [`ElementSettings`] table with the defaults the data-backed
//! dropdowns fall back to when a caller does not specify them.
//!
//! Settings are passed explicitly to the renderers; there is no global
//! instance.

use serde::{Deserialize, Serialize};

/// Number of records a data-backed dropdown fetches when the caller does not
/// say otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 30;

/// Taxonomy whose terms populate the category dropdown.
pub const DEFAULT_CATEGORY_TAXONOMY: &str = "give_forms_category";

/// Defaults for the data-backed element renderers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementSettings {
    /// Maximum records fetched by the donation, form, and donor dropdowns.
    pub page_size: usize,
    /// Taxonomy key passed to the term store by the category dropdown.
    pub category_taxonomy: String,
    /// How many years before the current one the year dropdown starts at.
    pub years_before: u32,
    /// How many years after the current one the year dropdown ends at.
    pub years_after: u32,
}

impl Default for ElementSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            category_taxonomy: DEFAULT_CATEGORY_TAXONOMY.to_string(),
            years_before: 5,
            years_after: 0,
        }
    }
}

/// The complete set of give-rs settings.
///
/// # Examples
///
/// ```
/// use give_rs_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(!settings.debug);
/// assert_eq!(settings.language_code, "en");
/// assert_eq!(settings.elements.page_size, 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // ── Core ─────────────────────────────────────────────────────────

    /// Whether debug mode is enabled. Selects pretty log output.
    pub debug: bool,
    /// Tracing filter directive (e.g. "info", "`give_rs_forms=debug`").
    pub log_level: String,

    // ── i18n ─────────────────────────────────────────────────────────

    /// Language activated for translated labels.
    pub language_code: String,
    /// Offset east of UTC, in seconds, used to determine "today".
    pub time_zone_offset: i32,

    // ── Elements ─────────────────────────────────────────────────────

    /// Defaults for the data-backed dropdowns.
    pub elements: ElementSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
            language_code: "en".to_string(),
            time_zone_offset: 0,
            elements: ElementSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let s = Settings::default();
        assert!(!s.debug);
        assert_eq!(s.log_level, "info");
        assert_eq!(s.language_code, "en");
        assert_eq!(s.time_zone_offset, 0);
    }

    #[test]
    fn test_default_element_settings() {
        let e = ElementSettings::default();
        assert_eq!(e.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(e.category_taxonomy, "give_forms_category");
        assert_eq!(e.years_before, 5);
        assert_eq!(e.years_after, 0);
    }

    #[test]
    fn test_settings_partial_deserialize() {
        let s: Settings =
            serde_json::from_str(r#"{"debug": true, "elements": {"page_size": 10}}"#).unwrap();
        assert!(s.debug);
        assert_eq!(s.elements.page_size, 10);
        assert_eq!(s.elements.category_taxonomy, DEFAULT_CATEGORY_TAXONOMY);
    }
}
