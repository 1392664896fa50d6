//! Settings loading from configuration files.
//!
//! [`Settings`] can be read from TOML or JSON, optionally layered over an
//! existing settings value, and finally adjusted from `GIVE_*` environment
//! variables.
//!
//! ## Loading Order
//!
//! 1. Start with default settings (or a caller-supplied base).
//! 2. Overlay a TOML or JSON document; keys it omits keep the base value.
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `GIVE_DEBUG` | `debug` |
//! | `GIVE_LOG_LEVEL` | `log_level` |
//! | `GIVE_LANGUAGE_CODE` | `language_code` |
//! | `GIVE_TIME_ZONE_OFFSET` | `time_zone_offset` |
//! | `GIVE_PAGE_SIZE` | `elements.page_size` |
//! | `GIVE_CATEGORY_TAXONOMY` | `elements.category_taxonomy` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use give_rs_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("config/give.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::{GiveError, GiveResult};
use crate::settings::Settings;

/// Loads settings from a TOML string, starting from the defaults.
pub fn from_toml_str(toml_str: &str) -> GiveResult<Settings> {
    overlay_toml_str(&Settings::default(), toml_str)
}

/// Overlays a TOML document on top of `base`.
///
/// Tables merge key by key, so `[elements]` with only `page_size` keeps the
/// base taxonomy and year range.
pub fn overlay_toml_str(base: &Settings, toml_str: &str) -> GiveResult<Settings> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| GiveError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;
    overlay_json_value(base, toml_to_json(toml_value))
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> GiveResult<Settings> {
    from_toml_str(&read_config(path.as_ref())?)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> GiveResult<Settings> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string, starting from the defaults.
pub fn from_json_str(json_str: &str) -> GiveResult<Settings> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| GiveError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    overlay_json_value(&Settings::default(), json_value)
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> GiveResult<Settings> {
    from_json_str(&read_config(path.as_ref())?)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies `GIVE_*` environment variable overrides to a settings struct.
///
/// Numeric variables that fail to parse are ignored with a warning.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Ok(val) = std::env::var("GIVE_DEBUG") {
        settings.debug = matches!(val.to_lowercase().as_str(), "true" | "1" | "yes");
    }

    if let Ok(val) = std::env::var("GIVE_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("GIVE_LANGUAGE_CODE") {
        settings.language_code = val;
    }

    if let Ok(val) = std::env::var("GIVE_TIME_ZONE_OFFSET") {
        match val.trim().parse::<i32>() {
            Ok(offset) => settings.time_zone_offset = offset,
            Err(e) => tracing::warn!(value = %val, error = %e, "ignoring GIVE_TIME_ZONE_OFFSET"),
        }
    }

    if let Ok(val) = std::env::var("GIVE_PAGE_SIZE") {
        match val.trim().parse::<usize>() {
            Ok(size) => settings.elements.page_size = size,
            Err(e) => tracing::warn!(value = %val, error = %e, "ignoring GIVE_PAGE_SIZE"),
        }
    }

    if let Ok(val) = std::env::var("GIVE_CATEGORY_TAXONOMY") {
        settings.elements.category_taxonomy = val;
    }
}

// ============================================================
// Helpers
// ============================================================

fn read_config(path: &Path) -> GiveResult<String> {
    std::fs::read_to_string(path).map_err(|e| {
        GiveError::ConfigurationError(format!(
            "Failed to read settings file '{}': {e}",
            path.display()
        ))
    })
}

fn overlay_json_value(base: &Settings, overlay: serde_json::Value) -> GiveResult<Settings> {
    let base_json = serde_json::to_value(base)?;
    let merged = merge_json(base_json, overlay);
    serde_json::from_value(merged)
        .map_err(|e| GiveError::ConfigurationError(format!("Invalid settings: {e}")))
}

/// Converts a TOML value to a `serde_json::Value`.
fn toml_to_json(value: toml::Value) -> serde_json::Value {
    match value {
        toml::Value::String(s) => serde_json::Value::String(s),
        toml::Value::Integer(i) => serde_json::json!(i),
        toml::Value::Float(f) => serde_json::json!(f),
        toml::Value::Boolean(b) => serde_json::Value::Bool(b),
        toml::Value::Datetime(dt) => serde_json::Value::String(dt.to_string()),
        toml::Value::Array(arr) => {
            serde_json::Value::Array(arr.into_iter().map(toml_to_json).collect())
        }
        toml::Value::Table(table) => serde_json::Value::Object(
            table
                .into_iter()
                .map(|(k, v)| (k, toml_to_json(v)))
                .collect(),
        ),
    }
}

/// Deep-merges two JSON values. The `overlay` takes precedence.
fn merge_json(base: serde_json::Value, overlay: serde_json::Value) -> serde_json::Value {
    match (base, overlay) {
        (serde_json::Value::Object(mut base_map), serde_json::Value::Object(overlay_map)) => {
            for (key, overlay_v) in overlay_map {
                let merged = match base_map.remove(&key) {
                    Some(base_v) => merge_json(base_v, overlay_v),
                    None => overlay_v,
                };
                base_map.insert(key, merged);
            }
            serde_json::Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = true
            language_code = "fr"
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(settings.debug);
        assert_eq!(settings.language_code, "fr");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_from_toml_str_elements_table() {
        let toml = r#"
            [elements]
            page_size = 50
            years_before = 2
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.elements.page_size, 50);
        assert_eq!(settings.elements.years_before, 2);
        assert_eq!(settings.elements.years_after, 0);
        assert_eq!(settings.elements.category_taxonomy, "give_forms_category");
    }

    #[test]
    fn test_overlay_keeps_base_values() {
        let base = from_toml_str("language_code = \"de\"\n[elements]\npage_size = 5").unwrap();
        let layered = overlay_toml_str(&base, "[elements]\nyears_after = 3").unwrap();
        assert_eq!(layered.language_code, "de");
        assert_eq!(layered.elements.page_size, 5);
        assert_eq!(layered.elements.years_after, 3);
    }

    #[test]
    fn test_from_toml_str_empty() {
        assert_eq!(from_toml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let err = from_toml_str("this is not = = toml").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("TOML"));
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let err = from_toml_str("[elements]\npage_size = \"lots\"").unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn test_from_json_str() {
        let settings =
            from_json_str(r#"{"time_zone_offset": 3600, "elements": {"years_after": 1}}"#).unwrap();
        assert_eq!(settings.time_zone_offset, 3600);
        assert_eq!(settings.elements.years_after, 1);
        assert_eq!(settings.elements.years_before, 5);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    #[test]
    fn test_from_toml_file_missing() {
        let err = from_toml_file("/nonexistent/give.toml").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/give.toml"));
    }

    #[test]
    fn test_from_toml_file_roundtrip() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("give_rs_settings_{}.toml", std::process::id()));
        std::fs::write(&path, "log_level = \"debug\"\n").unwrap();
        let settings = from_toml_file(&path).unwrap();
        assert_eq!(settings.log_level, "debug");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_merge_json_nested() {
        let base = serde_json::json!({"a": {"b": 1, "c": 2}, "d": 3});
        let overlay = serde_json::json!({"a": {"c": 20}});
        let merged = merge_json(base, overlay);
        assert_eq!(merged, serde_json::json!({"a": {"b": 1, "c": 20}, "d": 3}));
    }
}
