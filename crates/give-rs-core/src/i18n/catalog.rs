//! Translation catalog for loading and looking up translations.
//!
//! Catalogs live in a process-wide registry keyed by language code. They can
//! be registered programmatically or loaded from JSON:
//!
//! ```json
//! {
//!   "messages": {
//!     "Select a Form": "Selecciona un formulario"
//!   },
//!   "contexts": {
//!     "abbreviated month name\u0004Jan": "ene"
//!   }
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::{OnceLock, RwLock};

use crate::error::{GiveError, GiveResult};

/// A translation catalog for a single language.
#[derive(Debug, Clone, Default)]
pub struct TranslationCatalog {
    /// msgid -> translated string.
    messages: HashMap<String, String>,
    /// "context\x04msgid" -> translated string.
    contexts: HashMap<String, String>,
}

impl TranslationCatalog {
    /// Returns the number of entries (plain and contextual).
    pub fn len(&self) -> usize {
        self.messages.len() + self.contexts.len()
    }

    /// Returns `true` if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.contexts.is_empty()
    }
}

fn context_key(context: &str, msgid: &str) -> String {
    format!("{context}\x04{msgid}")
}

fn global_catalogs() -> &'static RwLock<HashMap<String, TranslationCatalog>> {
    static CATALOGS: OnceLock<RwLock<HashMap<String, TranslationCatalog>>> = OnceLock::new();
    CATALOGS.get_or_init(|| RwLock::new(HashMap::new()))
}

fn with_catalog<F, R>(language: &str, f: F) -> Option<R>
where
    F: FnOnce(&TranslationCatalog) -> Option<R>,
{
    let catalogs = global_catalogs()
        .read()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    catalogs.get(language).and_then(f)
}

#[allow(clippy::significant_drop_tightening)]
fn with_catalog_mut<F>(language: &str, f: F)
where
    F: FnOnce(&mut TranslationCatalog),
{
    let mut catalogs = global_catalogs()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    let catalog = catalogs.entry(language.to_string()).or_default();
    f(catalog);
}

// ── Registration API ─────────────────────────────────────────────────────

/// Registers message translations for a language.
///
/// Entries are merged into any existing catalog, overwriting duplicates.
pub fn register_translations(language: &str, entries: Vec<(&str, &str)>) {
    with_catalog_mut(language, |catalog| {
        for (msgid, translated) in entries {
            catalog
                .messages
                .insert(msgid.to_string(), translated.to_string());
        }
    });
}

/// Registers context-specific translations for a language.
///
/// Each entry is `(context, msgid, translated)`.
pub fn register_context_translations(language: &str, entries: Vec<(&str, &str, &str)>) {
    with_catalog_mut(language, |catalog| {
        for (context, msgid, translated) in entries {
            catalog
                .contexts
                .insert(context_key(context, msgid), translated.to_string());
        }
    });
}

/// Loads translations from a JSON string.
///
/// Both top-level keys (`messages`, `contexts`) are optional; non-string
/// values are skipped.
pub fn load_from_json(language: &str, json_str: &str) -> GiveResult<()> {
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| GiveError::TranslationError(format!("Invalid catalog JSON: {e}")))?;

    if !value.is_object() {
        return Err(GiveError::TranslationError(
            "Catalog JSON must be an object".to_string(),
        ));
    }

    with_catalog_mut(language, |catalog| {
        if let Some(messages) = value.get("messages").and_then(|v| v.as_object()) {
            for (msgid, translated) in messages {
                if let Some(t) = translated.as_str() {
                    catalog.messages.insert(msgid.clone(), t.to_string());
                }
            }
        }

        if let Some(contexts) = value.get("contexts").and_then(|v| v.as_object()) {
            for (key, translated) in contexts {
                if let Some(t) = translated.as_str() {
                    catalog.contexts.insert(key.clone(), t.to_string());
                }
            }
        }
    });

    tracing::debug!(language, "loaded translation catalog");
    Ok(())
}

/// Loads translations for a language from a JSON file.
pub fn load_from_json_file(language: &str, path: impl AsRef<Path>) -> GiveResult<()> {
    let content = std::fs::read_to_string(path.as_ref())?;
    load_from_json(language, &content)
}

// ── Lookup API ───────────────────────────────────────────────────────────

/// Looks up a message translation.
pub fn translate(language: &str, msgid: &str) -> Option<String> {
    with_catalog(language, |catalog| catalog.messages.get(msgid).cloned())
}

/// Looks up a contextual translation.
pub fn translate_context(language: &str, context: &str, msgid: &str) -> Option<String> {
    with_catalog(language, |catalog| {
        catalog.contexts.get(&context_key(context, msgid)).cloned()
    })
}

/// Returns `true` if a catalog has been registered for the language.
pub fn has_language(language: &str) -> bool {
    with_catalog(language, |_| Some(())).is_some()
}

/// Removes the catalog for a language.
pub fn clear_language(language: &str) {
    let mut catalogs = global_catalogs()
        .write()
        .unwrap_or_else(std::sync::PoisonError::into_inner);
    catalogs.remove(language);
}

/// Returns the number of entries registered for a language.
pub fn entry_count(language: &str) -> usize {
    with_catalog(language, |catalog| Some(catalog.len())).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_translate() {
        register_translations("t-reg", vec![("Cancel", "Annuler")]);
        assert_eq!(translate("t-reg", "Cancel"), Some("Annuler".to_string()));
        assert_eq!(translate("t-reg", "Missing"), None);
    }

    #[test]
    fn test_translate_unknown_language() {
        assert_eq!(translate("t-none", "Cancel"), None);
        assert!(!has_language("t-none"));
    }

    #[test]
    fn test_context_translations() {
        register_context_translations("t-ctx", vec![("abbreviated month name", "May", "Mai")]);
        assert_eq!(
            translate_context("t-ctx", "abbreviated month name", "May"),
            Some("Mai".to_string())
        );
        assert_eq!(translate("t-ctx", "May"), None);
    }

    #[test]
    fn test_load_from_json() {
        let json = r#"{
            "messages": {"Select a Donor": "Elige un donante", "bad": 3},
            "contexts": {"abbreviated month name\u0004Jan": "ene"}
        }"#;
        load_from_json("t-json", json).unwrap();
        assert_eq!(
            translate("t-json", "Select a Donor"),
            Some("Elige un donante".to_string())
        );
        assert_eq!(translate("t-json", "bad"), None);
        assert_eq!(
            translate_context("t-json", "abbreviated month name", "Jan"),
            Some("ene".to_string())
        );
        assert_eq!(entry_count("t-json"), 2);
    }

    #[test]
    fn test_load_from_json_invalid() {
        let err = load_from_json("t-bad", "{oops").unwrap_err();
        assert!(matches!(err, GiveError::TranslationError(_)));

        let err = load_from_json("t-bad", "[1, 2]").unwrap_err();
        assert!(matches!(err, GiveError::TranslationError(_)));
    }

    #[test]
    fn test_load_from_json_file_missing() {
        let err = load_from_json_file("t-file", "/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, GiveError::IoError(_)));
    }

    #[test]
    fn test_clear_language() {
        register_translations("t-clear", vec![("x", "y")]);
        assert!(has_language("t-clear"));
        clear_language("t-clear");
        assert!(!has_language("t-clear"));
        assert_eq!(entry_count("t-clear"), 0);
    }
}
