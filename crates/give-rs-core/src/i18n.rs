//! Translation of UI strings.
//!
//! Labels such as "Select a Form" or "No donors found." are looked up
//! through [`gettext`], which consults the [`catalog`] for the language
//! active on the current thread. Untranslated strings come back unchanged.
//!
//! ```
//! use give_rs_core::i18n;
//!
//! i18n::catalog::register_translations("es", vec![("All Categories", "Todas las categorías")]);
//!
//! i18n::activate("es");
//! assert_eq!(i18n::gettext("All Categories"), "Todas las categorías");
//!
//! i18n::deactivate();
//! assert_eq!(i18n::gettext("All Categories"), "All Categories");
//! ```

pub mod catalog;
pub mod timezone;

use std::cell::RefCell;

/// Context under which abbreviated month names are translated.
pub const MONTH_CONTEXT: &str = "abbreviated month name";

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

// ── Thread-local language state ──────────────────────────────────────────

thread_local! {
    static CURRENT_LANGUAGE: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Activates the given language code for the current thread.
pub fn activate(language_code: &str) {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = Some(language_code.to_string());
    });
}

/// Deactivates the current thread's language, reverting to `"en"`.
pub fn deactivate() {
    CURRENT_LANGUAGE.with(|cell| {
        *cell.borrow_mut() = None;
    });
}

/// Returns the language code active on the current thread.
pub fn get_language() -> String {
    CURRENT_LANGUAGE.with(|cell| cell.borrow().clone().unwrap_or_else(|| "en".to_string()))
}

/// Restores the previously active language when dropped.
///
/// Returned by [`override_language`].
#[derive(Debug)]
#[must_use = "the language is restored as soon as the guard is dropped"]
pub struct LanguageOverride {
    previous: Option<String>,
}

impl Drop for LanguageOverride {
    fn drop(&mut self) {
        let previous = self.previous.take();
        CURRENT_LANGUAGE.with(|cell| {
            *cell.borrow_mut() = previous;
        });
    }
}

/// Activates `language_code` on the current thread until the returned guard
/// is dropped.
///
/// ```
/// use give_rs_core::i18n;
///
/// i18n::deactivate();
/// {
///     let _lang = i18n::override_language("nl");
///     assert_eq!(i18n::get_language(), "nl");
/// }
/// assert_eq!(i18n::get_language(), "en");
/// ```
pub fn override_language(language_code: &str) -> LanguageOverride {
    let previous = CURRENT_LANGUAGE.with(|cell| cell.replace(Some(language_code.to_string())));
    LanguageOverride { previous }
}

/// Translates a message using the current thread's active language.
///
/// If no translation is found, returns `msgid` unchanged.
pub fn gettext(msgid: &str) -> String {
    catalog::translate(&get_language(), msgid).unwrap_or_else(|| msgid.to_string())
}

/// Translates a message within a disambiguating context.
///
/// ```
/// use give_rs_core::i18n;
///
/// i18n::catalog::register_context_translations("de", vec![
///     ("abbreviated month name", "May", "Mai"),
/// ]);
/// i18n::activate("de");
/// assert_eq!(i18n::pgettext("abbreviated month name", "May"), "Mai");
/// assert_eq!(i18n::gettext("May"), "May");
/// i18n::deactivate();
/// ```
pub fn pgettext(context: &str, msgid: &str) -> String {
    catalog::translate_context(&get_language(), context, msgid)
        .unwrap_or_else(|| msgid.to_string())
}

/// Returns the localized abbreviated name of a month (`1` = January).
///
/// Out-of-range numbers wrap around the year, so `13` is January and `0`
/// is December.
///
/// ```
/// use give_rs_core::i18n::month_num_to_name;
///
/// assert_eq!(month_num_to_name(1), "Jan");
/// assert_eq!(month_num_to_name(12), "Dec");
/// ```
pub fn month_num_to_name(month: u32) -> String {
    let index = (month % 12 + 11) % 12;
    pgettext(MONTH_CONTEXT, MONTH_ABBREVIATIONS[index as usize])
}
