//! String utilities for building markup.
//!
//! Every renderer routes user-visible values through [`escape_html`] or
//! [`escape_attr`] and every generated identifier through [`sanitize_key`].

use regex::Regex;
use std::sync::OnceLock;

/// Attribute fragment marking an `<option>` as selected.
pub const SELECTED_ATTR: &str = " selected='selected'";

/// Attribute fragment marking a checkbox as checked.
pub const CHECKED_ATTR: &str = " checked='checked'";

/// Escapes HTML special characters for use in element text.
///
/// Replaces `&`, `<`, `>`, `"`, and `'` with their entity equivalents.
///
/// # Examples
///
/// ```
/// use give_rs_core::utils::text::escape_html;
///
/// assert_eq!(escape_html("<script>"), "&lt;script&gt;");
/// assert_eq!(escape_html("Tom & Jerry"), "Tom &amp; Jerry");
/// ```
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a value for use inside a double-quoted attribute.
///
/// Identical to [`escape_html`]; kept separate so call sites say which
/// context they are writing into.
pub fn escape_attr(s: &str) -> String {
    escape_html(s)
}

/// Reduces a string to a safe identifier key.
///
/// Lowercases the input and strips everything except ASCII letters, digits,
/// underscores, and hyphens.
///
/// # Examples
///
/// ```
/// use give_rs_core::utils::text::sanitize_key;
///
/// assert_eq!(sanitize_key("Give Forms[]"), "giveforms");
/// assert_eq!(sanitize_key("user-id_2"), "user-id_2");
/// ```
pub fn sanitize_key(s: &str) -> String {
    static DISALLOWED: OnceLock<Regex> = OnceLock::new();

    let disallowed =
        DISALLOWED.get_or_init(|| Regex::new(r"[^a-z0-9_\-]").expect("valid key pattern"));

    disallowed.replace_all(&s.to_lowercase(), "").into_owned()
}

/// Builds an element id: hyphens become underscores, then the result is
/// sanitized.
///
/// ```
/// use give_rs_core::utils::text::sanitize_id;
///
/// assert_eq!(sanitize_id("Give-Forms Select"), "give_formsselect");
/// ```
pub fn sanitize_id(s: &str) -> String {
    sanitize_key(&s.replace('-', "_"))
}

/// Returns [`SELECTED_ATTR`] when `condition` holds, otherwise an empty string.
pub const fn selected_attr(condition: bool) -> &'static str {
    if condition {
        SELECTED_ATTR
    } else {
        ""
    }
}

/// Returns [`CHECKED_ATTR`] when `condition` holds, otherwise an empty string.
pub const fn checked_attr(condition: bool) -> &'static str {
    if condition {
        CHECKED_ATTR
    } else {
        ""
    }
}

/// Joins CSS class fragments with single spaces, dropping blanks and
/// collapsing repeated whitespace.
///
/// ```
/// use give_rs_core::utils::text::join_classes;
///
/// assert_eq!(join_classes(&["give-select", "", " wide  tall "]), "give-select wide tall");
/// ```
pub fn join_classes(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|part| part.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns `true` if `class` contains `token` as a whole class name.
pub fn has_class(class: &str, token: &str) -> bool {
    class.split_whitespace().any(|c| c == token)
}
