//! Plain input controls: checkbox, text, date, textarea, and the ajax user
//! search box.
//!
//! Text-like controls share one layout: a `give-<key>-wrap` span holding an
//! optional label, an optional description, and the control itself, where
//! `<key>` is the sanitized field name.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use give_rs_core::i18n::gettext;
use give_rs_core::utils::text::{checked_attr, escape_attr, escape_html, has_class, sanitize_key};

/// Class that turns a text input into a date picker.
pub const DATEPICKER_CLASS: &str = "give_datepicker";

/// Class the user search input always carries.
pub const USER_SEARCH_CLASS: &str = "give-ajax-user-search";

const DISABLED_ATTR: &str = r#" disabled="disabled""#;

/// `data-*` attributes, rendered in insertion order.
///
/// Deserializes from a map and keeps the order the keys appear in. Setting
/// a key that is already present replaces its value in place.
///
/// ```
/// use give_rs_forms::inputs::DataAttributes;
///
/// let data = DataAttributes::new().with("zeta", "1").with("alpha", "2");
/// let keys: Vec<&str> = data.iter().map(|(k, _)| k).collect();
/// assert_eq!(keys, ["zeta", "alpha"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataAttributes(Vec<(String, String)>);

impl DataAttributes {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Sets `key`, keeping its existing position when already present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DataAttributes {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut data = Self::new();
        for (k, v) in iter {
            data.insert(k, v);
        }
        data
    }
}

impl Serialize for DataAttributes {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

struct DataAttributesVisitor;

impl<'de> Visitor<'de> for DataAttributesVisitor {
    type Value = DataAttributes;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of data attribute names to values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut data = DataAttributes(Vec::with_capacity(access.size_hint().unwrap_or(0)));
        while let Some((key, value)) = access.next_entry::<String, String>()? {
            data.insert(key, value);
        }
        Ok(data)
    }
}

impl<'de> Deserialize<'de> for DataAttributes {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DataAttributesVisitor)
    }
}

/// Arguments for [`checkbox`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckboxArgs {
    pub name: String,
    /// Checked when equal to `"1"`.
    pub current: Option<String>,
    /// Defaults to `"give-checkbox"`.
    pub class: String,
    pub disabled: bool,
    /// Ignored when `disabled` is set.
    pub readonly: bool,
}

impl Default for CheckboxArgs {
    fn default() -> Self {
        Self {
            name: String::new(),
            current: None,
            class: "give-checkbox".to_string(),
            disabled: false,
            readonly: false,
        }
    }
}

/// Arguments for [`text`] and [`date_field`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextArgs {
    /// Defaults to `"text"`.
    pub name: String,
    pub value: Option<String>,
    pub label: Option<String>,
    pub desc: Option<String>,
    pub placeholder: String,
    /// Defaults to `"regular-text"`.
    pub class: String,
    pub disabled: bool,
    pub autocomplete: String,
    /// Rendered as `data-<key>="<value>"` in insertion order.
    pub data: DataAttributes,
}

impl Default for TextArgs {
    fn default() -> Self {
        Self {
            name: "text".to_string(),
            value: None,
            label: None,
            desc: None,
            placeholder: String::new(),
            class: "regular-text".to_string(),
            disabled: false,
            autocomplete: String::new(),
            data: DataAttributes::new(),
        }
    }
}

/// Arguments for [`textarea`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextareaArgs {
    /// Defaults to `"textarea"`.
    pub name: String,
    pub value: Option<String>,
    pub label: Option<String>,
    pub desc: Option<String>,
    /// Defaults to `"large-text"`.
    pub class: String,
    pub disabled: bool,
}

impl Default for TextareaArgs {
    fn default() -> Self {
        Self {
            name: "textarea".to_string(),
            value: None,
            label: None,
            desc: None,
            class: "large-text".to_string(),
            disabled: false,
        }
    }
}

/// Arguments for [`ajax_user_search`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSearchArgs {
    /// Defaults to `"user_id"`.
    pub name: String,
    pub value: Option<String>,
    /// `None` uses the localized "Enter username", looked up at render time.
    pub placeholder: Option<String>,
    pub label: Option<String>,
    pub desc: Option<String>,
    /// Extra classes after [`USER_SEARCH_CLASS`].
    pub class: String,
    pub disabled: bool,
    /// Defaults to `"off"`.
    pub autocomplete: String,
    pub data: DataAttributes,
}

impl Default for UserSearchArgs {
    fn default() -> Self {
        Self {
            name: "user_id".to_string(),
            value: None,
            placeholder: None,
            label: None,
            desc: None,
            class: String::new(),
            disabled: false,
            autocomplete: "off".to_string(),
            data: DataAttributes::new(),
        }
    }
}

/// Renders a checkbox. Both `id` and the trailing class are the field name.
pub fn checkbox(args: &CheckboxArgs) -> String {
    let state = if args.disabled {
        DISABLED_ATTR
    } else if args.readonly {
        " readonly"
    } else {
        ""
    };
    let name = escape_attr(&args.name);
    let checked = args.current.as_deref() == Some("1");

    format!(
        r#"<input type="checkbox"{state} name="{name}" id="{name}" class="{} {name}"{} />"#,
        escape_attr(&args.class),
        checked_attr(checked),
    )
}

/// Renders a labelled text input.
///
/// ```
/// use give_rs_forms::inputs::{text, TextArgs};
///
/// let html = text(&TextArgs {
///     name: "first_name".into(),
///     label: Some("First Name".into()),
///     ..TextArgs::default()
/// });
/// assert!(html.starts_with(r#"<span id="give-first_name-wrap"><label class="give-label" for="give-first_name">First Name</label>"#));
/// ```
pub fn text(args: &TextArgs) -> String {
    let key = sanitize_key(&args.name);
    let name = escape_attr(&args.name);

    let mut html = format!(r#"<span id="give-{key}-wrap">"#);
    push_label(&mut html, &key, args.label.as_deref());
    push_description(&mut html, args.desc.as_deref());

    html.push_str(&format!(
        r#"<input type="text" name="{name}" id="{name}" autocomplete="{}" value="{}" placeholder="{}" class="{}""#,
        escape_attr(&args.autocomplete),
        escape_attr(args.value.as_deref().unwrap_or("")),
        escape_attr(&args.placeholder),
        escape_attr(&args.class),
    ));
    html.push_str(&render_data_attrs(&args.data));
    if args.disabled {
        html.push_str(DISABLED_ATTR);
    }
    html.push_str(" /></span>");

    tracing::trace!(name = %args.name, "rendered text input");
    html
}

/// Renders a text input from the four legacy positional values.
pub fn text_positional(name: &str, value: &str, label: &str, desc: &str) -> String {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    text(&TextArgs {
        name: name.to_string(),
        value: non_empty(value),
        label: non_empty(label),
        desc: non_empty(desc),
        ..TextArgs::default()
    })
}

/// Renders a text input carrying the date picker class.
pub fn date_field(mut args: TextArgs) -> String {
    if args.class.trim().is_empty() {
        args.class = DATEPICKER_CLASS.to_string();
    } else if !has_class(&args.class, DATEPICKER_CLASS) {
        args.class = format!("{} {DATEPICKER_CLASS}", args.class);
    }
    text(&args)
}

/// Renders a textarea with its description below it.
pub fn textarea(args: &TextareaArgs) -> String {
    let key = sanitize_key(&args.name);
    let name = escape_attr(&args.name);

    let mut html = format!(r#"<span id="give-{key}-wrap">"#);
    push_label(&mut html, &key, args.label.as_deref());

    html.push_str(&format!(
        r#"<textarea name="{name}" id="{name}" class="{}"{}>{}</textarea>"#,
        escape_attr(&args.class),
        if args.disabled { DISABLED_ATTR } else { "" },
        escape_html(args.value.as_deref().unwrap_or("")),
    ));
    push_description(&mut html, args.desc.as_deref());
    html.push_str("</span>");
    html
}

/// Renders the user search box with its hidden results container.
pub fn ajax_user_search(args: UserSearchArgs) -> String {
    let input = text(&TextArgs {
        name: args.name,
        value: args.value,
        label: args.label,
        desc: args.desc,
        placeholder: args
            .placeholder
            .unwrap_or_else(|| gettext("Enter username")),
        class: format!("{USER_SEARCH_CLASS} {}", args.class).trim_end().to_string(),
        disabled: args.disabled,
        autocomplete: args.autocomplete,
        data: args.data,
    });

    format!(
        r##"<span class="give_user_search_wrap">{input}<span class="give_user_search_results hidden"><a class="give-ajax-user-cancel" aria-label="{}" href="#">x</a><span></span></span></span>"##,
        escape_attr(&gettext("Cancel")),
    )
}

fn push_label(html: &mut String, key: &str, label: Option<&str>) {
    if let Some(label) = label.filter(|l| !l.is_empty()) {
        html.push_str(&format!(
            r#"<label class="give-label" for="give-{key}">{}</label>"#,
            escape_html(label)
        ));
    }
}

fn push_description(html: &mut String, desc: Option<&str>) {
    if let Some(desc) = desc.filter(|d| !d.is_empty()) {
        html.push_str(&format!(
            r#"<span class="give-description">{}</span>"#,
            escape_html(desc)
        ));
    }
}

/// Formats `data-*` attributes. Keys are sanitized; entries whose key
/// sanitizes to nothing are dropped.
fn render_data_attrs(data: &DataAttributes) -> String {
    data.iter()
        .filter_map(|(k, v)| {
            let key = sanitize_key(k);
            (!key.is_empty()).then(|| format!(r#" data-{key}="{}""#, escape_attr(v)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── Checkbox ────────────────────────────────────────────────────

    #[test]
    fn test_checkbox_unchecked() {
        let html = checkbox(&CheckboxArgs {
            name: "give_agree".into(),
            ..CheckboxArgs::default()
        });
        assert_eq!(
            html,
            r#"<input type="checkbox" name="give_agree" id="give_agree" class="give-checkbox give_agree" />"#
        );
    }

    #[test]
    fn test_checkbox_checked_only_by_one() {
        let args = CheckboxArgs {
            name: "x".into(),
            current: Some("1".into()),
            ..CheckboxArgs::default()
        };
        assert!(checkbox(&args).contains(" checked='checked' />"));

        for other in ["0", "true", "on", ""] {
            let args = CheckboxArgs {
                current: Some(other.into()),
                ..args.clone()
            };
            assert!(!checkbox(&args).contains("checked"), "{other}");
        }
    }

    #[test]
    fn test_checkbox_disabled_wins_over_readonly() {
        let args = CheckboxArgs {
            name: "x".into(),
            disabled: true,
            readonly: true,
            ..CheckboxArgs::default()
        };
        let html = checkbox(&args);
        assert!(html.starts_with(r#"<input type="checkbox" disabled="disabled" name="x""#));
        assert!(!html.contains("readonly"));

        let args = CheckboxArgs {
            disabled: false,
            ..args
        };
        assert!(checkbox(&args).starts_with(r#"<input type="checkbox" readonly name="x""#));
    }

    // ── Text ────────────────────────────────────────────────────────

    #[test]
    fn test_text_full_markup() {
        let html = text(&TextArgs {
            name: "give_first".into(),
            value: Some("Ada".into()),
            label: Some("First Name".into()),
            desc: Some("As on the receipt".into()),
            placeholder: "Jane".into(),
            ..TextArgs::default()
        });
        assert_eq!(
            html,
            concat!(
                r#"<span id="give-give_first-wrap">"#,
                r#"<label class="give-label" for="give-give_first">First Name</label>"#,
                r#"<span class="give-description">As on the receipt</span>"#,
                r#"<input type="text" name="give_first" id="give_first" autocomplete="" value="Ada" placeholder="Jane" class="regular-text" />"#,
                "</span>"
            )
        );
    }

    #[test]
    fn test_text_defaults_without_label() {
        let html = text(&TextArgs::default());
        assert!(html.starts_with(r#"<span id="give-text-wrap"><input type="text" name="text""#));
        assert!(!html.contains("<label"));
        assert!(!html.contains("give-description"));
    }

    #[test]
    fn test_text_data_attributes_and_disabled() {
        let mut data = DataAttributes::new();
        data.insert("Zeta", "last");
        data.insert("alpha", "a\"b");
        data.insert("!!", "dropped");
        let html = text(&TextArgs {
            name: "amount".into(),
            data,
            disabled: true,
            ..TextArgs::default()
        });
        assert!(html.contains(
            r#"class="regular-text" data-zeta="last" data-alpha="a&quot;b" disabled="disabled" />"#
        ));
        assert!(!html.contains("dropped"));
    }

    #[test]
    fn test_text_data_attributes_keep_insertion_order() {
        let data: DataAttributes = [("zeta", "1"), ("mid", "2"), ("alpha", "3"), ("zeta", "4")]
            .into_iter()
            .collect();
        assert_eq!(data.len(), 3);
        let html = text(&TextArgs {
            data,
            ..TextArgs::default()
        });
        assert!(html.contains(r#" data-zeta="4" data-mid="2" data-alpha="3" />"#));
    }

    #[test]
    fn test_data_attributes_deserialize_in_document_order() {
        let args: TextArgs =
            serde_json::from_str(r#"{"data": {"zeta": "z", "beta": "b", "alpha": "a"}}"#).unwrap();
        let keys: Vec<&str> = args.data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["zeta", "beta", "alpha"]);
        assert_eq!(
            serde_json::to_string(&args.data).unwrap(),
            r#"{"zeta":"z","beta":"b","alpha":"a"}"#
        );
        assert!(serde_json::from_str::<TextArgs>(r#"{"data": ["x"]}"#).is_err());
    }

    #[test]
    fn test_text_escapes_values() {
        let html = text(&TextArgs {
            name: "q".into(),
            value: Some(r#""><script>"#.into()),
            label: Some("<b>Label</b>".into()),
            ..TextArgs::default()
        });
        assert!(!html.contains("<script>"));
        assert!(!html.contains("<b>"));
        assert!(html.contains(r#"value="&quot;&gt;&lt;script&gt;""#));
    }

    #[test]
    fn test_text_positional() {
        let html = text_positional("give_email", "a@x.org", "Email", "");
        assert!(html.contains(r#"<label class="give-label" for="give-give_email">Email</label>"#));
        assert!(html.contains(r#"value="a@x.org""#));
        assert!(!html.contains("give-description"));

        let bare = text_positional("give_email", "", "", "");
        assert!(!bare.contains("<label"));
        assert!(bare.contains(r#"value="""#));
    }

    // ── Date ────────────────────────────────────────────────────────

    #[test]
    fn test_date_field_class_handling() {
        let html = date_field(TextArgs::default());
        assert!(html.contains(r#"class="regular-text give_datepicker""#));

        let html = date_field(TextArgs {
            class: String::new(),
            ..TextArgs::default()
        });
        assert!(html.contains(r#"class="give_datepicker""#));

        let html = date_field(TextArgs {
            class: "give_datepicker wide".into(),
            ..TextArgs::default()
        });
        assert!(html.contains(r#"class="give_datepicker wide""#));
        assert_eq!(html.matches(DATEPICKER_CLASS).count(), 1);
    }

    // ── Textarea ────────────────────────────────────────────────────

    #[test]
    fn test_textarea_markup() {
        let html = textarea(&TextareaArgs {
            name: "give_notes".into(),
            value: Some("Thanks & regards".into()),
            label: Some("Notes".into()),
            desc: Some("Internal only".into()),
            ..TextareaArgs::default()
        });
        assert_eq!(
            html,
            concat!(
                r#"<span id="give-give_notes-wrap">"#,
                r#"<label class="give-label" for="give-give_notes">Notes</label>"#,
                r#"<textarea name="give_notes" id="give_notes" class="large-text">Thanks &amp; regards</textarea>"#,
                r#"<span class="give-description">Internal only</span>"#,
                "</span>"
            )
        );
    }

    #[test]
    fn test_textarea_disabled_defaults() {
        let html = textarea(&TextareaArgs {
            disabled: true,
            ..TextareaArgs::default()
        });
        assert!(html.contains(
            r#"<textarea name="textarea" id="textarea" class="large-text" disabled="disabled"></textarea>"#
        ));
    }

    // ── User search ─────────────────────────────────────────────────

    #[test]
    fn test_ajax_user_search_defaults() {
        let html = ajax_user_search(UserSearchArgs::default());
        assert!(html.starts_with(r#"<span class="give_user_search_wrap"><span id="give-user_id-wrap">"#));
        assert!(html.contains(r#"name="user_id""#));
        assert!(html.contains(r#"autocomplete="off""#));
        assert!(html.contains(r#"placeholder="Enter username""#));
        assert!(html.contains(r#"class="give-ajax-user-search""#));
        assert!(html.ends_with(concat!(
            r##"<span class="give_user_search_results hidden">"##,
            r##"<a class="give-ajax-user-cancel" aria-label="Cancel" href="#">x</a>"##,
            "<span></span></span></span>"
        )));
    }

    #[test]
    fn test_ajax_user_search_extra_class() {
        let html = ajax_user_search(UserSearchArgs {
            class: "wide".into(),
            value: Some("ada".into()),
            ..UserSearchArgs::default()
        });
        assert!(html.contains(r#"class="give-ajax-user-search wide""#));
        assert!(html.contains(r#"value="ada""#));
    }

    #[test]
    fn test_ajax_user_search_passes_desc_and_data() {
        let html = ajax_user_search(UserSearchArgs {
            name: "give_donor_user".into(),
            placeholder: Some("Find a user".into()),
            desc: Some("Links the donor to a site account".into()),
            data: DataAttributes::new().with("search-type", "donor").with("nonce", "abc"),
            ..UserSearchArgs::default()
        });
        assert!(html.contains(
            r#"<span class="give-description">Links the donor to a site account</span><input type="text""#
        ));
        assert!(html.contains(r#"placeholder="Find a user""#));
        assert!(html.contains(
            r#"class="give-ajax-user-search" data-search-type="donor" data-nonce="abc" />"#
        ));
    }
}
