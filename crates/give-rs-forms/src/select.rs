//! The `<select>` renderer.
//!
//! Every dropdown in the admin, from the donation picker to the month
//! selector, is a [`DropdownConfig`] handed to [`render_select`]. The
//! renderer injects the synthetic "all" and "none" options itself, works out
//! which options are selected for single- and multi-select controls, and
//! escapes every value and label.
//!
//! ```
//! use give_rs_forms::option_map::{OptionMap, Selection};
//! use give_rs_forms::select::{render_select, DropdownConfig};
//!
//! let options: OptionMap = vec![(1_u64, "Monthly"), (2, "Yearly")].into_iter().collect();
//! let config = DropdownConfig::new("period")
//!     .options(options)
//!     .selected(Selection::single(2_u64))
//!     .show_option_all(None)
//!     .show_option_none(None);
//!
//! let html = render_select(&config).unwrap();
//! assert!(html.contains(r#"<option value="2" selected='selected'>Yearly</option>"#));
//! ```

use give_rs_core::error::{GiveError, GiveResult};
use give_rs_core::i18n::gettext;
use give_rs_core::utils::text::{
    escape_attr, escape_html, join_classes, sanitize_id, selected_attr,
};

use crate::option_map::{OptionKey, OptionMap, Selection, ALL_KEY, EMPTY_KEY, NONE_KEY};

/// Class every rendered `<select>` carries.
pub const BASE_CLASS: &str = "give-select";

/// Class added when the enhanced (chosen) UI is requested.
pub const CHOSEN_CLASS: &str = "give-select-chosen";

/// Configuration for one `<select>` element.
///
/// Built with [`DropdownConfig::new`] and the chained setters. The defaults
/// mirror a bare admin dropdown: single-select, nothing selected, and both
/// synthetic options enabled with the localized labels "All" and "None".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropdownConfig {
    /// The `name` attribute.
    pub name: String,
    /// The raw id; sanitized on output.
    pub id: String,
    /// Extra classes, appended after [`BASE_CLASS`].
    pub class: String,
    /// Whether several options may be selected.
    pub multiple: bool,
    /// The selected key(s). Must be [`Selection::Multiple`] iff `multiple`.
    pub selected: Selection,
    /// Whether to add [`CHOSEN_CLASS`].
    pub chosen: bool,
    /// Emitted as `data-placeholder` for the client-side enhancement.
    pub placeholder: Option<String>,
    /// Raw fragment appended verbatim inside the opening tag.
    pub extra_attributes: Option<String>,
    /// Label of the leading `value="all"` option; `None` disables it.
    pub show_option_all: Option<String>,
    /// Label of the `value="-1"` option; `None` disables it.
    pub show_option_none: Option<String>,
    /// The data options, in render order.
    pub options: OptionMap,
}

impl Default for DropdownConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            id: String::new(),
            class: String::new(),
            multiple: false,
            selected: Selection::none(),
            chosen: false,
            placeholder: None,
            extra_attributes: None,
            show_option_all: Some(gettext("All")),
            show_option_none: Some(gettext("None")),
            options: OptionMap::new(),
        }
    }
}

impl DropdownConfig {
    /// Creates a configuration with the given `name` and default settings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the element id.
    #[must_use]
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Sets the extra classes.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = class.into();
        self
    }

    /// Enables or disables multi-select.
    #[must_use]
    pub const fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    /// Sets the selection.
    #[must_use]
    pub fn selected(mut self, selected: impl Into<Selection>) -> Self {
        self.selected = selected.into();
        self
    }

    /// Enables or disables the enhanced-UI class.
    #[must_use]
    pub const fn chosen(mut self, chosen: bool) -> Self {
        self.chosen = chosen;
        self
    }

    /// Sets the `data-placeholder` text.
    #[must_use]
    pub fn placeholder(mut self, placeholder: Option<String>) -> Self {
        self.placeholder = placeholder;
        self
    }

    /// Sets the raw attribute fragment.
    #[must_use]
    pub fn extra_attributes(mut self, extra: Option<String>) -> Self {
        self.extra_attributes = extra;
        self
    }

    /// Sets or clears the "all" option label.
    #[must_use]
    pub fn show_option_all(mut self, label: Option<String>) -> Self {
        self.show_option_all = label;
        self
    }

    /// Sets or clears the "none" option label.
    #[must_use]
    pub fn show_option_none(mut self, label: Option<String>) -> Self {
        self.show_option_none = label;
        self
    }

    /// Sets the data options.
    #[must_use]
    pub fn options(mut self, options: OptionMap) -> Self {
        self.options = options;
        self
    }

    /// Checks that the selection shape agrees with `multiple`.
    pub fn validate(&self) -> GiveResult<()> {
        match (self.multiple, &self.selected) {
            (true, Selection::Single(key)) => Err(GiveError::ConfigurationError(format!(
                "dropdown '{}' allows multiple selections but was given the single key '{key}'",
                self.name
            ))),
            (false, Selection::Multiple(keys)) => Err(GiveError::ConfigurationError(format!(
                "dropdown '{}' is single-select but was given {} selected keys",
                self.name,
                keys.len()
            ))),
            _ => Ok(()),
        }
    }
}

/// Renders a `<select>` element.
///
/// The "all" option, when enabled, is always emitted and is selected when
/// the selection holds the key `"0"` (not `"all"`). The "none" option is
/// emitted only when there is at least one data option, and is selected
/// when the selection holds `"-1"`.
///
/// # Errors
///
/// Returns [`GiveError::ConfigurationError`] when the selection shape does
/// not match `multiple`.
pub fn render_select(config: &DropdownConfig) -> GiveResult<String> {
    config.validate()?;

    let chosen = if config.chosen { CHOSEN_CLASS } else { "" };
    let class = join_classes(&[BASE_CLASS, &config.class, chosen]);

    let mut html = format!(
        r#"<select name="{}" id="{}" class="{}""#,
        escape_attr(&config.name),
        escape_attr(&sanitize_id(&config.id)),
        escape_attr(&class),
    );
    if config.multiple {
        html.push_str(" multiple");
    }
    if let Some(extra) = config
        .extra_attributes
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        html.push(' ');
        html.push_str(extra);
    }
    html.push_str(&format!(
        r#" data-placeholder="{}">"#,
        escape_attr(config.placeholder.as_deref().unwrap_or(""))
    ));

    let mut rendered = 0usize;

    if let Some(label) = &config.show_option_all {
        let selected = config.selected.contains(&OptionKey::from(EMPTY_KEY));
        push_option(&mut html, ALL_KEY, label, selected);
        rendered += 1;
    }

    if !config.options.is_empty() {
        if let Some(label) = &config.show_option_none {
            let selected = config.selected.contains(&OptionKey::from(NONE_KEY));
            push_option(&mut html, NONE_KEY, label, selected);
            rendered += 1;
        }

        for (key, label) in config.options.iter() {
            push_option(&mut html, key.as_str(), label, config.selected.contains(key));
        }
        rendered += config.options.len();
    }

    html.push_str("</select>");

    tracing::debug!(
        name = %config.name,
        options = rendered,
        multiple = config.multiple,
        "rendered select"
    );

    Ok(html)
}

fn push_option(html: &mut String, value: &str, label: &str, selected: bool) {
    html.push_str(&format!(
        r#"<option value="{}"{}>{}</option>"#,
        escape_attr(value),
        selected_attr(selected),
        escape_html(label)
    ));
}
