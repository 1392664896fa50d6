//! Data-backed dropdowns.
//!
//! Each adapter fetches a bounded page of records, turns it into an
//! [`OptionMap`] with a placeholder or empty-state entry under key `0`, makes
//! sure the caller's current selection is present even when it falls outside
//! the fetched page, and hands the result to [`render_select`].
//!
//! The `*_options` functions expose the option-building half on its own.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use give_rs_core::error::GiveResult;
use give_rs_core::i18n::{gettext, month_num_to_name};
use give_rs_core::settings::ElementSettings;

use crate::option_map::{OptionKey, OptionMap, Selection, EMPTY_KEY};
use crate::select::{render_select, DropdownConfig};
use crate::sources::{DonationSource, DonorSource, FormSource, TermQuery, TermSource};

/// Largest number of years the year dropdown spans on either side of the
/// current year.
pub const MAX_YEAR_SPAN: u32 = 200;

/// Class the donor dropdown adds for its client-side search.
pub const DONOR_SELECT_CLASS: &str = "give-customer-select";

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Arguments for [`transactions_dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionsDropdownArgs {
    /// Defaults to `"transactions"`.
    pub name: String,
    /// Defaults to `"transactions"`.
    pub id: String,
    pub class: String,
    pub multiple: bool,
    pub selected: Selection,
    pub chosen: bool,
    /// Page size; `None` uses [`ElementSettings::page_size`].
    pub number: Option<usize>,
    /// `None` uses the localized "Select a transaction", looked up at render time.
    pub placeholder: Option<String>,
    pub extra_attributes: Option<String>,
}

impl Default for TransactionsDropdownArgs {
    fn default() -> Self {
        Self {
            name: "transactions".to_string(),
            id: "transactions".to_string(),
            class: String::new(),
            multiple: false,
            selected: Selection::none(),
            chosen: false,
            number: None,
            placeholder: None,
            extra_attributes: None,
        }
    }
}

/// Arguments for [`forms_dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsDropdownArgs {
    /// Defaults to `"forms"`.
    pub name: String,
    /// Defaults to `"forms"`.
    pub id: String,
    pub class: String,
    pub multiple: bool,
    pub selected: Selection,
    pub chosen: bool,
    /// Page size; `None` uses [`ElementSettings::page_size`].
    pub number: Option<usize>,
    /// `None` uses the localized "Select a Form", looked up at render time.
    pub placeholder: Option<String>,
    pub extra_attributes: Option<String>,
}

impl Default for FormsDropdownArgs {
    fn default() -> Self {
        Self {
            name: "forms".to_string(),
            id: "forms".to_string(),
            class: String::new(),
            multiple: false,
            selected: Selection::none(),
            chosen: false,
            number: None,
            placeholder: None,
            extra_attributes: None,
        }
    }
}

/// Arguments for [`donor_dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonorDropdownArgs {
    /// Defaults to `"customers"`.
    pub name: String,
    /// Defaults to `"customers"`.
    pub id: String,
    pub class: String,
    pub multiple: bool,
    pub selected: Selection,
    /// Defaults to `true`.
    pub chosen: bool,
    /// Page size; `None` uses [`ElementSettings::page_size`].
    pub number: Option<usize>,
    /// `None` uses the localized "Select a Donor", looked up at render time.
    pub placeholder: Option<String>,
    pub extra_attributes: Option<String>,
}

impl Default for DonorDropdownArgs {
    fn default() -> Self {
        Self {
            name: "customers".to_string(),
            id: "customers".to_string(),
            class: String::new(),
            multiple: false,
            selected: Selection::none(),
            chosen: true,
            number: None,
            placeholder: None,
            extra_attributes: None,
        }
    }
}

/// Arguments for [`category_dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CategoryDropdownArgs {
    /// Defaults to `"give_forms_categories"`.
    pub name: String,
    pub selected: OptionKey,
}

impl Default for CategoryDropdownArgs {
    fn default() -> Self {
        Self {
            name: "give_forms_categories".to_string(),
            selected: OptionKey::empty(),
        }
    }
}

/// Arguments for [`year_dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct YearDropdownArgs {
    /// Defaults to `"year"`.
    pub name: String,
    /// `0` selects the current year.
    pub selected: i32,
    /// `None` uses [`ElementSettings::years_before`].
    pub years_before: Option<u32>,
    /// `None` uses [`ElementSettings::years_after`].
    pub years_after: Option<u32>,
}

impl Default for YearDropdownArgs {
    fn default() -> Self {
        Self {
            name: "year".to_string(),
            selected: 0,
            years_before: None,
            years_after: None,
        }
    }
}

/// Arguments for [`month_dropdown`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthDropdownArgs {
    /// Defaults to `"month"`.
    pub name: String,
    /// `0` selects the current month.
    pub selected: u32,
}

impl Default for MonthDropdownArgs {
    fn default() -> Self {
        Self {
            name: "month".to_string(),
            selected: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// Option builders
// ---------------------------------------------------------------------------

/// Builds the donation options: a "Select a donation" placeholder followed by
/// `"#<id> - <email> - <form>"` per donation, or a lone "No donations found.".
pub fn transaction_options<S: DonationSource + ?Sized>(
    source: &S,
    limit: usize,
) -> GiveResult<OptionMap> {
    let donations = source.fetch_donations(limit)?;
    let mut options = OptionMap::new();

    if donations.is_empty() {
        options.insert(EMPTY_KEY, gettext("No donations found."));
        return Ok(options);
    }

    options.insert(EMPTY_KEY, gettext("Select a donation"));
    for donation in donations {
        options.insert(
            donation.id,
            format!(
                "#{} - {} - {}",
                donation.id, donation.payer_email, donation.form_title
            ),
        );
    }
    Ok(options)
}

/// Builds the form options and adds any selected forms missing from the page.
///
/// A selected form whose title cannot be found is listed as `#<id>`.
pub fn forms_options<S: FormSource + ?Sized>(
    source: &S,
    limit: usize,
    selected: &Selection,
) -> GiveResult<OptionMap> {
    let forms = source.fetch_forms(limit)?;
    let mut options = OptionMap::new();

    if forms.is_empty() {
        options.insert(EMPTY_KEY, gettext("No forms found."));
    } else {
        options.insert(EMPTY_KEY, gettext("Select a Form"));
        for form in forms {
            options.insert(form.id, form.title);
        }
    }

    for (key, id) in missing_selected_ids(&options, selected) {
        let title = source
            .lookup_form_title(id)?
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| {
                tracing::warn!(form_id = id, "selected form has no title");
                format!("#{id}")
            });
        tracing::debug!(form_id = id, "added selected form outside fetched page");
        options.insert(key, title);
    }

    Ok(options)
}

/// Builds the donor options and adds any selected donors missing from the
/// page. Selected ids with no matching donor are left out.
pub fn donor_options<S: DonorSource + ?Sized>(
    source: &S,
    limit: usize,
    selected: &Selection,
) -> GiveResult<OptionMap> {
    let donors = source.fetch_donors(limit)?;
    let mut options = OptionMap::new();

    if donors.is_empty() {
        options.insert(EMPTY_KEY, gettext("No donors found."));
    } else {
        options.insert(EMPTY_KEY, gettext("No donor attached"));
        for donor in &donors {
            options.insert(donor.id, donor.label());
        }
    }

    for (key, id) in missing_selected_ids(&options, selected) {
        match source.lookup_donor(id)? {
            Some(donor) => {
                tracing::debug!(donor_id = id, "added selected donor outside fetched page");
                options.insert(key, donor.label());
            }
            None => tracing::debug!(donor_id = id, "selected donor not found"),
        }
    }

    Ok(options)
}

/// Builds `term_id -> name` options for a taxonomy.
pub fn category_options<S: TermSource + ?Sized>(
    source: &S,
    taxonomy: &str,
    query: &TermQuery,
) -> GiveResult<OptionMap> {
    Ok(source
        .fetch_terms(taxonomy, query)?
        .into_iter()
        .map(|term| (term.id, term.name))
        .collect())
}

/// Builds `year -> year` options from `current - before` to `current + after`.
///
/// Each side is capped at [`MAX_YEAR_SPAN`] years.
pub fn year_options(current: i32, years_before: u32, years_after: u32) -> OptionMap {
    let before = clamp_year_span(years_before, "years_before");
    let after = clamp_year_span(years_after, "years_after");
    let start = current.saturating_sub(before);
    let end = current.saturating_add(after);
    (start..=end).map(|year| (year, year.to_string())).collect()
}

/// Builds the twelve `1..=12 -> month name` options.
pub fn month_options() -> OptionMap {
    (1..=12_u32).map(|m| (m, month_num_to_name(m))).collect()
}

fn clamp_year_span(years: u32, field: &str) -> i32 {
    if years > MAX_YEAR_SPAN {
        tracing::warn!(field, years, max = MAX_YEAR_SPAN, "clamping year dropdown range");
    }
    // MAX_YEAR_SPAN fits in i32.
    i32::try_from(years.min(MAX_YEAR_SPAN)).unwrap_or(i32::MAX)
}

/// The caller's placeholder, or `default` translated in the active language.
fn resolve_placeholder(placeholder: Option<&str>, default: &str) -> String {
    placeholder.map_or_else(|| gettext(default), str::to_string)
}

/// Selected keys that are meaningful, numeric, and not yet in `options`.
fn missing_selected_ids(options: &OptionMap, selected: &Selection) -> Vec<(OptionKey, u64)> {
    selected
        .keys()
        .iter()
        .filter(|key| !key.is_empty_selection() && !options.contains_key(key))
        .filter_map(|key| match key.as_id() {
            Some(id) => Some((key.clone(), id)),
            None => {
                tracing::debug!(key = %key, "ignoring non-numeric selected key");
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Renderers
// ---------------------------------------------------------------------------

/// Renders the donations dropdown.
pub fn transactions_dropdown<S: DonationSource + ?Sized>(
    source: &S,
    settings: &ElementSettings,
    args: &TransactionsDropdownArgs,
) -> GiveResult<String> {
    let options = transaction_options(source, args.number.unwrap_or(settings.page_size))?;

    render_select(
        &DropdownConfig::new(&args.name)
            .id(&args.id)
            .class(&args.class)
            .multiple(args.multiple)
            .selected(args.selected.clone())
            .chosen(args.chosen)
            .placeholder(Some(resolve_placeholder(
                args.placeholder.as_deref(),
                "Select a transaction",
            )))
            .extra_attributes(args.extra_attributes.clone())
            .show_option_all(None)
            .show_option_none(None)
            .options(options),
    )
}

/// Renders the donation forms dropdown.
pub fn forms_dropdown<S: FormSource + ?Sized>(
    source: &S,
    settings: &ElementSettings,
    args: &FormsDropdownArgs,
) -> GiveResult<String> {
    let options = forms_options(
        source,
        args.number.unwrap_or(settings.page_size),
        &args.selected,
    )?;

    render_select(
        &DropdownConfig::new(&args.name)
            .id(&args.id)
            .class(&args.class)
            .multiple(args.multiple)
            .selected(args.selected.clone())
            .chosen(args.chosen)
            .placeholder(Some(resolve_placeholder(
                args.placeholder.as_deref(),
                "Select a Form",
            )))
            .extra_attributes(args.extra_attributes.clone())
            .show_option_all(None)
            .show_option_none(None)
            .options(options),
    )
}

/// Renders the donors dropdown.
pub fn donor_dropdown<S: DonorSource + ?Sized>(
    source: &S,
    settings: &ElementSettings,
    args: &DonorDropdownArgs,
) -> GiveResult<String> {
    let options = donor_options(
        source,
        args.number.unwrap_or(settings.page_size),
        &args.selected,
    )?;

    render_select(
        &DropdownConfig::new(&args.name)
            .id(&args.id)
            .class(format!("{} {DONOR_SELECT_CLASS}", args.class))
            .multiple(args.multiple)
            .selected(args.selected.clone())
            .chosen(args.chosen)
            .placeholder(Some(resolve_placeholder(
                args.placeholder.as_deref(),
                "Select a Donor",
            )))
            .extra_attributes(args.extra_attributes.clone())
            .show_option_all(None)
            .show_option_none(None)
            .options(options),
    )
}

/// Renders the form category dropdown with a leading "All Categories" option.
pub fn category_dropdown<S: TermSource + ?Sized>(
    source: &S,
    settings: &ElementSettings,
    query: &TermQuery,
    args: &CategoryDropdownArgs,
) -> GiveResult<String> {
    let options = category_options(source, &settings.category_taxonomy, query)?;

    render_select(
        &DropdownConfig::new(&args.name)
            .selected(args.selected.clone())
            .show_option_all(Some(gettext("All Categories")))
            .show_option_none(None)
            .options(options),
    )
}

/// Renders the year dropdown around `today`'s year.
pub fn year_dropdown(
    settings: &ElementSettings,
    today: NaiveDate,
    args: &YearDropdownArgs,
) -> GiveResult<String> {
    let current = today.year();
    let selected = if args.selected == 0 {
        current
    } else {
        args.selected
    };
    let options = year_options(
        current,
        args.years_before.unwrap_or(settings.years_before),
        args.years_after.unwrap_or(settings.years_after),
    );

    render_select(
        &DropdownConfig::new(&args.name)
            .selected(selected)
            .show_option_all(None)
            .show_option_none(None)
            .options(options),
    )
}

/// Renders the month dropdown, defaulting to `today`'s month.
pub fn month_dropdown(today: NaiveDate, args: &MonthDropdownArgs) -> GiveResult<String> {
    let selected = if args.selected == 0 {
        today.month()
    } else {
        args.selected
    };

    render_select(
        &DropdownConfig::new(&args.name)
            .selected(selected)
            .show_option_all(None)
            .show_option_none(None)
            .options(month_options()),
    )
}
