//! The [`HtmlElements`] facade.
//!
//! Binds a record store and the runtime [`Settings`] together so callers can
//! render any control with a single method call. Every method opens a
//! `render` span tagged with the control kind and field name, and renders
//! with `settings.language_code` active. The caller's language is restored
//! when the call returns.

use chrono::NaiveDate;
use tracing::span::EnteredSpan;

use give_rs_core::error::GiveResult;
use give_rs_core::i18n::{self, timezone, LanguageOverride};
use give_rs_core::logging::render_span;
use give_rs_core::settings::Settings;

use crate::dropdowns::{
    self, CategoryDropdownArgs, DonorDropdownArgs, FormsDropdownArgs, MonthDropdownArgs,
    TransactionsDropdownArgs, YearDropdownArgs,
};
use crate::inputs::{self, CheckboxArgs, TextArgs, TextareaArgs, UserSearchArgs};
use crate::select::{render_select, DropdownConfig};
use crate::sources::{ElementSource, TermQuery};

/// Renders admin form controls backed by a record store.
///
/// ```
/// use give_rs_core::Settings;
/// use give_rs_forms::dropdowns::FormsDropdownArgs;
/// use give_rs_forms::elements::HtmlElements;
/// use give_rs_forms::sources::MemoryStore;
///
/// let store = MemoryStore::new().with_form(7, "Winter Appeal");
/// let settings = Settings::default();
/// let elements = HtmlElements::new(&store, &settings);
///
/// let html = elements.forms_dropdown(&FormsDropdownArgs::default()).unwrap();
/// assert!(html.contains(r#"<option value="7">Winter Appeal</option>"#));
/// ```
#[derive(Debug)]
pub struct HtmlElements<'a, S: ?Sized> {
    source: &'a S,
    settings: &'a Settings,
    today: Option<NaiveDate>,
    term_query: TermQuery,
}

impl<'a, S: ElementSource + ?Sized> HtmlElements<'a, S> {
    /// Creates a facade over `source`.
    pub fn new(source: &'a S, settings: &'a Settings) -> Self {
        Self {
            source,
            settings,
            today: None,
            term_query: TermQuery::default(),
        }
    }

    /// Pins the date the year and month dropdowns treat as today.
    #[must_use]
    pub const fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Sets the term filter used by the category dropdown.
    #[must_use]
    pub fn with_term_query(mut self, query: TermQuery) -> Self {
        self.term_query = query;
        self
    }

    /// The settings this facade renders with.
    pub const fn settings(&self) -> &Settings {
        self.settings
    }

    /// The pinned date. Otherwise today in the timezone activated on this
    /// thread, falling back to `settings.time_zone_offset`.
    pub fn today(&self) -> NaiveDate {
        match (self.today, timezone::active_timezone_offset()) {
            (Some(today), _) => today,
            (None, Some(_)) => timezone::today(),
            (None, None) => timezone::today_with_offset(self.settings.time_zone_offset),
        }
    }

    fn scope(&self, control: &str, name: &str) -> RenderScope {
        RenderScope {
            _span: render_span(control, name).entered(),
            _language: i18n::override_language(&self.settings.language_code),
        }
    }

    /// Renders an arbitrary dropdown.
    ///
    /// The "All" and "None" labels of a [`DropdownConfig`] are translated
    /// when the config is built, so build it under the language it should
    /// render in.
    pub fn select(&self, config: &DropdownConfig) -> GiveResult<String> {
        let _scope = self.scope("select", &config.name);
        render_select(config)
    }

    /// Renders the donations dropdown.
    pub fn transactions_dropdown(&self, args: &TransactionsDropdownArgs) -> GiveResult<String> {
        let _scope = self.scope("transactions_dropdown", &args.name);
        dropdowns::transactions_dropdown(self.source, &self.settings.elements, args)
    }

    /// Renders the donation forms dropdown.
    pub fn forms_dropdown(&self, args: &FormsDropdownArgs) -> GiveResult<String> {
        let _scope = self.scope("forms_dropdown", &args.name);
        dropdowns::forms_dropdown(self.source, &self.settings.elements, args)
    }

    /// Renders the donors dropdown.
    pub fn donor_dropdown(&self, args: &DonorDropdownArgs) -> GiveResult<String> {
        let _scope = self.scope("donor_dropdown", &args.name);
        dropdowns::donor_dropdown(self.source, &self.settings.elements, args)
    }

    /// Renders the form category dropdown.
    pub fn category_dropdown(&self, args: &CategoryDropdownArgs) -> GiveResult<String> {
        let _scope = self.scope("category_dropdown", &args.name);
        dropdowns::category_dropdown(
            self.source,
            &self.settings.elements,
            &self.term_query,
            args,
        )
    }

    /// Renders the year dropdown.
    pub fn year_dropdown(&self, args: &YearDropdownArgs) -> GiveResult<String> {
        let _scope = self.scope("year_dropdown", &args.name);
        dropdowns::year_dropdown(&self.settings.elements, self.today(), args)
    }

    /// Renders the month dropdown.
    pub fn month_dropdown(&self, args: &MonthDropdownArgs) -> GiveResult<String> {
        let _scope = self.scope("month_dropdown", &args.name);
        dropdowns::month_dropdown(self.today(), args)
    }

    /// Renders a checkbox.
    pub fn checkbox(&self, args: &CheckboxArgs) -> String {
        let _scope = self.scope("checkbox", &args.name);
        inputs::checkbox(args)
    }

    /// Renders a text input.
    pub fn text(&self, args: &TextArgs) -> String {
        let _scope = self.scope("text", &args.name);
        inputs::text(args)
    }

    /// Renders a text input from positional values.
    pub fn text_positional(&self, name: &str, value: &str, label: &str, desc: &str) -> String {
        let _scope = self.scope("text", name);
        inputs::text_positional(name, value, label, desc)
    }

    /// Renders a date input.
    pub fn date_field(&self, args: TextArgs) -> String {
        let _scope = self.scope("date_field", &args.name);
        inputs::date_field(args)
    }

    /// Renders a textarea.
    pub fn textarea(&self, args: &TextareaArgs) -> String {
        let _scope = self.scope("textarea", &args.name);
        inputs::textarea(args)
    }

    /// Renders the ajax user search box.
    pub fn ajax_user_search(&self, args: UserSearchArgs) -> String {
        let _scope = self.scope("ajax_user_search", &args.name);
        inputs::ajax_user_search(args)
    }
}

/// The span and language entered for one render call.
struct RenderScope {
    _span: EnteredSpan,
    _language: LanguageOverride,
}

#[cfg(test)]
mod tests {
    use give_rs_core::i18n::catalog;

    use super::*;
    use crate::option_map::Selection;
    use crate::sources::MemoryStore;

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_form(1, "Arts")
            .with_form(2, "Books")
            .with_term("give_forms_category", 5, "Education", 3)
            .with_term("give_forms_category", 6, "Empty", 0)
    }

    #[test]
    fn test_pinned_today_drives_year_and_month() {
        let s = store();
        let settings = Settings::default();
        let elements = HtmlElements::new(&s, &settings)
            .with_today(NaiveDate::from_ymd_opt(2030, 8, 1).unwrap());
        assert_eq!(elements.today(), NaiveDate::from_ymd_opt(2030, 8, 1).unwrap());

        let years = elements.year_dropdown(&YearDropdownArgs::default()).unwrap();
        assert!(years.contains(r#"<option value="2030" selected='selected'>2030</option>"#));
        assert!(years.contains(r#"<option value="2025">"#));

        let months = elements.month_dropdown(&MonthDropdownArgs::default()).unwrap();
        assert!(months.contains(r#"<option value="8" selected='selected'>Aug</option>"#));
    }

    #[test]
    fn test_year_range_from_settings() {
        let s = store();
        let mut settings = Settings::default();
        settings.elements.years_before = 1;
        settings.elements.years_after = 2;
        let elements = HtmlElements::new(&s, &settings)
            .with_today(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        let html = elements.year_dropdown(&YearDropdownArgs::default()).unwrap();
        assert_eq!(html.matches("<option").count(), 4);
        assert!(html.contains(r#"value="2023""#));
        assert!(html.contains(r#"value="2026""#));
    }

    #[test]
    fn test_term_query_applies_to_categories() {
        let s = store();
        let settings = Settings::default();
        let elements = HtmlElements::new(&s, &settings);
        let all = elements
            .category_dropdown(&CategoryDropdownArgs::default())
            .unwrap();
        assert!(all.contains("Empty"));

        let filtered = elements
            .with_term_query(TermQuery {
                hide_empty: true,
                ..TermQuery::default()
            })
            .category_dropdown(&CategoryDropdownArgs::default())
            .unwrap();
        assert!(!filtered.contains("Empty"));
        assert!(filtered.contains("Education"));
    }

    #[test]
    fn test_page_size_from_settings() {
        let s = store();
        let mut settings = Settings::default();
        settings.elements.page_size = 1;
        let elements = HtmlElements::new(&s, &settings);
        let html = elements.forms_dropdown(&FormsDropdownArgs::default()).unwrap();
        assert!(html.contains("Arts"));
        assert!(!html.contains("Books"));
    }

    #[test]
    fn test_select_passthrough() {
        let s = store();
        let settings = Settings::default();
        let elements = HtmlElements::new(&s, &settings);
        let config = DropdownConfig::new("status").selected(Selection::multiple(["1"]));
        assert!(elements.select(&config).unwrap_err().is_configuration());
    }

    #[test]
    fn test_inputs_through_facade() {
        let s = store();
        let settings = Settings::default();
        let elements = HtmlElements::new(&s, &settings);
        assert!(elements
            .checkbox(&CheckboxArgs {
                name: "agree".into(),
                current: Some("1".into()),
                ..CheckboxArgs::default()
            })
            .contains("checked='checked'"));
        assert!(elements
            .date_field(TextArgs::default())
            .contains("give_datepicker"));
        assert!(elements
            .text_positional("city", "Oslo", "City", "")
            .contains(r#"value="Oslo""#));
        assert!(elements
            .textarea(&TextareaArgs::default())
            .contains("<textarea"));
        assert!(elements
            .ajax_user_search(UserSearchArgs::default())
            .contains("give_user_search_wrap"));
        assert!(elements.text(&TextArgs::default()).contains("give-text-wrap"));
    }

    #[test]
    fn test_works_with_trait_object() {
        let s = store();
        let dyn_store: &dyn ElementSource = &s;
        let settings = Settings::default();
        let elements = HtmlElements::new(dyn_store, &settings);
        assert!(elements
            .donor_dropdown(&DonorDropdownArgs::default())
            .unwrap()
            .contains("No donors found."));
        assert_eq!(elements.settings().elements.page_size, 30);
    }

    #[test]
    fn test_renders_in_settings_language() {
        catalog::register_translations(
            "t-el-fr",
            vec![
                ("No forms found.", "Aucun formulaire."),
                ("Select a Form", "Choisir un formulaire"),
            ],
        );
        let empty = MemoryStore::new();
        let mut settings = Settings::default();
        settings.language_code = "t-el-fr".into();
        let elements = HtmlElements::new(&empty, &settings);

        i18n::activate("t-el-other");
        let html = elements.forms_dropdown(&FormsDropdownArgs::default()).unwrap();
        assert!(html.contains("Aucun formulaire."));
        assert!(html.contains(r#"data-placeholder="Choisir un formulaire""#));
        assert!(!html.contains("No forms found."));
        assert_eq!(i18n::get_language(), "t-el-other");

        i18n::deactivate();
        let html = elements.forms_dropdown(&FormsDropdownArgs::default()).unwrap();
        assert!(html.contains("Aucun formulaire."));
        assert_eq!(i18n::get_language(), "en");
    }

    #[test]
    fn test_thread_timezone_wins_over_settings_offset() {
        let s = store();
        let mut settings = Settings::default();
        settings.time_zone_offset = -12 * 3600;
        let elements = HtmlElements::new(&s, &settings);

        timezone::deactivate_timezone();
        let from_settings = elements.today();
        assert!((from_settings - timezone::today_with_offset(-12 * 3600)).num_days().abs() <= 1);

        // 26 hours apart, so the two dates never coincide.
        timezone::activate_timezone(14 * 3600);
        let from_thread = elements.today();
        timezone::deactivate_timezone();
        assert_ne!(from_thread, timezone::today_with_offset(-12 * 3600));
        assert!(from_thread > from_settings);
    }

    #[test]
    fn test_pinned_today_beats_thread_timezone() {
        let s = store();
        let settings = Settings::default();
        let pinned = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
        let elements = HtmlElements::new(&s, &settings).with_today(pinned);
        timezone::activate_timezone(3600);
        assert_eq!(elements.today(), pinned);
        timezone::deactivate_timezone();
    }
}
