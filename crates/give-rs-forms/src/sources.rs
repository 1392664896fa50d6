//! Record stores that feed the data-backed dropdowns.
//!
//! The renderers never talk to storage directly. They call the small traits
//! here, each returning a bounded page of records or a single lookup.
//! [`MemoryStore`] implements all of them over plain vectors.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use give_rs_core::error::GiveResult;

/// A donation (payment) as listed in the transactions dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Payment id.
    pub id: u64,
    /// Email address the payment was made with.
    pub payer_email: String,
    /// Title of the form the donation was made through.
    pub form_title: String,
}

/// A donation form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormRecord {
    /// Form id.
    pub id: u64,
    /// Form title.
    pub title: String,
}

/// A donor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DonorRecord {
    /// Donor id.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Primary email.
    pub email: String,
}

impl DonorRecord {
    /// The `"name (email)"` label used in donor dropdowns.
    pub fn label(&self) -> String {
        format!("{} ({})", self.name, self.email)
    }
}

/// A taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermRecord {
    /// Term id.
    pub id: u64,
    /// Term name.
    pub name: String,
    /// Number of objects filed under the term.
    #[serde(default)]
    pub count: u64,
}

/// Filter options passed through to [`TermSource::fetch_terms`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TermQuery {
    /// Skip terms with no objects.
    pub hide_empty: bool,
    /// Case-insensitive substring the term name must contain.
    pub search: Option<String>,
    /// Maximum number of terms; `None` returns all.
    pub limit: Option<usize>,
}

/// Source of donation records.
pub trait DonationSource {
    /// Returns up to `limit` donations in the store's default order.
    fn fetch_donations(&self, limit: usize) -> GiveResult<Vec<DonationRecord>>;
}

/// Source of donation forms.
pub trait FormSource {
    /// Returns up to `limit` forms ordered by title, ascending.
    fn fetch_forms(&self, limit: usize) -> GiveResult<Vec<FormRecord>>;

    /// Looks up one form's title.
    fn lookup_form_title(&self, id: u64) -> GiveResult<Option<String>>;
}

/// Source of donors.
pub trait DonorSource {
    /// Returns up to `limit` donors.
    fn fetch_donors(&self, limit: usize) -> GiveResult<Vec<DonorRecord>>;

    /// Looks up one donor.
    fn lookup_donor(&self, id: u64) -> GiveResult<Option<DonorRecord>>;
}

/// Source of taxonomy terms.
pub trait TermSource {
    /// Returns the terms of `taxonomy` matching `query`.
    fn fetch_terms(&self, taxonomy: &str, query: &TermQuery) -> GiveResult<Vec<TermRecord>>;
}

/// Everything [`HtmlElements`](crate::elements::HtmlElements) reads from.
pub trait ElementSource: DonationSource + FormSource + DonorSource + TermSource {}

impl<T: DonationSource + FormSource + DonorSource + TermSource + ?Sized> ElementSource for T {}

/// An in-memory store implementing every source trait.
///
/// ```
/// use give_rs_forms::sources::{FormSource, MemoryStore};
///
/// let store = MemoryStore::new()
///     .with_form(2, "Zoo Fund")
///     .with_form(1, "Animal Rescue");
/// let forms = store.fetch_forms(10).unwrap();
/// assert_eq!(forms[0].title, "Animal Rescue");
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemoryStore {
    /// Donations in default order.
    pub donations: Vec<DonationRecord>,
    /// Forms in insertion order; sorted on fetch.
    pub forms: Vec<FormRecord>,
    /// Donors in default order.
    pub donors: Vec<DonorRecord>,
    /// Terms keyed by taxonomy.
    pub terms: HashMap<String, Vec<TermRecord>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a store from a JSON fixture. Missing collections are empty.
    pub fn from_json_str(json: &str) -> GiveResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a store from a JSON fixture file.
    pub fn from_json_file(path: impl AsRef<Path>) -> GiveResult<Self> {
        Self::from_json_str(&std::fs::read_to_string(path.as_ref())?)
    }

    /// Adds a donation.
    #[must_use]
    pub fn with_donation(
        mut self,
        id: u64,
        payer_email: impl Into<String>,
        form_title: impl Into<String>,
    ) -> Self {
        self.donations.push(DonationRecord {
            id,
            payer_email: payer_email.into(),
            form_title: form_title.into(),
        });
        self
    }

    /// Adds a form.
    #[must_use]
    pub fn with_form(mut self, id: u64, title: impl Into<String>) -> Self {
        self.forms.push(FormRecord {
            id,
            title: title.into(),
        });
        self
    }

    /// Adds a donor.
    #[must_use]
    pub fn with_donor(mut self, id: u64, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.donors.push(DonorRecord {
            id,
            name: name.into(),
            email: email.into(),
        });
        self
    }

    /// Adds a term to a taxonomy.
    #[must_use]
    pub fn with_term(
        mut self,
        taxonomy: impl Into<String>,
        id: u64,
        name: impl Into<String>,
        count: u64,
    ) -> Self {
        self.terms.entry(taxonomy.into()).or_default().push(TermRecord {
            id,
            name: name.into(),
            count,
        });
        self
    }
}

impl DonationSource for MemoryStore {
    fn fetch_donations(&self, limit: usize) -> GiveResult<Vec<DonationRecord>> {
        Ok(self.donations.iter().take(limit).cloned().collect())
    }
}

impl FormSource for MemoryStore {
    fn fetch_forms(&self, limit: usize) -> GiveResult<Vec<FormRecord>> {
        let mut forms = self.forms.clone();
        forms.sort_by_cached_key(|f| f.title.to_lowercase());
        forms.truncate(limit);
        Ok(forms)
    }

    fn lookup_form_title(&self, id: u64) -> GiveResult<Option<String>> {
        Ok(self
            .forms
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.title.clone()))
    }
}

impl DonorSource for MemoryStore {
    fn fetch_donors(&self, limit: usize) -> GiveResult<Vec<DonorRecord>> {
        Ok(self.donors.iter().take(limit).cloned().collect())
    }

    fn lookup_donor(&self, id: u64) -> GiveResult<Option<DonorRecord>> {
        Ok(self.donors.iter().find(|d| d.id == id).cloned())
    }
}

impl TermSource for MemoryStore {
    fn fetch_terms(&self, taxonomy: &str, query: &TermQuery) -> GiveResult<Vec<TermRecord>> {
        let Some(terms) = self.terms.get(taxonomy) else {
            return Ok(Vec::new());
        };
        let needle = query.search.as_deref().map(str::to_lowercase);
        Ok(terms
            .iter()
            .filter(|t| !query.hide_empty || t.count > 0)
            .filter(|t| {
                needle
                    .as_deref()
                    .map_or(true, |n| t.name.to_lowercase().contains(n))
            })
            .take(query.limit.unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }
}
