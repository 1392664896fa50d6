//! Option keys, ordered option maps, and selection state.
//!
//! A dropdown's choices are an [`OptionMap`]: keys in insertion order, each
//! with a display label. Keys are stored as strings so record ids (`42`) and
//! the sentinel keys (`"all"`, `"-1"`) share one type; an integer key and its
//! decimal string compare equal.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of the synthetic "all" option injected by the select renderer.
pub const ALL_KEY: &str = "all";

/// Key of the synthetic "none" option injected by the select renderer.
pub const NONE_KEY: &str = "-1";

/// Key of the placeholder/fallback entry the data-backed dropdowns put first.
/// A selection equal to this key means "nothing selected".
pub const EMPTY_KEY: &str = "0";

/// A single option key.
///
/// Deserializes from either a JSON number or a string.
///
/// ```
/// use give_rs_forms::option_map::OptionKey;
///
/// assert_eq!(OptionKey::from(42_u64), OptionKey::from("42"));
/// assert_eq!(OptionKey::from("42").as_id(), Some(42));
/// assert_eq!(OptionKey::from("all").as_id(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawKey", into = "String")]
pub struct OptionKey(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Int(i64),
    UInt(u64),
    Str(String),
}

impl From<RawKey> for OptionKey {
    fn from(raw: RawKey) -> Self {
        match raw {
            RawKey::Int(i) => Self::from(i),
            RawKey::UInt(u) => Self::from(u),
            RawKey::Str(s) => Self(s),
        }
    }
}

impl From<OptionKey> for String {
    fn from(key: OptionKey) -> Self {
        key.0
    }
}

impl OptionKey {
    /// Creates a key from its string form.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The `"0"` key.
    pub fn empty() -> Self {
        Self(EMPTY_KEY.to_string())
    }

    /// Returns the key's string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parses the key as a record id. Sentinels, negative numbers, and
    /// non-numeric keys yield `None`.
    pub fn as_id(&self) -> Option<u64> {
        self.0.trim().parse().ok()
    }

    /// Returns `true` for the empty string and the `"0"` key, both of which
    /// mean "no selection".
    pub fn is_empty_selection(&self) -> bool {
        let trimmed = self.0.trim();
        trimmed.is_empty() || trimmed == EMPTY_KEY
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for OptionKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for OptionKey {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

macro_rules! option_key_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for OptionKey {
                fn from(n: $t) -> Self {
                    Self(n.to_string())
                }
            }
        )*
    };
}

option_key_from_int!(i32, i64, u32, u64, usize);

macro_rules! selection_from_key {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Selection {
                fn from(key: $t) -> Self {
                    Self::Single(key.into())
                }
            }
        )*
    };
}

selection_from_key!(OptionKey, &str, String, i32, i64, u32, u64, usize);

/// An ordered mapping from option key to display label.
///
/// Iteration follows insertion order. Re-inserting an existing key replaces
/// its label in place. Lookups go through a key index, so building a map of
/// `n` entries is linear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<(OptionKey, String)>", into = "Vec<(OptionKey, String)>")]
pub struct OptionMap {
    entries: Vec<(OptionKey, String)>,
    index: HashMap<OptionKey, usize>,
}

impl OptionMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Inserts an entry, returning the previous label if the key existed.
    pub fn insert(&mut self, key: impl Into<OptionKey>, label: impl Into<String>) -> Option<String> {
        let key = key.into();
        let label = label.into();
        if let Some(&position) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[position].1, label));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, label));
        None
    }

    /// Returns `true` if the key is present.
    pub fn contains_key(&self, key: &OptionKey) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the label for a key.
    pub fn get(&self, key: &OptionKey) -> Option<&str> {
        self.index
            .get(key)
            .map(|&position| self.entries[position].1.as_str())
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(key, label)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&OptionKey, &str)> {
        self.entries.iter().map(|(k, label)| (k, label.as_str()))
    }

    /// Iterates keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &OptionKey> {
        self.entries.iter().map(|(k, _)| k)
    }
}

impl From<Vec<(OptionKey, String)>> for OptionMap {
    fn from(entries: Vec<(OptionKey, String)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<OptionMap> for Vec<(OptionKey, String)> {
    fn from(map: OptionMap) -> Self {
        map.entries
    }
}

impl<K: Into<OptionKey>, V: Into<String>> FromIterator<(K, V)> for OptionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut map = Self::with_capacity(iter.size_hint().0);
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// Which option(s) a dropdown renders as selected.
///
/// Deserializes from a scalar (single) or an array (multiple).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    /// One key; used by single-select dropdowns.
    Single(OptionKey),
    /// A set of keys; used by multi-select dropdowns.
    Multiple(Vec<OptionKey>),
}

impl Default for Selection {
    fn default() -> Self {
        Self::none()
    }
}

impl Selection {
    /// The "nothing selected" value: a single `"0"` key.
    pub fn none() -> Self {
        Self::Single(OptionKey::empty())
    }

    /// Builds a single selection.
    pub fn single(key: impl Into<OptionKey>) -> Self {
        Self::Single(key.into())
    }

    /// Builds a multiple selection.
    pub fn multiple<K: Into<OptionKey>>(keys: impl IntoIterator<Item = K>) -> Self {
        Self::Multiple(keys.into_iter().map(Into::into).collect())
    }

    /// Returns `true` for the set form.
    pub const fn is_multiple(&self) -> bool {
        matches!(self, Self::Multiple(_))
    }

    /// Returns `true` if `key` is selected: equality for a single key,
    /// membership for a set.
    pub fn contains(&self, key: &OptionKey) -> bool {
        match self {
            Self::Single(selected) => selected == key,
            Self::Multiple(selected) => selected.contains(key),
        }
    }

    /// Returns the selected keys as a slice.
    pub fn keys(&self) -> &[OptionKey] {
        match self {
            Self::Single(key) => std::slice::from_ref(key),
            Self::Multiple(keys) => keys,
        }
    }

    /// Returns `true` if nothing meaningful is selected.
    pub fn is_empty(&self) -> bool {
        self.keys().iter().all(OptionKey::is_empty_selection)
    }
}

impl From<Vec<OptionKey>> for Selection {
    fn from(keys: Vec<OptionKey>) -> Self {
        Self::Multiple(keys)
    }
}
