//! Core, kind-agnostic types for langoverlay.
//! Bundle loaders decode into these; the merger and exporter consume them.

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::kinds::EntityKind;

/// The reference locale every other locale is compared against.
pub const MASTER_LOCALE: &str = "en";

/// A raw key-to-values dataset for one locale and one named variable.
///
/// Entries keep the order of the data source, which for the master bundle
/// defines the iteration order of the whole merged view. A bundle is
/// read-only once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Bundle {
    /// Ordered list of all entries in this bundle.
    pub entries: Vec<BundleEntry>,
}

/// A single key with its ordered value sequence.
///
/// List-mode kinds carry one or more values per key; scalar-mode kinds carry
/// exactly one logical value, represented as a one-element sequence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BundleEntry {
    /// The key for this entry. Numeric keys (namespace numbers) are stored
    /// as their decimal string form.
    pub key: String,

    /// The ordered values for this key.
    #[serde(default)]
    pub values: Vec<String>,
}

impl Bundle {
    pub fn new() -> Self {
        Bundle::default()
    }

    /// Builds a bundle from `(key, values)` pairs, keeping their order.
    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Vec<String>)>,
    {
        Bundle {
            entries: pairs
                .into_iter()
                .map(|(key, values)| BundleEntry {
                    key: key.into(),
                    values,
                })
                .collect(),
        }
    }

    pub fn add_entry(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.entries.push(BundleEntry {
            key: key.into(),
            values,
        });
    }

    pub fn find_entry(&self, key: &str) -> Option<&BundleEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    /// Returns the values for `key`, or an empty slice if the key is absent.
    /// Absence is a normal default, not an error.
    pub fn values(&self, key: &str) -> &[String] {
        self.find_entry(key).map(|e| e.values.as_slice()).unwrap_or(&[])
    }

    /// Iterates the keys in bundle order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One merged row: the four logical columns for a single master key.
///
/// Empty vectors mean the column has no data for this key. `current` is the
/// editable column — target merged with the override per the kind's policy —
/// and is the only column export and presentation read.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergedRecord {
    pub key: String,

    /// Values from the reference locale. Always populated for iterated keys.
    pub master: Vec<String>,

    /// Values from the fallback locale; empty when the view has no fallback
    /// locale or the key is missing there.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub fallback: Vec<String>,

    /// Raw target-locale values, before overrides.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub target: Vec<String>,

    /// Target merged with the override. Read by export and presentation.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[serde(default)]
    pub current: Vec<String>,
}

/// A complete merged view for one entity kind and one target locale.
///
/// Records iterate exactly the master bundle's key set, in master order.
/// The view is derived data: it is recomputed from its sources on demand and
/// never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MergedView {
    pub kind: EntityKind,

    /// The target locale this view was merged for.
    pub locale: String,

    /// The resolved fallback locale, if the target has one distinct from the
    /// reference locale. `None` means the fallback column does not exist.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub fallback_locale: Option<String>,

    pub records: Vec<MergedRecord>,
}

impl MergedView {
    pub fn find_record(&self, key: &str) -> Option<&MergedRecord> {
        self.records.iter().find(|r| r.key == key)
    }

    /// First element of `current` for `key`, or `""` when absent.
    pub fn current_first(&self, key: &str) -> &str {
        self.find_record(key)
            .and_then(|r| r.current.first())
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn parse_language_identifier(&self) -> Option<LanguageIdentifier> {
        self.locale.parse().ok()
    }
}
