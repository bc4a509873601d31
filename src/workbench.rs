//! This module provides the `Workbench` struct, the facade over bundle
//! loading, override parsing, merging, saving, and export.
//!
//! A workbench holds one `BundleSource` and one `OverrideStorage` and
//! memoizes merged views per `(kind, locale)`. The memo is request-scoped
//! state owned by the workbench instance, not process-wide: it is computed
//! lazily, reused until a save for the same `(kind, locale)` succeeds, and
//! dropped with the workbench.

use std::collections::{BTreeMap, HashMap};

use crate::{
    error::Error,
    export,
    kinds::EntityKind,
    merge,
    overrides::{self, OverrideSet},
    traits::{BundleSource, OverrideStorage},
    types::{MergedView, MASTER_LOCALE},
};

/// Banner prepended to every persisted override page. Parsing skips it via
/// the `#`/`<` comment rule.
const PAGE_BANNER: &str = "# DO NOT EDIT THIS PAGE DIRECTLY!";

/// Reconciles layered localization data behind three operations:
/// [`merged_view`](Workbench::merged_view),
/// [`apply_edits`](Workbench::apply_edits), and
/// [`export_text`](Workbench::export_text).
pub struct Workbench<S, O> {
    source: S,
    storage: O,
    views: HashMap<(EntityKind, String), MergedView>,
}

impl<S: BundleSource, O: OverrideStorage> Workbench<S, O> {
    /// Creates a workbench over the given collaborators.
    pub fn new(source: S, storage: O) -> Self {
        Workbench {
            source,
            storage,
            views: HashMap::new(),
        }
    }

    /// Returns the merged view for a kind and target locale, computing it on
    /// first use and reusing it afterwards.
    ///
    /// # Parameters
    /// - `kind`: Which dataset variant to merge.
    /// - `locale`: Target locale code.
    ///
    /// # Returns
    ///
    /// The memoized view, or an `Error` when a data source exists but cannot
    /// be read. Missing locale data, fallbacks, and overrides are normal and
    /// resolve to empty columns.
    pub fn merged_view(&mut self, kind: EntityKind, locale: &str) -> Result<&MergedView, Error> {
        let key = (kind, locale.to_string());
        if !self.views.contains_key(&key) {
            let view = build_view(&self.source, &self.storage, kind, locale)?;
            self.views.insert(key.clone(), view);
        }
        Ok(self.views.get(&key).expect("view inserted above"))
    }

    /// Serializes edited field values and persists them as the override page
    /// for `(kind, locale)`.
    ///
    /// Field values are written verbatim over the master key order. A
    /// storage failure propagates verbatim and leaves the memoized view
    /// untouched; a second attempt requires a fresh call. On success the
    /// memoized view for this `(kind, locale)` is invalidated so the next
    /// read re-merges against the new overrides.
    pub fn apply_edits(
        &mut self,
        kind: EntityKind,
        locale: &str,
        fields: &BTreeMap<String, String>,
    ) -> Result<(), Error> {
        let keys: Vec<String> = self
            .merged_view(kind, locale)?
            .records
            .iter()
            .map(|r| r.key.clone())
            .collect();

        let body = overrides::serialize_edits(keys.iter().map(String::as_str), fields);
        let text = format!("{}\n<pre>\n{}\n</pre>", PAGE_BANNER, body);

        self.storage.write(kind.storage_key(), locale, &text)?;
        self.views.remove(&(kind, locale.to_string()));
        Ok(())
    }

    /// Renders the merged view for `(kind, locale)` as array-literal text.
    pub fn export_text(&mut self, kind: EntityKind, locale: &str) -> Result<String, Error> {
        let view = self.merged_view(kind, locale)?;
        export::export(view)
    }
}

/// Loads and merges the four layers for one `(kind, locale)`.
fn build_view<S: BundleSource, O: OverrideStorage>(
    source: &S,
    storage: &O,
    kind: EntityKind,
    locale: &str,
) -> Result<MergedView, Error> {
    let variable = kind.variable_name();
    let master = source.load_variable(MASTER_LOCALE, variable)?;
    let target = source.load_variable(locale, variable)?;

    // A fallback identical to the reference locale would duplicate the
    // master column; treat it as absent.
    let fallback_locale = source
        .fallback_locale(locale)
        .filter(|fb| fb != MASTER_LOCALE);
    let fallback = match &fallback_locale {
        Some(fb) => Some(source.load_variable(fb, variable)?),
        None => None,
    };

    let overrides = match storage.read(kind.storage_key(), locale)? {
        Some(text) => OverrideSet::parse(&text),
        None => OverrideSet::new(),
    };

    let records = merge::merge(
        &master,
        fallback.as_ref(),
        &target,
        &overrides,
        kind.list_mode(),
    );

    Ok(MergedView {
        kind,
        locale: locale.to_string(),
        fallback_locale,
        records,
    })
}
