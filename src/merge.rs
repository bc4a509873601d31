//! Merge policies combining target bundles with overrides.
//!
//! Two policies, selected by the kind's list mode. List mode treats an
//! override entry as a full replacement of the key's value sequence. Scalar
//! mode only lets a non-empty override through, so an accidentally empty
//! submission never blanks a translated value.

use crate::{
    overrides::OverrideSet,
    types::{Bundle, MergedRecord},
};

/// Merges the four layers into one record per master key.
///
/// Records iterate exactly the master bundle's key set, in master order;
/// fallback, target, and current are looked up per key and may be empty.
pub fn merge(
    master: &Bundle,
    fallback: Option<&Bundle>,
    target: &Bundle,
    overrides: &OverrideSet,
    list_mode: bool,
) -> Vec<MergedRecord> {
    master
        .entries
        .iter()
        .map(|entry| MergedRecord {
            key: entry.key.clone(),
            master: entry.values.clone(),
            fallback: fallback
                .map(|bundle| bundle.values(&entry.key).to_vec())
                .unwrap_or_default(),
            target: target.values(&entry.key).to_vec(),
            current: merge_current(target, overrides, list_mode, &entry.key),
        })
        .collect()
}

/// The `current` column for one key.
///
/// List mode: an override entry replaces the target sequence wholesale.
/// All list-mode kinds use named keys; numeric keys would raise the
/// append-vs-overwrite question and are not given a meaning here.
///
/// Scalar mode: the override wins only when its first element is non-empty,
/// otherwise the target value is kept.
fn merge_current(
    target: &Bundle,
    overrides: &OverrideSet,
    list_mode: bool,
    key: &str,
) -> Vec<String> {
    match overrides.get(key) {
        Some(values) if list_mode => values.clone(),
        Some(values) if values.first().is_some_and(|v| !v.is_empty()) => values.clone(),
        _ => target.values(key).to_vec(),
    }
}
