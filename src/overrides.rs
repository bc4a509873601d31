//! The persisted override text format.
//!
//! Line-oriented `key=value` pairs: blank lines and lines opening with `#`
//! or `<` (the banner and markup of the persisted page wrapper) are skipped,
//! the value is split on the literal `", "` delimiter. Values containing a
//! literal `", "` cannot be round-tripped faithfully; that is a documented
//! limitation of the format, not something the parser tries to fix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{error::Error, traits::Parser};

/// The delimiter between elements of a multi-valued override.
pub const VALUE_DELIMITER: &str = ", ";

/// A sparse mapping from key to override values, parsed from persisted text.
///
/// Keys absent from the set mean "no override for this key". The set is
/// read-only between a parse and the next save.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OverrideSet {
    pub entries: BTreeMap<String, Vec<String>>,
}

impl OverrideSet {
    pub fn new() -> Self {
        OverrideSet::default()
    }

    /// Parses persisted override text. Never fails: malformed lines are
    /// skipped, not reported.
    ///
    /// A line whose value is empty after trimming is treated as "no
    /// override", not as "override to empty" — scalar-mode merging depends
    /// on this.
    pub fn parse(text: &str) -> Self {
        let mut entries = BTreeMap::new();
        for line in text.lines() {
            let trimmed = line.trim_start();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('<') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            let elements = value.split(VALUE_DELIMITER).map(str::to_string).collect();
            entries.insert(key.to_string(), elements);
        }
        OverrideSet { entries }
    }

    pub fn get(&self, key: &str) -> Option<&Vec<String>> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, values: Vec<String>) {
        self.entries.insert(key.into(), values);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Parser for OverrideSet {
    fn from_reader<R: std::io::BufRead>(reader: R) -> Result<Self, Error> {
        let text = reader.lines().collect::<Result<Vec<_>, _>>()?.join("\n");
        Ok(OverrideSet::parse(&text))
    }

    /// Writes the canonical `key=v1, v2` form, one key per line in key
    /// order. This is the inverse of [`OverrideSet::parse`] for values that
    /// contain no literal `", "`.
    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<(), Error> {
        let mut content = String::new();
        for (key, values) in &self.entries {
            content.push_str(key);
            content.push('=');
            content.push_str(&values.join(VALUE_DELIMITER));
            content.push('\n');
        }
        writer.write_all(content.as_bytes()).map_err(Error::Io)
    }
}

/// Serializes edited field values into override text.
///
/// One `key=value` line per key, in the supplied iteration order, with the
/// submitted text written verbatim — serialization inverts the editing step,
/// not `parse`, so no delimiter re-splitting happens here. Keys with no
/// submitted value get an empty value, which the next parse drops.
pub fn serialize_edits<'a, I>(keys: I, fields: &BTreeMap<String, String>) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let mut text = String::new();
    for key in keys {
        text.push_str(key);
        text.push('=');
        if let Some(value) = fields.get(key) {
            text.push_str(value);
        }
        text.push('\n');
    }
    text.trim().to_string()
}
