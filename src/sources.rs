//! Concrete bundle sources and override storages.
//!
//! `FileBundleSource` reads one JSON data file per locale and resolves
//! fallbacks from explicit data or the locale code itself.
//! `FileOverrideStorage` keeps one override text file per storage key and
//! locale. The in-memory counterparts serve embedders and tests.

use std::{collections::HashMap, fs::File, io::BufReader, path::PathBuf};

use serde::{Deserialize, Serialize};
use unic_langid::LanguageIdentifier;

use crate::{
    error::Error,
    traits::{BundleSource, OverrideStorage},
    types::Bundle,
};

/// On-disk shape of one locale's data file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
struct LocaleFile {
    /// Explicit fallback locale; wins over the derived one.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    fallback: Option<String>,

    /// Named variables, each a full bundle.
    #[serde(default)]
    variables: HashMap<String, Bundle>,
}

/// Loads variable bundles from a directory of `<locale>.json` files.
///
/// A locale with no data file yields empty bundles — absence of locale data
/// is a normal, expected condition. A file that exists but cannot be read
/// or decoded is an error.
#[derive(Debug, Clone)]
pub struct FileBundleSource {
    root: PathBuf,
}

impl FileBundleSource {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        FileBundleSource { root: root.into() }
    }

    fn locale_path(&self, locale: &str) -> PathBuf {
        self.root.join(format!("{}.json", locale))
    }

    fn read_locale_file(&self, locale: &str) -> Result<Option<LocaleFile>, Error> {
        let path = self.locale_path(locale);
        if !path.exists() {
            return Ok(None);
        }
        let file = File::open(path).map_err(Error::Io)?;
        let parsed = serde_json::from_reader(BufReader::new(file)).map_err(Error::Parse)?;
        Ok(Some(parsed))
    }
}

impl BundleSource for FileBundleSource {
    fn load_variable(&self, locale: &str, variable: &str) -> Result<Bundle, Error> {
        Ok(self
            .read_locale_file(locale)?
            .and_then(|f| f.variables.get(variable).cloned())
            .unwrap_or_default())
    }

    fn fallback_locale(&self, locale: &str) -> Option<String> {
        if let Ok(Some(file)) = self.read_locale_file(locale)
            && file.fallback.is_some()
        {
            return file.fallback;
        }
        derive_fallback(locale)
    }
}

/// Derives a fallback by dropping region and script from the locale code:
/// `pt-BR` falls back to `pt`, a bare `fi` has none.
fn derive_fallback(locale: &str) -> Option<String> {
    let id: LanguageIdentifier = locale.parse().ok()?;
    if id.region.is_none() && id.script.is_none() {
        return None;
    }
    Some(id.language.to_string())
}

/// In-memory bundle source keyed by `(locale, variable)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryBundleSource {
    bundles: HashMap<(String, String), Bundle>,
    fallbacks: HashMap<String, String>,
}

impl MemoryBundleSource {
    pub fn new() -> Self {
        MemoryBundleSource::default()
    }

    pub fn insert_bundle(
        &mut self,
        locale: impl Into<String>,
        variable: impl Into<String>,
        bundle: Bundle,
    ) {
        self.bundles.insert((locale.into(), variable.into()), bundle);
    }

    pub fn set_fallback(&mut self, locale: impl Into<String>, fallback: impl Into<String>) {
        self.fallbacks.insert(locale.into(), fallback.into());
    }
}

impl BundleSource for MemoryBundleSource {
    fn load_variable(&self, locale: &str, variable: &str) -> Result<Bundle, Error> {
        Ok(self
            .bundles
            .get(&(locale.to_string(), variable.to_string()))
            .cloned()
            .unwrap_or_default())
    }

    fn fallback_locale(&self, locale: &str) -> Option<String> {
        self.fallbacks.get(locale).cloned().or_else(|| derive_fallback(locale))
    }
}

/// Persists override text at `<root>/<storage_key>/<locale>.txt`.
#[derive(Debug, Clone)]
pub struct FileOverrideStorage {
    root: PathBuf,
}

impl FileOverrideStorage {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        FileOverrideStorage { root: root.into() }
    }

    fn page_path(&self, storage_key: &str, locale: &str) -> PathBuf {
        self.root.join(storage_key).join(format!("{}.txt", locale))
    }
}

impl OverrideStorage for FileOverrideStorage {
    fn read(&self, storage_key: &str, locale: &str) -> Result<Option<String>, Error> {
        let path = self.page_path(storage_key, locale);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(path).map_err(Error::Io)?))
    }

    fn write(&mut self, storage_key: &str, locale: &str, text: &str) -> Result<(), Error> {
        let path = self.page_path(storage_key, locale);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(Error::Io)?;
        }
        std::fs::write(path, text).map_err(Error::Io)
    }
}

/// In-memory override storage keyed by `(storage_key, locale)`.
#[derive(Debug, Clone, Default)]
pub struct MemoryOverrideStorage {
    pages: HashMap<(String, String), String>,
    /// When set, every write fails with this message. Test hook for the
    /// persistence-failure path.
    pub fail_writes_with: Option<String>,
}

impl MemoryOverrideStorage {
    pub fn new() -> Self {
        MemoryOverrideStorage::default()
    }

    pub fn page(&self, storage_key: &str, locale: &str) -> Option<&String> {
        self.pages.get(&(storage_key.to_string(), locale.to_string()))
    }
}

impl OverrideStorage for MemoryOverrideStorage {
    fn read(&self, storage_key: &str, locale: &str) -> Result<Option<String>, Error> {
        Ok(self.page(storage_key, locale).cloned())
    }

    fn write(&mut self, storage_key: &str, locale: &str, text: &str) -> Result<(), Error> {
        if let Some(message) = &self.fail_writes_with {
            return Err(Error::save_failed(message.clone()));
        }
        self.pages
            .insert((storage_key.to_string(), locale.to_string()), text.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::Path;

    fn write_locale_file(dir: &Path, locale: &str, content: &str) {
        let mut file = File::create(dir.join(format!("{}.json", locale))).unwrap();
        file.write_all(content.as_bytes()).unwrap();
    }

    #[test]
    fn test_missing_locale_file_is_empty_bundle() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileBundleSource::new(dir.path());
        let bundle = source.load_variable("xx", "skinNames").unwrap();
        assert!(bundle.is_empty());
    }

    #[test]
    fn test_corrupt_locale_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_locale_file(dir.path(), "fi", "{ not json");
        let source = FileBundleSource::new(dir.path());
        assert!(source.load_variable("fi", "skinNames").is_err());
    }

    #[test]
    fn test_load_variable_from_locale_file() {
        let dir = tempfile::tempdir().unwrap();
        write_locale_file(
            dir.path(),
            "fi",
            r#"{
                "variables": {
                    "skinNames": [
                        {"key": "standard", "values": ["Perus"]},
                        {"key": "monobook", "values": ["Monokirja"]}
                    ]
                }
            }"#,
        );
        let source = FileBundleSource::new(dir.path());
        let bundle = source.load_variable("fi", "skinNames").unwrap();
        assert_eq!(bundle.len(), 2);
        assert_eq!(bundle.values("standard"), ["Perus".to_string()]);
        // A variable the file does not carry is empty, not an error.
        assert!(source.load_variable("fi", "magicWords").unwrap().is_empty());
    }

    #[test]
    fn test_explicit_fallback_wins_over_derived() {
        let dir = tempfile::tempdir().unwrap();
        write_locale_file(dir.path(), "frp", r#"{"fallback": "fr", "variables": {}}"#);
        let source = FileBundleSource::new(dir.path());
        assert_eq!(source.fallback_locale("frp"), Some("fr".to_string()));
    }

    #[test]
    fn test_fallback_derived_from_region() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileBundleSource::new(dir.path());
        assert_eq!(source.fallback_locale("pt-BR"), Some("pt".to_string()));
        assert_eq!(source.fallback_locale("fi"), None);
    }

    #[test]
    fn test_file_override_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileOverrideStorage::new(dir.path());
        assert_eq!(storage.read("sp-translate-data-SkinNames", "fi").unwrap(), None);
        storage
            .write("sp-translate-data-SkinNames", "fi", "standard=Perus")
            .unwrap();
        assert_eq!(
            storage.read("sp-translate-data-SkinNames", "fi").unwrap(),
            Some("standard=Perus".to_string())
        );
    }

    #[test]
    fn test_memory_storage_failure_hook() {
        let mut storage = MemoryOverrideStorage::new();
        storage.fail_writes_with = Some("page store rejected the edit".to_string());
        let err = storage.write("k", "fi", "x").unwrap_err();
        assert!(err.to_string().contains("page store rejected the edit"));
    }
}
