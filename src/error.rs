//! All error types for the langoverlay crate.
//!
//! These are returned from all fallible operations (loading, merging,
//! exporting, saving). Absence of data is never an error: a missing locale
//! file, a missing fallback, or a missing override all resolve to empty
//! defaults at the call site.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("unknown module `{0}`")]
    UnknownKind(String),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("too many elements for {kind}. Key: {key}")]
    TooManyElements { kind: String, key: String },

    #[error("saving overrides failed: {0}")]
    SaveFailed(String),

    #[error("invalid data: {0}")]
    DataMismatch(String),
}

impl Error {
    /// Creates the integrity error raised when a scalar-mode key carries
    /// more than one value on export.
    pub fn too_many_elements(kind: impl Into<String>, key: impl Into<String>) -> Self {
        Error::TooManyElements {
            kind: kind.into(),
            key: key.into(),
        }
    }

    /// Creates a persistence failure error.
    pub fn save_failed(message: impl Into<String>) -> Self {
        Error::SaveFailed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_unknown_kind_error() {
        let error = Error::UnknownKind("gadgets".to_string());
        assert_eq!(error.to_string(), "unknown module `gadgets`");
    }

    #[test]
    fn test_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_too_many_elements_names_kind_and_key() {
        let error = Error::too_many_elements("skin", "monobook");
        assert_eq!(error.to_string(), "too many elements for skin. Key: monobook");
    }

    #[test]
    fn test_save_failed_error() {
        let error = Error::save_failed("page store rejected the edit");
        assert_eq!(
            error.to_string(),
            "saving overrides failed: page store rejected the edit"
        );
    }

    #[test]
    fn test_data_mismatch_error() {
        let error = Error::DataMismatch("bundle values must be strings".to_string());
        assert!(error.to_string().starts_with("invalid data"));
    }

    #[test]
    fn test_error_debug() {
        let error = Error::UnknownKind("test".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("UnknownKind"));
        assert!(debug.contains("test"));
    }
}
