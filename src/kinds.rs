//! The closed set of dataset kinds handled by langoverlay.
//!
//! Each kind carries the policy that drives merging, storage, and export:
//! list vs. scalar values, the export pad width, underscore substitution,
//! the raw variable to load, and the storage key its overrides live under.

use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::Error;

/// One of the four dataset variants.
///
/// This enum allows you to work with any supported dataset in a type-safe
/// way; the per-kind policy is exposed through accessor methods rather than
/// a class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Alternative names for special pages. List mode.
    SpecialPageAliases,
    /// Display names of user interface skins. Scalar mode.
    SkinNames,
    /// Magic word synonyms. List mode.
    MagicWords,
    /// Namespace names, keyed by namespace number. Scalar mode, exported
    /// through a fixed positional template.
    NamespaceNames,
}

/// Implements [`std::fmt::Display`] for [`EntityKind`].
///
/// Renders the canonical selector id for each kind:
///
/// # Example
/// ```rust
/// use langoverlay::EntityKind;
/// assert_eq!(EntityKind::SpecialPageAliases.to_string(), "special");
/// assert_eq!(EntityKind::MagicWords.to_string(), "words");
/// ```
impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::SpecialPageAliases => write!(f, "special"),
            EntityKind::SkinNames => write!(f, "skin"),
            EntityKind::MagicWords => write!(f, "words"),
            EntityKind::NamespaceNames => write!(f, "namespace"),
        }
    }
}

/// Implements [`std::str::FromStr`] for [`EntityKind`].
///
/// Accepts the following case-insensitive selector ids:
/// - `"special"`, `"alias"` → `EntityKind::SpecialPageAliases`
/// - `"skin"` → `EntityKind::SkinNames`
/// - `"words"`, `"magic"` → `EntityKind::MagicWords`
/// - `"namespace"` → `EntityKind::NamespaceNames`
///
/// Returns [`crate::error::Error::UnknownKind`] for unknown strings.
///
/// # Example
/// ```rust
/// use langoverlay::EntityKind;
/// use std::str::FromStr;
/// assert_eq!(EntityKind::from_str("alias").unwrap(), EntityKind::SpecialPageAliases);
/// assert!(EntityKind::from_str("gadgets").is_err());
/// ```
impl FromStr for EntityKind {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_ascii_lowercase();
        match s.as_str() {
            "special" | "alias" => Ok(EntityKind::SpecialPageAliases),
            "skin" => Ok(EntityKind::SkinNames),
            "words" | "magic" => Ok(EntityKind::MagicWords),
            "namespace" => Ok(EntityKind::NamespaceNames),
            other => Err(Error::UnknownKind(other.to_string())),
        }
    }
}

impl EntityKind {
    /// All kinds, in the order the module selector lists them.
    pub const ALL: [EntityKind; 4] = [
        EntityKind::SpecialPageAliases,
        EntityKind::SkinNames,
        EntityKind::NamespaceNames,
        EntityKind::MagicWords,
    ];

    /// Name of the raw variable to load from a locale's data source.
    pub fn variable_name(self) -> &'static str {
        match self {
            EntityKind::SpecialPageAliases => "specialPageAliases",
            EntityKind::SkinNames => "skinNames",
            EntityKind::MagicWords => "magicWords",
            EntityKind::NamespaceNames => "namespaceNames",
        }
    }

    /// Whether values are semantically ordered lists (`true`) or single
    /// scalars represented as one-element lists (`false`).
    pub fn list_mode(self) -> bool {
        matches!(
            self,
            EntityKind::SpecialPageAliases | EntityKind::MagicWords
        )
    }

    /// Target column width for right-padding keys during export.
    pub fn export_pad(self) -> usize {
        match self {
            EntityKind::SpecialPageAliases => 28,
            EntityKind::SkinNames => 14,
            EntityKind::MagicWords => 22,
            EntityKind::NamespaceNames => 10,
        }
    }

    /// Whether export substitutes underscores for spaces, and display the
    /// reverse. Storage favors human-readable spaces.
    pub fn strip_underscores(self) -> bool {
        matches!(
            self,
            EntityKind::SpecialPageAliases | EntityKind::NamespaceNames
        )
    }

    /// Identifier the kind's persisted override text is stored under.
    pub fn storage_key(self) -> &'static str {
        match self {
            EntityKind::SpecialPageAliases => "sp-translate-data-SpecialPageAliases",
            EntityKind::SkinNames => "sp-translate-data-SkinNames",
            EntityKind::MagicWords => "sp-translate-data-MagicWords",
            EntityKind::NamespaceNames => "sp-translate-data-Namespaces",
        }
    }

    /// Formats a value sequence for display and editing: elements joined
    /// with `", "`, underscores shown as spaces where the kind strips them.
    pub fn format_element(self, values: &[String]) -> String {
        if values.is_empty() {
            return String::new();
        }
        let joined = values.join(", ");
        if self.strip_underscores() {
            joined.replace('_', " ")
        } else {
            joined
        }
    }
}
