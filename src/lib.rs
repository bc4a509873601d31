#![forbid(unsafe_code)]
//! Layered localization data toolkit for Rust.
//!
//! Reconciles a master (reference) dataset, a target-locale dataset, and a
//! user-submitted override dataset into one merged view, and serializes that
//! view back into a compact array-literal declaration. Overrides round-trip
//! through a simple line-oriented `key=value` text format.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use langoverlay::{EntityKind, Workbench};
//! use langoverlay::sources::{FileBundleSource, FileOverrideStorage};
//!
//! let mut bench = Workbench::new(
//!     FileBundleSource::new("messages"),
//!     FileOverrideStorage::new("overrides"),
//! );
//!
//! // Inspect the merged columns for a locale...
//! let view = bench.merged_view(EntityKind::MagicWords, "fi")?;
//! println!("{} keys", view.records.len());
//!
//! // ...and render them as array-literal source text.
//! let text = bench.export_text(EntityKind::MagicWords, "fi")?;
//! println!("{text}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Features
//!
//! - 🧩 Four dataset kinds with per-kind merge, storage, and export policy
//! - 🔀 Two merge policies: list replacement and empty-safe scalar override
//! - 📄 Round-trippable line-oriented override text format
//! - 📦 Array-literal exporter with padding, escaping, and the fixed
//!   namespace template
//! - 🦀 Stateless, synchronous engine behind pluggable source and storage
//!   traits

pub mod error;
pub mod export;
pub mod kinds;
pub mod merge;
pub mod overrides;
pub mod sources;
pub mod traits;
pub mod types;
pub mod workbench;

// Re-export most used types for easy consumption
pub use crate::{
    error::Error,
    export::export,
    kinds::EntityKind,
    merge::merge,
    overrides::{serialize_edits, OverrideSet},
    traits::{BundleSource, OverrideStorage, Parser},
    types::{Bundle, BundleEntry, MergedRecord, MergedView, MASTER_LOCALE},
    workbench::Workbench,
};
