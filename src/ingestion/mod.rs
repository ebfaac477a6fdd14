//! Ingestion entrypoints and implementations.
//!
//! Most callers should use [`load`] for in-memory CSV bytes, or [`ingest_from_path`] (from
//! [`unified`]) which:
//!
//! - auto-detects format by file extension (or you can override via [`IngestionOptions`])
//! - infers column types, or applies an explicit [`crate::types::Schema`] when one is given
//! - optionally reports success/failure/alerts to a [`crate::observability::SessionObserver`]
//!
//! Format-specific functions are also available under:
//! - [`csv`]
//! - `excel` (Cargo feature `excel`)
//!
//! Type inference and missing-token handling live in [`infer`].

pub mod csv;
#[cfg(feature = "excel")]
pub mod excel;
pub mod infer;
pub mod unified;

pub use infer::{is_missing_token, MISSING_TOKENS};
pub use unified::{
    ingest_from_path, load, load_with_options, ExcelSheetSelection, IngestionFormat, IngestionOptions,
    IngestionRequest,
};
