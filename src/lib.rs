//! `rust-data-profiler` is a small library for exploratory profiling of tabular data: load a CSV
//! (or Excel workbook) into an in-memory [`types::DataSet`], then ask for schema, missing-value,
//! distribution, correlation and outlier summaries, clean the table, and export it.
//!
//! The primary entrypoints are [`ingestion::load`] (CSV bytes, types inferred) and
//! [`ingestion::ingest_from_path`] (format auto-detected from the file extension).
//!
//! ## What you can load
//!
//! - **CSV**: `.csv`, with a header row
//! - **Excel/workbooks** (requires the Cargo feature `excel`): `.xlsx`, `.xls`, `.xlsm`, `.xlsb`, `.ods`
//!
//! Without an explicit [`types::Schema`], each column gets the narrowest of
//! [`types::DataType::Int64`], [`types::DataType::Float64`], [`types::DataType::Bool`],
//! [`types::DataType::Timestamp`] that all of its values parse as, and
//! [`types::DataType::Utf8`] otherwise. Empty cells and tokens like `NA` / `NaN` / `null` map to
//! [`types::Value::Null`].
//!
//! ## Quick example: profile a table
//!
//! ```rust
//! use rust_data_profiler::ingestion::load;
//! use rust_data_profiler::profiling::{
//!     analyze_distribution, audit_missing, compute_correlations, profile_schema, ProfileOptions,
//! };
//!
//! let ds = load(b"age,income,city\n25,50000,Oslo\n32,64000,Bergen\n41,,Oslo\n29,58000,\n").unwrap();
//!
//! let schema = profile_schema(&ds);
//! assert_eq!((schema.row_count, schema.column_count), (4, 3));
//! assert_eq!(schema.total_missing_count, 2);
//!
//! let missing = audit_missing(&ds);
//! assert_eq!(missing.ranked().len(), 2);
//!
//! let age = analyze_distribution(&ds, "age").unwrap();
//! assert_eq!(age.summary.min, 25.0);
//!
//! let corr = compute_correlations(&ds, &ProfileOptions::default()).unwrap();
//! assert_eq!(corr.ranked_pairs.len(), 1);
//! ```
//!
//! ## Cleaning and export
//!
//! ```rust
//! use rust_data_profiler::export::ExportFormat;
//! use rust_data_profiler::processing::CleaningOp;
//! use rust_data_profiler::session::Session;
//!
//! let mut session = Session::load(b"id,name\n1,a\n1,a\n2,\n").unwrap();
//! session.clean(CleaningOp::RemoveDuplicates);
//! session.clean(CleaningOp::RemoveMissing);
//!
//! let csv = session.export(ExportFormat::Csv).unwrap();
//! assert_eq!(String::from_utf8(csv).unwrap(), "id,name\n1,a\n");
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: loading entrypoints, type inference and format-specific readers
//! - [`types`]: schema + in-memory dataset types
//! - [`profiling`]: schema, missing, distribution, correlation and outlier analysis
//! - [`processing`]: row-dropping cleaning transforms
//! - [`session`]: a table held across requests, replaced on cleaning
//! - [`export`]: CSV/XLSX serialization and JSON reports
//! - [`observability`]: observer hooks for load, clean and export events
//! - [`error`]: error types

pub mod error;
pub mod export;
pub mod ingestion;
pub mod observability;
pub mod processing;
pub mod profiling;
pub mod session;
pub mod types;

pub use error::{
    AnalysisError, AnalysisResult, ExportError, ExportResult, IngestionError, IngestionResult,
};
pub use export::{serialize, ExportFormat};
pub use ingestion::load;
pub use processing::{clean, CleaningOp};
pub use session::Session;
