//! In-memory dataset transformations.
//!
//! The processing layer operates on [`crate::types::DataSet`] values and always returns a new
//! dataset rather than editing one in place.
//!
//! Currently implemented:
//!
//! - [`remove_missing()`]: drop rows with any missing cell
//! - [`remove_duplicates()`]: drop repeated rows, keeping the first occurrence
//! - [`clean()`]: either of the above, with before/after row counts
//!
//! ## Example
//!
//! ```rust
//! use rust_data_profiler::processing::{clean, CleaningOp};
//! use rust_data_profiler::types::{DataSet, DataType, Field, Schema, Value};
//!
//! let schema = Schema::new(vec![Field::new("id", DataType::Int64)]);
//! let ds = DataSet::new(
//!     schema,
//!     vec![vec![Value::Int64(1)], vec![Value::Null], vec![Value::Int64(1)]],
//! );
//!
//! let no_missing = clean(&ds, CleaningOp::RemoveMissing);
//! assert_eq!((no_missing.rows_before, no_missing.rows_after), (3, 2));
//!
//! let unique = clean(&no_missing.dataset, CleaningOp::RemoveDuplicates);
//! assert_eq!(unique.rows_after, 1);
//! ```

pub mod cleaning;

pub use cleaning::{clean, remove_duplicates, remove_missing, CleaningOp, CleaningOutcome};
