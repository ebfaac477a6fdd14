//! Serialization of a [`DataSet`] (and of a profiling report) to external formats.
//!
//! - [`serialize`]: a dataset to CSV or XLSX bytes
//! - [`export_to_path`]: the same, written to a file whose extension picks the format
//! - [`report_to_json`]: a [`crate::profiling::ProfileReport`] as JSON
//!
//! Missing cells are written as empty cells in every format.
//!
//! ```rust
//! use rust_data_profiler::export::{serialize, ExportFormat};
//! use rust_data_profiler::ingestion::load;
//!
//! let ds = load(b"a,b\n1,x\n,y\n").unwrap();
//! let bytes = serialize(&ds, ExportFormat::Csv).unwrap();
//! assert_eq!(String::from_utf8(bytes).unwrap(), "a,b\n1,x\n,y\n");
//! ```

pub mod csv;
pub mod json;
pub mod xlsx;

use std::fs;
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::types::DataSet;

pub use json::report_to_json;

/// Supported dataset export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values with a header row.
    Csv,
    /// Single-sheet Excel workbook with a header row.
    Xlsx,
}

impl ExportFormat {
    /// Parse an export format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" => Some(Self::Xlsx),
            _ => None,
        }
    }

    /// Conventional file extension for the format.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

/// Serialize `dataset` to bytes in `format`.
pub fn serialize(dataset: &DataSet, format: ExportFormat) -> ExportResult<Vec<u8>> {
    let bytes = match format {
        ExportFormat::Csv => csv::to_csv_bytes(dataset)?,
        ExportFormat::Xlsx => xlsx::to_xlsx_bytes(dataset)?,
    };
    tracing::debug!(?format, rows = dataset.row_count(), bytes = bytes.len(), "serialized dataset");
    Ok(bytes)
}

/// Serialize `dataset` and write it to `path`, choosing the format from the file extension.
///
/// Returns the number of bytes written.
pub fn export_to_path(dataset: &DataSet, path: impl AsRef<Path>) -> ExportResult<usize> {
    let path = path.as_ref();
    let format = path
        .extension()
        .and_then(|s| s.to_str())
        .and_then(ExportFormat::from_extension)
        .ok_or_else(|| ExportError::UnsupportedFormat {
            message: format!("cannot infer export format for path ({})", path.display()),
        })?;

    let bytes = serialize(dataset, format)?;
    fs::write(path, &bytes)?;
    Ok(bytes.len())
}

#[cfg(test)]
mod tests {
    use super::{export_to_path, ExportFormat};
    use crate::error::ExportError;
    use crate::types::{DataSet, DataType, Field, Schema};

    #[test]
    fn format_from_extension() {
        assert_eq!(ExportFormat::from_extension("CSV"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::from_extension("xlsx"), Some(ExportFormat::Xlsx));
        assert_eq!(ExportFormat::from_extension("xls"), None);
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let ds = DataSet::new(Schema::new(vec![Field::new("a", DataType::Int64)]), vec![]);
        let err = export_to_path(&ds, std::env::temp_dir().join("out.parquet")).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedFormat { .. }));
    }
}
