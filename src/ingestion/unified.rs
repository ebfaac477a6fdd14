//! Unified ingestion entrypoints.
//!
//! - [`load`] turns CSV bytes into a [`DataSet`] with inferred column types.
//! - [`ingest_from_path`] reads a file, choosing the format from [`IngestionOptions::format`] or
//!   the file extension, and uses [`IngestionOptions::schema`] when one is given.
//!
//! If an observer is configured, success/failure/alerts are reported to it.

use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::{IngestionError, IngestionResult};
use crate::observability::{LoadContext, LoadStats, SessionObserver, Severity};
use crate::types::{DataSet, Schema};

use super::csv;

/// Supported ingestion formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IngestionFormat {
    /// Comma-separated values.
    Csv,
    /// Spreadsheet/workbook formats (feature-gated behind `excel`).
    Excel,
}

impl IngestionFormat {
    /// Parse an ingestion format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "xlsx" | "xls" | "xlsm" | "xlsb" | "ods" => Some(Self::Excel),
            _ => None,
        }
    }
}

/// How to choose sheet(s) when ingesting an Excel workbook.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExcelSheetSelection {
    /// Ingest the first sheet (default).
    #[default]
    First,
    /// Ingest a single named sheet.
    Sheet(String),
    /// Ingest all sheets and concatenate rows.
    AllSheets,
    /// Ingest only the listed sheets (in order) and concatenate rows.
    Sheets(Vec<String>),
}

/// Options controlling unified ingestion behavior.
///
/// Use [`Default`] for common cases: format from extension, inferred column types, no observer.
#[derive(Clone)]
pub struct IngestionOptions {
    /// If `None`, auto-detect format from file extension.
    pub format: Option<IngestionFormat>,
    /// Explicit column selection and types. If `None`, every column is loaded and typed by
    /// inference.
    pub schema: Option<Schema>,
    /// Excel-specific options.
    pub excel_sheet_selection: ExcelSheetSelection,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn SessionObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: Severity,
}

impl fmt::Debug for IngestionOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionOptions")
            .field("format", &self.format)
            .field("schema_fields", &self.schema.as_ref().map(|s| s.fields.len()))
            .field("excel_sheet_selection", &self.excel_sheet_selection)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for IngestionOptions {
    fn default() -> Self {
        Self {
            format: None,
            schema: None,
            excel_sheet_selection: ExcelSheetSelection::default(),
            observer: None,
            alert_at_or_above: Severity::Critical,
        }
    }
}

/// Load CSV bytes (with a header row) into a [`DataSet`], inferring every column's type.
///
/// ```rust
/// use rust_data_profiler::ingestion::load;
/// use rust_data_profiler::types::{DataType, Value};
///
/// let ds = load(b"name,age\nAlice,25\nBob,\n").unwrap();
/// assert_eq!(ds.row_count(), 2);
/// assert_eq!(ds.schema.fields[1].data_type, DataType::Int64);
/// assert_eq!(ds.rows[1][1], Value::Null);
/// ```
pub fn load(bytes: &[u8]) -> IngestionResult<DataSet> {
    load_with_options(bytes, &IngestionOptions::default())
}

/// [`load`] with an explicit schema and/or observer taken from `options`.
///
/// Only CSV is accepted from memory; `options.format` must be `None` or `Csv`.
pub fn load_with_options(bytes: &[u8], options: &IngestionOptions) -> IngestionResult<DataSet> {
    let ctx = LoadContext {
        path: None,
        format: IngestionFormat::Csv,
    };

    let result = match options.format {
        None | Some(IngestionFormat::Csv) => match &options.schema {
            Some(schema) => {
                let mut rdr = ::csv::ReaderBuilder::new()
                    .has_headers(true)
                    .from_reader(bytes);
                csv::ingest_csv_from_reader(&mut rdr, schema)
            }
            None => csv::load_csv_from_bytes(bytes),
        },
        Some(IngestionFormat::Excel) => Err(IngestionError::SchemaMismatch {
            message: "excel input can only be read from a path".to_string(),
        }),
    };

    report(options, &ctx, &result);
    result
}

/// Unified ingestion entry point for path-based sources.
///
/// - If `options.format` is `None`, format is inferred from the file extension.
/// - If `options.schema` is `None`, all columns are loaded with inferred types.
/// - Use `options.excel_sheet_selection` for Excel multi-tab behavior.
///
/// When an observer is configured, this function reports:
///
/// - `on_loaded` on success, with row/column counts
/// - `on_load_failed` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use rust_data_profiler::ingestion::{ingest_from_path, IngestionOptions};
///
/// # fn main() -> Result<(), rust_data_profiler::IngestionError> {
/// let ds = ingest_from_path("people.csv", &IngestionOptions::default())?;
/// println!("rows={} columns={}", ds.row_count(), ds.column_count());
/// # Ok(())
/// # }
/// ```
pub fn ingest_from_path(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<DataSet> {
    let path = path.as_ref();
    let fmt = match options.format {
        Some(f) => f,
        None => infer_format_from_path(path)?,
    };

    let ctx = LoadContext {
        path: Some(path.to_path_buf()),
        format: fmt,
    };

    let result = match fmt {
        IngestionFormat::Csv => match &options.schema {
            Some(schema) => csv::ingest_csv_from_path(path, schema),
            None => csv::load_csv_from_path(path),
        },
        IngestionFormat::Excel => {
            ingest_excel_dispatch(path, options.schema.as_ref(), &options.excel_sheet_selection)
        }
    };

    report(options, &ctx, &result);
    result
}

fn report(options: &IngestionOptions, ctx: &LoadContext, result: &IngestionResult<DataSet>) {
    match result {
        Ok(ds) => tracing::debug!(rows = ds.row_count(), columns = ds.column_count(), "loaded table"),
        Err(e) => tracing::warn!(error = %e, "load failed"),
    }

    let Some(obs) = options.observer.as_ref() else {
        return;
    };
    match result {
        Ok(ds) => obs.on_loaded(
            ctx,
            LoadStats {
                rows: ds.row_count(),
                columns: ds.column_count(),
            },
        ),
        Err(e) => {
            let sev = severity_for_error(e);
            obs.on_load_failed(ctx, sev, e);
            if sev >= options.alert_at_or_above {
                obs.on_alert(ctx, sev, e);
            }
        }
    }
}

fn severity_for_error(e: &IngestionError) -> Severity {
    match e {
        IngestionError::Io(_) => Severity::Critical,
        IngestionError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => Severity::Critical,
            _ => Severity::Error,
        },
        #[cfg(feature = "excel")]
        IngestionError::Excel(err) => {
            if error_chain_contains_io(err) {
                Severity::Critical
            } else {
                Severity::Error
            }
        }
        IngestionError::SchemaMismatch { .. } => Severity::Error,
        IngestionError::ParseError { .. } => Severity::Error,
    }
}

#[cfg_attr(not(feature = "excel"), allow(dead_code))]
fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}

fn infer_format_from_path(path: &Path) -> IngestionResult<IngestionFormat> {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| IngestionError::SchemaMismatch {
            message: format!(
                "cannot infer format: path has no extension ({})",
                path.display()
            ),
        })?;

    IngestionFormat::from_extension(ext).ok_or_else(|| IngestionError::SchemaMismatch {
        message: format!(
            "cannot infer format from extension '{ext}' for path ({})",
            path.display()
        ),
    })
}

fn ingest_excel_dispatch(
    path: &Path,
    schema: Option<&Schema>,
    sel: &ExcelSheetSelection,
) -> IngestionResult<DataSet> {
    // Avoid unused warnings when the feature is off.
    let _ = (path, schema, sel);

    #[cfg(feature = "excel")]
    {
        use super::excel;

        match sel {
            ExcelSheetSelection::First => excel::ingest_excel_from_path(path, None, schema),
            ExcelSheetSelection::Sheet(name) => {
                excel::ingest_excel_from_path(path, Some(name.as_str()), schema)
            }
            ExcelSheetSelection::AllSheets => excel::ingest_excel_workbook_from_path(path, None, schema),
            ExcelSheetSelection::Sheets(names) => {
                let refs: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
                excel::ingest_excel_workbook_from_path(path, Some(refs.as_slice()), schema)
            }
        }
    }

    #[cfg(not(feature = "excel"))]
    {
        Err(IngestionError::SchemaMismatch {
            message: "excel ingestion not enabled (enable cargo feature 'excel')".to_string(),
        })
    }
}

/// A path and its [`IngestionOptions`] held together, so a load can be built in one place and
/// run later with [`IngestionRequest::run`].
#[derive(Clone)]
pub struct IngestionRequest {
    /// Path to the input file.
    pub path: PathBuf,
    /// Options controlling ingestion.
    pub options: IngestionOptions,
}

impl fmt::Debug for IngestionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngestionRequest")
            .field("path", &self.path)
            .field("options", &self.options)
            .finish()
    }
}

impl IngestionRequest {
    /// Execute the request by calling [`ingest_from_path`].
    pub fn run(&self) -> IngestionResult<DataSet> {
        ingest_from_path(&self.path, &self.options)
    }
}
