use thiserror::Error;

/// Convenience result type for ingestion operations.
pub type IngestionResult<T> = Result<T, IngestionError>;

/// Convenience result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Convenience result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Error type returned by ingestion functions.
///
/// A single error enum shared across CSV and (optional) Excel ingestion.
#[derive(Debug, Error)]
pub enum IngestionError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "excel")]
    /// Excel ingestion error (feature-gated behind `excel`).
    #[error("excel error: {0}")]
    Excel(#[from] calamine::Error),

    /// CSV ingestion error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// The input does not form a valid table (missing columns, ragged rows, duplicate names, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A value could not be parsed into the required [`crate::types::DataType`].
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },
}

/// Recoverable conditions reported by the analysis functions.
///
/// None of these are fatal; callers decide whether to surface them as warnings or informational
/// messages.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The column does not exist or is not of a kind the operation accepts.
    #[error("invalid column '{column}': {reason}")]
    InvalidColumn { column: String, reason: String },

    /// The column has no non-missing values.
    #[error("column '{column}' has no non-missing values")]
    EmptyColumn { column: String },

    /// The statistic is undefined for the available sample size.
    #[error("column '{column}' needs at least {required} non-missing values, found {actual}")]
    InsufficientSamples {
        column: String,
        required: usize,
        actual: usize,
    },

    /// The column holds an infinite value, for which order and moment statistics are undefined.
    #[error("column '{column}' has a non-finite value at row {row}")]
    NonFiniteValue { column: String, row: usize },

    /// A ratio was requested over an empty denominator.
    #[error("division by zero: {context}")]
    DivisionByZero { context: String },
}

/// Error type returned when serializing a dataset or report.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV writer error.
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX writer error.
    #[error("xlsx error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// JSON encoding error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The output format could not be determined or is not supported.
    #[error("unsupported export format: {message}")]
    UnsupportedFormat { message: String },

    /// The dataset does not fit in the target format.
    #[error("dataset too large for {format}: {message}")]
    TooLarge { format: String, message: String },
}
