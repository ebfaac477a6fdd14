//! A working session over one loaded table.
//!
//! [`Session`] owns the current [`DataSet`]. Read operations run the profilers against it on every
//! call; [`Session::clean`] swaps in a cleaned copy, so later reads see the cleaned table.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{AnalysisResult, ExportResult, IngestionResult};
use crate::export::{self, ExportFormat};
use crate::ingestion::{self, IngestionOptions};
use crate::observability::SessionObserver;
use crate::processing::{self, CleaningOp, CleaningOutcome};
use crate::profiling::{
    self, ColumnDistribution, CorrelationAnalysis, MissingReport, NumericDescription, OutlierReport,
    ProfileOptions, ProfileReport, SchemaSummary,
};
use crate::types::DataSet;

/// Row counts reported by [`Session::clean`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleaningSummary {
    pub op: CleaningOp,
    pub rows_before: usize,
    pub rows_after: usize,
}

impl CleaningSummary {
    pub fn rows_removed(&self) -> usize {
        self.rows_before - self.rows_after
    }
}

/// Holds the current table for its lifetime.
///
/// ```rust
/// use rust_data_profiler::processing::CleaningOp;
/// use rust_data_profiler::session::Session;
///
/// let mut session = Session::load(b"id,score\n1,10\n2,\n1,10\n").unwrap();
/// assert_eq!(session.missing().total_missing(), 1);
///
/// let summary = session.clean(CleaningOp::RemoveMissing);
/// assert_eq!((summary.rows_before, summary.rows_after), (3, 2));
/// assert_eq!(session.missing().total_missing(), 0);
///
/// session.clean(CleaningOp::RemoveDuplicates);
/// assert_eq!(session.dataset().row_count(), 1);
/// ```
pub struct Session {
    dataset: DataSet,
    options: ProfileOptions,
    observer: Option<Arc<dyn SessionObserver>>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("rows", &self.dataset.row_count())
            .field("columns", &self.dataset.column_count())
            .field("options", &self.options)
            .field("observer_set", &self.observer.is_some())
            .finish()
    }
}

impl Session {
    /// Start a session over `dataset` with default [`ProfileOptions`].
    pub fn new(dataset: DataSet) -> Self {
        Self::with_options(dataset, ProfileOptions::default())
    }

    pub fn with_options(dataset: DataSet, options: ProfileOptions) -> Self {
        Self {
            dataset,
            options,
            observer: None,
        }
    }

    /// Attach an observer for cleaning and export events.
    pub fn with_observer(mut self, observer: Arc<dyn SessionObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Load CSV bytes with inferred types and start a session.
    pub fn load(bytes: &[u8]) -> IngestionResult<Self> {
        ingestion::load(bytes).map(Self::new)
    }

    /// Load a file and start a session. The observer in `options`, if any, is kept for the
    /// session.
    pub fn open(path: impl AsRef<Path>, options: &IngestionOptions) -> IngestionResult<Self> {
        let dataset = ingestion::ingest_from_path(path, options)?;
        let mut session = Self::new(dataset);
        session.observer = options.observer.clone();
        Ok(session)
    }

    /// The current table.
    pub fn dataset(&self) -> &DataSet {
        &self.dataset
    }

    pub fn options(&self) -> &ProfileOptions {
        &self.options
    }

    /// End the session, returning the current table.
    pub fn into_dataset(self) -> DataSet {
        self.dataset
    }

    /// The first `n` rows of the current table.
    pub fn preview(&self, n: usize) -> DataSet {
        self.dataset.head(n)
    }

    pub fn schema(&self) -> SchemaSummary {
        profiling::profile_schema(&self.dataset)
    }

    pub fn missing(&self) -> MissingReport {
        profiling::audit_missing(&self.dataset)
    }

    pub fn distribution(&self, column: &str) -> AnalysisResult<ColumnDistribution> {
        profiling::analyze_distribution(&self.dataset, column)
    }

    pub fn describe(&self) -> Vec<NumericDescription> {
        profiling::describe(&self.dataset)
    }

    /// `None` when the table has fewer than two numeric columns.
    pub fn correlations(&self) -> Option<CorrelationAnalysis> {
        profiling::compute_correlations(&self.dataset, &self.options)
    }

    pub fn outliers(&self, column: &str) -> AnalysisResult<OutlierReport> {
        profiling::detect_outliers(&self.dataset, column, &self.options)
    }

    pub fn report(&self) -> ProfileReport {
        ProfileReport::build(&self.dataset, &self.options)
    }

    /// Apply `op` and replace the current table with the result.
    pub fn clean(&mut self, op: CleaningOp) -> CleaningSummary {
        let CleaningOutcome {
            dataset,
            rows_before,
            rows_after,
        } = processing::clean(&self.dataset, op);
        self.dataset = dataset;

        if let Some(obs) = &self.observer {
            obs.on_cleaned(op, rows_before, rows_after);
        }
        CleaningSummary {
            op,
            rows_before,
            rows_after,
        }
    }

    /// Serialize the current table.
    pub fn export(&self, format: ExportFormat) -> ExportResult<Vec<u8>> {
        let result = export::serialize(&self.dataset, format);
        if let Some(obs) = &self.observer {
            match &result {
                Ok(bytes) => obs.on_exported(format, bytes.len()),
                Err(e) => obs.on_export_failed(format, e),
            }
        }
        result
    }
}
