//! Observer hooks for session-level events: loading, cleaning and exporting a table.
//!
//! Observers are optional; the library reports to one only when the caller configures it (see
//! [`crate::ingestion::IngestionOptions::observer`] and [`crate::session::Session::with_observer`]).

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{ExportError, IngestionError};
use crate::export::ExportFormat;
use crate::ingestion::IngestionFormat;
use crate::processing::CleaningOp;

/// Severity classification used for observer callbacks and alerting thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Informational event.
    Info,
    /// Warning-level event (non-fatal).
    Warning,
    /// Error-level event (operation failed).
    Error,
    /// Critical error (typically I/O or other infrastructure failures).
    Critical,
}

/// Where a table was loaded from.
#[derive(Debug, Clone)]
pub struct LoadContext {
    /// Input path, or `None` for in-memory bytes.
    pub path: Option<PathBuf>,
    pub format: IngestionFormat,
}

impl fmt::Display for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(p) => write!(f, "format={:?} path={}", self.format, p.display()),
            None => write!(f, "format={:?} path=<memory>", self.format),
        }
    }
}

/// Shape of a successfully loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    pub rows: usize,
    pub columns: usize,
}

/// Observer interface for session events.
///
/// Every method has a no-op default so implementors only override what they record.
pub trait SessionObserver: Send + Sync {
    /// Called when a table was loaded.
    fn on_loaded(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    /// Called when loading failed.
    fn on_load_failed(&self, _ctx: &LoadContext, _severity: Severity, _error: &IngestionError) {}

    /// Called when a load failure meets an alert threshold.
    ///
    /// Default behavior forwards to [`Self::on_load_failed`].
    fn on_alert(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        self.on_load_failed(ctx, severity, error)
    }

    /// Called after the session table was replaced by a cleaning operation.
    fn on_cleaned(&self, _op: CleaningOp, _rows_before: usize, _rows_after: usize) {}

    /// Called after the session table was serialized.
    fn on_exported(&self, _format: ExportFormat, _bytes: usize) {}

    /// Called when serialization failed.
    fn on_export_failed(&self, _format: ExportFormat, _error: &ExportError) {}
}

/// An observer that fans out callbacks to a list of observers.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn SessionObserver>>,
}

impl CompositeObserver {
    /// Create a new composite observer from a list of observers.
    pub fn new(observers: Vec<Arc<dyn SessionObserver>>) -> Self {
        Self { observers }
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers_len", &self.observers.len())
            .finish()
    }
}

impl SessionObserver for CompositeObserver {
    fn on_loaded(&self, ctx: &LoadContext, stats: LoadStats) {
        for o in &self.observers {
            o.on_loaded(ctx, stats);
        }
    }

    fn on_load_failed(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        for o in &self.observers {
            o.on_load_failed(ctx, severity, error);
        }
    }

    fn on_alert(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        for o in &self.observers {
            o.on_alert(ctx, severity, error);
        }
    }

    fn on_cleaned(&self, op: CleaningOp, rows_before: usize, rows_after: usize) {
        for o in &self.observers {
            o.on_cleaned(op, rows_before, rows_after);
        }
    }

    fn on_exported(&self, format: ExportFormat, bytes: usize) {
        for o in &self.observers {
            o.on_exported(format, bytes);
        }
    }

    fn on_export_failed(&self, format: ExportFormat, error: &ExportError) {
        for o in &self.observers {
            o.on_export_failed(format, error);
        }
    }
}

/// Logs session events to stderr.
#[derive(Debug, Default)]
pub struct StdErrObserver;

impl SessionObserver for StdErrObserver {
    fn on_loaded(&self, ctx: &LoadContext, stats: LoadStats) {
        eprintln!("[load][ok] {ctx} rows={} columns={}", stats.rows, stats.columns);
    }

    fn on_load_failed(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        eprintln!("[load][{severity:?}] {ctx} err={error}");
    }

    fn on_alert(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        eprintln!("[ALERT][load][{severity:?}] {ctx} err={error}");
    }

    fn on_cleaned(&self, op: CleaningOp, rows_before: usize, rows_after: usize) {
        eprintln!("[clean] op={op:?} rows={rows_before}->{rows_after}");
    }

    fn on_exported(&self, format: ExportFormat, bytes: usize) {
        eprintln!("[export][ok] format={format:?} bytes={bytes}");
    }

    fn on_export_failed(&self, format: ExportFormat, error: &ExportError) {
        eprintln!("[export][Error] format={format:?} err={error}");
    }
}

/// Appends session events to a local log file.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    /// Create a file observer that appends events to `path`.
    ///
    /// Writes are best-effort; failures to open/write the log file are ignored.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append_line(&self, line: &str) {
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = writeln!(f, "{} {line}", unix_ts());
        }
    }
}

impl SessionObserver for FileObserver {
    fn on_loaded(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append_line(&format!(
            "load ok {ctx} rows={} columns={}",
            stats.rows, stats.columns
        ));
    }

    fn on_load_failed(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        self.append_line(&format!("load fail severity={severity:?} {ctx} err={error}"));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: Severity, error: &IngestionError) {
        self.append_line(&format!("ALERT severity={severity:?} {ctx} err={error}"));
    }

    fn on_cleaned(&self, op: CleaningOp, rows_before: usize, rows_after: usize) {
        self.append_line(&format!("clean op={op:?} rows={rows_before}->{rows_after}"));
    }

    fn on_exported(&self, format: ExportFormat, bytes: usize) {
        self.append_line(&format!("export ok format={format:?} bytes={bytes}"));
    }

    fn on_export_failed(&self, format: ExportFormat, error: &ExportError) {
        self.append_line(&format!("export fail format={format:?} err={error}"));
    }
}

fn unix_ts() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::{FileObserver, SessionObserver};
    use crate::processing::CleaningOp;

    #[test]
    fn file_observer_appends_lines() {
        let path = std::env::temp_dir().join(format!(
            "rust-data-profiler-observer-{}.log",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        let obs = FileObserver::new(&path);
        obs.on_cleaned(CleaningOp::RemoveMissing, 10, 7);
        obs.on_cleaned(CleaningOp::RemoveDuplicates, 7, 7);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("clean op=RemoveMissing rows=10->7"));
        let _ = std::fs::remove_file(&path);
    }
}
