//! JSON rendering of a [`ProfileReport`].
//!
//! Undefined statistics (`None`, and `NaN` entries of the correlation matrix) are written as
//! `null`.

use crate::error::ExportResult;
use crate::profiling::ProfileReport;

/// Pretty-printed JSON for `report`.
pub fn report_to_json(report: &ProfileReport) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
