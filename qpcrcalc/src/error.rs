use std::path::PathBuf;

use thiserror::Error;

/// Structural failures of a reduction run.
///
/// Rows with a non-numeric CT are not errors: they are collected as
/// [`MalformedRow`](crate::tools::scan::MalformedRow)s and the scan goes on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QpcrError {
    #[error("Unsupported input format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("Sheet '{sheet}' not found. Available sheets: {}", .available.join(", "))]
    SheetNotFound {
        sheet:     String,
        available: Vec<String>,
    },
    #[error("Header marker '{0}' not found. No data region located")]
    NoDataRegion(String),
    #[error("No control '{0}' found in spreadsheet. No output created")]
    NoControlFound(String),
    #[error("Sample '{sample}' has no replicate under reference target '{reference_target}'")]
    MissingReferenceSample {
        sample:           String,
        reference_target: String,
    },
    #[error("Target '{0}' has no replicate in any of the reference samples")]
    MissingReferenceTarget(String),
    #[error("No replicate recorded for target '{target}', sample '{sample}'")]
    UnknownKey {
        target: String,
        sample: String,
    },
    #[error("Invalid column '{0}'. Expected a column letter (e.g. 'D') or a 1-based index")]
    InvalidColumn(String),
}

impl QpcrError {
    /// Whether the error is a reportable outcome of the input data rather
    /// than a failure of the program.
    pub fn is_data_outcome(&self) -> bool {
        !matches!(self, QpcrError::UnknownKey { .. })
    }
}
