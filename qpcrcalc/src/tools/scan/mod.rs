//! Location of the data region inside a results sheet and ingestion of its
//! rows into an [`AggregateTable`].
//!
//! The scan is a three-state machine ([`ScanState`]):
//!
//! - `Seeking`: rows are skipped until the sample column holds the header
//!   marker (`"Sample Name"` by default).
//! - `Active`: every row with a target name is validated and recorded. The
//!   first target matching the control name (case-insensitively) becomes
//!   the reference target. A row with an empty target ends the region.
//! - `Terminated`: no further rows are consumed.
//!
//! Rows with a non-numeric CT are reported as [`MalformedRow`]s and skipped.

use std::fmt::Display;

use log::{
    debug,
    info,
    trace,
    warn,
};
use serde::Serialize;

use crate::data_structs::typedef::{
    CtType,
    RowPos,
};
use crate::data_structs::{
    AggregateTable,
    RawRow,
};
use crate::error::QpcrError;
use crate::utils::fold_case;
use crate::with_field_fn;

#[cfg(test)]
mod tests;

pub const DEFAULT_CONTROL: &str = "GAPDH";
pub const DEFAULT_HEADER_MARKER: &str = "Sample Name";

#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Name of the reference target, matched case-insensitively.
    pub control:       String,
    /// Sample-column value of the header row preceding the data.
    pub header_marker: String,
}

impl ScanConfig {
    with_field_fn!(control, String);
    with_field_fn!(header_marker, String);

    pub fn new<S: Into<String>>(control: S) -> Self {
        Self::default().with_control(control.into())
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            control:       DEFAULT_CONTROL.to_string(),
            header_marker: DEFAULT_HEADER_MARKER.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanState {
    Seeking,
    Active {
        data_start: RowPos,
    },
    Terminated {
        data_start: RowPos,
        data_end:   RowPos,
    },
}

impl ScanState {
    pub fn data_start(&self) -> Option<RowPos> {
        match self {
            ScanState::Seeking => None,
            ScanState::Active { data_start } => Some(*data_start),
            ScanState::Terminated { data_start, .. } => Some(*data_start),
        }
    }

    pub fn is_terminated(&self) -> bool {
        matches!(self, ScanState::Terminated { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MalformedReason {
    /// CT cell is empty or does not hold a finite number.
    NonNumericCt,
    /// Target is present but the sample cell is empty.
    MissingSample,
}

/// A data row that was skipped during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MalformedRow {
    pub position: RowPos,
    pub reason:   MalformedReason,
    /// CT cell as found in the sheet.
    pub raw_ct:   Option<String>,
}

impl Display for MalformedRow {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self.reason {
            MalformedReason::NonNumericCt => {
                write!(
                    f,
                    "Row {} does not have a numeric CT value ({}). Row ignored.",
                    self.position,
                    self.raw_ct.as_deref().unwrap_or("empty")
                )
            },
            MalformedReason::MissingSample => {
                write!(f, "Row {} does not have a sample name. Row ignored.", self.position)
            },
        }
    }
}

/// Parses CT cell text. Only finite numbers are accepted.
pub fn parse_ct(raw: Option<&str>) -> Option<CtType> {
    raw.map(str::trim)
        .and_then(|text| text.parse::<CtType>().ok())
        .filter(|ct| ct.is_finite())
}

/// Result of a finished scan.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub table:            AggregateTable,
    /// Literal target name of the first row matching the control.
    pub reference_target: Option<String>,
    pub control:          String,
    pub header_marker:    String,
    pub data_start:       Option<RowPos>,
    /// Last data row. Set when the region was terminated by an empty
    /// target, or when the input ended while the region was still open.
    pub data_end:         Option<RowPos>,
    /// Whether the region ended on an empty target row.
    pub terminated:       bool,
    pub malformed_rows:   Vec<MalformedRow>,
    pub rows_scanned:     usize,
}

impl ScanOutcome {
    /// The resolved reference target.
    ///
    /// Fails with [`QpcrError::NoDataRegion`] if the header marker was
    /// never seen, and with [`QpcrError::NoControlFound`] if no target
    /// matched the control name.
    pub fn reference_target(&self) -> Result<&str, QpcrError> {
        if self.data_start.is_none() {
            return Err(QpcrError::NoDataRegion(self.header_marker.clone()));
        }
        self.reference_target
            .as_deref()
            .ok_or_else(|| QpcrError::NoControlFound(self.control.clone()))
    }
}

/// Incremental scanner over the rows of one sheet.
#[derive(Debug, Clone)]
pub struct RowScanner {
    config:           ScanConfig,
    control_folded:   String,
    state:            ScanState,
    table:            AggregateTable,
    reference_target: Option<String>,
    malformed_rows:   Vec<MalformedRow>,
    last_position:    Option<RowPos>,
    rows_scanned:     usize,
}

impl RowScanner {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            control_folded: fold_case(&config.control),
            config,
            state: ScanState::Seeking,
            table: AggregateTable::new(),
            reference_target: None,
            malformed_rows: Vec::new(),
            last_position: None,
            rows_scanned: 0,
        }
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn table(&self) -> &AggregateTable {
        &self.table
    }

    pub fn reference_target(&self) -> Option<&str> {
        self.reference_target.as_deref()
    }

    pub fn malformed_rows(&self) -> &[MalformedRow] {
        &self.malformed_rows
    }

    /// Feeds one row and returns the state after it. Rows pushed after
    /// termination are ignored.
    pub fn push(
        &mut self,
        row: RawRow,
    ) -> ScanState {
        if !self.state.is_terminated() {
            self.rows_scanned += 1;
        }
        match self.state {
            ScanState::Seeking => self.seek(row),
            ScanState::Active { data_start } => self.ingest(row, data_start),
            ScanState::Terminated { .. } => {
                trace!("Row {} ignored after termination", row.position)
            },
        }
        self.state
    }

    fn seek(
        &mut self,
        row: RawRow,
    ) {
        if row.is_header(&self.config.header_marker) {
            let data_start = row.position + 1;
            info!("The first row of data begins on {}", data_start);
            self.state = ScanState::Active { data_start };
        }
        self.last_position = Some(row.position);
    }

    fn ingest(
        &mut self,
        row: RawRow,
        data_start: RowPos,
    ) {
        let Some(target) = row.target_name()
        else {
            let data_end = self.last_position.unwrap_or(row.position);
            info!("The last row of data ends on {}", data_end);
            self.state = ScanState::Terminated {
                data_start,
                data_end,
            };
            return;
        };
        self.last_position = Some(row.position);

        if self.reference_target.is_none() && fold_case(target) == self.control_folded {
            debug!(
                "Control '{}' resolved to target '{}' on row {}",
                self.config.control, target, row.position
            );
            self.reference_target = Some(target.to_owned());
        }

        let Some(ct) = parse_ct(row.ct.as_deref())
        else {
            self.reject(&row, MalformedReason::NonNumericCt);
            return;
        };
        let Some(sample) = row.sample_name()
        else {
            self.reject(&row, MalformedReason::MissingSample);
            return;
        };

        trace!("Row {}: {} / {} = {}", row.position, target, sample, ct);
        self.table.record(target, sample, ct);
    }

    fn reject(
        &mut self,
        row: &RawRow,
        reason: MalformedReason,
    ) {
        let malformed = MalformedRow {
            position: row.position,
            reason,
            raw_ct: row.ct.clone(),
        };
        warn!("{}", malformed);
        self.malformed_rows.push(malformed);
    }

    /// Closes the scan. An open region is ended at the last consumed row.
    pub fn finish(self) -> ScanOutcome {
        let (data_start, data_end, terminated) = match self.state {
            ScanState::Seeking => {
                warn!(
                    "Header marker '{}' not found in {} rows",
                    self.config.header_marker, self.rows_scanned
                );
                (None, None, false)
            },
            ScanState::Active { data_start } => {
                debug!("Input ended before an empty target row");
                if let Some(data_end) = self.last_position {
                    info!("The last row of data ends on {}", data_end);
                }
                (Some(data_start), self.last_position, false)
            },
            ScanState::Terminated {
                data_start,
                data_end,
            } => (Some(data_start), Some(data_end), true),
        };

        ScanOutcome {
            table: self.table,
            reference_target: self.reference_target,
            control: self.config.control,
            header_marker: self.config.header_marker,
            data_start,
            data_end,
            terminated,
            malformed_rows: self.malformed_rows,
            rows_scanned: self.rows_scanned,
        }
    }

    /// Scans `rows` until the region terminates or the input ends.
    pub fn scan<I>(
        self,
        rows: I,
    ) -> ScanOutcome
    where
        I: IntoIterator<Item = RawRow>, {
        let result: Result<ScanOutcome, std::convert::Infallible> =
            self.try_scan(rows.into_iter().map(Ok));
        match result {
            Ok(outcome) => outcome,
            Err(never) => match never {},
        }
    }

    /// Like [`scan`](Self::scan), for readers with fallible rows. The first
    /// read error aborts the scan. No row is pulled after termination.
    pub fn try_scan<I, E>(
        mut self,
        rows: I,
    ) -> Result<ScanOutcome, E>
    where
        I: IntoIterator<Item = Result<RawRow, E>>, {
        for row in rows {
            if self.push(row?).is_terminated() {
                break;
            }
        }
        Ok(self.finish())
    }
}
