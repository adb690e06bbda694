use std::path::{
    Path,
    PathBuf,
};

use log::info;
use serde::Serialize;

use super::normalize::{
    normalize,
    NormalizeConfig,
    NormalizedTable,
    ReferenceReport,
};
use super::scan::{
    MalformedRow,
    RowScanner,
    ScanConfig,
    ScanOutcome,
};
use crate::data_structs::typedef::RowPos;
use crate::data_structs::RawRow;
use crate::io::{
    default_output_path,
    open_sheet,
    write_table_file,
    SheetLayout,
};
use crate::with_field_fn;

/// Everything a run needs besides the input path.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scan:             ScanConfig,
    pub layout:           SheetLayout,
    pub normalize:        NormalizeConfig,
    /// Overrides the separator implied by a delimited input's extension.
    pub delimiter:        Option<u8>,
    pub output_delimiter: u8,
    /// Defaults to [`default_output_path`] of the input.
    pub output:           Option<PathBuf>,
}

impl RunConfig {
    with_field_fn!(scan, ScanConfig);
    with_field_fn!(layout, SheetLayout);
    with_field_fn!(normalize, NormalizeConfig);
    with_field_fn!(delimiter, Option<u8>);
    with_field_fn!(output_delimiter, u8);
    with_field_fn!(output, Option<PathBuf>);

    pub fn output_path(
        &self,
        input: &Path,
    ) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(input))
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            scan:             ScanConfig::default(),
            layout:           SheetLayout::default(),
            normalize:        NormalizeConfig::default(),
            delimiter:        None,
            output_delimiter: b',',
            output:           None,
        }
    }
}

/// A scan and its normalized table.
#[derive(Debug, Clone)]
pub struct Calculation {
    pub scan:       ScanOutcome,
    pub normalized: NormalizedTable,
}

/// Scans `rows` and normalizes the result. Fails before anything is
/// written if the data region or the reference target cannot be found.
pub fn calculate<I>(
    rows: I,
    scan_config: &ScanConfig,
    normalize_config: &NormalizeConfig,
) -> anyhow::Result<Calculation>
where
    I: IntoIterator<Item = anyhow::Result<RawRow>>, {
    let scan = RowScanner::new(scan_config.clone()).try_scan(rows)?;
    let reference_target = scan.reference_target()?.to_owned();
    let normalized = normalize(&scan.table, &reference_target, normalize_config)?;
    Ok(Calculation { scan, normalized })
}

/// Machine-readable summary of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub input:                     PathBuf,
    pub output:                    PathBuf,
    pub reference_target:          String,
    pub data_start:                Option<RowPos>,
    pub data_end:                  Option<RowPos>,
    pub rows_scanned:              usize,
    pub replicates:                usize,
    pub targets:                   Vec<String>,
    pub samples:                   Vec<String>,
    pub output_rows:               usize,
    pub malformed_rows:            Vec<MalformedRow>,
    pub skipped_samples:           Vec<String>,
    pub targets_without_reference: Vec<String>,
    pub reference_samples:         Option<ReferenceReport>,
}

impl RunReport {
    pub fn new(
        input: &Path,
        output: &Path,
        calculation: &Calculation,
    ) -> Self {
        let Calculation { scan, normalized } = calculation;
        Self {
            input:                     input.to_path_buf(),
            output:                    output.to_path_buf(),
            reference_target:          normalized.reference_target.clone(),
            data_start:                scan.data_start,
            data_end:                  scan.data_end,
            rows_scanned:              scan.rows_scanned,
            replicates:                scan.table.n_replicates(),
            targets:                   scan.table.targets().map(String::from).collect(),
            samples:                   scan.table.samples().into_iter().map(String::from).collect(),
            output_rows:               normalized.len(),
            malformed_rows:            scan.malformed_rows.clone(),
            skipped_samples:           normalized.skipped_samples.clone(),
            targets_without_reference: normalized.targets_without_reference.clone(),
            reference_samples:         normalized.reference_report.clone(),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Writes a finished calculation to the output configured for `input`.
pub fn write_calculation(
    input: &Path,
    config: &RunConfig,
    calculation: &Calculation,
) -> anyhow::Result<RunReport> {
    let output = config.output_path(input);
    write_table_file(&output, &calculation.normalized, config.output_delimiter)?;
    info!("Created file {}", output.display());
    Ok(RunReport::new(input, &output, calculation))
}

/// Reads `input`, computes the table and writes it to the configured
/// output. No file is created when the calculation fails.
pub fn run(
    input: &Path,
    config: &RunConfig,
) -> anyhow::Result<RunReport> {
    let rows = open_sheet(input, &config.layout, config.delimiter)?;
    let calculation = calculate(rows, &config.scan, &config.normalize)?;
    write_calculation(input, config, &calculation)
}
