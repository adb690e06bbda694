use std::path::PathBuf;

use clap::{
    ArgAction,
    Args,
};
use console::style;
use itertools::Itertools;
use log::info;
use qpcrcalc::io::layout::DEFAULT_SHEET;
use qpcrcalc::prelude::*;
use qpcrcalc::tools::scan::DEFAULT_CONTROL;

use crate::strings::calc as strings;
use crate::utils::{
    init_progress,
    parse_delimiter,
    validate_input,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct CalcArgs {
    #[arg(required = true, help = strings::INPUT)]
    pub input:        PathBuf,
    #[arg(default_value = DEFAULT_CONTROL, help = strings::CONTROL)]
    pub control:      String,
    #[arg(
        short = 'r',
        long = "reference",
        num_args = 1,
        value_delimiter = ',',
        action = ArgAction::Append,
        help = strings::REFERENCE
    )]
    pub reference:    Vec<String>,
    #[arg(short, long, help = strings::OUTPUT)]
    pub output:       Option<PathBuf>,
    #[arg(long, default_value = DEFAULT_SHEET, help = strings::SHEET)]
    pub sheet:        String,
    #[arg(long = "sample-col", default_value = "D", help = strings::SAMPLE_COL)]
    pub sample_col:   Column,
    #[arg(long = "target-col", default_value = "E", help = strings::TARGET_COL)]
    pub target_col:   Column,
    #[arg(long = "ct-col", default_value = "O", help = strings::CT_COL)]
    pub ct_col:       Column,
    #[arg(
        long = "first-row",
        default_value_t = 1,
        value_parser = clap::value_parser!(u32).range(1..),
        help = strings::FIRST_ROW
    )]
    pub first_row:    u32,
    #[arg(short, long, value_parser = parse_delimiter, help = strings::DELIMITER)]
    pub delimiter:    Option<u8>,
    #[arg(long = "skip-missing", default_value_t = false, help = strings::SKIP_MISSING)]
    pub skip_missing: bool,
    #[arg(long, help = strings::REPORT)]
    pub report:       Option<PathBuf>,
}

impl CalcArgs {
    pub fn run_config(&self) -> RunConfig {
        let layout = SheetLayout::default()
            .with_sheet(self.sheet.clone())
            .with_sample_col(self.sample_col)
            .with_target_col(self.target_col)
            .with_ct_col(self.ct_col)
            .with_first_row(self.first_row);

        let reference_samples = (!self.reference.is_empty())
            .then(|| ReferenceSamples::new(self.reference.iter()));
        let missing_policy = if self.skip_missing {
            MissingReferencePolicy::Skip
        }
        else {
            MissingReferencePolicy::Abort
        };

        RunConfig::default()
            .with_scan(ScanConfig::new(self.control.as_str()))
            .with_layout(layout)
            .with_normalize(
                NormalizeConfig::default()
                    .with_reference_samples(reference_samples)
                    .with_missing_policy(missing_policy),
            )
            .with_delimiter(self.delimiter)
            .with_output(self.output.clone())
    }

    /// Runs the calculation. Returns `Ok(None)` when the input holds no
    /// usable data; the reason is printed and no output is written.
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<Option<RunReport>> {
        validate_input(&self.input)?;
        let config = self.run_config();

        let rows = match open_sheet(&self.input, &config.layout, config.delimiter) {
            Ok(rows) => rows,
            Err(e) => return stop_on_outcome(e),
        };
        let progress_bar = init_progress(utils.progress, rows.total())?;
        let calculation = calculate(
            progress_bar.wrap_iter(rows),
            &config.scan,
            &config.normalize,
        );
        progress_bar.finish_and_clear();
        let calculation = match calculation {
            Ok(calculation) => calculation,
            Err(e) => return stop_on_outcome(e),
        };

        let report = write_calculation(&self.input, &config, &calculation)?;
        print_summary(&report);

        if let Some(path) = &self.report {
            std::fs::write(path, report.to_json()?)?;
            info!("Run report written to {}", path.display());
        }
        Ok(Some(report))
    }
}

/// Prints data-related failures and swallows them. Anything else is
/// passed on.
fn stop_on_outcome(err: anyhow::Error) -> anyhow::Result<Option<RunReport>> {
    match err.downcast_ref::<QpcrError>() {
        Some(outcome) if outcome.is_data_outcome() => {
            eprintln!("{}", style(outcome).red());
            Ok(None)
        },
        _ => Err(err),
    }
}

fn print_summary(report: &RunReport) {
    println!(
        "Reference target: {}, rows {}-{}",
        style(&report.reference_target).green(),
        report.data_start.unwrap_or_default(),
        report.data_end.unwrap_or_default()
    );
    if !report.malformed_rows.is_empty() {
        println!(
            "{} rows ignored: {}",
            style(report.malformed_rows.len()).yellow(),
            report
                .malformed_rows
                .iter()
                .map(|row| row.position)
                .join(", ")
        );
    }
    if let Some(reference) = &report.reference_samples {
        println!("Reference samples found: {}", reference.found.join(", "));
        if !reference.unusable.is_empty() {
            println!(
                "Reference samples skipped for lacking '{}': {}",
                report.reference_target,
                style(reference.unusable.join(", ")).yellow()
            );
        }
        if !reference.not_found.is_empty() {
            println!(
                "Reference samples not found: {}",
                style(reference.not_found.join(", ")).yellow()
            );
        }
    }
    println!("Created file {}", style(report.output.display()).green());
}
