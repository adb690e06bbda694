use std::path::Path;

use anyhow::anyhow;
use clap::Args;
use console::style;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

use crate::strings::utils as strings;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(short, long, default_value_t = false, help = strings::VERBOSE)]
    pub verbose:  bool,
    #[arg(long, default_value_t = false, help = strings::PROGRESS)]
    pub progress: bool,
}

impl UtilsArgs {
    pub fn setup(&self) -> anyhow::Result<()> {
        init_logger(self.verbose)
    }
}

/// `Info` level by default, `Debug` when verbose. `RUST_LOG` takes
/// precedence over both.
pub fn init_logger(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    }
    else {
        LevelFilter::Info
    };
    pretty_env_logger::formatted_builder()
        .filter_level(level)
        .parse_default_env()
        .try_init()?;
    Ok(())
}

/// Progress bar over sheet rows. A spinner is used when the number of rows
/// is not known up front.
pub fn init_progress(
    enabled: bool,
    total: Option<usize>,
) -> anyhow::Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }
    let progress_bar = match total {
        Some(total) => {
            let progress_bar = ProgressBar::new(total as u64);
            progress_bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>5.green}/{len:5} {msg}")?
                    .progress_chars("#>-"),
            );
            progress_bar
        },
        None => {
            let progress_bar = ProgressBar::new_spinner();
            progress_bar.set_style(
                ProgressStyle::default_spinner()
                    .template("{spinner:.green} [{elapsed_precise}] {pos:>5.green} rows {msg}")?,
            );
            progress_bar
        },
    };
    progress_bar.set_message("Scanning rows...");
    Ok(progress_bar)
}

pub fn validate_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        return Err(anyhow!(
            "Path {} does not exist.",
            style(path.display()).red()
        ));
    }
    if !path.is_file() {
        return Err(anyhow!(
            "Path {} is not a file.",
            style(path.display()).red()
        ));
    }
    Ok(())
}

/// Accepts a single ASCII character, or `tab` / `\t`.
pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            match value.as_bytes() {
                [byte] if byte.is_ascii() => Ok(*byte),
                _ => Err(format!("'{value}' is not a single ASCII character")),
            }
        },
    }
}
