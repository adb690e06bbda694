#![allow(unused)]
use std::path::{
    Path,
    PathBuf,
};

pub const RESULTS_CSV: &str = "results.csv";

pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

/// Copies a fixture into `dir`, so that default outputs land next to it.
pub fn copy_fixture(
    name: &str,
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let target = dir.join(name);
    std::fs::copy(fixture_path(name), &target)?;
    Ok(target)
}

/// Writes the csv fixture as a tab separated file named `name`.
pub fn fixture_as_tabs(
    name: &str,
    dir: &Path,
) -> anyhow::Result<PathBuf> {
    let text = std::fs::read_to_string(fixture_path(RESULTS_CSV))?;
    let target = dir.join(name);
    std::fs::write(&target, text.replace(',', "\t"))?;
    Ok(target)
}

/// Output table as rows of cells, header included.
pub fn read_output(
    path: &Path,
    delimiter: u8,
) -> anyhow::Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .from_path(path)?;
    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(record?.iter().map(String::from).collect());
    }
    Ok(rows)
}

pub fn cell_f64(
    rows: &[Vec<String>],
    row: usize,
    col: usize,
) -> f64 {
    rows[row][col].parse().unwrap()
}
