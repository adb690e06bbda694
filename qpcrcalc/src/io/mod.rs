//! Sheet readers and the output writer.
//!
//! Readers turn one sheet of an input file into a stream of [`RawRow`]s
//! following a [`SheetLayout`]. The input format is picked from the file
//! extension:
//!
//! | Extension                          | Reader               |
//! |------------------------------------|----------------------|
//! | `xlsx`, `xlsm`, `xls`, `xlsb`, `ods` | [`WorkbookReader`] (feature `workbook`) |
//! | `csv`                              | [`DelimitedReader`], `,` |
//! | `tsv`, `txt`                       | [`DelimitedReader`], tab |

mod delimited;
pub mod layout;
#[cfg(feature = "workbook")]
mod workbook;
mod write;


use std::fs::File;
use std::io::BufReader;
use std::path::Path;

pub use delimited::DelimitedReader;
pub use layout::{
    Column,
    SheetLayout,
};
#[cfg(feature = "workbook")]
pub use workbook::{
    cell_to_text,
    WorkbookReader,
};
pub use write::{
    default_output_path,
    write_table_file,
    CalcWriter,
    OUTPUT_PREFIX,
};

use crate::data_structs::RawRow;
use crate::error::QpcrError;

pub const WORKBOOK_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xls", "xlsb", "ods"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Workbook,
    Delimited(u8),
}

impl InputFormat {
    /// Format of `path`, judged by its extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, QpcrError> {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "csv" => Ok(Self::Delimited(b',')),
            "tsv" | "txt" => Ok(Self::Delimited(b'\t')),
            ext if cfg!(feature = "workbook") && WORKBOOK_EXTENSIONS.contains(&ext) => {
                Ok(Self::Workbook)
            },
            _ => Err(QpcrError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

/// Rows of one opened sheet.
pub struct SheetRows {
    rows:  Box<dyn Iterator<Item = anyhow::Result<RawRow>>>,
    total: Option<usize>,
}

impl SheetRows {
    pub fn new<I>(
        rows: I,
        total: Option<usize>,
    ) -> Self
    where
        I: Iterator<Item = anyhow::Result<RawRow>> + 'static, {
        Self {
            rows: Box::new(rows),
            total,
        }
    }

    /// Number of rows in the sheet, when the reader knows it up front.
    pub fn total(&self) -> Option<usize> {
        self.total
    }
}

impl Iterator for SheetRows {
    type Item = anyhow::Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        self.rows.next()
    }
}

/// Opens the sheet of `path` described by `layout`. `delimiter` overrides
/// the separator of delimited text inputs.
pub fn open_sheet(
    path: &Path,
    layout: &SheetLayout,
    delimiter: Option<u8>,
) -> anyhow::Result<SheetRows> {
    match InputFormat::from_path(path)? {
        InputFormat::Workbook => open_workbook_rows(path, layout),
        InputFormat::Delimited(default) => {
            let handle = BufReader::new(File::open(path)?);
            let reader = DelimitedReader::new(
                handle,
                delimiter.unwrap_or(default),
                layout.clone(),
            );
            Ok(SheetRows::new(reader, None))
        },
    }
}

#[cfg(feature = "workbook")]
fn open_workbook_rows(
    path: &Path,
    layout: &SheetLayout,
) -> anyhow::Result<SheetRows> {
    let reader = WorkbookReader::open(path, layout.clone())?;
    let total = reader.n_rows();
    Ok(SheetRows::new(reader, Some(total)))
}

#[cfg(not(feature = "workbook"))]
fn open_workbook_rows(
    path: &Path,
    _layout: &SheetLayout,
) -> anyhow::Result<SheetRows> {
    Err(QpcrError::UnsupportedFormat(path.to_path_buf()).into())
}
