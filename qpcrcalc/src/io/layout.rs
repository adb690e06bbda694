use std::fmt::Display;
use std::str::FromStr;

use crate::data_structs::typedef::RowPos;
use crate::data_structs::RawRow;
use crate::error::QpcrError;
use crate::with_field_fn;

/// Zero-based column of a sheet. Parsed from spreadsheet letters (`"D"`,
/// `"AA"`) or from a 1-based number (`"4"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Column(usize);

impl Column {
    pub const fn from_index(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn letters(&self) -> String {
        let mut n = self.0 + 1;
        let mut letters = Vec::new();
        while n > 0 {
            n -= 1;
            letters.push((b'A' + (n % 26) as u8) as char);
            n /= 26;
        }
        letters.into_iter().rev().collect()
    }
}

impl FromStr for Column {
    type Err = QpcrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let text = s.trim();
        let invalid = || QpcrError::InvalidColumn(s.to_string());

        if let Ok(number) = text.parse::<usize>() {
            return number.checked_sub(1).map(Column).ok_or_else(invalid);
        }
        if text.is_empty() || !text.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid());
        }
        text.to_ascii_uppercase()
            .bytes()
            .try_fold(0usize, |acc, b| {
                acc.checked_mul(26)?
                    .checked_add((b - b'A' + 1) as usize)
            })
            .map(|n| Column(n - 1))
            .ok_or_else(invalid)
    }
}

impl Display for Column {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}", self.letters())
    }
}

pub const DEFAULT_SHEET: &str = "Results";

/// Where the three fields of interest live in the input sheet.
///
/// The defaults match the instrument results export: sample name in column
/// D, target name in column E and CT in column O of the `Results` sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetLayout {
    /// Sheet to read from workbooks. Ignored for delimited text.
    pub sheet:      String,
    pub sample_col: Column,
    pub target_col: Column,
    pub ct_col:     Column,
    /// First 1-based row handed to the scanner.
    pub first_row:  RowPos,
}

impl SheetLayout {
    with_field_fn!(sheet, String);
    with_field_fn!(sample_col, Column);
    with_field_fn!(target_col, Column);
    with_field_fn!(ct_col, Column);
    with_field_fn!(first_row, RowPos);

    /// Builds a [`RawRow`] from a cell accessor.
    pub fn row<F>(
        &self,
        position: RowPos,
        cell: F,
    ) -> RawRow
    where
        F: Fn(Column) -> Option<String>, {
        RawRow {
            position,
            sample: cell(self.sample_col),
            target: cell(self.target_col),
            ct: cell(self.ct_col),
        }
    }
}

impl Default for SheetLayout {
    fn default() -> Self {
        Self {
            sheet:      DEFAULT_SHEET.to_string(),
            sample_col: Column::from_index(3),
            target_col: Column::from_index(4),
            ct_col:     Column::from_index(14),
            first_row:  1,
        }
    }
}
