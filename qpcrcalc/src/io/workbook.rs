use std::path::Path;

use calamine::{
    open_workbook_auto,
    DataType,
    Range,
    Reader,
};
use log::{
    debug,
    warn,
};

use super::layout::SheetLayout;
use crate::data_structs::typedef::RowPos;
use crate::data_structs::RawRow;
use crate::error::QpcrError;

/// Text of a workbook cell as it would be displayed, `None` for empty
/// cells.
pub fn cell_to_text(cell: &DataType) -> Option<String> {
    match cell {
        DataType::Empty => None,
        DataType::String(s) => Some(s.clone()),
        DataType::Float(f) | DataType::DateTime(f) | DataType::Duration(f) => {
            Some(f.to_string())
        },
        DataType::Int(i) => Some(i.to_string()),
        DataType::Bool(b) => Some(b.to_string()),
        other => Some(format!("{other:?}")),
    }
}

/// Sheet reader over one worksheet of an xlsx/xlsm/xls/xlsb/ods workbook.
pub struct WorkbookReader {
    range:    Range<DataType>,
    layout:   SheetLayout,
    next_row: usize,
}

impl WorkbookReader {
    /// Opens the layout's sheet. A file that cannot be opened as a workbook
    /// is reported as [`QpcrError::UnsupportedFormat`].
    pub fn open<P: AsRef<Path>>(
        path: P,
        layout: SheetLayout,
    ) -> anyhow::Result<Self> {
        let mut workbook = open_workbook_auto(path.as_ref()).map_err(|e| {
            warn!("{} is not a readable workbook: {}", path.as_ref().display(), e);
            QpcrError::UnsupportedFormat(path.as_ref().to_path_buf())
        })?;
        let range = match workbook.worksheet_range(&layout.sheet) {
            Some(range) => range?,
            None => {
                return Err(QpcrError::SheetNotFound {
                    sheet:     layout.sheet.clone(),
                    available: workbook.sheet_names().to_vec(),
                }
                .into())
            },
        };
        debug!(
            "Opened sheet '{}' of {} ({} rows)",
            layout.sheet,
            path.as_ref().display(),
            range.height()
        );
        Ok(Self::from_range(range, layout))
    }

    pub fn from_range(
        range: Range<DataType>,
        layout: SheetLayout,
    ) -> Self {
        Self {
            range,
            layout,
            next_row: 0,
        }
    }

    /// Rows in the used area of the sheet.
    pub fn n_rows(&self) -> usize {
        self.range.height()
    }
}

impl Iterator for WorkbookReader {
    type Item = anyhow::Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        let (first_row, first_col) = self.range.start()?;
        while self.next_row < self.range.height() {
            let relative = self.next_row;
            self.next_row += 1;

            let position = first_row + relative as RowPos + 1;
            if position < self.layout.first_row {
                continue;
            }
            let row = self.layout.row(position, |col| {
                let col = (col.index() as u32).checked_sub(first_col)?;
                self.range
                    .get((relative, col as usize))
                    .and_then(cell_to_text)
            });
            return Some(Ok(row));
        }
        None
    }
}
