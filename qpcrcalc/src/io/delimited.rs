use std::io::{
    BufRead,
    BufReader,
    Read,
    Split,
};

use csv::{
    ByteRecord,
    ReaderBuilder,
};

use super::layout::SheetLayout;
use crate::data_structs::typedef::RowPos;
use crate::data_structs::RawRow;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Sheet reader over comma or tab separated text exports.
///
/// Every physical line is one row and row positions are 1-based line
/// numbers. A blank line yields an empty row, the same as an empty row of a
/// workbook. Lines may have any number of fields; quoting follows the usual
/// csv rules within a line.
pub struct DelimitedReader<R: Read> {
    lines:   Split<BufReader<R>>,
    parser:  ReaderBuilder,
    layout:  SheetLayout,
    line_no: RowPos,
}

impl<R: Read> DelimitedReader<R> {
    pub fn new(
        handle: R,
        delimiter: u8,
        layout: SheetLayout,
    ) -> Self {
        let mut parser = ReaderBuilder::new();
        parser
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter);
        Self {
            lines: BufReader::new(handle).split(b'\n'),
            parser,
            layout,
            line_no: 0,
        }
    }

    fn parse_line(
        &self,
        line: &[u8],
    ) -> csv::Result<ByteRecord> {
        let mut line = line.strip_suffix(b"\r").unwrap_or(line);
        if self.line_no == 1 {
            line = line.strip_prefix(UTF8_BOM).unwrap_or(line);
        }
        let mut reader = self.parser.from_reader(line);
        match reader.byte_records().next() {
            Some(record) => record,
            None => Ok(ByteRecord::new()),
        }
    }
}

impl<R: Read> Iterator for DelimitedReader<R> {
    type Item = anyhow::Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e.into())),
            };
            self.line_no += 1;
            if self.line_no < self.layout.first_row {
                continue;
            }

            let record = match self.parse_line(&line) {
                Ok(record) => record,
                Err(e) => return Some(Err(e.into())),
            };
            let row = self.layout.row(self.line_no, |col| {
                record
                    .get(col.index())
                    .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            });
            return Some(Ok(row));
        }
    }
}
