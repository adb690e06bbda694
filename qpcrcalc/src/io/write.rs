use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use csv::{
    Writer,
    WriterBuilder,
};
use log::debug;
use tempfile::NamedTempFile;

use crate::data_structs::output_header;
use crate::tools::normalize::NormalizedTable;

pub const OUTPUT_PREFIX: &str = "CALCULATED_";

/// `CALCULATED_<stem>.csv`, next to the input file.
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{OUTPUT_PREFIX}{stem}.csv"))
}

/// Writes a [`NormalizedTable`] as a delimited table with a header row.
pub struct CalcWriter<W: Write> {
    writer: Writer<W>,
}

impl<W: Write> CalcWriter<W> {
    pub fn new(
        sink: W,
        delimiter: u8,
    ) -> Self {
        let writer = WriterBuilder::new()
            .delimiter(delimiter)
            .from_writer(sink);
        Self { writer }
    }

    pub fn write_table(
        &mut self,
        table: &NormalizedTable,
    ) -> anyhow::Result<()> {
        let with_fold_change = table.with_fold_change();
        self.writer
            .write_record(output_header(with_fold_change))?;
        for row in table.rows.iter() {
            self.writer
                .write_record(row.to_record(with_fold_change))?;
        }
        Ok(())
    }

    /// Flushes and returns the underlying sink.
    pub fn finish(self) -> anyhow::Result<W> {
        Ok(self
            .writer
            .into_inner()
            .map_err(|e| e.into_error())?)
    }
}

/// Writes `table` to `path`. The file only appears once it is complete; a
/// failed write leaves no partial output behind.
pub fn write_table_file(
    path: &Path,
    table: &NormalizedTable,
    delimiter: u8,
) -> anyhow::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let tmp = NamedTempFile::new_in(dir)?;
    debug!("Writing output through {}", tmp.path().display());

    let mut writer = CalcWriter::new(tmp, delimiter);
    writer.write_table(table)?;
    let tmp = writer.finish()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
