use super::typedef::RowPos;

/// One row of the input sheet, as handed over by a sheet reader.
///
/// Values are kept verbatim: readers never validate, and a missing cell is
/// `None`. Validation is the job of the
/// [`RowScanner`](crate::tools::scan::RowScanner).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    pub position: RowPos,
    pub sample:   Option<String>,
    pub target:   Option<String>,
    pub ct:       Option<String>,
}

impl RawRow {
    pub fn new<S: Into<String>>(
        position: RowPos,
        sample: Option<S>,
        target: Option<S>,
        ct: Option<S>,
    ) -> Self {
        Self {
            position,
            sample: sample.map(Into::into),
            target: target.map(Into::into),
            ct: ct.map(Into::into),
        }
    }

    /// Row without any values.
    pub fn empty(position: RowPos) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Target name, or `None` if the cell is absent or blank.
    pub fn target_name(&self) -> Option<&str> {
        self.target
            .as_deref()
            .filter(|target| !target.trim().is_empty())
    }

    /// Sample name, or `None` if the cell is absent or blank.
    pub fn sample_name(&self) -> Option<&str> {
        self.sample
            .as_deref()
            .filter(|sample| !sample.trim().is_empty())
    }

    pub fn is_header(
        &self,
        marker: &str,
    ) -> bool {
        self.sample.as_deref() == Some(marker)
    }
}
