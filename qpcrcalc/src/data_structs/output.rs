use serde::Serialize;

use super::typedef::CtType;

/// Columns written for every run.
pub const BASE_COLUMNS: [&str; 4] =
    ["Target Name", "Sample Name", "Average CT", "Delta CT"];

/// Extra columns written when reference samples were supplied.
pub const FOLD_CHANGE_COLUMNS: [&str; 3] = [
    "Avg Dct CTRL",
    "Normalize (Delta CT-Avg Dct CTRL)",
    "Fold change (2^-Normalize)",
];

/// Header row of the output table.
pub fn output_header(with_fold_change: bool) -> Vec<&'static str> {
    let mut header = BASE_COLUMNS.to_vec();
    if with_fold_change {
        header.extend_from_slice(&FOLD_CHANGE_COLUMNS);
    }
    header
}

/// Relative quantification of one (target, sample) pair against the mean
/// delta CT of the reference samples.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoldChange {
    /// Mean delta CT of the target over the reference samples.
    pub ref_mean_delta: CtType,
    /// `delta_ct - ref_mean_delta`
    pub normalized:     CtType,
    /// `2 ^ -normalized`
    pub fold_change:    CtType,
}

impl FoldChange {
    pub fn new(
        delta_ct: CtType,
        ref_mean_delta: CtType,
    ) -> Self {
        let normalized = delta_ct - ref_mean_delta;
        Self {
            ref_mean_delta,
            normalized,
            fold_change: CtType::powf(2.0, -normalized),
        }
    }
}

/// One line of the output table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutputRow {
    pub target:      String,
    pub sample:      String,
    pub mean_ct:     CtType,
    pub delta_ct:    CtType,
    pub fold_change: Option<FoldChange>,
}

impl OutputRow {
    pub fn new(
        target: &str,
        sample: &str,
        mean_ct: CtType,
        delta_ct: CtType,
    ) -> Self {
        Self {
            target: target.to_owned(),
            sample: sample.to_owned(),
            mean_ct,
            delta_ct,
            fold_change: None,
        }
    }

    /// Cells of the row, matching [`output_header`]. Fold-change cells are
    /// empty when the value could not be computed.
    pub fn to_record(
        &self,
        with_fold_change: bool,
    ) -> Vec<String> {
        let mut record = vec![
            self.target.clone(),
            self.sample.clone(),
            self.mean_ct.to_string(),
            self.delta_ct.to_string(),
        ];
        if with_fold_change {
            match &self.fold_change {
                Some(fc) => {
                    record.extend([
                        fc.ref_mean_delta.to_string(),
                        fc.normalized.to_string(),
                        fc.fold_change.to_string(),
                    ])
                },
                None => record.extend(std::iter::repeat_n(String::new(), 3)),
            }
        }
        record
    }
}
