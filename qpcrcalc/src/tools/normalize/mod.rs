//! Delta-CT and fold-change computation over a finished
//! [`AggregateTable`].
//!
//! For every (target, sample) pair:
//!
//! ```text
//! delta_ct       = mean_ct(target, sample) - mean_ct(reference_target, sample)
//! ref_mean_delta = mean of delta_ct(target, s) over reference samples s
//! normalized     = delta_ct - ref_mean_delta
//! fold_change    = 2 ^ -normalized
//! ```
//!
//! The fold-change columns are only computed when reference samples were
//! supplied. What happens to keys lacking reference data is decided by the
//! [`MissingReferencePolicy`].

use std::collections::BTreeSet;

use itertools::Itertools;
use log::{
    debug,
    info,
    warn,
};
use serde::Serialize;

use crate::data_structs::typedef::CtType;
use crate::data_structs::{
    Accumulator,
    AggregateTable,
    FoldChange,
    OutputRow,
};
use crate::error::QpcrError;
use crate::utils::{
    fold_case,
    sorted_unique,
};
use crate::with_field_fn;


/// Handling of samples without a replicate under the reference target and
/// of targets without any reference-sample delta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum MissingReferencePolicy {
    /// Abort the run with an error naming the first offending key.
    #[default]
    Abort,
    /// Omit the affected sample rows, leave the fold change of the affected
    /// targets empty.
    Skip,
}

/// Case-insensitive set of reference sample names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSamples {
    requested: BTreeSet<String>,
}

impl ReferenceSamples {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>, {
        Self {
            requested: names.into_iter().map(fold_case).collect(),
        }
    }

    pub fn contains(
        &self,
        sample: &str,
    ) -> bool {
        self.requested.contains(&fold_case(sample))
    }

    /// Lower-cased names, sorted.
    pub fn requested(&self) -> Vec<String> {
        self.requested.iter().cloned().collect_vec()
    }

    pub fn is_empty(&self) -> bool {
        self.requested.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for ReferenceSamples {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self::new(iter)
    }
}

/// Which requested reference samples were present in the data. All lists
/// are lower-cased and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReferenceReport {
    pub requested: Vec<String>,
    /// Requested samples whose deltas entered the fold change.
    pub found:     Vec<String>,
    /// Requested samples present in the data but skipped for lacking a
    /// reference target replicate.
    pub unusable:  Vec<String>,
    /// Requested samples absent from the data.
    pub not_found: Vec<String>,
}

impl ReferenceReport {
    fn new(
        requested: &ReferenceSamples,
        found: BTreeSet<String>,
        unusable: BTreeSet<String>,
    ) -> Self {
        let not_found = requested
            .requested
            .iter()
            .filter(|sample| !found.contains(*sample) && !unusable.contains(*sample))
            .cloned()
            .collect_vec();
        Self {
            requested: requested.requested(),
            found: found.into_iter().collect_vec(),
            unusable: unusable.into_iter().collect_vec(),
            not_found,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NormalizeConfig {
    /// Samples the fold change is computed against. `None` or an empty set
    /// disables the fold-change columns.
    pub reference_samples: Option<ReferenceSamples>,
    pub missing_policy:    MissingReferencePolicy,
}

impl NormalizeConfig {
    with_field_fn!(reference_samples, Option<ReferenceSamples>);
    with_field_fn!(missing_policy, MissingReferencePolicy);

    pub fn fold_change_enabled(&self) -> bool {
        self.reference_samples
            .as_ref()
            .is_some_and(|samples| !samples.is_empty())
    }
}

/// Output of a normalization pass.
#[derive(Debug, Clone, Serialize)]
pub struct NormalizedTable {
    pub reference_target:          String,
    pub rows:                      Vec<OutputRow>,
    /// Present when fold change was computed.
    pub reference_report:          Option<ReferenceReport>,
    /// Samples left out because they have no reference target replicate.
    pub skipped_samples:           Vec<String>,
    /// Targets whose fold change could not be computed.
    pub targets_without_reference: Vec<String>,
}

impl NormalizedTable {
    pub fn with_fold_change(&self) -> bool {
        self.reference_report.is_some()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

pub struct Normalizer<'a> {
    table:            &'a AggregateTable,
    reference_target: &'a str,
    config:           &'a NormalizeConfig,
}

impl<'a> Normalizer<'a> {
    pub fn new(
        table: &'a AggregateTable,
        reference_target: &'a str,
        config: &'a NormalizeConfig,
    ) -> Self {
        Self {
            table,
            reference_target,
            config,
        }
    }

    /// Delta CT of one pair against the reference target of the same
    /// sample.
    pub fn delta_ct(
        &self,
        target: &str,
        sample: &str,
    ) -> Result<CtType, QpcrError> {
        let mean_ct = self.table.mean(target, sample)?;
        Ok(mean_ct - self.reference_mean(sample)?)
    }

    fn reference_mean(
        &self,
        sample: &str,
    ) -> Result<CtType, QpcrError> {
        self.table
            .get(self.reference_target, sample)
            .map(|aggregate| aggregate.mean())
            .ok_or_else(|| {
                QpcrError::MissingReferenceSample {
                    sample:           sample.to_owned(),
                    reference_target: self.reference_target.to_owned(),
                }
            })
    }

    pub fn run(&self) -> Result<NormalizedTable, QpcrError> {
        let (mut rows, skipped_samples) = self.delta_rows()?;

        let (reference_report, targets_without_reference) =
            match self.config.reference_samples.as_ref() {
                Some(samples) if !samples.is_empty() => {
                    let (report, missing) =
                        self.fold_change(&mut rows, samples, &skipped_samples)?;
                    (Some(report), missing)
                },
                _ => (None, Vec::new()),
            };

        debug!(
            "Normalized {} pairs against '{}'",
            rows.len(),
            self.reference_target
        );
        Ok(NormalizedTable {
            reference_target: self.reference_target.to_owned(),
            rows,
            reference_report,
            skipped_samples,
            targets_without_reference,
        })
    }

    fn delta_rows(&self) -> Result<(Vec<OutputRow>, Vec<String>), QpcrError> {
        let mut rows = Vec::with_capacity(self.table.n_pairs());
        let mut skipped = Vec::new();

        for (target, sample, aggregate) in self.table.iter() {
            let reference_mean = match self.reference_mean(sample) {
                Ok(mean) => mean,
                Err(err) if self.config.missing_policy == MissingReferencePolicy::Skip => {
                    if !skipped.iter().any(|s| s == sample) {
                        warn!("{}. Sample skipped.", err);
                        skipped.push(sample.to_owned());
                    }
                    continue;
                },
                Err(err) => return Err(err),
            };
            let mean_ct = aggregate.mean();
            rows.push(OutputRow::new(
                target,
                sample,
                mean_ct,
                mean_ct - reference_mean,
            ));
        }
        Ok((rows, skipped))
    }

    fn fold_change(
        &self,
        rows: &mut [OutputRow],
        samples: &ReferenceSamples,
        skipped_samples: &[String],
    ) -> Result<(ReferenceReport, Vec<String>), QpcrError> {
        let mut reference_deltas: Accumulator<String> = Accumulator::new();
        let mut found = BTreeSet::new();

        for row in rows.iter().filter(|row| samples.contains(&row.sample)) {
            reference_deltas.record(row.target.clone(), row.delta_ct);
            found.insert(fold_case(&row.sample));
        }

        let unusable = skipped_samples
            .iter()
            .filter(|sample| samples.contains(sample))
            .map(fold_case)
            .collect();

        let report = ReferenceReport::new(samples, found, unusable);
        info!("Reference samples requested: {:?}", report.requested);
        info!("Reference samples found: {:?}", report.found);
        if !report.unusable.is_empty() {
            warn!(
                "Reference samples without a '{}' replicate: {:?}",
                self.reference_target, report.unusable
            );
        }
        if !report.not_found.is_empty() {
            warn!("Reference samples not found: {:?}", report.not_found);
        }

        let mut missing = Vec::new();
        for row in rows.iter_mut() {
            match reference_deltas.mean(row.target.as_str()) {
                Some(ref_mean_delta) => {
                    row.fold_change = Some(FoldChange::new(row.delta_ct, ref_mean_delta))
                },
                None if self.config.missing_policy == MissingReferencePolicy::Skip => {
                    missing.push(row.target.clone())
                },
                None => return Err(QpcrError::MissingReferenceTarget(row.target.clone())),
            }
        }

        let missing = sorted_unique(missing);
        for target in missing.iter() {
            warn!(
                "{}. Fold change left empty.",
                QpcrError::MissingReferenceTarget(target.clone())
            );
        }
        Ok((report, missing))
    }
}

/// Normalizes `table` against `reference_target`.
pub fn normalize(
    table: &AggregateTable,
    reference_target: &str,
    config: &NormalizeConfig,
) -> Result<NormalizedTable, QpcrError> {
    Normalizer::new(table, reference_target, config).run()
}
