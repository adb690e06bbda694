use std::hash::Hash;

use indexmap::{
    Equivalent,
    IndexMap,
};
use itertools::Itertools;
use serde::Serialize;

use super::typedef::{
    CountType,
    CtType,
};
use crate::error::QpcrError;

/// Running sum and replicate count of the CT values recorded under one key.
///
/// An aggregate only exists once its first replicate has been recorded, so
/// `count >= 1` always holds and [`mean`](Self::mean) is always defined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReplicateAggregate {
    ct_sum: CtType,
    count:  CountType,
}

impl ReplicateAggregate {
    pub fn new(ct: CtType) -> Self {
        Self {
            ct_sum: ct,
            count:  1,
        }
    }

    pub fn add(
        &mut self,
        ct: CtType,
    ) {
        self.ct_sum += ct;
        self.count += 1;
    }

    /// Arithmetic mean of the recorded values.
    pub fn mean(&self) -> CtType {
        self.ct_sum / self.count as CtType
    }

    pub fn ct_sum(&self) -> CtType {
        self.ct_sum
    }

    pub fn count(&self) -> CountType {
        self.count
    }
}

/// Replicate aggregates keyed by a single key, in first-seen order.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct Accumulator<K: Hash + Eq> {
    inner: IndexMap<K, ReplicateAggregate>,
}

impl<K: Hash + Eq> Default for Accumulator<K> {
    fn default() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }
}

impl<K: Hash + Eq> Accumulator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the aggregate for `key` on the first call, adds to it
    /// afterwards.
    pub fn record(
        &mut self,
        key: K,
        ct: CtType,
    ) {
        self.inner
            .entry(key)
            .and_modify(|aggregate| aggregate.add(ct))
            .or_insert_with(|| ReplicateAggregate::new(ct));
    }

    pub fn get<Q>(
        &self,
        key: &Q,
    ) -> Option<&ReplicateAggregate>
    where
        Q: ?Sized + Hash + Equivalent<K>, {
        self.inner.get(key)
    }

    /// Mean of the values recorded under `key`, `None` if nothing was
    /// recorded.
    pub fn mean<Q>(
        &self,
        key: &Q,
    ) -> Option<CtType>
    where
        Q: ?Sized + Hash + Equivalent<K>, {
        self.get(key).map(ReplicateAggregate::mean)
    }

    pub fn contains_key<Q>(
        &self,
        key: &Q,
    ) -> bool
    where
        Q: ?Sized + Hash + Equivalent<K>, {
        self.inner.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.inner.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &ReplicateAggregate)> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Two-level aggregate: target name -> sample name -> replicates.
///
/// Targets and samples iterate in the order they were first recorded.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct AggregateTable {
    targets: IndexMap<String, Accumulator<String>>,
}

impl AggregateTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(
        &mut self,
        target: &str,
        sample: &str,
        ct: CtType,
    ) {
        self.targets
            .entry(target.to_owned())
            .or_default()
            .record(sample.to_owned(), ct);
    }

    pub fn get(
        &self,
        target: &str,
        sample: &str,
    ) -> Option<&ReplicateAggregate> {
        self.targets
            .get(target)
            .and_then(|samples| samples.get(sample))
    }

    /// Mean CT of a (target, sample) pair.
    ///
    /// Fails with [`QpcrError::UnknownKey`] if the pair was never recorded.
    pub fn mean(
        &self,
        target: &str,
        sample: &str,
    ) -> Result<CtType, QpcrError> {
        self.get(target, sample)
            .map(ReplicateAggregate::mean)
            .ok_or_else(|| {
                QpcrError::UnknownKey {
                    target: target.to_owned(),
                    sample: sample.to_owned(),
                }
            })
    }

    pub fn samples_of(
        &self,
        target: &str,
    ) -> Option<&Accumulator<String>> {
        self.targets.get(target)
    }

    /// Every (target, sample, aggregate) triple, targets first-seen order,
    /// samples first-seen order within each target.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str, &ReplicateAggregate)> {
        self.targets.iter().flat_map(|(target, samples)| {
            samples
                .iter()
                .map(move |(sample, aggregate)| {
                    (target.as_str(), sample.as_str(), aggregate)
                })
        })
    }

    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.keys().map(String::as_str)
    }

    /// Distinct sample names over all targets, in first-seen order.
    pub fn samples(&self) -> Vec<&str> {
        self.targets
            .values()
            .flat_map(|samples| samples.keys().map(String::as_str))
            .unique()
            .collect_vec()
    }

    /// Number of (target, sample) pairs.
    pub fn n_pairs(&self) -> usize {
        self.targets.values().map(Accumulator::len).sum()
    }

    /// Number of replicates recorded over all pairs.
    pub fn n_replicates(&self) -> usize {
        self.iter()
            .map(|(_, _, aggregate)| aggregate.count() as usize)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }
}
