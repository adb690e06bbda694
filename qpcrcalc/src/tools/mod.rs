//! The calculation itself.
//!
//! Key submodules:
//!
//! - [`scan`]: Locates the data region of a results sheet, resolves the
//!   reference target and collapses technical replicates into an
//!   [`AggregateTable`](crate::data_structs::AggregateTable).
//! - [`normalize`]: Delta-CT against the reference target and, when
//!   reference samples are given, fold change relative to them.
//! - [`pipeline`]: Wires a sheet reader, the scanner, the normalizer and
//!   the output writer into a single run.
pub mod normalize;
pub mod pipeline;
pub mod scan;
