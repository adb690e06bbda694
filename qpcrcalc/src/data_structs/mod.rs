//! Core data structures of a reduction run.
//!
//! - [`RawRow`]: one unvalidated row as produced by a sheet reader.
//! - [`ReplicateAggregate`], [`Accumulator`] and [`AggregateTable`]: running
//!   CT sums and replicate counts, keyed by target and sample.
//! - [`OutputRow`] and [`FoldChange`]: the reduced values written to the
//!   output table, together with its column layout ([`output_header`]).
//! - [`typedef`]: type aliases for CT values, row positions and counts.

mod aggregate;
mod output;
mod raw_row;
pub mod typedef;


pub use aggregate::{
    Accumulator,
    AggregateTable,
    ReplicateAggregate,
};
pub use output::{
    output_header,
    FoldChange,
    OutputRow,
    BASE_COLUMNS,
    FOLD_CHANGE_COLUMNS,
};
pub use raw_row::RawRow;
