//! # qpcrcalc
//!
//! `qpcrcalc` turns the results export of a real-time PCR instrument into a
//! relative-quantification table. It locates the data region of the results
//! sheet, averages technical replicates per (target, sample) pair, computes
//! delta-CT against a reference (housekeeping) target and, optionally, fold
//! change relative to a set of reference samples.
//!
//! If you do not want to use qpcrcalc as crate, check out the `qpcrcalc`
//! command-line tool from the `qpcrcalc-ci` package.
//!
//! ## Structure
//!
//! * [`data_structs`]: Rows as read from a sheet ([`RawRow`]), replicate
//!   aggregates ([`AggregateTable`]) and output rows ([`OutputRow`]).
//! * [`io`]: Sheet readers for workbooks (feature `workbook`) and delimited
//!   text, plus the output writer.
//! * [`tools`]: The scanner ([`RowScanner`]), the normalizer
//!   ([`Normalizer`]) and the [`run`](tools::pipeline::run) pipeline.
//! * [`utils`]: Builder macros and name helpers.
//!
//! ## Usage
//!
//! ### Running the whole pipeline
//!
//! ```no_run
//! use std::path::Path;
//! use qpcrcalc::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = RunConfig::default()
//!         .with_scan(ScanConfig::new("ACTB"))
//!         .with_normalize(
//!             NormalizeConfig::default()
//!                 .with_reference_samples(Some(ReferenceSamples::new(["Ctrl1", "Ctrl2"]))),
//!         );
//!
//!     let report = run(Path::new("path/to/run.xlsx"), &config)?;
//!     println!("Wrote {}", report.output.display());
//!     Ok(())
//! }
//! ```
//!
//! ### Working on rows directly
//!
//! ```no_run
//! use qpcrcalc::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let rows = vec![
//!         RawRow::new(1, Some("Sample Name"), Some("Target Name"), Some("CT")),
//!         RawRow::new(2, Some("S1"), Some("GAPDH"), Some("20.1")),
//!         RawRow::new(3, Some("S1"), Some("IL6"), Some("27.4")),
//!     ];
//!     let outcome = RowScanner::new(ScanConfig::default()).scan(rows);
//!     let reference = outcome.reference_target()?;
//!     let table = normalize(&outcome.table, reference, &NormalizeConfig::default())?;
//!
//!     for row in table.rows.iter() {
//!         println!("{} {} {}", row.target, row.sample, row.delta_ct);
//!     }
//!     Ok(())
//! }
//! ```

pub mod data_structs;
pub mod error;
pub mod io;
pub mod prelude;
pub mod tools;
pub mod utils;

pub use data_structs::{
    AggregateTable,
    OutputRow,
    RawRow,
};
pub use error::QpcrError;
pub use tools::normalize::Normalizer;
pub use tools::scan::RowScanner;
