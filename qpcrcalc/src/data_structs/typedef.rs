/// CT values and everything derived from them (means, deltas, fold changes).
pub type CtType = f64;
/// 1-based row (or line) number of the input sheet, used in diagnostics.
pub type RowPos = u32;
/// Number of replicates aggregated under one key.
pub type CountType = u32;
