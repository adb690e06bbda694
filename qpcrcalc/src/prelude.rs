pub use crate::data_structs::typedef::{
    CountType,
    CtType,
    RowPos,
};
pub use crate::data_structs::{
    output_header,
    Accumulator,
    AggregateTable,
    FoldChange,
    OutputRow,
    RawRow,
    ReplicateAggregate,
};
pub use crate::error::QpcrError;
#[cfg(feature = "workbook")]
pub use crate::io::WorkbookReader;
pub use crate::io::{
    default_output_path,
    open_sheet,
    write_table_file,
    CalcWriter,
    Column,
    DelimitedReader,
    InputFormat,
    SheetLayout,
    SheetRows,
};
pub use crate::tools::normalize::{
    normalize,
    MissingReferencePolicy,
    NormalizeConfig,
    NormalizedTable,
    Normalizer,
    ReferenceReport,
    ReferenceSamples,
};
pub use crate::tools::pipeline::{
    calculate,
    run,
    write_calculation,
    Calculation,
    RunConfig,
    RunReport,
};
pub use crate::tools::scan::{
    parse_ct,
    MalformedReason,
    MalformedRow,
    RowScanner,
    ScanConfig,
    ScanOutcome,
    ScanState,
};
