macro_rules! define_strings {
    (
        $($name:ident = $value:literal);*$(;)?
    ) => {
        $(
            pub const $name: &str = $value;
        )*
    };
}

pub mod calc {
    define_strings! {
        INPUT =
            "Path to the instrument results export. Workbooks (xlsx, xlsm, \
            xls, xlsb, ods) and delimited text (csv, tsv, txt) are accepted.";
        CONTROL =
            "Name of the reference (housekeeping) target. Matched against \
            target names case-insensitively; the first matching name in the \
            sheet is used.";
        REFERENCE =
            "Reference samples, matched case-insensitively. Separate names with \
            commas or repeat the option. When given, fold change is computed \
            relative to the mean delta CT of these samples.";
        OUTPUT =
            "Output file. Defaults to CALCULATED_<input stem>.csv next to the \
            input file.";
        SHEET =
            "Worksheet holding the results table. Ignored for delimited text.";
        SAMPLE_COL =
            "Column holding sample names, as letters (D) or a 1-based number (4).";
        TARGET_COL =
            "Column holding target names, as letters (E) or a 1-based number (5).";
        CT_COL =
            "Column holding CT values, as letters (O) or a 1-based number (15).";
        FIRST_ROW =
            "First 1-based row to look for the header marker in.";
        DELIMITER =
            "Field separator of delimited input. Defaults to ',' for csv and \
            tab for tsv/txt. Use 'tab' or '\\t' for a tab.";
        SKIP_MISSING =
            "Skip samples without a reference target replicate, and leave fold \
            change empty for targets without reference sample data, instead of \
            aborting.";
        REPORT =
            "Write a JSON run report to this path.";
    }
}

pub mod utils {
    define_strings! {
        VERBOSE = "Print debug messages.";
        PROGRESS = "Display progress bar.";
    }
}
