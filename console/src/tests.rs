use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use qpcrcalc::prelude::*;
use rstest::*;
use tempfile::TempDir;

use super::Cli;
use crate::utils::parse_delimiter;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../qpcrcalc/tests/data/results.csv")
}

#[fixture]
fn workdir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn copy_input(dir: &Path) -> PathBuf {
    let input = dir.join("results.csv");
    std::fs::copy(fixture_path(), &input).unwrap();
    input
}

mod args_tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["qpcrcalc", "run.xlsx"]).unwrap();
        let config = cli.args.run_config();

        assert_eq!(cli.args.control, "GAPDH");
        assert_eq!(config.layout, SheetLayout::default());
        assert_eq!(config.scan.control, "GAPDH");
        assert!(!config.normalize.fold_change_enabled());
        assert_eq!(config.normalize.missing_policy, MissingReferencePolicy::Abort);
        assert_eq!(config.output, None);
        assert!(!cli.utils.verbose);
        assert!(!cli.utils.progress);
    }

    #[test]
    fn test_full_arguments() {
        let cli = Cli::try_parse_from([
            "qpcrcalc",
            "run.txt",
            "actb",
            "-r",
            "Ctrl1,Ctrl2",
            "-r",
            "Ctrl3",
            "-o",
            "out.csv",
            "--sheet",
            "Data",
            "--sample-col",
            "2",
            "--target-col",
            "c",
            "--ct-col",
            "AA",
            "--first-row",
            "40",
            "-d",
            "tab",
            "--skip-missing",
            "-v",
        ])
        .unwrap();
        let config = cli.args.run_config();

        assert_eq!(config.scan.control, "actb");
        assert_eq!(
            config.normalize.reference_samples.unwrap().requested(),
            vec!["ctrl1", "ctrl2", "ctrl3"]
        );
        assert_eq!(config.normalize.missing_policy, MissingReferencePolicy::Skip);
        assert_eq!(config.output, Some(PathBuf::from("out.csv")));
        assert_eq!(config.layout.sheet, "Data");
        assert_eq!(config.layout.sample_col, Column::from_index(1));
        assert_eq!(config.layout.target_col, Column::from_index(2));
        assert_eq!(config.layout.ct_col, Column::from_index(26));
        assert_eq!(config.layout.first_row, 40);
        assert_eq!(config.delimiter, Some(b'\t'));
        assert!(cli.utils.verbose);
    }

    #[rstest]
    #[case::control_after_reference(&["qpcrcalc", "run.csv", "-r", "Ctrl", "ACTB"])]
    #[case::control_before_reference(&["qpcrcalc", "run.csv", "ACTB", "-r", "Ctrl"])]
    fn test_reference_keeps_control_positional(#[case] args: &[&str]) {
        let cli = Cli::try_parse_from(args).unwrap();
        let config = cli.args.run_config();

        assert_eq!(config.scan.control, "ACTB");
        assert_eq!(
            config.normalize.reference_samples.unwrap().requested(),
            vec!["ctrl"]
        );
    }

    #[rstest]
    #[case::no_input(&["qpcrcalc"])]
    #[case::bad_column(&["qpcrcalc", "run.csv", "--ct-col", "O1"])]
    #[case::zero_row(&["qpcrcalc", "run.csv", "--first-row", "0"])]
    #[case::bad_delimiter(&["qpcrcalc", "run.csv", "-d", ";;"])]
    fn test_usage_errors(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[rstest]
    #[case(",", b',')]
    #[case(";", b';')]
    #[case("tab", b'\t')]
    #[case("\\t", b'\t')]
    fn test_parse_delimiter(
        #[case] value: &str,
        #[case] expected: u8,
    ) {
        assert_eq!(parse_delimiter(value), Ok(expected));
    }
}

mod run_tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[rstest]
    fn test_run_writes_output(workdir: TempDir) {
        let input = copy_input(workdir.path());
        let report_path = workdir.path().join("report.json");
        let input_arg = input.to_string_lossy().into_owned();
        let report_arg = report_path.to_string_lossy().into_owned();
        let cli = parse(&["qpcrcalc", &input_arg, "-r", "Ctrl", "--report", &report_arg]);

        let report = cli.args.run(&cli.utils).unwrap().unwrap();
        assert_eq!(report.output, workdir.path().join("CALCULATED_results.csv"));
        assert!(report.output.exists());

        let json = std::fs::read_to_string(&report_path).unwrap();
        assert!(json.contains("\"reference_target\": \"GAPDH\""));
    }

    #[rstest]
    fn test_no_control_is_not_fatal(workdir: TempDir) {
        let input = copy_input(workdir.path());
        let input_arg = input.to_string_lossy().into_owned();
        let cli = parse(&["qpcrcalc", &input_arg, "ACTB"]);

        assert!(cli.args.run(&cli.utils).unwrap().is_none());
        assert!(!default_output_path(&input).exists());
    }

    #[rstest]
    fn test_unsupported_format_is_not_fatal(workdir: TempDir) {
        let input = workdir.path().join("plate.pdf");
        std::fs::write(&input, "%PDF").unwrap();
        let input_arg = input.to_string_lossy().into_owned();
        let cli = parse(&["qpcrcalc", &input_arg]);

        assert!(cli.args.run(&cli.utils).unwrap().is_none());
    }

    #[rstest]
    fn test_corrupt_workbook_is_not_fatal(workdir: TempDir) {
        let input = workdir.path().join("plate.xlsx");
        std::fs::write(&input, "this is not a workbook").unwrap();
        let input_arg = input.to_string_lossy().into_owned();
        let cli = parse(&["qpcrcalc", &input_arg]);

        assert!(cli.args.run(&cli.utils).unwrap().is_none());
        assert!(!default_output_path(&input).exists());
    }

    #[test]
    fn test_missing_input_fails() {
        let cli = parse(&["qpcrcalc", "/nonexistent/run.csv"]);
        assert!(cli.args.run(&cli.utils).is_err());
    }
}
