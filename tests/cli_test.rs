//! End-to-end command tests: parse arguments, load a record file, dispatch

use std::path::PathBuf;

use clap::Parser;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use treestore::cli::{execute_command, Cli};
use treestore::exitcode;

const ORPHANS: &str = r#"
[[items]]
id = 1
label = "root"

[[items]]
id = 2
parent = "missing"
label = "orphan"
"#;

struct RecordFile {
    _dir: TempDir,
    path: PathBuf,
}

#[fixture]
fn record_file() -> RecordFile {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("items.toml");
    std::fs::write(&path, ORPHANS).unwrap();
    RecordFile { _dir: dir, path }
}

fn run(file: &RecordFile, args: &[&str]) -> treestore::cli::CliResult<()> {
    let path = file.path.to_string_lossy().to_string();
    let mut argv = vec!["treestore", "-f", path.as_str()];
    argv.extend_from_slice(args);
    execute_command(&Cli::parse_from(argv))
}

#[rstest]
#[case(&["children", "missing"])]
#[case(&["children", "42"])]
#[case(&["descendants", "missing"])]
#[case(&["ancestors", "2"])]
#[case(&["path", "42"])]
#[case(&["remove", "42"])]
fn given_dangling_or_unknown_id_when_querying_then_succeeds(
    record_file: RecordFile,
    #[case] args: &[&str],
) {
    assert!(run(&record_file, args).is_ok());
}

#[rstest]
fn given_unknown_id_when_getting_then_exits_with_data_error(record_file: RecordFile) {
    // Act
    let err = run(&record_file, &["get", "42"]).unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::DATAERR);
}

#[rstest]
fn given_numeric_id_when_getting_then_finds_integer_record(record_file: RecordFile) {
    assert!(run(&record_file, &["get", "1"]).is_ok());
}

#[test]
fn given_missing_record_file_when_listing_then_exits_with_no_input() {
    // Act
    let err = execute_command(&Cli::parse_from([
        "treestore",
        "-f",
        "/nonexistent/items.toml",
        "list",
    ]))
    .unwrap_err();

    // Assert
    assert_eq!(err.exit_code(), exitcode::NOINPUT);
}
