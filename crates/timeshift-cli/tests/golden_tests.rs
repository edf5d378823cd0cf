use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use similar::{ChangeTag, TextDiff};

fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .parent()
        .unwrap()
        .to_path_buf()
}

fn fixture_dir() -> PathBuf {
    project_root().join("fixtures")
}

fn golden_dir() -> PathBuf {
    project_root().join("golden")
}

fn update_golden() -> bool {
    std::env::var("UPDATE_GOLDEN").is_ok()
}

fn diff_strings(expected: &str, actual: &str) -> String {
    let diff = TextDiff::from_lines(expected, actual);
    let mut out = String::new();
    for change in diff.iter_all_changes() {
        let sign = match change.tag() {
            ChangeTag::Delete => "-",
            ChangeTag::Insert => "+",
            ChangeTag::Equal => " ",
        };
        out.push_str(&format!("{sign}{change}"));
    }
    out
}

/// (golden name, fixture file, arguments)
const CASES: &[(&str, &str, &[&str])] = &[
    ("advance_months", "timestamps.txt", &["advance", "--months", "1"]),
    ("change_hour", "timestamps.txt", &["change", "--hour", "0"]),
    (
        "end_of_month",
        "timestamps.txt",
        &["boundary", "--query", "end-of-month"],
    ),
    (
        "start_of_week_sunday",
        "timestamps.txt",
        &["boundary", "--query", "start-of-week", "--wkst", "su"],
    ),
    ("in_month_february", "timestamps.txt", &["in-month", "--month", "2"]),
    ("iso_monday", "timestamps.txt", &["iso", "--wkst", "mo"]),
    (
        "berlin_advance_json",
        "berlin.txt",
        &[
            "advance",
            "--days",
            "1",
            "--tz",
            "Europe/Berlin",
            "--output-format",
            "json",
        ],
    ),
];

#[test]
fn golden_outputs() {
    let fixtures = fixture_dir();
    let golden = golden_dir();

    for (name, fixture, args) in CASES {
        let golden_path = golden.join(format!("{name}.txt"));

        let output = Command::new(env!("CARGO_BIN_EXE_timeshift"))
            .args(*args)
            .arg("--input")
            .arg(fixtures.join(fixture))
            .output()
            .expect("Failed to execute timeshift");

        assert!(
            output.status.success(),
            "timeshift failed for {}: {}",
            name,
            String::from_utf8_lossy(&output.stderr)
        );

        let actual = String::from_utf8(output.stdout).expect("Output is not valid UTF-8");

        if update_golden() {
            fs::create_dir_all(&golden).ok();
            fs::write(&golden_path, &actual)
                .unwrap_or_else(|e| panic!("Failed to write golden file {golden_path:?}: {e}"));
            eprintln!("Updated golden file: {golden_path:?}");
            continue;
        }

        let expected = fs::read_to_string(&golden_path).unwrap_or_else(|e| {
            panic!(
                "Golden file {golden_path:?} not found: {e}\n\
                 Hint: Run with UPDATE_GOLDEN=1 to generate golden files"
            )
        });

        if actual != expected {
            let diff = diff_strings(&expected, &actual);
            panic!(
                "Golden test mismatch for {name}:\n\n\
                 {diff}\n\n\
                 Run with UPDATE_GOLDEN=1 to refresh snapshots"
            );
        }
    }
}

#[test]
fn invalid_date_exits_with_input_error() {
    let dir = std::env::temp_dir().join("timeshift-golden-invalid");
    fs::create_dir_all(&dir).unwrap();
    let input = dir.join("april.txt");
    fs::write(&input, "20240415T120000Z\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_timeshift"))
        .args(["change", "--day", "31", "--output-format", "json"])
        .arg("--input")
        .arg(&input)
        .output()
        .expect("Failed to execute timeshift");

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid calendar date: 2024-04-31 12:00:00"));
    assert!(stderr.contains("\"exit_code\": 2"));
}

#[test]
fn missing_input_file_is_runtime_error() {
    let output = Command::new(env!("CARGO_BIN_EXE_timeshift"))
        .args(["boundary", "--query", "start-of-day"])
        .arg("--input")
        .arg(fixture_dir().join("does-not-exist.txt"))
        .output()
        .expect("Failed to execute timeshift");

    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open file"));
}
