//! End-to-end tests for the `memlat` binary

// Imports
use {
	memlat::Row,
	std::{fs, path::Path, process::Command},
};

/// Output of a run
struct RunOutput {
	success: bool,
	stdout:  String,
	stderr:  String,
}

/// Runs `memlat` with `args` inside `dir`
fn run(dir: &Path, args: &[&str]) -> RunOutput {
	let output = Command::new(env!("CARGO_BIN_EXE_memlat"))
		.args(args)
		.current_dir(dir)
		.env("RUST_LOG", "off")
		.output()
		.expect("Unable to run memlat");

	RunOutput {
		success: output.status.success(),
		stdout:  String::from_utf8(output.stdout).expect("Stdout wasn't utf-8"),
		stderr:  String::from_utf8(output.stderr).expect("Stderr wasn't utf-8"),
	}
}

/// Checks that `line` is a row of `size` with offsets printed with 2 decimals
fn assert_row(line: &str, size: u64) {
	let row = line.parse::<Row>().unwrap_or_else(|err| panic!("Invalid row {line:?}: {err:?}"));
	assert_eq!(row.size, size, "Unexpected size in {line:?}");

	for field in line.split(',').skip(1) {
		let (_, decimals) = field.split_once('.').unwrap_or_else(|| panic!("No decimals in {line:?}"));
		assert_eq!(decimals.len(), 2, "Expected 2 decimals in {line:?}");
	}
}

#[test]
fn single_size() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	let output = run(dir.path(), &["100", "2", "1000"]);
	assert!(output.success, "Failed: {}", output.stderr);

	let lines = output.stdout.lines().collect::<Vec<_>>();
	assert_eq!(lines.len(), 1, "Unexpected output: {:?}", output.stdout);
	assert_row(lines[0], 100);

	let results = fs::read_to_string(dir.path().join("results.csv")).expect("Unable to read results");
	assert_eq!(results.lines().collect::<Vec<_>>(), lines);
}

#[test]
fn geometric_sizes() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	let output = run(dir.path(), &["800", "2", "1000"]);
	assert!(output.success, "Failed: {}", output.stderr);

	let lines = output.stdout.lines().collect::<Vec<_>>();
	assert_eq!(lines.len(), 4, "Unexpected output: {:?}", output.stdout);
	for (line, size) in lines.iter().zip([100, 200, 400, 800]) {
		assert_row(line, size);
	}

	let results = fs::read_to_string(dir.path().join("results.csv")).expect("Unable to read results");
	assert_eq!(results.lines().collect::<Vec<_>>(), lines);
}

#[test]
fn custom_output_file() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	let output = run(dir.path(), &["--output", "out.csv", "150", "1.5", "100"]);
	assert!(output.success, "Failed: {}", output.stderr);

	assert!(!dir.path().join("results.csv").exists());
	let results = fs::read_to_string(dir.path().join("out.csv")).expect("Unable to read results");
	assert_eq!(results.lines().count(), 2);
	assert_eq!(results.lines().collect::<Vec<_>>(), output.stdout.lines().collect::<Vec<_>>());
}

#[test]
fn invalid_max_size() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");

	// Same invalid input, same outcome
	for _ in 0..2 {
		let output = run(dir.path(), &["50", "2", "10"]);
		assert!(!output.success);
		assert_eq!(output.stdout.lines().count(), 1, "Expected a single diagnostic line");
		assert!(output.stdout.contains("Invalid arguments"), "Unexpected output: {:?}", output.stdout);

		let results = dir.path().join("results.csv");
		assert!(!results.exists() || fs::read_to_string(results).expect("Unable to read results").is_empty());
	}
}

#[test]
fn invalid_factor_and_repeat() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	for args in [["100", "1", "10"], ["100", "0.5", "10"], ["100", "2", "0"], ["100", "2", "-3"]] {
		let output = run(dir.path(), &args);
		assert!(!output.success, "Succeeded with {args:?}");
		assert!(output.stdout.contains("Invalid arguments"), "Unexpected output: {:?}", output.stdout);
		assert!(!dir.path().join("results.csv").exists());
	}
}

#[test]
fn wrong_argument_count() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	for args in [vec!["100", "2"], vec![], vec!["100", "2", "10", "5"]] {
		let output = run(dir.path(), &args);
		assert!(!output.success, "Succeeded with {args:?}");
		assert!(output.stdout.is_empty(), "Unexpected output: {:?}", output.stdout);
		assert!(output.stderr.contains("Usage"), "Expected usage, found {:?}", output.stderr);
	}
}

#[test]
fn unwritable_output_file() {
	let dir = tempfile::tempdir().expect("Unable to create temporary directory");
	let output = run(dir.path(), &["--output", "missing-dir/results.csv", "100", "2", "10"]);
	assert!(!output.success);
	assert!(output.stdout.is_empty(), "Measured without an output file: {:?}", output.stdout);
	assert!(output.stderr.contains("Unable to create output file"), "Unexpected error: {:?}", output.stderr);
}
