//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
#[command(version, allow_negative_numbers = true)]
pub struct Args {
	/// Log file
	///
	/// Specifies a file to perform verbose logging to.
	/// You can use `RUST_LOG_FILE` to set filtering options
	#[clap(long = "log-file")]
	pub log_file: Option<PathBuf>,

	/// Whether to append to the log file
	#[clap(long = "log-file-append")]
	pub log_file_append: bool,

	/// Output file
	///
	/// Receives the same rows as stdout.
	#[clap(long = "output", default_value = "results.csv")]
	pub output_file: PathBuf,

	/// Maximum array size, in bytes (at least 100)
	pub max_size: i64,

	/// Growth factor between array sizes (greater than 1)
	pub factor: f64,

	/// Iterations per measurement (positive)
	pub repeat: i64,
}
