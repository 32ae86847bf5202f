//! Arguments

// Imports
use std::path::PathBuf;

/// Arguments
#[derive(Debug)]
#[derive(clap::Parser)]
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

	/// Input files
	///
	/// Offsets for the same size are averaged across all files.
	#[clap(required = true)]
	pub input_files: Vec<PathBuf>,

	/// Caches
	#[clap(flatten)]
	pub caches: Caches,

	/// Output
	#[clap(flatten)]
	pub output: Output,
}

/// Cache sizes to mark on the graph
#[derive(Debug, clap::Args)]
pub struct Caches {
	/// L1 cache size, in bytes
	#[clap(long = "l1")]
	pub l1: Option<u64>,

	/// L2 cache size, in bytes
	#[clap(long = "l2")]
	pub l2: Option<u64>,

	/// L3 cache size, in bytes
	#[clap(long = "l3")]
	pub l3: Option<u64>,
}

/// Output
#[derive(Debug, clap::Args)]
pub struct Output {
	/// Interactive mode
	#[clap(long = "interactive")]
	pub interactive: bool,

	/// Output file
	#[clap(short = 'o', long = "output", group = "output-file")]
	pub file: Option<PathBuf>,

	/// Output file width
	#[clap(long = "output-width", requires = "output-file", default_value_t = 640)]
	pub width: u32,

	/// Output file height
	#[clap(long = "output-height", requires = "output-file", default_value_t = 480)]
	pub height: u32,
}
