//! Memory latency measurement (`memlat`)
//!
//! Usage: `memlat <MAX_SIZE> <FACTOR> <REPEAT>`.
//!
//! Prints `SIZE,RANDOM_OFFSET,SEQUENTIAL_OFFSET` for every array size to stdout
//! and to the output file.

// Modules
mod args;

// Imports
use {
	self::args::Args,
	anyhow::Context,
	clap::Parser,
	memlat::{ConfigError, RowWriter, Sweep, SweepConfig, Zero},
	memlat_util::logger,
	std::{fs, io, process::ExitCode},
};

/// Exit code for all failures (`-1`)
const FAILURE_EXIT_CODE: u8 = 255;

fn main() -> ExitCode {
	// Get arguments
	let args = match Args::try_parse() {
		Ok(args) => args,
		Err(err) => {
			// Note: `--help` and `--version` also end up here, but aren't failures
			let _ = err.print();
			return match err.use_stderr() {
				true => ExitCode::from(FAILURE_EXIT_CODE),
				false => ExitCode::SUCCESS,
			};
		},
	};
	logger::pre_init::debug(format!("Args: {args:?}"));

	// Initialize logging
	logger::init(args.log_file.as_deref(), args.log_file_append);

	match self::run(&args) {
		Ok(()) => ExitCode::SUCCESS,
		Err(err) => {
			// Note: Invalid configurations are reported on stdout, everything else on stderr
			match err.downcast_ref::<ConfigError>() {
				Some(err) => println!("{err}"),
				None => eprintln!("Error: {err:#}"),
			}
			ExitCode::from(FAILURE_EXIT_CODE)
		},
	}
}

/// Validates the arguments and runs the sweep
fn run(args: &Args) -> Result<(), anyhow::Error> {
	let config = SweepConfig::new(args.max_size, args.factor, args.repeat)?;
	let zero = Zero::from_clock();

	let output_file = fs::File::create(&args.output_file)
		.with_context(|| format!("Unable to create output file {:?}", args.output_file))?;

	let mut sinks = (RowWriter::new(io::stdout().lock()), RowWriter::new(output_file));
	Sweep::new(config, zero)
		.run(&mut sinks)
		.context("Unable to run sweep")?;

	let (stdout, output_file) = sinks;
	stdout.finish().context("Unable to finish writing to stdout")?;
	output_file
		.finish()
		.context("Unable to finish writing output file")?
		.sync_all()
		.context("Unable to sync output file")?;

	Ok(())
}
