//! Logger
//!
//! Logs to stderr, filtered by `RUST_LOG` (default `info`), and optionally to a
//! file, filtered by `RUST_LOG_FILE` (default `debug`).
//! Nothing is ever logged to stdout, since that's where results go.

// Imports
use {
	std::{
		fs,
		io,
		path::Path,
		sync::{Mutex, PoisonError},
	},
	tracing::metadata::LevelFilter,
	tracing_subscriber::{prelude::*, EnvFilter},
};

/// Initializes the logger.
///
/// Any messages buffered through [`pre_init`] are logged right after.
/// If a logger was already initialized, this only flushes the buffered messages.
pub fn init(log_file: Option<&Path>, log_file_append: bool) {
	let stderr_layer = tracing_subscriber::fmt::layer()
		.with_writer(io::stderr)
		.with_filter(self::env_filter("RUST_LOG", LevelFilter::INFO));

	// Note: Failing to open the log file shouldn't stop the program, we just
	//       won't log to it.
	let file_layer = log_file.and_then(|path| match self::open_log_file(path, log_file_append) {
		Ok(file) => Some(
			tracing_subscriber::fmt::layer()
				.with_writer(Mutex::new(file))
				.with_ansi(false)
				.with_filter(self::env_filter("RUST_LOG_FILE", LevelFilter::DEBUG)),
		),
		Err(err) => {
			eprintln!("Unable to open log file {path:?}: {err}");
			None
		},
	});

	if let Err(err) = tracing_subscriber::registry()
		.with(stderr_layer)
		.with(file_layer)
		.try_init()
	{
		eprintln!("Unable to initialize logger: {err}");
	}

	pre_init::flush();
}

/// Creates an env filter from `var`, defaulting to `default` when unset
fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
	EnvFilter::builder()
		.with_default_directive(default.into())
		.with_env_var(var)
		.from_env_lossy()
}

/// Opens the log file
fn open_log_file(path: &Path, append: bool) -> Result<fs::File, io::Error> {
	let mut options = fs::OpenOptions::new();
	match append {
		true => options.create(true).append(true),
		false => options.create(true).write(true).truncate(true),
	};

	options.open(path)
}

/// Logging before the logger is initialized
pub mod pre_init {
	// Imports
	use super::*;

	/// Messages waiting for the logger
	static MESSAGES: Mutex<Vec<String>> = Mutex::new(Vec::new());

	/// Buffers a debug message until the logger is initialized
	pub fn debug(message: impl Into<String>) {
		MESSAGES
			.lock()
			.unwrap_or_else(PoisonError::into_inner)
			.push(message.into());
	}

	/// Logs all buffered messages
	pub(super) fn flush() {
		let messages = std::mem::take(&mut *MESSAGES.lock().unwrap_or_else(PoisonError::into_inner));
		for message in messages {
			tracing::debug!("{message}");
		}
	}
}
