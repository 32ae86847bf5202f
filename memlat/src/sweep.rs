//! Sweep over array sizes

// Imports
use {
	crate::{
		data::{Row, RowSink},
		measure::{self, ArrayElement, ARRAY_ELEMENT_SIZE},
		Zero,
	},
	anyhow::Context,
	std::{error, fmt},
};

/// Size of the first array, in bytes
pub const MIN_SIZE: u64 = 100;

/// Sweep configuration
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct SweepConfig {
	/// Maximum array size, in bytes
	max_size: u64,

	/// Growth factor between consecutive sizes
	factor: f64,

	/// Iterations per measurement
	repeat: u64,
}

impl SweepConfig {
	/// Validates and creates a configuration
	pub fn new(max_size: i64, factor: f64, repeat: i64) -> Result<Self, ConfigError> {
		let max_size = u64::try_from(max_size)
			.ok()
			.filter(|&max_size| max_size >= MIN_SIZE)
			.ok_or(ConfigError::MaxSizeTooSmall { max_size })?;

		// Note: Written this way so `NaN` is rejected too
		if !(factor > 1.0) {
			return Err(ConfigError::FactorTooSmall { factor });
		}

		let repeat = u64::try_from(repeat)
			.ok()
			.filter(|&repeat| repeat > 0)
			.ok_or(ConfigError::RepeatNotPositive { repeat })?;

		Ok(Self {
			max_size,
			factor,
			repeat,
		})
	}

	/// Returns the maximum array size
	pub fn max_size(&self) -> u64 {
		self.max_size
	}

	/// Returns the growth factor
	pub fn factor(&self) -> f64 {
		self.factor
	}

	/// Returns the iterations per measurement
	pub fn repeat(&self) -> u64 {
		self.repeat
	}

	/// Returns all array sizes to measure, in order
	pub fn sizes(&self) -> Sizes {
		Sizes {
			next:     Some(MIN_SIZE),
			max_size: self.max_size,
			factor:   self.factor,
		}
	}
}

/// Iterator over the array sizes of a sweep.
///
/// Strictly increasing, starting at [`MIN_SIZE`] and ending at the last size
/// that doesn't exceed the maximum size.
#[derive(Clone, Debug)]
pub struct Sizes {
	/// Next size
	next: Option<u64>,

	/// Maximum size
	max_size: u64,

	/// Growth factor
	factor: f64,
}

impl Iterator for Sizes {
	type Item = u64;

	fn next(&mut self) -> Option<Self::Item> {
		let size = self.next.filter(|&size| size <= self.max_size)?;
		self.next = self::next_size(size, self.factor);
		Some(size)
	}
}

/// Returns the size after `size`, if any
fn next_size(size: u64, factor: f64) -> Option<u64> {
	// Note: Float-to-int `as` casts truncate and saturate, which is what we want.
	//       If the factor is too small to make a difference, we still move forward
	//       by a single byte, so we always finish.
	let next = (size as f64 * factor) as u64;
	match next > size {
		true => Some(next),
		false => size.checked_add(1),
	}
}

/// Configuration error
#[derive(PartialEq, Clone, Copy, Debug)]
pub enum ConfigError {
	/// Maximum size was less than [`MIN_SIZE`]
	MaxSizeTooSmall { max_size: i64 },

	/// Factor wasn't greater than 1
	FactorTooSmall { factor: f64 },

	/// Repeat wasn't positive
	RepeatNotPositive { repeat: i64 },
}

impl fmt::Display for ConfigError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "Invalid arguments, max_size >= {MIN_SIZE}, factor > 1, repeat > 0: ")?;
		match self {
			Self::MaxSizeTooSmall { max_size } => write!(f, "found max_size {max_size}"),
			Self::FactorTooSmall { factor } => write!(f, "found factor {factor}"),
			Self::RepeatNotPositive { repeat } => write!(f, "found repeat {repeat}"),
		}
	}
}

impl error::Error for ConfigError {}

/// Sweep
#[derive(Debug)]
pub struct Sweep {
	/// Configuration
	config: SweepConfig,

	/// Runtime zero passed to the measurers
	zero: Zero,
}

impl Sweep {
	/// Creates a new sweep
	pub fn new(config: SweepConfig, zero: Zero) -> Self {
		Self { config, zero }
	}

	/// Measures every size and writes a row for each to `sink`
	pub fn run<S: RowSink>(&self, sink: &mut S) -> Result<RunOutput, anyhow::Error> {
		tracing::info!(config = ?self.config, "Starting sweep");

		let mut rows = 0;
		for size in self.config.sizes() {
			let row = self
				.measure_size(size)
				.with_context(|| format!("Unable to measure array of {size} bytes"))?;
			tracing::debug!(?row, "Measured array");

			sink.write_row(&row).context("Unable to write row")?;
			rows += 1;
		}

		tracing::info!(rows, "Finished sweep");
		Ok(RunOutput { rows })
	}

	/// Measures both access patterns on a freshly allocated array of `size` bytes
	pub fn measure_size(&self, size: u64) -> Result<Row, anyhow::Error> {
		let arr = self::alloc_array(size).context("Unable to allocate array")?;
		tracing::trace!(size, elements = arr.len(), "Allocated array");

		let random = measure::measure_latency(self.config.repeat, &arr, self.zero);
		let sequential = measure::measure_sequential_latency(self.config.repeat, &arr, self.zero);
		tracing::trace!(?random, ?sequential, "Measurements");

		// Note: Release the array before anyone allocates the next one
		drop(arr);

		Ok(Row {
			size,
			random_offset: random.offset(),
			sequential_offset: sequential.offset(),
		})
	}
}

/// Output for [`Sweep::run`]
#[derive(Clone, Copy, Debug)]
pub struct RunOutput {
	/// Rows written
	pub rows: usize,
}

/// Allocates an array of `size` bytes, with ascending elements.
///
/// Any bytes past the last whole element are left out.
pub fn alloc_array(size: u64) -> Result<Vec<ArrayElement>, anyhow::Error> {
	let size = usize::try_from(size).context("Size doesn't fit in memory")?;
	let len = size / ARRAY_ELEMENT_SIZE;
	anyhow::ensure!(len > 0, "Array of {size} bytes has no elements");

	let mut arr = Vec::new();
	arr.try_reserve_exact(len)
		.with_context(|| format!("Unable to reserve {len} elements"))?;
	arr.extend(0..len as ArrayElement);

	Ok(arr)
}
