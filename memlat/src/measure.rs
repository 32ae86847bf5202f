//! Latency measurers
//!
//! Both measurers time two loops of identical shape: a baseline loop that only
//! advances the [`Lfsr`], and an access loop that additionally loads one array
//! element per iteration and folds it into the register. The difference between
//! the per-iteration averages is the cost of the load.

// Imports
use {
	crate::{
		lfsr::{self, Lfsr},
		Zero,
	},
	std::{mem, time::Instant},
};

/// Array element
pub type ArrayElement = u64;

/// Size of each array element, in bytes
pub const ARRAY_ELEMENT_SIZE: usize = mem::size_of::<ArrayElement>();

/// Measurement
#[derive(PartialEq, Clone, Copy, Debug)]
pub struct Measurement {
	/// Average time per iteration without memory accesses (ns)
	pub baseline: f64,

	/// Average time per iteration with memory accesses (ns)
	pub access_time: f64,

	/// Final register state.
	///
	/// Only returned so the loops can't be elided.
	pub rnd: u64,

	/// Iterations performed by each loop
	pub iterations: u64,
}

impl Measurement {
	/// Returns the average cost of a single memory access (ns)
	#[must_use]
	pub fn offset(&self) -> f64 {
		self.access_time - self.baseline
	}
}

/// Measures the average latency of accessing `arr` in a pseudo-random order.
///
/// Each index is derived from the register state, so every load depends on the
/// previous iteration and the hardware can't predict the next address.
///
/// `repeat` is raised to the array length, so every element can be reached.
///
/// # Panics
/// Panics if `arr` is empty.
#[must_use]
pub fn measure_latency(repeat: u64, arr: &[ArrayElement], zero: Zero) -> Measurement {
	self::measure(repeat, arr, zero, |_, state| state)
}

/// Measures the average latency of accessing `arr` in sequential order.
///
/// `repeat` is raised to the array length, so every element is accessed.
///
/// # Panics
/// Panics if `arr` is empty.
#[must_use]
pub fn measure_sequential_latency(repeat: u64, arr: &[ArrayElement], zero: Zero) -> Measurement {
	self::measure(repeat, arr, zero, |idx, _| idx)
}

/// Runs both timed loops.
///
/// Each iteration indexes `arr` with `index_of(idx, state) % arr.len()`, where
/// `idx` is the iteration and `state` the current register state.
#[inline(always)]
fn measure(repeat: u64, arr: &[ArrayElement], zero: Zero, index_of: impl Fn(u64, u64) -> u64) -> Measurement {
	assert!(!arr.is_empty(), "Cannot measure an empty array");
	let len = arr.len() as u64;
	let iterations = repeat.max(len);

	// Baseline
	let baseline_start = Instant::now();
	let mut lfsr = Lfsr::seeded();
	for idx in 0..iterations {
		let index = index_of(idx, lfsr.state()) % len;
		lfsr.advance(index, zero);
	}
	let baseline_duration = baseline_start.elapsed();

	// Memory accesses
	// Note: We restart from the seed, but through `zero` so the loops stay chained.
	let access_start = Instant::now();
	let mut lfsr = Lfsr::new((lfsr.state() & zero.get()) ^ lfsr::SEED);
	for idx in 0..iterations {
		let index = index_of(idx, lfsr.state()) % len;
		lfsr.advance(arr[index as usize], zero);
	}
	let access_duration = access_start.elapsed();

	Measurement {
		baseline: baseline_duration.as_nanos() as f64 / iterations as f64,
		access_time: access_duration.as_nanos() as f64 / iterations as f64,
		rnd: lfsr.state(),
		iterations,
	}
}

#[cfg(test)]
mod tests {
	use {super::*, rand::Rng};

	/// Returns the register state after `steps` steps from the seed
	fn state_after(steps: u64) -> u64 {
		let mut lfsr = Lfsr::seeded();
		for idx in 0..steps {
			lfsr.advance(idx, Zero::ZERO);
		}
		lfsr.state()
	}

	fn ascending(len: usize) -> Vec<ArrayElement> {
		(0..len as u64).collect()
	}

	#[test]
	fn iterations_are_repeat() {
		let arr = ascending(16);
		for repeat in [16, 17, 100, 1000] {
			let random = measure_latency(repeat, &arr, Zero::ZERO);
			let sequential = measure_sequential_latency(repeat, &arr, Zero::ZERO);

			assert_eq!(random.iterations, repeat);
			assert_eq!(sequential.iterations, repeat);

			// The access loop restarts from the seed, so its final state tells
			// us how many steps it took.
			assert_eq!(random.rnd, state_after(repeat));
			assert_eq!(sequential.rnd, state_after(repeat));
		}
	}

	#[test]
	fn repeat_raised_to_array_length() {
		let arr = ascending(500);
		for repeat in [1, 10, 499] {
			let measurement = measure_sequential_latency(repeat, &arr, Zero::ZERO);
			assert_eq!(measurement.iterations, 500);
			assert_eq!(measurement.rnd, state_after(500));

			let measurement = measure_latency(repeat, &arr, Zero::ZERO);
			assert_eq!(measurement.iterations, 500);
		}
	}

	#[test]
	fn single_element() {
		let measurement = measure_latency(1, &[7], Zero::ZERO);
		assert_eq!(measurement.iterations, 1);
		assert_eq!(measurement.rnd, state_after(1));
	}

	#[test]
	fn times_are_finite_and_non_negative() {
		let mut rng = rand::thread_rng();
		for _ in 0..20 {
			let len = rng.gen_range(1..4096);
			let repeat = rng.gen_range(1..10_000);
			let arr = ascending(len);

			for measurement in [
				measure_latency(repeat, &arr, Zero::from_clock()),
				measure_sequential_latency(repeat, &arr, Zero::from_clock()),
			] {
				assert!(measurement.baseline.is_finite() && measurement.baseline >= 0.0);
				assert!(measurement.access_time.is_finite() && measurement.access_time >= 0.0);
				assert!(measurement.offset().is_finite());
			}
		}
	}

	#[test]
	fn array_contents_do_not_affect_state() {
		let mut rng = rand::thread_rng();
		let arr = (0..256).map(|_| rng.gen()).collect::<Vec<ArrayElement>>();

		assert_eq!(
			measure_latency(1000, &arr, Zero::ZERO).rnd,
			measure_latency(1000, &ascending(256), Zero::ZERO).rnd
		);
	}

	#[test]
	fn offset_is_difference() {
		let measurement = Measurement {
			baseline:    1.5,
			access_time: 4.0,
			rnd:         0,
			iterations:  1,
		};
		assert_eq!(measurement.offset(), 2.5);
	}

	#[test]
	#[should_panic = "Cannot measure an empty array"]
	fn empty_array_panics() {
		let _ = measure_latency(10, &[], Zero::ZERO);
	}
}
