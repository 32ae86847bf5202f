//! Runtime zero

// Imports
use std::{
	hint,
	time::{SystemTime, UNIX_EPOCH},
};

/// Number of nano-seconds per second
const NANOS_PER_SEC: u32 = 1_000_000_000;

/// A zero the compiler doesn't know is zero.
///
/// Masking a value with this keeps the value's computation (and any memory load
/// it requires) alive, without changing the masked result.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Zero(u64);

impl Zero {
	/// A compile-time zero, only useful when optimizations don't matter
	#[cfg(test)]
	pub(crate) const ZERO: Self = Self(0);

	/// Derives a zero from the current wall-clock time.
	#[must_use]
	pub fn from_clock() -> Self {
		// Note: Sub-second nanos are always less than a second's worth of
		//       nanos, so this is always `0`, but only known at runtime.
		let nanos = SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |duration| duration.subsec_nanos());
		let zero = match nanos >= NANOS_PER_SEC {
			true => u64::from(nanos),
			false => 0,
		};

		Self(hint::black_box(zero))
	}

	/// Returns the value
	#[inline(always)]
	#[must_use]
	pub const fn get(self) -> u64 {
		self.0
	}
}
