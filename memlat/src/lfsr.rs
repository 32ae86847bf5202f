//! Galois LFSR
//!
//! Cheap pseudo-random sequence used to make every iteration of the timed loops
//! depend on the previous one, so the compiler can neither reorder nor vectorize them.

// Imports
use crate::Zero;

/// Feedback polynomial
pub const GALOIS_POLYNOMIAL: u64 = (1 << 63) | (1 << 62) | (1 << 60) | (1 << 59);

/// Initial state
pub const SEED: u64 = 12345;

/// Galois linear-feedback shift register
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct Lfsr {
	/// Current state
	state: u64,
}

impl Lfsr {
	/// Creates a new register with state `state`
	#[must_use]
	pub const fn new(state: u64) -> Self {
		Self { state }
	}

	/// Creates a new register with state [`SEED`]
	#[must_use]
	pub const fn seeded() -> Self {
		Self::new(SEED)
	}

	/// Returns the current state
	#[must_use]
	pub const fn state(&self) -> u64 {
		self.state
	}

	/// Folds `value & zero` into the state and advances it, returning the new state
	#[inline(always)]
	pub fn advance(&mut self, value: u64, zero: Zero) -> u64 {
		self.state = self::step(self.state, value, zero);
		self.state
	}
}

impl Default for Lfsr {
	fn default() -> Self {
		Self::seeded()
	}
}

/// Advances `state` by one step after folding `value & zero` into it.
///
/// Since `zero` is always zero, `value` never changes the result, but the compiler
/// can't know that and must compute (or load) `value` on every step.
#[inline(always)]
#[must_use]
pub fn step(state: u64, value: u64, zero: Zero) -> u64 {
	let state = state ^ (value & zero.get());

	// Only apply the polynomial when the shifted-out bit is set
	(state >> 1) ^ (0u64.wrapping_sub(state & 1) & GALOIS_POLYNOMIAL)
}
