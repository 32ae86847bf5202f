//! Memory latency measurement (`memlat`)
//!
//! Measures the average latency of random and sequential memory accesses over
//! arrays of geometrically increasing size, exposing the cache hierarchy.

// Modules
pub mod data;
pub mod lfsr;
pub mod measure;
pub mod sweep;
pub mod zero;

// Exports
pub use self::{
	data::{Row, RowSink, RowWriter},
	lfsr::Lfsr,
	measure::{measure_latency, measure_sequential_latency, Measurement},
	sweep::{ConfigError, Sweep, SweepConfig},
	zero::Zero,
};
