//! Utilities shared by the `memlat` binaries

// Modules
pub mod logger;
