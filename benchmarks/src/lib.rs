//! Benchmark helpers for salesfit.
//!
//! - synthetic weekly sales series
//! - timing utilities for the standalone binaries

pub mod data;
pub mod utils;

pub use data::SyntheticSales;
pub use utils::{benchmark_fn, time_fn, BenchmarkStats, Timer};
