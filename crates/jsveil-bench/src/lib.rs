#![deny(clippy::all)]
#![warn(clippy::pedantic)]

//! Benchmark harness for jsveil.
//!
//! Run benchmarks with: `cargo bench -p jsveil-bench`
//!
//! The crate only holds criterion benchmarks for the name generators, the
//! rename planner and seed hashing.
