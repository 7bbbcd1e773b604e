//! Benchmark utilities for Rusty Emitter.
//!
//! This crate provides the fixtures shared by the dispatch benchmarks:
//!
//! - **Listeners**: Listener types with cheap, observable handlers
//! - **Setup**: Emitters pre-populated with callbacks and instances
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p rusty_bench
//!
//! # Run specific benchmark group
//! cargo bench -p rusty_bench -- fan_out
//! ```
//!
//! # Benchmark Results
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

pub mod listeners;
