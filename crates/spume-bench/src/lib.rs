//! # spume-bench
//!
//! Benchmark suite for the Spume collision core: seeded procedural
//! scenarios, metric collection with CSV/JSON export, and a
//! worker-sweep harness that proves pair dispatch does not depend on
//! the parallelism degree.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, WorkerSweepSample};
pub use scenarios::{Scenario, ScenarioKind};
