//! # talus-bench
//!
//! Scenario harness for the Talus contact engine.
//!
//! Provides a uniform-grid broad phase, three procedural scenarios, a
//! semi-implicit Euler driver, and metric collection with CSV export.

pub mod metrics;
pub mod runner;
pub mod scenarios;
pub mod spatial_hash;

pub use metrics::BenchmarkMetrics;
pub use runner::{BenchmarkRunner, RunOutput};
pub use scenarios::{Scenario, ScenarioKind};
pub use spatial_hash::SpatialHash;
