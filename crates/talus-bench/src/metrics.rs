//! Benchmark metrics — data collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    pub scenario: String,
    /// Resolved kernel, `<normal>+<rolling>`.
    pub kernel: String,
    pub particle_count: usize,
    pub timesteps: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per step (seconds).
    pub avg_step_time: f64,
    pub min_step_time: f64,
    pub max_step_time: f64,
    /// Most pairs tracked at once.
    pub max_tracked_pairs: usize,
    /// Most pairs in contact at once.
    pub max_contacts: usize,
    /// Largest overlap seen (m).
    pub max_overlap: f64,
    /// Kinetic energy before the first step (J).
    pub initial_kinetic_energy: f64,
    /// Kinetic energy after the last step (J).
    pub final_kinetic_energy: f64,
}

impl BenchmarkMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        [
            "scenario",
            "kernel",
            "particles",
            "timesteps",
            "total_wall_time_s",
            "avg_step_ms",
            "min_step_ms",
            "max_step_ms",
            "max_tracked",
            "max_contacts",
            "max_overlap",
            "initial_ke",
            "final_ke",
        ]
        .join(",")
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{:.6},{:.4},{:.4},{:.4},{},{},{:.6e},{:.6e},{:.6e}",
            self.scenario,
            self.kernel,
            self.particle_count,
            self.timesteps,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.max_tracked_pairs,
            self.max_contacts,
            self.max_overlap,
            self.initial_kinetic_energy,
            self.final_kinetic_energy,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
