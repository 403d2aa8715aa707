//! Metrics collected from benchmark runs.

use serde::{Deserialize, Serialize};

/// Per-run measurements for one scenario.
///
/// Serializes to JSON via serde; `to_csv` produces the flat form the
/// CLI writes for spreadsheet comparison across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Bodies simulated (bubbles + agents + obstacles).
    pub body_count: usize,
    /// Worker threads in the dispatcher pool.
    pub workers: usize,
    /// Ticks executed.
    pub ticks: u32,
    /// Wall-clock time for the whole run (seconds).
    pub total_wall_time: f64,
    /// Mean per-tick wall time (seconds).
    pub avg_tick_time: f64,
    /// Fastest tick (seconds).
    pub min_tick_time: f64,
    /// Slowest tick (seconds).
    pub max_tick_time: f64,
    /// Mean broad-phase candidates per tick.
    pub avg_candidates: f64,
    /// Mean resolved bubble contacts per tick.
    pub avg_contacts: f64,
    /// Bubble kinetic energy after the last tick; settles toward zero
    /// as overlaps resolve.
    pub final_kinetic_energy: f64,
}

impl BenchmarkMetrics {
    /// The CSV header matching [`BenchmarkMetrics::to_csv_row`].
    pub fn to_csv_header() -> String {
        [
            "scenario",
            "body_count",
            "workers",
            "ticks",
            "total_wall_time_s",
            "avg_tick_ms",
            "min_tick_ms",
            "max_tick_ms",
            "avg_candidates",
            "avg_contacts",
            "final_ke",
        ]
        .join(",")
    }

    /// One CSV data row. Tick times are reported in milliseconds.
    pub fn to_csv_row(&self) -> String {
        [
            self.scenario.clone(),
            self.body_count.to_string(),
            self.workers.to_string(),
            self.ticks.to_string(),
            format!("{:.6}", self.total_wall_time),
            format!("{:.4}", self.avg_tick_time * 1000.0),
            format!("{:.4}", self.min_tick_time * 1000.0),
            format!("{:.4}", self.max_tick_time * 1000.0),
            format!("{:.1}", self.avg_candidates),
            format!("{:.1}", self.avg_contacts),
            format!("{:.6e}", self.final_kinetic_energy),
        ]
        .join(",")
    }

    /// Renders header plus one row per entry.
    pub fn to_csv(metrics: &[BenchmarkMetrics]) -> String {
        let mut lines = vec![Self::to_csv_header()];
        lines.extend(metrics.iter().map(Self::to_csv_row));
        lines.join("\n")
    }
}
