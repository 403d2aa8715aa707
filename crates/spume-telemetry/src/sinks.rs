//! Event sinks.
//!
//! A sink is whatever consumes the bus: structured logging, in-memory
//! capture for assertions, or a CSV file for offline inspection.

use std::path::PathBuf;

use crate::events::{TickEvent, TickEventKind};

/// Consumer side of the telemetry bus.
pub trait EventSink: Send {
    /// Receives one flushed event.
    fn handle(&mut self, event: &TickEvent);

    /// Last call before the bus is dropped; write files, close handles.
    fn finalize(&mut self) {}

    /// Short identifier for diagnostics.
    fn name(&self) -> &str;
}

/// Captures events into a vector. The test sink.
#[derive(Default)]
pub struct VecSink {
    /// Everything handled so far, in arrival order.
    pub events: Vec<TickEvent>,
}

impl VecSink {
    /// Creates an empty capture sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands back the captured events, leaving the sink empty.
    pub fn take(&mut self) -> Vec<TickEvent> {
        std::mem::take(&mut self.events)
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &TickEvent) {
        self.events.push(event.clone());
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing` with per-variant structured fields.
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    /// Creates a tracing sink. Events at or above `level` use that
    /// level; everything is currently emitted at INFO.
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }

    /// The configured level.
    pub fn level(&self) -> tracing::Level {
        self.level
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &TickEvent) {
        let tick = event.tick;
        match &event.kind {
            TickEventKind::TickBegin { sim_time } => {
                tracing::info!(tick, sim_time, "tick begin");
            }
            TickEventKind::TickEnd { wall_time } => {
                tracing::info!(tick, wall_ms = wall_time * 1000.0, "tick end");
            }
            TickEventKind::BroadPhase { bodies, candidates } => {
                tracing::info!(tick, bodies, candidates, "broad phase");
            }
            TickEventKind::Contacts {
                bubble_contacts,
                agent_contacts,
                obstacle_contacts,
                batches,
            } => {
                tracing::info!(
                    tick,
                    bubble_contacts,
                    agent_contacts,
                    obstacle_contacts,
                    batches,
                    "contacts resolved"
                );
            }
            TickEventKind::Energy { kinetic } => {
                tracing::info!(tick, kinetic, "energy");
            }
            TickEventKind::Custom { label, payload } => {
                tracing::info!(tick, label = %label, payload = %payload, "custom event");
            }
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}

/// Folds each tick's events into one CSV row.
///
/// Rows accumulate in memory and reach the disk only on
/// [`EventSink::finalize`], so telemetry never blocks a tick on I/O.
/// `BroadPhase` and `Contacts` fill in the current row; `TickEnd`
/// closes it.
pub struct CsvSink {
    path: PathBuf,
    rows: Vec<String>,
    tick: u64,
    candidates: u32,
    bubble_contacts: u32,
    agent_contacts: u32,
    obstacle_contacts: u32,
}

impl CsvSink {
    /// Creates a CSV sink that will write to `path` on finalize.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            rows: Vec::new(),
            tick: 0,
            candidates: 0,
            bubble_contacts: 0,
            agent_contacts: 0,
            obstacle_contacts: 0,
        }
    }

    /// Completed rows so far, not counting the header.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

impl EventSink for CsvSink {
    fn handle(&mut self, event: &TickEvent) {
        self.tick = event.tick;
        match event.kind {
            TickEventKind::BroadPhase { candidates, .. } => {
                self.candidates = candidates;
            }
            TickEventKind::Contacts {
                bubble_contacts,
                agent_contacts,
                obstacle_contacts,
                ..
            } => {
                self.bubble_contacts = bubble_contacts;
                self.agent_contacts = agent_contacts;
                self.obstacle_contacts = obstacle_contacts;
            }
            TickEventKind::TickEnd { wall_time } => {
                self.rows.push(format!(
                    "{},{},{},{},{},{:.6}",
                    self.tick,
                    self.candidates,
                    self.bubble_contacts,
                    self.agent_contacts,
                    self.obstacle_contacts,
                    wall_time * 1000.0,
                ));
                self.candidates = 0;
                self.bubble_contacts = 0;
                self.agent_contacts = 0;
                self.obstacle_contacts = 0;
            }
            _ => {}
        }
    }

    fn finalize(&mut self) {
        let mut csv =
            String::from("tick,candidates,bubble_contacts,agent_contacts,obstacle_contacts,tick_ms");
        for row in &self.rows {
            csv.push('\n');
            csv.push_str(row);
        }
        if let Err(e) = std::fs::write(&self.path, &csv) {
            tracing::warn!(path = ?self.path, error = %e, "failed to write telemetry CSV");
        }
    }

    fn name(&self) -> &str {
        "csv_sink"
    }
}
