//! Collision event types.
//!
//! Structured events emitted around each tick's collision passes.
//! Events are lightweight value types carrying just enough data for
//! monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A telemetry event emitted by the collision core.
///
/// Events are tagged with a tick index and carry domain-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickEvent {
    /// Tick number (0-indexed).
    pub tick: u64,
    /// Event payload.
    pub kind: TickEventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TickEventKind {
    /// Tick started.
    TickBegin {
        /// Simulation time at the start of this tick (seconds).
        sim_time: f64,
    },

    /// Tick completed.
    TickEnd {
        /// Wall-clock time for the whole tick (seconds).
        wall_time: f64,
    },

    /// Broad-phase sweep completed.
    BroadPhase {
        /// Bodies populated into the index.
        bodies: u32,
        /// Candidate pairs emitted by the sweep.
        candidates: u32,
    },

    /// Narrow-phase resolution completed.
    Contacts {
        /// Bubble↔bubble contacts resolved.
        bubble_contacts: u32,
        /// Agent↔agent contacts resolved.
        agent_contacts: u32,
        /// Agent↔obstacle contacts resolved.
        obstacle_contacts: u32,
        /// Write-back batches used (1 in accumulate mode).
        batches: u32,
    },

    /// Energy snapshot at current state.
    Energy {
        /// Kinetic energy of all movable bodies.
        kinetic: f64,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl TickEvent {
    /// Creates a new event for the given tick.
    pub fn new(tick: u64, kind: TickEventKind) -> Self {
        Self { tick, kind }
    }
}
