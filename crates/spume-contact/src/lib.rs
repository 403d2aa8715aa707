//! # spume-contact
//!
//! Collision detection and response for the Spume core.
//!
//! The per-tick pipeline is split into three phases:
//! 1. **Broad phase** — single-axis interval sweep over the bubble arena
//! 2. **Dispatch** — one fork-join round over a fixed worker pool
//! 3. **Narrow phase** — exact circle test and mass-weighted correction
//!
//! Write-back of corrections is race-free by construction: workers
//! either accumulate into thread-local buffers merged after the
//! barrier, or resolve conflict-free color classes applied one class at
//! a time. Agent passes skip the broad phase entirely — their counts
//! are small enough for direct nested iteration.

pub mod broad;
pub mod coloring;
pub mod config;
pub mod delta;
pub mod dispatch;
pub mod narrow;
pub mod passes;
pub mod pipeline;

pub use broad::{CandidatePair, SweepIndex};
pub use config::{PipelineConfig, WriteBack};
pub use delta::DeltaBuffer;
pub use dispatch::{default_worker_count, WorkerPool};
pub use narrow::{resolve, CircleState, CollisionOutcome};
pub use pipeline::{CollisionPipeline, TickReport};
