//! # spume-telemetry
//!
//! Event bus for collision telemetry. Emits structured events
//! (timing, candidate counts, contacts, energy) that can be consumed
//! by pluggable sinks (tracing, log files, in-memory capture).

pub mod bus;
pub mod events;
pub mod sinks;

pub use bus::EventBus;
pub use events::TickEvent;
