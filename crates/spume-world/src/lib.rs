//! # spume-world
//!
//! Body storage and world state for the Spume collision core.
//!
//! ## Key Types
//!
//! - [`BodyArena`] — SoA buffers for positions, velocities, radii, masses
//! - [`World`] — the bubble/agent/obstacle arenas plus per-tick caches
//! - [`snapshot::WorldSnapshot`] — binary state capture for inspection

pub mod arena;
pub mod snapshot;
pub mod world;

pub use arena::BodyArena;
pub use world::World;
