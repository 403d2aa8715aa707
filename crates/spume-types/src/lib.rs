//! # spume-types
//!
//! Shared vocabulary for the Spume collision core: scalar and vector
//! aliases, index newtypes, the body-kind table, errors, and constants.
//! No collision logic lives here.

pub mod constants;
pub mod error;
pub mod ids;
pub mod kind;
pub mod scalar;

// Re-export glam's 2D vector as the canonical math type for Spume.
pub use glam::Vec2;

pub use error::{SpumeError, SpumeResult};
pub use ids::{BodyIndex, TickIndex};
pub use kind::{BodyKind, BodyTraits};
pub use scalar::Scalar;
