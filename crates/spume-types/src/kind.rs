//! Closed set of body kinds and their collision traits.
//!
//! Kind-specific behavior (how heavy a body is, whether it can be pushed)
//! lives entirely in the [`BodyTraits`] table. The narrow-phase resolver
//! and the dispatcher never branch on kind — they see mass factors and
//! nothing else.

use serde::{Deserialize, Serialize};

use crate::constants::VOLATILE_MASS_SCALE;
use crate::scalar::Scalar;

/// Every kind of circular body the simulation collides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyKind {
    /// Standard drifting bubble. The dominant population.
    Bubble,
    /// Explosive bubble. Same size as a standard bubble, five times
    /// heavier, so it plows through clusters rather than bouncing off.
    Volatile,
    /// Player- or AI-steered actor body.
    Agent,
    /// The unique homing agent. At most one exists per world; the world
    /// caches its index each tick so passes can find it without scanning.
    Beacon,
    /// Fixed level geometry. Never moves, always pushes.
    Obstacle,
}

/// Per-kind collision data: how the narrow phase should weigh a body
/// and whether the world may move it at all.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BodyTraits {
    /// Mass relative to a standard bubble. `0` means immovable.
    pub mass_factor: Scalar,
    /// Default radius for bodies spawned as this kind.
    pub radius: Scalar,
    /// Whether collision response may displace this body.
    pub relocatable: bool,
}

impl BodyKind {
    /// All kinds, in declaration order.
    pub const ALL: [BodyKind; 5] = [
        BodyKind::Bubble,
        BodyKind::Volatile,
        BodyKind::Agent,
        BodyKind::Beacon,
        BodyKind::Obstacle,
    ];

    /// Returns the collision traits for this kind.
    pub const fn traits(self) -> BodyTraits {
        match self {
            BodyKind::Bubble => BodyTraits {
                mass_factor: 1.0,
                radius: 8.0,
                relocatable: true,
            },
            BodyKind::Volatile => BodyTraits {
                mass_factor: VOLATILE_MASS_SCALE,
                radius: 8.0,
                relocatable: true,
            },
            BodyKind::Agent => BodyTraits {
                mass_factor: 4.0,
                radius: 24.0,
                relocatable: true,
            },
            BodyKind::Beacon => BodyTraits {
                mass_factor: 4.0,
                radius: 24.0,
                relocatable: true,
            },
            BodyKind::Obstacle => BodyTraits {
                mass_factor: 0.0,
                radius: 40.0,
                relocatable: false,
            },
        }
    }

    /// Stable lowercase name, used in telemetry payloads and CLI output.
    pub const fn name(self) -> &'static str {
        match self {
            BodyKind::Bubble => "bubble",
            BodyKind::Volatile => "volatile",
            BodyKind::Agent => "agent",
            BodyKind::Beacon => "beacon",
            BodyKind::Obstacle => "obstacle",
        }
    }

    /// Mass factor from the traits table.
    #[inline]
    pub const fn mass_factor(self) -> Scalar {
        self.traits().mass_factor
    }

    /// Inverse mass derived from the traits table. Zero for immovable kinds.
    #[inline]
    pub fn inverse_mass(self) -> Scalar {
        let factor = self.mass_factor();
        if factor <= 0.0 {
            0.0
        } else {
            1.0 / factor
        }
    }
}
