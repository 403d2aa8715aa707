//! Narrow-phase circle resolution.
//!
//! A pure function of two bodies' kinematics: decides true overlap and
//! returns a mass-weighted position correction plus a velocity
//! correction for each side. All kind-specific weighting (a volatile
//! bubble counting five times heavier, an obstacle being immovable, a
//! held agent receiving nothing) enters through the mass factors — the
//! resolver itself never branches on what a body is.

use spume_types::constants::{APPROACH_DAMPING_RATE, COINCIDENT_DISTANCE};
use spume_types::{Scalar, Vec2};
use spume_world::BodyArena;

/// Kinematic state of one circle, as the resolver sees it.
#[derive(Debug, Clone, Copy)]
pub struct CircleState {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: Scalar,
    /// Mass relative to a standard bubble. `<= 0` means immovable.
    pub mass_factor: Scalar,
}

impl CircleState {
    /// Reads body `i` out of an arena, deriving the mass factor from the
    /// stored inverse mass.
    pub fn from_arena(arena: &BodyArena, i: usize) -> Self {
        let inv = arena.inv_mass[i];
        Self {
            pos: arena.position(i),
            vel: arena.velocity(i),
            radius: arena.radius[i],
            mass_factor: if inv <= 0.0 { 0.0 } else { 1.0 / inv },
        }
    }

    /// Overrides the mass factor, e.g. to weight a held agent as
    /// immovable for one tick.
    pub fn with_mass_factor(mut self, factor: Scalar) -> Self {
        self.mass_factor = factor;
        self
    }
}

/// Corrections for one truly overlapping pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    pub disp_a: Vec2,
    pub disp_b: Vec2,
    pub dvel_a: Vec2,
    pub dvel_b: Vec2,
}

/// Inverse mass for a mass factor. Non-positive factors pin the body.
#[inline]
pub fn inverse_mass(factor: Scalar) -> Scalar {
    if factor <= 0.0 {
        0.0
    } else {
        1.0 / factor
    }
}

/// Resolves one candidate pair.
///
/// Returns `None` when the circles do not truly overlap (the broad
/// phase over-approximates) or when both sides are immovable.
/// Otherwise splits the overlap between the two bodies in proportion to
/// their inverse masses and, if the bodies are approaching, cancels the
/// closing velocity component at a rate scaled by `dt` so the response
/// is frame-rate independent.
pub fn resolve(dt: Scalar, a: &CircleState, b: &CircleState) -> Option<CollisionOutcome> {
    let delta = b.pos - a.pos;
    let dist = delta.length();
    let overlap = a.radius + b.radius - dist;
    if overlap <= 0.0 {
        return None;
    }

    // Coincident centers give no separation direction; substitute a
    // fixed unit axis rather than divide by zero.
    let normal = if dist < COINCIDENT_DISTANCE {
        Vec2::X
    } else {
        delta / dist
    };

    let inv_a = inverse_mass(a.mass_factor);
    let inv_b = inverse_mass(b.mass_factor);
    let inv_sum = inv_a + inv_b;
    if inv_sum <= 0.0 {
        return None;
    }

    let ratio_a = inv_a / inv_sum;
    let ratio_b = inv_b / inv_sum;

    // Push apart along the normal. An immovable side has ratio 0 and
    // receives exactly zero displacement.
    let disp_a = -normal * (overlap * ratio_a);
    let disp_b = normal * (overlap * ratio_b);

    // Approach speed along the normal; negative means closing.
    let vn = (b.vel - a.vel).dot(normal);
    let (dvel_a, dvel_b) = if vn < 0.0 {
        let cancel = -vn * (APPROACH_DAMPING_RATE * dt).min(1.0);
        (-normal * (cancel * ratio_a), normal * (cancel * ratio_b))
    } else {
        (Vec2::ZERO, Vec2::ZERO)
    };

    Some(CollisionOutcome {
        disp_a,
        disp_b,
        dvel_a,
        dvel_b,
    })
}
