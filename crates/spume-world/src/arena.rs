//! Body arena — SoA buffers for all per-body data.
//!
//! This is the primary mutable data structure during simulation.
//! Collision passes read and write these buffers each tick, addressing
//! bodies by index rather than by owning reference.

use spume_types::{BodyIndex, BodyKind, Scalar, SpumeError, SpumeResult, Vec2};

/// SoA body buffers.
///
/// Holds all per-body mutable data for one collection (bubbles, agents,
/// or obstacles). Each channel is its own contiguous column, so the
/// broad-phase populate pass streams straight down the position and
/// radius arrays without touching velocity or mass data.
///
/// All columns have the same length. An immovable body is stored with
/// `inv_mass == 0` and never accumulates a correction.
#[derive(Debug, Clone, Default)]
pub struct BodyArena {
    // ─── Position ───
    pub pos_x: Vec<Scalar>,
    pub pos_y: Vec<Scalar>,

    // ─── Velocity ───
    pub vel_x: Vec<Scalar>,
    pub vel_y: Vec<Scalar>,

    // ─── Shape and mass ───
    pub radius: Vec<Scalar>,
    pub inv_mass: Vec<Scalar>,

    // ─── Kind tag (drives mass/radius defaults, never hot-path branches) ───
    pub kind: Vec<BodyKind>,
}

impl BodyArena {
    /// Creates an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` bodies.
    ///
    /// The bubble collection is pre-reserved for tens of thousands of
    /// entries so spawning during play never reallocates the columns.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(capacity),
            pos_y: Vec::with_capacity(capacity),
            vel_x: Vec::with_capacity(capacity),
            vel_y: Vec::with_capacity(capacity),
            radius: Vec::with_capacity(capacity),
            inv_mass: Vec::with_capacity(capacity),
            kind: Vec::with_capacity(capacity),
        }
    }

    /// Number of bodies in the arena.
    #[inline]
    pub fn len(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns true if the arena holds no bodies.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    /// Spawns a body of `kind` with the kind table's default radius and mass.
    pub fn spawn(&mut self, kind: BodyKind, pos: Vec2, vel: Vec2) -> BodyIndex {
        let traits = kind.traits();
        self.push_raw(kind, pos, vel, traits.radius, kind.inverse_mass())
    }

    /// Spawns a body of `kind` with an explicit radius.
    ///
    /// Rejects non-positive or non-finite radii and non-finite positions;
    /// everything downstream divides by radius-derived quantities.
    pub fn spawn_with_radius(
        &mut self,
        kind: BodyKind,
        pos: Vec2,
        vel: Vec2,
        radius: Scalar,
    ) -> SpumeResult<BodyIndex> {
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SpumeError::InvalidBody(format!(
                "radius must be positive and finite, got {radius}"
            )));
        }
        if !pos.is_finite() {
            return Err(SpumeError::InvalidBody(format!(
                "position must be finite, got ({}, {})",
                pos.x, pos.y
            )));
        }
        Ok(self.push_raw(kind, pos, vel, radius, kind.inverse_mass()))
    }

    fn push_raw(
        &mut self,
        kind: BodyKind,
        pos: Vec2,
        vel: Vec2,
        radius: Scalar,
        inv_mass: Scalar,
    ) -> BodyIndex {
        let index = BodyIndex(self.len() as u32);
        self.pos_x.push(pos.x);
        self.pos_y.push(pos.y);
        self.vel_x.push(vel.x);
        self.vel_y.push(vel.y);
        self.radius.push(radius);
        self.inv_mass.push(inv_mass);
        self.kind.push(kind);
        index
    }

    /// Removes all bodies, retaining the column capacity.
    pub fn clear(&mut self) {
        self.pos_x.clear();
        self.pos_y.clear();
        self.vel_x.clear();
        self.vel_y.clear();
        self.radius.clear();
        self.inv_mass.clear();
        self.kind.clear();
    }

    /// Position of body `i`.
    #[inline]
    pub fn position(&self, i: usize) -> Vec2 {
        Vec2::new(self.pos_x[i], self.pos_y[i])
    }

    /// Velocity of body `i`.
    #[inline]
    pub fn velocity(&self, i: usize) -> Vec2 {
        Vec2::new(self.vel_x[i], self.vel_y[i])
    }

    /// Overwrites the position of body `i`.
    #[inline]
    pub fn set_position(&mut self, i: usize, pos: Vec2) {
        self.pos_x[i] = pos.x;
        self.pos_y[i] = pos.y;
    }

    /// Overwrites the velocity of body `i`.
    #[inline]
    pub fn set_velocity(&mut self, i: usize, vel: Vec2) {
        self.vel_x[i] = vel.x;
        self.vel_y[i] = vel.y;
    }

    /// Adds a collision correction to body `i`.
    ///
    /// The resolver emits exactly-zero deltas for an immovable side, so
    /// applying is a plain add with no kind branch.
    #[inline]
    pub fn apply_correction(&mut self, i: usize, disp: Vec2, dvel: Vec2) {
        self.pos_x[i] += disp.x;
        self.pos_y[i] += disp.y;
        self.vel_x[i] += dvel.x;
        self.vel_y[i] += dvel.y;
    }

    /// Advances every movable body by `vel * dt`.
    ///
    /// Drift integration for bodies the driver does not steer directly.
    pub fn integrate(&mut self, dt: Scalar) {
        for i in 0..self.len() {
            if self.inv_mass[i] > 0.0 {
                self.pos_x[i] += self.vel_x[i] * dt;
                self.pos_y[i] += self.vel_y[i] * dt;
            }
        }
    }

    /// Total kinetic energy: 0.5 * Σ m_i * ||v_i||². Immovable bodies
    /// contribute nothing.
    pub fn kinetic_energy(&self) -> f64 {
        let mut energy = 0.0f64;
        for i in 0..self.len() {
            let w = self.inv_mass[i];
            if w > 0.0 {
                let vx = self.vel_x[i] as f64;
                let vy = self.vel_y[i] as f64;
                energy += 0.5 * (1.0 / w as f64) * (vx * vx + vy * vy);
            }
        }
        energy
    }

    /// Checks the arena invariants: positive finite radii, finite
    /// positions and velocities, non-negative inverse masses.
    pub fn validate(&self) -> SpumeResult<()> {
        for i in 0..self.len() {
            if !self.radius[i].is_finite() || self.radius[i] <= 0.0 {
                return Err(SpumeError::InvalidBody(format!(
                    "body {i}: radius must be positive, got {}",
                    self.radius[i]
                )));
            }
            if !self.pos_x[i].is_finite() || !self.pos_y[i].is_finite() {
                return Err(SpumeError::InvalidBody(format!(
                    "body {i}: non-finite position"
                )));
            }
            if !self.vel_x[i].is_finite() || !self.vel_y[i].is_finite() {
                return Err(SpumeError::InvalidBody(format!(
                    "body {i}: non-finite velocity"
                )));
            }
            if !self.inv_mass[i].is_finite() || self.inv_mass[i] < 0.0 {
                return Err(SpumeError::InvalidBody(format!(
                    "body {i}: inverse mass must be non-negative, got {}",
                    self.inv_mass[i]
                )));
            }
        }
        Ok(())
    }
}
