//! Physical constants and simulation defaults.

/// Default simulation timestep (seconds). 1/60th of a second.
pub const DEFAULT_DT: f32 = 1.0 / 60.0;

/// Upper clamp on the per-tick timestep (seconds).
///
/// Frame hitches can hand the driver a very large elapsed time; stepping
/// collision response with it produces violent corrections, so the
/// pipeline clamps to this ceiling instead.
pub const MAX_DT: f32 = 1.0 / 30.0;

/// Rate (per second) at which an approaching velocity component is
/// cancelled during narrow-phase response. Multiplied by `dt` each tick,
/// so halving the timestep and resolving twice converges to the same
/// net response.
pub const APPROACH_DAMPING_RATE: f32 = 12.0;

/// Mass multiplier for volatile (explosive) bubbles relative to a
/// standard bubble.
pub const VOLATILE_MASS_SCALE: f32 = 5.0;

/// Expected candidate pairs per body, used to pre-reserve the broad-phase
/// candidate buffer before the first sweep.
pub const CANDIDATES_PER_BODY: usize = 4;

/// Epsilon for floating-point comparisons.
pub const EPSILON: f32 = 1.0e-6;

/// Distance below which two circle centers are treated as coincident
/// and a fixed separation axis is substituted.
pub const COINCIDENT_DISTANCE: f32 = 1.0e-6;
