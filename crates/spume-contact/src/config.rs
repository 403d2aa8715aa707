//! Pipeline configuration.

use serde::{Deserialize, Serialize};

use spume_types::constants::MAX_DT;
use spume_types::{Scalar, SpumeError, SpumeResult};

/// How the bubble pass writes corrections back into the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteBack {
    /// Thread-local accumulation merged after the barrier. One fork-join
    /// round per tick; overlapping pairs may jointly overcorrect a body
    /// slightly, all from tick-start state.
    Accumulate,
    /// Conflict-free color classes applied class by class. Extra
    /// fork-join rounds; later classes see earlier corrections.
    ColorClasses,
}

impl Default for WriteBack {
    fn default() -> Self {
        Self::Accumulate
    }
}

/// Configuration for [`crate::pipeline::CollisionPipeline`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Per-tick timestep ceiling (seconds). Frame hitches are clamped to
    /// this before any resolution runs.
    pub max_dt: Scalar,
    /// Worker thread count. `None` sizes the pool to hardware
    /// concurrency minus one.
    pub worker_threads: Option<usize>,
    /// Write-back strategy for the bubble pass.
    pub write_back: WriteBack,
    /// Expected bubble population, used to pre-reserve the broad-phase
    /// buffers.
    pub expected_bubbles: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_dt: MAX_DT,
            worker_threads: None,
            write_back: WriteBack::default(),
            expected_bubbles: 32_768,
        }
    }
}

impl PipelineConfig {
    /// Validates that the configuration is usable.
    pub fn validate(&self) -> SpumeResult<()> {
        if !self.max_dt.is_finite() || self.max_dt <= 0.0 {
            return Err(SpumeError::InvalidConfig(
                "max_dt must be positive and finite".into(),
            ));
        }
        if self.max_dt > 1.0 {
            return Err(SpumeError::InvalidConfig(
                "max_dt > 1.0 is unreasonably large".into(),
            ));
        }
        if self.worker_threads == Some(0) {
            return Err(SpumeError::InvalidConfig(
                "worker_threads must be >= 1".into(),
            ));
        }
        Ok(())
    }
}
