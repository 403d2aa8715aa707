//! Fork-join dispatch of candidate pairs over a fixed worker pool.
//!
//! The pool is built once at startup and lives for the process
//! lifetime; each tick performs exactly one fork-join round for the
//! bubble pass. There is no ordering guarantee across pairs and no
//! cancellation — the dispatch call returns only after every worker has
//! processed its chunk.

use spume_types::{SpumeError, SpumeResult};

use crate::broad::CandidatePair;

/// Worker threads to use when the caller does not specify: one per
/// hardware thread, minus one left for the driver, never below one.
pub fn default_worker_count() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(2)
        .saturating_sub(1)
        .max(1)
}

/// A fixed-size thread pool for narrow-phase fan-out.
pub struct WorkerPool {
    pool: rayon::ThreadPool,
    workers: usize,
}

impl WorkerPool {
    /// Builds a pool with the default worker count.
    pub fn new() -> SpumeResult<Self> {
        Self::with_workers(default_worker_count())
    }

    /// Builds a pool with an explicit worker count (clamped to >= 1).
    pub fn with_workers(workers: usize) -> SpumeResult<Self> {
        let workers = workers.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("spume-worker-{i}"))
            .build()
            .map_err(|e| SpumeError::WorkerPool(e.to_string()))?;
        Ok(Self { pool, workers })
    }

    /// Number of worker threads in the pool.
    #[inline]
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// One fork-join round: splits `pairs` into one contiguous chunk per
    /// scratch slot and invokes `callback(&mut slot, a, b)` for every
    /// pair in the chunk, blocking until all chunks are done.
    ///
    /// Each scratch slot is owned exclusively by its worker for the
    /// round, so the callback can accumulate freely without locks. By
    /// the time this returns, every pair has been inspected exactly once.
    pub fn dispatch_pairs<S, F>(&self, pairs: &[CandidatePair], scratch: &mut [S], callback: F)
    where
        S: Send,
        F: Fn(&mut S, u32, u32) + Sync,
    {
        if pairs.is_empty() || scratch.is_empty() {
            return;
        }

        let chunk_len = pairs.len().div_ceil(scratch.len());
        let callback = &callback;

        self.pool.scope(|scope| {
            for (chunk, slot) in pairs.chunks(chunk_len).zip(scratch.iter_mut()) {
                scope.spawn(move |_| {
                    for pair in chunk {
                        callback(slot, pair.a, pair.b);
                    }
                });
            }
        });
    }

    /// Fork-join round producing one output per pair.
    ///
    /// `out` is cleared and resized to match `pairs`; slot `k` receives
    /// `callback(pairs[k].a, pairs[k].b)`. Used by the color-class
    /// write-back path, where outcomes are computed in parallel from a
    /// read-only arena and applied single-threaded afterwards.
    pub fn map_pairs<T, F>(&self, pairs: &[CandidatePair], out: &mut Vec<T>, callback: F)
    where
        T: Send + Clone + Default,
        F: Fn(u32, u32) -> T + Sync,
    {
        out.clear();
        out.resize(pairs.len(), T::default());
        if pairs.is_empty() {
            return;
        }

        let chunk_len = pairs.len().div_ceil(self.workers);
        let callback = &callback;

        self.pool.scope(|scope| {
            for (chunk, out_chunk) in pairs.chunks(chunk_len).zip(out.chunks_mut(chunk_len)) {
                scope.spawn(move |_| {
                    for (pair, slot) in chunk.iter().zip(out_chunk.iter_mut()) {
                        *slot = callback(pair.a, pair.b);
                    }
                });
            }
        });
    }
}
