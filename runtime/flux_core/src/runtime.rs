//! The parallel-runtime handle passed through to kernels.

use std::sync::Arc;

use crate::errors::ModuleError;

/// A view of the process's parallel runtime.
///
/// The core itself never spawns; this handle exists so kernels may
/// parallelize internally. By default it delegates to rayon's global
/// thread pool; `with_threads` builds a dedicated pool instead (useful to
/// sandbox a manager's modules away from the rest of the process).
#[derive(Clone, Default)]
pub struct RuntimeView {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl RuntimeView {
    /// A view onto rayon's global thread pool.
    pub fn new() -> Self {
        RuntimeView::default()
    }

    /// A view onto a dedicated pool of `threads` workers.
    pub fn with_threads(threads: usize) -> Result<Self, ModuleError> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| ModuleError::Runtime {
                reason: e.to_string(),
            })?;
        Ok(RuntimeView {
            pool: Some(Arc::new(pool)),
        })
    }

    /// A view onto an existing pool.
    pub fn with_pool(pool: Arc<rayon::ThreadPool>) -> Self {
        RuntimeView { pool: Some(pool) }
    }

    /// The number of worker threads this view can schedule onto.
    pub fn num_threads(&self) -> usize {
        match &self.pool {
            Some(pool) => pool.current_num_threads(),
            None => rayon::current_num_threads(),
        }
    }

    /// Runs `op` inside this view's pool, so nested rayon parallelism
    /// schedules onto it.
    pub fn install<R, OP>(&self, op: OP) -> R
    where
        OP: FnOnce() -> R + Send,
        R: Send,
    {
        match &self.pool {
            Some(pool) => pool.install(op),
            None => op(),
        }
    }
}

impl std::fmt::Debug for RuntimeView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeView")
            .field("dedicated_pool", &self.pool.is_some())
            .field("num_threads", &self.num_threads())
            .finish()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
