//! Flux Cache - fingerprint-keyed caches for the Flux module runtime.
//!
//! This crate provides:
//! - `UserCache`: the scratch store a module developer uses for
//!   intermediates inside `run`, with permanent/temporary tagging and
//!   pruning
//! - `ModuleCache`: the result-memoization store the runtime probes before
//!   dispatching a module call
//! - `ModuleManagerCache`: vends one of each, per registered module key
//!
//! All caches key by [`Fingerprint`](flux_any::Fingerprint); fingerprint
//! equality is treated as call equality. Nothing here persists across
//! process lifetimes.

mod errors;
mod manager_cache;
mod module_cache;
mod user_cache;

pub use errors::CacheError;
pub use manager_cache::ModuleManagerCache;
pub use module_cache::ModuleCache;
pub use user_cache::{CacheTag, UserCache};
