//! Cache failure modes.

use flux_any::{AnyError, Fingerprint};
use thiserror::Error;

/// Errors raised by cache lookups and stores.
#[derive(Debug, Error)]
pub enum CacheError {
    /// No entry under the key and no default was supplied.
    #[error("cache has no entry under {key}")]
    Miss { key: Fingerprint },

    /// The key could not be fingerprinted, or a cached value could not be
    /// cast to the requested type.
    #[error(transparent)]
    Any(#[from] AnyError),
}
