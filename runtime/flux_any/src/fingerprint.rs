//! Call fingerprinting.
//!
//! A fingerprint is the deterministic key under which a module call is
//! memoized. It folds together the opaque inputs of the call, the identity
//! of the module, and the identities of every transitively bound submodule.
//! SHA-256 keeps the collision probability negligible; fingerprint equality
//! is treated as call equality by the caches.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::AnyError;

/// Accumulates material into a fingerprint.
#[derive(Default)]
pub struct Fingerprinter {
    hasher: Sha256,
}

impl Fingerprinter {
    pub fn new() -> Self {
        Fingerprinter::default()
    }

    /// Folds raw bytes into the fingerprint.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.hasher.update(bytes);
    }

    /// Folds a string into the fingerprint.
    pub fn write_str(&mut self, s: &str) {
        self.hasher.update(s.as_bytes());
    }

    /// Folds any serializable value into the fingerprint.
    pub fn write_value<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), AnyError> {
        let bytes = bincode::serialize(value).map_err(|source| AnyError::Fingerprint {
            type_name: std::any::type_name::<T>(),
            source,
        })?;
        self.hasher.update(&bytes);
        Ok(())
    }

    /// Finalizes the accumulated material into a stable-length key.
    pub fn finish(self) -> Fingerprint {
        Fingerprint(self.hasher.finalize().into())
    }
}

impl fmt::Debug for Fingerprinter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fingerprinter").finish_non_exhaustive()
    }
}

/// A stable-length cache key.
///
/// Deterministic within one code version; not guaranteed stable across
/// compiler versions (type names participate in the hash).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fingerprint([u8; 32]);

impl Fingerprint {
    /// Fingerprints a single serializable value; convenience for cache keys.
    pub fn of<T: Serialize + ?Sized>(value: &T) -> Result<Self, AnyError> {
        let mut fp = Fingerprinter::new();
        fp.write_value(value)?;
        Ok(fp.finish())
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fingerprint({self})")
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]
