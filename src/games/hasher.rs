//! SHA-256 capability used by outcome derivation
//!
//! The verifier never reaches for a hash implementation directly; it is handed
//! a [`Sha256Provider`] so that the same derivation code runs against `sha2`,
//! a platform crypto service, or a fixed digest in tests.

use crate::errors::EnvironmentError;
use sha2::{Digest, Sha256};

/// Length of a SHA-256 digest in bytes
pub const SHA256_LEN: usize = 32;

/// Injected SHA-256 primitive
pub trait Sha256Provider: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Whether the primitive can be used at all. Checked once when the
    /// verifier is built.
    fn is_available(&self) -> bool {
        true
    }

    /// Digest `data`
    fn digest(&self, data: &[u8]) -> Result<[u8; SHA256_LEN], EnvironmentError>;
}

/// Pure-Rust SHA-256 from the `sha2` crate. Always available.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha2Provider;

impl Sha256Provider for Sha2Provider {
    fn name(&self) -> &str {
        "sha2"
    }

    fn digest(&self, data: &[u8]) -> Result<[u8; SHA256_LEN], EnvironmentError> {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Ok(hasher.finalize().into())
    }
}
