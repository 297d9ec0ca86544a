//! TLS pseudo-random function contract.

use crate::{digest::HashKind, error::CryptoError};

/// The `tls-prf` capability: the TLS 1.2 PRF (RFC 5246, section 5).
///
/// Fills `out` with `P_hash(secret, label || seed)`. Only SHA-256 and SHA-384
/// are valid hash functions for TLS 1.2 cipher suites.
pub trait TlsPrf: Send + Sync {
  /// Expand `secret` into `out`.
  fn prf(&self, hash: HashKind, secret: &[u8], label: &[u8], seed: &[u8], out: &mut [u8]) -> Result<(), CryptoError>;
}

/// Whether `hash` may be used with the TLS 1.2 PRF.
#[inline]
#[must_use]
pub const fn is_prf_hash(hash: HashKind) -> bool {
  matches!(hash, HashKind::Sha256 | HashKind::Sha384)
}
