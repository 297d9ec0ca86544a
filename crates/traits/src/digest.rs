//! Hash function contracts.
//!
//! [`Digest`] is a streaming interface: incremental
//! updates, idempotent finalize, and reset support. It is object-safe so the
//! same handle type can come from the default implementation or an engine.

use alloc::{boxed::Box, vec::Vec};
use core::fmt;

/// Hash functions understood by the SHA-2, HMAC, and TLS PRF contracts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HashKind {
  /// SHA-224 (FIPS 180-4).
  Sha224 = 0,
  /// SHA-256 (FIPS 180-4).
  Sha256 = 1,
  /// SHA-384 (FIPS 180-4).
  Sha384 = 2,
  /// SHA-512 (FIPS 180-4).
  Sha512 = 3,
}

impl HashKind {
  /// All hash kinds, in declaration order.
  pub const ALL: [Self; 4] = [Self::Sha224, Self::Sha256, Self::Sha384, Self::Sha512];

  /// Digest length in bytes.
  #[inline]
  #[must_use]
  pub const fn output_size(self) -> usize {
    match self {
      Self::Sha224 => 28,
      Self::Sha256 => 32,
      Self::Sha384 => 48,
      Self::Sha512 => 64,
    }
  }

  /// Internal block length in bytes (the HMAC pad width).
  #[inline]
  #[must_use]
  pub const fn block_size(self) -> usize {
    match self {
      Self::Sha224 | Self::Sha256 => 64,
      Self::Sha384 | Self::Sha512 => 128,
    }
  }

  /// Canonical name, e.g. `"SHA-256"`.
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Sha224 => "SHA-224",
      Self::Sha256 => "SHA-256",
      Self::Sha384 => "SHA-384",
      Self::Sha512 => "SHA-512",
    }
  }
}

impl fmt::Display for HashKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Streaming hash (or keyed MAC) state.
///
/// # Implementor Requirements
///
/// - `finalize()` must be idempotent and must not disturb the running state
/// - `reset()` must restore the state produced by the constructor, including
///   any key material
/// - `finalize()` returns exactly `output_size()` bytes
pub trait Digest: Send {
  /// Digest length in bytes.
  fn output_size(&self) -> usize;

  /// Internal block length in bytes.
  fn block_size(&self) -> usize;

  /// Absorb more input.
  fn update(&mut self, data: &[u8]);

  /// Return the digest of everything absorbed so far.
  #[must_use]
  fn finalize(&self) -> Vec<u8>;

  /// Return to the initial (keyed) state.
  fn reset(&mut self);
}

impl fmt::Debug for dyn Digest {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Digest")
      .field("output_size", &self.output_size())
      .field("block_size", &self.block_size())
      .finish_non_exhaustive()
  }
}

/// The `sha2` capability: SHA-2 family constructors.
///
/// The one-shot `sum*` methods are provided in terms of the constructors; an
/// implementation may override them with a faster path but must keep the
/// results identical.
pub trait Sha2: Send + Sync {
  /// New SHA-224 state.
  fn new_sha224(&self) -> Box<dyn Digest>;

  /// New SHA-256 state.
  fn new_sha256(&self) -> Box<dyn Digest>;

  /// New SHA-384 state.
  fn new_sha384(&self) -> Box<dyn Digest>;

  /// New SHA-512 state.
  fn new_sha512(&self) -> Box<dyn Digest>;

  /// SHA-224 of `data`.
  #[must_use]
  fn sum224(&self, data: &[u8]) -> [u8; 28] {
    one_shot(self.new_sha224(), data)
  }

  /// SHA-256 of `data`.
  #[must_use]
  fn sum256(&self, data: &[u8]) -> [u8; 32] {
    one_shot(self.new_sha256(), data)
  }

  /// SHA-384 of `data`.
  #[must_use]
  fn sum384(&self, data: &[u8]) -> [u8; 48] {
    one_shot(self.new_sha384(), data)
  }

  /// SHA-512 of `data`.
  #[must_use]
  fn sum512(&self, data: &[u8]) -> [u8; 64] {
    one_shot(self.new_sha512(), data)
  }
}

fn one_shot<const N: usize>(mut state: Box<dyn Digest>, data: &[u8]) -> [u8; N] {
  state.update(data);
  let mut out = [0u8; N];
  for (dst, src) in out.iter_mut().zip(state.finalize()) {
    *dst = src;
  }
  out
}
