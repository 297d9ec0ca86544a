//! Error types shared by every capability contract.
//!
//! A contract's error type is part of its signature, so engines report their
//! own failures through [`CryptoError::Engine`] instead of inventing a type
//! the default implementation would never return.

use alloc::boxed::Box;
use core::fmt;

use thiserror::Error;

use crate::digest::HashKind;

/// Invalid key length for a keyed primitive.
///
/// Carries the algorithm prefix (`"crypto/aes"`, `"crypto/des"`) so the
/// message reads the same whichever implementation would have been used.
///
/// # Examples
///
/// ```
/// use traits::KeySizeError;
///
/// let err = KeySizeError::new("crypto/aes", 10);
/// assert_eq!(err.len(), 10);
/// assert_eq!(err.to_string(), "crypto/aes: invalid key size 10");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeySizeError {
  algorithm: &'static str,
  len: usize,
}

impl KeySizeError {
  /// Create a key size error for `algorithm` and the rejected key length.
  #[inline]
  #[must_use]
  pub const fn new(algorithm: &'static str, len: usize) -> Self {
    Self { algorithm, len }
  }

  /// Algorithm prefix, e.g. `"crypto/aes"`.
  #[inline]
  #[must_use]
  pub const fn algorithm(&self) -> &'static str {
    self.algorithm
  }

  /// The rejected key length in bytes.
  #[inline]
  #[must_use]
  #[allow(clippy::len_without_is_empty)]
  pub const fn len(&self) -> usize {
    self.len
  }
}

impl fmt::Display for KeySizeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: invalid key size {}", self.algorithm, self.len)
  }
}

impl core::error::Error for KeySizeError {}

/// Error returned by capability operations and handles.
///
/// The dispatch layer never wraps or rewrites this value: whatever an engine
/// returns reaches the caller unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CryptoError {
  /// Key length rejected by input validation.
  #[error(transparent)]
  KeySize(#[from] KeySizeError),

  /// A block operation was given a buffer that is not exactly one block.
  #[error("invalid block length {got}, expected {expected}")]
  BlockLength {
    /// Block size of the cipher.
    expected: usize,
    /// Length of the buffer that was passed.
    got: usize,
  },

  /// The operation does not accept this hash function.
  #[error("{operation}: unsupported hash function {hash}")]
  UnsupportedHash {
    /// Operation prefix, e.g. `"crypto/tls"`.
    operation: &'static str,
    /// The rejected hash function.
    hash: HashKind,
  },

  /// Failure reported by an engine's own implementation.
  #[error("engine failure: {0}")]
  Engine(Box<dyn core::error::Error + Send + Sync + 'static>),
}

impl CryptoError {
  /// Wrap an engine-defined failure.
  #[inline]
  pub fn engine<E>(err: E) -> Self
  where
    E: core::error::Error + Send + Sync + 'static,
  {
    Self::Engine(Box::new(err))
  }

  /// Check that `got` is exactly one block of `expected` bytes.
  #[inline]
  pub fn check_block(expected: usize, got: usize) -> Result<(), Self> {
    if got == expected { Ok(()) } else { Err(Self::BlockLength { expected, got }) }
  }
}
