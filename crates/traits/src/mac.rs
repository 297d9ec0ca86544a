//! Message authentication contracts.

use alloc::boxed::Box;

use crate::{
  digest::{Digest, HashKind},
  error::CryptoError,
};

/// The `hmac` capability (RFC 2104).
///
/// Any key length is valid; keys longer than the hash block are hashed first,
/// as the RFC prescribes. The returned state's `reset()` keeps the key.
pub trait Hmac: Send + Sync {
  /// New HMAC state keyed with `key` over `hash`.
  fn new_hmac(&self, hash: HashKind, key: &[u8]) -> Result<Box<dyn Digest>, CryptoError>;
}
