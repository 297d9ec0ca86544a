//! Keyed-hash message authentication (RFC 2104) over SHA-2.
//!
//! ```
//! use plugcrypto::{HashKind, hmac};
//!
//! let mut mac = hmac::new(HashKind::Sha256, b"key")?;
//! mac.update(b"message");
//! let tag = mac.finalize();
//! assert!(hmac::equal(&tag, &tag));
//! # Ok::<(), plugcrypto::CryptoError>(())
//! ```

use backend::{Capability, Dispatcher, Engine};
use traits::{CryptoError, Digest, HashKind, Hmac};

use crate::native::NativeHmac;

static HMAC: Dispatcher<dyn Hmac> = Dispatcher::new(Capability::Hmac, Engine::hmac, &NativeHmac);

/// New HMAC state keyed with `key`. Keys of any length are accepted.
pub fn new(hash: HashKind, key: &[u8]) -> Result<Box<dyn Digest>, CryptoError> {
  HMAC.call(|hmac| hmac.new_hmac(hash, key))
}

/// Compare two MACs without leaking where they differ.
///
/// Lengths are not secret: different lengths compare unequal immediately.
#[must_use]
pub fn equal(a: &[u8], b: &[u8]) -> bool {
  if a.len() != b.len() {
    return false;
  }
  let diff = a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y));
  core::hint::black_box(diff) == 0
}
