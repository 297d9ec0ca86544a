//! SHA-224, SHA-256, SHA-384 and SHA-512.
//!
//! Streaming states come from `new_*`; one-shot digests from `sum*`. Both go
//! through the active engine's `sha2` capability when it has one.
//!
//! ```
//! use plugcrypto::sha2;
//!
//! let mut state = sha2::new_sha256();
//! state.update(b"hello ");
//! state.update(b"world");
//! assert_eq!(state.finalize(), sha2::sum256(b"hello world"));
//! ```

use backend::{Capability, Dispatcher, Engine};
use traits::{Digest, HashKind, Sha2};

use crate::native::NativeSha2;

static SHA2: Dispatcher<dyn Sha2> = Dispatcher::new(Capability::Sha2, Engine::sha2, &NativeSha2);

/// Output size of SHA-224 in bytes.
pub const SIZE224: usize = HashKind::Sha224.output_size();
/// Output size of SHA-256 in bytes.
pub const SIZE256: usize = HashKind::Sha256.output_size();
/// Output size of SHA-384 in bytes.
pub const SIZE384: usize = HashKind::Sha384.output_size();
/// Output size of SHA-512 in bytes.
pub const SIZE512: usize = HashKind::Sha512.output_size();

/// New SHA-224 state.
#[must_use]
pub fn new_sha224() -> Box<dyn Digest> {
  SHA2.call(|sha2| sha2.new_sha224())
}

/// New SHA-256 state.
#[must_use]
pub fn new_sha256() -> Box<dyn Digest> {
  SHA2.call(|sha2| sha2.new_sha256())
}

/// New SHA-384 state.
#[must_use]
pub fn new_sha384() -> Box<dyn Digest> {
  SHA2.call(|sha2| sha2.new_sha384())
}

/// New SHA-512 state.
#[must_use]
pub fn new_sha512() -> Box<dyn Digest> {
  SHA2.call(|sha2| sha2.new_sha512())
}

/// New state for `kind`.
#[must_use]
pub fn new(kind: HashKind) -> Box<dyn Digest> {
  match kind {
    HashKind::Sha224 => new_sha224(),
    HashKind::Sha256 => new_sha256(),
    HashKind::Sha384 => new_sha384(),
    HashKind::Sha512 => new_sha512(),
  }
}

/// SHA-224 of `data`.
#[must_use]
pub fn sum224(data: &[u8]) -> [u8; SIZE224] {
  SHA2.call(|sha2| sha2.sum224(data))
}

/// SHA-256 of `data`.
#[must_use]
pub fn sum256(data: &[u8]) -> [u8; SIZE256] {
  SHA2.call(|sha2| sha2.sum256(data))
}

/// SHA-384 of `data`.
#[must_use]
pub fn sum384(data: &[u8]) -> [u8; SIZE384] {
  SHA2.call(|sha2| sha2.sum384(data))
}

/// SHA-512 of `data`.
#[must_use]
pub fn sum512(data: &[u8]) -> [u8; SIZE512] {
  SHA2.call(|sha2| sha2.sum512(data))
}
