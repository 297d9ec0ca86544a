//! TLS 1.2 pseudo-random function.

use backend::{Capability, Dispatcher, Engine};
use traits::{CryptoError, HashKind, TlsPrf};

use crate::native::{self, NativeTlsPrf};

static PRF: Dispatcher<dyn TlsPrf> = Dispatcher::new(Capability::TlsPrf, Engine::tls_prf, &NativeTlsPrf);

/// Fill `out` with `PRF(secret, label, seed)` using `hash`.
///
/// `hash` must be SHA-256 or SHA-384; anything else fails with
/// [`CryptoError::UnsupportedHash`] before an engine is consulted.
pub fn prf(hash: HashKind, secret: &[u8], label: &[u8], seed: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
  native::tls::check_hash(hash)?;
  PRF.call(|prf| prf.prf(hash, secret, label, seed, out))
}
