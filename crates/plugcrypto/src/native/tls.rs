//! TLS 1.2 pseudo-random function (RFC 5246, section 5).

use traits::{CryptoError, Digest, HashKind, TlsPrf, is_prf_hash};

use super::hmac::NativeHmac;

const OPERATION: &str = "crypto/tls";

/// Validate the PRF hash: only SHA-256 and SHA-384 are defined for TLS 1.2.
#[inline]
pub fn check_hash(hash: HashKind) -> Result<(), CryptoError> {
  if is_prf_hash(hash) { Ok(()) } else { Err(CryptoError::UnsupportedHash { operation: OPERATION, hash }) }
}

/// `P_hash(secret, seed)` written into `out`, where `seed` is the
/// concatenation of `parts`.
///
/// ```text
/// A(0) = seed
/// A(i) = HMAC(secret, A(i-1))
/// out  = HMAC(secret, A(1) + seed) + HMAC(secret, A(2) + seed) + ...
/// ```
fn p_hash(mac: &mut dyn Digest, parts: &[&[u8]], out: &mut [u8]) {
  for part in parts {
    mac.update(part);
  }
  let mut a = mac.finalize();

  for chunk in out.chunks_mut(mac.output_size()) {
    mac.reset();
    mac.update(&a);
    for part in parts {
      mac.update(part);
    }
    let block = mac.finalize();
    for (dst, src) in chunk.iter_mut().zip(&block) {
      *dst = *src;
    }

    mac.reset();
    mac.update(&a);
    a = mac.finalize();
  }
}

/// Default `tls-prf` capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeTlsPrf;

impl TlsPrf for NativeTlsPrf {
  fn prf(&self, hash: HashKind, secret: &[u8], label: &[u8], seed: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
    check_hash(hash)?;
    let mut mac = NativeHmac::keyed(hash, secret)?;
    p_hash(mac.as_mut(), &[label, seed], out);
    Ok(())
  }
}
