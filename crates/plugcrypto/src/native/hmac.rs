//! HMAC (RFC 2104) over the SHA-2 family via the `hmac` crate.

use ::hmac::{Hmac as HmacCore, Mac, digest::KeyInit};
use ::sha2::{Sha224, Sha256, Sha384, Sha512};
use traits::{CryptoError, Digest, HashKind, Hmac, KeySizeError};

const ALGORITHM: &str = "crypto/hmac";

/// Keyed MAC state. `reset` goes back to the keyed initial state.
struct State<M> {
  initial: M,
  inner: M,
  kind: HashKind,
}

impl<M> State<M>
where
  M: Mac + KeyInit + Clone + Send + 'static,
{
  // Keys of any length are accepted; longer ones are hashed first.
  fn boxed(kind: HashKind, key: &[u8]) -> Result<Box<dyn Digest>, KeySizeError> {
    let initial = <M as KeyInit>::new_from_slice(key).map_err(|_| KeySizeError::new(ALGORITHM, key.len()))?;
    Ok(Box::new(Self { inner: initial.clone(), initial, kind }))
  }
}

impl<M> Digest for State<M>
where
  M: Mac + KeyInit + Clone + Send + 'static,
{
  fn output_size(&self) -> usize {
    self.kind.output_size()
  }

  fn block_size(&self) -> usize {
    self.kind.block_size()
  }

  fn update(&mut self, data: &[u8]) {
    Mac::update(&mut self.inner, data);
  }

  fn finalize(&self) -> Vec<u8> {
    self.inner.clone().finalize().into_bytes().to_vec()
  }

  fn reset(&mut self) {
    self.inner = self.initial.clone();
  }
}

/// Default `hmac` capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeHmac;

impl NativeHmac {
  pub(crate) fn keyed(hash: HashKind, key: &[u8]) -> Result<Box<dyn Digest>, KeySizeError> {
    match hash {
      HashKind::Sha224 => State::<HmacCore<Sha224>>::boxed(hash, key),
      HashKind::Sha256 => State::<HmacCore<Sha256>>::boxed(hash, key),
      HashKind::Sha384 => State::<HmacCore<Sha384>>::boxed(hash, key),
      HashKind::Sha512 => State::<HmacCore<Sha512>>::boxed(hash, key),
    }
  }
}

impl Hmac for NativeHmac {
  fn new_hmac(&self, hash: HashKind, key: &[u8]) -> Result<Box<dyn Digest>, CryptoError> {
    Ok(Self::keyed(hash, key)?)
  }
}
