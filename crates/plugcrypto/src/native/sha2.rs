//! SHA-2 family via the `sha2` crate.

use ::sha2::{Sha224, Sha256, Sha384, Sha512};
use traits::{Digest, HashKind, Sha2};

/// Streaming state over any RustCrypto SHA-2 core.
struct State<D> {
  inner: D,
  kind: HashKind,
}

impl<D> State<D>
where
  D: ::sha2::Digest + Clone + Send + 'static,
{
  fn boxed(kind: HashKind) -> Box<dyn Digest> {
    Box::new(Self { inner: D::new(), kind })
  }
}

impl<D> Digest for State<D>
where
  D: ::sha2::Digest + Clone + Send + 'static,
{
  fn output_size(&self) -> usize {
    self.kind.output_size()
  }

  fn block_size(&self) -> usize {
    self.kind.block_size()
  }

  fn update(&mut self, data: &[u8]) {
    ::sha2::Digest::update(&mut self.inner, data);
  }

  fn finalize(&self) -> Vec<u8> {
    self.inner.clone().finalize().to_vec()
  }

  fn reset(&mut self) {
    self.inner = D::new();
  }
}

#[inline]
fn sum<D: ::sha2::Digest, const N: usize>(data: &[u8]) -> [u8; N] {
  let mut out = [0u8; N];
  out.copy_from_slice(&D::digest(data));
  out
}

/// Default `sha2` capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeSha2;

impl Sha2 for NativeSha2 {
  fn new_sha224(&self) -> Box<dyn Digest> {
    State::<Sha224>::boxed(HashKind::Sha224)
  }

  fn new_sha256(&self) -> Box<dyn Digest> {
    State::<Sha256>::boxed(HashKind::Sha256)
  }

  fn new_sha384(&self) -> Box<dyn Digest> {
    State::<Sha384>::boxed(HashKind::Sha384)
  }

  fn new_sha512(&self) -> Box<dyn Digest> {
    State::<Sha512>::boxed(HashKind::Sha512)
  }

  // One-shot sums skip the boxed state.

  fn sum224(&self, data: &[u8]) -> [u8; 28] {
    sum::<Sha224, 28>(data)
  }

  fn sum256(&self, data: &[u8]) -> [u8; 32] {
    sum::<Sha256, 32>(data)
  }

  fn sum384(&self, data: &[u8]) -> [u8; 48] {
    sum::<Sha384, 48>(data)
  }

  fn sum512(&self, data: &[u8]) -> [u8; 64] {
    sum::<Sha512, 64>(data)
  }
}
