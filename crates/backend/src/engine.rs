//! Engines: partial sets of capability implementations.
//!
//! An [`Engine`] is an explicit mapping from [`Capability`] to an optional
//! implementation. It is immutable once built, so a snapshot of it can be
//! shared freely between threads.
//!
//! ```
//! use std::sync::Arc;
//!
//! use backend::{Capability, Engine};
//!
//! let engine = Engine::builder("noop").build();
//! assert!(engine.capability(Capability::Aes).is_none());
//! assert!(engine.capabilities().is_empty());
//! ```

use std::{borrow::Cow, fmt};

use traits::{AesCipher, DesCipher, Hmac, Sha2, TlsPrf};

use crate::capability::{Capability, CapabilitySet};

/// Borrowed implementation of one capability.
#[derive(Clone, Copy)]
#[non_exhaustive]
pub enum CapabilityRef<'a> {
  /// The `aes` capability.
  Aes(&'a dyn AesCipher),
  /// The `des` capability.
  Des(&'a dyn DesCipher),
  /// The `sha2` capability.
  Sha2(&'a dyn Sha2),
  /// The `hmac` capability.
  Hmac(&'a dyn Hmac),
  /// The `tls-prf` capability.
  TlsPrf(&'a dyn TlsPrf),
}

impl CapabilityRef<'_> {
  /// Which capability this is.
  #[must_use]
  pub const fn capability(&self) -> Capability {
    match self {
      Self::Aes(_) => Capability::Aes,
      Self::Des(_) => Capability::Des,
      Self::Sha2(_) => Capability::Sha2,
      Self::Hmac(_) => Capability::Hmac,
      Self::TlsPrf(_) => Capability::TlsPrf,
    }
  }
}

impl fmt::Debug for CapabilityRef<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("CapabilityRef").field(&self.capability()).finish()
  }
}

/// A named, immutable set of capability implementations.
pub struct Engine {
  name: Cow<'static, str>,
  aes: Option<Box<dyn AesCipher>>,
  des: Option<Box<dyn DesCipher>>,
  sha2: Option<Box<dyn Sha2>>,
  hmac: Option<Box<dyn Hmac>>,
  tls_prf: Option<Box<dyn TlsPrf>>,
}

impl Engine {
  /// Start building an engine called `name`.
  #[must_use]
  pub fn builder(name: impl Into<Cow<'static, str>>) -> EngineBuilder {
    EngineBuilder {
      engine: Self { name: name.into(), aes: None, des: None, sha2: None, hmac: None, tls_prf: None },
    }
  }

  /// Display name.
  #[inline]
  #[must_use]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Look up a capability. Absence is a normal outcome, not an error.
  #[must_use]
  #[allow(clippy::redundant_closure)] // closures shorten the `'static` object bound
  pub fn capability(&self, cap: Capability) -> Option<CapabilityRef<'_>> {
    match cap {
      Capability::Aes => self.aes().map(|imp| CapabilityRef::Aes(imp)),
      Capability::Des => self.des().map(|imp| CapabilityRef::Des(imp)),
      Capability::Sha2 => self.sha2().map(|imp| CapabilityRef::Sha2(imp)),
      Capability::Hmac => self.hmac().map(|imp| CapabilityRef::Hmac(imp)),
      Capability::TlsPrf => self.tls_prf().map(|imp| CapabilityRef::TlsPrf(imp)),
    }
  }

  /// Look up a capability by its stable name (`"aes"`, `"tls-prf"`, ...).
  ///
  /// Unknown names behave like capabilities the engine does not implement.
  #[must_use]
  pub fn capability_by_name(&self, name: &str) -> Option<CapabilityRef<'_>> {
    Capability::from_name(name).and_then(|cap| self.capability(cap))
  }

  /// Whether the engine implements `cap`.
  #[inline]
  #[must_use]
  pub fn supports(&self, cap: Capability) -> bool {
    self.capability(cap).is_some()
  }

  /// Every capability the engine implements.
  #[must_use]
  pub fn capabilities(&self) -> CapabilitySet {
    Capability::ALL.into_iter().filter(|cap| self.supports(*cap)).collect()
  }

  /// The `aes` implementation, if any.
  #[inline]
  #[must_use]
  pub fn aes(&self) -> Option<&(dyn AesCipher + 'static)> {
    self.aes.as_deref()
  }

  /// The `des` implementation, if any.
  #[inline]
  #[must_use]
  pub fn des(&self) -> Option<&(dyn DesCipher + 'static)> {
    self.des.as_deref()
  }

  /// The `sha2` implementation, if any.
  #[inline]
  #[must_use]
  pub fn sha2(&self) -> Option<&(dyn Sha2 + 'static)> {
    self.sha2.as_deref()
  }

  /// The `hmac` implementation, if any.
  #[inline]
  #[must_use]
  pub fn hmac(&self) -> Option<&(dyn Hmac + 'static)> {
    self.hmac.as_deref()
  }

  /// The `tls-prf` implementation, if any.
  #[inline]
  #[must_use]
  pub fn tls_prf(&self) -> Option<&(dyn TlsPrf + 'static)> {
    self.tls_prf.as_deref()
  }
}

impl fmt::Debug for Engine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Engine").field("name", &self.name).field("capabilities", &self.capabilities()).finish()
  }
}

/// Builder for [`Engine`].
///
/// Each method installs one whole capability. Installing the same capability
/// twice keeps the last implementation.
#[must_use = "an engine builder does nothing until `build` is called"]
pub struct EngineBuilder {
  engine: Engine,
}

impl EngineBuilder {
  /// Install the `aes` capability.
  pub fn aes(mut self, imp: impl AesCipher + 'static) -> Self {
    self.engine.aes = Some(Box::new(imp));
    self
  }

  /// Install the `des` capability.
  pub fn des(mut self, imp: impl DesCipher + 'static) -> Self {
    self.engine.des = Some(Box::new(imp));
    self
  }

  /// Install the `sha2` capability.
  pub fn sha2(mut self, imp: impl Sha2 + 'static) -> Self {
    self.engine.sha2 = Some(Box::new(imp));
    self
  }

  /// Install the `hmac` capability.
  pub fn hmac(mut self, imp: impl Hmac + 'static) -> Self {
    self.engine.hmac = Some(Box::new(imp));
    self
  }

  /// Install the `tls-prf` capability.
  pub fn tls_prf(mut self, imp: impl TlsPrf + 'static) -> Self {
    self.engine.tls_prf = Some(Box::new(imp));
    self
  }

  /// Finish the engine.
  #[must_use]
  pub fn build(self) -> Engine {
    self.engine
  }
}

impl fmt::Debug for EngineBuilder {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_tuple("EngineBuilder").field(&self.engine).finish()
  }
}

#[cfg(test)]
pub(crate) mod tests {
  use traits::{Block, CryptoError, Digest, HashKind, KeySizeError};

  use super::*;

  /// Block handle that writes a fixed marker byte over the block.
  pub(crate) struct MarkerBlock(pub u8);

  impl Block for MarkerBlock {
    fn block_size(&self) -> usize {
      16
    }
    fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
      CryptoError::check_block(16, block.len())?;
      block.fill(self.0);
      Ok(())
    }
    fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
      self.encrypt_block(block)
    }
  }

  pub(crate) struct MarkerAes(pub u8);

  impl AesCipher for MarkerAes {
    fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
      if !matches!(key.len(), 16 | 24 | 32) {
        return Err(KeySizeError::new("crypto/aes", key.len()).into());
      }
      Ok(Box::new(MarkerBlock(self.0)))
    }
  }

  pub(crate) struct NoHmac;

  impl Hmac for NoHmac {
    fn new_hmac(&self, hash: HashKind, _key: &[u8]) -> Result<Box<dyn Digest>, CryptoError> {
      Err(CryptoError::UnsupportedHash { operation: "test/hmac", hash })
    }
  }

  #[test]
  fn empty_engine_is_legal() {
    let engine = Engine::builder("noop").build();
    assert_eq!(engine.name(), "noop");
    assert!(engine.capabilities().is_empty());
    for cap in Capability::ALL {
      assert!(engine.capability(cap).is_none());
    }
  }

  #[test]
  fn capability_lookup_is_per_family() {
    let engine = Engine::builder("aes-only").aes(MarkerAes(0xAA)).build();
    assert!(engine.supports(Capability::Aes));
    assert!(!engine.supports(Capability::Des));
    assert!(engine.sha2().is_none());
    assert_eq!(engine.capabilities(), Capability::Aes.bit());
    assert!(matches!(engine.capability(Capability::Aes), Some(CapabilityRef::Aes(_))));
  }

  #[test]
  fn lookup_by_name() {
    let engine = Engine::builder("two").aes(MarkerAes(1)).hmac(NoHmac).build();
    assert_eq!(engine.capability_by_name("HMAC").map(|c| c.capability()), Some(Capability::Hmac));
    assert!(engine.capability_by_name("des").is_none());
    assert!(engine.capability_by_name("rot13").is_none());
  }

  #[test]
  fn delegated_handle_is_the_engines() {
    let engine = Engine::builder("marker").aes(MarkerAes(0x5C)).build();
    let aes = engine.aes().expect("aes installed");
    let block = aes.new_cipher(&[0u8; 16]).expect("valid key");
    let mut buf = [0u8; 16];
    block.encrypt_block(&mut buf).expect("one block");
    assert_eq!(buf, [0x5C; 16]);
  }

  #[test]
  fn debug_shows_capabilities() {
    let engine = Engine::builder("dbg").aes(MarkerAes(0)).build();
    let dbg = format!("{engine:?}");
    assert!(dbg.contains("\"dbg\""));
    assert!(dbg.contains("aes"));
  }
}
