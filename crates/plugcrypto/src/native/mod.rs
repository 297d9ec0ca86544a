//! Default implementations.
//!
//! These are what every facade operation falls back to when no engine is
//! registered or the engine lacks the capability. Each one implements the
//! same contract trait an engine would, backed by the RustCrypto crates.
//!
//! They are public so engines can wrap or partially reuse them.

pub mod aes;
pub mod des;
pub mod hmac;
pub mod sha2;
pub mod tls;

use backend::Engine;

pub use self::{aes::NativeAes, des::NativeDes, hmac::NativeHmac, sha2::NativeSha2, tls::NativeTlsPrf};

/// An engine made of the default implementations, covering every capability.
///
/// Registering it changes no results; it is useful as a baseline when
/// measuring dispatch overhead and as a starting point for wrapping engines.
#[must_use]
pub fn engine() -> Engine {
  Engine::builder("native")
    .aes(NativeAes)
    .des(NativeDes)
    .sha2(NativeSha2)
    .hmac(NativeHmac)
    .tls_prf(NativeTlsPrf)
    .build()
}

#[cfg(test)]
mod tests {
  use backend::CapabilitySet;

  #[test]
  fn native_engine_covers_everything() {
    let engine = super::engine();
    assert_eq!(engine.name(), "native");
    assert_eq!(engine.capabilities(), CapabilitySet::ALL);
  }
}
