//! Example engine distributed as a shared library.
//!
//! Serves `aes` and `sha2` with the default implementations while counting
//! how often it is asked. Everything else falls back to the host's defaults.
//!
//! Build it and point the host at the resulting library:
//!
//! ```text
//! cargo build -p sample-engine --release
//! PLUGCRYPTO_ENGINE=target/release/libsample_engine.so my-app
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

use std::sync::atomic::{AtomicU64, Ordering};

use plugcrypto::{AesCipher, Block, CryptoError, Digest, Engine, Sha2, native};

/// Name the engine registers under.
pub const NAME: &str = "sample-counting";

static CALLS: AtomicU64 = AtomicU64::new(0);

/// Number of operations this engine has served in this process.
#[must_use]
pub fn calls() -> u64 {
  CALLS.load(Ordering::Relaxed)
}

fn served(op: &'static str) {
  let n = CALLS.fetch_add(1, Ordering::Relaxed) + 1;
  tracing::trace!(engine = NAME, op, calls = n, "served");
}

struct CountingAes;

impl AesCipher for CountingAes {
  fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
    served("aes/new_cipher");
    native::NativeAes.new_cipher(key)
  }
}

struct CountingSha2;

impl Sha2 for CountingSha2 {
  fn new_sha224(&self) -> Box<dyn Digest> {
    served("sha2/new_sha224");
    native::NativeSha2.new_sha224()
  }

  fn new_sha256(&self) -> Box<dyn Digest> {
    served("sha2/new_sha256");
    native::NativeSha2.new_sha256()
  }

  fn new_sha384(&self) -> Box<dyn Digest> {
    served("sha2/new_sha384");
    native::NativeSha2.new_sha384()
  }

  fn new_sha512(&self) -> Box<dyn Digest> {
    served("sha2/new_sha512");
    native::NativeSha2.new_sha512()
  }

  fn sum224(&self, data: &[u8]) -> [u8; 28] {
    served("sha2/sum224");
    native::NativeSha2.sum224(data)
  }

  fn sum256(&self, data: &[u8]) -> [u8; 32] {
    served("sha2/sum256");
    native::NativeSha2.sum256(data)
  }

  fn sum384(&self, data: &[u8]) -> [u8; 48] {
    served("sha2/sum384");
    native::NativeSha2.sum384(data)
  }

  fn sum512(&self, data: &[u8]) -> [u8; 64] {
    served("sha2/sum512");
    native::NativeSha2.sum512(data)
  }
}

/// Construct the engine. Also what the exported entry point calls.
#[must_use]
pub fn build() -> Engine {
  Engine::builder(NAME).aes(CountingAes).sha2(CountingSha2).build()
}

plugcrypto::export_engine!(build => [Aes, Sha2]);
