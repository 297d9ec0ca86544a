//! The exported entry point, exercised in-process the way a host would after
//! resolving the symbol.

use backend::plugin::{self, ABI_VERSION, PluginDescriptor};
use plugcrypto::{Capability, CapabilitySet, aes, sha2};

fn descriptor() -> *const PluginDescriptor {
  sample_engine::plugcrypto_engine_entry()
}

#[test]
fn descriptor_claims_aes_and_sha2() {
  // SAFETY: The entry point returns a pointer to a static descriptor.
  let descriptor = unsafe { &*descriptor() };
  assert_eq!(descriptor.abi_version(), ABI_VERSION);
  assert_eq!(descriptor.claimed(), CapabilitySet::of(&[Capability::Aes, Capability::Sha2]));
}

#[test]
fn host_accepts_and_routes_through_the_engine() {
  // SAFETY: The descriptor is static and its constructor is linked into this
  // test binary, so it outlives the engine.
  let engine = unsafe { plugin::accept(descriptor()) }.expect("compatible plugin");
  assert_eq!(engine.name(), sample_engine::NAME);
  assert!(engine.supports(Capability::Aes));
  assert!(!engine.supports(Capability::Hmac));

  plugcrypto::register(engine).expect("nothing else registers in this binary");
  let before = sample_engine::calls();

  let cipher = aes::new_cipher(&[7u8; 32]).expect("32-byte key");
  let digest = sha2::sum384(b"plugin");
  let mut hmac = plugcrypto::hmac::new(plugcrypto::HashKind::Sha256, b"k").expect("any key");
  hmac.update(b"m");

  assert_eq!(sample_engine::calls() - before, 2);
  plugcrypto::unregister();

  // Same answers as the defaults.
  let mut a = [1u8; 16];
  let mut b = [1u8; 16];
  cipher.encrypt_block(&mut a).expect("one block");
  aes::new_cipher(&[7u8; 32]).expect("32-byte key").encrypt_block(&mut b).expect("one block");
  assert_eq!(a, b);
  assert_eq!(digest, sha2::sum384(b"plugin"));
}
