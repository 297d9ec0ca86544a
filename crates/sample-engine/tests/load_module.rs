//! Loading the built shared library through the real loader.
//!
//! The library is looked up next to this test binary (`target/<profile>/` or
//! its `deps/`). If it has not been built the test says so and returns.

use std::{
  env::consts::{DLL_PREFIX, DLL_SUFFIX},
  path::PathBuf,
};

use plugcrypto::{Capability, HashKind, LoadError, Route, aes, backend_for, sha2};

const ENGINE_NAME: &str = "sample-counting";

fn built_module() -> Option<PathBuf> {
  let exe = std::env::current_exe().ok()?;
  let deps = exe.parent()?;
  let file = format!("{DLL_PREFIX}sample_engine{DLL_SUFFIX}");
  [deps.to_path_buf(), deps.parent()?.to_path_buf()].into_iter().map(|dir| dir.join(&file)).find(|p| p.is_file())
}

fn active_name() -> Option<String> {
  plugcrypto::current().map(|engine| engine.name().to_owned())
}

fn encrypt(cipher: &dyn plugcrypto::Block, block: [u8; 16]) -> [u8; 16] {
  let mut buf = block;
  cipher.encrypt_block(&mut buf).expect("one block");
  buf
}

#[test]
fn load_register_route_and_retain() {
  let Some(module) = built_module() else {
    eprintln!("skipping: {DLL_PREFIX}sample_engine{DLL_SUFFIX} not found next to the test binary");
    return;
  };
  plugcrypto::unregister();

  // Default answers, taken before any engine exists.
  let key = [0x3cu8; 24];
  let plain = [0x5au8; 16];
  let default_ct = encrypt(aes::new_cipher(&key).expect("24-byte key").as_ref(), plain);
  let default_digest = sha2::sum256(b"module");

  plugcrypto::load_and_register(&module).expect("sample engine loads");
  assert_eq!(active_name().as_deref(), Some(ENGINE_NAME));

  for cap in [Capability::Aes, Capability::Sha2] {
    assert_eq!(backend_for(cap), Route::Engine(ENGINE_NAME.into()), "{cap}");
  }
  for cap in [Capability::Des, Capability::Hmac, Capability::TlsPrf] {
    assert_eq!(backend_for(cap), Route::Default, "{cap}");
  }

  // The engine wraps the defaults, so results match them.
  let cipher = aes::new_cipher(&key).expect("24-byte key");
  assert_eq!(sha2::sum256(b"module"), default_digest);
  let mut mac = plugcrypto::hmac::new(HashKind::Sha256, b"k").expect("any key");
  mac.update(b"m");

  // A handle built by the module stays usable after unregister.
  plugcrypto::unregister();
  assert!(plugcrypto::current().is_none());
  assert_eq!(encrypt(cipher.as_ref(), plain), default_ct);

  // Reloading works, and loading on top of an active engine is rejected
  // without touching it.
  plugcrypto::load_and_register(&module).expect("reload after unregister");
  let err = plugcrypto::load_and_register(&module).expect_err("slot is taken");
  match &err {
    LoadError::Registration(conflict) => {
      assert_eq!(conflict.active(), ENGINE_NAME);
      assert_eq!(conflict.rejected(), ENGINE_NAME);
    }
    other => panic!("expected a registration conflict, got {other:?}"),
  }
  assert_eq!(active_name().as_deref(), Some(ENGINE_NAME));
  assert_eq!(backend_for(Capability::Aes), Route::Engine(ENGINE_NAME.into()));

  // Two successful registrations of one module keep a single entry.
  let canonical = std::fs::canonicalize(&module).expect("module exists");
  let retained = backend::retained_modules();
  assert_eq!(retained.iter().filter(|path| **path == canonical).count(), 1);

  plugcrypto::unregister();
}
