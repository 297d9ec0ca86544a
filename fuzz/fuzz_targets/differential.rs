//! Differential fuzzing of the block ciphers against the RustCrypto crates.
//!
//! The first input byte picks a key length, so invalid lengths are exercised
//! too: they must be rejected exactly when the reference rejects them.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plugcrypto::{CryptoError, aes, des};

fuzz_target!(|data: &[u8]| {
  let Some((&selector, rest)) = data.split_first() else {
    return;
  };
  let key_len = usize::from(selector % 40);
  if rest.len() < key_len {
    return;
  }
  let (key, tail) = rest.split_at(key_len);

  test_aes(key, tail);
  test_des(key, tail);
});

fn test_aes(key: &[u8], tail: &[u8]) {
  use ::aes::cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray};

  let ours = aes::new_cipher(key);
  if !matches!(key.len(), 16 | 24 | 32) {
    assert!(matches!(ours, Err(CryptoError::KeySize(e)) if e.len() == key.len()), "AES accepted {} bytes", key.len());
    return;
  }
  let ours = ours.expect("valid AES key");

  for chunk in tail.chunks_exact(aes::BLOCK_SIZE) {
    let mut a = [0u8; 16];
    a.copy_from_slice(chunk);
    ours.encrypt_block(&mut a).expect("one block");

    let mut b = GenericArray::clone_from_slice(chunk);
    match key.len() {
      16 => ::aes::Aes128::new_from_slice(key).expect("16").encrypt_block(&mut b),
      24 => ::aes::Aes192::new_from_slice(key).expect("24").encrypt_block(&mut b),
      _ => ::aes::Aes256::new_from_slice(key).expect("32").encrypt_block(&mut b),
    }
    assert_eq!(&a[..], &b[..], "AES differential mismatch, key_len={}", key.len());

    ours.decrypt_block(&mut a).expect("one block");
    assert_eq!(&a[..], chunk, "AES round trip mismatch");
  }
}

fn test_des(key: &[u8], tail: &[u8]) {
  use ::des::cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray};

  let single = des::new_cipher(key);
  let triple = des::new_triple_des_cipher(key);
  assert_eq!(single.is_ok(), key.len() == 8);
  assert_eq!(triple.is_ok(), key.len() == 24);

  if let Ok(ours) = triple {
    let reference = ::des::TdesEde3::new_from_slice(key).expect("24");
    for chunk in tail.chunks_exact(des::BLOCK_SIZE) {
      let mut a = [0u8; 8];
      a.copy_from_slice(chunk);
      ours.encrypt_block(&mut a).expect("one block");
      let mut b = GenericArray::clone_from_slice(chunk);
      reference.encrypt_block(&mut b);
      assert_eq!(&a[..], &b[..], "3DES differential mismatch");
    }
  }
}
