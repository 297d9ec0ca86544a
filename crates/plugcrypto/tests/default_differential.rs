//! With no engine registered, every facade operation must match the
//! RustCrypto oracles byte for byte.

use plugcrypto::{CryptoError, HashKind, aes, des, hmac, sha2, tls};
use proptest::prelude::*;

fn aes_ref(key: &[u8], block: [u8; 16]) -> [u8; 16] {
  use ::aes::cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray};
  let mut buf = GenericArray::clone_from_slice(&block);
  match key.len() {
    16 => ::aes::Aes128::new_from_slice(key).expect("16").encrypt_block(&mut buf),
    24 => ::aes::Aes192::new_from_slice(key).expect("24").encrypt_block(&mut buf),
    32 => ::aes::Aes256::new_from_slice(key).expect("32").encrypt_block(&mut buf),
    n => panic!("bad oracle key length {n}"),
  }
  let mut out = [0u8; 16];
  out.copy_from_slice(&buf);
  out
}

fn tdes_ref(key: &[u8], block: [u8; 8]) -> [u8; 8] {
  use ::des::cipher::{BlockEncrypt, KeyInit, generic_array::GenericArray};
  let mut buf = GenericArray::clone_from_slice(&block);
  ::des::TdesEde3::new_from_slice(key).expect("24").encrypt_block(&mut buf);
  let mut out = [0u8; 8];
  out.copy_from_slice(&buf);
  out
}

fn hmac_ref(hash: HashKind, key: &[u8], data: &[u8]) -> Vec<u8> {
  use ::hmac::{Hmac, Mac};
  fn run<M: Mac + ::hmac::digest::KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <M as ::hmac::digest::KeyInit>::new_from_slice(key).expect("any key");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
  }
  match hash {
    HashKind::Sha224 => run::<Hmac<::sha2::Sha224>>(key, data),
    HashKind::Sha256 => run::<Hmac<::sha2::Sha256>>(key, data),
    HashKind::Sha384 => run::<Hmac<::sha2::Sha384>>(key, data),
    HashKind::Sha512 => run::<Hmac<::sha2::Sha512>>(key, data),
  }
}

// Straight-line P_hash with a fresh MAC per step.
fn prf_ref(hash: HashKind, secret: &[u8], label: &[u8], seed: &[u8], len: usize) -> Vec<u8> {
  let full_seed = [label, seed].concat();
  let mut a = hmac_ref(hash, secret, &full_seed);
  let mut out = Vec::with_capacity(len);
  while out.len() < len {
    out.extend(hmac_ref(hash, secret, &[&a[..], &full_seed[..]].concat()));
    a = hmac_ref(hash, secret, &a);
  }
  out.truncate(len);
  out
}

fn aes_key() -> impl Strategy<Value = Vec<u8>> {
  prop_oneof![
    proptest::collection::vec(any::<u8>(), 16),
    proptest::collection::vec(any::<u8>(), 24),
    proptest::collection::vec(any::<u8>(), 32),
  ]
}

fn hash_kind() -> impl Strategy<Value = HashKind> {
  prop_oneof![Just(HashKind::Sha224), Just(HashKind::Sha256), Just(HashKind::Sha384), Just(HashKind::Sha512)]
}

#[test]
fn no_engine_is_registered() {
  assert!(plugcrypto::current().is_none());
}

#[test]
fn aes128_fips197() {
  let key: Vec<u8> = (0u8..16).collect();
  let mut block = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
  aes::new_cipher(&key).expect("16-byte key").encrypt_block(&mut block).expect("one block");
  assert_eq!(block, [0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5, 0x5a]);
}

#[test]
fn invalid_keys_fail_validation() {
  let err = aes::new_cipher(&[0u8; 10]).expect_err("10-byte AES key");
  assert_eq!(err.to_string(), "crypto/aes: invalid key size 10");

  let err = des::new_cipher(&[0u8; 16]).expect_err("16-byte DES key");
  assert!(matches!(err, CryptoError::KeySize(e) if e.algorithm() == "crypto/des" && e.len() == 16));

  let err = des::new_triple_des_cipher(&[0u8; 8]).expect_err("8-byte 3DES key");
  assert!(matches!(err, CryptoError::KeySize(e) if e.len() == 8));

  let err = tls::prf(HashKind::Sha512, b"s", b"l", b"s", &mut [0u8; 4]).expect_err("SHA-512 PRF");
  assert!(matches!(err, CryptoError::UnsupportedHash { hash: HashKind::Sha512, .. }));
}

proptest! {
  #[test]
  fn aes_matches_oracle(key in aes_key(), block in any::<[u8; 16]>()) {
    let cipher = aes::new_cipher(&key).expect("valid key");
    let mut buf = block;
    cipher.encrypt_block(&mut buf).expect("one block");
    prop_assert_eq!(buf, aes_ref(&key, block));

    cipher.decrypt_block(&mut buf).expect("one block");
    prop_assert_eq!(buf, block);
  }

  #[test]
  fn aes_rejects_every_other_key_length(len in 0usize..64) {
    prop_assume!(![16, 24, 32].contains(&len));
    let err = aes::new_cipher(&vec![0u8; len]).expect_err("invalid length");
    prop_assert!(matches!(err, CryptoError::KeySize(e) if e.len() == len));
  }

  #[test]
  fn triple_des_matches_oracle(key in proptest::collection::vec(any::<u8>(), 24), block in any::<[u8; 8]>()) {
    let cipher = des::new_triple_des_cipher(&key).expect("24-byte key");
    let mut buf = block;
    cipher.encrypt_block(&mut buf).expect("one block");
    prop_assert_eq!(buf, tdes_ref(&key, block));
  }

  #[test]
  fn sha2_one_shot_matches_oracle(data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    use ::sha2::Digest as _;
    prop_assert_eq!(sha2::sum224(&data).to_vec(), ::sha2::Sha224::digest(&data).to_vec());
    prop_assert_eq!(sha2::sum256(&data).to_vec(), ::sha2::Sha256::digest(&data).to_vec());
    prop_assert_eq!(sha2::sum384(&data).to_vec(), ::sha2::Sha384::digest(&data).to_vec());
    prop_assert_eq!(sha2::sum512(&data).to_vec(), ::sha2::Sha512::digest(&data).to_vec());
  }

  #[test]
  fn sha2_streaming_matches_one_shot(kind in hash_kind(), data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    let mut state = sha2::new(kind);
    let mut i = 0usize;
    while i < data.len() {
      let step = (data[i] as usize % 97) + 1;
      let end = core::cmp::min(data.len(), i + step);
      state.update(&data[i..end]);
      i = end;
    }
    let expected = match kind {
      HashKind::Sha224 => sha2::sum224(&data).to_vec(),
      HashKind::Sha256 => sha2::sum256(&data).to_vec(),
      HashKind::Sha384 => sha2::sum384(&data).to_vec(),
      HashKind::Sha512 => sha2::sum512(&data).to_vec(),
    };
    prop_assert_eq!(state.finalize(), expected);
  }

  #[test]
  fn hmac_matches_oracle(
    kind in hash_kind(),
    key in proptest::collection::vec(any::<u8>(), 0..300),
    data in proptest::collection::vec(any::<u8>(), 0..2048),
  ) {
    let mut mac = hmac::new(kind, &key).expect("any key");
    mac.update(&data);
    let tag = mac.finalize();
    prop_assert_eq!(&tag, &hmac_ref(kind, &key, &data));

    mac.reset();
    mac.update(&data);
    prop_assert!(hmac::equal(&mac.finalize(), &tag));
  }

  #[test]
  fn tls_prf_matches_oracle(
    sha384 in any::<bool>(),
    secret in proptest::collection::vec(any::<u8>(), 0..64),
    label in proptest::collection::vec(any::<u8>(), 0..32),
    seed in proptest::collection::vec(any::<u8>(), 0..64),
    len in 0usize..300,
  ) {
    let hash = if sha384 { HashKind::Sha384 } else { HashKind::Sha256 };
    let mut out = vec![0u8; len];
    tls::prf(hash, &secret, &label, &seed, &mut out).expect("allowed hash");
    prop_assert_eq!(out, prf_ref(hash, &secret, &label, &seed, len));
  }
}
