//! Streaming vs one-shot consistency for SHA-2 and HMAC, checked against the
//! reference crates.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plugcrypto::{HashKind, hmac, sha2};

fuzz_target!(|data: &[u8]| {
  let Some((&split, rest)) = data.split_first() else {
    return;
  };
  let split = usize::from(split) % (rest.len() + 1);
  let (head, tail) = rest.split_at(split);

  for kind in HashKind::ALL {
    let mut state = sha2::new(kind);
    state.update(head);
    state.update(tail);
    let streamed = state.finalize();
    assert_eq!(streamed, reference_sha2(kind, rest), "{kind} streaming mismatch, split={split}");

    // Key on the head, authenticate the tail.
    let mut mac = hmac::new(kind, head).expect("any key");
    mac.update(tail);
    let tag = mac.finalize();
    assert_eq!(tag, reference_hmac(kind, head, tail), "HMAC-{kind} mismatch");
    mac.reset();
    mac.update(tail);
    assert!(hmac::equal(&mac.finalize(), &tag), "HMAC-{kind} reset mismatch");
  }
});

fn reference_sha2(kind: HashKind, data: &[u8]) -> Vec<u8> {
  use ::sha2::Digest as _;
  match kind {
    HashKind::Sha224 => ::sha2::Sha224::digest(data).to_vec(),
    HashKind::Sha256 => ::sha2::Sha256::digest(data).to_vec(),
    HashKind::Sha384 => ::sha2::Sha384::digest(data).to_vec(),
    HashKind::Sha512 => ::sha2::Sha512::digest(data).to_vec(),
  }
}

fn reference_hmac(kind: HashKind, key: &[u8], data: &[u8]) -> Vec<u8> {
  use ::hmac::{Hmac, Mac, digest::KeyInit};
  fn run<M: Mac + KeyInit>(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("any key");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
  }
  match kind {
    HashKind::Sha224 => run::<Hmac<::sha2::Sha224>>(key, data),
    HashKind::Sha256 => run::<Hmac<::sha2::Sha256>>(key, data),
    HashKind::Sha384 => run::<Hmac<::sha2::Sha384>>(key, data),
    HashKind::Sha512 => run::<Hmac<::sha2::Sha512>>(key, data),
  }
}
