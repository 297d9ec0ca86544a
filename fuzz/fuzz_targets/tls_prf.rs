//! TLS 1.2 PRF: hash validation and prefix consistency.

#![no_main]

use libfuzzer_sys::fuzz_target;
use plugcrypto::{CryptoError, HashKind, tls};

fuzz_target!(|data: &[u8]| {
  let Some((&control, rest)) = data.split_first() else {
    return;
  };
  let hash = HashKind::ALL[usize::from(control & 3)];
  let out_len = usize::from(control >> 2) * 3;
  let third = rest.len() / 3;
  let (secret, rest) = rest.split_at(third);
  let (label, seed) = rest.split_at(third);

  let mut long = vec![0u8; out_len + 17];
  let result = tls::prf(hash, secret, label, seed, &mut long);
  if !matches!(hash, HashKind::Sha256 | HashKind::Sha384) {
    assert!(matches!(result, Err(CryptoError::UnsupportedHash { .. })), "{hash} accepted");
    return;
  }
  result.expect("allowed hash");

  let mut short = vec![0u8; out_len];
  tls::prf(hash, secret, label, seed, &mut short).expect("allowed hash");
  assert_eq!(&long[..out_len], &short[..], "PRF output is not prefix-consistent");
});
