//! AES (FIPS 197) via the `aes` crate.

use ::aes::{
  Aes128, Aes192, Aes256,
  cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray},
};
use traits::{AesCipher, Block, CryptoError, KeySizeError};

/// AES block size in bytes.
pub const BLOCK_SIZE: usize = 16;

const ALGORITHM: &str = "crypto/aes";

/// Validate an AES key: 16, 24, or 32 bytes.
#[inline]
pub fn check_key(key: &[u8]) -> Result<(), KeySizeError> {
  match key.len() {
    16 | 24 | 32 => Ok(()),
    len => Err(KeySizeError::new(ALGORITHM, len)),
  }
}

enum Keyed {
  Aes128(Aes128),
  Aes192(Aes192),
  Aes256(Aes256),
}

/// Keyed AES instance.
pub struct AesBlock(Keyed);

impl Block for AesBlock {
  fn block_size(&self) -> usize {
    BLOCK_SIZE
  }

  fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
    CryptoError::check_block(BLOCK_SIZE, block.len())?;
    let block = GenericArray::from_mut_slice(block);
    match &self.0 {
      Keyed::Aes128(c) => c.encrypt_block(block),
      Keyed::Aes192(c) => c.encrypt_block(block),
      Keyed::Aes256(c) => c.encrypt_block(block),
    }
    Ok(())
  }

  fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
    CryptoError::check_block(BLOCK_SIZE, block.len())?;
    let block = GenericArray::from_mut_slice(block);
    match &self.0 {
      Keyed::Aes128(c) => c.decrypt_block(block),
      Keyed::Aes192(c) => c.decrypt_block(block),
      Keyed::Aes256(c) => c.decrypt_block(block),
    }
    Ok(())
  }
}

impl std::fmt::Debug for AesBlock {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let bits = match self.0 {
      Keyed::Aes128(_) => 128,
      Keyed::Aes192(_) => 192,
      Keyed::Aes256(_) => 256,
    };
    f.debug_struct("AesBlock").field("key_bits", &bits).finish_non_exhaustive()
  }
}

/// Default `aes` capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeAes;

impl AesCipher for NativeAes {
  fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
    check_key(key)?;
    let invalid = |_| KeySizeError::new(ALGORITHM, key.len());
    let keyed = match key.len() {
      16 => Keyed::Aes128(Aes128::new_from_slice(key).map_err(invalid)?),
      24 => Keyed::Aes192(Aes192::new_from_slice(key).map_err(invalid)?),
      _ => Keyed::Aes256(Aes256::new_from_slice(key).map_err(invalid)?),
    };
    Ok(Box::new(AesBlock(keyed)))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  // FIPS 197, Appendix C.1.
  const KEY: [u8; 16] = [0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f];
  const PLAIN: [u8; 16] = [0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff];
  const CIPHER: [u8; 16] = [0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5, 0x5a];

  #[test]
  fn fips197_aes128() {
    let block = NativeAes.new_cipher(&KEY).expect("16-byte key");
    let mut buf = PLAIN;
    block.encrypt_block(&mut buf).expect("one block");
    assert_eq!(buf, CIPHER);
    block.decrypt_block(&mut buf).expect("one block");
    assert_eq!(buf, PLAIN);
  }

  #[test]
  fn key_sizes() {
    for len in [16, 24, 32] {
      assert!(check_key(&vec![0u8; len]).is_ok(), "len {len}");
    }
    for len in [0, 1, 10, 15, 17, 31, 33, 64] {
      assert_eq!(check_key(&vec![0u8; len]), Err(KeySizeError::new(ALGORITHM, len)));
    }
  }

  #[test]
  fn invalid_key_is_rejected_by_constructor() {
    let err = NativeAes.new_cipher(&[0u8; 10]).expect_err("10-byte key");
    assert!(matches!(err, CryptoError::KeySize(e) if e.len() == 10));
  }

  #[test]
  fn wrong_block_length() {
    let block = NativeAes.new_cipher(&[0u8; 32]).expect("32-byte key");
    let mut short = [0u8; 15];
    assert!(matches!(block.encrypt_block(&mut short), Err(CryptoError::BlockLength { expected: 16, got: 15 })));
    let mut long = [0u8; 17];
    assert!(matches!(block.decrypt_block(&mut long), Err(CryptoError::BlockLength { expected: 16, got: 17 })));
  }

  #[test]
  fn debug_reports_key_bits() {
    let block = NativeAes.new_cipher(&[0u8; 24]).expect("24-byte key");
    assert_eq!(block.block_size(), BLOCK_SIZE);
    assert!(format!("{block:?}").starts_with("Block"));
  }
}
