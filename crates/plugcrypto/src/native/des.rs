//! DES and TDEA (EDE3) via the `des` crate.

use ::des::{
  Des, TdesEde3,
  cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray},
};
use traits::{Block, CryptoError, DesCipher, KeySizeError};

/// DES block size in bytes.
pub const BLOCK_SIZE: usize = 8;

const ALGORITHM: &str = "crypto/des";

/// Validate a single-DES key: exactly 8 bytes.
#[inline]
pub fn check_key(key: &[u8]) -> Result<(), KeySizeError> {
  if key.len() == 8 { Ok(()) } else { Err(KeySizeError::new(ALGORITHM, key.len())) }
}

/// Validate a triple-DES key: exactly 24 bytes.
#[inline]
pub fn check_triple_key(key: &[u8]) -> Result<(), KeySizeError> {
  if key.len() == 24 { Ok(()) } else { Err(KeySizeError::new(ALGORITHM, key.len())) }
}

enum Keyed {
  Single(Des),
  Triple(TdesEde3),
}

/// Keyed DES or 3DES instance.
pub struct DesBlock(Keyed);

impl Block for DesBlock {
  fn block_size(&self) -> usize {
    BLOCK_SIZE
  }

  fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
    CryptoError::check_block(BLOCK_SIZE, block.len())?;
    let block = GenericArray::from_mut_slice(block);
    match &self.0 {
      Keyed::Single(c) => c.encrypt_block(block),
      Keyed::Triple(c) => c.encrypt_block(block),
    }
    Ok(())
  }

  fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError> {
    CryptoError::check_block(BLOCK_SIZE, block.len())?;
    let block = GenericArray::from_mut_slice(block);
    match &self.0 {
      Keyed::Single(c) => c.decrypt_block(block),
      Keyed::Triple(c) => c.decrypt_block(block),
    }
    Ok(())
  }
}

impl std::fmt::Debug for DesBlock {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let variant = match self.0 {
      Keyed::Single(_) => "des",
      Keyed::Triple(_) => "3des-ede3",
    };
    f.debug_struct("DesBlock").field("variant", &variant).finish_non_exhaustive()
  }
}

/// Default `des` capability.
#[derive(Clone, Copy, Debug, Default)]
pub struct NativeDes;

impl DesCipher for NativeDes {
  fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
    check_key(key)?;
    let cipher = Des::new_from_slice(key).map_err(|_| KeySizeError::new(ALGORITHM, key.len()))?;
    Ok(Box::new(DesBlock(Keyed::Single(cipher))))
  }

  fn new_triple_des_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
    check_triple_key(key)?;
    let cipher = TdesEde3::new_from_slice(key).map_err(|_| KeySizeError::new(ALGORITHM, key.len()))?;
    Ok(Box::new(DesBlock(Keyed::Triple(cipher))))
  }
}
