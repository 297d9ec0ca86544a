//! Block cipher contracts.

use alloc::boxed::Box;
use core::fmt;

use crate::error::CryptoError;

/// A keyed block cipher instance.
///
/// Both operations work in place on exactly one block and return
/// [`CryptoError::BlockLength`] for any other buffer length.
pub trait Block: Send + Sync {
  /// Block length in bytes.
  fn block_size(&self) -> usize;

  /// Encrypt one block in place.
  fn encrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;

  /// Decrypt one block in place.
  fn decrypt_block(&self, block: &mut [u8]) -> Result<(), CryptoError>;
}

impl fmt::Debug for dyn Block {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Block").field("block_size", &self.block_size()).finish_non_exhaustive()
  }
}

/// The `aes` capability.
pub trait AesCipher: Send + Sync {
  /// Key an AES instance. The key selects AES-128, AES-192, or AES-256 by
  /// length (16, 24, or 32 bytes); any other length is a key size error.
  fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError>;
}

/// The `des` capability: single DES and triple DES (EDE3).
pub trait DesCipher: Send + Sync {
  /// Key a single-DES instance from an 8-byte key.
  fn new_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError>;

  /// Key a 3DES-EDE3 instance from a 24-byte key.
  fn new_triple_des_cipher(&self, key: &[u8]) -> Result<Box<dyn Block>, CryptoError>;
}
