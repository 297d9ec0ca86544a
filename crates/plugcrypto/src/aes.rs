//! AES block cipher.
//!
//! ```
//! let block = plugcrypto::aes::new_cipher(&[0u8; 16])?;
//! let mut buf = [0u8; plugcrypto::aes::BLOCK_SIZE];
//! block.encrypt_block(&mut buf)?;
//! block.decrypt_block(&mut buf)?;
//! assert_eq!(buf, [0u8; 16]);
//! # Ok::<(), plugcrypto::CryptoError>(())
//! ```

use backend::{Capability, Dispatcher, Engine};
use traits::{AesCipher, Block, CryptoError};

pub use crate::native::aes::BLOCK_SIZE;
use crate::native::{self, NativeAes};

static AES: Dispatcher<dyn AesCipher> = Dispatcher::new(Capability::Aes, Engine::aes, &NativeAes);

/// Keyed AES instance for a 16, 24, or 32 byte key.
///
/// The key length is checked before any engine is consulted, so an invalid
/// key fails with the same [`KeySizeError`](crate::KeySizeError) whether or
/// not an engine is registered.
pub fn new_cipher(key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
  native::aes::check_key(key)?;
  AES.call(|aes| aes.new_cipher(key))
}
