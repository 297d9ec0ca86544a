//! DES and triple DES (EDE3) block ciphers.

use backend::{Capability, Dispatcher, Engine};
use traits::{Block, CryptoError, DesCipher};

pub use crate::native::des::BLOCK_SIZE;
use crate::native::{self, NativeDes};

static DES: Dispatcher<dyn DesCipher> = Dispatcher::new(Capability::Des, Engine::des, &NativeDes);

/// Keyed single DES instance. `key` must be 8 bytes.
pub fn new_cipher(key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
  native::des::check_key(key)?;
  DES.call(|des| des.new_cipher(key))
}

/// Keyed triple DES instance. `key` must be 24 bytes.
pub fn new_triple_des_cipher(key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
  native::des::check_triple_key(key)?;
  DES.call(|des| des.new_triple_des_cipher(key))
}
