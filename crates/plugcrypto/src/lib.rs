//! Cryptographic primitives with a runtime-swappable implementation.
//!
//! `plugcrypto` exposes AES, DES, SHA-2, HMAC and the TLS 1.2 PRF. Every
//! operation is served by the default implementation unless an external
//! *engine* has been registered and provides that capability, in which case
//! the engine serves it. The choice is made per call and per capability.
//!
//! # Quick Start
//!
//! ```
//! use plugcrypto::{aes, sha2};
//!
//! // No engine registered: the defaults serve every call.
//! let block = aes::new_cipher(&[0x2b; 16])?;
//! let mut buf = [0u8; aes::BLOCK_SIZE];
//! block.encrypt_block(&mut buf)?;
//!
//! let digest = sha2::sum256(b"hello world");
//! assert_eq!(digest.len(), 32);
//! # Ok::<(), plugcrypto::CryptoError>(())
//! ```
//!
//! # Engines
//!
//! An [`Engine`] is a named set of capability implementations. At most one is
//! registered at a time:
//!
//! ```
//! use plugcrypto::{Capability, Engine, backend_for, native};
//!
//! let engine = Engine::builder("sha-only").sha2(native::NativeSha2).build();
//! plugcrypto::register(engine)?;
//! assert!(backend_for(Capability::Sha2).is_engine());
//! assert!(!backend_for(Capability::Aes).is_engine());
//! plugcrypto::unregister();
//! # Ok::<(), plugcrypto::AlreadyRegisteredError>(())
//! ```
//!
//! Engines built as shared libraries export an entry point with
//! [`export_engine!`] and are loaded with [`load_and_register`], or at startup
//! from the `PLUGCRYPTO_ENGINE` environment variable via [`init_from_env`].
//!
//! # Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `dynamic` | Yes | Loading engines from shared libraries |
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]

pub mod aes;
pub mod des;
pub mod hmac;
mod introspect;
pub mod native;
pub mod sha2;
pub mod tls;

// =============================================================================
// Registry and engines
// =============================================================================

#[cfg(feature = "dynamic")]
pub use backend::{LoadError, init_from_env, load_and_register};
pub use backend::{
  AlreadyRegisteredError, Capability, CapabilitySet, ENGINE_ENV, Engine, EngineBuilder, EngineConfig, Route, current,
  export_engine, register, unregister,
};

// =============================================================================
// Contracts
// =============================================================================

pub use introspect::{DispatchInfo, backend_for};
pub use traits::{AesCipher, Block, CryptoError, DesCipher, Digest, HashKind, Hmac, KeySizeError, Sha2, TlsPrf};
