//! Capability contracts for plugcrypto.
//!
//! Every primitive family that an engine may substitute is described here as
//! one object-safe trait. The built-in implementations and every external
//! engine implement the *same* traits, so a call site cannot tell which one
//! served it. This crate is `no_std` (with `alloc`) and carries no algorithm
//! code of its own.
//!
//! # Contracts
//!
//! | Capability | Trait | Operations |
//! |------------|-------|------------|
//! | `aes` | [`AesCipher`] | `new_cipher` |
//! | `des` | [`DesCipher`] | `new_cipher`, `new_triple_des_cipher` |
//! | `sha2` | [`Sha2`] | `new_sha224` .. `new_sha512`, `sum224` .. `sum512` |
//! | `hmac` | [`Hmac`] | `new_hmac` |
//! | `tls-prf` | [`TlsPrf`] | `prf` |
//!
//! # Handles
//!
//! - [`Block`] - a keyed block cipher instance
//! - [`Digest`] - a streaming hash or MAC state
//!
//! Handles are owned by the caller and keep their implementation alive on
//! their own; nothing about them depends on which engine is active later.
//!
//! # Fallibility Discipline
//!
//! This crate denies `unwrap`, `expect`, and indexing in non-test code to ensure
//! all error paths are handled explicitly.
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod cipher;
pub mod digest;
pub mod error;
pub mod mac;
pub mod prf;

pub use cipher::{AesCipher, Block, DesCipher};
pub use digest::{Digest, HashKind, Sha2};
pub use error::{CryptoError, KeySizeError};
pub use mac::Hmac;
pub use prf::{TlsPrf, is_prf_hash};
