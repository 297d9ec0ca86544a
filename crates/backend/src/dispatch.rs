//! Per-call dispatch: engine capability or default implementation.
//!
//! This module provides the one routine every facade operation goes through:
//!
//! - [`dispatch`]: Ask the registry for its current engine, delegate to the
//!   engine's capability if present, otherwise call the default implementation
//! - [`Dispatcher`]: The same routine bound to one capability, constructible
//!   in a `static`
//! - [`Route`]: Where a call would go right now (for introspection)
//!
//! # Design
//!
//! The decision is made on every call. Nothing about "engine X lacks
//! capability Y" is cached; the cost of a miss is one atomic snapshot load and
//! one `Option` check.
//!
//! Input validation is *not* done here. Facade operations validate before
//! calling [`Dispatcher::call`], so an engine never sees invalid input and the
//! validation error is the same whichever side would have served the call.
//!
//! # Usage
//!
//! ```ignore
//! use backend::{Capability, Dispatcher, Engine};
//! use traits::AesCipher;
//!
//! static AES: Dispatcher<dyn AesCipher> = Dispatcher::new(Capability::Aes, Engine::aes, &NativeAes);
//!
//! pub fn new_cipher(key: &[u8]) -> Result<Box<dyn Block>, CryptoError> {
//!   check_aes_key(key)?;
//!   AES.call(|aes| aes.new_cipher(key))
//! }
//! ```

use core::fmt;

use crate::{
  capability::Capability,
  engine::Engine,
  registry::{self, Registry},
};

// ─────────────────────────────────────────────────────────────────────────────
// Core Routine
// ─────────────────────────────────────────────────────────────────────────────

/// Run `op` against the engine's implementation of a capability, or against
/// `default` when no engine is registered or the engine lacks it.
///
/// `op`'s result is returned verbatim in both cases.
#[inline]
pub fn dispatch<C, R>(
  registry: &Registry,
  accessor: fn(&Engine) -> Option<&C>,
  default: &C,
  op: impl FnOnce(&C) -> R,
) -> R
where
  C: ?Sized,
{
  let snapshot = registry.snapshot();
  match snapshot.as_deref().and_then(accessor) {
    Some(imp) => op(imp),
    None => op(default),
  }
}

/// Where calls for a capability are currently routed.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
  /// The registered engine, by name.
  Engine(String),
  /// The default implementation.
  Default,
}

impl Route {
  /// Whether calls go to an engine.
  #[inline]
  #[must_use]
  pub const fn is_engine(&self) -> bool {
    matches!(self, Self::Engine(_))
  }
}

impl fmt::Display for Route {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Engine(name) => write!(f, "engine:{name}"),
      Self::Default => f.write_str("default"),
    }
  }
}

/// Where calls for `cap` go in `registry` right now.
#[must_use]
pub fn route(registry: &Registry, cap: Capability) -> Route {
  let snapshot = registry.snapshot();
  match snapshot.as_deref() {
    Some(engine) if engine.supports(cap) => Route::Engine(engine.name().to_owned()),
    _ => Route::Default,
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Capability-Bound Dispatcher
// ─────────────────────────────────────────────────────────────────────────────
//
// Each facade module declares one static dispatcher per capability. The
// capability tag ties the accessor to the family used for introspection.

/// [`dispatch`] bound to one capability and its default implementation.
///
/// # Example
///
/// ```
/// use backend::{Capability, Dispatcher, Engine, Registry};
/// use traits::{CryptoError, HashKind, TlsPrf};
///
/// struct Zeros;
///
/// impl TlsPrf for Zeros {
///   fn prf(&self, _: HashKind, _: &[u8], _: &[u8], _: &[u8], out: &mut [u8]) -> Result<(), CryptoError> {
///     out.fill(0);
///     Ok(())
///   }
/// }
///
/// static PRF: Dispatcher<dyn TlsPrf> = Dispatcher::new(Capability::TlsPrf, Engine::tls_prf, &Zeros);
///
/// let registry = Registry::new();
/// let mut out = [1u8; 4];
/// PRF.call_in(&registry, |prf| prf.prf(HashKind::Sha256, b"s", b"l", b"x", &mut out)).unwrap();
/// assert_eq!(out, [0; 4]);
/// ```
pub struct Dispatcher<C: ?Sized + 'static> {
  capability: Capability,
  accessor: fn(&Engine) -> Option<&C>,
  default: &'static C,
}

impl<C: ?Sized + 'static> Dispatcher<C> {
  /// Bind `capability`'s engine accessor to its default implementation.
  #[must_use]
  pub const fn new(capability: Capability, accessor: fn(&Engine) -> Option<&C>, default: &'static C) -> Self {
    Self { capability, accessor, default }
  }

  /// The capability this dispatcher serves.
  #[inline]
  #[must_use]
  pub const fn capability(&self) -> Capability {
    self.capability
  }

  /// The default implementation.
  #[inline]
  #[must_use]
  pub const fn default_impl(&self) -> &'static C {
    self.default
  }

  /// Dispatch through the process-wide registry.
  #[inline]
  pub fn call<R>(&self, op: impl FnOnce(&C) -> R) -> R {
    self.call_in(registry::global(), op)
  }

  /// Dispatch through an explicit registry.
  #[inline]
  pub fn call_in<R>(&self, registry: &Registry, op: impl FnOnce(&C) -> R) -> R {
    dispatch(registry, self.accessor, self.default, op)
  }

  /// Where calls currently go, in the process-wide registry.
  #[must_use]
  pub fn route(&self) -> Route {
    route(registry::global(), self.capability)
  }
}

impl<C: ?Sized + 'static> fmt::Debug for Dispatcher<C> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Dispatcher").field("capability", &self.capability).finish_non_exhaustive()
  }
}
