//! The engine registry: a single slot holding the active engine.
//!
//! # State Machine
//!
//! ```text
//! Empty  --register-->   Active
//! Active --register-->   Active   (AlreadyRegisteredError, no change)
//! Active --unregister--> Empty
//! Empty  --unregister--> Empty    (no-op)
//! ```
//!
//! # Synchronization
//!
//! - Reads ([`Registry::current`] and the dispatch fast path) load an
//!   atomically swapped `Arc` snapshot and never block each other.
//! - Writes ([`Registry::register`], [`Registry::unregister`]) are serialized
//!   by a mutex, which keeps the check-then-store in `register` atomic with
//!   respect to other writers.
//!
//! A reader racing a write sees either the engine before the write or the
//! engine after it, never a partially built one: engines are fully
//! constructed before they are published.

use std::{fmt, sync::Arc};

use arc_swap::{ArcSwapOption, Guard};
use parking_lot::Mutex;
use thiserror::Error;

use crate::engine::Engine;

/// Registry state tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RegistryState {
  /// No engine registered; every call uses the default implementation.
  Empty,
  /// An engine is registered.
  Active,
}

impl RegistryState {
  /// Lowercase name.
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Empty => "empty",
      Self::Active => "active",
    }
  }
}

impl fmt::Display for RegistryState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// `register` was called while another engine is active.
///
/// The active engine stays in place; the rejected one is dropped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("cannot register crypto engine `{rejected}`: engine `{active}` is already registered")]
pub struct AlreadyRegisteredError {
  active: String,
  rejected: String,
}

impl AlreadyRegisteredError {
  /// Name of the engine that remains active.
  #[must_use]
  pub fn active(&self) -> &str {
    &self.active
  }

  /// Name of the engine that was turned away.
  #[must_use]
  pub fn rejected(&self) -> &str {
    &self.rejected
  }
}

/// Single-slot holder of the active [`Engine`].
pub struct Registry {
  slot: ArcSwapOption<Engine>,
  write: Mutex<()>,
}

impl Registry {
  /// Create an empty registry.
  #[must_use]
  pub fn new() -> Self {
    Self { slot: ArcSwapOption::empty(), write: Mutex::new(()) }
  }

  /// Make `engine` the active engine.
  ///
  /// First writer wins: if an engine is already active this fails and leaves
  /// it untouched.
  pub fn register(&self, engine: Engine) -> Result<(), AlreadyRegisteredError> {
    let _write = self.write.lock();

    if let Some(active) = self.slot.load().as_deref() {
      return Err(AlreadyRegisteredError { active: active.name().to_owned(), rejected: engine.name().to_owned() });
    }

    tracing::info!(engine = engine.name(), capabilities = %engine.capabilities(), "crypto engine registered");
    self.slot.store(Some(Arc::new(engine)));
    Ok(())
  }

  /// Drop the active engine, if any. Idempotent.
  ///
  /// Snapshots taken earlier through [`current`](Self::current) and handles
  /// produced by the engine stay valid.
  pub fn unregister(&self) {
    let _write = self.write.lock();

    if let Some(previous) = self.slot.swap(None) {
      tracing::info!(engine = previous.name(), "crypto engine unregistered");
    }
  }

  /// Snapshot of the active engine.
  #[inline]
  #[must_use]
  pub fn current(&self) -> Option<Arc<Engine>> {
    self.slot.load_full()
  }

  /// Cheap borrowed snapshot for the dispatch fast path.
  ///
  /// Avoids touching the reference count in the common case. Do not hold
  /// the guard for long; use [`current`](Self::current) for that.
  #[inline]
  pub(crate) fn snapshot(&self) -> Guard<Option<Arc<Engine>>> {
    self.slot.load()
  }

  /// Current state tag.
  #[inline]
  #[must_use]
  pub fn state(&self) -> RegistryState {
    if self.is_active() { RegistryState::Active } else { RegistryState::Empty }
  }

  /// Whether an engine is registered.
  #[inline]
  #[must_use]
  pub fn is_active(&self) -> bool {
    self.slot.load().is_some()
  }
}

impl Default for Registry {
  fn default() -> Self {
    Self::new()
  }
}

impl fmt::Debug for Registry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let snapshot = self.snapshot();
    f.debug_struct("Registry")
      .field("state", &self.state())
      .field("engine", &snapshot.as_deref().map(Engine::name))
      .finish()
  }
}

/// The process-wide registry.
///
/// Created empty on first use and never destroyed; reset it with
/// [`Registry::unregister`].
#[inline]
#[must_use]
pub fn global() -> &'static Registry {
  static GLOBAL: std::sync::OnceLock<Registry> = std::sync::OnceLock::new();
  GLOBAL.get_or_init(Registry::new)
}

#[cfg(test)]
mod tests {
  use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
  };

  use super::*;
  use crate::{
    capability::{Capability, CapabilitySet},
    engine::tests::{MarkerAes, NoHmac},
  };

  fn engine(name: &'static str) -> Engine {
    Engine::builder(name).aes(MarkerAes(1)).build()
  }

  #[test]
  fn starts_empty() {
    let registry = Registry::new();
    assert_eq!(registry.state(), RegistryState::Empty);
    assert!(registry.current().is_none());
  }

  #[test]
  fn register_activates() {
    let registry = Registry::new();
    registry.register(engine("e1")).expect("empty registry accepts");
    assert_eq!(registry.state(), RegistryState::Active);
    assert_eq!(registry.current().map(|e| e.name().to_owned()).as_deref(), Some("e1"));
  }

  #[test]
  fn second_register_is_rejected_and_first_stays() {
    let registry = Registry::new();
    registry.register(engine("e1")).expect("first");
    let err = registry.register(engine("e2")).expect_err("slot is taken");
    assert_eq!(err.active(), "e1");
    assert_eq!(err.rejected(), "e2");
    assert_eq!(err.to_string(), "cannot register crypto engine `e2`: engine `e1` is already registered");

    let current = registry.current().expect("still active");
    assert_eq!(current.name(), "e1");
    assert_eq!(registry.state(), RegistryState::Active);
  }

  #[test]
  fn unregister_is_idempotent() {
    let registry = Registry::new();
    registry.unregister();
    assert_eq!(registry.state(), RegistryState::Empty);

    registry.register(engine("e1")).expect("first");
    registry.unregister();
    assert_eq!(registry.state(), RegistryState::Empty);
    registry.unregister();
    assert_eq!(registry.state(), RegistryState::Empty);
    assert!(registry.current().is_none());
  }

  #[test]
  fn register_after_unregister() {
    let registry = Registry::new();
    registry.register(engine("e1")).expect("first");
    registry.unregister();
    registry.register(engine("e2")).expect("slot is free again");
    assert_eq!(registry.current().map(|e| e.name().to_owned()).as_deref(), Some("e2"));
  }

  #[test]
  fn snapshot_outlives_unregister() {
    let registry = Registry::new();
    registry.register(engine("e1")).expect("first");
    let held = registry.current().expect("active");
    registry.unregister();
    assert_eq!(held.name(), "e1");
    assert!(held.supports(Capability::Aes));
  }

  #[test]
  fn global_is_a_singleton() {
    assert!(std::ptr::eq(global(), global()));
  }

  #[test]
  fn debug_names_engine() {
    let registry = Registry::new();
    assert!(format!("{registry:?}").contains("Empty"));
    registry.register(engine("dbg")).expect("first");
    let dbg = format!("{registry:?}");
    assert!(dbg.contains("Active"));
    assert!(dbg.contains("dbg"));
  }

  #[test]
  fn concurrent_registers_admit_exactly_one() {
    let registry = Registry::new();
    let wins = thread::scope(|s| {
      let handles: Vec<_> = (0..8)
        .map(|i| {
          let registry = &registry;
          s.spawn(move || registry.register(Engine::builder(format!("racer-{i}")).build()).is_ok())
        })
        .collect();
      handles.into_iter().map(|h| h.join().expect("no panic")).filter(|ok| *ok).count()
    });
    assert_eq!(wins, 1);
    assert_eq!(registry.state(), RegistryState::Active);
  }

  #[test]
  fn readers_never_see_a_torn_engine() {
    let full = CapabilitySet::of(&[Capability::Aes, Capability::Hmac]);
    let registry = Registry::new();
    let stop = AtomicBool::new(false);

    thread::scope(|s| {
      for _ in 0..4 {
        s.spawn(|| {
          while !stop.load(Ordering::Relaxed) {
            if let Some(engine) = registry.current() {
              assert_eq!(engine.name(), "full");
              assert_eq!(engine.capabilities(), full);
            }
          }
        });
      }

      for _ in 0..500 {
        registry.register(Engine::builder("full").aes(MarkerAes(2)).hmac(NoHmac).build()).expect("writer alone");
        registry.unregister();
      }
      stop.store(true, Ordering::Relaxed);
    });

    assert_eq!(registry.state(), RegistryState::Empty);
  }
}
