//! Backend crate: engines, the engine registry, and per-call dispatch.
//!
//! This crate is the foundation that lets an application swap in external
//! implementations of individual primitive families:
//!
//! - **Capabilities**: [`Capability`] names a substitutable family;
//!   [`CapabilitySet`] is a bitmask over them
//! - **Engines**: [`Engine`] maps each capability to an optional
//!   implementation of its contract (see the `traits` crate)
//! - **Registry**: [`Registry`] holds at most one active engine; [`global`]
//!   is the process-wide instance
//! - **Dispatch**: [`Dispatcher`] routes each call to the engine's capability
//!   or to the default implementation
//! - **Plugins**: [`plugin`] defines the boundary for engines in shared
//!   libraries; [`loader`] opens them (feature `dynamic`)
//!
//! # Usage
//!
//! ```ignore
//! use backend::{Engine, register, unregister};
//!
//! register(Engine::builder("hsm").aes(HsmAes::connect()?).build())?;
//! // every AES construction now goes to the HSM; everything else is unchanged
//! unregister();
//! ```
#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]

pub mod capability;
pub mod config;
pub mod dispatch;
pub mod engine;
#[cfg(feature = "dynamic")]
pub mod loader;
pub mod plugin;
pub mod registry;

use std::sync::Arc;

pub use capability::{Capability, CapabilitySet};
#[cfg(feature = "dynamic")]
pub use config::init_from_env;
pub use config::{ENGINE_ENV, EngineConfig};
pub use dispatch::{Dispatcher, Route, dispatch};
pub use engine::{CapabilityRef, Engine, EngineBuilder};
#[cfg(feature = "dynamic")]
pub use loader::{LoadError, LoadedEngine, load, load_and_register, load_and_register_into, retained_modules};
pub use plugin::Mismatch;
pub use registry::{AlreadyRegisteredError, Registry, RegistryState, global};
// Re-export the contracts so engine crates need a single dependency.
pub use traits;

/// Register `engine` in the process-wide registry.
///
/// Fails if another engine is already active; that engine stays in place.
#[inline]
pub fn register(engine: Engine) -> Result<(), AlreadyRegisteredError> {
  global().register(engine)
}

/// Unregister the process-wide engine, if any. Never fails.
#[inline]
pub fn unregister() {
  global().unregister();
}

/// Snapshot of the process-wide engine.
#[inline]
#[must_use]
pub fn current() -> Option<Arc<Engine>> {
  global().current()
}
