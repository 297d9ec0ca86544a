//! Startup configuration.
//!
//! The only knob is which engine module, if any, to load at startup:
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `PLUGCRYPTO_ENGINE` | Path of an engine module to load and register |
//!
//! Values are trimmed; an empty value is the same as an unset one. Values
//! that are not valid UTF-8 are taken as paths verbatim.

use std::{ffi::OsString, path::PathBuf};

#[cfg(feature = "dynamic")]
use crate::{
  loader::{self, LoadError},
  registry::Registry,
};

/// Environment variable naming the engine module to load.
pub const ENGINE_ENV: &str = "PLUGCRYPTO_ENGINE";

/// Engine selection, from the environment or built programmatically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EngineConfig {
  /// Engine module to load, if any.
  pub module: Option<PathBuf>,
}

impl EngineConfig {
  /// No engine: every primitive uses its default implementation.
  #[must_use]
  pub const fn none() -> Self {
    Self { module: None }
  }

  /// Load the engine module at `path`.
  #[must_use]
  pub fn module(path: impl Into<PathBuf>) -> Self {
    Self { module: Some(path.into()) }
  }

  /// Read the configuration from the process environment.
  #[must_use]
  pub fn from_env() -> Self {
    Self::from_lookup(|name| std::env::var_os(name))
  }

  /// Read the configuration through `lookup` (injectable for tests).
  #[must_use]
  pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
    fn parse_path(value: OsString) -> Option<PathBuf> {
      let path = match value.to_str() {
        Some(text) => PathBuf::from(text.trim()),
        None => PathBuf::from(value),
      };
      if path.as_os_str().is_empty() { None } else { Some(path) }
    }

    Self { module: lookup(ENGINE_ENV).and_then(parse_path) }
  }

  /// Load and register the configured module into `registry`.
  ///
  /// Returns the registered engine's name, or `None` when no module is
  /// configured.
  #[cfg(feature = "dynamic")]
  pub fn apply(&self, registry: &Registry) -> Result<Option<String>, LoadError> {
    let Some(path) = self.module.as_deref() else {
      return Ok(None);
    };
    let loaded = loader::load(path)?;
    let name = loaded.engine().name().to_owned();
    loaded.register_into(registry)?;
    Ok(Some(name))
  }
}

/// Apply [`EngineConfig::from_env`] to the process-wide registry.
#[cfg(feature = "dynamic")]
pub fn init_from_env() -> Result<Option<String>, LoadError> {
  EngineConfig::from_env().apply(crate::registry::global())
}
