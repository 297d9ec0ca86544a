//! Loading engines from shared libraries.
//!
//! [`load_and_register`] opens a module, resolves [`ENTRY_POINT`], validates
//! the descriptor it returns, and registers the engine. A failure at any step
//! leaves the registry exactly as it was.
//!
//! Modules whose engine was registered are never unloaded: handles created by
//! the engine (cipher instances, hash states) may outlive both the engine and
//! its registration, and their code lives in the module.

use std::path::{Path, PathBuf};

use libloading::Library;
use parking_lot::Mutex;
use thiserror::Error;

use crate::{
  engine::Engine,
  plugin::{self, ENTRY_POINT, EntryPoint, Mismatch},
  registry::{self, AlreadyRegisteredError, Registry},
};

/// Why an engine module could not be loaded and registered.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
  /// No module exists at the given path (or on the loader search path).
  #[error("engine module `{}` not found", .path.display())]
  NotFound {
    /// Path that was requested.
    path: PathBuf,
    /// Loader diagnostic.
    #[source]
    source: libloading::Error,
  },

  /// The file exists but the system loader rejected it.
  ///
  /// Only paths with a directory component are checked for existence. A bare
  /// file name goes through the system search path, which does not include
  /// the current directory, so failing to open one is [`NotFound`](Self::NotFound).
  #[error("engine module `{}` could not be opened", .path.display())]
  Open {
    /// Path that was requested.
    path: PathBuf,
    /// Loader diagnostic.
    #[source]
    source: libloading::Error,
  },

  /// The module does not export the engine entry point.
  #[error("engine module `{}` does not export `{symbol}`", .path.display())]
  EntryPointMissing {
    /// Path that was requested.
    path: PathBuf,
    /// Symbol that was looked up.
    symbol: &'static str,
    /// Loader diagnostic.
    #[source]
    source: libloading::Error,
  },

  /// The module's descriptor or engine does not satisfy the engine contract.
  #[error("engine module `{}` violates the engine contract", .path.display())]
  ContractMismatch {
    /// Path that was requested.
    path: PathBuf,
    /// What was wrong.
    #[source]
    source: Mismatch,
  },

  /// Another engine is already registered.
  #[error(transparent)]
  Registration(#[from] AlreadyRegisteredError),
}

/// Modules backing registered engines, keyed by canonical path. Held for the
/// life of the process; registering the same module again adds no entry.
static RETAINED: Mutex<Vec<(PathBuf, Library)>> = parking_lot::const_mutex(Vec::new());

/// Paths of the modules kept loaded because one of their engines was
/// registered.
#[must_use]
pub fn retained_modules() -> Vec<PathBuf> {
  RETAINED.lock().iter().map(|(path, _)| path.clone()).collect()
}

/// Whether `path` names a file the loader will open directly rather than
/// look up on the search path.
fn is_direct(path: &Path) -> bool {
  path.parent().is_some_and(|parent| !parent.as_os_str().is_empty())
}

/// An engine constructed from a module but not yet registered.
///
/// Dropping it drops the engine and then unloads the module.
// Field order matters: the engine must be dropped before its module.
pub struct LoadedEngine {
  engine: Engine,
  library: Library,
  path: PathBuf,
}

impl LoadedEngine {
  /// The constructed engine.
  #[inline]
  #[must_use]
  pub fn engine(&self) -> &Engine {
    &self.engine
  }

  /// Path the module was loaded from.
  #[inline]
  #[must_use]
  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Register the engine in the process-wide registry.
  pub fn register(self) -> Result<(), AlreadyRegisteredError> {
    self.register_into(registry::global())
  }

  /// Register the engine in `registry`.
  ///
  /// On success the module stays loaded for the rest of the process. On
  /// failure the engine is dropped and the module unloaded.
  pub fn register_into(self, registry: &Registry) -> Result<(), AlreadyRegisteredError> {
    let Self { engine, library, path } = self;
    registry.register(engine)?;

    let key = std::fs::canonicalize(&path).unwrap_or(path);
    let mut retained = RETAINED.lock();
    // The first handle keeps the module mapped; a repeat handle only holds
    // another reference count and is released here.
    if retained.iter().all(|(held, _)| *held != key) {
      tracing::debug!(path = %key.display(), "engine module retained");
      retained.push((key, library));
    }
    Ok(())
  }
}

impl std::fmt::Debug for LoadedEngine {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("LoadedEngine").field("engine", &self.engine).field("path", &self.path).finish_non_exhaustive()
  }
}

/// Open the module at `path`, validate its descriptor, and construct its
/// engine without registering it.
pub fn load(path: impl AsRef<Path>) -> Result<LoadedEngine, LoadError> {
  let path = path.as_ref();
  tracing::debug!(path = %path.display(), "loading engine module");

  // SAFETY: Loading runs the module's initializers. Loading foreign code is
  // the whole point of this function; the caller chose the path.
  let library = match unsafe { Library::new(path) } {
    Ok(library) => library,
    Err(source) if is_direct(path) && path.exists() => return Err(LoadError::Open { path: path.to_owned(), source }),
    Err(source) => return Err(LoadError::NotFound { path: path.to_owned(), source }),
  };

  let descriptor = {
    // SAFETY: `EntryPoint` is the documented type of the exported symbol.
    let entry = match unsafe { library.get::<EntryPoint>(ENTRY_POINT.as_bytes()) } {
      Ok(entry) => entry,
      Err(source) => {
        return Err(LoadError::EntryPointMissing { path: path.to_owned(), symbol: ENTRY_POINT, source });
      }
    };
    // SAFETY: The symbol has the entry point's signature; it takes no input.
    unsafe { entry() }
  };

  // SAFETY: `descriptor` came from the module's entry point and `library`
  // outlives the engine (see the field order of `LoadedEngine`).
  let engine = match unsafe { plugin::accept(descriptor) } {
    Ok(engine) => engine,
    Err(source) => return Err(LoadError::ContractMismatch { path: path.to_owned(), source }),
  };

  Ok(LoadedEngine { engine, library, path: path.to_owned() })
}

/// Load the module at `path` and register its engine in the process-wide
/// registry.
pub fn load_and_register(path: impl AsRef<Path>) -> Result<(), LoadError> {
  load_and_register_into(registry::global(), path)
}

/// Load the module at `path` and register its engine in `registry`.
pub fn load_and_register_into(registry: &Registry, path: impl AsRef<Path>) -> Result<(), LoadError> {
  load(path)?.register_into(registry)?;
  Ok(())
}
