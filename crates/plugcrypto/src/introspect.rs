//! Where calls are going right now.
//!
//! ```
//! use plugcrypto::{Capability, DispatchInfo, backend_for};
//!
//! let info = DispatchInfo::current();
//! println!("{info}");
//! println!("aes -> {}", backend_for(Capability::Aes));
//! ```

use core::fmt;

use backend::{Capability, Route};

/// Routing table for every capability, taken from one registry snapshot.
#[derive(Clone, PartialEq, Eq)]
pub struct DispatchInfo {
  engine: Option<String>,
  routes: Vec<(Capability, Route)>,
}

impl DispatchInfo {
  /// Snapshot of the process-wide registry.
  #[must_use]
  pub fn current() -> Self {
    let snapshot = backend::current();
    let routes = Capability::ALL
      .iter()
      .map(|&cap| {
        let route = match snapshot.as_deref() {
          Some(engine) if engine.supports(cap) => Route::Engine(engine.name().to_owned()),
          _ => Route::Default,
        };
        (cap, route)
      })
      .collect();
    Self { engine: snapshot.map(|engine| engine.name().to_owned()), routes }
  }

  /// Name of the registered engine, if any.
  #[inline]
  #[must_use]
  pub fn engine(&self) -> Option<&str> {
    self.engine.as_deref()
  }

  /// Route for `cap` in this snapshot.
  #[must_use]
  pub fn route(&self, cap: Capability) -> &Route {
    self.routes.iter().find(|(c, _)| *c == cap).map_or(&Route::Default, |(_, route)| route)
  }

  /// All `(capability, route)` pairs.
  #[inline]
  #[must_use]
  pub fn routes(&self) -> &[(Capability, Route)] {
    &self.routes
  }
}

impl fmt::Display for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.engine {
      Some(name) => write!(f, "engine {name}")?,
      None => f.write_str("no engine")?,
    }
    f.write_str(" [")?;
    for (i, (cap, route)) in self.routes.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      write!(f, "{cap}={route}")?;
    }
    f.write_str("]")
  }
}

impl fmt::Debug for DispatchInfo {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DispatchInfo").field("engine", &self.engine).field("routes", &self.routes).finish()
  }
}

/// Where a call for `cap` would go right now.
#[inline]
#[must_use]
pub fn backend_for(cap: Capability) -> Route {
  backend::dispatch::route(backend::global(), cap)
}
