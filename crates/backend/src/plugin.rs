//! The plugin boundary: what a dynamically loaded engine module must export.
//!
//! A plugin is a `cdylib` exporting one symbol, [`ENTRY_POINT`], of type
//! [`EntryPoint`]. The entry point returns a pointer to a static
//! [`PluginDescriptor`], which carries:
//!
//! - the descriptor ABI version ([`ABI_VERSION`])
//! - the version of this crate the plugin was built against
//! - the capability set the engine claims
//! - a constructor producing the boxed [`Engine`]
//!
//! The host checks each of these before it accepts the engine (see
//! [`accept`]); every shape problem is a [`Mismatch`], never undefined
//! behavior on the host's side of the checks.
//!
//! Plugins don't write any of this by hand; they use [`export_engine!`]:
//!
//! ```ignore
//! use backend::{Engine, export_engine};
//!
//! fn build() -> Engine {
//!   Engine::builder("hsm").aes(HsmAes::connect()).build()
//! }
//!
//! export_engine!(build => [Aes]);
//! ```
//!
//! # Requirements on plugins
//!
//! - Built with the same toolchain and the same version of this crate as the
//!   host. The version is checked; the toolchain cannot be.
//! - No custom `#[global_allocator]`: the engine box is allocated in the
//!   plugin and freed by the host.

use std::{ffi::c_void, fmt, panic, ptr};

use thiserror::Error;

use crate::{capability::CapabilitySet, engine::Engine};

/// Version of the descriptor layout. Bumped whenever [`PluginDescriptor`]
/// changes shape.
pub const ABI_VERSION: u32 = 1;

/// Name of the symbol every plugin exports.
pub const ENTRY_POINT: &str = "plugcrypto_engine_entry";

/// Version of this crate, recorded in every descriptor.
pub const BACKEND_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Signature of the exported entry point.
pub type EntryPoint = unsafe extern "C" fn() -> *const PluginDescriptor;

/// Signature of the engine constructor carried by the descriptor.
///
/// Returns `Box<Engine>` turned into a raw pointer, or null on failure.
pub type ConstructFn = extern "C" fn() -> *mut c_void;

/// Static description of a plugin's engine.
#[repr(C)]
pub struct PluginDescriptor {
  abi_version: u32,
  claimed: u32,
  backend_version: *const u8,
  backend_version_len: usize,
  construct: Option<ConstructFn>,
}

// SAFETY: The descriptor is immutable and its pointer field refers to a
// `&'static str`, so sharing it between threads cannot race.
unsafe impl Sync for PluginDescriptor {}

impl PluginDescriptor {
  /// Describe an engine claiming `claimed`, built by `construct`.
  #[must_use]
  pub const fn new(claimed: CapabilitySet, construct: ConstructFn) -> Self {
    Self {
      abi_version: ABI_VERSION,
      claimed: claimed.bits(),
      backend_version: BACKEND_VERSION.as_ptr(),
      backend_version_len: BACKEND_VERSION.len(),
      construct: Some(construct),
    }
  }

  /// Descriptor layout version.
  #[inline]
  #[must_use]
  pub const fn abi_version(&self) -> u32 {
    self.abi_version
  }

  /// Capabilities the engine claims to implement.
  #[inline]
  #[must_use]
  pub const fn claimed(&self) -> CapabilitySet {
    CapabilitySet::from_bits(self.claimed)
  }

  /// Version of this crate the plugin was built against, if readable.
  fn backend_version(&self) -> Option<&str> {
    if self.backend_version.is_null() {
      return None;
    }
    // SAFETY: `new` stores the pointer and length of a `&'static str`; the
    // ABI version was checked before this is called, so the fields are the
    // ones `new` wrote.
    let bytes = unsafe { std::slice::from_raw_parts(self.backend_version, self.backend_version_len) };
    std::str::from_utf8(bytes).ok()
  }
}

impl fmt::Debug for PluginDescriptor {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PluginDescriptor")
      .field("abi_version", &self.abi_version)
      .field("claimed", &self.claimed())
      .field("has_constructor", &self.construct.is_some())
      .finish_non_exhaustive()
  }
}

/// Ways a plugin can fail the engine contract.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Mismatch {
  /// The entry point returned a null descriptor.
  #[error("entry point returned a null descriptor")]
  NullDescriptor,

  /// The descriptor was laid out for another ABI version.
  #[error("descriptor ABI version {found}, expected {expected}")]
  AbiVersion {
    /// Version this host understands.
    expected: u32,
    /// Version found in the descriptor.
    found: u32,
  },

  /// The plugin was built against another version of this crate.
  #[error("plugin built against backend {found}, host runs {expected}")]
  BackendVersion {
    /// Version of the host.
    expected: String,
    /// Version recorded by the plugin.
    found: String,
  },

  /// The descriptor has no constructor.
  #[error("descriptor has no engine constructor")]
  MissingConstructor,

  /// The constructor returned null (it failed or panicked).
  #[error("engine constructor returned no engine")]
  NullEngine,

  /// The engine has an empty name.
  #[error("engine has an empty name")]
  UnnamedEngine,

  /// The engine does not implement exactly the capabilities it claims.
  #[error("engine claims capabilities [{claimed}] but provides [{provided}]")]
  Capabilities {
    /// Set announced in the descriptor.
    claimed: CapabilitySet,
    /// Set the constructed engine actually implements.
    provided: CapabilitySet,
  },
}

/// Validate a descriptor and construct its engine.
///
/// # Safety
///
/// `descriptor` must be null or point to a descriptor that stays valid for
/// the duration of the call, and the module that produced it must stay
/// loaded for as long as the returned engine (and anything it creates) lives.
pub unsafe fn accept(descriptor: *const PluginDescriptor) -> Result<Engine, Mismatch> {
  // SAFETY: Caller guarantees the pointer is null or valid.
  let Some(descriptor) = (unsafe { descriptor.as_ref() }) else {
    return Err(Mismatch::NullDescriptor);
  };

  if descriptor.abi_version != ABI_VERSION {
    return Err(Mismatch::AbiVersion { expected: ABI_VERSION, found: descriptor.abi_version });
  }

  let found = descriptor.backend_version();
  if found != Some(BACKEND_VERSION) {
    return Err(Mismatch::BackendVersion {
      expected: BACKEND_VERSION.to_owned(),
      found: found.unwrap_or("<unreadable>").to_owned(),
    });
  }

  let construct = descriptor.construct.ok_or(Mismatch::MissingConstructor)?;
  let raw = construct();
  if raw.is_null() {
    return Err(Mismatch::NullEngine);
  }
  // SAFETY: Descriptors with this ABI and backend version come from
  // `export_engine!`, whose constructor returns `Box::<Engine>::into_raw`.
  let engine = unsafe { *Box::from_raw(raw.cast::<Engine>()) };

  if engine.name().is_empty() {
    return Err(Mismatch::UnnamedEngine);
  }

  let claimed = descriptor.claimed();
  let provided = engine.capabilities();
  if claimed != provided {
    return Err(Mismatch::Capabilities { claimed, provided });
  }

  tracing::debug!(engine = engine.name(), capabilities = %provided, "plugin descriptor accepted");
  Ok(engine)
}

/// Run an engine constructor on the plugin side of the boundary.
///
/// Used by [`export_engine!`]; panics are caught and reported as null so
/// they never unwind into the host.
#[doc(hidden)]
#[must_use]
pub fn construct_engine(constructor: fn() -> Engine) -> *mut c_void {
  match panic::catch_unwind(constructor) {
    Ok(engine) => Box::into_raw(Box::new(engine)).cast(),
    Err(_) => ptr::null_mut(),
  }
}

/// Export an engine constructor as this library's plugin entry point.
///
/// The bracketed list names the [`Capability`](crate::Capability) variants
/// the engine implements; the host rejects the plugin if the constructed
/// engine provides a different set.
///
/// ```ignore
/// backend::export_engine!(build_engine => [Aes, Sha2]);
/// ```
#[macro_export]
macro_rules! export_engine {
  ($constructor:path => [$($cap:ident),* $(,)?]) => {
    /// Plugin entry point.
    #[unsafe(no_mangle)]
    pub extern "C" fn plugcrypto_engine_entry() -> *const $crate::plugin::PluginDescriptor {
      extern "C" fn construct() -> *mut ::core::ffi::c_void {
        $crate::plugin::construct_engine($constructor)
      }

      static DESCRIPTOR: $crate::plugin::PluginDescriptor = $crate::plugin::PluginDescriptor::new(
        $crate::CapabilitySet::of(&[$($crate::Capability::$cap),*]),
        construct,
      );

      &DESCRIPTOR
    }
  };
}
