//! Capability identification.
//!
//! A [`Capability`] names one primitive family that an engine may take over.
//! Capability granularity is the unit of substitution: an engine either
//! implements a whole family or none of it.
//!
//! [`CapabilitySet`] is a small bitmask over capabilities, used for engine
//! introspection and in the plugin descriptor.

use core::fmt;

/// Substitutable primitive family.
///
/// The enum is `#[non_exhaustive]` so new families can be added without
/// breaking engines built against an older set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
#[non_exhaustive]
pub enum Capability {
  /// AES block cipher construction.
  Aes = 0,
  /// DES and triple-DES block cipher construction.
  Des = 1,
  /// SHA-224/256/384/512.
  Sha2 = 2,
  /// HMAC over any SHA-2 hash.
  Hmac = 3,
  /// TLS 1.2 pseudo-random function.
  TlsPrf = 4,
}

impl Capability {
  /// Every capability, in bit order.
  pub const ALL: [Self; 5] = [Self::Aes, Self::Des, Self::Sha2, Self::Hmac, Self::TlsPrf];

  /// Stable name, e.g. `"aes"` or `"tls-prf"`.
  #[inline]
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Aes => "aes",
      Self::Des => "des",
      Self::Sha2 => "sha2",
      Self::Hmac => "hmac",
      Self::TlsPrf => "tls-prf",
    }
  }

  /// Look a capability up by its stable name (ASCII case-insensitive).
  ///
  /// Unknown names are `None`, never an error.
  #[must_use]
  pub fn from_name(name: &str) -> Option<Self> {
    let name = name.trim();
    Self::ALL.into_iter().find(|cap| cap.as_str().eq_ignore_ascii_case(name))
  }

  /// The single-member set for this capability.
  #[inline]
  #[must_use]
  pub const fn bit(self) -> CapabilitySet {
    CapabilitySet(1 << self as u8)
  }
}

impl fmt::Display for Capability {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Set of capabilities.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct CapabilitySet(u32);

impl CapabilitySet {
  /// No capabilities.
  pub const NONE: Self = Self(0);

  /// Every known capability.
  pub const ALL: Self = Self::of(&Capability::ALL);

  /// Build a set from a list of capabilities.
  #[must_use]
  pub const fn of(caps: &[Capability]) -> Self {
    let mut bits = 0u32;
    let mut i = 0;
    while i < caps.len() {
      bits |= caps[i].bit().0;
      i += 1;
    }
    Self(bits)
  }

  /// Raw bit representation, as carried across the plugin boundary.
  #[inline]
  #[must_use]
  pub const fn bits(self) -> u32 {
    self.0
  }

  /// Rebuild a set from raw bits. Bits that name no known capability are kept,
  /// so a set from a newer plugin compares unequal to anything we can build.
  #[inline]
  #[must_use]
  pub const fn from_bits(bits: u32) -> Self {
    Self(bits)
  }

  /// Whether every capability in `required` is present.
  #[inline]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  /// Whether `cap` is present.
  #[inline]
  #[must_use]
  pub const fn contains(self, cap: Capability) -> bool {
    self.has(cap.bit())
  }

  /// Union of two sets.
  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  /// Set with `cap` added.
  #[inline]
  #[must_use]
  pub const fn with(self, cap: Capability) -> Self {
    self.union(cap.bit())
  }

  /// Whether the set is empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Number of capabilities present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Iterate over the known capabilities present, in bit order.
  pub fn iter(self) -> impl Iterator<Item = Capability> {
    Capability::ALL.into_iter().filter(move |cap| self.contains(*cap))
  }
}

impl fmt::Display for CapabilitySet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.is_empty() {
      return f.write_str("none");
    }
    let mut first = true;
    for cap in self.iter() {
      if !first {
        f.write_str(",")?;
      }
      f.write_str(cap.as_str())?;
      first = false;
    }
    Ok(())
  }
}

impl fmt::Debug for CapabilitySet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "CapabilitySet({self})")
  }
}

impl From<Capability> for CapabilitySet {
  #[inline]
  fn from(cap: Capability) -> Self {
    cap.bit()
  }
}

impl FromIterator<Capability> for CapabilitySet {
  fn from_iter<I: IntoIterator<Item = Capability>>(iter: I) -> Self {
    iter.into_iter().fold(Self::NONE, Self::with)
  }
}
