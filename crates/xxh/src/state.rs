//! Reusable, heap-backed hash state handle.
//!
//! [`HashState`] holds one algorithm family at a time, chosen by the last
//! reset. Typed hashers ([`Xxh3_64`], [`Xxh32`], ...) are the better fit when
//! the family is known statically; the handle exists for callers that pick
//! the family at runtime and want to reuse one allocation across many
//! messages.

use alloc::boxed::Box;

use traits::StateError;

use crate::{
  Hash128,
  xxh3::{Secret, Variant, Xxh3_64, Xxh3_128},
  xxh32::Xxh32,
  xxh64::Xxh64,
};

#[derive(Clone)]
enum Family {
  Xxh32(Xxh32),
  Xxh64(Xxh64),
  Xxh3_64(Xxh3_64),
  Xxh3_128(Xxh3_128),
}

impl Family {
  const fn name(&self) -> &'static str {
    match self {
      Self::Xxh32(_) => "xxh32",
      Self::Xxh64(_) => "xxh64",
      Self::Xxh3_64(_) => "xxh3-64",
      Self::Xxh3_128(_) => "xxh3-128",
    }
  }

  fn update(&mut self, data: &[u8]) {
    match self {
      Self::Xxh32(h) => h.update(data),
      Self::Xxh64(h) => h.update(data),
      Self::Xxh3_64(h) => h.update(data),
      Self::Xxh3_128(h) => h.update(data),
    }
  }
}

/// A hash state for any family, reset at runtime.
///
/// Lifecycle: [`new`](Self::new) → `reset_*` → [`update`](Self::update)* →
/// `digest*` (repeatable) → drop. Resets may be repeated and reuse the
/// allocation.
///
/// # Examples
///
/// ```
/// use xxh::HashState;
///
/// let mut state = HashState::new();
/// state.reset_xxh3_64(0);
/// state.update(b"hello")?;
/// assert_eq!(state.digest64()?, xxh::xxh3::hash64(b"hello", 0));
///
/// assert!(state.digest32().is_err());
/// # Ok::<(), traits::StateError>(())
/// ```
#[derive(Clone, Default)]
pub struct HashState {
  inner: Option<Box<Family>>,
}

impl HashState {
  /// Fresh handle; every operation except a reset fails until one happens.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self { inner: None }
  }

  /// Whether any reset has happened.
  #[inline]
  #[must_use]
  pub fn is_reset(&self) -> bool {
    self.inner.is_some()
  }

  /// Family of the last reset: `xxh32`, `xxh64`, `xxh3-64` or `xxh3-128`.
  #[inline]
  #[must_use]
  pub fn family(&self) -> Option<&'static str> {
    self.inner.as_deref().map(Family::name)
  }

  fn install(&mut self, family: Family) {
    match &mut self.inner {
      Some(slot) => **slot = family,
      None => self.inner = Some(Box::new(family)),
    }
  }

  // ─── Resets ───────────────────────────────────────────────────────────────

  pub fn reset_xxh32(&mut self, seed: u32) {
    self.install(Family::Xxh32(Xxh32::with_seed(seed)));
  }

  pub fn reset_xxh64(&mut self, seed: u64) {
    self.install(Family::Xxh64(Xxh64::with_seed(seed)));
  }

  pub fn reset_xxh3_64(&mut self, seed: u64) {
    self.install(Family::Xxh3_64(Xxh3_64::with_seed(seed)));
  }

  pub fn reset_xxh3_64_unseeded(&mut self) {
    self.install(Family::Xxh3_64(Xxh3_64::new()));
  }

  /// # Errors
  ///
  /// [`StateError::SecretTooShort`]; the state is left unchanged.
  pub fn reset_xxh3_64_with_secret(&mut self, secret: &[u8]) -> Result<(), StateError> {
    let secret = Secret::new(secret)?;
    self.install(Family::Xxh3_64(Xxh3_64::with_secret(secret)));
    Ok(())
  }

  /// # Errors
  ///
  /// [`StateError::SecretTooShort`]; the state is left unchanged.
  pub fn reset_xxh3_64_with_secret_and_seed(&mut self, secret: &[u8], seed: u64) -> Result<(), StateError> {
    let secret = Secret::new(secret)?;
    self.install(Family::Xxh3_64(Xxh3_64::with_secret_and_seed(secret, seed)));
    Ok(())
  }

  pub fn reset_xxh3_128(&mut self, seed: u64) {
    self.install(Family::Xxh3_128(Xxh3_128::with_seed(seed)));
  }

  pub fn reset_xxh3_128_unseeded(&mut self) {
    self.install(Family::Xxh3_128(Xxh3_128::new()));
  }

  /// # Errors
  ///
  /// [`StateError::SecretTooShort`]; the state is left unchanged.
  pub fn reset_xxh3_128_with_secret(&mut self, secret: &[u8]) -> Result<(), StateError> {
    let secret = Secret::new(secret)?;
    self.install(Family::Xxh3_128(Xxh3_128::with_secret(secret)));
    Ok(())
  }

  /// # Errors
  ///
  /// [`StateError::SecretTooShort`]; the state is left unchanged.
  pub fn reset_xxh3_128_with_secret_and_seed(&mut self, secret: &[u8], seed: u64) -> Result<(), StateError> {
    let secret = Secret::new(secret)?;
    self.install(Family::Xxh3_128(Xxh3_128::with_secret_and_seed(secret, seed)));
    Ok(())
  }

  /// Mix XXH3 input through `variant`. No effect on XXH32/XXH64 states or
  /// on digests.
  ///
  /// # Safety
  ///
  /// The CPU must support `variant`'s
  /// [`required_caps`](Variant::required_caps).
  pub unsafe fn set_variant(&mut self, variant: Variant) {
    match self.inner.as_deref_mut() {
      // SAFETY: forwarded to the caller.
      Some(Family::Xxh3_64(h)) => unsafe { h.set_variant(variant) },
      // SAFETY: forwarded to the caller.
      Some(Family::Xxh3_128(h)) => unsafe { h.set_variant(variant) },
      _ => {}
    }
  }

  // ─── Absorb / digest ──────────────────────────────────────────────────────

  /// Absorb `data`.
  ///
  /// # Errors
  ///
  /// [`StateError::NotReset`] before the first reset; nothing is absorbed.
  pub fn update(&mut self, data: &[u8]) -> Result<(), StateError> {
    let family = self.inner.as_deref_mut().ok_or(StateError::NotReset)?;
    family.update(data);
    Ok(())
  }

  fn family_ref(&self) -> Result<&Family, StateError> {
    self.inner.as_deref().ok_or(StateError::NotReset)
  }

  /// XXH32 digest.
  ///
  /// # Errors
  ///
  /// [`StateError::NotReset`] or [`StateError::FamilyMismatch`].
  pub fn digest32(&self) -> Result<u32, StateError> {
    match self.family_ref()? {
      Family::Xxh32(h) => Ok(h.digest()),
      other => Err(mismatch("xxh32", other)),
    }
  }

  /// XXH64 or XXH3-64 digest, whichever the state was reset for.
  ///
  /// # Errors
  ///
  /// [`StateError::NotReset`] or [`StateError::FamilyMismatch`].
  pub fn digest64(&self) -> Result<u64, StateError> {
    match self.family_ref()? {
      Family::Xxh64(h) => Ok(h.digest()),
      Family::Xxh3_64(h) => Ok(h.digest()),
      other => Err(mismatch("xxh64 or xxh3-64", other)),
    }
  }

  /// XXH3-128 digest.
  ///
  /// # Errors
  ///
  /// [`StateError::NotReset`] or [`StateError::FamilyMismatch`].
  pub fn digest128(&self) -> Result<Hash128, StateError> {
    match self.family_ref()? {
      Family::Xxh3_128(h) => Ok(h.digest()),
      other => Err(mismatch("xxh3-128", other)),
    }
  }

  /// Make `self` a deep copy of `src`, reusing `self`'s allocation.
  ///
  /// # Errors
  ///
  /// [`StateError::NotReset`] if `src` was never reset; `self` is unchanged.
  pub fn copy_from(&mut self, src: &Self) -> Result<(), StateError> {
    let family = src.family_ref()?;
    self.install(family.clone());
    Ok(())
  }
}

#[cold]
fn mismatch(expected: &'static str, found: &Family) -> StateError {
  StateError::FamilyMismatch {
    expected,
    found: found.name(),
  }
}

impl core::fmt::Debug for HashState {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("HashState").field("family", &self.family()).finish()
  }
}
