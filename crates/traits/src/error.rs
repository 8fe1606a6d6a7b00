//! Error types for hash state handles.
//!
//! One-shot hashing and typed streaming hashers cannot fail. Errors only arise
//! from a reusable handle that can be in the wrong lifecycle phase, or from a
//! caller-supplied secret that is too short to key XXH3.

use core::fmt;

/// Misuse of a hash state handle.
///
/// Returned where the C-style API would have returned an `ERROR` status or a
/// sentinel zero digest. A failed call never leaves partially absorbed bytes
/// behind.
///
/// # Examples
///
/// ```
/// use traits::StateError;
///
/// fn require_reset(was_reset: bool) -> Result<(), StateError> {
///   if was_reset { Ok(()) } else { Err(StateError::NotReset) }
/// }
///
/// assert_eq!(require_reset(false), Err(StateError::NotReset));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StateError {
  /// `update` or `digest` was called before any reset.
  NotReset,
  /// The handle was reset for one algorithm family and queried as another.
  FamilyMismatch {
    /// Family the caller asked for.
    expected: &'static str,
    /// Family the handle was last reset for.
    found: &'static str,
  },
  /// A secret shorter than the XXH3 minimum was supplied.
  SecretTooShort {
    /// Length that was supplied.
    len: usize,
    /// Minimum accepted length.
    min: usize,
  },
}

impl StateError {
  /// Short, stable identifier for the error kind.
  #[inline]
  #[must_use]
  pub const fn kind(&self) -> &'static str {
    match self {
      Self::NotReset => "not-reset",
      Self::FamilyMismatch { .. } => "family-mismatch",
      Self::SecretTooShort { .. } => "secret-too-short",
    }
  }
}

impl fmt::Display for StateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::NotReset => f.write_str("hash state used before reset"),
      Self::FamilyMismatch { expected, found } => {
        write!(f, "hash state was reset for {found}, not {expected}")
      }
      Self::SecretTooShort { len, min } => {
        write!(f, "secret is {len} bytes, at least {min} required")
      }
    }
  }
}

impl core::error::Error for StateError {}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::{format, string::ToString};

  use super::*;

  #[test]
  fn display_messages() {
    assert_eq!(StateError::NotReset.to_string(), "hash state used before reset");
    assert_eq!(
      StateError::FamilyMismatch {
        expected: "xxh3-128",
        found: "xxh32",
      }
      .to_string(),
      "hash state was reset for xxh32, not xxh3-128"
    );
    assert_eq!(
      StateError::SecretTooShort { len: 10, min: 136 }.to_string(),
      "secret is 10 bytes, at least 136 required"
    );
  }

  #[test]
  fn debug_impl() {
    assert_eq!(format!("{:?}", StateError::NotReset), "NotReset");
  }

  #[test]
  fn kinds_are_distinct() {
    let kinds = [
      StateError::NotReset.kind(),
      StateError::FamilyMismatch {
        expected: "a",
        found: "b",
      }
      .kind(),
      StateError::SecretTooShort { len: 0, min: 1 }.kind(),
    ];
    assert_ne!(kinds[0], kinds[1]);
    assert_ne!(kinds[1], kinds[2]);
    assert_ne!(kinds[0], kinds[2]);
  }

  #[test]
  fn trait_bounds() {
    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}
    fn assert_error<T: core::error::Error>() {}

    assert_send::<StateError>();
    assert_sync::<StateError>();
    assert_error::<StateError>();
  }

  #[test]
  fn error_has_no_source() {
    use core::error::Error;

    assert!(StateError::NotReset.source().is_none());
  }
}
