//! Canonical (big-endian) digest encoding.
//!
//! Digests are integers in memory; their only stable byte representation is
//! big-endian, matching what `xxhsum` prints and what other xxHash ports
//! exchange. 4, 8 and 16 bytes for 32-, 64- and 128-bit digests.

use crate::Hash128;

/// A digest with a fixed big-endian byte encoding.
///
/// # Examples
///
/// ```
/// use xxh::{Canonical, Hash128};
///
/// assert_eq!(0x0102_0304u32.to_canonical(), [1, 2, 3, 4]);
/// let h = Hash128::new(7, 9);
/// assert_eq!(Hash128::from_canonical(h.to_canonical()), h);
/// ```
pub trait Canonical: Sized + Copy {
  /// `[u8; N]` for an `N`-byte digest.
  type Bytes: Copy + AsRef<[u8]>;

  #[must_use]
  fn to_canonical(self) -> Self::Bytes;

  #[must_use]
  fn from_canonical(bytes: Self::Bytes) -> Self;
}

impl Canonical for u32 {
  type Bytes = [u8; 4];

  #[inline]
  fn to_canonical(self) -> [u8; 4] {
    self.to_be_bytes()
  }

  #[inline]
  fn from_canonical(bytes: [u8; 4]) -> Self {
    Self::from_be_bytes(bytes)
  }
}

impl Canonical for u64 {
  type Bytes = [u8; 8];

  #[inline]
  fn to_canonical(self) -> [u8; 8] {
    self.to_be_bytes()
  }

  #[inline]
  fn from_canonical(bytes: [u8; 8]) -> Self {
    Self::from_be_bytes(bytes)
  }
}

impl Canonical for Hash128 {
  type Bytes = [u8; 16];

  #[inline]
  fn to_canonical(self) -> [u8; 16] {
    self.to_be_bytes()
  }

  #[inline]
  fn from_canonical(bytes: [u8; 16]) -> Self {
    Self::from_be_bytes(bytes)
  }
}
