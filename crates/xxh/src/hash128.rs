//! 128-bit XXH3 digest.

use core::cmp::Ordering;

/// A 128-bit digest split into two 64-bit halves.
///
/// Ordering compares `high` first, then `low`, which is the same order as
/// comparing the big-endian canonical bytes (see [`Hash128::cmp_canonical`]).
/// The in-memory layout is not a wire format; serialize through
/// [`Canonical`](crate::Canonical).
///
/// # Examples
///
/// ```
/// use xxh::Hash128;
///
/// let h = Hash128::new(1, 2);
/// assert_eq!(u128::from(h), (1u128 << 64) | 2);
/// assert!(Hash128::new(1, 0) > Hash128::new(0, u64::MAX));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Hash128 {
  /// Upper 64 bits.
  pub high: u64,
  /// Lower 64 bits.
  pub low: u64,
}

impl Hash128 {
  #[inline]
  #[must_use]
  pub const fn new(high: u64, low: u64) -> Self {
    Self { high, low }
  }

  #[inline]
  #[must_use]
  pub const fn from_u128(value: u128) -> Self {
    Self {
      high: (value >> 64) as u64,
      low: value as u64,
    }
  }

  #[inline]
  #[must_use]
  pub const fn as_u128(self) -> u128 {
    ((self.high as u128) << 64) | self.low as u128
  }

  /// Big-endian bytes: `high` first.
  #[inline]
  #[must_use]
  pub const fn to_be_bytes(self) -> [u8; 16] {
    self.as_u128().to_be_bytes()
  }

  #[inline]
  #[must_use]
  pub const fn from_be_bytes(bytes: [u8; 16]) -> Self {
    Self::from_u128(u128::from_be_bytes(bytes))
  }

  /// Compare by canonical (big-endian) byte order.
  ///
  /// Always agrees with [`Ord`]; provided for callers that sort stored
  /// canonical digests and want to state that intent.
  #[inline]
  #[must_use]
  pub fn cmp_canonical(&self, other: &Self) -> Ordering {
    self.to_be_bytes().cmp(&other.to_be_bytes())
  }
}

impl From<u128> for Hash128 {
  #[inline]
  fn from(value: u128) -> Self {
    Self::from_u128(value)
  }
}

impl From<Hash128> for u128 {
  #[inline]
  fn from(value: Hash128) -> Self {
    value.as_u128()
  }
}

impl core::fmt::LowerHex for Hash128 {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{:016x}{:016x}", self.high, self.low)
  }
}
