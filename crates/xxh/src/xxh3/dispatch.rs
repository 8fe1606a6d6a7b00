//! Default entry points, bound to [`Variant::DEFAULT`] at compile time.

use super::{
  MID_SIZE_MAX,
  kernels::{Kernel, Variant, kernel},
};
use crate::Hash128;

/// Kernel for [`Variant::DEFAULT`].
pub const DEFAULT_KERNEL: Kernel = kernel(Variant::DEFAULT);

/// Name of the variant that mixes an input of `len` bytes through the
/// module-level functions.
///
/// Inputs of at most 240 bytes never reach the block-mixing loop and report
/// `"scalar"`.
#[inline]
#[must_use]
pub const fn kernel_name_for_len(len: usize) -> &'static str {
  if len <= MID_SIZE_MAX {
    Variant::Scalar.as_str()
  } else {
    DEFAULT_KERNEL.name()
  }
}

/// XXH3-64 of `data` with `seed`.
#[inline]
#[must_use]
pub fn hash64(data: &[u8], seed: u64) -> u64 {
  // SAFETY: `Variant::DEFAULT` only names variants enabled at compile time.
  unsafe { (DEFAULT_KERNEL.hash64)(data, seed) }
}

/// XXH3-64 of `data` with seed 0.
#[inline]
#[must_use]
pub fn hash64_unseeded(data: &[u8]) -> u64 {
  hash64(data, 0)
}

/// XXH3-128 of `data` with `seed`.
#[inline]
#[must_use]
pub fn hash128(data: &[u8], seed: u64) -> Hash128 {
  // SAFETY: `Variant::DEFAULT` only names variants enabled at compile time.
  unsafe { (DEFAULT_KERNEL.hash128)(data, seed) }
}

/// XXH3-128 of `data` with seed 0.
#[inline]
#[must_use]
pub fn hash128_unseeded(data: &[u8]) -> Hash128 {
  hash128(data, 0)
}

/// XXH3-64 of `data` keyed by `secret`.
///
/// # Panics
///
/// If `secret` is shorter than [`SECRET_SIZE_MIN`](super::SECRET_SIZE_MIN).
#[inline]
#[must_use]
pub fn hash64_with_secret(data: &[u8], secret: &[u8]) -> u64 {
  // SAFETY: `Variant::DEFAULT` only names variants enabled at compile time.
  unsafe { (DEFAULT_KERNEL.hash64_with_secret)(data, secret) }
}

/// XXH3-128 of `data` keyed by `secret`.
///
/// # Panics
///
/// If `secret` is shorter than [`SECRET_SIZE_MIN`](super::SECRET_SIZE_MIN).
#[inline]
#[must_use]
pub fn hash128_with_secret(data: &[u8], secret: &[u8]) -> Hash128 {
  // SAFETY: `Variant::DEFAULT` only names variants enabled at compile time.
  unsafe { (DEFAULT_KERNEL.hash128_with_secret)(data, secret) }
}

/// XXH3-64 keyed by `seed` up to 240 bytes and by `secret` beyond.
///
/// # Panics
///
/// If `secret` is shorter than [`SECRET_SIZE_MIN`](super::SECRET_SIZE_MIN).
#[inline]
#[must_use]
pub fn hash64_with_secret_and_seed(data: &[u8], secret: &[u8], seed: u64) -> u64 {
  // SAFETY: `Variant::DEFAULT` only names variants enabled at compile time.
  unsafe { (DEFAULT_KERNEL.hash64_with_secret_and_seed)(data, secret, seed) }
}

/// XXH3-128 keyed by `seed` up to 240 bytes and by `secret` beyond.
///
/// # Panics
///
/// If `secret` is shorter than [`SECRET_SIZE_MIN`](super::SECRET_SIZE_MIN).
#[inline]
#[must_use]
pub fn hash128_with_secret_and_seed(data: &[u8], secret: &[u8], seed: u64) -> Hash128 {
  // SAFETY: `Variant::DEFAULT` only names variants enabled at compile time.
  unsafe { (DEFAULT_KERNEL.hash128_with_secret_and_seed)(data, secret, seed) }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn kernel_name_by_length() {
    assert_eq!(kernel_name_for_len(0), "scalar");
    assert_eq!(kernel_name_for_len(MID_SIZE_MAX), "scalar");
    assert_eq!(kernel_name_for_len(MID_SIZE_MAX + 1), Variant::DEFAULT.as_str());
    assert_eq!(DEFAULT_KERNEL.variant, Variant::DEFAULT);
  }

  #[test]
  fn default_equals_scalar() {
    let data = [0x5Au8; 4096];
    for len in [0usize, 100, 241, 4096] {
      assert_eq!(hash64(&data[..len], 3), super::super::scalar::hash64(&data[..len], 3));
      assert_eq!(hash128(&data[..len], 3), super::super::scalar::hash128(&data[..len], 3));
    }
  }
}
