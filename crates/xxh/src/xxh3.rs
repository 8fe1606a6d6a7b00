//! XXH3 (**NOT CRYPTO**): 64- and 128-bit.
//!
//! # Variants
//!
//! The long-input stripe loop exists once, generic over a block-mixing
//! [`Variant`]: scalar, SSE2, AVX2 and AVX-512 on x86_64, NEON on aarch64.
//! Every variant produces the same bits. Each one is exposed as a module with
//! the same function surface ([`scalar`], `sse2`, `avx2`, `avx512`, `neon`);
//! entry points of variants that are not part of the target baseline are
//! `unsafe fn` and the caller vouches for the CPU.
//!
//! The functions at this module's root use [`Variant::DEFAULT`], the best
//! variant guaranteed by compile-time target features. Nothing in this crate
//! probes the CPU at runtime.
//!
//! # Modes
//!
//! | Mode | Functions |
//! |------|-----------|
//! | seeded | [`hash64`], [`hash128`] |
//! | unseeded (seed 0) | [`hash64_unseeded`], [`hash128_unseeded`] |
//! | custom secret | [`hash64_with_secret`], [`hash128_with_secret`] |
//! | secret + seed | [`hash64_with_secret_and_seed`], [`hash128_with_secret_and_seed`] |
//!
//! In secret + seed mode inputs up to 240 bytes hash exactly like the seeded
//! mode and longer inputs exactly like the custom-secret mode.
//!
//! # Examples
//!
//! ```
//! use xxh::xxh3;
//!
//! assert_eq!(xxh3::hash64_unseeded(b""), 0x2D06_8005_38D3_94C2);
//!
//! let mut h = xxh3::Xxh3_64::with_seed(7);
//! h.update(b"split ");
//! h.update(b"input");
//! assert_eq!(h.digest(), xxh3::hash64(b"split input", 7));
//! ```

#![allow(clippy::indexing_slicing)] // Tight block parsing + fixed-size arrays

use core::mem;

use traits::StateError;

use crate::{
  Hash128,
  xxh64::{PRIME64_1, PRIME64_2, PRIME64_3, PRIME64_4, PRIME64_5},
};

#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
mod aarch64;
mod dispatch;
mod kernels;
mod long;
mod portable;
mod secret;
mod short;
mod streaming;
mod variants;
#[cfg(target_arch = "x86_64")]
mod x86_64;

pub use dispatch::{
  DEFAULT_KERNEL, hash64, hash64_unseeded, hash64_with_secret, hash64_with_secret_and_seed, hash128,
  hash128_unseeded, hash128_with_secret, hash128_with_secret_and_seed, kernel_name_for_len,
};
pub use kernels::{
  Hash64Fn, Hash64SecretFn, Hash64SecretSeedFn, Hash128Fn, Hash128SecretFn, Hash128SecretSeedFn, Kernel, Variant,
  kernel,
};
pub use secret::{generate_secret, generate_secret_from_seed, generate_secret_scrambled};
pub use streaming::{Xxh3_64, Xxh3_128, Xxh3Builder};
#[cfg(all(target_arch = "aarch64", target_endian = "little"))]
pub use variants::neon;
pub use variants::scalar;
#[cfg(target_arch = "x86_64")]
pub use variants::{avx2, avx512, sse2};

// xxh32 primes (used in scramble/mix)
const PRIME32_1: u32 = 0x9E37_79B1;
const PRIME32_2: u32 = 0x85EB_CA77;
const PRIME32_3: u32 = 0xC2B2_AE3D;

const PRIME_MX1: u64 = 0x1656_6791_9E37_79F9;
const PRIME_MX2: u64 = 0x9FB2_1C65_1E98_DF25;

const STRIPE_LEN: usize = 64;
const SECRET_CONSUME_RATE: usize = 8;
const ACC_NB: usize = STRIPE_LEN / mem::size_of::<u64>();

const SECRET_MERGEACCS_START: usize = 11;
const SECRET_LASTACC_START: usize = 7; // not 8-aligned; last secret differs from acc & scrambler

const MID_SIZE_MAX: usize = 240;

/// Shortest secret accepted by any XXH3 function.
pub const SECRET_SIZE_MIN: usize = 136;

/// Length of [`DEFAULT_SECRET`] and of secrets derived from a seed.
pub const DEFAULT_SECRET_SIZE: usize = 192;

/// The built-in secret used by the seeded and unseeded modes.
pub const DEFAULT_SECRET: [u8; DEFAULT_SECRET_SIZE] = [
  0xb8, 0xfe, 0x6c, 0x39, 0x23, 0xa4, 0x4b, 0xbe, 0x7c, 0x01, 0x81, 0x2c, 0xf7, 0x21, 0xad, 0x1c, 0xde, 0xd4, 0x6d,
  0xe9, 0x83, 0x90, 0x97, 0xdb, 0x72, 0x40, 0xa4, 0xa4, 0xb7, 0xb3, 0x67, 0x1f, 0xcb, 0x79, 0xe6, 0x4e, 0xcc, 0xc0,
  0xe5, 0x78, 0x82, 0x5a, 0xd0, 0x7d, 0xcc, 0xff, 0x72, 0x21, 0xb8, 0x08, 0x46, 0x74, 0xf7, 0x43, 0x24, 0x8e, 0xe0,
  0x35, 0x90, 0xe6, 0x81, 0x3a, 0x26, 0x4c, 0x3c, 0x28, 0x52, 0xbb, 0x91, 0xc3, 0x00, 0xcb, 0x88, 0xd0, 0x65, 0x8b,
  0x1b, 0x53, 0x2e, 0xa3, 0x71, 0x64, 0x48, 0x97, 0xa2, 0x0d, 0xf9, 0x4e, 0x38, 0x19, 0xef, 0x46, 0xa9, 0xde, 0xac,
  0xd8, 0xa8, 0xfa, 0x76, 0x3f, 0xe3, 0x9c, 0x34, 0x3f, 0xf9, 0xdc, 0xbb, 0xc7, 0xc7, 0x0b, 0x4f, 0x1d, 0x8a, 0x51,
  0xe0, 0x4b, 0xcd, 0xb4, 0x59, 0x31, 0xc8, 0x9f, 0x7e, 0xc9, 0xd9, 0x78, 0x73, 0x64, 0xea, 0xc5, 0xac, 0x83, 0x34,
  0xd3, 0xeb, 0xc3, 0xc5, 0x81, 0xa0, 0xff, 0xfa, 0x13, 0x63, 0xeb, 0x17, 0x0d, 0xdd, 0x51, 0xb7, 0xf0, 0xda, 0x49,
  0xd3, 0x16, 0x55, 0x26, 0x29, 0xd4, 0x68, 0x9e, 0x2b, 0x16, 0xbe, 0x58, 0x7d, 0x47, 0xa1, 0xfc, 0x8f, 0xf8, 0xb8,
  0xd1, 0x7a, 0xd0, 0x31, 0xce, 0x45, 0xcb, 0x3a, 0x8f, 0x95, 0x16, 0x04, 0x28, 0xaf, 0xd7, 0xfb, 0xca, 0xbb, 0x4b,
  0x40, 0x7e,
];

const INITIAL_ACC: [u64; ACC_NB] = [
  PRIME32_3 as u64,
  PRIME64_1,
  PRIME64_2,
  PRIME64_3,
  PRIME64_4,
  PRIME32_2 as u64,
  PRIME64_5,
  PRIME32_1 as u64,
];

type Acc = [u64; ACC_NB];

// ─── Shared arithmetic ──────────────────────────────────────────────────────

#[inline(always)]
const fn mult32_to64(left: u32, right: u32) -> u64 {
  (left as u64).wrapping_mul(right as u64)
}

#[inline(always)]
const fn xorshift64(value: u64, shift: u32) -> u64 {
  value ^ (value >> shift)
}

#[inline(always)]
const fn avalanche(mut value: u64) -> u64 {
  value = xorshift64(value, 37);
  value = value.wrapping_mul(PRIME_MX1);
  xorshift64(value, 32)
}

#[inline(always)]
const fn mul64_to128(left: u64, right: u64) -> (u64, u64) {
  let product = (left as u128).wrapping_mul(right as u128);
  (product as u64, (product >> 64) as u64)
}

#[inline(always)]
const fn mul128_fold64(left: u64, right: u64) -> u64 {
  let (low, high) = mul64_to128(left, right);
  low ^ high
}

// ─── Secrets ────────────────────────────────────────────────────────────────

/// A caller-supplied XXH3 secret, validated to be at least
/// [`SECRET_SIZE_MIN`] bytes.
///
/// The raw-slice functions ([`hash64_with_secret`] and friends) panic on an
/// undersized secret; `Secret` moves that check to construction so streaming
/// hashers and [`HashState`](crate::HashState) can report it as an error.
///
/// # Examples
///
/// ```
/// use xxh::xxh3::{Secret, generate_secret_from_seed};
///
/// let bytes = generate_secret_from_seed(42);
/// let secret = Secret::new(&bytes)?;
/// assert_eq!(secret.len(), 192);
/// assert!(Secret::new(&bytes[..100]).is_err());
/// # Ok::<(), traits::StateError>(())
/// ```
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Secret<'a>(&'a [u8]);

impl<'a> Secret<'a> {
  /// The built-in secret.
  pub const DEFAULT: Secret<'static> = Secret(&DEFAULT_SECRET);

  /// Validate `bytes` as a secret.
  ///
  /// # Errors
  ///
  /// [`StateError::SecretTooShort`] when `bytes` is shorter than
  /// [`SECRET_SIZE_MIN`].
  #[inline]
  pub const fn new(bytes: &'a [u8]) -> Result<Self, StateError> {
    if bytes.len() < SECRET_SIZE_MIN {
      return Err(StateError::SecretTooShort {
        len: bytes.len(),
        min: SECRET_SIZE_MIN,
      });
    }
    Ok(Self(bytes))
  }

  #[inline]
  #[must_use]
  pub const fn as_bytes(&self) -> &'a [u8] {
    self.0
  }

  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.0.len()
  }

  /// Always `false`: a valid secret is never empty.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl AsRef<[u8]> for Secret<'_> {
  #[inline]
  fn as_ref(&self) -> &[u8] {
    self.0
  }
}

impl<'a> TryFrom<&'a [u8]> for Secret<'a> {
  type Error = StateError;

  #[inline]
  fn try_from(bytes: &'a [u8]) -> Result<Self, StateError> {
    Self::new(bytes)
  }
}

impl core::fmt::Debug for Secret<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Secret").field("len", &self.0.len()).finish_non_exhaustive()
  }
}

#[inline(always)]
#[track_caller]
fn check_secret(secret: &[u8]) {
  assert!(
    secret.len() >= SECRET_SIZE_MIN,
    "XXH3 secret must be at least {SECRET_SIZE_MIN} bytes, got {}",
    secret.len()
  );
}

// ─── Modes, generic over the block-mixing variant ───────────────────────────

#[inline(always)]
fn hash64_seeded<L: kernels::Lanes>(lanes: L, input: &[u8], seed: u64) -> u64 {
  if input.len() <= MID_SIZE_MAX {
    short::hash64(input, seed, &DEFAULT_SECRET)
  } else if seed == 0 {
    long::hash64(lanes, input, &DEFAULT_SECRET)
  } else {
    let secret = secret::custom_default_secret(seed);
    long::hash64(lanes, input, &secret)
  }
}

#[inline(always)]
#[track_caller]
fn hash64_with_custom_secret<L: kernels::Lanes>(lanes: L, input: &[u8], secret: &[u8]) -> u64 {
  check_secret(secret);
  if input.len() <= MID_SIZE_MAX {
    short::hash64(input, 0, secret)
  } else {
    long::hash64(lanes, input, secret)
  }
}

#[inline(always)]
#[track_caller]
fn hash64_with_custom_secret_and_seed<L: kernels::Lanes>(lanes: L, input: &[u8], secret: &[u8], seed: u64) -> u64 {
  check_secret(secret);
  if input.len() <= MID_SIZE_MAX {
    short::hash64(input, seed, &DEFAULT_SECRET)
  } else {
    long::hash64(lanes, input, secret)
  }
}

#[inline(always)]
fn hash128_seeded<L: kernels::Lanes>(lanes: L, input: &[u8], seed: u64) -> Hash128 {
  if input.len() <= MID_SIZE_MAX {
    short::hash128(input, seed, &DEFAULT_SECRET)
  } else if seed == 0 {
    long::hash128(lanes, input, &DEFAULT_SECRET)
  } else {
    let secret = secret::custom_default_secret(seed);
    long::hash128(lanes, input, &secret)
  }
}

#[inline(always)]
#[track_caller]
fn hash128_with_custom_secret<L: kernels::Lanes>(lanes: L, input: &[u8], secret: &[u8]) -> Hash128 {
  check_secret(secret);
  if input.len() <= MID_SIZE_MAX {
    short::hash128(input, 0, secret)
  } else {
    long::hash128(lanes, input, secret)
  }
}

#[inline(always)]
#[track_caller]
fn hash128_with_custom_secret_and_seed<L: kernels::Lanes>(
  lanes: L,
  input: &[u8],
  secret: &[u8],
  seed: u64,
) -> Hash128 {
  check_secret(secret);
  if input.len() <= MID_SIZE_MAX {
    short::hash128(input, seed, &DEFAULT_SECRET)
  } else {
    long::hash128(lanes, input, secret)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use proptest::prelude::*;

  use super::*;

  fn deterministic_bytes(len: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; len];
    let mut x = 0x243f_6a88_85a3_08d3u64;
    for b in &mut out {
      x = x.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      *b = (x >> 56) as u8;
    }
    out
  }

  #[test]
  fn empty_input_known_values() {
    assert_eq!(hash64_unseeded(b""), 0x2D06_8005_38D3_94C2);
    let h = hash128_unseeded(b"");
    assert_eq!(h.high, 0x99aa_06d3_0147_98d8);
    assert_eq!(h.low, 0x6001_c324_468d_497f);
  }

  #[test]
  fn every_length_class_matches_oracle() {
    let sizes = [
      0usize, 1, 2, 3, 4, 5, 8, 9, 15, 16, 17, 32, 33, 64, 65, 96, 97, 128, 129, 200, 239, 240, 241, 255, 256, 257,
      1023, 1024, 1025, 4096, 65536,
    ];
    let seeds = [0u64, 1u64, 0x0123_4567_89ab_cdef, u64::MAX];

    for &seed in &seeds {
      for &len in &sizes {
        let data = deterministic_bytes(len);
        assert_eq!(
          hash64(&data, seed),
          xxhash_rust::xxh3::xxh3_64_with_seed(&data, seed),
          "xxh3_64 mismatch (seed={seed}, len={len})"
        );
        assert_eq!(
          hash128(&data, seed).as_u128(),
          xxhash_rust::xxh3::xxh3_128_with_seed(&data, seed),
          "xxh3_128 mismatch (seed={seed}, len={len})"
        );
      }
    }
  }

  #[test]
  fn custom_secret_matches_oracle() {
    let secret = deterministic_bytes(SECRET_SIZE_MIN + 57);
    for len in [0usize, 3, 16, 100, 240, 241, 2048, 10_000] {
      let data = deterministic_bytes(len);
      assert_eq!(
        hash64_with_secret(&data, &secret),
        xxhash_rust::xxh3::xxh3_64_with_secret(&data, &secret),
        "len={len}"
      );
      assert_eq!(
        hash128_with_secret(&data, &secret).as_u128(),
        xxhash_rust::xxh3::xxh3_128_with_secret(&data, &secret),
        "len={len}"
      );
    }
  }

  #[test]
  fn secret_and_seed_switches_at_mid_size() {
    let secret = generate_secret_from_seed(99);
    let seed = 0xfeed_face_cafe_beef;

    let short = deterministic_bytes(MID_SIZE_MAX);
    assert_eq!(hash64_with_secret_and_seed(&short, &secret, seed), hash64(&short, seed));
    assert_eq!(hash128_with_secret_and_seed(&short, &secret, seed), hash128(&short, seed));

    let long = deterministic_bytes(MID_SIZE_MAX + 1);
    assert_eq!(
      hash64_with_secret_and_seed(&long, &secret, seed),
      hash64_with_secret(&long, &secret)
    );
    assert_eq!(
      hash128_with_secret_and_seed(&long, &secret, seed),
      hash128_with_secret(&long, &secret)
    );
  }

  #[test]
  #[should_panic(expected = "XXH3 secret must be at least 136 bytes")]
  fn undersized_secret_panics() {
    let secret = [0u8; SECRET_SIZE_MIN - 1];
    let _ = hash64_with_secret(b"abc", &secret);
  }

  #[test]
  fn secret_validation() {
    assert_eq!(
      Secret::new(&[0u8; 10]),
      Err(StateError::SecretTooShort {
        len: 10,
        min: SECRET_SIZE_MIN
      })
    );
    let ok = [1u8; SECRET_SIZE_MIN];
    let secret = Secret::try_from(&ok[..]).unwrap();
    assert_eq!(secret.as_bytes(), &ok[..]);
    assert!(!secret.is_empty());
    assert_eq!(Secret::DEFAULT.len(), DEFAULT_SECRET_SIZE);
  }

  proptest! {
    #[test]
    fn xxh3_64_matches_oracle(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
      prop_assert_eq!(hash64(&data, seed), xxhash_rust::xxh3::xxh3_64_with_seed(&data, seed));
    }

    #[test]
    fn xxh3_128_matches_oracle(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
      prop_assert_eq!(hash128(&data, seed).as_u128(), xxhash_rust::xxh3::xxh3_128_with_seed(&data, seed));
    }

    #[test]
    fn unseeded_is_seed_zero(data in proptest::collection::vec(any::<u8>(), 0..600)) {
      prop_assert_eq!(hash64_unseeded(&data), hash64(&data, 0));
      prop_assert_eq!(hash128_unseeded(&data), hash128(&data, 0));
    }
  }
}
