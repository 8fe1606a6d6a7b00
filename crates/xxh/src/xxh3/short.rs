//! Inputs of at most 240 bytes.
//!
//! Scalar in every variant: these lengths never reach the stripe loop.

use super::{
  MID_SIZE_MAX, PRIME_MX2, PRIME32_2, PRIME64_1, PRIME64_2, PRIME64_4, SECRET_SIZE_MIN, avalanche, mul64_to128,
  mul128_fold64, mult32_to64, xorshift64,
};
use crate::{
  Hash128,
  util::{read_u32_le, read_u64_le},
  xxh64,
};

#[inline(always)]
const fn rrmxmx(mut value: u64, len: u64) -> u64 {
  value ^= value.rotate_left(49) ^ value.rotate_left(24);
  value = value.wrapping_mul(PRIME_MX2);
  value ^= (value >> 35).wrapping_add(len);
  value = value.wrapping_mul(PRIME_MX2);
  xorshift64(value, 28)
}

#[inline(always)]
fn mix16_b(input: &[u8], input_offset: usize, secret: &[u8], secret_offset: usize, seed: u64) -> u64 {
  let input_lo = read_u64_le(input, input_offset) ^ read_u64_le(secret, secret_offset).wrapping_add(seed);
  let input_hi = read_u64_le(input, input_offset + 8) ^ read_u64_le(secret, secret_offset + 8).wrapping_sub(seed);
  mul128_fold64(input_lo, input_hi)
}

/// One 32-byte round of the 128-bit mid-size paths: `first` and `second` are
/// the offsets of the two 16-byte halves.
#[inline(always)]
fn mix32_b(
  acc: (u64, u64),
  input: &[u8],
  first: usize,
  second: usize,
  secret: &[u8],
  secret_offset: usize,
  seed: u64,
) -> (u64, u64) {
  let mut low = acc.0.wrapping_add(mix16_b(input, first, secret, secret_offset, seed));
  low ^= read_u64_le(input, second).wrapping_add(read_u64_le(input, second + 8));

  let mut high = acc.1.wrapping_add(mix16_b(input, second, secret, secret_offset + 16, seed));
  high ^= read_u64_le(input, first).wrapping_add(read_u64_le(input, first + 8));

  (low, high)
}

// ─── 64-bit ─────────────────────────────────────────────────────────────────

#[inline(always)]
fn hash64_1to3(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let len = input.len();
  let combo = (u32::from(input[0]) << 16)
    | (u32::from(input[len >> 1]) << 24)
    | u32::from(input[len - 1])
    | ((len as u32) << 8);

  let flip = u64::from(read_u32_le(secret, 0) ^ read_u32_le(secret, 4)).wrapping_add(seed);
  xxh64::avalanche(u64::from(combo) ^ flip)
}

#[inline(always)]
fn hash64_4to8(input: &[u8], mut seed: u64, secret: &[u8]) -> u64 {
  seed ^= u64::from((seed as u32).swap_bytes()) << 32;

  let input1 = read_u32_le(input, 0);
  let input2 = read_u32_le(input, input.len() - 4);

  let flip = (read_u64_le(secret, 8) ^ read_u64_le(secret, 16)).wrapping_sub(seed);
  let input64 = u64::from(input2).wrapping_add(u64::from(input1) << 32);
  rrmxmx(input64 ^ flip, input.len() as u64)
}

#[inline(always)]
fn hash64_9to16(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let flip1 = (read_u64_le(secret, 24) ^ read_u64_le(secret, 32)).wrapping_add(seed);
  let flip2 = (read_u64_le(secret, 40) ^ read_u64_le(secret, 48)).wrapping_sub(seed);

  let input_lo = read_u64_le(input, 0) ^ flip1;
  let input_hi = read_u64_le(input, input.len() - 8) ^ flip2;

  let acc = (input.len() as u64)
    .wrapping_add(input_lo.swap_bytes())
    .wrapping_add(input_hi)
    .wrapping_add(mul128_fold64(input_lo, input_hi));

  avalanche(acc)
}

#[inline(always)]
fn hash64_0to16(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  if input.len() > 8 {
    hash64_9to16(input, seed, secret)
  } else if input.len() >= 4 {
    hash64_4to8(input, seed, secret)
  } else if !input.is_empty() {
    hash64_1to3(input, seed, secret)
  } else {
    xxh64::avalanche(seed ^ read_u64_le(secret, 56) ^ read_u64_le(secret, 64))
  }
}

#[inline(always)]
fn hash64_17to128(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let len = input.len();
  let mut acc = (len as u64).wrapping_mul(PRIME64_1);

  if len > 32 {
    if len > 64 {
      if len > 96 {
        acc = acc.wrapping_add(mix16_b(input, 48, secret, 96, seed));
        acc = acc.wrapping_add(mix16_b(input, len - 64, secret, 112, seed));
      }
      acc = acc.wrapping_add(mix16_b(input, 32, secret, 64, seed));
      acc = acc.wrapping_add(mix16_b(input, len - 48, secret, 80, seed));
    }
    acc = acc.wrapping_add(mix16_b(input, 16, secret, 32, seed));
    acc = acc.wrapping_add(mix16_b(input, len - 32, secret, 48, seed));
  }

  acc = acc.wrapping_add(mix16_b(input, 0, secret, 0, seed));
  acc = acc.wrapping_add(mix16_b(input, len - 16, secret, 16, seed));

  avalanche(acc)
}

const MIDSIZE_START_OFFSET: usize = 3;
const MIDSIZE_LAST_OFFSET: usize = 17;

#[inline(never)]
fn hash64_129to240(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  let len = input.len();
  let nb_rounds = len / 16;
  let mut acc = (len as u64).wrapping_mul(PRIME64_1);

  for idx in 0..8 {
    acc = acc.wrapping_add(mix16_b(input, 16 * idx, secret, 16 * idx, seed));
  }
  acc = avalanche(acc);

  for idx in 8..nb_rounds {
    acc = acc.wrapping_add(mix16_b(
      input,
      16 * idx,
      secret,
      16 * (idx - 8) + MIDSIZE_START_OFFSET,
      seed,
    ));
  }

  acc = acc.wrapping_add(mix16_b(
    input,
    len - 16,
    secret,
    SECRET_SIZE_MIN - MIDSIZE_LAST_OFFSET,
    seed,
  ));

  avalanche(acc)
}

/// XXH3-64 of `input` (at most 240 bytes) keyed by `seed` and `secret`.
#[inline(always)]
pub(super) fn hash64(input: &[u8], seed: u64, secret: &[u8]) -> u64 {
  debug_assert!(input.len() <= MID_SIZE_MAX);
  if input.len() <= 16 {
    hash64_0to16(input, seed, secret)
  } else if input.len() <= 128 {
    hash64_17to128(input, seed, secret)
  } else {
    hash64_129to240(input, seed, secret)
  }
}

// ─── 128-bit ────────────────────────────────────────────────────────────────

#[inline(always)]
fn hash128_1to3(input: &[u8], seed: u64, secret: &[u8]) -> Hash128 {
  let len = input.len();
  let combined_lo = (u32::from(input[0]) << 16)
    | (u32::from(input[len >> 1]) << 24)
    | u32::from(input[len - 1])
    | ((len as u32) << 8);
  let combined_hi = combined_lo.swap_bytes().rotate_left(13);

  let flip_lo = u64::from(read_u32_le(secret, 0) ^ read_u32_le(secret, 4)).wrapping_add(seed);
  let flip_hi = u64::from(read_u32_le(secret, 8) ^ read_u32_le(secret, 12)).wrapping_sub(seed);

  Hash128::new(
    xxh64::avalanche(u64::from(combined_hi) ^ flip_hi),
    xxh64::avalanche(u64::from(combined_lo) ^ flip_lo),
  )
}

#[inline(always)]
fn hash128_4to8(input: &[u8], mut seed: u64, secret: &[u8]) -> Hash128 {
  seed ^= u64::from((seed as u32).swap_bytes()) << 32;

  let input_lo = read_u32_le(input, 0);
  let input_hi = read_u32_le(input, input.len() - 4);
  let input64 = u64::from(input_lo).wrapping_add(u64::from(input_hi) << 32);

  let flip = (read_u64_le(secret, 16) ^ read_u64_le(secret, 24)).wrapping_add(seed);
  let keyed = input64 ^ flip;

  let (mut lo, mut hi) = mul64_to128(keyed, PRIME64_1.wrapping_add((input.len() as u64) << 2));

  hi = hi.wrapping_add(lo << 1);
  lo ^= hi >> 3;

  lo = xorshift64(lo, 35).wrapping_mul(PRIME_MX2);
  lo = xorshift64(lo, 28);
  hi = avalanche(hi);

  Hash128::new(hi, lo)
}

#[inline(always)]
fn hash128_9to16(input: &[u8], seed: u64, secret: &[u8]) -> Hash128 {
  let flip_lo = (read_u64_le(secret, 32) ^ read_u64_le(secret, 40)).wrapping_sub(seed);
  let flip_hi = (read_u64_le(secret, 48) ^ read_u64_le(secret, 56)).wrapping_add(seed);
  let input_lo = read_u64_le(input, 0);
  let mut input_hi = read_u64_le(input, input.len() - 8);

  let (mut mul_low, mut mul_high) = mul64_to128(input_lo ^ input_hi ^ flip_lo, PRIME64_1);

  mul_low = mul_low.wrapping_add(((input.len() as u64) - 1) << 54);
  input_hi ^= flip_hi;
  mul_high = mul_high.wrapping_add(input_hi.wrapping_add(mult32_to64(input_hi as u32, PRIME32_2 - 1)));

  mul_low ^= mul_high.swap_bytes();

  let (result_low, mut result_high) = mul64_to128(mul_low, PRIME64_2);
  result_high = result_high.wrapping_add(mul_high.wrapping_mul(PRIME64_2));

  Hash128::new(avalanche(result_high), avalanche(result_low))
}

#[inline(always)]
fn hash128_0to16(input: &[u8], seed: u64, secret: &[u8]) -> Hash128 {
  if input.len() > 8 {
    hash128_9to16(input, seed, secret)
  } else if input.len() >= 4 {
    hash128_4to8(input, seed, secret)
  } else if !input.is_empty() {
    hash128_1to3(input, seed, secret)
  } else {
    let flip_lo = read_u64_le(secret, 64) ^ read_u64_le(secret, 72);
    let flip_hi = read_u64_le(secret, 80) ^ read_u64_le(secret, 88);
    Hash128::new(xxh64::avalanche(seed ^ flip_hi), xxh64::avalanche(seed ^ flip_lo))
  }
}

#[inline(always)]
fn finish128(acc: (u64, u64), len: usize, seed: u64) -> Hash128 {
  let low = acc.0.wrapping_add(acc.1);
  let high = acc
    .0
    .wrapping_mul(PRIME64_1)
    .wrapping_add(acc.1.wrapping_mul(PRIME64_4))
    .wrapping_add((len as u64).wrapping_sub(seed).wrapping_mul(PRIME64_2));

  Hash128::new(0u64.wrapping_sub(avalanche(high)), avalanche(low))
}

#[inline(always)]
fn hash128_17to128(input: &[u8], seed: u64, secret: &[u8]) -> Hash128 {
  let len = input.len();
  let mut acc = ((len as u64).wrapping_mul(PRIME64_1), 0u64);

  if len > 32 {
    if len > 64 {
      if len > 96 {
        acc = mix32_b(acc, input, 48, len - 64, secret, 96, seed);
      }
      acc = mix32_b(acc, input, 32, len - 48, secret, 64, seed);
    }
    acc = mix32_b(acc, input, 16, len - 32, secret, 32, seed);
  }
  acc = mix32_b(acc, input, 0, len - 16, secret, 0, seed);

  finish128(acc, len, seed)
}

#[inline(never)]
fn hash128_129to240(input: &[u8], seed: u64, secret: &[u8]) -> Hash128 {
  let len = input.len();
  let nb_rounds = len / 32;
  let mut acc = ((len as u64).wrapping_mul(PRIME64_1), 0u64);

  for idx in 0..4 {
    acc = mix32_b(acc, input, 32 * idx, 32 * idx + 16, secret, 32 * idx, seed);
  }
  acc = (avalanche(acc.0), avalanche(acc.1));

  for idx in 4..nb_rounds {
    acc = mix32_b(
      acc,
      input,
      32 * idx,
      32 * idx + 16,
      secret,
      MIDSIZE_START_OFFSET + 32 * (idx - 4),
      seed,
    );
  }

  acc = mix32_b(
    acc,
    input,
    len - 16,
    len - 32,
    secret,
    SECRET_SIZE_MIN - MIDSIZE_LAST_OFFSET - 16,
    0u64.wrapping_sub(seed),
  );

  finish128(acc, len, seed)
}

/// XXH3-128 of `input` (at most 240 bytes) keyed by `seed` and `secret`.
#[inline(always)]
pub(super) fn hash128(input: &[u8], seed: u64, secret: &[u8]) -> Hash128 {
  debug_assert!(input.len() <= MID_SIZE_MAX);
  if input.len() <= 16 {
    hash128_0to16(input, seed, secret)
  } else if input.len() <= 128 {
    hash128_17to128(input, seed, secret)
  } else {
    hash128_129to240(input, seed, secret)
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::{
    super::{DEFAULT_SECRET, PRIME64_3},
    *,
  };

  #[test]
  fn every_short_length_matches_oracle() {
    let data: Vec<u8> = (0..=MID_SIZE_MAX as u32).map(|i| (i.wrapping_mul(0x9E37) >> 3) as u8).collect();
    for len in 0..=MID_SIZE_MAX {
      let input = &data[..len];
      for seed in [0u64, 7, PRIME64_3, u64::MAX] {
        assert_eq!(
          hash64(input, seed, &DEFAULT_SECRET),
          xxhash_rust::xxh3::xxh3_64_with_seed(input, seed),
          "64 len={len} seed={seed}"
        );
        assert_eq!(
          hash128(input, seed, &DEFAULT_SECRET).as_u128(),
          xxhash_rust::xxh3::xxh3_128_with_seed(input, seed),
          "128 len={len} seed={seed}"
        );
      }
    }
  }

  #[test]
  fn seed_changes_both_halves() {
    for len in [0usize, 2, 6, 12, 40, 200] {
      let input = &[0xA5u8; MID_SIZE_MAX][..len];
      let a = hash128(input, 0, &DEFAULT_SECRET);
      let b = hash128(input, 1, &DEFAULT_SECRET);
      assert_ne!(a.high, b.high, "len={len}");
      assert_ne!(a.low, b.low, "len={len}");
    }
  }
}
