//! XXH64 (**NOT CRYPTO**).
//!
//! Scalar only: four 64-bit lanes over 32-byte stripes, merged into a single
//! accumulator, then an 8/4/1-byte tail.

#![allow(clippy::indexing_slicing)] // Fixed-size lane arrays and 32-byte stripes

use traits::{FastHash, StreamingHash};

use crate::util::read_u64_le;

pub(crate) const PRIME64_1: u64 = 0x9E37_79B1_85EB_CA87;
pub(crate) const PRIME64_2: u64 = 0xC2B2_AE3D_27D4_EB4F;
pub(crate) const PRIME64_3: u64 = 0x1656_67B1_9E37_79F9;
pub(crate) const PRIME64_4: u64 = 0x85EB_CA77_C2B2_AE63;
pub(crate) const PRIME64_5: u64 = 0x27D4_EB2F_1656_67C5;

const STRIPE_LEN: usize = 32;

#[inline(always)]
const fn round(acc: u64, input: u64) -> u64 {
  acc
    .wrapping_add(input.wrapping_mul(PRIME64_2))
    .rotate_left(31)
    .wrapping_mul(PRIME64_1)
}

#[inline(always)]
const fn merge_round(acc: u64, lane: u64) -> u64 {
  (acc ^ round(0, lane)).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4)
}

#[inline(always)]
const fn init_lanes(seed: u64) -> [u64; 4] {
  [
    seed.wrapping_add(PRIME64_1).wrapping_add(PRIME64_2),
    seed.wrapping_add(PRIME64_2),
    seed,
    seed.wrapping_sub(PRIME64_1),
  ]
}

#[inline(always)]
fn stripe(lanes: &mut [u64; 4], block: &[u8; STRIPE_LEN]) {
  lanes[0] = round(lanes[0], read_u64_le(block, 0));
  lanes[1] = round(lanes[1], read_u64_le(block, 8));
  lanes[2] = round(lanes[2], read_u64_le(block, 16));
  lanes[3] = round(lanes[3], read_u64_le(block, 24));
}

#[inline(always)]
const fn converge(lanes: &[u64; 4]) -> u64 {
  let mut h = lanes[0]
    .rotate_left(1)
    .wrapping_add(lanes[1].rotate_left(7))
    .wrapping_add(lanes[2].rotate_left(12))
    .wrapping_add(lanes[3].rotate_left(18));
  h = merge_round(h, lanes[0]);
  h = merge_round(h, lanes[1]);
  h = merge_round(h, lanes[2]);
  merge_round(h, lanes[3])
}

#[inline(always)]
pub(crate) const fn avalanche(mut h: u64) -> u64 {
  h ^= h >> 33;
  h = h.wrapping_mul(PRIME64_2);
  h ^= h >> 29;
  h = h.wrapping_mul(PRIME64_3);
  h ^ (h >> 32)
}

#[inline(always)]
fn finalize(mut h: u64, tail: &[u8]) -> u64 {
  let (words, rest) = tail.as_chunks::<8>();
  for word in words {
    h ^= round(0, u64::from_le_bytes(*word));
    h = h.rotate_left(27).wrapping_mul(PRIME64_1).wrapping_add(PRIME64_4);
  }

  let (halves, bytes) = rest.as_chunks::<4>();
  for half in halves {
    h ^= u64::from(u32::from_le_bytes(*half)).wrapping_mul(PRIME64_1);
    h = h.rotate_left(23).wrapping_mul(PRIME64_2).wrapping_add(PRIME64_3);
  }

  for &byte in bytes {
    h ^= u64::from(byte).wrapping_mul(PRIME64_5);
    h = h.rotate_left(11).wrapping_mul(PRIME64_1);
  }

  avalanche(h)
}

/// XXH64 of `data` with `seed`.
///
/// ```
/// assert_eq!(xxh::xxh64::xxh64(b"", 0), 0xEF46_DB37_51D8_E999);
/// ```
#[must_use]
pub fn xxh64(data: &[u8], seed: u64) -> u64 {
  let (stripes, tail) = data.as_chunks::<STRIPE_LEN>();

  let mut h = if stripes.is_empty() {
    seed.wrapping_add(PRIME64_5)
  } else {
    let mut lanes = init_lanes(seed);
    for block in stripes {
      stripe(&mut lanes, block);
    }
    converge(&lanes)
  };

  h = h.wrapping_add(data.len() as u64);
  finalize(h, tail)
}

/// Streaming XXH64.
#[derive(Clone)]
pub struct Xxh64 {
  lanes: [u64; 4],
  buffer: [u8; STRIPE_LEN],
  buffered: usize,
  total_len: u64,
  seed: u64,
}

impl Xxh64 {
  /// Hasher with seed 0.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self::with_seed(0)
  }

  #[inline]
  #[must_use]
  pub const fn with_seed(seed: u64) -> Self {
    Self {
      lanes: init_lanes(seed),
      buffer: [0; STRIPE_LEN],
      buffered: 0,
      total_len: 0,
      seed,
    }
  }

  #[inline]
  #[must_use]
  pub const fn seed(&self) -> u64 {
    self.seed
  }

  pub fn update(&mut self, mut data: &[u8]) {
    self.total_len = self.total_len.wrapping_add(data.len() as u64);

    if self.buffered + data.len() < STRIPE_LEN {
      self.buffer[self.buffered..self.buffered + data.len()].copy_from_slice(data);
      self.buffered += data.len();
      return;
    }

    if self.buffered > 0 {
      let fill = STRIPE_LEN - self.buffered;
      let (head, rest) = data.split_at(fill);
      self.buffer[self.buffered..].copy_from_slice(head);
      let block = self.buffer;
      stripe(&mut self.lanes, &block);
      self.buffered = 0;
      data = rest;
    }

    let (stripes, tail) = data.as_chunks::<STRIPE_LEN>();
    for block in stripes {
      stripe(&mut self.lanes, block);
    }

    self.buffer[..tail.len()].copy_from_slice(tail);
    self.buffered = tail.len();
  }

  #[must_use]
  pub fn digest(&self) -> u64 {
    let mut h = if self.total_len >= STRIPE_LEN as u64 {
      converge(&self.lanes)
    } else {
      self.seed.wrapping_add(PRIME64_5)
    };

    h = h.wrapping_add(self.total_len);
    finalize(h, &self.buffer[..self.buffered])
  }

  /// Forget absorbed input, keeping the seed.
  #[inline]
  pub fn reset(&mut self) {
    *self = Self::with_seed(self.seed);
  }
}

impl Default for Xxh64 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl core::fmt::Debug for Xxh64 {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Xxh64")
      .field("seed", &self.seed)
      .field("total_len", &self.total_len)
      .finish_non_exhaustive()
  }
}

impl StreamingHash for Xxh64 {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Xxh64::update(self, data);
  }

  #[inline]
  fn digest(&self) -> u64 {
    Xxh64::digest(self)
  }

  #[inline]
  fn reset(&mut self) {
    Xxh64::reset(self);
  }
}

impl FastHash for Xxh64 {
  const OUTPUT_SIZE: usize = 8;
  type Output = u64;
  type Seed = u64;

  #[inline]
  fn hash_with_seed(seed: u64, data: &[u8]) -> u64 {
    xxh64(data, seed)
  }
}

impl core::hash::Hasher for Xxh64 {
  #[inline]
  fn write(&mut self, bytes: &[u8]) {
    self.update(bytes);
  }

  #[inline]
  fn finish(&self) -> u64 {
    self.digest()
  }
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use proptest::prelude::*;

  use super::*;

  fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
  }

  #[test]
  fn known_vectors() {
    assert_eq!(xxh64(b"", 0), 0xEF46_DB37_51D8_E999);
    assert_eq!(xxh64(b"a", 0), xxhash_rust::xxh64::xxh64(b"a", 0));
  }

  #[test]
  fn tail_shapes_match_oracle() {
    // Every combination of 8-byte, 4-byte and single-byte tail steps.
    for len in 0usize..=80 {
      let data = pattern(len);
      for seed in [0u64, 1, PRIME64_1, u64::MAX] {
        assert_eq!(
          xxh64(&data, seed),
          xxhash_rust::xxh64::xxh64(&data, seed),
          "len={len} seed={seed}"
        );
      }
    }
  }

  #[test]
  fn hasher_finish_equals_digest() {
    use core::hash::Hasher;

    let mut h = Xxh64::with_seed(9);
    h.write(b"0123456789abcdef0123456789abcdef0123");
    assert_eq!(h.finish(), xxh64(b"0123456789abcdef0123456789abcdef0123", 9));
  }

  proptest! {
    #[test]
    fn streaming_matches_oneshot(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..1024), split in 1usize..100) {
      let mut h = Xxh64::with_seed(seed);
      for chunk in data.chunks(split) {
        h.update(chunk);
      }
      prop_assert_eq!(h.digest(), xxh64(&data, seed));
      prop_assert_eq!(h.digest(), xxhash_rust::xxh64::xxh64(&data, seed));
    }
  }
}
