//! XXH32 (**NOT CRYPTO**).
//!
//! Scalar only: four 32-bit lanes over 16-byte stripes, then a byte-wise tail.
//! Used by the LZ4 frame format and anything else that wants a 32-bit digest.

#![allow(clippy::indexing_slicing)] // Fixed-size lane arrays and 16-byte stripes

use traits::{FastHash, StreamingHash};

use crate::util::read_u32_le;

const PRIME32_1: u32 = 0x9E37_79B1;
const PRIME32_2: u32 = 0x85EB_CA77;
const PRIME32_3: u32 = 0xC2B2_AE3D;
const PRIME32_4: u32 = 0x27D4_EB2F;
const PRIME32_5: u32 = 0x1656_67B1;

const STRIPE_LEN: usize = 16;

#[inline(always)]
const fn round(acc: u32, input: u32) -> u32 {
  acc
    .wrapping_add(input.wrapping_mul(PRIME32_2))
    .rotate_left(13)
    .wrapping_mul(PRIME32_1)
}

#[inline(always)]
const fn init_lanes(seed: u32) -> [u32; 4] {
  [
    seed.wrapping_add(PRIME32_1).wrapping_add(PRIME32_2),
    seed.wrapping_add(PRIME32_2),
    seed,
    seed.wrapping_sub(PRIME32_1),
  ]
}

#[inline(always)]
fn stripe(lanes: &mut [u32; 4], block: &[u8; STRIPE_LEN]) {
  lanes[0] = round(lanes[0], read_u32_le(block, 0));
  lanes[1] = round(lanes[1], read_u32_le(block, 4));
  lanes[2] = round(lanes[2], read_u32_le(block, 8));
  lanes[3] = round(lanes[3], read_u32_le(block, 12));
}

#[inline(always)]
const fn converge(lanes: &[u32; 4]) -> u32 {
  lanes[0]
    .rotate_left(1)
    .wrapping_add(lanes[1].rotate_left(7))
    .wrapping_add(lanes[2].rotate_left(12))
    .wrapping_add(lanes[3].rotate_left(18))
}

#[inline(always)]
const fn avalanche(mut h: u32) -> u32 {
  h ^= h >> 15;
  h = h.wrapping_mul(PRIME32_2);
  h ^= h >> 13;
  h = h.wrapping_mul(PRIME32_3);
  h ^ (h >> 16)
}

/// Mix the sub-stripe tail into `h` and avalanche.
#[inline(always)]
fn finalize(mut h: u32, tail: &[u8]) -> u32 {
  let (words, bytes) = tail.as_chunks::<4>();
  for word in words {
    h = h.wrapping_add(u32::from_le_bytes(*word).wrapping_mul(PRIME32_3));
    h = h.rotate_left(17).wrapping_mul(PRIME32_4);
  }
  for &byte in bytes {
    h = h.wrapping_add(u32::from(byte).wrapping_mul(PRIME32_5));
    h = h.rotate_left(11).wrapping_mul(PRIME32_1);
  }
  avalanche(h)
}

/// XXH32 of `data` with `seed`.
///
/// ```
/// assert_eq!(xxh::xxh32::xxh32(b"", 0), 0x02CC_5D05);
/// ```
#[must_use]
pub fn xxh32(data: &[u8], seed: u32) -> u32 {
  let (stripes, tail) = data.as_chunks::<STRIPE_LEN>();

  let mut h = if stripes.is_empty() {
    seed.wrapping_add(PRIME32_5)
  } else {
    let mut lanes = init_lanes(seed);
    for block in stripes {
      stripe(&mut lanes, block);
    }
    converge(&lanes)
  };

  h = h.wrapping_add(data.len() as u32);
  finalize(h, tail)
}

/// Streaming XXH32.
///
/// # Examples
///
/// ```
/// use xxh::Xxh32;
///
/// let mut h = Xxh32::with_seed(7);
/// h.update(b"hello ");
/// h.update(b"world");
/// assert_eq!(h.digest(), xxh::xxh32::xxh32(b"hello world", 7));
/// ```
#[derive(Clone)]
pub struct Xxh32 {
  lanes: [u32; 4],
  buffer: [u8; STRIPE_LEN],
  buffered: usize,
  total_len: u64,
  seed: u32,
}

impl Xxh32 {
  /// Hasher with seed 0.
  #[inline]
  #[must_use]
  pub const fn new() -> Self {
    Self::with_seed(0)
  }

  #[inline]
  #[must_use]
  pub const fn with_seed(seed: u32) -> Self {
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
  pub const fn seed(&self) -> u32 {
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
  pub fn digest(&self) -> u32 {
    let mut h = if self.total_len >= STRIPE_LEN as u64 {
      converge(&self.lanes)
    } else {
      self.seed.wrapping_add(PRIME32_5)
    };

    // XXH32 folds the length modulo 2^32.
    h = h.wrapping_add(self.total_len as u32);
    finalize(h, &self.buffer[..self.buffered])
  }

  /// Forget absorbed input, keeping the seed.
  #[inline]
  pub fn reset(&mut self) {
    *self = Self::with_seed(self.seed);
  }
}

impl Default for Xxh32 {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}

impl core::fmt::Debug for Xxh32 {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("Xxh32")
      .field("seed", &self.seed)
      .field("total_len", &self.total_len)
      .finish_non_exhaustive()
  }
}

impl StreamingHash for Xxh32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;

  #[inline]
  fn update(&mut self, data: &[u8]) {
    Xxh32::update(self, data);
  }

  #[inline]
  fn digest(&self) -> u32 {
    Xxh32::digest(self)
  }

  #[inline]
  fn reset(&mut self) {
    Xxh32::reset(self);
  }
}

impl FastHash for Xxh32 {
  const OUTPUT_SIZE: usize = 4;
  type Output = u32;
  type Seed = u32;

  #[inline]
  fn hash_with_seed(seed: u32, data: &[u8]) -> u32 {
    xxh32(data, seed)
  }
}

impl core::hash::Hasher for Xxh32 {
  #[inline]
  fn write(&mut self, bytes: &[u8]) {
    self.update(bytes);
  }

  #[inline]
  fn finish(&self) -> u64 {
    u64::from(self.digest())
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
    assert_eq!(xxh32(b"", 0), 0x02CC_5D05);
    assert_eq!(xxh32(b"", 1), xxhash_rust::xxh32::xxh32(b"", 1));
    assert_eq!(xxh32(b"a", 0), xxhash_rust::xxh32::xxh32(b"a", 0));
  }

  #[test]
  fn boundaries_match_oracle() {
    for len in [0usize, 1, 3, 4, 5, 15, 16, 17, 31, 32, 33, 100, 1024] {
      let data = pattern(len);
      for seed in [0u32, 1, 0x9E37_79B1, u32::MAX] {
        assert_eq!(
          xxh32(&data, seed),
          xxhash_rust::xxh32::xxh32(&data, seed),
          "len={len} seed={seed}"
        );
      }
    }
  }

  #[test]
  fn digest_is_repeatable_and_reset_restores() {
    let mut h = Xxh32::with_seed(42);
    h.update(b"some bytes that span a stripe");
    let first = h.digest();
    assert_eq!(h.digest(), first);

    h.reset();
    assert_eq!(h.digest(), xxh32(b"", 42));
    h.update(b"some bytes that span a stripe");
    assert_eq!(h.digest(), first);
  }

  proptest! {
    #[test]
    fn streaming_matches_oneshot(seed in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..512), split in 1usize..64) {
      let mut h = Xxh32::with_seed(seed);
      for chunk in data.chunks(split) {
        h.update(chunk);
      }
      prop_assert_eq!(h.digest(), xxh32(&data, seed));
      prop_assert_eq!(h.digest(), xxhash_rust::xxh32::xxh32(&data, seed));
    }
  }
}
