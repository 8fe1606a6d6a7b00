//! Inputs longer than 240 bytes: the stripe accumulator.
//!
//! A block is `(secret.len() - 64) / 8` stripes of 64 bytes. Each stripe is
//! mixed with the secret advanced by 8 bytes per stripe; every full block ends
//! with a scramble keyed by the last 64 secret bytes. The final (possibly
//! overlapping) stripe uses the secret at `len - 64 - 7`.

use super::{
  ACC_NB, Acc, INITIAL_ACC, PRIME64_1, PRIME64_2, SECRET_CONSUME_RATE, SECRET_LASTACC_START, SECRET_MERGEACCS_START,
  STRIPE_LEN, avalanche, kernels::Lanes, mul128_fold64,
};
use crate::{
  Hash128,
  util::{array_at, read_u64_le},
};

#[inline(always)]
pub(super) const fn stripes_per_block(secret_len: usize) -> usize {
  (secret_len - STRIPE_LEN) / SECRET_CONSUME_RATE
}

#[inline(always)]
pub(super) fn scramble_key(secret: &[u8]) -> &[u8; STRIPE_LEN] {
  array_at(secret, secret.len() - STRIPE_LEN)
}

#[inline(always)]
pub(super) fn last_stripe_key(secret: &[u8]) -> &[u8; STRIPE_LEN] {
  array_at(secret, secret.len() - STRIPE_LEN - SECRET_LASTACC_START)
}

#[inline(always)]
fn accumulate<L: Lanes>(lanes: L, acc: &mut Acc, stripes: &[[u8; STRIPE_LEN]], secret: &[u8]) {
  for (n, stripe) in stripes.iter().enumerate() {
    lanes.accumulate_512(acc, stripe, array_at(secret, n * SECRET_CONSUME_RATE));
  }
}

/// Streaming form of the stripe loop.
///
/// Absorbs every whole stripe of `input`, continuing a block that already
/// holds `*stripes_so_far` stripes, and scrambles whenever a block fills.
#[inline(always)]
pub(super) fn consume_stripes<L: Lanes>(
  lanes: L,
  acc: &mut Acc,
  stripes_so_far: &mut usize,
  stripes_per_block: usize,
  input: &[u8],
  secret: &[u8],
) {
  let (stripes, _) = input.as_chunks::<STRIPE_LEN>();
  let mut stripes = stripes;

  while !stripes.is_empty() {
    let room = stripes_per_block - *stripes_so_far;
    let take = room.min(stripes.len());
    let (now, later) = stripes.split_at(take);

    for (n, stripe) in now.iter().enumerate() {
      let offset = (*stripes_so_far + n) * SECRET_CONSUME_RATE;
      lanes.accumulate_512(acc, stripe, array_at(secret, offset));
    }
    *stripes_so_far += take;

    if *stripes_so_far == stripes_per_block {
      lanes.scramble(acc, scramble_key(secret));
      *stripes_so_far = 0;
    }
    stripes = later;
  }
}

#[inline(always)]
fn hash_long_loop<L: Lanes>(lanes: L, input: &[u8], secret: &[u8]) -> Acc {
  let mut acc = INITIAL_ACC;

  let nb_stripes = stripes_per_block(secret.len());
  let block_len = STRIPE_LEN * nb_stripes;
  let nb_blocks = (input.len() - 1) / block_len;

  for block in input.chunks_exact(block_len).take(nb_blocks) {
    accumulate(lanes, &mut acc, block.as_chunks::<STRIPE_LEN>().0, secret);
    lanes.scramble(&mut acc, scramble_key(secret));
  }

  // The last stripe is always processed separately, even when it is whole.
  let tail = &input[nb_blocks * block_len..];
  let nb_stripes = (tail.len() - 1) / STRIPE_LEN;
  accumulate(lanes, &mut acc, &tail.as_chunks::<STRIPE_LEN>().0[..nb_stripes], secret);

  lanes.accumulate_512(
    &mut acc,
    array_at(input, input.len() - STRIPE_LEN),
    last_stripe_key(secret),
  );
  acc
}

#[inline(always)]
fn mix_two_accs(acc: &Acc, idx: usize, secret: &[u8], secret_offset: usize) -> u64 {
  mul128_fold64(
    acc[idx] ^ read_u64_le(secret, secret_offset),
    acc[idx + 1] ^ read_u64_le(secret, secret_offset + 8),
  )
}

#[inline(always)]
fn merge_accs(acc: &Acc, secret: &[u8], secret_offset: usize, mut result: u64) -> u64 {
  for pair in 0..ACC_NB / 2 {
    result = result.wrapping_add(mix_two_accs(acc, pair * 2, secret, secret_offset + pair * 16));
  }
  avalanche(result)
}

#[inline(always)]
pub(super) fn finalize64(acc: &Acc, secret: &[u8], total_len: u64) -> u64 {
  merge_accs(acc, secret, SECRET_MERGEACCS_START, total_len.wrapping_mul(PRIME64_1))
}

#[inline(always)]
pub(super) fn finalize128(acc: &Acc, secret: &[u8], total_len: u64) -> Hash128 {
  let low = merge_accs(acc, secret, SECRET_MERGEACCS_START, total_len.wrapping_mul(PRIME64_1));
  let high = merge_accs(
    acc,
    secret,
    secret.len() - STRIPE_LEN - SECRET_MERGEACCS_START,
    !total_len.wrapping_mul(PRIME64_2),
  );
  Hash128::new(high, low)
}

#[inline(always)]
pub(super) fn hash64<L: Lanes>(lanes: L, input: &[u8], secret: &[u8]) -> u64 {
  let acc = hash_long_loop(lanes, input, secret);
  finalize64(&acc, secret, input.len() as u64)
}

#[inline(always)]
pub(super) fn hash128<L: Lanes>(lanes: L, input: &[u8], secret: &[u8]) -> Hash128 {
  let acc = hash_long_loop(lanes, input, secret);
  finalize128(&acc, secret, input.len() as u64)
}

#[cfg(test)]
mod tests {
  extern crate alloc;

  use alloc::vec::Vec;

  use super::{
    super::{DEFAULT_SECRET, portable::Scalar},
    *,
  };

  fn bytes(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i as u8) ^ ((i >> 8) as u8).wrapping_mul(13)).collect()
  }

  #[test]
  fn block_geometry_for_default_secret() {
    assert_eq!(stripes_per_block(DEFAULT_SECRET.len()), 16);
    assert_eq!(stripes_per_block(136), 9);
  }

  #[test]
  fn chunked_consume_equals_whole_consume() {
    let input = bytes(STRIPE_LEN * 40);
    let per_block = stripes_per_block(DEFAULT_SECRET.len());

    let mut whole = INITIAL_ACC;
    let mut whole_count = 0;
    consume_stripes(Scalar, &mut whole, &mut whole_count, per_block, &input, &DEFAULT_SECRET);

    let mut pieces = INITIAL_ACC;
    let mut pieces_count = 0;
    for chunk in input.chunks(STRIPE_LEN * 3) {
      consume_stripes(Scalar, &mut pieces, &mut pieces_count, per_block, chunk, &DEFAULT_SECRET);
    }

    assert_eq!(whole, pieces);
    assert_eq!(whole_count, pieces_count);
    assert_eq!(whole_count, 40 % per_block);
  }

  #[test]
  fn long_matches_oracle_at_block_edges() {
    let per_block = stripes_per_block(DEFAULT_SECRET.len());
    let block = STRIPE_LEN * per_block;
    for len in [241, block - 1, block, block + 1, 2 * block, 2 * block + STRIPE_LEN + 1] {
      let input = bytes(len);
      assert_eq!(
        hash64(Scalar, &input, &DEFAULT_SECRET),
        xxhash_rust::xxh3::xxh3_64(&input),
        "len={len}"
      );
      assert_eq!(
        hash128(Scalar, &input, &DEFAULT_SECRET).as_u128(),
        xxhash_rust::xxh3::xxh3_128(&input),
        "len={len}"
      );
    }
  }
}
