#![no_main]

use libfuzzer_sys::fuzz_target;
use traits::FastHash as _;
use xxh::{Xxh32, Xxh64};

fuzz_target!(|input: &[u8]| {
  let (seed_bytes, data) = input.split_at(core::cmp::min(8, input.len()));
  let mut seed = 0u64;
  for (i, &b) in seed_bytes.iter().enumerate() {
    seed |= (b as u64) << (i * 8);
  }

  assert_eq!(Xxh64::hash_with_seed(seed, data), xxhash_rust::xxh64::xxh64(data, seed));
  assert_eq!(
    Xxh32::hash_with_seed(seed as u32, data),
    xxhash_rust::xxh32::xxh32(data, seed as u32)
  );

  let mut h = Xxh32::with_seed(seed as u32);
  for chunk in data.chunks(7) {
    h.update(chunk);
  }
  assert_eq!(h.digest(), xxhash_rust::xxh32::xxh32(data, seed as u32));
});
