//! Fuzz target for streaming XXH3.
//!
//! Arbitrary update splits and mid-stream digests must agree with one-shot
//! hashing of the same bytes.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use xxh::xxh3::{self, Xxh3_64, Xxh3_128};

#[derive(Arbitrary, Debug)]
struct Input {
  seed: u64,
  data: Vec<u8>,
  /// Chunk sizes for streaming updates
  chunk_sizes: Vec<u16>,
}

fuzz_target!(|input: Input| {
  let data = &input.data;
  let mut h64 = Xxh3_64::with_seed(input.seed);
  let mut h128 = Xxh3_128::with_seed(input.seed);

  let mut offset = 0;
  let mut chunk_idx = 0;
  while offset < data.len() {
    let chunk_size = if input.chunk_sizes.is_empty() {
      1
    } else {
      usize::from(input.chunk_sizes[chunk_idx % input.chunk_sizes.len()]).max(1)
    };
    let end = (offset + chunk_size).min(data.len());
    h64.update(&data[offset..end]);
    h128.update(&data[offset..end]);
    offset = end;
    chunk_idx += 1;

    if chunk_idx % 3 == 0 {
      assert_eq!(h64.digest(), xxh3::hash64(&data[..offset], input.seed));
    }
  }

  assert_eq!(h64.digest(), xxhash_rust::xxh3::xxh3_64_with_seed(data, input.seed));
  assert_eq!(h128.digest().as_u128(), xxhash_rust::xxh3::xxh3_128_with_seed(data, input.seed));
});
