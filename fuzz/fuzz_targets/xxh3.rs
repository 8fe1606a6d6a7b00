#![no_main]

use libfuzzer_sys::fuzz_target;
use xxh::xxh3::{self, SECRET_SIZE_MIN};

fuzz_target!(|input: &[u8]| {
  let (seed_bytes, data) = input.split_at(core::cmp::min(8, input.len()));
  let mut seed = 0u64;
  for (i, &b) in seed_bytes.iter().enumerate() {
    seed |= (b as u64) << (i * 8);
  }

  let ours64 = xxh3::hash64(data, seed);
  let ref64 = xxhash_rust::xxh3::xxh3_64_with_seed(data, seed);
  assert_eq!(ours64, ref64);

  let ours128 = xxh3::hash128(data, seed);
  let ref128 = xxhash_rust::xxh3::xxh3_128_with_seed(data, seed);
  assert_eq!(ours128.as_u128(), ref128);

  // Treat a long enough input as its own secret.
  if data.len() >= SECRET_SIZE_MIN {
    let ours = xxh3::hash64_with_secret(data, data);
    let expected = xxhash_rust::xxh3::xxh3_64_with_secret(data, data);
    assert_eq!(ours, expected);

    let ours = xxh3::hash128_with_secret(data, data);
    let expected = xxhash_rust::xxh3::xxh3_128_with_secret(data, data);
    assert_eq!(ours.as_u128(), expected);
  }
});
