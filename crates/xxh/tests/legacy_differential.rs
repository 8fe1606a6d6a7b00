use core::hash::Hasher as _;

use proptest::prelude::*;
use traits::FastHash as _;
use xxh::{Canonical, Xxh32, Xxh64};

#[test]
fn known_vectors() {
  assert_eq!(xxh::xxh32::xxh32(b"", 0), 0x02CC_5D05);
  assert_eq!(xxh::xxh64::xxh64(b"", 0), 0xEF46_DB37_51D8_E999);
  assert_eq!(xxh::xxh32::xxh32(b"abc", 0), xxhash_rust::xxh32::xxh32(b"abc", 0));
}

#[test]
fn lane_boundaries() {
  let data: Vec<u8> = (0..200u32).map(|i| (i * 7 + 3) as u8).collect();
  for len in 0..data.len() {
    let msg = &data[..len];
    assert_eq!(Xxh32::hash_with_seed(0x9E37_79B1, msg), xxhash_rust::xxh32::xxh32(msg, 0x9E37_79B1), "len={len}");
    assert_eq!(Xxh64::hash_with_seed(u64::MAX, msg), xxhash_rust::xxh64::xxh64(msg, u64::MAX), "len={len}");
  }
}

#[test]
fn hasher_impls_agree_with_oneshot() {
  let mut h = Xxh64::with_seed(5);
  h.write(b"hasher ");
  h.write(b"bytes");
  assert_eq!(h.finish(), xxh::xxh64::xxh64(b"hasher bytes", 5));

  let mut h = Xxh32::new();
  h.write(b"hasher bytes");
  assert_eq!(h.finish(), u64::from(xxh::xxh32::xxh32(b"hasher bytes", 0)));
}

#[test]
fn canonical_round_trip() {
  let h32 = xxh::xxh32::xxh32(b"round trip", 1);
  assert_eq!(u32::from_canonical(h32.to_canonical()), h32);
  assert_eq!(h32.to_canonical(), h32.to_be_bytes());

  let h64 = xxh::xxh64::xxh64(b"round trip", 1);
  assert_eq!(u64::from_canonical(h64.to_canonical()), h64);
}

proptest! {
  #[test]
  fn xxh32_matches_xxhash_rust(seed in any::<u32>(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
    prop_assert_eq!(Xxh32::hash_with_seed(seed, &data), xxhash_rust::xxh32::xxh32(&data, seed));
  }

  #[test]
  fn xxh64_matches_xxhash_rust(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..2048)) {
    prop_assert_eq!(Xxh64::hash_with_seed(seed, &data), xxhash_rust::xxh64::xxh64(&data, seed));
  }

  #[test]
  fn xxh64_streaming_matches(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..2048), chunk in 1usize..100) {
    let mut h = Xxh64::with_seed(seed);
    for part in data.chunks(chunk) {
      h.update(part);
    }
    prop_assert_eq!(h.digest(), xxhash_rust::xxh64::xxh64(&data, seed));
  }
}
