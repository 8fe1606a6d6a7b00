use proptest::prelude::*;
use traits::FastHash as _;
use xxh::{
  Canonical, Hash128,
  xxh3::{self, SECRET_SIZE_MIN, Xxh3_64, Xxh3_128},
};

fn xxh3_64_ref(seed: u64, data: &[u8]) -> u64 {
  xxhash_rust::xxh3::xxh3_64_with_seed(data, seed)
}

fn xxh3_128_ref(seed: u64, data: &[u8]) -> u128 {
  xxhash_rust::xxh3::xxh3_128_with_seed(data, seed)
}

fn gen_bytes(len: usize, seed: u64) -> Vec<u8> {
  let mut out = vec![0u8; len];
  let mut x = seed | 1;
  for b in &mut out {
    x ^= x << 13;
    x ^= x >> 7;
    x ^= x << 17;
    *b = (x as u8).wrapping_add((x >> 8) as u8);
  }
  out
}

#[test]
fn empty_input_vectors() {
  assert_eq!(xxh3::hash64_unseeded(b""), 0x2D06_8005_38D3_94C2);
  let h = xxh3::hash128_unseeded(b"");
  assert_eq!(h.high, 0x99AA_06D3_0147_98D8);
  assert_eq!(h.low, 0x6001_C324_468D_497F);
}

#[test]
fn every_length_through_the_mid_range() {
  let data = gen_bytes(1024, 0xA5A5);
  for len in 0..=1024 {
    let msg = &data[..len];
    assert_eq!(xxh3::hash64(msg, 0), xxh3_64_ref(0, msg), "len={len}");
    assert_eq!(xxh3::hash128(msg, 0).as_u128(), xxh3_128_ref(0, msg), "len={len}");
  }
}

#[test]
fn generated_secret_bytes_are_stable() {
  let mut secret = [0u8; SECRET_SIZE_MIN];
  xxh3::generate_secret(&mut secret, 0x1234_5678_9abc_def0);
  assert_eq!(secret[..8], [0xf0, 0x5d, 0xba, 0x13, 0x74, 0xd9, 0x26, 0x87]);
  assert_eq!(secret[135], 0x12 ^ (135u32 * 131) as u8);

  let data = gen_bytes(1000, 8);
  assert_eq!(
    xxh3::hash64_with_secret(&data, &secret),
    xxhash_rust::xxh3::xxh3_64_with_secret(&data, &secret)
  );
}

#[test]
fn custom_secret_lengths() {
  let data = gen_bytes(5000, 3);
  let mut secret = vec![0u8; 300];
  xxh3::generate_secret(&mut secret, 11);

  for secret_len in [SECRET_SIZE_MIN, 137, 150, 192, 255, 300] {
    let s = &secret[..secret_len];
    for len in [0usize, 3, 16, 100, 200, 240, 241, 1024, 5000] {
      let msg = &data[..len];
      assert_eq!(
        xxh3::hash64_with_secret(msg, s),
        xxhash_rust::xxh3::xxh3_64_with_secret(msg, s),
        "secret_len={secret_len} len={len}"
      );
      assert_eq!(
        xxh3::hash128_with_secret(msg, s).as_u128(),
        xxhash_rust::xxh3::xxh3_128_with_secret(msg, s),
        "secret_len={secret_len} len={len}"
      );
    }
  }
}

#[test]
fn secret_and_seed_switches_at_240() {
  let data = gen_bytes(600, 9);
  let secret = xxh3::generate_secret_from_seed(77);
  let seed = 0xDEAD_BEEF;
  for len in [0usize, 1, 100, 239, 240] {
    let msg = &data[..len];
    assert_eq!(xxh3::hash64_with_secret_and_seed(msg, &secret, seed), xxh3::hash64(msg, seed));
    assert_eq!(xxh3::hash128_with_secret_and_seed(msg, &secret, seed), xxh3::hash128(msg, seed));
  }
  for len in [241usize, 300, 600] {
    let msg = &data[..len];
    assert_eq!(
      xxh3::hash64_with_secret_and_seed(msg, &secret, seed),
      xxh3::hash64_with_secret(msg, &secret)
    );
    assert_eq!(
      xxh3::hash128_with_secret_and_seed(msg, &secret, seed),
      xxh3::hash128_with_secret(msg, &secret)
    );
  }
}

#[test]
fn canonical_bytes_are_big_endian() {
  let data = b"canonical";
  let h64 = xxh3::hash64(data, 0);
  assert_eq!(h64.to_canonical(), h64.to_be_bytes());

  let h128 = xxh3::hash128(data, 0);
  let bytes = h128.to_canonical();
  assert_eq!(bytes[..8], h128.high.to_be_bytes());
  assert_eq!(bytes[8..], h128.low.to_be_bytes());
  assert_eq!(Hash128::from_canonical(bytes), h128);
}

#[test]
fn low_half_of_128_is_the_64_bit_hash_for_long_inputs() {
  // Both widths finish the low lane with the same accumulator merge.
  for len in [241usize, 1024, 4096] {
    let data = gen_bytes(len, 1);
    assert_eq!(xxh3::hash128(&data, 0).low, xxh3::hash64(&data, 0), "len={len}");
    assert_eq!(
      xxh3::hash128(&data, 0).low,
      xxhash_rust::xxh3::xxh3_128_with_seed(&data, 0) as u64,
      "len={len}"
    );
  }
}

#[test]
fn single_bit_flip_changes_both_halves() {
  let mut data = gen_bytes(512, 5);
  let before = xxh3::hash128(&data, 0);
  data[200] ^= 0x10;
  let after = xxh3::hash128(&data, 0);
  assert_ne!(before.high, after.high);
  assert_ne!(before.low, after.low);
}

proptest! {
  #[test]
  fn xxh3_64_matches_xxhash_rust(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    let ours = Xxh3_64::hash_with_seed(seed, &data);
    let expected = xxh3_64_ref(seed, &data);
    prop_assert_eq!(ours, expected);
  }

  #[test]
  fn xxh3_128_matches_xxhash_rust(seed in any::<u64>(), data in proptest::collection::vec(any::<u8>(), 0..4096)) {
    let ours = Xxh3_128::hash_with_seed(seed, &data);
    let expected = xxh3_128_ref(seed, &data);
    prop_assert_eq!(ours.as_u128(), expected);
  }

  #[test]
  fn unseeded_equals_seed_zero(data in proptest::collection::vec(any::<u8>(), 0..2048)) {
    prop_assert_eq!(xxh3::hash64_unseeded(&data), xxh3::hash64(&data, 0));
    prop_assert_eq!(xxh3::hash128_unseeded(&data), xxh3::hash128(&data, 0));
  }

  #[test]
  fn secret_and_seed_matches_xxhash_rust(
    seed in any::<u64>(),
    secret_seed in any::<u64>(),
    data in proptest::collection::vec(any::<u8>(), 0..1024),
  ) {
    let secret = xxh3::generate_secret_from_seed(secret_seed);
    let ours = xxh3::hash64_with_secret_and_seed(&data, &secret, seed);
    let expected = if data.len() <= 240 {
      xxhash_rust::xxh3::xxh3_64_with_seed(&data, seed)
    } else {
      xxhash_rust::xxh3::xxh3_64_with_secret(&data, &secret)
    };
    prop_assert_eq!(ours, expected);
  }
}
