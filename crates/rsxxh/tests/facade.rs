use std::io::{Cursor, Write as _};

use proptest::prelude::*;
use rsxxh::{HashReader, HashState, HashWriter, Xxh3_64, Xxh3_128, auto, xxh3};

fn gen_bytes(len: usize) -> Vec<u8> {
  (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(7)).collect()
}

#[test]
fn reader_fingerprints_a_copy() {
  let data = gen_bytes(100_000);
  let mut reader = HashReader::new(Cursor::new(data.clone()), Xxh3_128::new());
  let mut sink = Vec::new();
  std::io::copy(&mut reader, &mut sink).unwrap();
  assert_eq!(sink, data);
  assert_eq!(reader.digest(), xxh3::hash128(&data, 0));
}

#[test]
fn writer_fingerprints_what_was_written() {
  let data = gen_bytes(9_999);
  let mut writer = HashWriter::new(Vec::new(), Xxh3_64::with_seed(4));
  for chunk in data.chunks(700) {
    writer.write_all(chunk).unwrap();
  }
  let (inner, digest) = writer.into_parts();
  assert_eq!(inner, data);
  assert_eq!(digest, xxhash_rust::xxh3::xxh3_64_with_seed(&data, 4));
}

#[test]
fn auto_streams_agree_with_handle() {
  let data = gen_bytes(4096);
  let mut streamed = auto::xxh3_128(77);
  streamed.update(&data);

  let mut state = HashState::new();
  state.reset_xxh3_128(77);
  state.update(&data).unwrap();

  assert_eq!(streamed.digest(), state.digest128().unwrap());
  assert_eq!(auto::hash128(&data, 77), streamed.digest());
}

#[test]
fn capability_flags_are_consistent() {
  assert_eq!(rsxxh::HAVE_SSE2, xxh3::Variant::Sse2.is_compiled());
  assert_eq!(rsxxh::HAVE_NEON, xxh3::Variant::Neon.is_compiled());
  assert!(xxh3::Variant::COMPILED.contains(&auto::config().variant));
}

proptest! {
  #[test]
  fn auto_matches_core(data in proptest::collection::vec(any::<u8>(), 0..4096), seed in any::<u64>()) {
    prop_assert_eq!(auto::hash64(&data, seed), xxh3::hash64(&data, seed));
    prop_assert_eq!(auto::hash128(&data, seed), xxh3::hash128(&data, seed));
  }

  #[test]
  fn auto_streams_match_core(
    data in proptest::collection::vec(any::<u8>(), 0..4096),
    seed in any::<u64>(),
    chunk in 1usize..512,
  ) {
    let mut streamed = auto::xxh3_64(seed);
    for part in data.chunks(chunk) {
      streamed.update(part);
    }
    prop_assert_eq!(streamed.digest(), xxh3::hash64(&data, seed));
  }
}
